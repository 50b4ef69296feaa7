// src/models/import.rs

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::catalog::ProductKind;

// Uma linha crua do arquivo: cabeçalho original -> valor da célula.
// Vive só durante o processamento do lote.
pub type RawRow = HashMap<String, String>;

// ---
// Linha normalizada
// ---
// Produzida pelo normalizador de colunas. Os campos numéricos e booleanos
// já chegam tipados aqui: o reconciliador nunca vê string crua de
// preço/quantidade/ativo.
#[derive(Debug, Clone, Default)]
pub struct NormalizedRow {
    pub sku: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub kind: ProductKind,

    pub price: Decimal,
    pub cost: Decimal,
    pub quantity: Decimal,
    pub reorder_point: Decimal,

    pub import_currency: Option<String>,
    pub selling_currency: Option<String>,
    pub uom_base: Option<String>,
    pub uom_sell: Option<String>,

    pub active: bool,

    pub barcode: Option<String>,
    pub barcode_type: Option<String>,

    pub supplier_name: Option<String>,
    pub supplier_sku: Option<String>,
    pub supplier_barcode: Option<String>,

    pub service_code: Option<String>,
    pub duration_hours: Option<Decimal>,

    // Colunas que não batem com nenhum campo canônico sobrevivem aqui
    // sob o nome "slugificado" (não são usadas adiante).
    pub extras: HashMap<String, String>,
}

// ---
// Falhas "engolidas"
// ---
// Escritas secundárias (fornecedor, código de barras extra) que falharam.
// Vão para o log do servidor, nunca para a resposta da API; a assimetria
// é proposital e fica explícita neste tipo.
#[derive(Debug, Clone)]
pub enum SoftFailure {
    SupplierLink { product_name: String, reason: String },
    SecondaryBarcode { product_name: String, reason: String },
}

// ---
// Resultado do lote
// ---
// Nunca é persistido: é o corpo da resposta HTTP do importador.
#[derive(Debug, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub success: u32,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,

    #[serde(skip)]
    pub soft_failures: Vec<SoftFailure>,
}
