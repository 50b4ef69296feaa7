// src/services/import_service.rs

// O pipeline de importação em massa do catálogo:
// decodificar -> normalizar colunas -> reconciliar linha a linha -> gravar.
//
// Uma passada única e sequencial sobre as linhas. Cada linha é commitada
// (ou pulada) de forma independente: não existe transação englobando o
// lote, e uma linha ruim nunca derruba as demais.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::{
        barcode::{self, BarcodeKind},
        error::AppError,
        file_parser,
    },
    db::store::CatalogStore,
    models::{
        catalog::{Brand, NewProduct, NewProductBarcode, NewProductSupplier, ProductKind},
        import::{ImportReport, NormalizedRow, RawRow, SoftFailure},
        inventory::NewStockItem,
    },
};

// =============================================================================
//  ÁREA 1: NORMALIZADOR DE COLUNAS
// =============================================================================

// Os campos canônicos que o importador entende.
const CANONICAL_FIELDS: &[&str] = &[
    "sku", "name", "description", "brand", "type", "price", "cost", "quantity",
    "reorder_point", "import_currency", "selling_currency", "uom_base", "uom_sell",
    "active", "barcode", "barcode_type", "supplier_name", "supplier_sku",
    "supplier_barcode", "service_code", "duration", "category",
];

// Tabela estática de sinônimos: cabeçalho humano -> campo canônico.
// Primeiro tentamos o cabeçalho exato, depois sem diferenciar maiúsculas;
// o que sobrar cai no slug (minúsculas + underscore).
const HEADER_SYNONYMS: &[(&str, &str)] = &[
    ("SKU", "sku"),
    ("Sku", "sku"),
    ("Item Code", "sku"),
    ("Product Code", "sku"),
    ("Code", "sku"),
    ("Reference", "sku"),
    ("Name", "name"),
    ("Product Name", "name"),
    ("Item", "name"),
    ("Item Name", "name"),
    ("Title", "name"),
    ("Description", "description"),
    ("Details", "description"),
    ("Brand", "brand"),
    ("Manufacturer", "brand"),
    ("Make", "brand"),
    ("Type", "type"),
    ("Product Type", "type"),
    ("Kind", "type"),
    ("Category", "category"),
    ("Group", "category"),
    ("Price", "price"),
    ("Selling Price", "price"),
    ("Unit Price", "price"),
    ("Sale Price", "price"),
    ("Cost", "cost"),
    ("Cost Price", "cost"),
    ("Purchase Price", "cost"),
    ("Quantity", "quantity"),
    ("Qty", "quantity"),
    ("Stock", "quantity"),
    ("Stock Quantity", "quantity"),
    ("On Hand", "quantity"),
    ("Reorder Point", "reorder_point"),
    ("Reorder Level", "reorder_point"),
    ("Min Stock", "reorder_point"),
    ("Import Currency", "import_currency"),
    ("Cost Currency", "import_currency"),
    ("Currency", "import_currency"),
    ("Selling Currency", "selling_currency"),
    ("Price Currency", "selling_currency"),
    ("Unit", "uom_base"),
    ("UOM", "uom_base"),
    ("Base Unit", "uom_base"),
    ("Selling Unit", "uom_sell"),
    ("Sell Unit", "uom_sell"),
    ("Active", "active"),
    ("Status", "active"),
    ("Enabled", "active"),
    ("Barcode", "barcode"),
    ("EAN", "barcode"),
    ("UPC", "barcode"),
    ("Barcode Type", "barcode_type"),
    ("Supplier", "supplier_name"),
    ("Supplier Name", "supplier_name"),
    ("Vendor", "supplier_name"),
    ("Supplier SKU", "supplier_sku"),
    ("Supplier Code", "supplier_sku"),
    ("Supplier Barcode", "supplier_barcode"),
    ("Service Code", "service_code"),
    ("Duration", "duration"),
    ("Duration Hours", "duration"),
];

pub(crate) fn slugify_header(header: &str) -> String {
    header
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

fn canonical_field(header: &str) -> Option<&'static str> {
    let trimmed = header.trim();
    if let Some((_, field)) = HEADER_SYNONYMS.iter().find(|(h, _)| *h == trimmed) {
        return Some(field);
    }

    let lowered = trimmed.to_lowercase();
    if let Some((_, field)) = HEADER_SYNONYMS
        .iter()
        .find(|(h, _)| h.to_lowercase() == lowered)
    {
        return Some(field);
    }

    // O slug ainda pode acertar um campo canônico em cheio
    // (ex: "reorder point" -> "reorder_point").
    let slug = slugify_header(trimmed);
    CANONICAL_FIELDS.iter().find(|f| **f == slug).copied()
}

/// Limpeza tolerante a localidade: mantém dígitos, um único ponto decimal
/// e um sinal de menos inicial; todo o resto (símbolo de moeda, separador
/// de milhar, lixo) é descartado. Valor imprestável vira 0, nunca erro.
pub(crate) fn parse_flexible_decimal(raw: &str) -> Decimal {
    let mut cleaned = String::new();
    let mut seen_dot = false;
    for c in raw.chars() {
        match c {
            '0'..='9' => cleaned.push(c),
            '.' if !seen_dot => {
                seen_dot = true;
                cleaned.push(c);
            }
            '-' if cleaned.is_empty() => cleaned.push('-'),
            _ => {}
        }
    }
    cleaned.parse::<Decimal>().unwrap_or(Decimal::ZERO)
}

/// Ativo por padrão: vazio/ausente é `true`.
pub(crate) fn parse_active_flag(raw: Option<&str>) -> bool {
    let Some(value) = raw else { return true };
    let v = value.trim().to_lowercase();
    if v.is_empty() {
        return true;
    }
    match v.as_str() {
        "true" | "yes" | "y" | "active" | "enabled" => true,
        "false" | "no" | "n" | "inactive" | "disabled" => false,
        _ => v.parse::<f64>().map(|n| n != 0.0).unwrap_or(true),
    }
}

/// Dobra o texto livre da coluna "type": SERVICE/SERVICES viram SERVICE,
/// qualquer outra coisa (inclusive rótulos de domínio como "CHEMICALS")
/// vira PRODUCT. Simplificação intencional.
pub(crate) fn fold_product_kind(raw: Option<&str>) -> ProductKind {
    match raw {
        Some(value) => {
            let v = value.trim().to_uppercase();
            if v == "SERVICE" || v == "SERVICES" {
                ProductKind::Service
            } else {
                ProductKind::Product
            }
        }
        None => ProductKind::Product,
    }
}

/// Normalização pura e total: toda RawRow vira exatamente uma
/// NormalizedRow, sem perda (colunas desconhecidas sobrevivem em `extras`
/// sob o slug). Os campos numéricos e booleanos já saem tipados daqui.
pub fn normalize_row(raw: &RawRow) -> NormalizedRow {
    let mut canonical: HashMap<&'static str, String> = HashMap::new();
    let mut extras: HashMap<String, String> = HashMap::new();

    for (header, value) in raw {
        match canonical_field(header) {
            Some(field) => {
                canonical.insert(field, value.clone());
            }
            None => {
                extras.insert(slugify_header(header), value.clone());
            }
        }
    }

    let text = |key: &str| -> Option<String> {
        canonical
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };
    let number = |key: &str| -> Decimal {
        canonical
            .get(key)
            .map(|v| parse_flexible_decimal(v))
            .unwrap_or(Decimal::ZERO)
    };

    NormalizedRow {
        sku: text("sku"),
        name: text("name"),
        description: text("description"),
        brand: text("brand"),
        category: text("category"),
        kind: fold_product_kind(canonical.get("type").map(String::as_str)),
        price: number("price"),
        cost: number("cost"),
        quantity: number("quantity"),
        reorder_point: number("reorder_point"),
        import_currency: text("import_currency"),
        selling_currency: text("selling_currency"),
        uom_base: text("uom_base"),
        uom_sell: text("uom_sell"),
        active: parse_active_flag(canonical.get("active").map(String::as_str)),
        barcode: text("barcode"),
        barcode_type: text("barcode_type"),
        supplier_name: text("supplier_name"),
        supplier_sku: text("supplier_sku"),
        supplier_barcode: text("supplier_barcode"),
        service_code: text("service_code"),
        duration_hours: text("duration").map(|v| parse_flexible_decimal(&v)),
        extras,
    }
}

// =============================================================================
//  ÁREA 2: CONTEXTO DO LOTE
// =============================================================================

// Os caches carregados uma vez antes do loop de linhas. Nada de estado
// global de módulo: o contexto viaja explícito por cada chamada, o que
// deixa o pipeline testável isoladamente.
pub struct ImportContext {
    pub default_category_id: Uuid,
    pub default_warehouse_id: Uuid,
    // nome em minúsculas -> id. Cresce quando o importador cria marcas,
    // então a marca criada pela linha 3 já serve a linha 4.
    brands: HashMap<String, Uuid>,
}

impl ImportContext {
    pub fn new(default_category_id: Uuid, default_warehouse_id: Uuid, brands: Vec<Brand>) -> Self {
        let brands = brands
            .into_iter()
            .map(|b| (b.name.to_lowercase(), b.id))
            .collect();
        Self {
            default_category_id,
            default_warehouse_id,
            brands,
        }
    }
}

// =============================================================================
//  ÁREA 3: O SERVIÇO (reconciliador + escritor)
// =============================================================================

#[derive(Clone)]
pub struct ImportService<S: CatalogStore> {
    store: Arc<S>,
}

impl<S: CatalogStore> ImportService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Roda o lote inteiro dentro de uma única requisição.
    ///
    /// Condições fatais do lote (arquivo vazio, nenhuma categoria, nenhum
    /// depósito) abortam ANTES do loop com AppError. Problema de uma linha
    /// vira string em `errors`/`warnings` e o loop continua.
    pub async fn import_file(
        &self,
        file_name: &str,
        content_type: Option<&str>,
        payload: &[u8],
    ) -> Result<ImportReport, AppError> {
        let raw_rows = file_parser::decode_upload(file_name, content_type, payload)?;
        if raw_rows.is_empty() {
            return Err(AppError::EmptyImport);
        }

        // Pré-condições e caches do lote.
        let default_category = self
            .store
            .first_category()
            .await?
            .ok_or(AppError::NoCategoryConfigured)?;
        let default_warehouse = self
            .store
            .first_warehouse()
            .await?
            .ok_or(AppError::NoWarehouseConfigured)?;
        let brands = self.store.list_brands().await?;

        let mut ctx = ImportContext::new(default_category.id, default_warehouse.id, brands);
        let mut report = ImportReport::default();

        tracing::info!(
            "📦 Importação iniciada: {} ({} linhas de dados)",
            file_name,
            raw_rows.len()
        );

        for (idx, raw) in raw_rows.iter().enumerate() {
            // A linha 1 do arquivo é o cabeçalho.
            let line = idx + 2;
            let row = normalize_row(raw);
            match self.process_row(&mut ctx, &mut report, line, &row).await {
                Ok(()) => report.success += 1,
                Err(message) => report.errors.push(message),
            }
        }

        tracing::info!(
            "📦 Importação concluída: {} ok, {} erros, {} avisos, {} falhas engolidas",
            report.success,
            report.errors.len(),
            report.warnings.len(),
            report.soft_failures.len()
        );

        Ok(report)
    }

    // Os passos 1-9 do reconciliador, na ordem em que os valores derivados
    // se encadeiam. Err(_) = a linha foi pulada; o banco só é tocado a
    // partir do passo 7 (criação de marca).
    async fn process_row(
        &self,
        ctx: &mut ImportContext,
        report: &mut ImportReport,
        line: usize,
        row: &NormalizedRow,
    ) -> Result<(), String> {
        // 1. Campos obrigatórios.
        let (Some(sku), Some(name)) = (row.sku.as_deref(), row.name.as_deref()) else {
            return Err(format!("Row {line}: Missing required fields"));
        };

        // 2. Duplicata: a importação é não-destrutiva, nunca atualiza um
        //    produto existente. A consulta é "viva" - enxerga linhas já
        //    commitadas deste mesmo lote.
        let duplicate = self
            .store
            .identifier_exists(sku)
            .await
            .map_err(|e| format!("Row {line}: {e}"))?;
        if duplicate {
            return Err(format!("Row {line}: SKU already exists ({sku})"));
        }

        // 3. (numéricos já chegaram tipados do normalizador)
        // 4. Código de barras: valida o fornecido ou gera a partir do SKU.
        let (barcode_value, barcode_kind) = self
            .resolve_barcode(report, line, sku, row)
            .await
            .map_err(|e| format!("Row {line}: {e}"))?;

        // 5. (tipo já dobrado no normalizador)
        let kind = row.kind;

        // 6. Categoria: busca por "contém" no nome; sem acerto, usa a
        //    categoria padrão do lote.
        let category_id = match row.category.as_deref() {
            Some(fragment) => match self
                .store
                .find_category_containing(fragment)
                .await
                .map_err(|e| format!("Row {line}: {e}"))?
            {
                Some(category) => category.id,
                None => {
                    report.warnings.push(format!(
                        "Row {line}: category '{fragment}' not found, using default"
                    ));
                    ctx.default_category_id
                }
            },
            None => ctx.default_category_id,
        };

        // 7. Marca (só no caminho de produto físico).
        let brand_id = match (kind, row.brand.as_deref()) {
            (ProductKind::Product, Some(brand_name)) => Some(
                self.resolve_brand(ctx, brand_name)
                    .await
                    .map_err(|e| format!("Row {line}: failed to create '{name}': {e}"))?,
            ),
            _ => None,
        };

        // 8. (active já dobrado no normalizador)
        // 9. Montagem do payload: sku/service_code mutuamente exclusivos.
        let (sku_field, service_code) = match kind {
            ProductKind::Product => (Some(sku.to_string()), None),
            ProductKind::Service => (
                None,
                Some(row.service_code.clone().unwrap_or_else(|| sku.to_string())),
            ),
        };
        let default_uom = match kind {
            ProductKind::Product => "pcs",
            ProductKind::Service => "hours",
        };

        let new_product = NewProduct {
            kind,
            sku: sku_field,
            service_code,
            name: name.to_string(),
            description: row.description.clone(),
            barcode: Some(barcode_value.clone()),
            barcode_type: Some(barcode_kind.as_str().to_string()),
            category_id,
            brand_id,
            price: row.price,
            cost: row.cost,
            original_price: row.price,
            original_cost: row.cost,
            import_currency: row.import_currency.clone(),
            selling_currency: row.selling_currency.clone(),
            uom_base: row.uom_base.clone().unwrap_or_else(|| default_uom.to_string()),
            uom_sell: row.uom_sell.clone().unwrap_or_else(|| default_uom.to_string()),
            duration_hours: match kind {
                ProductKind::Service => row.duration_hours,
                ProductKind::Product => None,
            },
            active: row.active,
        };

        // --- Escritor de persistência ---
        // Cada insert é aguardado de forma independente; não há transação
        // englobando a linha.
        let product = self
            .store
            .insert_product(new_product)
            .await
            .map_err(|e| format!("Row {line}: failed to create '{name}': {e}"))?;

        // Escritas secundárias: falha aqui é engolida de propósito - vai
        // para o log e para a lista de soft failures, nunca para `errors`.
        if let Some(supplier_name) = row.supplier_name.as_deref() {
            let link = NewProductSupplier {
                product_id: product.id,
                supplier_name: supplier_name.to_string(),
                supplier_sku: row.supplier_sku.clone(),
                supplier_barcode: row.supplier_barcode.clone(),
                supplier_cost: Some(row.cost),
            };
            if let Err(e) = self.store.insert_product_supplier(link).await {
                tracing::warn!("Fornecedor não vinculado para '{}': {}", name, e);
                report.soft_failures.push(SoftFailure::SupplierLink {
                    product_name: name.to_string(),
                    reason: e.to_string(),
                });
            }
        }

        if let Some(supplier_barcode) = row.supplier_barcode.as_deref() {
            if supplier_barcode != barcode_value {
                let secondary_kind = barcode::detect(supplier_barcode);
                if barcode::validate(supplier_barcode, secondary_kind) {
                    let secondary = NewProductBarcode {
                        product_id: product.id,
                        barcode: supplier_barcode.to_string(),
                        barcode_type: secondary_kind.as_str().to_string(),
                    };
                    if let Err(e) = self.store.insert_product_barcode(secondary).await {
                        tracing::warn!(
                            "Código de barras secundário descartado para '{}': {}",
                            name,
                            e
                        );
                        report.soft_failures.push(SoftFailure::SecondaryBarcode {
                            product_name: name.to_string(),
                            reason: e.to_string(),
                        });
                    }
                }
            }
        }

        // Saldo inicial: serviços não geram estoque.
        if kind == ProductKind::Product {
            let stock = NewStockItem {
                product_id: product.id,
                warehouse_id: ctx.default_warehouse_id,
                quantity: row.quantity,
                reserved: Decimal::ZERO,
                available: row.quantity,
                average_cost: row.cost,
                total_value: row.quantity * row.cost,
                reorder_point: row.reorder_point,
            };
            self.store
                .insert_stock_item(stock)
                .await
                .map_err(|e| format!("Row {line}: failed to create stock for '{name}': {e}"))?;
        }

        Ok(())
    }

    // Passo 4 do reconciliador. Código fornecido inválido é descartado com
    // aviso (não é erro) e um novo é gerado do SKU. Colisão regenera UMA
    // única vez com sku+timestamp - sem loop de retry; colisão dupla é uma
    // limitação aceita.
    async fn resolve_barcode(
        &self,
        report: &mut ImportReport,
        line: usize,
        sku: &str,
        row: &NormalizedRow,
    ) -> Result<(String, BarcodeKind), AppError> {
        let supplied = row.barcode.as_deref().and_then(|value| {
            let kind = barcode::detect(value);
            if barcode::validate(value, kind) {
                Some((value.to_string(), kind))
            } else {
                report.warnings.push(format!(
                    "Row {line}: invalid barcode '{value}' discarded, generated a new one"
                ));
                None
            }
        });

        let (mut value, mut kind) = supplied
            .unwrap_or_else(|| (barcode::generate(sku, BarcodeKind::Ean13), BarcodeKind::Ean13));

        if self.store.barcode_exists(&value).await? {
            let reseed = format!("{}{}", sku, Utc::now().timestamp_millis());
            value = barcode::generate(&reseed, BarcodeKind::Ean13);
            kind = BarcodeKind::Ean13;
            report.warnings.push(format!(
                "Row {line}: barcode already in use, generated a new one"
            ));
        }

        Ok((value, kind))
    }

    // Passo 7: busca case-insensitive no cache do lote; se não existir,
    // cria a marca marcada como auto_created e alimenta o cache.
    async fn resolve_brand(&self, ctx: &mut ImportContext, name: &str) -> Result<Uuid, AppError> {
        let key = name.trim().to_lowercase();
        if let Some(id) = ctx.brands.get(&key) {
            return Ok(*id);
        }

        let brand = self.store.create_brand(name.trim(), true).await?;
        ctx.brands.insert(key, brand.id);
        Ok(brand.id)
    }
}

// =============================================================================
//  TESTES (partes puras do pipeline)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn decimal_tolerante_a_moeda_e_milhar() {
        assert_eq!(parse_flexible_decimal("1,234.56 GHS"), "1234.56".parse().unwrap());
        assert_eq!(parse_flexible_decimal("R$ 10,50"), "1050".parse().unwrap());
        assert_eq!(parse_flexible_decimal("-5.5"), "-5.5".parse().unwrap());
        assert_eq!(parse_flexible_decimal(""), Decimal::ZERO);
        assert_eq!(parse_flexible_decimal("abc"), Decimal::ZERO);
        assert_eq!(parse_flexible_decimal("-"), Decimal::ZERO);
    }

    #[test]
    fn active_e_verdadeiro_por_padrao() {
        for truthy in [Some("1"), Some("true"), Some("YES"), Some("y"), Some("Active"), Some(""), None] {
            assert!(parse_active_flag(truthy), "{truthy:?}");
        }
        for falsy in [Some("0"), Some("false"), Some("no"), Some("Inactive")] {
            assert!(!parse_active_flag(falsy), "{falsy:?}");
        }
    }

    #[test]
    fn tipo_dobra_para_product_ou_service() {
        assert_eq!(fold_product_kind(Some("service")), ProductKind::Service);
        assert_eq!(fold_product_kind(Some("SERVICES")), ProductKind::Service);
        // Rótulos de domínio caem em PRODUCT de propósito.
        assert_eq!(fold_product_kind(Some("CHEMICALS")), ProductKind::Product);
        assert_eq!(fold_product_kind(Some("hardware")), ProductKind::Product);
        assert_eq!(fold_product_kind(None), ProductKind::Product);
    }

    #[test]
    fn cabecalhos_sinonimos_e_case_insensitive() {
        let row = normalize_row(&raw(&[
            ("Product Name", "Widget"),
            ("ITEM CODE", "ABC-1"),
            ("qty", "20"),
            ("Vendor", "ACME"),
        ]));

        assert_eq!(row.name.as_deref(), Some("Widget"));
        assert_eq!(row.sku.as_deref(), Some("ABC-1"));
        assert_eq!(row.quantity, "20".parse().unwrap());
        assert_eq!(row.supplier_name.as_deref(), Some("ACME"));
    }

    #[test]
    fn cabecalho_desconhecido_sobrevive_no_slug() {
        let row = normalize_row(&raw(&[
            ("SKU", "ABC-1"),
            ("Name", "Widget"),
            ("Campo   Interno Qualquer", "42"),
        ]));

        assert_eq!(
            row.extras.get("campo_interno_qualquer"),
            Some(&"42".to_string())
        );
    }

    #[test]
    fn slug_acerta_campo_canonico() {
        // "Reorder_Point" não está na tabela de sinônimos com essa grafia,
        // mas o slug bate com o campo canônico.
        let row = normalize_row(&raw(&[
            ("SKU", "ABC-1"),
            ("Name", "Widget"),
            ("Reorder_Point", "5"),
        ]));
        assert_eq!(row.reorder_point, "5".parse().unwrap());
    }

    #[test]
    fn normalizacao_e_total() {
        let row = normalize_row(&raw(&[("SKU", ""), ("Name", "   ")]));
        // Vazio/espaços viram None; a linha ainda é produzida.
        assert!(row.sku.is_none());
        assert!(row.name.is_none());
        assert!(row.active);
        assert_eq!(row.price, Decimal::ZERO);
    }
}
