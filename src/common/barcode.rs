// src/common/barcode.rs

// Oráculo de códigos de barras do importador: gerar, validar e detectar.
// Tudo puro, sem efeito colateral - o pipeline trata este módulo como uma
// biblioteca externa.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BarcodeKind {
    Ean13,
    UpcA,
    Code128,
}

impl BarcodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BarcodeKind::Ean13 => "EAN13",
            BarcodeKind::UpcA => "UPCA",
            BarcodeKind::Code128 => "CODE128",
        }
    }
}

/// Detecta o tipo pelo formato: 13 dígitos = EAN-13, 12 dígitos = UPC-A,
/// qualquer outra coisa cai em CODE128.
pub fn detect(value: &str) -> BarcodeKind {
    let v = value.trim();
    if !v.is_empty() && v.chars().all(|c| c.is_ascii_digit()) {
        match v.len() {
            13 => return BarcodeKind::Ean13,
            12 => return BarcodeKind::UpcA,
            _ => {}
        }
    }
    BarcodeKind::Code128
}

/// Valida o código contra a regra de checksum do tipo.
pub fn validate(value: &str, kind: BarcodeKind) -> bool {
    let v = value.trim();
    match kind {
        BarcodeKind::Ean13 => valid_numeric(v, 13, 1),
        BarcodeKind::UpcA => valid_numeric(v, 12, 3),
        // CODE128 aceita qualquer ASCII imprimível não vazio.
        BarcodeKind::Code128 => !v.is_empty() && v.chars().all(|c| (' '..='~').contains(&c)),
    }
}

/// Gera um código determinístico a partir de uma semente (normalmente o SKU).
/// O resultado é sempre um EAN-13 válido.
pub fn generate(seed: &str, kind: BarcodeKind) -> String {
    // FNV-1a: estável entre execuções, diferente do hash da std.
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in seed.as_bytes() {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }

    match kind {
        BarcodeKind::Ean13 | BarcodeKind::Code128 => {
            let body = format!("{:012}", hash % 1_000_000_000_000);
            let check = mod10_check_digit(&body, 1);
            format!("{body}{check}")
        }
        BarcodeKind::UpcA => {
            let body = format!("{:011}", hash % 100_000_000_000);
            let check = mod10_check_digit(&body, 3);
            format!("{body}{check}")
        }
    }
}

fn valid_numeric(value: &str, len: usize, first_weight: u32) -> bool {
    if value.len() != len || !value.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    let body = &value[..len - 1];
    let check = value.as_bytes()[len - 1] - b'0';
    mod10_check_digit(body, first_weight) == u32::from(check)
}

// Dígito verificador padrão GS1: pesos alternados a partir de
// `first_weight` (1 para EAN-13, 3 para UPC-A).
fn mod10_check_digit(body: &str, first_weight: u32) -> u32 {
    let sum: u32 = body
        .chars()
        .enumerate()
        .map(|(i, c)| {
            let digit = c.to_digit(10).unwrap_or(0);
            let weight = if i % 2 == 0 { first_weight } else { 4 - first_weight };
            digit * weight
        })
        .sum();
    (10 - (sum % 10)) % 10
}
