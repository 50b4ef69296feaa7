// src/common/file_parser.rs

// Decodificador de arquivos do importador.
// Regra de seleção: extensão/MIME de planilha -> calamine (primeira aba);
// qualquer outra coisa é tratada como texto CSV.

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Reader};

use crate::common::error::AppError;
use crate::models::import::RawRow;

const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xls", "xlsm", "xlsb", "ods"];
const SPREADSHEET_MIME_HINTS: &[&str] = &["spreadsheet", "ms-excel"];

/// Decodifica o upload em linhas cruas (cabeçalho original -> célula).
/// Zero linhas de dados NÃO é erro daqui: quem decide o que fazer com um
/// arquivo vazio é o serviço de importação.
pub fn decode_upload(
    file_name: &str,
    content_type: Option<&str>,
    payload: &[u8],
) -> Result<Vec<RawRow>, AppError> {
    if is_spreadsheet(file_name, content_type) {
        decode_spreadsheet(file_name, payload)
    } else {
        decode_csv(payload)
    }
}

fn is_spreadsheet(file_name: &str, content_type: Option<&str>) -> bool {
    let ext = std::path::Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    if SPREADSHEET_EXTENSIONS.contains(&ext.as_str()) {
        return true;
    }

    content_type
        .map(|ct| SPREADSHEET_MIME_HINTS.iter().any(|hint| ct.contains(hint)))
        .unwrap_or(false)
}

// ---
// Planilhas (xlsx / xls) - só a primeira aba do workbook.
// ---
fn decode_spreadsheet(file_name: &str, payload: &[u8]) -> Result<Vec<RawRow>, AppError> {
    let cursor = Cursor::new(payload.to_vec());
    let mut workbook = open_workbook_auto_from_rs(cursor)
        .map_err(|_| AppError::UnsupportedFormat(file_name.to_string()))?;

    let sheet_names = workbook.sheet_names();
    let first_sheet = sheet_names
        .first()
        .ok_or_else(|| AppError::DecodeError("planilha sem abas".to_string()))?
        .clone();

    let range = workbook
        .worksheet_range(&first_sheet)
        .map_err(|e| AppError::DecodeError(e.to_string()))?;

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Ok(Vec::new());
    };

    let headers: Vec<String> = header_row
        .iter()
        .map(|cell| cell.to_string().trim().to_string())
        .collect();

    let mut records = Vec::new();
    for data_row in rows {
        let mut row_map = RawRow::new();
        for (col_idx, cell) in data_row.iter().enumerate() {
            if let Some(header) = headers.get(col_idx) {
                row_map.insert(header.clone(), cell.to_string().trim().to_string());
            }
        }

        // Pula linhas completamente em branco.
        if row_map.values().all(|v| v.is_empty()) {
            continue;
        }
        records.push(row_map);
    }

    Ok(records)
}

// ---
// CSV - o crate `csv` já resolve campos entre aspas com vírgula embutida.
// ---
fn decode_csv(payload: &[u8]) -> Result<Vec<RawRow>, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true) // permite linhas com contagem de campos diferente
        .from_reader(payload);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| AppError::DecodeError(e.to_string()))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| AppError::DecodeError(e.to_string()))?;

        let mut row_map = RawRow::new();
        for (col_idx, value) in record.iter().enumerate() {
            if let Some(header) = headers.get(col_idx) {
                row_map.insert(header.clone(), value.trim().to_string());
            }
        }

        if row_map.values().all(|v| v.is_empty()) {
            continue;
        }
        records.push(row_map);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_simples() {
        let csv = "SKU,Name,Price\nABC-1,Widget,10.50\nABC-2,Gadget,3\n";
        let rows = decode_upload("produtos.csv", Some("text/csv"), csv.as_bytes()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("SKU"), Some(&"ABC-1".to_string()));
        assert_eq!(rows[1].get("Price"), Some(&"3".to_string()));
    }

    #[test]
    fn csv_com_virgula_entre_aspas() {
        let csv = "SKU,Name\nABC-1,\"Parafuso, caixa com 100\"\n";
        let rows = decode_upload("produtos.csv", None, csv.as_bytes()).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0].get("Name"),
            Some(&"Parafuso, caixa com 100".to_string())
        );
    }

    #[test]
    fn csv_pula_linhas_em_branco() {
        let csv = "SKU,Name\nABC-1,Widget\n,\n\nABC-2,Gadget\n";
        let rows = decode_upload("produtos.csv", None, csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn csv_sem_linhas_de_dados_retorna_vazio() {
        let rows = decode_upload("produtos.csv", None, b"SKU,Name\n").unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn seleciona_planilha_por_extensao_ou_mime() {
        assert!(is_spreadsheet("produtos.xlsx", None));
        assert!(is_spreadsheet("PRODUTOS.XLS", None));
        assert!(is_spreadsheet(
            "upload.bin",
            Some("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet")
        ));
        assert!(!is_spreadsheet("produtos.csv", Some("text/csv")));
        assert!(!is_spreadsheet("produtos", None));
    }

    #[test]
    fn planilha_corrompida_e_formato_nao_suportado() {
        let result = decode_upload("produtos.xlsx", None, b"isto nao e um xlsx");
        assert!(matches!(result, Err(AppError::UnsupportedFormat(_))));
    }
}
