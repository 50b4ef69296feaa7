pub mod barcode;
pub mod error;
pub mod file_parser;
