pub mod document;
pub mod sheet;
pub mod spreadsheet;

pub use document::write_document;
pub use sheet::{RegistrationSheet, SheetRow, SheetSummary};
pub use spreadsheet::write_spreadsheet;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("spreadsheet generation failed: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),
    #[error("document generation failed: {0}")]
    Document(#[from] tera::Error),
}
