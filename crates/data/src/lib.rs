//! Ingestion and export for the institutional signal pipeline.
//!
//! This crate provides:
//! - CSV reading into raw bars, with header validation
//! - CSV and JSON export of processed signal rows

pub mod csv_storage;
pub mod error;
pub mod export;

pub use csv_storage::{CsvStorage, EXPORT_COLUMNS};
pub use error::{IngestError, REQUIRED_COLUMNS};
pub use export::{export_signals, ExportFormat, JsonStorage};
