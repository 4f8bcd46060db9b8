//! Export module for expense-cli
//!
//! Full-store JSON export, the counterpart of `services::import`.

pub mod json;

pub use json::{default_export_filename, export_to_file, DataExport};
