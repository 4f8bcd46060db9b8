//! Audit logging for expense-cli
//!
//! Every create, delete and import is appended to `audit.log` as one JSON
//! line, giving a local history of changes to the store. The `history`
//! command reads it back.

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLog;
