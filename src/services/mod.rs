//! Service layer for expense-cli
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, persistence and audit logging.

pub mod budget;
pub mod expense;
pub mod import;

pub use budget::{BudgetService, CreateBudgetInput};
pub use expense::{CreateExpenseInput, ExpenseService};
pub use import::{ImportResult, ImportService, ImportSummary};
