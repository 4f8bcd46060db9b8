//! expense-cli - terminal expense tracker
//!
//! This library provides the core functionality for the `expense` binary:
//! recording expenses, per-category budgets with utilization and alerts,
//! spending reports, JSON import/export, and a client for the AI backend
//! that suggests categories and produces predictions and insights.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (expenses, budgets, categories, money)
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer
//! - `reports`: Aggregation over expenses and budgets
//! - `audit`: Audit logging system
//! - `export`: Full-store JSON export
//! - `ai`: AI backend client
//! - `display` and `cli`: terminal front end
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_cli::config::{ExpensePaths, Settings};
//! use expense_cli::storage::Storage;
//!
//! let paths = ExpensePaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::open(paths)?;
//! ```

pub mod ai;
pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{ExpenseError, ExpenseResult};
