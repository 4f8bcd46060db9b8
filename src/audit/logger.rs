//! Append-only change log backing the `history` command
//!
//! One JSON object per line. A batch of entries is serialized up front and
//! written with a single `write_all`, so an import never leaves half of its
//! entries behind when serialization fails.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use crate::error::{ExpenseError, ExpenseResult};

use super::entry::AuditEntry;

/// The on-disk audit log (`audit.log`)
pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Append a single change
    pub fn record(&self, entry: &AuditEntry) -> ExpenseResult<()> {
        self.append(std::slice::from_ref(entry))
    }

    /// Append `entries` in order with one write
    pub fn append(&self, entries: &[AuditEntry]) -> ExpenseResult<()> {
        if entries.is_empty() {
            return Ok(());
        }

        let mut buffer = String::new();
        for entry in entries {
            let line = serde_json::to_string(entry).map_err(|e| {
                ExpenseError::Json(format!("Failed to serialize audit entry: {}", e))
            })?;
            buffer.push_str(&line);
            buffer.push('\n');
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| ExpenseError::Io(format!("Failed to open audit log: {}", e)))?;
        file.write_all(buffer.as_bytes())
            .and_then(|_| file.flush())
            .map_err(|e| ExpenseError::Io(format!("Failed to write audit log: {}", e)))?;

        tracing::debug!(count = entries.len(), "audit entries appended");
        Ok(())
    }

    /// Every entry, oldest first
    ///
    /// A final line that does not parse is treated as an interrupted write
    /// and dropped; a bad line anywhere else is an error.
    pub fn entries(&self) -> ExpenseResult<Vec<AuditEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let contents = std::fs::read_to_string(&self.path)
            .map_err(|e| ExpenseError::Io(format!("Failed to read audit log: {}", e)))?;

        let lines: Vec<(usize, &str)> = contents
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .collect();
        let last = lines.len().saturating_sub(1);

        let mut entries = Vec::with_capacity(lines.len());
        for (position, (line_num, line)) in lines.into_iter().enumerate() {
            match serde_json::from_str::<AuditEntry>(line) {
                Ok(entry) => entries.push(entry),
                Err(e) if position == last => {
                    tracing::warn!(line = line_num + 1, error = %e, "ignoring truncated audit entry");
                }
                Err(e) => {
                    return Err(ExpenseError::Json(format!(
                        "Failed to parse audit entry at line {}: {}",
                        line_num + 1,
                        e
                    )))
                }
            }
        }

        Ok(entries)
    }

    /// The last `count` entries, oldest first
    pub fn recent(&self, count: usize) -> ExpenseResult<Vec<AuditEntry>> {
        let mut entries = self.entries()?;
        let start = entries.len().saturating_sub(count);
        Ok(entries.split_off(start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::entry::{EntityType, Operation};
    use serde_json::json;
    use tempfile::TempDir;

    fn create_test_log() -> (AuditLog, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let log = AuditLog::new(temp_dir.path().join("audit.log"));
        (log, temp_dir)
    }

    fn expense_created(i: usize) -> AuditEntry {
        AuditEntry::create(
            EntityType::Expense,
            format!("exp-{}", i),
            Some(format!("Expense {}", i)),
            &json!({ "index": i }),
        )
    }

    #[test]
    fn test_append_keeps_order() {
        let (log, _temp) = create_test_log();
        log.record(&expense_created(0)).unwrap();
        log.append(&(1..4).map(expense_created).collect::<Vec<_>>())
            .unwrap();
        log.append(&[]).unwrap();

        let ids: Vec<String> = log.entries().unwrap().into_iter().map(|e| e.entity_id).collect();
        assert_eq!(ids, vec!["exp-0", "exp-1", "exp-2", "exp-3"]);
        assert_eq!(log.entries().unwrap()[0].operation, Operation::Create);
    }

    #[test]
    fn test_recent() {
        let (log, _temp) = create_test_log();
        assert!(log.recent(5).unwrap().is_empty());

        log.append(&(0..10).map(expense_created).collect::<Vec<_>>())
            .unwrap();

        let recent = log.recent(3).unwrap();
        let ids: Vec<&str> = recent.iter().map(|e| e.entity_id.as_str()).collect();
        assert_eq!(ids, vec!["exp-7", "exp-8", "exp-9"]);
        assert_eq!(log.recent(50).unwrap().len(), 10);
    }

    #[test]
    fn test_truncated_tail_is_dropped() {
        let (log, temp) = create_test_log();
        log.append(&[expense_created(0), expense_created(1)]).unwrap();

        let mut file = OpenOptions::new()
            .append(true)
            .open(temp.path().join("audit.log"))
            .unwrap();
        write!(file, "{{\"timestamp\": \"2024-").unwrap();

        assert_eq!(log.entries().unwrap().len(), 2);
    }

    #[test]
    fn test_corrupt_interior_line_is_an_error() {
        let (log, temp) = create_test_log();
        std::fs::write(temp.path().join("audit.log"), "garbage\n").unwrap();
        log.record(&expense_created(0)).unwrap();

        let err = log.entries().unwrap_err();
        assert!(err.to_string().contains("line 1"), "{}", err);
    }
}
