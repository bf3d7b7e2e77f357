//! Execution result types for operations

use crate::LogEntry;

/// Result of executing an operation
///
/// Mutations come back `Logged` so the processor can append them to the
/// activity trail; reads come back `Unlogged`. A failure may still carry an
/// entry so rejected mutations are auditable too.
pub enum ExecutionResult<T, E> {
    /// Operation succeeded and should be logged
    Logged { value: T, log_entry: LogEntry },
    /// Operation succeeded but no logging needed (read-only)
    Unlogged { value: T },
    /// Operation failed
    Failed {
        error: E,
        log_entry: Option<LogEntry>,
    },
}

impl<T, E> ExecutionResult<T, E> {
    /// Extract the result (Ok or Err)
    pub fn into_result(self) -> Result<T, E> {
        match self {
            Self::Logged { value, .. } => Ok(value),
            Self::Unlogged { value } => Ok(value),
            Self::Failed { error, .. } => Err(error),
        }
    }

    /// Get the value and log entry separately
    pub fn split(self) -> (Result<T, E>, Option<LogEntry>) {
        match self {
            Self::Logged { value, log_entry } => (Ok(value), Some(log_entry)),
            Self::Unlogged { value } => (Ok(value), None),
            Self::Failed { error, log_entry } => (Err(error), log_entry),
        }
    }

    /// Check if this should be logged
    pub fn should_log(&self) -> bool {
        matches!(
            self,
            Self::Logged { .. }
                | Self::Failed {
                    log_entry: Some(_),
                    ..
                }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry() -> LogEntry {
        LogEntry::new("move task", json!({"id": 1}), json!({"ok": true}), None, 3)
    }

    #[test]
    fn test_logged_splits_into_value_and_entry() {
        let result: ExecutionResult<i32, String> = ExecutionResult::Logged {
            value: 7,
            log_entry: entry(),
        };
        assert!(result.should_log());
        let (value, log) = result.split();
        assert_eq!(value.unwrap(), 7);
        assert_eq!(log.unwrap().op, "move task");
    }

    #[test]
    fn test_unlogged_is_not_logged() {
        let result: ExecutionResult<i32, String> = ExecutionResult::Unlogged { value: 1 };
        assert!(!result.should_log());
        assert_eq!(result.into_result().unwrap(), 1);
    }

    #[test]
    fn test_failed_without_entry() {
        let result: ExecutionResult<i32, String> = ExecutionResult::Failed {
            error: "boom".into(),
            log_entry: None,
        };
        assert!(!result.should_log());
        assert_eq!(result.into_result().unwrap_err(), "boom");
    }
}
