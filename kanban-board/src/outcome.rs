//! Wrapping command results into [`ExecutionResult`]s
//!
//! Every command times itself and reports through one of these. Mutations
//! use [`logged`], so both success and failure carry an audit entry; reads
//! use [`unlogged`].

use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use kanban_operations::{ExecutionResult, LogEntry, Operation};
use serde::Serialize;
use serde_json::{json, Value};
use std::time::Instant;

/// Result of a mutating command, with an activity entry either way
pub(crate) fn logged<O>(
    op: &O,
    ctx: &KanbanContext,
    start: Instant,
    result: Result<Value>,
) -> ExecutionResult<Value, KanbanError>
where
    O: Operation + Serialize,
{
    let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
    let input = serde_json::to_value(op).unwrap_or(Value::Null);
    let actor = ctx.current_user().map(|user| user.to_string());

    match result {
        Ok(value) => ExecutionResult::Logged {
            value: value.clone(),
            log_entry: LogEntry::new(op.op_string(), input, value, actor, duration_ms),
        },
        Err(error) => {
            let error_msg = error.to_string();
            ExecutionResult::Failed {
                error,
                log_entry: Some(LogEntry::new(
                    op.op_string(),
                    input,
                    json!({"error": error_msg}),
                    actor,
                    duration_ms,
                )),
            }
        }
    }
}

/// Result of a read-only command
pub(crate) fn unlogged(result: Result<Value>) -> ExecutionResult<Value, KanbanError> {
    match result {
        Ok(value) => ExecutionResult::Unlogged { value },
        Err(error) => ExecutionResult::Failed {
            error,
            log_entry: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UserId;

    #[derive(Serialize)]
    struct Sample {
        name: String,
    }

    kanban_operations::operation!(Sample, verb = "sample", noun = "column", description = "Test");

    #[test]
    fn test_logged_success_and_failure() {
        let ctx = KanbanContext::new("unused.db").as_user(UserId(7));
        let sample = Sample { name: "A".into() };

        let ok = logged(&sample, &ctx, Instant::now(), Ok(json!({"id": 1})));
        let (value, entry) = ok.split();
        assert_eq!(value.unwrap()["id"], 1);
        let entry = entry.unwrap();
        assert_eq!(entry.op, "sample column");
        assert_eq!(entry.input["name"], "A");
        assert_eq!(entry.actor.as_deref(), Some("7"));

        let failed = logged(
            &sample,
            &ctx,
            Instant::now(),
            Err(KanbanError::validation("name", "blank")),
        );
        assert!(failed.should_log());
        let (value, entry) = failed.split();
        assert!(value.is_err());
        assert!(entry.unwrap().output["error"].as_str().unwrap().contains("blank"));
    }

    #[test]
    fn test_logged_duration_in_milliseconds() {
        let ctx = KanbanContext::new("unused.db");
        let sample = Sample { name: "A".into() };
        let start = Instant::now()
            .checked_sub(std::time::Duration::from_millis(1500))
            .unwrap();

        let (_, entry) = logged(&sample, &ctx, start, Ok(json!({}))).split();
        let duration = entry.unwrap().duration_ms;
        assert!((1500..60_000).contains(&duration));
    }

    #[test]
    fn test_unlogged_failure_has_no_entry() {
        let result = unlogged(Err(KanbanError::not_found("task", 1)));
        assert!(!result.should_log());
    }
}
