//! The `Operation` and `Execute` traits

use crate::ExecutionResult;
use async_trait::async_trait;
use serde_json::Value;

/// Metadata every command carries: what it does, to what
pub trait Operation {
    /// The verb, e.g. "move"
    fn verb(&self) -> &'static str;

    /// The noun, e.g. "task"
    fn noun(&self) -> &'static str;

    /// One-line human description
    fn description(&self) -> &'static str;

    /// Canonical op string used in the audit log ("move task")
    fn op_string(&self) -> String {
        format!("{} {}", self.verb(), self.noun())
    }
}

/// Run a command against a context `C`, failing with `E`
#[async_trait]
pub trait Execute<C, E>: Operation + Send + Sync
where
    C: Send + Sync,
    E: Send,
{
    /// Execute the command
    async fn execute(&self, ctx: &C) -> ExecutionResult<Value, E>;

    /// Ids of the resources touched by this command, used to scope logs
    fn affected_resource_ids(&self, _result: &Value) -> Vec<String> {
        Vec::new()
    }
}

/// Implement [`Operation`] for a command struct.
///
/// ```ignore
/// operation!(MoveTask, verb = "move", noun = "task",
///     description = "Move a task to a column at an index");
/// ```
#[macro_export]
macro_rules! operation {
    ($ty:ty, verb = $verb:literal, noun = $noun:literal, description = $desc:literal $(,)?) => {
        impl $crate::Operation for $ty {
            fn verb(&self) -> &'static str {
                $verb
            }

            fn noun(&self) -> &'static str {
                $noun
            }

            fn description(&self) -> &'static str {
                $desc
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Sample;

    operation!(Sample, verb = "sample", noun = "board", description = "Test operation");

    #[async_trait]
    impl Execute<(), String> for Sample {
        async fn execute(&self, _ctx: &()) -> ExecutionResult<Value, String> {
            ExecutionResult::Unlogged {
                value: serde_json::json!({"ok": true}),
            }
        }
    }

    #[test]
    fn test_op_string() {
        assert_eq!(Sample.op_string(), "sample board");
        assert_eq!(Sample.description(), "Test operation");
    }

    #[tokio::test]
    async fn test_execute_default_affected_ids() {
        let value = Sample.execute(&()).await.into_result().unwrap();
        assert_eq!(value["ok"], true);
        assert!(Sample.affected_resource_ids(&value).is_empty());
    }
}
