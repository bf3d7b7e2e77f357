//! Processor abstraction: run a command and do something with its log entry

use crate::Execute;
use async_trait::async_trait;
use serde_json::Value;

/// Executes operations and handles their audit entries.
///
/// Implementations decide where [`crate::LogEntry`] values go (a table, a
/// file, nowhere) and which actor is stamped on them.
#[async_trait]
pub trait OperationProcessor<C, E>: Send + Sync
where
    C: Send + Sync,
    E: Send,
{
    /// Execute `operation` and persist its log entry if it produced one
    async fn process<O>(&self, operation: &O, ctx: &C) -> Result<Value, E>
    where
        O: Execute<C, E> + 'static;
}
