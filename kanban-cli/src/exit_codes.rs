//! Process exit codes

use kanban_board::{ErrorCategory, KanbanError};

pub const EXIT_SUCCESS: i32 = 0;
/// The command failed; retrying the same request will fail again
pub const EXIT_ERROR: i32 = 1;
/// Stale order or busy store: refetch and retry
pub const EXIT_RETRY: i32 = 2;

pub fn exit_code_for(error: &KanbanError) -> i32 {
    match error.category() {
        ErrorCategory::Retry => EXIT_RETRY,
        _ => EXIT_ERROR,
    }
}
