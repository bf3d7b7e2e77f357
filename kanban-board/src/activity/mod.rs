//! Activity commands: reading the audit trail

mod list;

pub use list::ListActivity;
