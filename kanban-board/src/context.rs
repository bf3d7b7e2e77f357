//! KanbanContext - transactional access to the SQLite store
//!
//! The context provides access to storage and the authorization gate. No
//! business logic lives here: commands do all the work inside the
//! transactions the context hands them.
//!
//! Every call to [`KanbanContext::write`] opens its own connection and runs
//! the closure inside `BEGIN IMMEDIATE`. SQLite's reserved lock then
//! serializes writers across threads and across processes sharing the same
//! database file; nothing in this process holds a lock of its own. A writer
//! that cannot get the lock within the busy timeout fails with
//! [`KanbanError::TransactionFailed`].

use crate::auth::{AuthorizationGate, MembershipGate};
use crate::config::KanbanConfig;
use crate::error::{KanbanError, Result};
use crate::schema;
use crate::types::UserId;
use kanban_operations::LogEntry;
use rusqlite::{params, Connection, Transaction, TransactionBehavior};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

/// Context passed to every command - provides access, not logic
#[derive(Clone)]
pub struct KanbanContext {
    inner: Arc<Inner>,
    /// The authenticated caller, if any
    user: Option<UserId>,
}

struct Inner {
    config: KanbanConfig,
    gate: Arc<dyn AuthorizationGate>,
}

impl std::fmt::Debug for KanbanContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KanbanContext")
            .field("database", &self.inner.config.database)
            .field("user", &self.user)
            .finish()
    }
}

impl KanbanContext {
    /// Create a context for the given database file with default settings.
    ///
    /// Does not touch the file; call [`KanbanContext::init`] (or use
    /// [`KanbanContext::open`]) before executing commands.
    pub fn new(database: impl AsRef<Path>) -> Self {
        Self::from_config(KanbanConfig::for_database(database.as_ref()))
    }

    /// Create a context from loaded configuration
    pub fn from_config(config: KanbanConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                config,
                gate: Arc::new(MembershipGate),
            }),
            user: None,
        }
    }

    /// Create a context and make sure the schema exists
    pub async fn open(config: KanbanConfig) -> Result<Self> {
        let ctx = Self::from_config(config);
        ctx.init().await?;
        Ok(ctx)
    }

    /// Replace the authorization gate
    pub fn with_gate(self, gate: Arc<dyn AuthorizationGate>) -> Self {
        Self {
            inner: Arc::new(Inner {
                config: self.inner.config.clone(),
                gate,
            }),
            user: self.user,
        }
    }

    /// A cheap copy of this context acting as `user`
    pub fn as_user(&self, user: UserId) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            user: Some(user),
        }
    }

    /// The authenticated caller
    pub fn user(&self) -> Result<UserId> {
        self.user.ok_or(KanbanError::Unauthenticated)
    }

    /// The caller, if one is set
    pub fn current_user(&self) -> Option<UserId> {
        self.user
    }

    /// Loaded configuration
    pub fn config(&self) -> &KanbanConfig {
        &self.inner.config
    }

    /// Path of the database file
    pub fn database_path(&self) -> &Path {
        &self.inner.config.database
    }

    /// The gate used for permission checks
    pub fn gate(&self) -> Arc<dyn AuthorizationGate> {
        Arc::clone(&self.inner.gate)
    }

    // =========================================================================
    // Connections
    // =========================================================================

    /// Open a fresh connection with the per-connection pragmas applied
    pub fn open_connection(&self) -> Result<Connection> {
        let conn = Connection::open(&self.inner.config.database)?;
        conn.busy_timeout(self.inner.config.busy_timeout())?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(conn)
    }

    /// Create the database file, switch the journal mode and create the schema.
    ///
    /// Idempotent - safe to call multiple times.
    pub async fn init(&self) -> Result<()> {
        let ctx = self.clone();
        tokio::task::spawn_blocking(move || -> Result<()> {
            if let Some(parent) = ctx.database_path().parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        KanbanError::validation("database", format!("{}: {e}", parent.display()))
                    })?;
                }
            }
            let conn = ctx.open_connection()?;
            let mode: String = conn.pragma_update_and_check(
                None,
                "journal_mode",
                &ctx.inner.config.journal_mode,
                |row| row.get(0),
            )?;
            schema::create_schema(&conn)?;
            debug!(database = %ctx.database_path().display(), journal_mode = %mode, "store initialized");
            Ok(())
        })
        .await?
    }

    // =========================================================================
    // Transactions
    // =========================================================================

    /// Run `f` in an immediate (write-locking) transaction.
    ///
    /// Commits when `f` returns `Ok`; any `Err` drops the transaction, which
    /// rolls every write back.
    pub async fn write<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Transaction<'_>) -> Result<T> + Send + 'static,
    {
        self.transact(TransactionBehavior::Immediate, f).await
    }

    /// Run `f` in a deferred transaction: a consistent snapshot for reads
    pub async fn read<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Transaction<'_>) -> Result<T> + Send + 'static,
    {
        self.transact(TransactionBehavior::Deferred, f).await
    }

    async fn transact<T, F>(&self, behavior: TransactionBehavior, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Transaction<'_>) -> Result<T> + Send + 'static,
    {
        let ctx = self.clone();
        let result = tokio::task::spawn_blocking(move || -> Result<T> {
            let mut conn = ctx.open_connection()?;
            let tx = conn.transaction_with_behavior(behavior)?;
            let value = f(&tx)?;
            tx.commit()?;
            Ok(value)
        })
        .await?;

        if let Err(ref error) = result {
            if error.is_retryable() {
                warn!(%error, "transaction rejected, caller should retry");
            }
        }
        result
    }

    // =========================================================================
    // Activity log
    // =========================================================================

    /// Append an operation log entry to the activity table
    pub async fn append_activity(&self, entry: LogEntry) -> Result<()> {
        self.write(move |tx| {
            tx.execute(
                "INSERT INTO activity (id, timestamp, op, actor, input, output, duration_ms)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    entry.id,
                    entry.timestamp,
                    entry.op,
                    entry.actor,
                    serde_json::to_string(&entry.input)?,
                    serde_json::to_string(&entry.output)?,
                    i64::try_from(entry.duration_ms).unwrap_or(i64::MAX),
                ],
            )?;
            Ok(())
        })
        .await
    }

    /// Read activity entries, newest first
    pub async fn read_activity(&self, limit: Option<usize>) -> Result<Vec<LogEntry>> {
        let limit = limit.map(|l| l as i64).unwrap_or(-1);
        self.read(move |tx| {
            let mut stmt = tx.prepare(
                "SELECT id, timestamp, op, actor, input, output, duration_ms
                 FROM activity ORDER BY timestamp DESC, id DESC LIMIT ?1",
            )?;
            let rows = stmt.query_map([limit], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, Option<String>>(3)?,
                    row.get::<_, String>(4)?,
                    row.get::<_, String>(5)?,
                    row.get::<_, i64>(6)?,
                ))
            })?;

            let mut entries = Vec::new();
            for row in rows {
                let (id, timestamp, op, actor, input, output, duration_ms) = row?;
                entries.push(LogEntry {
                    id,
                    timestamp,
                    op,
                    actor,
                    input: serde_json::from_str(&input)?,
                    output: serde_json::from_str(&output)?,
                    duration_ms: u64::try_from(duration_ms).unwrap_or_default(),
                });
            }
            Ok(entries)
        })
        .await
    }
}
