//! Durable store contract and SQLite implementation for project persistence.
//!
//! # Responsibility
//! - Define the storage operations the repository layer is allowed to use.
//! - Keep SQL details inside this persistence boundary.
//!
//! # Invariants
//! - Project rows are never physically deleted; the `active` flag is the
//!   source of truth for soft-delete state.
//! - Read paths must reject invalid persisted state instead of masking it.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::project::ProjectId;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const PROJECT_SELECT_SQL: &str = "SELECT id, name, active FROM projects";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for project persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted project data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; run migrations first"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Read model for one persisted project row, active or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRow {
    /// Durable identifier assigned on first insert.
    pub id: ProjectId,
    /// Stored project name, exact case.
    pub name: String,
    /// Soft-delete flag; `false` rows stay queryable for history.
    pub active: bool,
}

/// Storage contract the repository depends on.
///
/// Any relational or embedded engine satisfying these operations is
/// substitutable for the bundled SQLite implementation.
pub trait ProjectStore {
    /// Inserts a new active project row and returns it with its assigned id.
    fn insert_project(&self, name: &str) -> RepoResult<ProjectRow>;
    /// Returns rows with the active flag set, in stored order.
    fn select_active_projects(&self) -> RepoResult<Vec<ProjectRow>>;
    /// Returns every project row regardless of active flag, in stored order.
    fn select_all_projects(&self) -> RepoResult<Vec<ProjectRow>>;
    /// Returns the row with the exact stored name, if any.
    fn select_project_by_name(&self, name: &str) -> RepoResult<Option<ProjectRow>>;
    /// Flips the active flag on rows with the exact stored name.
    /// Returns the number of rows changed.
    fn update_active_flag_by_name(&self, name: &str, active: bool) -> RepoResult<usize>;
    /// Appends one elapsed-time record for a project on a given date.
    fn insert_time_entry(&self, project_id: ProjectId, date: &str, seconds: i64) -> RepoResult<()>;
    /// Sums recorded seconds for a project over dates starting with `prefix`.
    /// The empty prefix matches all recorded history.
    fn sum_time_by_project_and_date_prefix(
        &self,
        project_id: ProjectId,
        prefix: &str,
    ) -> RepoResult<i64>;
}

/// SQLite-backed project store owning a migrated connection.
pub struct SqliteProjectStore {
    conn: Connection,
}

impl SqliteProjectStore {
    /// Constructs a store from a migrated/ready connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when `PRAGMA user_version` does not match
    ///   the latest migration this binary knows.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the schema was
    ///   tampered with after migration.
    pub fn try_new(conn: Connection) -> RepoResult<Self> {
        ensure_store_connection_ready(&conn)?;
        Ok(Self { conn })
    }
}

impl ProjectStore for SqliteProjectStore {
    fn insert_project(&self, name: &str) -> RepoResult<ProjectRow> {
        self.conn.execute(
            "INSERT INTO projects (name, active) VALUES (?1, 1);",
            [name],
        )?;

        self.select_project_by_name(name)?.ok_or_else(|| {
            RepoError::InvalidData(format!("inserted project `{name}` not found on re-select"))
        })
    }

    fn select_active_projects(&self) -> RepoResult<Vec<ProjectRow>> {
        self.select_rows(&format!("{PROJECT_SELECT_SQL} WHERE active = 1;"))
    }

    fn select_all_projects(&self) -> RepoResult<Vec<ProjectRow>> {
        self.select_rows(&format!("{PROJECT_SELECT_SQL};"))
    }

    fn select_project_by_name(&self, name: &str) -> RepoResult<Option<ProjectRow>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROJECT_SELECT_SQL} WHERE name = ?1;"))?;

        let mut rows = stmt.query([name])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_project_row(row)?));
        }

        Ok(None)
    }

    fn update_active_flag_by_name(&self, name: &str, active: bool) -> RepoResult<usize> {
        let changed = self.conn.execute(
            "UPDATE projects SET active = ?2 WHERE name = ?1;",
            params![name, bool_to_int(active)],
        )?;
        Ok(changed)
    }

    fn insert_time_entry(&self, project_id: ProjectId, date: &str, seconds: i64) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO project_data (project_id, date, time) VALUES (?1, ?2, ?3);",
            params![project_id, date, seconds],
        )?;
        Ok(())
    }

    fn sum_time_by_project_and_date_prefix(
        &self,
        project_id: ProjectId,
        prefix: &str,
    ) -> RepoResult<i64> {
        // substr comparison gives exact prefix semantics with no LIKE
        // wildcard escaping; the empty prefix matches every row.
        let total: Option<i64> = self.conn.query_row(
            "SELECT SUM(time)
             FROM project_data
             WHERE project_id = ?1
               AND substr(date, 1, length(?2)) = ?2;",
            params![project_id, prefix],
            |row| row.get(0),
        )?;
        Ok(total.unwrap_or(0))
    }
}

impl SqliteProjectStore {
    fn select_rows(&self, sql: &str) -> RepoResult<Vec<ProjectRow>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query([])?;
        let mut projects = Vec::new();

        while let Some(row) = rows.next()? {
            projects.push(parse_project_row(row)?);
        }

        Ok(projects)
    }
}

fn parse_project_row(row: &Row<'_>) -> RepoResult<ProjectRow> {
    let active = match row.get::<_, i64>("active")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid active value `{other}` in projects.active"
            )));
        }
    };

    Ok(ProjectRow {
        id: row.get("id")?,
        name: row.get("name")?,
        active,
    })
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

fn ensure_store_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for table in ["projects", "project_data"] {
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(table));
        }
    }

    for column in ["id", "name", "active"] {
        if !table_has_column(conn, "projects", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "projects",
                column,
            });
        }
    }

    for column in ["id", "project_id", "date", "time"] {
        if !table_has_column(conn, "project_data", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "project_data",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &'static str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(
    conn: &Connection,
    table: &'static str,
    column: &'static str,
) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
