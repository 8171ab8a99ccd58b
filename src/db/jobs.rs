use crate::errors::{AppError, AppResult};
use crate::models::job::{Job, JobStatus};
use crate::utils::time::to_store;
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub fn map_row(row: &Row) -> Result<Job> {
    let status_str: String = row.get("status")?;
    let status = JobStatus::from_db_str(&status_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidStatus(status_str)),
        )
    })?;

    Ok(Job {
        id: row.get("id")?,
        name: row.get("name")?,
        status,
        created_at: row.get("created_at")?,
    })
}

pub fn insert_job(conn: &Connection, name: &str) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO jobs (name, status, created_at) VALUES (?1, 'scheduled', ?2)",
        params![name, to_store(Utc::now())],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn load_job(conn: &Connection, id: i64) -> AppResult<Job> {
    let mut stmt = conn.prepare("SELECT * FROM jobs WHERE id = ?1")?;
    stmt.query_row([id], map_row)
        .optional()?
        .ok_or_else(|| AppError::NotFound(format!("job {}", id)))
}

pub fn list_jobs(conn: &Connection) -> AppResult<Vec<Job>> {
    let mut stmt = conn.prepare("SELECT * FROM jobs ORDER BY id ASC")?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Guarded archive: the status precondition keeps two concurrent archive
/// calls from both claiming the transition.
pub fn mark_archived(conn: &Connection, id: i64, expected: JobStatus) -> AppResult<usize> {
    let n = conn.execute(
        "UPDATE jobs SET status = 'archived' WHERE id = ?1 AND status = ?2",
        params![id, expected.to_db_str()],
    )?;
    Ok(n)
}
