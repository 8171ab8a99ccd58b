//! Append-only activity log. `append` is the only statement in the codebase
//! that writes this table; nothing updates or deletes rows.

use crate::errors::{AppError, AppResult};
use crate::models::activity::{ActivityAction, ActivityEntry, SubjectType};
use crate::utils::time::to_store;
use chrono::Utc;
use rusqlite::{Connection, Result, Row, params};

fn conversion_err(e: Box<dyn std::error::Error + Send + Sync>) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, e)
}

pub fn map_row(row: &Row) -> Result<ActivityEntry> {
    let subject_str: String = row.get("subject_type")?;
    let subject_type = SubjectType::from_db_str(&subject_str)
        .ok_or_else(|| conversion_err(Box::new(AppError::InvalidSubjectType(subject_str))))?;

    let meta_str: String = row.get("meta")?;
    let meta = serde_json::from_str(&meta_str).map_err(|e| conversion_err(Box::new(e)))?;

    Ok(ActivityEntry {
        id: row.get("id")?,
        subject_type,
        subject_id: row.get("subject_id")?,
        action: row.get("action")?,
        actor_id: row.get("actor_id")?,
        meta,
        created_at: row.get("created_at")?,
    })
}

/// Append one audit row. Must be called inside the same transaction as the
/// state write it records, so both commit or neither.
pub fn append(
    conn: &Connection,
    subject_type: SubjectType,
    subject_id: i64,
    action: &ActivityAction,
    actor_id: Option<i64>,
) -> AppResult<()> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO activity_log (subject_type, subject_id, action, actor_id, meta, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )?;
    stmt.execute(params![
        subject_type.to_db_str(),
        subject_id,
        action.tag(),
        actor_id,
        action.meta().to_string(),
        to_store(Utc::now()),
    ])?;
    Ok(())
}

/// Newest-first page of the feed for one subject. Ties on created_at are
/// broken by insertion id so the order is stable.
pub fn list(
    conn: &Connection,
    subject_type: SubjectType,
    subject_id: i64,
    limit: i64,
    offset: i64,
) -> AppResult<Vec<ActivityEntry>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM activity_log
         WHERE subject_type = ?1 AND subject_id = ?2
         ORDER BY created_at DESC, id DESC
         LIMIT ?3 OFFSET ?4",
    )?;
    let rows = stmt.query_map(
        params![subject_type.to_db_str(), subject_id, limit, offset],
        map_row,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn count_for_subject(
    conn: &Connection,
    subject_type: SubjectType,
    subject_id: i64,
) -> AppResult<i64> {
    let mut stmt = conn.prepare(
        "SELECT COUNT(*) FROM activity_log WHERE subject_type = ?1 AND subject_id = ?2",
    )?;
    Ok(stmt.query_row(params![subject_type.to_db_str(), subject_id], |row| {
        row.get(0)
    })?)
}
