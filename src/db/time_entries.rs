use crate::errors::{AppError, AppResult};
use crate::models::geo::GeoPoint;
use crate::models::time_entry::{TimeEntry, TimeEntryStatus};
use crate::utils::time::{from_store, to_store};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

fn geo_from_row(row: &Row, lat: &str, lng: &str, accuracy: &str) -> Result<Option<GeoPoint>> {
    let lat: Option<f64> = row.get(lat)?;
    let lng: Option<f64> = row.get(lng)?;
    match (lat, lng) {
        (Some(lat), Some(lng)) => Ok(Some(GeoPoint {
            lat,
            lng,
            accuracy: row.get(accuracy)?,
        })),
        _ => Ok(None),
    }
}

fn timestamp_from_row(row: &Row, col: &str) -> Result<Option<DateTime<Utc>>> {
    let raw: Option<String> = row.get(col)?;
    match raw {
        Some(s) => from_store(&s)
            .map(Some)
            .map_err(|e| conversion_err(Box::new(e))),
        None => Ok(None),
    }
}

fn conversion_err(e: Box<dyn std::error::Error + Send + Sync>) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, e)
}

pub fn map_row(row: &Row) -> Result<TimeEntry> {
    let status_str: String = row.get("status")?;
    let status = TimeEntryStatus::from_db_str(&status_str)
        .ok_or_else(|| conversion_err(Box::new(AppError::InvalidStatus(status_str.clone()))))?;

    let clock_in_str: String = row.get("clock_in")?;
    let clock_in = from_store(&clock_in_str).map_err(|e| conversion_err(Box::new(e)))?;

    Ok(TimeEntry {
        id: row.get("id")?,
        job_id: row.get("job_id")?,
        user_id: row.get("user_id")?,
        status,
        clock_in,
        clock_out: timestamp_from_row(row, "clock_out")?,
        clock_in_location: geo_from_row(row, "clock_in_lat", "clock_in_lng", "clock_in_accuracy")?,
        clock_out_location: geo_from_row(
            row,
            "clock_out_lat",
            "clock_out_lng",
            "clock_out_accuracy",
        )?,
        notes: row.get("notes")?,
        submitted_by: row.get("submitted_by")?,
        submitted_at: timestamp_from_row(row, "submitted_at")?,
        approver_id: row.get("approver_id")?,
        approved_at: timestamp_from_row(row, "approved_at")?,
        rejection_reason: row.get("rejection_reason")?,
        duration_minutes: row.get("duration_minutes")?,
        created_at: row.get("created_at")?,
    })
}

/// Insert a fresh open entry. The partial unique index on
/// `(job_id, user_id) WHERE status='in_progress'` makes a second concurrent
/// clock-in fail at the database level; that failure is surfaced as Conflict.
pub fn insert_open_entry(
    conn: &Connection,
    job_id: i64,
    user_id: i64,
    clock_in: DateTime<Utc>,
    location: Option<GeoPoint>,
) -> AppResult<i64> {
    let result = conn.execute(
        "INSERT INTO time_entries
            (job_id, user_id, status, clock_in,
             clock_in_lat, clock_in_lng, clock_in_accuracy, created_at)
         VALUES (?1, ?2, 'in_progress', ?3, ?4, ?5, ?6, ?7)",
        params![
            job_id,
            user_id,
            to_store(clock_in),
            location.map(|l| l.lat),
            location.map(|l| l.lng),
            location.and_then(|l| l.accuracy),
            to_store(Utc::now()),
        ],
    );

    match result {
        Ok(_) => Ok(conn.last_insert_rowid()),
        Err(rusqlite::Error::SqliteFailure(e, _))
            if e.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            Err(AppError::Conflict(format!(
                "an open time entry already exists for user {} on job {}",
                user_id, job_id
            )))
        }
        Err(e) => Err(e.into()),
    }
}

pub fn load_entry(conn: &Connection, id: i64) -> AppResult<TimeEntry> {
    let mut stmt = conn.prepare("SELECT * FROM time_entries WHERE id = ?1")?;
    stmt.query_row([id], map_row)
        .optional()?
        .ok_or_else(|| AppError::NotFound(format!("time entry {}", id)))
}

pub fn find_open_entry(
    conn: &Connection,
    job_id: i64,
    user_id: i64,
) -> AppResult<Option<TimeEntry>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM time_entries
         WHERE job_id = ?1 AND user_id = ?2 AND status = 'in_progress'",
    )?;
    Ok(stmt.query_row(params![job_id, user_id], map_row).optional()?)
}

pub fn list_entries(
    conn: &Connection,
    job_id: i64,
    status: Option<TimeEntryStatus>,
) -> AppResult<Vec<TimeEntry>> {
    let mut out = Vec::new();
    match status {
        Some(s) => {
            let mut stmt = conn.prepare(
                "SELECT * FROM time_entries
                 WHERE job_id = ?1 AND status = ?2
                 ORDER BY clock_in ASC, id ASC",
            )?;
            let rows = stmt.query_map(params![job_id, s.to_db_str()], map_row)?;
            for r in rows {
                out.push(r?);
            }
        }
        None => {
            let mut stmt = conn.prepare(
                "SELECT * FROM time_entries
                 WHERE job_id = ?1
                 ORDER BY clock_in ASC, id ASC",
            )?;
            let rows = stmt.query_map([job_id], map_row)?;
            for r in rows {
                out.push(r?);
            }
        }
    }
    Ok(out)
}

/// Count of entries still waiting on field or office action.
pub fn count_unsettled(conn: &Connection, job_id: i64) -> AppResult<i64> {
    let mut stmt = conn.prepare(
        "SELECT COUNT(*) FROM time_entries
         WHERE job_id = ?1 AND status NOT IN ('approved','rejected')",
    )?;
    Ok(stmt.query_row([job_id], |row| row.get(0))?)
}

// ---------------------------------------------------------------------------
// Guarded transitions.
//
// Every UPDATE below carries `AND status = ?expected`: the status read during
// validation is the optimistic-concurrency precondition. Zero affected rows
// means another writer got there first (or the id vanished); callers turn
// that into Conflict / NotFound. Returns affected row count.
// ---------------------------------------------------------------------------

#[allow(clippy::too_many_arguments)]
pub fn mark_submitted(
    conn: &Connection,
    id: i64,
    expected: TimeEntryStatus,
    clock_out: DateTime<Utc>,
    location: Option<GeoPoint>,
    notes: Option<&str>,
    submitted_by: i64,
    submitted_at: DateTime<Utc>,
    duration_minutes: i64,
) -> AppResult<usize> {
    let n = conn.execute(
        "UPDATE time_entries
         SET status = 'submitted',
             clock_out = ?1,
             clock_out_lat = ?2, clock_out_lng = ?3, clock_out_accuracy = ?4,
             notes = CASE WHEN ?5 IS NULL THEN notes ELSE ?5 END,
             submitted_by = ?6,
             submitted_at = ?7,
             duration_minutes = ?8
         WHERE id = ?9 AND status = ?10",
        params![
            to_store(clock_out),
            location.map(|l| l.lat),
            location.map(|l| l.lng),
            location.and_then(|l| l.accuracy),
            notes,
            submitted_by,
            to_store(submitted_at),
            duration_minutes,
            id,
            expected.to_db_str(),
        ],
    )?;
    Ok(n)
}

pub fn mark_approved(
    conn: &Connection,
    id: i64,
    expected: TimeEntryStatus,
    approver_id: i64,
    approved_at: DateTime<Utc>,
) -> AppResult<usize> {
    let n = conn.execute(
        "UPDATE time_entries
         SET status = 'approved',
             approver_id = ?1,
             approved_at = ?2,
             rejection_reason = NULL
         WHERE id = ?3 AND status = ?4",
        params![approver_id, to_store(approved_at), id, expected.to_db_str()],
    )?;
    Ok(n)
}

pub fn mark_adjustment_requested(
    conn: &Connection,
    id: i64,
    expected: TimeEntryStatus,
    reason: &str,
) -> AppResult<usize> {
    let n = conn.execute(
        "UPDATE time_entries
         SET status = 'adjustment_requested',
             rejection_reason = ?1
         WHERE id = ?2 AND status = ?3",
        params![reason, id, expected.to_db_str()],
    )?;
    Ok(n)
}

pub fn mark_resubmitted(
    conn: &Connection,
    id: i64,
    expected: TimeEntryStatus,
    notes: Option<&str>,
    submitted_at: DateTime<Utc>,
) -> AppResult<usize> {
    let n = conn.execute(
        "UPDATE time_entries
         SET status = 'submitted',
             rejection_reason = NULL,
             notes = CASE WHEN ?1 IS NULL THEN notes ELSE ?1 END,
             submitted_at = ?2
         WHERE id = ?3 AND status = ?4",
        params![notes, to_store(submitted_at), id, expected.to_db_str()],
    )?;
    Ok(n)
}
