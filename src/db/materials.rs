use crate::errors::{AppError, AppResult};
use crate::models::material::{MaterialStatus, MaterialUsage};
use crate::utils::time::{from_store, to_store};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

fn conversion_err(e: Box<dyn std::error::Error + Send + Sync>) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, e)
}

pub fn map_row(row: &Row) -> Result<MaterialUsage> {
    let status_str: String = row.get("approval_status")?;
    let approval_status = MaterialStatus::from_db_str(&status_str)
        .ok_or_else(|| conversion_err(Box::new(AppError::InvalidStatus(status_str.clone()))))?;

    let approved_at: Option<String> = row.get("approved_at")?;
    let approved_at = match approved_at {
        Some(s) => Some(from_store(&s).map_err(|e| conversion_err(Box::new(e)))?),
        None => None,
    };

    Ok(MaterialUsage {
        id: row.get("id")?,
        job_id: row.get("job_id")?,
        sku: row.get("sku")?,
        cost_code: row.get("cost_code")?,
        quantity: row.get("quantity")?,
        unit_cost: row.get("unit_cost")?,
        total_cost: row.get("total_cost")?,
        approval_status,
        recorded_by: row.get("recorded_by")?,
        approver_id: row.get("approver_id")?,
        approved_at,
        rejection_reason: row.get("rejection_reason")?,
        notes: row.get("notes")?,
        created_at: row.get("created_at")?,
    })
}

/// Insert a new line in `submitted`. `total_cost` is the caller-computed,
/// frozen value; it is never recomputed on read.
#[allow(clippy::too_many_arguments)]
pub fn insert_material(
    conn: &Connection,
    job_id: i64,
    sku: &str,
    cost_code: Option<&str>,
    quantity: f64,
    unit_cost: f64,
    total_cost: f64,
    recorded_by: i64,
    notes: Option<&str>,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO material_usage
            (job_id, sku, cost_code, quantity, unit_cost, total_cost,
             approval_status, recorded_by, notes, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, 'submitted', ?7, ?8, ?9)",
        params![
            job_id,
            sku,
            cost_code,
            quantity,
            unit_cost,
            total_cost,
            recorded_by,
            notes.unwrap_or(""),
            to_store(Utc::now()),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn load_material(conn: &Connection, id: i64) -> AppResult<MaterialUsage> {
    let mut stmt = conn.prepare("SELECT * FROM material_usage WHERE id = ?1")?;
    stmt.query_row([id], map_row)
        .optional()?
        .ok_or_else(|| AppError::NotFound(format!("material entry {}", id)))
}

pub fn list_materials(
    conn: &Connection,
    job_id: i64,
    status: Option<MaterialStatus>,
) -> AppResult<Vec<MaterialUsage>> {
    let mut out = Vec::new();
    match status {
        Some(s) => {
            let mut stmt = conn.prepare(
                "SELECT * FROM material_usage
                 WHERE job_id = ?1 AND approval_status = ?2
                 ORDER BY created_at ASC, id ASC",
            )?;
            let rows = stmt.query_map(params![job_id, s.to_db_str()], map_row)?;
            for r in rows {
                out.push(r?);
            }
        }
        None => {
            let mut stmt = conn.prepare(
                "SELECT * FROM material_usage
                 WHERE job_id = ?1
                 ORDER BY created_at ASC, id ASC",
            )?;
            let rows = stmt.query_map([job_id], map_row)?;
            for r in rows {
                out.push(r?);
            }
        }
    }
    Ok(out)
}

pub fn count_unsettled(conn: &Connection, job_id: i64) -> AppResult<i64> {
    let mut stmt = conn.prepare(
        "SELECT COUNT(*) FROM material_usage
         WHERE job_id = ?1 AND approval_status = 'submitted'",
    )?;
    Ok(stmt.query_row([job_id], |row| row.get(0))?)
}

// Guarded transitions: same status-precondition pattern as time entries.

pub fn mark_approved(
    conn: &Connection,
    id: i64,
    expected: MaterialStatus,
    approver_id: i64,
    approved_at: DateTime<Utc>,
) -> AppResult<usize> {
    let n = conn.execute(
        "UPDATE material_usage
         SET approval_status = 'approved',
             approver_id = ?1,
             approved_at = ?2,
             rejection_reason = NULL
         WHERE id = ?3 AND approval_status = ?4",
        params![approver_id, to_store(approved_at), id, expected.to_db_str()],
    )?;
    Ok(n)
}

pub fn mark_rejected(
    conn: &Connection,
    id: i64,
    expected: MaterialStatus,
    reason: &str,
) -> AppResult<usize> {
    let n = conn.execute(
        "UPDATE material_usage
         SET approval_status = 'rejected',
             rejection_reason = ?1
         WHERE id = ?2 AND approval_status = ?3",
        params![reason, id, expected.to_db_str()],
    )?;
    Ok(n)
}
