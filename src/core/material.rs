//! Material-usage state machine: `submitted → {approved | rejected}`, both
//! terminal. Corrections are logged as a new line, never by reopening.

use crate::core::gateway::{authorize_disposition, ensure_transitioned, in_transaction};
use crate::db::pool::DbPool;
use crate::db::{activity, actors, jobs, materials};
use crate::errors::{AppError, AppResult};
use crate::models::activity::{ActivityAction, SubjectType};
use crate::models::job::JobStatus;
use crate::models::material::{MaterialStatus, MaterialUsage};
use chrono::Utc;

/// Log a material line against a job. `total_cost` is computed here, once,
/// and frozen: later reads always show the stored value, so historical
/// totals survive any change to pricing logic.
#[allow(clippy::too_many_arguments)]
pub fn record(
    pool: &mut DbPool,
    job_id: i64,
    sku: &str,
    quantity: f64,
    unit_cost: f64,
    recorded_by: i64,
    cost_code: Option<&str>,
    notes: Option<&str>,
) -> AppResult<MaterialUsage> {
    let sku = sku.trim();
    if sku.is_empty() {
        return Err(AppError::Validation("sku must not be blank".to_string()));
    }
    if !(quantity > 0.0) {
        return Err(AppError::Validation(format!(
            "quantity must be positive (got {})",
            quantity
        )));
    }
    if unit_cost < 0.0 {
        return Err(AppError::Validation(format!(
            "unit cost must not be negative (got {})",
            unit_cost
        )));
    }

    let total_cost = quantity * unit_cost;

    in_transaction(&mut pool.conn, |tx| {
        let job = jobs::load_job(tx, job_id)?;
        if job.status == JobStatus::Archived {
            return Err(AppError::InvalidState(format!(
                "job {} is archived; no new entries can be attached",
                job_id
            )));
        }
        actors::load_actor(tx, recorded_by)?;

        let entry_id = materials::insert_material(
            tx, job_id, sku, cost_code, quantity, unit_cost, total_cost, recorded_by, notes,
        )?;

        activity::append(
            tx,
            SubjectType::Job,
            job_id,
            &ActivityAction::MaterialRecorded {
                entry_id,
                recorded_by,
                sku: sku.to_string(),
                quantity,
                unit_cost,
                total_cost,
            },
            Some(recorded_by),
        )?;

        materials::load_material(tx, entry_id)
    })
}

pub fn approve(
    pool: &mut DbPool,
    entry_id: i64,
    approver_id: i64,
    note: Option<&str>,
) -> AppResult<MaterialUsage> {
    in_transaction(&mut pool.conn, |tx| {
        let entry = materials::load_material(tx, entry_id)?;
        authorize_disposition(tx, approver_id, entry.recorded_by, None)?;

        if entry.approval_status != MaterialStatus::Submitted {
            return Err(AppError::InvalidState(format!(
                "material entry {} is {}; only submitted entries can be approved",
                entry_id,
                entry.approval_status.to_db_str()
            )));
        }

        let rows =
            materials::mark_approved(tx, entry_id, entry.approval_status, approver_id, Utc::now())?;
        ensure_transitioned(rows, "material entry", entry_id)?;

        activity::append(
            tx,
            SubjectType::Job,
            entry.job_id,
            &ActivityAction::MaterialApproved {
                entry_id,
                approver_id,
                previous_status: entry.approval_status.to_db_str(),
                new_status: MaterialStatus::Approved.to_db_str(),
                note: note.map(str::to_string),
            },
            Some(approver_id),
        )?;

        materials::load_material(tx, entry_id)
    })
}

pub fn reject(
    pool: &mut DbPool,
    entry_id: i64,
    approver_id: i64,
    reason: &str,
    note: Option<&str>,
) -> AppResult<MaterialUsage> {
    in_transaction(&mut pool.conn, |tx| {
        let entry = materials::load_material(tx, entry_id)?;
        let reason = authorize_disposition(tx, approver_id, entry.recorded_by, Some(reason))?
            .unwrap_or_default();

        if entry.approval_status != MaterialStatus::Submitted {
            return Err(AppError::InvalidState(format!(
                "material entry {} is {}; only submitted entries can be rejected",
                entry_id,
                entry.approval_status.to_db_str()
            )));
        }

        let rows = materials::mark_rejected(tx, entry_id, entry.approval_status, &reason)?;
        ensure_transitioned(rows, "material entry", entry_id)?;

        activity::append(
            tx,
            SubjectType::Job,
            entry.job_id,
            &ActivityAction::MaterialRejected {
                entry_id,
                approver_id,
                reason,
                previous_status: entry.approval_status.to_db_str(),
                new_status: MaterialStatus::Rejected.to_db_str(),
                note: note.map(str::to_string),
            },
            Some(approver_id),
        )?;

        materials::load_material(tx, entry_id)
    })
}

/// List a job's material lines, optionally filtered by status.
pub fn list(
    pool: &mut DbPool,
    job_id: i64,
    status: Option<MaterialStatus>,
) -> AppResult<Vec<MaterialUsage>> {
    materials::list_materials(&pool.conn, job_id, status)
}
