//! Time-entry state machine: supervisor dispositions and crew resubmission.
//!
//! `in_progress → submitted → {approved | adjustment_requested}`;
//! `adjustment_requested → submitted` when the owner resubmits. A rejection
//! expects a correction, so it lands in `adjustment_requested` rather than a
//! dead end; `approved` is terminal.

use crate::core::gateway::{authorize_disposition, ensure_transitioned, in_transaction};
use crate::db::pool::DbPool;
use crate::db::{activity, time_entries};
use crate::errors::{AppError, AppResult};
use crate::models::activity::{ActivityAction, SubjectType};
use crate::models::time_entry::{TimeEntry, TimeEntryStatus};
use chrono::Utc;

/// Approve a submitted (or resubmission-pending) entry, making it
/// payroll-ready. Sets the approver stamp and clears any stale reason.
pub fn approve(
    pool: &mut DbPool,
    entry_id: i64,
    approver_id: i64,
    note: Option<&str>,
) -> AppResult<TimeEntry> {
    in_transaction(&mut pool.conn, |tx| {
        let entry = time_entries::load_entry(tx, entry_id)?;
        authorize_disposition(tx, approver_id, entry.user_id, None)?;

        if !entry.status.can_approve() {
            return Err(AppError::InvalidState(format!(
                "time entry {} is {}; only submitted or adjustment_requested entries can be approved",
                entry_id,
                entry.status.to_db_str()
            )));
        }

        let rows = time_entries::mark_approved(tx, entry_id, entry.status, approver_id, Utc::now())?;
        ensure_transitioned(rows, "time entry", entry_id)?;

        activity::append(
            tx,
            SubjectType::Job,
            entry.job_id,
            &ActivityAction::TimeEntryApproved {
                entry_id,
                approver_id,
                previous_status: entry.status.to_db_str(),
                new_status: TimeEntryStatus::Approved.to_db_str(),
                note: note.map(str::to_string),
            },
            Some(approver_id),
        )?;

        time_entries::load_entry(tx, entry_id)
    })
}

/// Reject a submitted entry. Requires a non-blank reason; the entry lands in
/// `adjustment_requested`, waiting for the owner to resubmit.
pub fn reject(
    pool: &mut DbPool,
    entry_id: i64,
    approver_id: i64,
    reason: &str,
    note: Option<&str>,
) -> AppResult<TimeEntry> {
    in_transaction(&mut pool.conn, |tx| {
        let entry = time_entries::load_entry(tx, entry_id)?;
        let reason = authorize_disposition(tx, approver_id, entry.user_id, Some(reason))?
            .unwrap_or_default();

        if !entry.status.can_reject() {
            return Err(AppError::InvalidState(format!(
                "time entry {} is {}; only submitted entries can be rejected",
                entry_id,
                entry.status.to_db_str()
            )));
        }

        let rows = time_entries::mark_adjustment_requested(tx, entry_id, entry.status, &reason)?;
        ensure_transitioned(rows, "time entry", entry_id)?;

        activity::append(
            tx,
            SubjectType::Job,
            entry.job_id,
            &ActivityAction::TimeEntryRejected {
                entry_id,
                approver_id,
                reason,
                previous_status: entry.status.to_db_str(),
                new_status: TimeEntryStatus::AdjustmentRequested.to_db_str(),
                note: note.map(str::to_string),
            },
            Some(approver_id),
        )?;

        time_entries::load_entry(tx, entry_id)
    })
}

/// Owner resubmission after an adjustment request:
/// `adjustment_requested → submitted`, reason cleared.
pub fn resubmit(
    pool: &mut DbPool,
    entry_id: i64,
    user_id: i64,
    notes: Option<&str>,
) -> AppResult<TimeEntry> {
    in_transaction(&mut pool.conn, |tx| {
        let entry = time_entries::load_entry(tx, entry_id)?;

        if entry.user_id != user_id {
            return Err(AppError::Forbidden(format!(
                "time entry {} belongs to user {}; only the owner may resubmit",
                entry_id, entry.user_id
            )));
        }

        if entry.status != TimeEntryStatus::AdjustmentRequested {
            return Err(AppError::InvalidState(format!(
                "time entry {} is {}; only adjustment_requested entries can be resubmitted",
                entry_id,
                entry.status.to_db_str()
            )));
        }

        let rows =
            time_entries::mark_resubmitted(tx, entry_id, entry.status, notes, Utc::now())?;
        ensure_transitioned(rows, "time entry", entry_id)?;

        activity::append(
            tx,
            SubjectType::Job,
            entry.job_id,
            &ActivityAction::TimeEntryResubmitted {
                entry_id,
                user_id,
                previous_status: entry.status.to_db_str(),
                new_status: TimeEntryStatus::Submitted.to_db_str(),
            },
            Some(user_id),
        )?;

        time_entries::load_entry(tx, entry_id)
    })
}

/// List a job's time entries, optionally filtered by status.
pub fn list(
    pool: &mut DbPool,
    job_id: i64,
    status: Option<TimeEntryStatus>,
) -> AppResult<Vec<TimeEntry>> {
    time_entries::list_entries(&pool.conn, job_id, status)
}
