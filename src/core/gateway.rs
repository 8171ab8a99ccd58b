//! Approval gateway: the single choke point every approve/reject/resubmit
//! call goes through. No caller mutates entry state without passing these
//! checks, so transition legality cannot be bypassed from any front end.

use crate::db::actors;
use crate::errors::{AppError, AppResult};
use rusqlite::{Connection, TransactionBehavior};

/// Run `f` inside one immediate-mode SQLite transaction. The state write and
/// the activity append happen in here together: both commit or neither does,
/// so a failed transition never leaves an orphan audit row (or vice versa).
pub fn in_transaction<T>(
    conn: &mut Connection,
    f: impl FnOnce(&Connection) -> AppResult<T>,
) -> AppResult<T> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let out = f(&tx)?;
    tx.commit()?;
    Ok(out)
}

/// Actor-side checks for a disposition (approve or reject):
///
/// 1. the approver exists and holds the supervisor role;
/// 2. the approver is not the entry's owner (no self-approval);
/// 3. a reject carries a non-blank reason.
///
/// Runs before any state write. Returns the trimmed reason for rejects.
pub fn authorize_disposition(
    conn: &Connection,
    approver_id: i64,
    owner_id: i64,
    reason: Option<&str>,
) -> AppResult<Option<String>> {
    let approver = actors::load_actor(conn, approver_id)?;

    if !approver.role.can_approve() {
        return Err(AppError::Forbidden(format!(
            "actor {} ({}) lacks the supervisor role",
            approver.id, approver.name
        )));
    }

    if approver_id == owner_id {
        return Err(AppError::Forbidden(format!(
            "actor {} cannot approve or reject their own entry",
            approver_id
        )));
    }

    match reason {
        Some(r) => {
            let trimmed = r.trim();
            if trimmed.is_empty() {
                return Err(AppError::Validation(
                    "a rejection requires a non-empty reason".to_string(),
                ));
            }
            Ok(Some(trimmed.to_string()))
        }
        None => Ok(None),
    }
}

/// Map the outcome of a status-guarded UPDATE. Zero affected rows for a row
/// that existed at validation time means another writer changed the status
/// between read and write: a conflict, never a silent overwrite.
pub fn ensure_transitioned(rows: usize, entity: &str, id: i64) -> AppResult<()> {
    if rows == 0 {
        return Err(AppError::Conflict(format!(
            "{} {} was modified concurrently; re-fetch and retry",
            entity, id
        )));
    }
    Ok(())
}
