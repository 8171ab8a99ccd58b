//! Clock-session tracker: opens and closes the one-per-(job, user) work
//! session that backs every time entry.

use crate::core::gateway::{ensure_transitioned, in_transaction};
use crate::db::pool::DbPool;
use crate::db::{activity, actors, jobs, time_entries};
use crate::errors::{AppError, AppResult};
use crate::models::activity::{ActivityAction, SubjectType};
use crate::models::geo::GeoPoint;
use crate::models::job::JobStatus;
use crate::models::time_entry::{TimeEntry, TimeEntryStatus};
use chrono::{DateTime, Utc};

/// Open a session: creates a time entry in `in_progress`.
///
/// A second open session for the same (job, user) fails with Conflict — the
/// explicit check gives the friendly message, the partial unique index is
/// the authoritative guard for the true concurrent case.
pub fn clock_in(
    pool: &mut DbPool,
    job_id: i64,
    user_id: i64,
    location: Option<GeoPoint>,
    at: Option<DateTime<Utc>>,
) -> AppResult<TimeEntry> {
    let clock_in = at.unwrap_or_else(Utc::now);

    in_transaction(&mut pool.conn, |tx| {
        let job = jobs::load_job(tx, job_id)?;
        if job.status == JobStatus::Archived {
            return Err(AppError::InvalidState(format!(
                "job {} is archived; no new entries can be attached",
                job_id
            )));
        }
        actors::load_actor(tx, user_id)?;

        if time_entries::find_open_entry(tx, job_id, user_id)?.is_some() {
            return Err(AppError::Conflict(format!(
                "an open time entry already exists for user {} on job {}",
                user_id, job_id
            )));
        }

        let entry_id = time_entries::insert_open_entry(tx, job_id, user_id, clock_in, location)?;

        activity::append(
            tx,
            SubjectType::Job,
            job_id,
            &ActivityAction::TimeEntryClockedIn { entry_id, user_id },
            Some(user_id),
        )?;

        time_entries::load_entry(tx, entry_id)
    })
}

/// Close the session: `in_progress → submitted`. Stamps the submitter,
/// computes the worked duration and hands the entry to the approval flow.
pub fn clock_out(
    pool: &mut DbPool,
    entry_id: i64,
    location: Option<GeoPoint>,
    notes: Option<&str>,
    at: Option<DateTime<Utc>>,
) -> AppResult<TimeEntry> {
    let clock_out = at.unwrap_or_else(Utc::now);

    in_transaction(&mut pool.conn, |tx| {
        let entry = time_entries::load_entry(tx, entry_id)?;

        if !entry.status.is_open() {
            return Err(AppError::InvalidState(format!(
                "time entry {} is {}, not an open session",
                entry_id,
                entry.status.to_db_str()
            )));
        }

        if clock_out <= entry.clock_in {
            return Err(AppError::Validation(format!(
                "clock-out ({}) must be after clock-in ({})",
                clock_out, entry.clock_in
            )));
        }

        let duration_minutes = TimeEntry::worked_minutes(entry.clock_in, clock_out);

        let rows = time_entries::mark_submitted(
            tx,
            entry_id,
            TimeEntryStatus::InProgress,
            clock_out,
            location,
            notes,
            entry.user_id,
            clock_out,
            duration_minutes,
        )?;
        ensure_transitioned(rows, "time entry", entry_id)?;

        activity::append(
            tx,
            SubjectType::Job,
            entry.job_id,
            &ActivityAction::TimeEntrySubmitted {
                entry_id,
                user_id: entry.user_id,
                previous_status: TimeEntryStatus::InProgress.to_db_str(),
                new_status: TimeEntryStatus::Submitted.to_db_str(),
                duration_minutes,
            },
            Some(entry.user_id),
        )?;

        time_entries::load_entry(tx, entry_id)
    })
}
