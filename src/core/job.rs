//! Job and actor identity management. The surrounding application owns the
//! full CRUD flow; this core only needs enough to attach entries and resolve
//! approval capabilities, plus the archive guard that protects the audit
//! trail.

use crate::core::gateway::{ensure_transitioned, in_transaction};
use crate::db::pool::DbPool;
use crate::db::{activity, actors, jobs, materials, time_entries};
use crate::errors::{AppError, AppResult};
use crate::models::activity::{ActivityAction, SubjectType};
use crate::models::actor::{Actor, Role};
use crate::models::job::{Job, JobStatus};

pub fn create_job(pool: &mut DbPool, name: &str) -> AppResult<Job> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("job name must not be blank".to_string()));
    }

    in_transaction(&mut pool.conn, |tx| {
        let job_id = jobs::insert_job(tx, name)?;
        activity::append(
            tx,
            SubjectType::Job,
            job_id,
            &ActivityAction::JobCreated {
                name: name.to_string(),
            },
            None,
        )?;
        jobs::load_job(tx, job_id)
    })
}

pub fn list_jobs(pool: &mut DbPool) -> AppResult<Vec<Job>> {
    jobs::list_jobs(&pool.conn)
}

/// Archive a job. Blocked while any time entry or material line is still
/// unsettled: entries are retained for audit, so a job never cascades away
/// from under them, and physical deletion is not offered at all.
pub fn archive_job(pool: &mut DbPool, job_id: i64) -> AppResult<Job> {
    in_transaction(&mut pool.conn, |tx| {
        let job = jobs::load_job(tx, job_id)?;
        if job.status == JobStatus::Archived {
            return Err(AppError::InvalidState(format!(
                "job {} is already archived",
                job_id
            )));
        }

        let open_time = time_entries::count_unsettled(tx, job_id)?;
        let open_materials = materials::count_unsettled(tx, job_id)?;
        if open_time > 0 || open_materials > 0 {
            return Err(AppError::Conflict(format!(
                "job {} still has {} unsettled time entries and {} unsettled material entries",
                job_id, open_time, open_materials
            )));
        }

        let rows = jobs::mark_archived(tx, job_id, job.status)?;
        ensure_transitioned(rows, "job", job_id)?;

        activity::append(
            tx,
            SubjectType::Job,
            job_id,
            &ActivityAction::JobArchived {
                previous_status: job.status.to_db_str(),
            },
            None,
        )?;

        jobs::load_job(tx, job_id)
    })
}

pub fn register_actor(pool: &mut DbPool, name: &str, role: Role) -> AppResult<Actor> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::Validation(
            "actor name must not be blank".to_string(),
        ));
    }

    let id = actors::insert_actor(&pool.conn, name, role)?;
    actors::load_actor(&pool.conn, id)
}

pub fn list_actors(pool: &mut DbPool) -> AppResult<Vec<Actor>> {
    actors::list_actors(&pool.conn)
}
