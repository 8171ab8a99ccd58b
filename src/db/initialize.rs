use crate::db::migrate::run_pending_migrations;
use crate::errors::AppResult;
use rusqlite::Connection;

/// Bring a crewledger database up to date: jobs, actors, time entries,
/// material usage and the activity log, including the open-session unique
/// index. All schema lives in the migration ledger; nothing is created here
/// directly, so `init` and `db --migrate` share one code path.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    run_pending_migrations(conn)?;
    Ok(())
}
