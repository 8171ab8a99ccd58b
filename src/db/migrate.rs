use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure the migration ledger exists.
fn ensure_migrations_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_migrations (
            version    TEXT PRIMARY KEY,
            applied_at TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT 1 FROM schema_migrations WHERE version = ?1 LIMIT 1")?;
    let found: Option<i64> = stmt.query_row([version], |row| row.get(0)).optional()?;
    Ok(found.is_some())
}

fn mark_applied(conn: &Connection, version: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO schema_migrations (version, applied_at) VALUES (?1, datetime('now'))",
        [version],
    )?;
    Ok(())
}

/// Initial schema: jobs, actors, the two entry tables and the activity log.
///
/// The partial unique index on open time entries is the server-side
/// enforcement of "at most one open session per (job, user)" — two
/// concurrent clock-ins cannot both commit.
fn migrate_initial_schema(conn: &Connection) -> Result<()> {
    let version = "20250412_0001_initial_schema";
    if is_applied(conn, version)? {
        return Ok(());
    }

    conn.execute_batch(
        r#"
        BEGIN;

        CREATE TABLE IF NOT EXISTS jobs (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            name       TEXT NOT NULL,
            status     TEXT NOT NULL DEFAULT 'scheduled'
                       CHECK(status IN ('scheduled','in_progress','completed','archived')),
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS actors (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            name       TEXT NOT NULL,
            role       TEXT NOT NULL CHECK(role IN ('crew','supervisor')),
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS time_entries (
            id                INTEGER PRIMARY KEY AUTOINCREMENT,
            job_id            INTEGER NOT NULL REFERENCES jobs(id),
            user_id           INTEGER NOT NULL REFERENCES actors(id),
            status            TEXT NOT NULL
                              CHECK(status IN ('in_progress','submitted','approved',
                                               'rejected','adjustment_requested')),
            clock_in          TEXT NOT NULL,
            clock_out         TEXT,
            clock_in_lat      REAL,
            clock_in_lng      REAL,
            clock_in_accuracy REAL,
            clock_out_lat     REAL,
            clock_out_lng     REAL,
            clock_out_accuracy REAL,
            notes             TEXT NOT NULL DEFAULT '',
            submitted_by      INTEGER REFERENCES actors(id),
            submitted_at      TEXT,
            approver_id       INTEGER REFERENCES actors(id),
            approved_at       TEXT,
            rejection_reason  TEXT,
            duration_minutes  INTEGER,
            created_at        TEXT NOT NULL
        );

        CREATE UNIQUE INDEX IF NOT EXISTS idx_time_entries_open
            ON time_entries(job_id, user_id) WHERE status = 'in_progress';
        CREATE INDEX IF NOT EXISTS idx_time_entries_job_status
            ON time_entries(job_id, status);

        CREATE TABLE IF NOT EXISTS material_usage (
            id               INTEGER PRIMARY KEY AUTOINCREMENT,
            job_id           INTEGER NOT NULL REFERENCES jobs(id),
            sku              TEXT NOT NULL,
            quantity         REAL NOT NULL CHECK(quantity > 0),
            unit_cost        REAL NOT NULL CHECK(unit_cost >= 0),
            total_cost       REAL NOT NULL,
            approval_status  TEXT NOT NULL DEFAULT 'submitted'
                             CHECK(approval_status IN ('submitted','approved','rejected')),
            recorded_by      INTEGER NOT NULL REFERENCES actors(id),
            approver_id      INTEGER REFERENCES actors(id),
            approved_at      TEXT,
            rejection_reason TEXT,
            notes            TEXT NOT NULL DEFAULT '',
            created_at       TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_material_usage_job_status
            ON material_usage(job_id, approval_status);

        CREATE TABLE IF NOT EXISTS activity_log (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            subject_type TEXT NOT NULL CHECK(subject_type IN ('job','lead','template')),
            subject_id   INTEGER NOT NULL,
            action       TEXT NOT NULL,
            actor_id     INTEGER,
            meta         TEXT NOT NULL DEFAULT '{}',
            created_at   TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_activity_subject
            ON activity_log(subject_type, subject_id, created_at);

        COMMIT;
        "#,
    )?;

    mark_applied(conn, version)?;
    success(format!("Migration applied: {}", version));
    Ok(())
}

/// Cost codes arrived after the first field pilots; older databases need the
/// extra column on material_usage.
fn migrate_add_cost_code(conn: &Connection) -> Result<()> {
    let version = "20250607_0002_add_cost_code";
    if is_applied(conn, version)? {
        return Ok(());
    }

    let mut stmt = conn.prepare("PRAGMA table_info('material_usage')")?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;
    let mut has_cost_code = false;
    for c in cols {
        if c? == "cost_code" {
            has_cost_code = true;
            break;
        }
    }

    if !has_cost_code {
        conn.execute("ALTER TABLE material_usage ADD COLUMN cost_code TEXT;", [])?;
        success(format!(
            "Migration applied: {} → added 'cost_code' to material_usage",
            version
        ));
    }

    mark_applied(conn, version)?;
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked from db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_migrations_table(conn)?;
    migrate_initial_schema(conn)?;
    migrate_add_cost_code(conn)?;
    Ok(())
}
