use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};

/// Database maintenance: migrations, integrity check, vacuum, info.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        check,
        vacuum,
        info: show_info,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database)?;

        if *migrate {
            init_db(&pool.conn)?;
            success("Migrations up to date.");
        }

        if *check {
            let result: String = pool
                .conn
                .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;
            if result == "ok" {
                success("Integrity check passed.");
            } else {
                return Err(AppError::Migration(format!(
                    "integrity check failed: {}",
                    result
                )));
            }
        }

        if *vacuum {
            pool.conn.execute_batch("VACUUM;")?;
            success("Database vacuumed.");
        }

        if *show_info {
            let jobs: i64 = pool
                .conn
                .query_row("SELECT COUNT(*) FROM jobs", [], |row| row.get(0))?;
            let entries: i64 =
                pool.conn
                    .query_row("SELECT COUNT(*) FROM time_entries", [], |row| row.get(0))?;
            let materials: i64 =
                pool.conn
                    .query_row("SELECT COUNT(*) FROM material_usage", [], |row| row.get(0))?;
            let activity: i64 =
                pool.conn
                    .query_row("SELECT COUNT(*) FROM activity_log", [], |row| row.get(0))?;

            info(format!("Database: {}", cfg.database));
            println!("  jobs:           {}", jobs);
            println!("  time entries:   {}", entries);
            println!("  material lines: {}", materials);
            println!("  activity rows:  {}", activity);
        }
    }
    Ok(())
}
