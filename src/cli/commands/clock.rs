use crate::cli::parser::{ClockAction, Commands};
use crate::config::Config;
use crate::core::clock;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::geo::GeoPoint;
use crate::ui::messages::success;
use crate::utils::time;

fn parse_location(arg: Option<&String>) -> AppResult<Option<GeoPoint>> {
    match arg {
        Some(s) => GeoPoint::from_arg(s)
            .map(Some)
            .ok_or_else(|| AppError::Validation(format!("invalid location '{}'", s))),
        None => Ok(None),
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Clock { action } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;

        match action {
            ClockAction::In {
                job,
                user,
                location,
                at,
            } => {
                let loc = parse_location(location.as_ref())?;
                let at = at.as_ref().map(|s| time::parse_at(s)).transpose()?;

                let entry = clock_in_message(clock::clock_in(&mut pool, *job, *user, loc, at)?);
                success(entry);
            }
            ClockAction::Out {
                entry,
                location,
                notes,
                at,
            } => {
                let loc = parse_location(location.as_ref())?;
                let at = at.as_ref().map(|s| time::parse_at(s)).transpose()?;

                let updated =
                    clock::clock_out(&mut pool, *entry, loc, notes.as_deref(), at)?;
                success(format!(
                    "Clocked out entry {}: {} worked, status {}.",
                    updated.id,
                    time::format_minutes(updated.duration_minutes.unwrap_or(0)),
                    updated.status.to_db_str()
                ));
            }
        }
    }
    Ok(())
}

fn clock_in_message(entry: crate::models::time_entry::TimeEntry) -> String {
    format!(
        "Clocked in user {} on job {} (entry {}) at {}.",
        entry.user_id,
        entry.job_id,
        entry.id,
        entry.clock_in.format("%Y-%m-%d %H:%M")
    )
}
