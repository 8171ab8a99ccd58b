use crate::cli::parser::{Commands, TimeAction};
use crate::config::Config;
use crate::core::time_entry;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::time_entry::{TimeEntry, TimeEntryStatus};
use crate::ui::messages::success;
use crate::utils::time::format_minutes;

fn parse_status(s: &str) -> AppResult<TimeEntryStatus> {
    TimeEntryStatus::from_db_str(s).ok_or_else(|| AppError::InvalidStatus(s.to_string()))
}

fn print_table(entries: &[TimeEntry]) {
    println!(
        "{:>4}  {:<21}  {:>5}  {:<16}  {:<16}  {:>6}  {}",
        "Id", "Status", "User", "In", "Out", "Mins", "Reason"
    );
    for e in entries {
        println!(
            "{:>4}  {:<21}  {:>5}  {:<16}  {:<16}  {:>6}  {}",
            e.id,
            e.status.to_db_str(),
            e.user_id,
            e.clock_in.format("%Y-%m-%d %H:%M"),
            e.clock_out
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "-".to_string()),
            e.duration_minutes
                .map(format_minutes)
                .unwrap_or_else(|| "-".to_string()),
            e.rejection_reason.as_deref().unwrap_or("")
        );
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Time { action } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;

        match action {
            TimeAction::Approve {
                entry,
                approver,
                note,
            } => {
                let updated =
                    time_entry::approve(&mut pool, *entry, *approver, note.as_deref())?;
                success(format!(
                    "Approved time entry {} (approver {}).",
                    updated.id, *approver
                ));
            }
            TimeAction::Reject {
                entry,
                approver,
                reason,
                note,
            } => {
                let updated =
                    time_entry::reject(&mut pool, *entry, *approver, reason, note.as_deref())?;
                success(format!(
                    "Rejected time entry {}: adjustment requested ({}).",
                    updated.id,
                    updated.rejection_reason.as_deref().unwrap_or("")
                ));
            }
            TimeAction::Resubmit { entry, user, notes } => {
                let updated =
                    time_entry::resubmit(&mut pool, *entry, *user, notes.as_deref())?;
                success(format!(
                    "Resubmitted time entry {}: status {}.",
                    updated.id,
                    updated.status.to_db_str()
                ));
            }
            TimeAction::List { job, status, json } => {
                let filter = status.as_deref().map(parse_status).transpose()?;
                let entries = time_entry::list(&mut pool, *job, filter)?;
                if *json {
                    println!("{}", serde_json::to_string_pretty(&entries)?);
                } else {
                    print_table(&entries);
                }
            }
        }
    }
    Ok(())
}
