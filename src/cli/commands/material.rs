use crate::cli::parser::{Commands, MaterialAction};
use crate::config::Config;
use crate::core::material;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::material::{MaterialStatus, MaterialUsage};
use crate::ui::messages::success;

fn parse_status(s: &str) -> AppResult<MaterialStatus> {
    MaterialStatus::from_db_str(s).ok_or_else(|| AppError::InvalidStatus(s.to_string()))
}

fn print_table(entries: &[MaterialUsage]) {
    println!(
        "{:>4}  {:<10}  {:<18}  {:>9}  {:>10}  {:>10}  {}",
        "Id", "Status", "Sku", "Qty", "Unit", "Total", "Reason"
    );
    for e in entries {
        println!(
            "{:>4}  {:<10}  {:<18}  {:>9.2}  {:>10.2}  {:>10.2}  {}",
            e.id,
            e.approval_status.to_db_str(),
            e.sku,
            e.quantity,
            e.unit_cost,
            e.total_cost,
            e.rejection_reason.as_deref().unwrap_or("")
        );
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Material { action } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;

        match action {
            MaterialAction::Record {
                job,
                sku,
                quantity,
                unit_cost,
                recorded_by,
                cost_code,
                notes,
            } => {
                let entry = material::record(
                    &mut pool,
                    *job,
                    sku,
                    *quantity,
                    *unit_cost,
                    *recorded_by,
                    cost_code.as_deref(),
                    notes.as_deref(),
                )?;
                success(format!(
                    "Recorded material {} '{}' on job {}: total {:.2}.",
                    entry.id, entry.sku, entry.job_id, entry.total_cost
                ));
            }
            MaterialAction::Approve {
                entry,
                approver,
                note,
            } => {
                let updated = material::approve(&mut pool, *entry, *approver, note.as_deref())?;
                success(format!(
                    "Approved material entry {} (approver {}).",
                    updated.id, *approver
                ));
            }
            MaterialAction::Reject {
                entry,
                approver,
                reason,
                note,
            } => {
                let updated =
                    material::reject(&mut pool, *entry, *approver, reason, note.as_deref())?;
                success(format!(
                    "Rejected material entry {} ({}).",
                    updated.id,
                    updated.rejection_reason.as_deref().unwrap_or("")
                ));
            }
            MaterialAction::List { job, status, json } => {
                let filter = status.as_deref().map(parse_status).transpose()?;
                let entries = material::list(&mut pool, *job, filter)?;
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
