use crate::cli::parser::{Commands, JobAction};
use crate::config::Config;
use crate::core::job;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Job { action } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;

        match action {
            JobAction::Add { name } => {
                let created = job::create_job(&mut pool, name)?;
                success(format!("Created job {} '{}'.", created.id, created.name));
            }
            JobAction::List => {
                let all = job::list_jobs(&mut pool)?;
                println!("{:>4}  {:<12}  {}", "Id", "Status", "Name");
                for j in all {
                    println!("{:>4}  {:<12}  {}", j.id, j.status.to_db_str(), j.name);
                }
            }
            JobAction::Archive { id } => {
                let archived = job::archive_job(&mut pool, *id)?;
                success(format!(
                    "Archived job {} '{}'.",
                    archived.id, archived.name
                ));
            }
        }
    }
    Ok(())
}
