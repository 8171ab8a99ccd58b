use crate::cli::parser::{Commands, CrewAction};
use crate::config::Config;
use crate::core::job;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::actor::Role;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Crew { action } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;

        match action {
            CrewAction::Add { name, role } => {
                let role = Role::from_db_str(role)
                    .ok_or_else(|| AppError::InvalidRole(role.to_string()))?;
                let actor = job::register_actor(&mut pool, name, role)?;
                success(format!(
                    "Registered {} {} '{}'.",
                    actor.role.to_db_str(),
                    actor.id,
                    actor.name
                ));
            }
            CrewAction::List => {
                let all = job::list_actors(&mut pool)?;
                println!("{:>4}  {:<10}  {}", "Id", "Role", "Name");
                for a in all {
                    println!("{:>4}  {:<10}  {}", a.id, a.role.to_db_str(), a.name);
                }
            }
        }
    }
    Ok(())
}
