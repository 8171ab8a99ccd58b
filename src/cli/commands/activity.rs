use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::activity;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::activity::SubjectType;
use crate::ui::messages::info;

/// Show the newest-first activity feed for one subject.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Activity {
        subject_type,
        subject_id,
        limit,
        offset,
    } = cmd
    {
        let subject = SubjectType::from_db_str(subject_type)
            .ok_or_else(|| AppError::InvalidSubjectType(subject_type.to_string()))?;

        let limit = limit.unwrap_or(cfg.activity_page_size);

        let pool = DbPool::new(&cfg.database)?;
        let total = activity::count_for_subject(&pool.conn, subject, *subject_id)?;
        let page = activity::list(&pool.conn, subject, *subject_id, limit, *offset)?;

        info(format!(
            "Activity for {} {} ({} entries total):",
            subject.to_db_str(),
            subject_id,
            total
        ));
        for e in page {
            let actor = e
                .actor_id
                .map(|id| format!("actor {}", id))
                .unwrap_or_else(|| "system".to_string());
            println!("{}  {:<24}  {:<10}  {}", e.created_at, e.action, actor, e.meta);
        }
    }
    Ok(())
}
