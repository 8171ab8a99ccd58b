use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;

/// Create the config file (unless in test mode) and bring the database
/// schema up to date.
pub fn handle(cli: &Cli) -> AppResult<()> {
    Config::init_all(cli.test)?;

    let db_path = match &cli.db {
        Some(custom) => custom.clone(),
        None => Config::load()?.database,
    };

    if let Some(parent) = std::path::Path::new(&db_path).parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let pool = DbPool::new(&db_path)?;
    init_db(&pool.conn)?;

    success(format!("Database: {}", db_path));
    Ok(())
}
