use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::info;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config { print_config } = cmd {
        if *print_config {
            let yaml = serde_yaml::to_string(cfg)
                .map_err(|e| AppError::Config(format!("failed to serialize config: {}", e)))?;
            info(format!("Configuration file: {:?}", Config::config_file()));
            println!("{}", yaml);
        } else {
            info("Nothing to do: use --print to show the configuration.");
        }
    }
    Ok(())
}
