use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::info;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Config { print_config } = cmd else {
        return Err(AppError::Other("unexpected command".into()));
    };

    if *print_config {
        let yaml = serde_yaml::to_string(cfg).map_err(|e| AppError::Config(e.to_string()))?;
        info(format!("Configuration file: {:?}\n", Config::config_file()));
        println!("{}", yaml);
    } else {
        info("Nothing to do: use --print to show the configuration.");
    }
    Ok(())
}
