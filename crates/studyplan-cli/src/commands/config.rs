use clap::Subcommand;
use studyplan_core::{Config, ConfigError};

use super::print_json;
use crate::session::Session;

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g. "schedule.daily_hours", "storage.file_name")
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// New value
        #[arg(allow_negative_numbers = true)]
        value: String,
    },
    /// List all config values
    List,
    /// Reset config to defaults
    Reset,
}

pub fn run(action: ConfigAction, session: &mut Session) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => match session.config().get(&key) {
            Some(value) => println!("{value}"),
            None => return Err(ConfigError::UnknownKey(key).into()),
        },
        ConfigAction::Set { key, value } => {
            let mut config = session.config().clone();
            config.set(&key, &value)?;
            config.save(session.data_dir())?;
            session.set_config(config);
            println!("ok");
        }
        ConfigAction::List => {
            let config = session.config();
            if session.json {
                print_json(config)?;
            } else {
                for key in [
                    "schedule.daily_hours",
                    "schedule.plan_days",
                    "storage.file_name",
                ] {
                    if let Some(value) = config.get(key) {
                        println!("{key} = {value}");
                    }
                }
            }
        }
        ConfigAction::Reset => {
            let config = Config::default();
            config.save(session.data_dir())?;
            session.set_config(config);
            println!("config reset to defaults");
        }
    }
    Ok(())
}
