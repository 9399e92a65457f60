//! Command line arguments.

use crate::error::DashboardResult;
use clap::Parser;
use sdg_config::{Config, ConfigError, ConfigLoader};
use std::path::PathBuf;

/// Command line arguments
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, env = "SDG_CONFIG_PATH")]
    pub config: Option<PathBuf>,

    /// Log level, overriding the configuration
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Dataset CSV path, overriding the configuration
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Address to listen on, e.g. 0.0.0.0:8080
    #[arg(short, long)]
    pub bind: Option<String>,
}

impl Args {
    /// Resolves the configuration: file and environment first, then these
    /// arguments, then validation.
    pub fn load_config(&self) -> DashboardResult<Config> {
        let mut config = ConfigLoader::load(self.config.as_deref())?;
        self.apply(&mut config);
        config.validate().map_err(ConfigError::ValidationError)?;
        Ok(config)
    }

    /// Writes the given overrides into `config`.
    pub fn apply(&self, config: &mut Config) {
        if let Some(level) = &self.log_level {
            config.logging.level.clone_from(level);
        }
        if let Some(path) = &self.data {
            config.dataset.path.clone_from(path);
        }
        if let Some(bind) = &self.bind {
            config.server.bind_address.clone_from(bind);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_config_path_reads_environment() {
        let command = Args::command();
        let config = command
            .get_arguments()
            .find(|arg| arg.get_id() == "config")
            .unwrap();

        assert_eq!(
            config.get_env(),
            Some(std::ffi::OsStr::new(sdg_config::CONFIG_PATH_ENV))
        );
    }

    #[test]
    fn test_parse_overrides() {
        let args = Args::parse_from([
            "sdg-dashboard",
            "--data",
            "extract.csv",
            "--bind",
            "0.0.0.0:8080",
            "-l",
            "debug",
        ]);

        let mut config = Config::default();
        args.apply(&mut config);

        assert_eq!(config.dataset.path, PathBuf::from("extract.csv"));
        assert_eq!(config.server.bind_address, "0.0.0.0:8080");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_no_arguments_keep_config() {
        let args = Args::parse_from(["sdg-dashboard"]);
        let mut config = Config::default();
        args.apply(&mut config);

        assert_eq!(config, Config::default());
    }
}
