use config::{Config, ConfigError, File, FileFormat};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load<'a, T: Deserialize<'a>>(file_path: &Path) -> Result<T, ConfigError> {
        let Some(ext) = file_path.extension() else {
            return Err(ConfigError::NotFound(format!(
                "Could not find file extension on path {file_path:?}"
            )));
        };
        let file_format = match ext.to_str() {
            Some("yaml") => Ok(FileFormat::Yaml),
            Some("yml") => Ok(FileFormat::Yaml),
            Some("json") => Ok(FileFormat::Json),
            Some("toml") => Ok(FileFormat::Toml),
            Some("ron") => Ok(FileFormat::Ron),
            _ => Err(ConfigError::NotFound(format!(
                "File format not supported. File needs to end with .yaml, .json, .toml or .ron. {file_path:?}"
            ))),
        }?;

        let config_str = fs::read_to_string(file_path)
            .map_err(|err| ConfigError::Foreign(Box::new(err)))?;

        // this interprets anything after a $ (within certain rules) as an environment variable
        // and it will look in the environment to find it.
        // Therefore all $ symbols must be escaped with a backslash: \$
        let config_str_with_env_vars = shellexpand::env(&config_str).map_err(|err| {
            ConfigError::Message(format!(
                "Shell expansion of config file failed. Environment variables not found? {err}"
            ))
        })?;

        let config = Config::builder()
            .add_source(File::from_str(&config_str_with_env_vars, file_format))
            .build()?;

        config.try_deserialize()
    }
}
