// src/config/validate.rs

use anyhow::{Result, bail};

use crate::config::model::ConfigFile;

/// Sanity-check a loaded configuration.
pub fn validate_config(config: &ConfigFile) -> Result<()> {
    if config.log.dir.as_os_str().is_empty() {
        bail!("log.dir must not be empty");
    }

    if let Some(nice) = config.build.nice {
        if !(-20..=19).contains(&nice) {
            bail!("build.nice must be within -20..=19, got {nice}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::validate_config;
    use crate::config::model::ConfigFile;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&ConfigFile::default()).is_ok());
    }

    #[test]
    fn out_of_range_nice_is_rejected() {
        let mut config = ConfigFile::default();
        config.build.nice = Some(25);
        assert!(validate_config(&config).is_err());

        config.build.nice = Some(19);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn empty_log_dir_is_rejected() {
        let mut config = ConfigFile::default();
        config.log.dir = std::path::PathBuf::new();
        assert!(validate_config(&config).is_err());
    }
}
