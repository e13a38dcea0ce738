// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{DevserveError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::DevserveError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.default, raw.service))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    ensure_has_services(cfg)?;
    validate_commands(cfg)?;
    validate_kill_names(cfg)?;
    Ok(())
}

fn ensure_has_services(cfg: &RawConfigFile) -> Result<()> {
    if cfg.service.is_empty() {
        return Err(DevserveError::Config(
            "config must contain at least one [service.<name>] section".to_string(),
        ));
    }
    Ok(())
}

fn validate_commands(cfg: &RawConfigFile) -> Result<()> {
    for (name, service) in cfg.service.iter() {
        if service.cmd.is_empty() {
            return Err(DevserveError::Config(format!(
                "service '{name}' has an empty `cmd`; expected [program, args...]"
            )));
        }
        if service.cmd[0].trim().is_empty() {
            return Err(DevserveError::Config(format!(
                "service '{name}' has an empty program in `cmd[0]`"
            )));
        }
    }
    Ok(())
}

fn validate_kill_names(cfg: &RawConfigFile) -> Result<()> {
    for (name, service) in cfg.service.iter() {
        if let Some(ref kill_name) = service.kill_name {
            if kill_name.trim().is_empty() {
                return Err(DevserveError::Config(format!(
                    "service '{name}' has an empty `kill_name`; omit the field to \
                     derive it from the program instead"
                )));
            }
        }
    }
    Ok(())
}
