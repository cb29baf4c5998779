use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    Missing(&'static str),
    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Worker settings read from the environment (after `.env` is loaded).
#[derive(Debug, Clone, PartialEq)]
pub struct WorkerConfig {
    pub database_url: String,
    /// UTC time of day for the scheduled batch run.
    pub schedule_hour: u32,
    pub schedule_minute: u32,
}

impl WorkerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let schedule_hour = parse_bounded(&lookup, "RISK_SCHEDULE_HOUR", 6, 23)?;
        let schedule_minute = parse_bounded(&lookup, "RISK_SCHEDULE_MINUTE", 0, 59)?;

        Ok(Self {
            database_url,
            schedule_hour,
            schedule_minute,
        })
    }
}

fn parse_bounded(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: u32,
    max: u32,
) -> Result<u32, ConfigError> {
    let Some(raw) = lookup(name) else {
        return Ok(default);
    };
    match raw.trim().parse::<u32>() {
        Ok(v) if v <= max => Ok(v),
        _ => Err(ConfigError::Invalid { name, value: raw }),
    }
}
