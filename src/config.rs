use anyhow::Context;
use serde::Deserialize;
use time::UtcOffset;

pub const DEFAULT_NEIS_BASE_URL: &str = "https://open.neis.go.kr/hub/mealServiceDietInfo";
pub const DEFAULT_OFFICE_CODE: &str = "J10";
pub const DEFAULT_SCHOOL_CODE: &str = "7531100";

#[derive(Debug, Clone, Deserialize)]
pub struct NeisConfig {
    pub base_url: String,
    pub office_code: String,
    pub school_code: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for NeisConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_NEIS_BASE_URL.into(),
            office_code: DEFAULT_OFFICE_CODE.into(),
            school_code: DEFAULT_SCHOOL_CODE.into(),
            api_key: None,
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Offset used to decide what "today" is when no date is requested.
    pub utc_offset: UtcOffset,
    pub neis: NeisConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset keys fall back to defaults.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let neis = NeisConfig {
            base_url: var("NEIS_API_BASE_URL").unwrap_or_else(|| DEFAULT_NEIS_BASE_URL.into()),
            office_code: var("NEIS_OFFICE_CODE").unwrap_or_else(|| DEFAULT_OFFICE_CODE.into()),
            school_code: var("NEIS_SCHOOL_CODE").unwrap_or_else(|| DEFAULT_SCHOOL_CODE.into()),
            api_key: var("NEIS_API_KEY").filter(|s| !s.is_empty()),
            timeout_secs: var("NEIS_TIMEOUT_SECS")
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(10),
        };

        let offset_hours = var("APP_UTC_OFFSET_HOURS")
            .and_then(|v| v.parse::<i8>().ok())
            .unwrap_or(9);
        let utc_offset = UtcOffset::from_hms(offset_hours, 0, 0)
            .context("APP_UTC_OFFSET_HOURS out of range")?;

        Ok(Self {
            host: var("APP_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: var("APP_PORT")
                .unwrap_or_else(|| "8080".into())
                .parse()
                .context("APP_PORT must be a port number")?,
            utc_offset,
            neis,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8080,
            utc_offset: UtcOffset::UTC,
            neis: NeisConfig::default(),
        }
    }
}
