use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use tracing::debug;

use crate::{config::NeisConfig, error::MealError};

/// Outbound collaborator: fetches the raw XML body for one `YYYYMMDD` date.
#[async_trait]
pub trait MealSource: Send + Sync {
    async fn fetch_xml(&self, ymd: &str) -> Result<String, MealError>;
}

#[derive(Clone)]
pub struct NeisClient {
    client: reqwest::Client,
    config: NeisConfig,
}

impl NeisClient {
    pub fn new(config: NeisConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("schoolmeal/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("build http client")?;
        Ok(Self { client, config })
    }

    fn query(&self, ymd: &str) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("Type", "xml".to_string()),
            ("ATPT_OFCDC_SC_CODE", self.config.office_code.clone()),
            ("SD_SCHUL_CODE", self.config.school_code.clone()),
            ("MLSV_YMD", ymd.to_string()),
        ];
        if let Some(key) = &self.config.api_key {
            params.push(("KEY", key.clone()));
        }
        params
    }
}

#[async_trait]
impl MealSource for NeisClient {
    async fn fetch_xml(&self, ymd: &str) -> Result<String, MealError> {
        let res = self
            .client
            .get(&self.config.base_url)
            .query(&self.query(ymd))
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(MealError::Transport(format!("HTTP error! status: {status}")));
        }

        let body = res.text().await?;
        debug!(%ymd, bytes = body.len(), "neis response received");
        Ok(body)
    }
}
