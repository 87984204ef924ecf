use crate::config::AppConfig;
use crate::neis::{MealSource, NeisClient};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub meals: Arc<dyn MealSource>,
}

impl AppState {
    pub fn init(config: AppConfig) -> anyhow::Result<Self> {
        let meals = Arc::new(NeisClient::new(config.neis.clone())?) as Arc<dyn MealSource>;
        Ok(Self::from_parts(Arc::new(config), meals))
    }

    pub fn from_parts(config: Arc<AppConfig>, meals: Arc<dyn MealSource>) -> Self {
        Self { config, meals }
    }

    /// State backed by a canned upstream body.
    #[cfg(test)]
    pub fn fake(xml: &str) -> Self {
        Self::with_fake_source(Some(xml.to_string()))
    }

    /// State whose upstream always fails at the transport level.
    #[cfg(test)]
    pub fn fake_offline() -> Self {
        Self::with_fake_source(None)
    }

    #[cfg(test)]
    fn with_fake_source(body: Option<String>) -> Self {
        use crate::error::MealError;
        use async_trait::async_trait;

        struct FakeSource(Option<String>);
        #[async_trait]
        impl MealSource for FakeSource {
            async fn fetch_xml(&self, _ymd: &str) -> Result<String, MealError> {
                self.0
                    .clone()
                    .ok_or_else(|| MealError::Transport("HTTP error! status: 503".into()))
            }
        }

        let meals = Arc::new(FakeSource(body)) as Arc<dyn MealSource>;
        Self::from_parts(Arc::new(AppConfig::default()), meals)
    }
}
