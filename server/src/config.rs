use anyhow::{Context, Result, bail};
use platform_storage::StorageSettings;
use products_hr::DEFAULT_PAGE_SIZE;

use crate::seed::DEFAULT_SEED_URL;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub storage: StorageSettings,
    pub seed_url: String,
    pub cors_allowed_origins: Vec<String>,
    pub page_size: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: StorageSettings::new("staffboard-state.json"),
            seed_url: DEFAULT_SEED_URL.to_string(),
            cors_allowed_origins: vec!["http://localhost:5173".to_string()],
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let storage = StorageSettings::from_env();

        let seed_url =
            std::env::var("SEED_URL").unwrap_or_else(|_| DEFAULT_SEED_URL.to_string());

        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .filter_map(|raw| {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            })
            .collect::<Vec<_>>();

        let page_size = match std::env::var("PAGE_SIZE") {
            Ok(raw) => raw.trim().parse::<usize>().context("invalid PAGE_SIZE")?,
            Err(_) => DEFAULT_PAGE_SIZE,
        };
        if page_size == 0 {
            bail!("PAGE_SIZE must be at least 1");
        }

        Ok(Self {
            storage,
            seed_url,
            cors_allowed_origins,
            page_size,
        })
    }
}
