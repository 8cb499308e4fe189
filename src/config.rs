use serde::Deserialize;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // Server
    pub host: String,
    pub port: u16,
    pub environment: String,

    // Deck image
    pub image_fetch_timeout_secs: u64,
    pub max_deck_image_cards: usize,
    pub deck_image_font_path: Option<String>,
    pub image_user_agent: String,

    // CORS
    pub cors_allowed_origins: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()?,
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),

            image_fetch_timeout_secs: env::var("IMAGE_FETCH_TIMEOUT_SECS")
                .unwrap_or_else(|_| "15".to_string())
                .parse()?,
            max_deck_image_cards: env::var("MAX_DECK_IMAGE_CARDS")
                .unwrap_or_else(|_| "60".to_string())
                .parse()?,
            deck_image_font_path: env::var("DECK_IMAGE_FONT_PATH")
                .ok()
                .filter(|path| !path.trim().is_empty()),
            image_user_agent: env::var("IMAGE_USER_AGENT")
                .unwrap_or_else(|_| format!("opdeck-backend/{}", env!("CARGO_PKG_VERSION"))),

            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|_| "*".to_string()),
        })
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.host.trim().is_empty() {
            anyhow::bail!("HOST is empty");
        }
        if self.max_deck_image_cards == 0 {
            anyhow::bail!("MAX_DECK_IMAGE_CARDS must be > 0");
        }

        if self.image_fetch_timeout_secs == 0 {
            tracing::warn!("IMAGE_FETCH_TIMEOUT_SECS is 0; image downloads are unbounded");
        }
        if let Some(path) = &self.deck_image_font_path {
            if !std::path::Path::new(path).is_file() {
                anyhow::bail!("DECK_IMAGE_FONT_PATH {} is not a file", path);
            }
        }
        if self.cors_allowed_origins.trim().is_empty() {
            tracing::warn!("CORS_ALLOWED_ORIGINS is empty; requests may be blocked");
        }

        Ok(())
    }

    /// Upper bound for the whole image fan-out of one render, `None` when disabled.
    pub fn image_fetch_timeout(&self) -> Option<Duration> {
        match self.image_fetch_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development" || self.environment == "test"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            environment: "test".to_string(),
            image_fetch_timeout_secs: 15,
            max_deck_image_cards: 60,
            deck_image_font_path: None,
            image_user_agent: "opdeck-backend/test".to_string(),
            cors_allowed_origins: "*".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_timeout_disables_fetch_bound() {
        let config = Config {
            image_fetch_timeout_secs: 0,
            ..Config::default()
        };
        assert!(config.image_fetch_timeout().is_none());
    }

    #[test]
    fn timeout_converts_to_duration() {
        let config = Config::default();
        assert_eq!(config.image_fetch_timeout(), Some(Duration::from_secs(15)));
    }

    #[test]
    fn validate_rejects_zero_card_limit() {
        let config = Config {
            max_deck_image_cards: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_missing_font_file() {
        let config = Config {
            deck_image_font_path: Some("/nonexistent/font.ttf".to_string()),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
