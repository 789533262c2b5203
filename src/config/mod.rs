#[cfg(feature = "cli")]
pub mod cli;
pub mod mail;
pub mod toml_config;

use crate::utils::error::Result;
use crate::utils::validation::Validate;
use mail::{MailConfig, ENV_SENDER_NAME};
use toml_config::TomlConfig;

/// 程式啟動時建立一次的完整設定
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub settings: TomlConfig,
    /// `--no-send` 時可為空
    pub mail: Option<MailConfig>,
}

impl AppConfig {
    /// 由設定檔內容與環境變數組出設定；需要寄信時缺少帳號資訊即失敗
    pub fn from_parts<F>(mut settings: TomlConfig, lookup: F, require_mail: bool) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(title) = lookup(ENV_SENDER_NAME).filter(|t| !t.trim().is_empty()) {
            settings.digest.title = title;
        }

        let mail = if require_mail {
            Some(MailConfig::from_lookup(&lookup)?)
        } else {
            None
        };

        let config = Self { settings, mail };
        config.validate()?;
        Ok(config)
    }

    pub fn title(&self) -> &str {
        &self.settings.digest.title
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.settings.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::DigestError;

    #[test]
    fn test_sender_name_overrides_title() {
        let lookup = |key: &str| match key {
            "EMAIL_SENDER_NAME" => Some("Jobs for Anil".to_string()),
            _ => None,
        };
        let config = AppConfig::from_parts(TomlConfig::default(), lookup, false).unwrap();

        assert_eq!(config.title(), "Jobs for Anil");
        assert!(config.mail.is_none());
    }

    #[test]
    fn test_mail_required_when_sending() {
        let err = AppConfig::from_parts(TomlConfig::default(), |_: &str| None, true).unwrap_err();
        assert!(matches!(err, DigestError::MissingConfigError { .. }));
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let mut settings = TomlConfig::default();
        settings.search.sources.clear();
        assert!(AppConfig::from_parts(settings, |_: &str| None, false).is_err());
    }
}
