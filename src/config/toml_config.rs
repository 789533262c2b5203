use crate::domain::model::Source;
use crate::utils::error::{DigestError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_positive_number, validate_range,
    validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_TITLE: &str = "Daily Job Digest";
pub const DEFAULT_OUTPUT_FILE: &str = "last_email.html";
pub const DEFAULT_KEYWORD: &str = "Java Angular Full Stack";
pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = 330;
pub const DEFAULT_MAX_CARDS: usize = 10;
pub const DEFAULT_SNIPPET_CHARS: usize = 300;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 15;
pub const DEFAULT_REQUEST_DELAY_MS: u64 = 1200;
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";
pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// 執行設定；所有區段皆有預設值，因此設定檔可省略
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub digest: DigestSettings,
    pub search: SearchSettings,
    pub http: HttpSettings,
    pub smtp: SmtpSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DigestSettings {
    pub title: String,
    pub output_dir: String,
    pub output_file: String,
    pub json_output: Option<String>,
    pub group_by_source: bool,
    pub utc_offset_minutes: i32,
}

impl Default for DigestSettings {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            output_dir: ".".to_string(),
            output_file: DEFAULT_OUTPUT_FILE.to_string(),
            json_output: None,
            group_by_source: true,
            utc_offset_minutes: DEFAULT_UTC_OFFSET_MINUTES,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    pub keywords: Vec<String>,
    pub sources: Vec<Source>,
    pub max_cards_per_source: usize,
    pub snippet_max_chars: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            keywords: vec![DEFAULT_KEYWORD.to_string()],
            sources: vec![Source::Indeed, Source::Internshala],
            max_cards_per_source: DEFAULT_MAX_CARDS,
            snippet_max_chars: DEFAULT_SNIPPET_CHARS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    pub timeout_seconds: u64,
    pub request_delay_ms: u64,
    pub user_agent: String,
    /// 覆寫各來源的 origin，例如 indeed = "http://127.0.0.1:8080"
    pub origins: HashMap<String, String>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            request_delay_ms: DEFAULT_REQUEST_DELAY_MS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            origins: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
}

impl Default for SmtpSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_SMTP_HOST.to_string(),
            port: DEFAULT_SMTP_PORT,
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DigestError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DigestError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${RECIPIENT_EMAIL})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DigestError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 取得來源的 origin，未覆寫時使用網站預設值
    pub fn origin(&self, source: Source) -> String {
        self.http
            .origins
            .get(source.key())
            .map(|o| o.trim_end_matches('/').to_string())
            .unwrap_or_else(|| source.default_origin().to_string())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_seconds)
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.http.request_delay_ms)
    }

    /// 多關鍵字模式才在記錄上標註關鍵字
    pub fn is_multi_keyword(&self) -> bool {
        self.search.keywords.len() > 1
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("digest.title", &self.digest.title)?;
        validate_path("digest.output_dir", &self.digest.output_dir)?;
        validate_path("digest.output_file", &self.digest.output_file)?;
        if let Some(json_output) = &self.digest.json_output {
            validate_path("digest.json_output", json_output)?;
        }
        validate_range(
            "digest.utc_offset_minutes",
            self.digest.utc_offset_minutes,
            -12 * 60,
            14 * 60,
        )?;

        validate_positive_number("search.keywords", self.search.keywords.len(), 1)?;
        for keyword in &self.search.keywords {
            validate_non_empty_string("search.keywords", keyword)?;
        }
        validate_positive_number("search.sources", self.search.sources.len(), 1)?;
        validate_positive_number(
            "search.max_cards_per_source",
            self.search.max_cards_per_source,
            1,
        )?;
        validate_range("search.snippet_max_chars", self.search.snippet_max_chars, 200, 400)?;

        validate_range("http.timeout_seconds", self.http.timeout_seconds, 1, 120)?;
        validate_non_empty_string("http.user_agent", &self.http.user_agent)?;
        for (key, origin) in &self.http.origins {
            key.parse::<Source>()
                .map_err(|reason| DigestError::InvalidConfigValueError {
                    field: "http.origins".to_string(),
                    value: key.clone(),
                    reason,
                })?;
            validate_url(&format!("http.origins.{}", key), origin)?;
        }

        validate_non_empty_string("smtp.host", &self.smtp.host)?;
        validate_positive_number("smtp.port", self.smtp.port as usize, 1)?;

        Ok(())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_without_file() {
        let config = TomlConfig::from_toml_str("").unwrap();

        assert_eq!(config.digest.title, DEFAULT_TITLE);
        assert_eq!(config.digest.output_file, "last_email.html");
        assert_eq!(config.search.keywords, vec![DEFAULT_KEYWORD.to_string()]);
        assert_eq!(config.search.sources, vec![Source::Indeed, Source::Internshala]);
        assert_eq!(config.request_timeout(), Duration::from_secs(15));
        assert_eq!(config.smtp.port, 587);
        assert!(!config.is_multi_keyword());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[digest]
title = "Rust Jobs"
output_file = "digest.html"
json_output = "jobs.json"
group_by_source = false

[search]
keywords = ["rust", "tokio"]
sources = ["indeed", "timesjobs"]
max_cards_per_source = 5
snippet_max_chars = 250

[http]
timeout_seconds = 10
request_delay_ms = 0

[http.origins]
indeed = "http://127.0.0.1:9000/"

[smtp]
host = "smtp.example.com"
port = 2525
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.digest.title, "Rust Jobs");
        assert_eq!(config.digest.json_output.as_deref(), Some("jobs.json"));
        assert!(!config.digest.group_by_source);
        assert_eq!(config.search.sources, vec![Source::Indeed, Source::TimesJobs]);
        assert!(config.is_multi_keyword());
        assert_eq!(config.origin(Source::Indeed), "http://127.0.0.1:9000");
        assert_eq!(config.origin(Source::TimesJobs), "https://www.timesjobs.com");
        assert_eq!(config.request_delay(), Duration::ZERO);
        assert_eq!(config.smtp.host, "smtp.example.com");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("JOB_DIGEST_TEST_TITLE", "Env Title");

        let toml_content = r#"
[digest]
title = "${JOB_DIGEST_TEST_TITLE}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.digest.title, "Env Title");

        std::env::remove_var("JOB_DIGEST_TEST_TITLE");
    }

    #[test]
    fn test_unknown_source_is_rejected() {
        let toml_content = r#"
[search]
sources = ["linkedin"]
"#;
        assert!(TomlConfig::from_toml_str(toml_content).is_err());
    }

    #[test]
    fn test_config_validation() {
        let mut config = TomlConfig::default();
        config.search.snippet_max_chars = 1000;
        assert!(config.validate().is_err());

        let mut config = TomlConfig::default();
        config.search.keywords = vec!["  ".to_string()];
        assert!(config.validate().is_err());

        let mut config = TomlConfig::default();
        config
            .http
            .origins
            .insert("indeed".to_string(), "not a url".to_string());
        assert!(config.validate().is_err());

        let mut config = TomlConfig::default();
        config
            .http
            .origins
            .insert("monster".to_string(), "https://monster.com".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[search]
keywords = ["golang"]
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.search.keywords, vec!["golang".to_string()]);
    }
}
