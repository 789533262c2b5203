use crate::config::toml_config::TomlConfig;
use crate::config::AppConfig;
use crate::utils::error::Result;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "job-digest")]
#[command(about = "Scrape job boards and email an HTML digest of new listings")]
pub struct CliArgs {
    /// Path to an optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Search keyword; repeat to search several keywords (overrides the config file)
    #[arg(short = 'k', long = "keyword")]
    pub keywords: Vec<String>,

    /// Directory where the digest files are written
    #[arg(long)]
    pub output_dir: Option<String>,

    /// Scrape and save the digest, but do not send the email
    #[arg(long)]
    pub no_send: bool,

    /// Show what would be fetched without touching the network
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,
}

impl CliArgs {
    /// 只有真的要寄信時才要求帳號資訊
    pub fn requires_mail(&self) -> bool {
        !self.no_send && !self.dry_run
    }

    pub fn load_config(&self) -> Result<AppConfig> {
        let mut settings = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        // 應用命令列覆蓋設定
        if !self.keywords.is_empty() {
            settings.search.keywords = self.keywords.clone();
        }
        if let Some(dir) = &self.output_dir {
            settings.digest.output_dir = dir.clone();
        }

        AppConfig::from_parts(settings, |key| std::env::var(key).ok(), self.requires_mail())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_repeated_keywords() {
        let args = CliArgs::parse_from([
            "job-digest",
            "-k",
            "rust",
            "--keyword",
            "java angular",
            "--no-send",
        ]);

        assert_eq!(args.keywords, vec!["rust".to_string(), "java angular".to_string()]);
        assert!(args.no_send);
        assert!(!args.requires_mail());
    }

    #[test]
    fn test_keyword_override_applies() {
        let args = CliArgs::parse_from(["job-digest", "--dry-run", "-k", "golang", "--output-dir", "out"]);
        let config = args.load_config().unwrap();

        assert_eq!(config.settings.search.keywords, vec!["golang".to_string()]);
        assert_eq!(config.settings.digest.output_dir, "out");
        assert!(config.mail.is_none());
    }
}
