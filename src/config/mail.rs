use crate::utils::error::Result;
use crate::utils::validation::validate_required_field;
use std::fmt;

pub const ENV_USER: &str = "GMAIL_USER";
pub const ENV_APP_PASSWORD: &str = "GMAIL_APP_PASSWORD";
pub const ENV_RECIPIENT: &str = "RECIPIENT_EMAIL";
pub const ENV_SENDER_NAME: &str = "EMAIL_SENDER_NAME";

/// 寄件帳號與收件人，從環境變數讀取
#[derive(Clone)]
pub struct MailConfig {
    pub username: String,
    pub app_password: String,
    pub recipient: String,
}

impl MailConfig {
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            username: validate_required_field(ENV_USER, lookup(ENV_USER))?,
            app_password: validate_required_field(ENV_APP_PASSWORD, lookup(ENV_APP_PASSWORD))?,
            recipient: validate_required_field(ENV_RECIPIENT, lookup(ENV_RECIPIENT))?,
        })
    }
}

impl fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailConfig")
            .field("username", &self.username)
            .field("app_password", &"***")
            .field("recipient", &self.recipient)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::DigestError;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_reads_all_required_values() {
        let config = MailConfig::from_lookup(lookup_from(&[
            (ENV_USER, "sender@gmail.com"),
            (ENV_APP_PASSWORD, "abcd efgh"),
            (ENV_RECIPIENT, "me@example.com"),
        ]))
        .unwrap();

        assert_eq!(config.username, "sender@gmail.com");
        assert_eq!(config.recipient, "me@example.com");
    }

    #[test]
    fn test_missing_value_is_config_error() {
        let err = MailConfig::from_lookup(lookup_from(&[
            (ENV_USER, "sender@gmail.com"),
            (ENV_RECIPIENT, "me@example.com"),
        ]))
        .unwrap_err();

        match err {
            DigestError::MissingConfigError { field } => assert_eq!(field, ENV_APP_PASSWORD),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_debug_hides_password() {
        let config = MailConfig::from_lookup(lookup_from(&[
            (ENV_USER, "sender@gmail.com"),
            (ENV_APP_PASSWORD, "super-secret"),
            (ENV_RECIPIENT, "me@example.com"),
        ]))
        .unwrap();

        assert!(!format!("{:?}", config).contains("super-secret"));
    }
}
