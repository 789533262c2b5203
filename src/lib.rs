pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliArgs;

pub use adapters::mail::{LogOnlyDispatcher, SmtpDispatcher};
pub use adapters::storage::LocalStorage;
pub use app::pipelines::DigestPipeline;
pub use config::AppConfig;
pub use crate::core::aggregate::{aggregate, group_by_source};
pub use crate::core::classifier::classify_notice;
pub use crate::core::etl::{DigestEngine, RunReport};
pub use domain::model::{JobRecord, NoticeLabel, Source};
pub use utils::error::{DigestError, Result};
