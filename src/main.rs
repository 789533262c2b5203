use clap::Parser;
use job_digest::adapters::sources::{extractor_for, CardLimits};
use job_digest::domain::ports::Dispatcher;
use job_digest::utils::error::{DigestError, ErrorSeverity};
use job_digest::utils::logger;
use job_digest::{
    AppConfig, CliArgs, DigestEngine, DigestPipeline, LocalStorage, LogOnlyDispatcher, RunReport,
    SmtpDispatcher,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    // 初始化日誌
    if args.log_json {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting job-digest");
    if args.verbose {
        tracing::debug!("CLI args: {:?}", args);
    }

    // 設定錯誤必須在任何網路活動之前中止
    let config = match args.load_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(exit_code(&e).max(1));
        }
    };

    tracing::info!("✅ Configuration loaded and validated successfully");
    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No actual requests will be made");
        perform_dry_run(&config)?;
        return Ok(());
    }

    let storage = LocalStorage::new(config.settings.digest.output_dir.clone());
    let result = match config.mail.clone() {
        Some(mail) => {
            let dispatcher =
                SmtpDispatcher::new(mail, config.settings.smtp.clone(), config.title().to_string());
            run(storage, dispatcher, &config).await
        }
        None => run(storage, LogOnlyDispatcher, &config).await,
    };

    match result {
        Ok(report) => {
            tracing::info!(
                "✅ Digest completed: {} unique of {} raw jobs",
                report.unique_records,
                report.raw_records
            );
            println!("✅ {} unique jobs", report.unique_records);
            println!("📁 Digest saved to: {}", report.digest_path);
            if report.delivered {
                println!("📨 Email sent");
            }
        }
        Err(e) => {
            // 記錄詳細錯誤信息
            tracing::error!(
                "❌ Job digest failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let code = exit_code(&e);
            if code > 0 {
                std::process::exit(code);
            }
        }
    }

    Ok(())
}

async fn run<D: Dispatcher>(
    storage: LocalStorage,
    dispatcher: D,
    config: &AppConfig,
) -> job_digest::Result<RunReport> {
    let pipeline = DigestPipeline::new(storage, dispatcher, config.settings.clone())?;
    DigestEngine::new(pipeline).run().await
}

/// 根據錯誤嚴重程度決定退出碼
fn exit_code(e: &DigestError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn display_config_summary(config: &AppConfig, args: &CliArgs) {
    let settings = &config.settings;
    println!("📋 Configuration Summary:");
    println!("  Title: {}", config.title());
    println!("  Keywords: {}", settings.search.keywords.join(", "));
    println!(
        "  Sources: {}",
        settings
            .search
            .sources
            .iter()
            .map(|s| s.label())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!(
        "  Output: {}/{}",
        settings.digest.output_dir, settings.digest.output_file
    );
    match &config.mail {
        Some(mail) => println!("  Recipient: {}", mail.recipient),
        None => println!("  Email: disabled"),
    }

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

fn perform_dry_run(config: &AppConfig) -> anyhow::Result<()> {
    let settings = &config.settings;
    let limits = CardLimits {
        max_cards: settings.search.max_cards_per_source,
        snippet_max_chars: settings.search.snippet_max_chars,
    };

    println!("📡 Planned requests:");
    for keyword in &settings.search.keywords {
        for source in &settings.search.sources {
            let extractor = extractor_for(*source, &settings.origin(*source), limits);
            println!("  {} [{}]: {}", source, keyword, extractor.search_url(keyword)?);
        }
    }

    println!();
    println!(
        "⏱️ Timeout {}s per request, {}ms delay between requests",
        settings.http.timeout_seconds, settings.http.request_delay_ms
    );
    println!(
        "📨 SMTP: {}:{} (STARTTLS)",
        settings.smtp.host, settings.smtp.port
    );
    println!();
    println!("✅ Dry run analysis complete.");

    Ok(())
}
