use crate::core::Pipeline;
use crate::domain::model::RunSummary;
use crate::utils::error::Result;

/// 一次執行的結果
#[derive(Debug, Clone)]
pub struct RunReport {
    pub raw_records: usize,
    pub unique_records: usize,
    pub summary: RunSummary,
    pub digest_path: String,
    pub delivered: bool,
}

pub struct DigestEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> DigestEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<RunReport> {
        tracing::info!("🚀 Starting job digest run");

        // Extract
        let extraction = self.pipeline.extract().await?;
        extraction.summary.log();
        let raw_records = extraction.records.len();
        tracing::info!(
            "✔ Total raw jobs: {} ({} failed fetches, {} skipped cards)",
            raw_records,
            extraction.summary.failures(),
            extraction.summary.skipped_cards()
        );

        // Transform
        let transformed = self.pipeline.transform(extraction.records).await?;
        let unique_records = transformed.records.len();
        tracing::info!("✔ Unique jobs: {}", unique_records);

        // Load
        let outcome = self.pipeline.load(transformed).await?;
        tracing::info!("📁 Digest saved to: {}", outcome.digest_path);

        Ok(RunReport {
            raw_records,
            unique_records,
            summary: extraction.summary,
            digest_path: outcome.digest_path,
            delivered: outcome.delivered,
        })
    }
}
