use crate::adapters::http::HtmlFetcher;
use crate::adapters::sources::{extractor_for, CardLimits};
use crate::config::toml_config::TomlConfig;
use crate::core::aggregate::aggregate;
use crate::core::render::DigestRenderer;
use crate::core::{Dispatcher, JobRecord, Pipeline, SourceExtractor, Storage, TransformResult};
use crate::domain::model::{ExtractOutcome, Extraction, LoadOutcome, RunSummary};
use crate::domain::ports::CardBatch;
use crate::utils::error::{DigestError, Result};
use chrono::{DateTime, FixedOffset, Utc};

/// 抓取各求職網站、去重、渲染並寄出摘要
pub struct DigestPipeline<S: Storage, D: Dispatcher> {
    storage: S,
    dispatcher: D,
    settings: TomlConfig,
    fetcher: HtmlFetcher,
    extractors: Vec<Box<dyn SourceExtractor>>,
    generated_at: Option<DateTime<FixedOffset>>,
}

impl<S: Storage, D: Dispatcher> DigestPipeline<S, D> {
    pub fn new(storage: S, dispatcher: D, settings: TomlConfig) -> Result<Self> {
        let fetcher = HtmlFetcher::new(
            settings.request_timeout(),
            &settings.http.user_agent,
            settings.request_delay(),
        )?;

        let limits = CardLimits {
            max_cards: settings.search.max_cards_per_source,
            snippet_max_chars: settings.search.snippet_max_chars,
        };
        let extractors = settings
            .search
            .sources
            .iter()
            .map(|source| extractor_for(*source, &settings.origin(*source), limits))
            .collect();

        Ok(Self {
            storage,
            dispatcher,
            settings,
            fetcher,
            extractors,
            generated_at: None,
        })
    }

    /// 固定摘要時間 (測試用)
    pub fn with_generated_at(mut self, generated_at: DateTime<FixedOffset>) -> Self {
        self.generated_at = Some(generated_at);
        self
    }

    fn now(&self) -> Result<DateTime<FixedOffset>> {
        if let Some(at) = self.generated_at {
            return Ok(at);
        }
        let offset = FixedOffset::east_opt(self.settings.digest.utc_offset_minutes * 60)
            .ok_or_else(|| DigestError::InvalidConfigValueError {
                field: "digest.utc_offset_minutes".to_string(),
                value: self.settings.digest.utc_offset_minutes.to_string(),
                reason: "Offset out of range".to_string(),
            })?;
        Ok(Utc::now().with_timezone(&offset))
    }

    async fn fetch_and_extract(
        &self,
        extractor: &dyn SourceExtractor,
        keyword: &str,
    ) -> Result<CardBatch> {
        let url = extractor.search_url(keyword)?;
        let html = self.fetcher.fetch(&url).await?;
        Ok(extractor.extract(&html))
    }
}

#[async_trait::async_trait]
impl<S: Storage, D: Dispatcher> Pipeline for DigestPipeline<S, D> {
    async fn extract(&self) -> Result<Extraction> {
        let mut records = Vec::new();
        let mut summary = RunSummary::default();
        let multi_keyword = self.settings.is_multi_keyword();

        for keyword in &self.settings.search.keywords {
            for extractor in &self.extractors {
                let source = extractor.source();
                tracing::info!("🔍 Scraping {} for '{}'", source, keyword);

                match self.fetch_and_extract(extractor.as_ref(), keyword).await {
                    Ok(batch) => {
                        let tag = multi_keyword.then_some(keyword.as_str());
                        summary.record(ExtractOutcome::Fetched {
                            source,
                            keyword: keyword.clone(),
                            records: batch.jobs.len(),
                            skipped_cards: batch.skipped,
                        });
                        records.extend(
                            batch
                                .jobs
                                .into_iter()
                                .map(|raw| JobRecord::from_raw(source, tag, raw)),
                        );
                    }
                    Err(e) => {
                        tracing::warn!("❌ {} request error for '{}': {}", source, keyword, e);
                        summary.record(ExtractOutcome::Failed {
                            source,
                            keyword: keyword.clone(),
                            reason: e.to_string(),
                        });
                    }
                }
            }
        }

        Ok(Extraction { records, summary })
    }

    async fn transform(&self, records: Vec<JobRecord>) -> Result<TransformResult> {
        let unique = aggregate(records);

        let renderer = DigestRenderer::new(
            &self.settings.digest.title,
            self.settings.digest.group_by_source,
        );
        let digest = renderer.render(&unique, self.now()?);
        tracing::debug!("Rendered digest ({} bytes)", digest.html.len());

        Ok(TransformResult {
            records: unique,
            digest,
        })
    }

    async fn load(&self, result: TransformResult) -> Result<LoadOutcome> {
        let output_file = &self.settings.digest.output_file;
        let html = result.digest.html.as_bytes();

        // 不論寄送是否成功都先保存最新摘要
        let persisted = match self.storage.write_file(output_file, html).await {
            Ok(()) => {
                tracing::info!("✔ Saved {}", self.storage.display_path(output_file));
                true
            }
            Err(e) => {
                tracing::warn!("⚠️ Could not save {}: {}", output_file, e);
                false
            }
        };

        if let Some(json_output) = &self.settings.digest.json_output {
            match serde_json::to_vec_pretty(&result.records) {
                Ok(payload) => match self.storage.write_file(json_output, &payload).await {
                    Ok(()) => tracing::info!("✔ Saved {}", self.storage.display_path(json_output)),
                    Err(e) => tracing::warn!("⚠️ Could not save {}: {}", json_output, e),
                },
                Err(e) => tracing::warn!("⚠️ Could not serialize jobs for {}: {}", json_output, e),
            }
        }

        let dispatched = self
            .dispatcher
            .dispatch(
                &result.digest.subject,
                &result.digest.html,
                &result.digest.text,
            )
            .await;

        // 第一次寫入失敗時再試一次；仍失敗則不可回報已保存
        let retried = if persisted {
            Ok(())
        } else {
            self.storage.write_file(output_file, html).await
        };

        if let Err(e) = dispatched {
            tracing::error!("❌ EMAIL FAILED: {}", e);
            if let Err(write_err) = retried {
                tracing::error!("❌ Digest could not be saved either: {}", write_err);
            }
            return Err(e);
        }

        if let Err(write_err) = retried {
            tracing::error!("❌ Digest could not be saved: {}", write_err);
            return Err(write_err);
        }
        if !persisted {
            tracing::info!("✔ Saved {}", self.storage.display_path(output_file));
        }

        Ok(LoadOutcome {
            digest_path: self.storage.display_path(output_file),
            delivered: self.dispatcher.delivers(),
        })
    }
}
