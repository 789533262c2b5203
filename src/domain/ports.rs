use crate::domain::model::{Extraction, JobRecord, LoadOutcome, RawJob, Source, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    /// 寫入後的完整路徑 (用於日誌與回報)
    fn display_path(&self, path: &str) -> String;
}

/// 寄送渲染完成的摘要
pub trait Dispatcher: Send + Sync {
    fn dispatch(
        &self,
        subject: &str,
        html_body: &str,
        text_body: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    /// 是否實際送出 (用於 --no-send)
    fn delivers(&self) -> bool {
        true
    }
}

/// 單一求職網站的「抓取並擷取」能力
pub trait SourceExtractor: Send + Sync {
    fn source(&self) -> Source;
    /// 以關鍵字組出搜尋頁網址
    fn search_url(&self, keyword: &str) -> Result<String>;
    /// 從搜尋頁 HTML 擷取卡片；回傳成功卡片與被略過的卡片數
    fn extract(&self, html: &str) -> CardBatch;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardBatch {
    pub jobs: Vec<RawJob>,
    pub skipped: usize,
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Extraction>;
    async fn transform(&self, records: Vec<JobRecord>) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<LoadOutcome>;
}
