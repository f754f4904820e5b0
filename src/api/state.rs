use crate::core::context::Context;
use crate::core::retriever::PlanetRetriever;
use crate::domain::ports::PlanetRepository;
use std::sync::Arc;
use std::time::Duration;

/// HTTP handler 共用的狀態
#[derive(Clone)]
pub struct AppState {
    pub retriever: PlanetRetriever,
    pub repository: Arc<dyn PlanetRepository>,
    pub request_timeout: Duration,
    pub version: String,
    pub started_at: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    pub fn new(
        retriever: PlanetRetriever,
        repository: Arc<dyn PlanetRepository>,
        request_timeout: Duration,
    ) -> Self {
        Self {
            retriever,
            repository,
            request_timeout,
            version: env!("CARGO_PKG_VERSION").to_string(),
            started_at: chrono::Utc::now(),
        }
    }

    /// 每個請求各自帶 deadline 的上下文
    pub fn request_context(&self) -> Context {
        Context::background().with_timeout(self.request_timeout)
    }
}
