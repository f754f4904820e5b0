use crate::core::context::Context;
use crate::domain::model::Planet;
use crate::utils::error::Result;
use async_trait::async_trait;

/// 唯讀查詢，retriever 只依賴這部分
#[async_trait]
pub trait PlanetFinder: Send + Sync {
    async fn find_by_id(&self, ctx: &Context, id: &str) -> Result<Planet>;
    async fn find_by_name(&self, ctx: &Context, name: &str) -> Result<Planet>;
    async fn find_all(&self, ctx: &Context) -> Result<Vec<Planet>>;
}

#[async_trait]
pub trait PlanetRepository: PlanetFinder {
    async fn create(&self, ctx: &Context, planet: Planet) -> Result<Planet>;
    /// upsert：不存在的 id 會直接建立
    async fn update(&self, ctx: &Context, planet: Planet) -> Result<Planet>;
    async fn delete(&self, ctx: &Context, id: &str) -> Result<()>;
}

/// 查詢行星在電影中出現的次數；查無資料時回傳 0 而不是錯誤
#[async_trait]
pub trait AppearanceCounter: Send + Sync {
    async fn count_appearances(&self, ctx: &Context, name: &str) -> Result<u32>;
}
