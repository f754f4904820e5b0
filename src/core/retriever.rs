use crate::core::context::Context;
use crate::core::worker_pool::{self, MAX_WORKERS};
use crate::domain::model::Planet;
use crate::domain::ports::{AppearanceCounter, PlanetFinder};
use crate::utils::error::Result;
use std::sync::Arc;

/// 從 store 讀取行星，並以 counter 補上電影出現次數。
///
/// 本身沒有狀態，可以 clone 後在多個請求間共用。
#[derive(Clone)]
pub struct PlanetRetriever {
    finder: Arc<dyn PlanetFinder>,
    counter: Arc<dyn AppearanceCounter>,
    max_workers: usize,
}

impl PlanetRetriever {
    pub fn new(finder: Arc<dyn PlanetFinder>, counter: Arc<dyn AppearanceCounter>) -> Self {
        Self {
            finder,
            counter,
            max_workers: MAX_WORKERS,
        }
    }

    /// 只能調低並行數，上限固定為 `MAX_WORKERS`
    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers.clamp(1, MAX_WORKERS);
        self
    }

    pub fn max_workers(&self) -> usize {
        self.max_workers
    }

    /// 以 id 查詢；counter 失敗時整個操作失敗
    pub async fn retrieve_by_id(&self, ctx: &Context, id: &str) -> Result<Planet> {
        let planet = self.finder.find_by_id(ctx, id).await?;
        fill_appearances(ctx, self.counter.as_ref(), planet).await
    }

    /// 以名稱查詢；counter 失敗時整個操作失敗
    pub async fn retrieve_by_name(&self, ctx: &Context, name: &str) -> Result<Planet> {
        let planet = self.finder.find_by_name(ctx, name).await?;
        fill_appearances(ctx, self.counter.as_ref(), planet).await
    }

    /// 取得所有行星並以最多 `max_workers` 個 worker 並行補上出現次數。
    ///
    /// 單筆 counter 失敗只會讓該筆保留預設值 0，不會讓整批失敗；
    /// 只有 store 讀取失敗才會回傳錯誤。回傳順序與 `find_all` 相同。
    pub async fn retrieve_all(&self, ctx: &Context) -> Result<Vec<Planet>> {
        let planets = self.finder.find_all(ctx).await?;
        if planets.is_empty() {
            return Ok(planets);
        }

        let total = planets.len();
        let counter = Arc::clone(&self.counter);
        let worker_ctx = ctx.clone();

        let enriched = worker_pool::run_bounded(planets, self.max_workers, move |mut planet: Planet| {
            let counter = Arc::clone(&counter);
            let ctx = worker_ctx.clone();
            async move {
                let looked_up = lookup_count(&ctx, counter.as_ref(), &planet.name).await;
                match looked_up {
                    Ok(count) => planet.appearances = count,
                    Err(e) => {
                        tracing::warn!(
                            "⚠️ Could not count appearances for '{}', keeping default: {}",
                            planet.name,
                            e
                        );
                    }
                }
                planet
            }
        })
        .await?;

        tracing::debug!("Enriched {} planets", total);
        Ok(enriched)
    }
}

async fn fill_appearances(
    ctx: &Context,
    counter: &dyn AppearanceCounter,
    mut planet: Planet,
) -> Result<Planet> {
    planet.appearances = lookup_count(ctx, counter, &planet.name).await?;
    Ok(planet)
}

async fn lookup_count(ctx: &Context, counter: &dyn AppearanceCounter, name: &str) -> Result<u32> {
    ctx.run(counter.count_appearances(ctx, name)).await
}
