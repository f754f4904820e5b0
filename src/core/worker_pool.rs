// 有上限的 fan-out / fan-in：所有項目連同位置編號放進佇列，
// 由 min(項目數, max_workers) 個 worker 取用，結果依編號寫回，輸出順序與輸入相同。

use crate::utils::error::{Result, StarsError};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;

/// 同時執行的 worker 上限
pub const MAX_WORKERS: usize = 10;

/// 實際啟動的 worker 數量
pub fn worker_count(items: usize, max_workers: usize) -> usize {
    items.min(max_workers.max(1))
}

/// 以最多 `max_workers` 個 worker 處理 `items`，回傳順序與輸入相同
pub async fn run_bounded<T, R, F, Fut>(items: Vec<T>, max_workers: usize, handler: F) -> Result<Vec<R>>
where
    T: Send + 'static,
    R: Send + 'static,
    F: Fn(T) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
{
    let total = items.len();
    if total == 0 {
        return Ok(Vec::new());
    }

    let workers = worker_count(total, max_workers);
    tracing::debug!("Dispatching {} items to {} workers", total, workers);

    // 先把所有工作放進佇列再關閉，worker 取完即結束
    let (tx, rx) = mpsc::channel::<(usize, T)>(total);
    for entry in items.into_iter().enumerate() {
        tx.send(entry).await.map_err(|_| StarsError::Internal {
            message: "work queue closed before dispatch finished".to_string(),
        })?;
    }
    drop(tx);

    let queue = Arc::new(Mutex::new(rx));
    let handler = Arc::new(handler);
    let mut set = JoinSet::new();

    for _ in 0..workers {
        let queue = Arc::clone(&queue);
        let handler = Arc::clone(&handler);
        set.spawn(async move {
            let mut done = Vec::new();
            loop {
                // 只在取工作時持有鎖
                let next = queue.lock().await.recv().await;
                let Some((slot, item)) = next else {
                    break;
                };
                done.push((slot, (*handler)(item).await));
            }
            done
        });
    }

    let mut slots: Vec<Option<R>> = (0..total).map(|_| None).collect();
    while let Some(joined) = set.join_next().await {
        let done = joined.map_err(|e| StarsError::Internal {
            message: format!("enrichment worker failed: {}", e),
        })?;
        for (slot, result) in done {
            slots[slot] = Some(result);
        }
    }

    slots
        .into_iter()
        .enumerate()
        .map(|(slot, result)| {
            result.ok_or_else(|| StarsError::Internal {
                message: format!("work item {} was never processed", slot),
            })
        })
        .collect()
}
