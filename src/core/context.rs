use crate::utils::error::{Result, StarsError};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;

/// 每個請求的執行上下文：可選的 deadline 加上共享的取消旗標。
///
/// `Clone` 出來的上下文與衍生的子上下文共用同一個取消旗標，
/// 子上下文的 deadline 取兩者中較早的那個。
#[derive(Debug, Clone)]
pub struct Context {
    deadline: Option<Instant>,
    cancel_tx: Arc<watch::Sender<bool>>,
    cancel_rx: watch::Receiver<bool>,
}

/// 觸發取消用的 handle
#[derive(Debug, Clone)]
pub struct CancelHandle {
    cancel_tx: Arc<watch::Sender<bool>>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.cancel_tx.send_replace(true);
    }
}

impl Context {
    /// 沒有 deadline 的根上下文
    pub fn background() -> Self {
        let (cancel_tx, cancel_rx) = watch::channel(false);
        Self {
            deadline: None,
            cancel_tx: Arc::new(cancel_tx),
            cancel_rx,
        }
    }

    pub fn with_timeout(&self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn with_deadline(&self, deadline: Instant) -> Self {
        let deadline = match self.deadline {
            Some(current) if current < deadline => current,
            _ => deadline,
        };
        Self {
            deadline: Some(deadline),
            ..self.clone()
        }
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            cancel_tx: Arc::clone(&self.cancel_tx),
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_cancelled(&self) -> bool {
        *self.cancel_rx.borrow()
    }

    /// 上下文已結束時回傳對應錯誤
    pub fn err(&self) -> Option<StarsError> {
        if self.is_cancelled() {
            return Some(StarsError::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(StarsError::DeadlineExceeded),
            _ => None,
        }
    }

    pub fn check(&self) -> Result<()> {
        match self.err() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// 執行 `fut`，若期間 deadline 到期或被取消則提早回傳錯誤
    pub async fn run<T, F>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        self.check()?;

        let deadline = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = self.cancelled() => Err(StarsError::Cancelled),
            _ = deadline => Err(StarsError::DeadlineExceeded),
            result = fut => result,
        }
    }

    async fn cancelled(&self) {
        let mut rx = self.cancel_rx.clone();
        loop {
            if *rx.borrow_and_update() {
                return;
            }
            // sender 存放在 self 內，changed() 不會因 sender 被丟棄而失敗
            if rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::background()
    }
}
