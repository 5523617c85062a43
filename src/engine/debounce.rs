// ==========================================
// 感染防控报告 - 搜索防抖
// ==========================================
// 职责: 连续输入合并为一次提交（尾沿防抖，只取最新值）
// 说明: 新输入在静默期内到达时取消待提交值并重新计时
// ==========================================

use std::pin::Pin;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{sleep, Sleep};
use tokio_util::sync::CancellationToken;

// ==========================================
// SearchDebouncer - 搜索防抖器
// ==========================================
pub struct SearchDebouncer {
    tx: mpsc::UnboundedSender<String>,
    cancel: CancellationToken,
    interval: Duration,
}

impl SearchDebouncer {
    /// 启动防抖任务（需在 tokio 运行时内调用）
    ///
    /// # 参数
    /// - `interval`: 静默间隔
    /// - `cancel`: 取消令牌，取消后丢弃待提交值并退出
    /// - `sink`: 静默期结束时以最新文本调用
    pub fn spawn<F>(interval: Duration, cancel: CancellationToken, sink: F) -> Self
    where
        F: Fn(String) + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run(interval, rx, cancel.clone(), sink));
        Self {
            tx,
            cancel,
            interval,
        }
    }

    /// 推送一次输入
    ///
    /// # 返回
    /// - false: 防抖器已停止，输入被丢弃
    pub fn push(&self, text: impl Into<String>) -> bool {
        if self.cancel.is_cancelled() {
            return false;
        }
        self.tx.send(text.into()).is_ok()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn stop(&self) {
        self.cancel.cancel();
    }

    pub fn is_stopped(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

async fn run<F>(
    interval: Duration,
    mut rx: mpsc::UnboundedReceiver<String>,
    cancel: CancellationToken,
    sink: F,
) where
    F: Fn(String),
{
    let mut pending: Option<String> = None;
    let mut timer: Option<Pin<Box<Sleep>>> = None;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            maybe = rx.recv() => {
                let Some(text) = maybe else { break; };
                pending = Some(text);
                // 每次输入都重新计时
                timer = Some(Box::pin(sleep(interval)));
            }
            _ = async {
                if let Some(timer) = &mut timer {
                    timer.await;
                }
            }, if timer.is_some() => {
                timer = None;
                if let Some(text) = pending.take() {
                    tracing::debug!(text = %text, "搜索文本防抖提交");
                    sink(text);
                }
            }
        }
    }

    if pending.is_some() {
        tracing::debug!("防抖器停止，丢弃待提交的搜索文本");
    }
}
