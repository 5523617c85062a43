// ==========================================
// Mock 数据源 - 用于集成测试
// ==========================================

use async_trait::async_trait;
use infection_reports::source::{FetchResult, ReportDataSource};
use infection_reports::ReportSnapshot;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::oneshot;

type Gate = oneshot::Receiver<FetchResult<Vec<ReportSnapshot>>>;
type GateSender = oneshot::Sender<FetchResult<Vec<ReportSnapshot>>>;

/// 受控数据源
///
/// 每次取数按调用顺序领取一个闸门，测试通过对应 Sender 决定何时、以何结果返回
pub struct GatedSource {
    gates: Mutex<VecDeque<Gate>>,
    calls: AtomicUsize,
}

impl GatedSource {
    /// 创建数据源及 n 个闸门的发送端（按调用顺序）
    pub fn with_gates(n: usize) -> (Self, Vec<GateSender>) {
        let mut gates = VecDeque::new();
        let mut senders = Vec::new();
        for _ in 0..n {
            let (tx, rx) = oneshot::channel();
            gates.push_back(rx);
            senders.push(tx);
        }
        let source = Self {
            gates: Mutex::new(gates),
            calls: AtomicUsize::new(0),
        };
        (source, senders)
    }

    /// 已开始的取数次数
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// 等待取数次数达到 n
    pub async fn wait_for_calls(&self, n: usize) {
        while self.calls() < n {
            tokio::task::yield_now().await;
        }
    }
}

#[async_trait]
impl ReportDataSource for GatedSource {
    async fn fetch_reports(&self) -> FetchResult<Vec<ReportSnapshot>> {
        let gate = self
            .gates
            .lock()
            .unwrap()
            .pop_front()
            .expect("GatedSource: 闸门数量不足");
        self.calls.fetch_add(1, Ordering::SeqCst);
        gate.await
            .unwrap_or(Err(infection_reports::FetchError::Cancelled))
    }
}
