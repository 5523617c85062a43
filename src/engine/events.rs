// ==========================================
// 感染防控报告 - 列表变更事件
// ==========================================
// 职责: 定义订阅/通知接口，与渲染层解耦
// 说明: 事件在状态锁内排队，释放状态锁之后按排队顺序投递；
//       同一时刻只有一个线程执行投递
// ==========================================

use crate::controller::status::ReportListStatus;
use crate::domain::filter::FilterCriterion;
use crate::domain::report::ReportSnapshot;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// 事件类型
// ==========================================

/// 报告列表事件
#[derive(Debug, Clone, PartialEq)]
pub enum ReportListEvent {
    /// 展示列表重新发布
    ///
    /// `revision` 单调递增，消费方可据此丢弃乱序投递
    ListChanged {
        revision: u64,
        reports: Vec<ReportSnapshot>,
    },
    /// 加载状态变更
    StatusChanged(ReportListStatus),
    /// 选择集变更（筛选条件标签区）
    SelectionChanged(Vec<FilterCriterion>),
    /// 筛选界面提交了新的选择（附带提示文案）
    SelectionApplied { message: String },
}

impl ReportListEvent {
    pub fn as_str(&self) -> &str {
        match self {
            ReportListEvent::ListChanged { .. } => "ListChanged",
            ReportListEvent::StatusChanged(_) => "StatusChanged",
            ReportListEvent::SelectionChanged(_) => "SelectionChanged",
            ReportListEvent::SelectionApplied { .. } => "SelectionApplied",
        }
    }
}

// ==========================================
// 监听者 Trait
// ==========================================

/// 报告列表监听者
pub trait ReportListListener: Send + Sync {
    fn on_event(&self, event: &ReportListEvent);
}

impl<F> ReportListListener for F
where
    F: Fn(&ReportListEvent) + Send + Sync,
{
    fn on_event(&self, event: &ReportListEvent) {
        self(event)
    }
}

/// 监听者句柄（用于取消订阅）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

// ==========================================
// ListenerRegistry - 监听者登记表
// ==========================================
#[derive(Default)]
struct Outbox {
    queue: VecDeque<ReportListEvent>,
    /// 是否已有线程在投递
    draining: bool,
}

/// 投递线程在回调中 panic 时释放投递权
struct DrainGuard<'a>(&'a Mutex<Outbox>);

impl Drop for DrainGuard<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            lock_outbox(self.0).draining = false;
        }
    }
}

fn lock_outbox(outbox: &Mutex<Outbox>) -> MutexGuard<'_, Outbox> {
    outbox
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Default)]
pub struct ListenerRegistry {
    next_id: AtomicU64,
    listeners: Mutex<Vec<(ListenerId, Arc<dyn ReportListListener>)>>,
    outbox: Mutex<Outbox>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, listener: Arc<dyn ReportListListener>) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.lock().push((id, listener));
        id
    }

    /// 取消订阅
    ///
    /// # 返回
    /// - true: 已移除
    /// - false: 句柄不存在
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut listeners = self.lock();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 事件排队
    ///
    /// 须在产生事件的状态锁内调用，队列顺序即状态变更顺序
    pub fn enqueue(&self, events: Vec<ReportListEvent>) {
        if events.is_empty() {
            return;
        }
        lock_outbox(&self.outbox).queue.extend(events);
    }

    /// 投递队列中的事件（须在状态锁之外调用）
    ///
    /// 已有线程在投递时直接返回，新排队的事件由该线程按序送达。
    /// 回调中再次触发的事件在当前回调返回后送达。
    pub fn deliver(&self) {
        {
            let mut outbox = lock_outbox(&self.outbox);
            if outbox.draining || outbox.queue.is_empty() {
                return;
            }
            outbox.draining = true;
        }

        let _guard = DrainGuard(&self.outbox);
        loop {
            let batch: Vec<ReportListEvent> = {
                let mut outbox = lock_outbox(&self.outbox);
                if outbox.queue.is_empty() {
                    outbox.draining = false;
                    return;
                }
                outbox.queue.drain(..).collect()
            };
            self.notify(&batch);
        }
    }

    /// 排队并立即投递
    pub fn publish(&self, events: Vec<ReportListEvent>) {
        self.enqueue(events);
        self.deliver();
    }

    /// 依次通知全部监听者
    ///
    /// 先复制监听者列表再回调，回调中可以再次订阅/取消订阅
    fn notify(&self, events: &[ReportListEvent]) {
        if events.is_empty() {
            return;
        }
        let listeners: Vec<Arc<dyn ReportListListener>> =
            self.lock().iter().map(|(_, l)| l.clone()).collect();

        for event in events {
            tracing::trace!(event = event.as_str(), listeners = listeners.len(), "通知监听者");
            for listener in &listeners {
                listener.on_event(event);
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<(ListenerId, Arc<dyn ReportListListener>)>> {
        // 监听者回调不在锁内执行，中毒时直接沿用内部数据
        self.listeners
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
