// ==========================================
// 感染防控报告 - 报告列表控制器
// ==========================================
// 职责: 持有权威报告集合、选择集、搜索文本、加载状态；
//       任何相关变化后重新推导并发布展示列表
// 并发: 所有状态变更在同一把锁内串行执行；
//       刷新请求按递增令牌竞争，只有最新令牌的结果可以落地；
//       事件在锁内排队，监听者收到的顺序与状态变更顺序一致
// ==========================================

use crate::config::report_list_config::ReportListConfig;
use crate::controller::status::{RefreshOutcome, ReportListStatus};
use crate::domain::filter::FilterCriterion;
use crate::domain::report::ReportSnapshot;
use crate::engine::debounce::SearchDebouncer;
use crate::engine::derivation::ReportDeriver;
use crate::engine::events::{ListenerId, ListenerRegistry, ReportListEvent, ReportListListener};
use crate::engine::selection::SelectionSet;
use crate::i18n::t;
use crate::source::{FetchResult, ReportDataSource};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, Weak};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

// ==========================================
// 控制器内部状态
// ==========================================
struct ControllerState {
    all_reports: Vec<ReportSnapshot>,
    selection: SelectionSet,
    search_text: String,
    status: ReportListStatus,
    /// 最近一次发出的刷新令牌
    latest_request: u64,
    /// 最近一次刷新的取消令牌
    in_flight: Option<CancellationToken>,
    /// 展示列表发布版本号
    revision: u64,
}

impl ControllerState {
    fn derive(&self, deriver: &ReportDeriver, reports: &[ReportSnapshot]) -> Vec<ReportSnapshot> {
        deriver.derive(reports, self.selection.as_slice(), &self.search_text)
    }

    fn publish_list(&mut self, deriver: &ReportDeriver) -> ReportListEvent {
        self.revision += 1;
        ReportListEvent::ListChanged {
            revision: self.revision,
            reports: self.derive(deriver, &self.all_reports),
        }
    }

    fn set_status(&mut self, status: ReportListStatus, events: &mut Vec<ReportListEvent>) {
        if self.status != status {
            self.status = status.clone();
            events.push(ReportListEvent::StatusChanged(status));
        }
    }
}

struct ControllerInner {
    source: Arc<dyn ReportDataSource>,
    deriver: ReportDeriver,
    state: Mutex<ControllerState>,
    listeners: ListenerRegistry,
    /// 根取消范围：刷新与防抖任务均为其子令牌
    scope: CancellationToken,
}

impl ControllerInner {
    fn lock_state(&self) -> MutexGuard<'_, ControllerState> {
        // 锁内只做纯内存操作，中毒时沿用内部数据
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// 在锁内执行变更并排队事件，释放锁后投递
    ///
    /// 闭包返回 true 时追加一次展示列表发布
    fn update<F>(&self, op: &'static str, mutate: F)
    where
        F: FnOnce(&mut ControllerState, &mut Vec<ReportListEvent>) -> bool,
    {
        {
            let mut state = self.lock_state();
            let mut events = Vec::new();
            if mutate(&mut *state, &mut events) {
                let published = state.publish_list(&self.deriver);
                events.push(published);
            }
            tracing::debug!(op, events = events.len(), "报告列表状态已更新");
            self.listeners.enqueue(events);
        }
        self.listeners.deliver();
    }

    fn commit_search_text(&self, text: String) {
        self.update("set_search_text", |state, _| {
            state.search_text = text;
            true
        });
    }

    /// 发出新的刷新令牌，取消上一次未完成的刷新
    ///
    /// 控制器已关闭时不改变状态，返回的取消令牌已处于取消状态
    fn begin_refresh(&self) -> (u64, CancellationToken) {
        let (token, cancel) = {
            let mut state = self.lock_state();
            if self.scope.is_cancelled() {
                tracing::debug!("控制器已关闭，忽略刷新请求");
                return (state.latest_request, self.scope.child_token());
            }
            state.latest_request += 1;
            let cancel = self.scope.child_token();
            if let Some(previous) = state.in_flight.replace(cancel.clone()) {
                previous.cancel();
            }
            let mut events = Vec::new();
            state.set_status(ReportListStatus::Loading, &mut events);
            self.listeners.enqueue(events);
            (state.latest_request, cancel)
        };
        tracing::info!(token, "开始刷新报告列表");
        self.listeners.deliver();
        (token, cancel)
    }

    async fn run_refresh(self: Arc<Self>, token: u64, cancel: CancellationToken) -> RefreshOutcome {
        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!(token, "刷新请求已取消");
                return RefreshOutcome::Superseded;
            }
            result = self.source.fetch_reports() => result,
        };
        self.complete_refresh(token, result)
    }

    /// 落地一次取数结果（令牌过期则丢弃）
    fn complete_refresh(
        &self,
        token: u64,
        result: FetchResult<Vec<ReportSnapshot>>,
    ) -> RefreshOutcome {
        let outcome = {
            let mut state = self.lock_state();
            if token != state.latest_request {
                tracing::warn!(
                    token,
                    latest = state.latest_request,
                    "丢弃过期的刷新结果"
                );
                return RefreshOutcome::Superseded;
            }
            state.in_flight = None;

            let mut events = Vec::new();
            let outcome = match result {
                Ok(reports) => {
                    let count = reports.len();
                    state.all_reports = reports;
                    let status = if count == 0 {
                        ReportListStatus::Empty
                    } else {
                        ReportListStatus::Loaded
                    };
                    state.set_status(status, &mut events);
                    let published = state.publish_list(&self.deriver);
                    events.push(published);
                    RefreshOutcome::Applied { count }
                }
                Err(err) => {
                    // 旧列表比空列表更有用：不替换 all_reports
                    let message = err.to_string();
                    state.set_status(ReportListStatus::Error(message.clone()), &mut events);
                    RefreshOutcome::Failed(message)
                }
            };
            self.listeners.enqueue(events);
            outcome
        };

        match &outcome {
            RefreshOutcome::Applied { count } => {
                tracing::info!(token, count, "报告列表刷新完成")
            }
            RefreshOutcome::Failed(message) => {
                tracing::warn!(token, error = %message, "报告列表刷新失败，保留旧数据")
            }
            RefreshOutcome::Superseded => {}
        }

        self.listeners.deliver();
        outcome
    }
}

// ==========================================
// ListReportController - 报告列表控制器
// ==========================================
/// 报告列表控制器
///
/// 构造不依赖 tokio 运行时；`refresh` 需在运行时内调用，
/// 搜索防抖任务在首次 `set_search_text` 时启动。
/// 释放控制器或调用 `shutdown` 会取消所有未完成的刷新与待提交的搜索。
pub struct ListReportController {
    inner: Arc<ControllerInner>,
    search_debounce: Duration,
    debouncer: OnceLock<SearchDebouncer>,
}

impl ListReportController {
    /// 使用默认配置创建
    pub fn new(source: Arc<dyn ReportDataSource>) -> Self {
        Self::with_config(source, &ReportListConfig::default())
    }

    /// 使用指定配置创建
    ///
    /// 初始状态为 Loading；不会自动取数，需调用 `refresh`
    pub fn with_config(source: Arc<dyn ReportDataSource>, config: &ReportListConfig) -> Self {
        let scope = CancellationToken::new();
        let selection = SelectionSet::from_criteria(config.initial_selection());

        let inner = Arc::new(ControllerInner {
            source,
            deriver: ReportDeriver::new(),
            state: Mutex::new(ControllerState {
                all_reports: Vec::new(),
                selection,
                search_text: String::new(),
                status: ReportListStatus::Loading,
                latest_request: 0,
                in_flight: None,
                revision: 0,
            }),
            listeners: ListenerRegistry::new(),
            scope,
        });

        tracing::debug!(
            debounce_ms = config.search_debounce_ms,
            preselected = ?config.preselected_precaution,
            "报告列表控制器已创建"
        );

        Self {
            inner,
            search_debounce: config.search_debounce(),
            debouncer: OnceLock::new(),
        }
    }

    /// 取得搜索防抖器，首次调用时在当前运行时内启动
    ///
    /// 不在 tokio 运行时内时返回 None
    fn debouncer(&self) -> Option<&SearchDebouncer> {
        if let Some(debouncer) = self.debouncer.get() {
            return Some(debouncer);
        }
        if Handle::try_current().is_err() {
            return None;
        }
        let debouncer = self.debouncer.get_or_init(|| {
            // 防抖任务只持有弱引用，控制器释放后自然失效
            let weak: Weak<ControllerInner> = Arc::downgrade(&self.inner);
            SearchDebouncer::spawn(
                self.search_debounce,
                self.inner.scope.child_token(),
                move |text| {
                    if let Some(inner) = weak.upgrade() {
                        inner.commit_search_text(text);
                    }
                },
            )
        });
        tracing::debug!(interval = ?debouncer.interval(), "搜索防抖任务已启动");
        Some(debouncer)
    }

    // ==========================================
    // 订阅
    // ==========================================

    pub fn subscribe(&self, listener: Arc<dyn ReportListListener>) -> ListenerId {
        self.inner.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.inner.listeners.unsubscribe(id)
    }

    // ==========================================
    // 刷新
    // ==========================================

    /// 异步刷新报告集合（不阻塞调用方）
    ///
    /// 刷新期间状态为 Loading，原展示列表保持不变。
    /// 新的刷新会取消上一次刷新；即使旧结果仍然到达也会因令牌过期被丢弃。
    pub fn refresh(&self) -> JoinHandle<RefreshOutcome> {
        let (token, cancel) = self.inner.begin_refresh();
        let inner = self.inner.clone();
        tokio::spawn(inner.run_refresh(token, cancel))
    }

    /// 刷新并等待结果
    pub async fn refresh_and_wait(&self) -> RefreshOutcome {
        match self.refresh().await {
            Ok(outcome) => outcome,
            Err(join_err) => {
                tracing::error!(error = %join_err, "刷新任务异常退出");
                RefreshOutcome::Failed(join_err.to_string())
            }
        }
    }

    // ==========================================
    // 筛选与搜索
    // ==========================================

    /// 用筛选界面提交的最终选择整体替换选择集
    ///
    /// 单选分组出现多个条件时保留最后一个
    pub fn apply_selection(&self, criteria: Vec<FilterCriterion>) {
        if let Err(violation) = SelectionSet::validate(&criteria) {
            tracing::warn!(%violation, "提交的选择违反单选约束，已保留每组最后一个");
        }

        self.inner.update("apply_selection", |state, events| {
            state.selection = SelectionSet::from_criteria(criteria);
            events.push(ReportListEvent::SelectionChanged(state.selection.snapshot()));
            events.push(ReportListEvent::SelectionApplied {
                message: t("report_list.filtering"),
            });
            true
        });
    }

    /// 移除一个筛选条件（不存在时选择集不变，仍重新发布列表）
    pub fn remove_filter(&self, criterion: &FilterCriterion) {
        self.inner.update("remove_filter", |state, events| {
            if state.selection.remove(criterion) {
                events.push(ReportListEvent::SelectionChanged(state.selection.snapshot()));
            }
            true
        });
    }

    /// 按标签区位置移除筛选条件
    pub fn remove_filter_at(&self, index: usize) -> Option<FilterCriterion> {
        let mut removed = None;
        self.inner.update("remove_filter_at", |state, events| {
            removed = state.selection.remove_at(index);
            if removed.is_some() {
                events.push(ReportListEvent::SelectionChanged(state.selection.snapshot()));
            }
            true
        });
        removed
    }

    /// 清空全部筛选条件
    pub fn reset_filters(&self) {
        self.inner.update("reset_filters", |state, events| {
            if !state.selection.is_empty() {
                state.selection.clear();
                events.push(ReportListEvent::SelectionChanged(Vec::new()));
            }
            true
        });
    }

    /// 输入搜索文本（经防抖后提交）
    ///
    /// 不在 tokio 运行时内时无法计时，直接提交
    pub fn set_search_text(&self, text: impl Into<String>) {
        if self.is_shut_down() {
            tracing::debug!("控制器已关闭，忽略搜索输入");
            return;
        }
        match self.debouncer() {
            Some(debouncer) => {
                if !debouncer.push(text) {
                    tracing::debug!("控制器已关闭，忽略搜索输入");
                }
            }
            None => {
                tracing::warn!("当前线程无 tokio 运行时，搜索文本不经防抖直接提交");
                self.inner.commit_search_text(text.into());
            }
        }
    }

    /// 立即提交搜索文本（绕过防抖，如回车确认）
    pub fn commit_search_text(&self, text: impl Into<String>) {
        self.inner.commit_search_text(text.into());
    }

    // ==========================================
    // 查询
    // ==========================================

    /// 当前展示列表
    ///
    /// 传入 `override_reports` 时基于该集合推导（不修改控制器状态），
    /// 用于预览刚到达但尚未落地的数据
    pub fn sorted_filtered_list(
        &self,
        override_reports: Option<&[ReportSnapshot]>,
    ) -> Vec<ReportSnapshot> {
        let state = self.inner.lock_state();
        let reports = override_reports.unwrap_or(&state.all_reports);
        state.derive(&self.inner.deriver, reports)
    }

    pub fn selection(&self) -> Vec<FilterCriterion> {
        self.inner.lock_state().selection.snapshot()
    }

    pub fn status(&self) -> ReportListStatus {
        self.inner.lock_state().status.clone()
    }

    /// 已提交（防抖之后）的搜索文本
    pub fn search_text(&self) -> String {
        self.inner.lock_state().search_text.clone()
    }

    pub fn all_reports(&self) -> Vec<ReportSnapshot> {
        self.inner.lock_state().all_reports.clone()
    }

    /// 权威报告集合是否为空
    pub fn is_empty(&self) -> bool {
        self.inner.lock_state().all_reports.is_empty()
    }

    /// 展示列表为空时的占位提示
    pub fn placeholder_message(&self) -> Option<String> {
        let list_is_empty = self.sorted_filtered_list(None).is_empty();
        self.status().placeholder_message(list_is_empty)
    }

    // ==========================================
    // 生命周期
    // ==========================================

    /// 取消全部未完成的刷新并停止搜索防抖
    pub fn shutdown(&self) {
        if !self.inner.scope.is_cancelled() {
            tracing::info!("报告列表控制器关闭");
            self.inner.scope.cancel();
        }
    }

    pub fn is_shut_down(&self) -> bool {
        self.inner.scope.is_cancelled()
    }
}

impl Drop for ListReportController {
    fn drop(&mut self) {
        self.inner.scope.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::StaticReportSource;
    use chrono::{TimeZone, Utc};

    fn report(name: &str, day: u32) -> ReportSnapshot {
        ReportSnapshot::new(
            name,
            "Hand Hygiene",
            "Standard",
            "Room 1",
            Utc.with_ymd_and_hms(2026, 5, day, 8, 0, 0).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_stale_token_result_is_ignored() {
        let controller = ListReportController::new(Arc::new(StaticReportSource::new(vec![])));
        let inner = controller.inner.clone();

        let (first, _) = inner.begin_refresh();
        let (second, _) = inner.begin_refresh();
        assert!(second > first);

        // 新请求的结果先到
        let applied = inner.complete_refresh(second, Ok(vec![report("Second", 2)]));
        assert_eq!(applied, RefreshOutcome::Applied { count: 1 });

        // 旧请求的结果后到，被丢弃
        let stale = inner.complete_refresh(first, Ok(vec![report("First", 1)]));
        assert_eq!(stale, RefreshOutcome::Superseded);

        assert_eq!(controller.all_reports(), vec![report("Second", 2)]);
        assert_eq!(controller.status(), ReportListStatus::Loaded);
    }

    #[tokio::test]
    async fn test_begin_refresh_cancels_previous() {
        let controller = ListReportController::new(Arc::new(StaticReportSource::new(vec![])));
        let inner = controller.inner.clone();

        let (_, first_cancel) = inner.begin_refresh();
        let (_, second_cancel) = inner.begin_refresh();

        assert!(first_cancel.is_cancelled());
        assert!(!second_cancel.is_cancelled());

        controller.shutdown();
        assert!(second_cancel.is_cancelled());
        assert!(controller.is_shut_down());
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_reports() {
        let controller = ListReportController::new(Arc::new(StaticReportSource::new(vec![])));
        let inner = controller.inner.clone();

        let (token, _) = inner.begin_refresh();
        inner.complete_refresh(token, Ok(vec![report("Kept", 3)]));

        let (token, _) = inner.begin_refresh();
        let outcome = inner.complete_refresh(
            token,
            Err(crate::source::FetchError::Network("timeout".into())),
        );

        assert!(matches!(outcome, RefreshOutcome::Failed(ref m) if m.contains("timeout")));
        assert!(controller.status().is_error());
        assert_eq!(controller.all_reports(), vec![report("Kept", 3)]);
    }
}
