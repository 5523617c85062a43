// ==========================================
// 感染防控报告 - 报告列表演示入口
// ==========================================
// 用法:
//   cargo run --bin report-list -- <reports.json> [选项]
//
// 选项:
//   --config <path>           JSON 配置文件
//   --filter "<分组>=<标签>"   筛选条件，可重复（如 "Precaution Type=Standard"）
//   --sort "<排序>"            排序方式（如 "New Reports"）
//   --search "<文本>"          搜索文本
//
// 环境变量:
//   INFECTION_REPORTS_LOG_FORMAT=json  输出 JSON 格式日志
// ==========================================

use anyhow::{bail, Context};
use infection_reports::i18n::{self, t_with_args};
use infection_reports::config::config_keys;
use infection_reports::{
    logging, FilterCriterion, FilterGroup, ListReportController, RefreshOutcome,
    ReportListConfig, StaticReportSource,
};
use std::sync::Arc;

struct CliArgs {
    reports_path: String,
    config_path: Option<String>,
    criteria: Vec<FilterCriterion>,
    search: Option<String>,
}

fn parse_args() -> anyhow::Result<CliArgs> {
    let mut args = std::env::args().skip(1);
    let mut reports_path = None;
    let mut config_path = None;
    let mut criteria = Vec::new();
    let mut search = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => config_path = Some(args.next().context("--config 缺少路径")?),
            "--search" => search = Some(args.next().context("--search 缺少文本")?),
            "--sort" => {
                let label = args.next().context("--sort 缺少排序方式")?;
                criteria.push(FilterCriterion::of(label, FilterGroup::SortBy));
            }
            "--filter" => {
                let raw = args.next().context("--filter 缺少条件")?;
                let (group, label) = raw
                    .split_once('=')
                    .with_context(|| format!("筛选条件格式应为 <分组>=<标签>: {}", raw))?;
                criteria.push(FilterCriterion::new(label.trim(), group)?);
            }
            other if other.starts_with("--") => bail!("未知选项: {}", other),
            other => reports_path = Some(other.to_string()),
        }
    }

    Ok(CliArgs {
        reports_path: reports_path.context("缺少报告文件路径 <reports.json>")?,
        config_path,
        criteria,
        search,
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    match std::env::var(config_keys::ENV_LOG_FORMAT).as_deref() {
        Ok("json") => logging::init_json(),
        _ => logging::init(),
    }

    tracing::info!("==================================================");
    tracing::info!("{} v{}", infection_reports::APP_NAME, infection_reports::VERSION);
    tracing::info!("==================================================");

    let cli = parse_args()?;

    let config = match &cli.config_path {
        Some(path) => ReportListConfig::from_json_file(path)
            .with_context(|| format!("无法加载配置: {}", path))?,
        None => ReportListConfig::default(),
    }
    .with_env_overrides();
    i18n::set_locale(&config.locale);

    let source = StaticReportSource::from_json_file(&cli.reports_path)
        .with_context(|| format!("无法读取报告文件: {}", cli.reports_path))?;
    let controller = ListReportController::with_config(Arc::new(source), &config);

    match controller.refresh_and_wait().await {
        RefreshOutcome::Failed(reason) => {
            bail!(t_with_args("report_list.fetch_failed", &[("reason", &reason)]))
        }
        outcome => tracing::info!(?outcome, "刷新完成"),
    }

    if !cli.criteria.is_empty() {
        let mut selection = controller.selection();
        selection.extend(cli.criteria);
        controller.apply_selection(selection);
    }
    if let Some(text) = cli.search {
        controller.commit_search_text(text);
    }

    let list = controller.sorted_filtered_list(None);
    if let Some(message) = controller.placeholder_message() {
        println!("{}", message);
    }
    for report in &list {
        println!(
            "{}  {:<24} {:<22} {:<12} {}",
            report.timestamp().format("%Y-%m-%d %H:%M"),
            report.employee_name(),
            report.health_practice_name(),
            report.precaution_type_name(),
            report.location_label(),
        );
    }
    println!("{} / {}", list.len(), controller.all_reports().len());

    controller.shutdown();
    Ok(())
}
