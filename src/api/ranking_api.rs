// ==========================================
// 舞蹈比赛计分系统 - 排名查询 API
// ==========================================
// 职责: 排名视图查询、已评分赛项查询、单个表演汇总
// 红线: 每次请求完整重算，无全局"当前排名"
// 红线: 非法筛选值按"无匹配"处理，返回空结果而不是错误
// ==========================================

use std::sync::Arc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::error::{ApiError, ApiResult};
use crate::config::config_manager::ConfigManager;
use crate::domain::performance::EventScoreSummary;
use crate::domain::ranking::{AggregatedResult, RankedRow, RankingFilter};
use crate::domain::types::{AgeCategory, PerformanceType, RankingView};
use crate::engine::orchestrator::RankingOrchestrator;
use crate::i18n::{t, t_with_args};
use crate::perf::PerfGuard;
use crate::repository::performance_repo::PerformanceRepository;

// ==========================================
// 请求/响应 DTO
// ==========================================

/// 排名查询条件（来自展示层的原始字符串）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RankingQuery {
    pub region: Option<String>,
    pub age_category: Option<String>,
    pub performance_type: Option<String>,
    pub item_style: Option<String>,
    #[serde(default)]
    pub event_ids: Vec<String>,
    /// 覆盖配置中的 Top-N（仅 Top 视图生效）
    pub top_n: Option<usize>,
}

/// 排名输出行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingRow {
    pub group_key: String,
    pub performance_id: String,
    pub rank: u32,
    pub total_score: f64,
    pub average_score: f64,
    pub judge_count: u32,
    pub contestant_name: String,
    pub title: String,
    pub item_style: String,
    pub event_name: String,
    pub region: String,
    pub age_category: String,
    pub performance_type: String,
}

impl From<RankedRow> for RankingRow {
    fn from(row: RankedRow) -> Self {
        Self {
            group_key: row.group_key.label(),
            performance_id: row.result.performance_id,
            rank: row.rank,
            total_score: row.result.total_score,
            average_score: row.result.average_score,
            judge_count: row.result.judge_count,
            contestant_name: row.performance.contestant_name,
            title: row.performance.title,
            item_style: row.performance.item_style,
            event_name: row.performance.event_name,
            region: row.performance.region,
            age_category: row.performance.age_category.to_string(),
            performance_type: row.performance.performance_type.to_string(),
        }
    }
}

/// 排名响应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingResponse {
    pub view: String,
    pub rows: Vec<RankingRow>,
    /// 结果为空时的提示信息
    pub message: Option<String>,
}

impl RankingResponse {
    fn new(view: RankingView, rows: Vec<RankingRow>) -> Self {
        let message = if rows.is_empty() {
            Some(t("ranking.empty"))
        } else {
            None
        };
        Self {
            view: view.as_str().to_string(),
            rows,
            message,
        }
    }
}

// ==========================================
// RankingApi - 排名查询 API
// ==========================================
pub struct RankingApi {
    orchestrator: Arc<RankingOrchestrator>,
    performance_repo: Arc<PerformanceRepository>,
    config_manager: Arc<ConfigManager>,
}

impl RankingApi {
    /// 创建新的RankingApi实例
    pub fn new(
        orchestrator: Arc<RankingOrchestrator>,
        performance_repo: Arc<PerformanceRepository>,
        config_manager: Arc<ConfigManager>,
    ) -> Self {
        Self {
            orchestrator,
            performance_repo,
            config_manager,
        }
    }

    /// 查询排名
    ///
    /// # 参数
    /// - query: 查询条件
    /// - view: "all" | "top5_age" | "top5_style"
    ///
    /// # 返回
    /// - Ok(RankingResponse): 排名（为空时带提示信息）
    /// - Err(ApiError::InvalidInput): 视图名非法或 top_n < 1
    pub fn get_rankings(&self, query: &RankingQuery, view: &str) -> ApiResult<RankingResponse> {
        let mut perf = PerfGuard::new("api.get_rankings");

        let view = RankingView::parse(view).ok_or_else(|| {
            ApiError::InvalidInput(t_with_args("ranking.invalid_view", &[("view", view)]))
        })?;

        let top_n = match query.top_n {
            Some(0) => return Err(ApiError::InvalidInput(t("ranking.invalid_top_n"))),
            Some(n) => n,
            None => self
                .config_manager
                .get_top_n()
                .map_err(ApiError::config)?,
        };
        let policy = self
            .config_manager
            .get_tie_policy()
            .map_err(ApiError::config)?;

        let filter = match build_filter(query) {
            Some(filter) => filter,
            None => return Ok(RankingResponse::new(view, Vec::new())),
        };

        let rows = self.orchestrator.compute(&filter, view, top_n, policy)?;
        perf.set_rows(rows.len());
        Ok(RankingResponse::new(
            view,
            rows.into_iter().map(RankingRow::from).collect(),
        ))
    }

    /// 查询至少有一条评分的赛项（供管理员挑选 event_ids）
    pub fn get_events_with_scores(&self) -> ApiResult<Vec<EventScoreSummary>> {
        let mut perf = PerfGuard::new("api.get_events_with_scores");
        let events = self.orchestrator.events_with_scores()?;
        perf.set_rows(events.len());
        Ok(events)
    }

    /// 查询单个表演的汇总结果
    ///
    /// # 返回
    /// - Ok(AggregatedResult): 汇总结果（无评分时 judge_count = 0）
    /// - Err(ApiError::NotFound): 表演不存在
    pub fn get_performance_result(&self, performance_id: &str) -> ApiResult<AggregatedResult> {
        if self.performance_repo.find_by_id(performance_id)?.is_none() {
            return Err(ApiError::NotFound(t_with_args(
                "score.performance_not_found",
                &[("id", performance_id)],
            )));
        }
        Ok(self.orchestrator.aggregate_performance(performance_id)?)
    }
}

/// 将原始查询条件解析为 RankingFilter
///
/// 空白字符串视为未设置；年龄组/表演类型无法识别时返回 None（调用方返回空结果）
fn build_filter(query: &RankingQuery) -> Option<RankingFilter> {
    let age_category = match non_blank(&query.age_category) {
        Some(raw) => match AgeCategory::parse(raw) {
            Some(age) => Some(age),
            None => {
                debug!(age_category = raw, "未知年龄组，返回空结果");
                return None;
            }
        },
        None => None,
    };

    let performance_type = match non_blank(&query.performance_type) {
        Some(raw) => match PerformanceType::parse(raw) {
            Some(kind) => Some(kind),
            None => {
                debug!(performance_type = raw, "未知表演类型，返回空结果");
                return None;
            }
        },
        None => None,
    };

    Some(RankingFilter {
        region: non_blank(&query.region).map(str::to_string),
        age_category,
        performance_type,
        item_style: non_blank(&query.item_style).map(str::to_string),
        event_ids: query
            .event_ids
            .iter()
            .map(|id| id.trim())
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect(),
    })
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
