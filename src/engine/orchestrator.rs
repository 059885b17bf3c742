// ==========================================
// 舞蹈比赛计分系统 - 排名编排器
// ==========================================
// 主流程:
// 1. 解析候选表演（event_ids 优先，逐个解析后并集去重）
// 2. 风格过滤（精确匹配）
// 3. 逐个汇总评分，丢弃 judge_count = 0
// 4. 交给视图选择器分组/排名/截取
// ==========================================
// 红线: 每次请求完整重算，不缓存排名
// 红线: 不读写晋级标记
// ==========================================

use crate::domain::performance::{EventScoreSummary, Performance, PerformanceFilter};
use crate::domain::ranking::{AggregatedResult, RankedRow, RankingFilter, ScoredPerformance};
use crate::domain::types::{RankingView, TieBoundaryPolicy};
use crate::engine::aggregator::ScoreAggregator;
use crate::engine::view::ViewSelector;
use crate::repository::collaborators::{PerformanceCatalog, ScoreStore};
use crate::repository::error::RepositoryResult;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

// ==========================================
// RankingOrchestrator - 排名编排器
// ==========================================
pub struct RankingOrchestrator {
    scores: Arc<dyn ScoreStore>,
    catalog: Arc<dyn PerformanceCatalog>,
    aggregator: ScoreAggregator,
    selector: ViewSelector,
}

impl RankingOrchestrator {
    /// 创建新的编排器实例
    pub fn new(scores: Arc<dyn ScoreStore>, catalog: Arc<dyn PerformanceCatalog>) -> Self {
        Self {
            scores,
            catalog,
            aggregator: ScoreAggregator::new(),
            selector: ViewSelector::new(),
        }
    }

    /// 解析候选表演
    ///
    /// event_ids 非空时逐个赛项查询并按 performance_id 去重（保留首次出现顺序），
    /// 此时 region/age/type 条件不生效
    pub fn resolve_candidates(&self, filter: &RankingFilter) -> RepositoryResult<Vec<Performance>> {
        let candidates = if filter.event_ids.is_empty() {
            self.catalog.list_performances(&filter.catalog_filter())?
        } else {
            let mut seen: HashSet<String> = HashSet::new();
            let mut union = Vec::new();
            for event_id in &filter.event_ids {
                let performances = self
                    .catalog
                    .list_performances(&PerformanceFilter::for_event(event_id))?;
                if performances.is_empty() {
                    debug!(event_id = %event_id, "赛项无表演，跳过");
                }
                for performance in performances {
                    if seen.insert(performance.performance_id.clone()) {
                        union.push(performance);
                    }
                }
            }
            union
        };

        Ok(candidates
            .into_iter()
            .filter(|p| filter.matches_style(p))
            .collect())
    }

    /// 已有评分的赛项（供管理端挑选 event_ids）
    pub fn events_with_scores(&self) -> RepositoryResult<Vec<EventScoreSummary>> {
        self.catalog.list_events_with_at_least_one_score()
    }

    /// 汇总单个表演（不做过滤）
    pub fn aggregate_performance(&self, performance_id: &str) -> RepositoryResult<AggregatedResult> {
        let scores = self.scores.list_scores(performance_id)?;
        Ok(self.aggregator.aggregate(performance_id, &scores))
    }

    /// 解析候选并汇总，剔除无评分表演
    pub fn collect_scored(&self, filter: &RankingFilter) -> RepositoryResult<Vec<ScoredPerformance>> {
        let candidates = self.resolve_candidates(filter)?;
        let mut population = Vec::with_capacity(candidates.len());

        for performance in candidates {
            let result = self.aggregate_performance(&performance.performance_id)?;
            if !result.is_rankable() {
                debug!(
                    performance_id = %performance.performance_id,
                    "表演暂无评分，不参与排名"
                );
                continue;
            }
            population.push(ScoredPerformance {
                performance,
                result,
            });
        }

        Ok(population)
    }

    /// 计算排名视图
    ///
    /// # 参数
    /// - filter: 查询条件
    /// - view: 视图
    /// - top_n: Top 视图名额
    /// - policy: 并列截取策略
    pub fn compute(
        &self,
        filter: &RankingFilter,
        view: RankingView,
        top_n: usize,
        policy: TieBoundaryPolicy,
    ) -> RepositoryResult<Vec<RankedRow>> {
        let population = self.collect_scored(filter)?;
        let population_size = population.len();
        let rows = self.selector.select(population, view, top_n, policy);

        info!(
            view = %view,
            population = population_size,
            rows = rows.len(),
            "排名计算完成"
        );
        Ok(rows)
    }
}
