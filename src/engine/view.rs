// ==========================================
// 舞蹈比赛计分系统 - 排名视图选择器
// ==========================================
// 视图:
// - all:        按 (赛区, 年龄组, 表演类型) 分组的完整排名
// - top5_age:   按年龄组重新分组，每组取前 N
// - top5_style: 按舞种重新分组，每组取前 N
// 红线: 只读派生，不修改底层数据
// ==========================================

use crate::domain::ranking::{Grouping, RankedRow, ScoredPerformance};
use crate::domain::types::{RankingView, TieBoundaryPolicy};
use crate::engine::ranking::RankingEngine;
use tracing::instrument;

/// 按并列策略截取组内前 N 行
///
/// 输入必须是已排名（分数降序）的同组行
pub fn take_top_n(rows: Vec<RankedRow>, top_n: usize, policy: TieBoundaryPolicy) -> Vec<RankedRow> {
    if rows.len() <= top_n {
        return rows;
    }
    if top_n == 0 {
        return Vec::new();
    }

    match policy {
        TieBoundaryPolicy::Cap => rows.into_iter().take(top_n).collect(),
        TieBoundaryPolicy::IncludeTies => {
            let boundary = rows[top_n - 1].result.total_score;
            rows.into_iter()
                .enumerate()
                .take_while(|(idx, row)| *idx < top_n || row.result.total_score == boundary)
                .map(|(_, row)| row)
                .collect()
        }
    }
}

// ==========================================
// ViewSelector - 排名视图选择器
// ==========================================
#[derive(Debug, Default, Clone, Copy)]
pub struct ViewSelector {
    ranking: RankingEngine,
}

impl ViewSelector {
    pub fn new() -> Self {
        Self {
            ranking: RankingEngine::new(),
        }
    }

    /// 按视图生成排名行
    ///
    /// # 参数
    /// - population: 已过滤、已汇总的表演
    /// - view: 视图
    /// - top_n: Top 视图的名额（all 视图忽略）
    /// - policy: 第 N 名并列时的截取策略
    #[instrument(skip(self, population), fields(count = population.len(), view = %view))]
    pub fn select(
        &self,
        population: Vec<ScoredPerformance>,
        view: RankingView,
        top_n: usize,
        policy: TieBoundaryPolicy,
    ) -> Vec<RankedRow> {
        let grouping = match view {
            RankingView::All => return self.ranking.rank(population, Grouping::RegionAgeType),
            RankingView::TopByAge => Grouping::AgeCategory,
            RankingView::TopByStyle => Grouping::ItemStyle,
        };

        self.ranking
            .rank_groups(population, grouping)
            .into_iter()
            .flat_map(|(_, rows)| take_top_n(rows, top_n, policy))
            .collect()
    }
}
