// ==========================================
// 舞蹈比赛计分系统 - 评分汇总引擎
// ==========================================
// 职责: 将同一表演的多位评委评分汇总为 total / average / judge_count
// 红线: 纯计算，不做过滤（judge_count = 0 也是合法结果）
// ==========================================
// 口径:
// - total_score   = Σ(各评委五项和) / judge_count   (满分 100)
// - average_score = total_score / 5                   (满分 20)
// 先做整数求和再做一次除法，同分结果按位相等
// ==========================================

use crate::domain::ranking::AggregatedResult;
use crate::domain::score::{CriterionScores, Score};
use tracing::instrument;

// ==========================================
// ScoreAggregator - 评分汇总引擎
// ==========================================
#[derive(Debug, Default, Clone, Copy)]
pub struct ScoreAggregator;

impl ScoreAggregator {
    pub fn new() -> Self {
        Self
    }

    /// 汇总单个表演的评分
    ///
    /// # 参数
    /// - performance_id: 表演ID
    /// - scores: 该表演的全部评分（每位评委至多一条）
    #[instrument(skip(self, scores), fields(score_count = scores.len()))]
    pub fn aggregate(&self, performance_id: &str, scores: &[Score]) -> AggregatedResult {
        let judge_count = scores.len() as u32;
        if judge_count == 0 {
            return AggregatedResult {
                performance_id: performance_id.to_string(),
                total_score: 0.0,
                average_score: 0.0,
                judge_count: 0,
            };
        }

        let point_sum: u32 = scores.iter().map(Score::total).sum();
        let total_score = point_sum as f64 / judge_count as f64;

        AggregatedResult {
            performance_id: performance_id.to_string(),
            total_score,
            average_score: total_score / CriterionScores::COUNT as f64,
            judge_count,
        }
    }
}
