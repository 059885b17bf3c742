// ==========================================
// 舞蹈比赛计分系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod action_log;
pub mod entry;
pub mod performance;
pub mod ranking;
pub mod score;
pub mod types;

// 重导出核心类型
pub use action_log::{ActionLog, ActionType};
pub use entry::Entry;
pub use performance::{Event, EventScoreSummary, Performance, PerformanceFilter};
pub use ranking::{
    AggregatedResult, Grouping, RankedRow, RankingFilter, RankingGroupKey, ScoredPerformance,
};
pub use score::{CriterionScores, Score};
pub use types::{AgeCategory, PerformanceType, RankingView, TieBoundaryPolicy};
