// ==========================================
// 舞蹈比赛计分系统 - 引擎层
// ==========================================
// 职责: 评分汇总、分组排名、视图选择
// 红线: Engine 不拼 SQL, 数据只经由 ScoreStore / PerformanceCatalog 读取
// ==========================================

pub mod aggregator;
pub mod orchestrator;
pub mod ranking;
pub mod view;

// 重导出核心引擎
pub use aggregator::ScoreAggregator;
pub use orchestrator::RankingOrchestrator;
pub use ranking::{assign_competition_ranks, RankingEngine};
pub use view::{take_top_n, ViewSelector};
