// ==========================================
// 舞蹈比赛计分系统 - 外部协作方接口
// ==========================================
// 职责: 定义排名引擎读取评分/表演数据的接口（不包含业务逻辑）
// 实现者: ScoreRepository / PerformanceRepository（使用 rusqlite）
// 说明: 引擎只依赖这里的 trait，单元测试可注入内存实现
// ==========================================

use crate::domain::performance::{EventScoreSummary, Performance, PerformanceFilter};
use crate::domain::score::Score;
use crate::repository::error::RepositoryResult;

// ==========================================
// ScoreStore - 评分存储
// ==========================================
pub trait ScoreStore: Send + Sync {
    /// 查询单个表演的全部评分（每位评委至多一条）
    fn list_scores(&self, performance_id: &str) -> RepositoryResult<Vec<Score>>;
}

// ==========================================
// PerformanceCatalog - 表演目录
// ==========================================
pub trait PerformanceCatalog: Send + Sync {
    /// 按条件查询表演（条件之间为 AND）
    fn list_performances(&self, filter: &PerformanceFilter) -> RepositoryResult<Vec<Performance>>;

    /// 查询至少有一条评分的赛项汇总
    fn list_events_with_at_least_one_score(&self) -> RepositoryResult<Vec<EventScoreSummary>>;
}
