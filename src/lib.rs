// ==========================================
// 舞蹈比赛计分系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 多评委评分汇总与排名引擎 (晋级由人工最终决定)
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 汇总与排名
pub mod engine;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA/建表）
pub mod db;

// 日志系统
pub mod logging;

// 性能埋点
pub mod perf;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// 导出层 - CSV
pub mod export;

// 应用层 - 组装
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{AgeCategory, PerformanceType, RankingView, TieBoundaryPolicy};

// 领域实体
pub use domain::{
    ActionLog, ActionType, AggregatedResult, CriterionScores, Entry, Event, Performance,
    RankingFilter, RankingGroupKey, Score,
};

// 引擎
pub use engine::{RankingEngine, RankingOrchestrator, ScoreAggregator, ViewSelector};

// API
pub use api::{QualificationApi, RankingApi, ScoringApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "舞蹈比赛计分系统";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
