// ==========================================
// 舞蹈比赛计分系统 - API 层
// ==========================================
// 职责: 提供业务 API 接口,供展示层/命令行调用
// ==========================================

pub mod error;
pub mod qualification_api;
pub mod ranking_api;
pub mod scoring_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use qualification_api::QualificationApi;
pub use ranking_api::{RankingApi, RankingQuery, RankingResponse, RankingRow};
pub use scoring_api::{ScoreSubmission, ScoringApi, SubmitScoreResponse};
