// ==========================================
// 舞蹈比赛计分系统 - 应用层
// ==========================================
// 职责: 组装仓储、引擎与 API，供展示层/命令行使用
// ==========================================

pub mod state;

// 重导出
pub use state::{get_default_db_path, AppState};
