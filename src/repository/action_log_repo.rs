// ==========================================
// 舞蹈比赛计分系统 - 操作日志数据仓储
// ==========================================
// 红线: 所有人工写入必须记录
// ==========================================

mod core;
mod queries;


pub use core::ActionLogRepository;
