// ==========================================
// 舞蹈比赛计分系统 - 导出层
// ==========================================
// 职责: 将排名结果渲染为平面分隔文本，供展示层/命令行使用
// ==========================================

pub mod ranking_csv;

pub use ranking_csv::{write_rankings_csv, CSV_HEADER};
