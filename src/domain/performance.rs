// ==========================================
// 舞蹈比赛计分系统 - 赛项与表演领域模型
// ==========================================
// 说明: 赛项/表演由报名子系统维护，评分开始后对排名只读
// 对齐: event / performance 表
// ==========================================

use crate::domain::types::{AgeCategory, PerformanceType};
use serde::{Deserialize, Serialize};

// ==========================================
// Event - 赛项
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub event_id: String,
    pub name: String,
    pub region: String,
    pub age_category: AgeCategory,
    pub performance_type: PerformanceType,
}

// ==========================================
// Performance - 表演
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Performance {
    pub performance_id: String,
    pub event_id: String,
    pub title: String,
    pub item_style: String,         // 舞种
    pub mastery_level: String,      // 水平等级
    pub contestant_name: String,    // 选手/团体名称
    pub region: String,             // 赛区
    pub age_category: AgeCategory,
    pub performance_type: PerformanceType,

    // ===== 关联字段 (JOIN event) =====
    pub event_name: String,
}

// ==========================================
// PerformanceFilter - 表演查询条件
// ==========================================
// 各条件之间为 AND；event_ids 非空时只按赛项查询
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PerformanceFilter {
    pub region: Option<String>,
    pub age_category: Option<AgeCategory>,
    pub performance_type: Option<PerformanceType>,
    pub event_ids: Vec<String>,
}

impl PerformanceFilter {
    /// 单赛项查询条件
    pub fn for_event(event_id: &str) -> Self {
        Self {
            event_ids: vec![event_id.to_string()],
            ..Default::default()
        }
    }
}

// ==========================================
// EventScoreSummary - 已有评分的赛项汇总
// ==========================================
// 用途: 管理端选择"参与排名的赛项"列表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventScoreSummary {
    pub event_id: String,
    pub event_name: String,
    pub region: String,
    pub age_category: AgeCategory,
    pub performance_type: PerformanceType,
    pub performance_count: i64, // 已评分表演数
    pub score_count: i64,       // 评分条数
}
