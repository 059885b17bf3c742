// ==========================================
// 舞蹈比赛计分系统 - 参赛条目领域模型
// ==========================================
// 红线: 晋级标记只能人工设置，排名计算从不读取或改写
// 对齐: competition_entry 表
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub entry_id: String,
    pub performance_id: String,

    // ===== 晋级标记 =====
    pub qualified: bool,
    pub qualified_updated_at: Option<NaiveDateTime>,
    pub qualified_by: Option<String>,
}

impl Entry {
    /// 新建未晋级条目
    pub fn new(entry_id: String, performance_id: String) -> Self {
        Self {
            entry_id,
            performance_id,
            qualified: false,
            qualified_updated_at: None,
            qualified_by: None,
        }
    }
}
