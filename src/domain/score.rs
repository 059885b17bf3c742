// ==========================================
// 舞蹈比赛计分系统 - 评分领域模型
// ==========================================
// 红线: 每个 (judge_id, performance_id) 最多一条评分，重复提交原地更新
// 对齐: score 表
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ==========================================
// CriterionScores - 五项评分
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionScores {
    pub technique: u8,          // 技术
    pub musicality: u8,         // 音乐性
    pub performance: u8,        // 表现力
    pub styling: u8,            // 造型
    pub overall_impression: u8, // 整体印象
}

impl CriterionScores {
    /// 单项满分
    pub const MAX_PER_CRITERION: u8 = 20;

    /// 评分项数量
    pub const COUNT: u32 = 5;

    pub fn new(
        technique: u8,
        musicality: u8,
        performance: u8,
        styling: u8,
        overall_impression: u8,
    ) -> Self {
        Self {
            technique,
            musicality,
            performance,
            styling,
            overall_impression,
        }
    }

    /// 按 (字段名, 分值) 列出五项
    pub fn fields(&self) -> [(&'static str, u8); 5] {
        [
            ("technique", self.technique),
            ("musicality", self.musicality),
            ("performance", self.performance),
            ("styling", self.styling),
            ("overall_impression", self.overall_impression),
        ]
    }

    /// 五项之和 (0-100)
    pub fn sum(&self) -> u32 {
        self.fields().iter().map(|(_, v)| *v as u32).sum()
    }
}

// ==========================================
// Score - 单个评委对单个表演的评分
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub judge_id: String,
    pub performance_id: String,
    #[serde(flatten)]
    pub criteria: CriterionScores,
    pub comments: Option<String>,
    pub submitted_at: NaiveDateTime,
}

impl Score {
    /// 五项之和 (0-100)
    pub fn total(&self) -> u32 {
        self.criteria.sum()
    }
}
