// ==========================================
// 舞蹈比赛计分系统 - 排名领域模型
// ==========================================
// 说明: AggregatedResult / RankedRow 均为派生数据，每次请求重新计算，不落库
// ==========================================

use crate::domain::performance::{Performance, PerformanceFilter};
use crate::domain::types::{AgeCategory, PerformanceType};
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// AggregatedResult - 跨评委汇总结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedResult {
    pub performance_id: String,
    pub total_score: f64,   // 各评委五项和的平均 (满分 100)
    pub average_score: f64, // 各评委五项均值的平均 (满分 20)
    pub judge_count: u32,
}

impl AggregatedResult {
    /// judge_count >= 1 才能参与排名
    pub fn is_rankable(&self) -> bool {
        self.judge_count > 0
    }
}

// ==========================================
// RankingGroupKey - 排名分组键
// ==========================================
// 派生 Ord: 输出时按分组键升序排列，保证结果确定
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RankingGroupKey {
    RegionAgeType {
        region: String,
        age_category: AgeCategory,
        performance_type: PerformanceType,
    },
    AgeCategory {
        age_category: AgeCategory,
    },
    ItemStyle {
        item_style: String,
    },
}

impl RankingGroupKey {
    /// 展示用标签
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for RankingGroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankingGroupKey::RegionAgeType {
                region,
                age_category,
                performance_type,
            } => write!(f, "{} / {} / {}", region, age_category, performance_type),
            RankingGroupKey::AgeCategory { age_category } => write!(f, "{}", age_category),
            RankingGroupKey::ItemStyle { item_style } => write!(f, "{}", item_style),
        }
    }
}

// ==========================================
// Grouping - 分组方式
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grouping {
    RegionAgeType,
    AgeCategory,
    ItemStyle,
}

impl Grouping {
    /// 计算表演所属分组
    pub fn key_for(&self, performance: &Performance) -> RankingGroupKey {
        match self {
            Grouping::RegionAgeType => RankingGroupKey::RegionAgeType {
                region: performance.region.clone(),
                age_category: performance.age_category,
                performance_type: performance.performance_type,
            },
            Grouping::AgeCategory => RankingGroupKey::AgeCategory {
                age_category: performance.age_category,
            },
            Grouping::ItemStyle => RankingGroupKey::ItemStyle {
                item_style: performance.item_style.clone(),
            },
        }
    }
}

// ==========================================
// ScoredPerformance - 已汇总的表演
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPerformance {
    pub performance: Performance,
    pub result: AggregatedResult,
}

// ==========================================
// RankedRow - 排名输出行
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct RankedRow {
    pub group_key: RankingGroupKey,
    pub rank: u32,
    pub performance: Performance,
    pub result: AggregatedResult,
}

// ==========================================
// RankingFilter - 排名查询条件
// ==========================================
// event_ids 非空时优先生效，region/age/type 被忽略
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankingFilter {
    pub region: Option<String>,
    pub age_category: Option<AgeCategory>,
    pub performance_type: Option<PerformanceType>,
    pub item_style: Option<String>,
    pub event_ids: Vec<String>,
}

impl RankingFilter {
    /// 不含 event_ids 时下推给表演目录的条件
    pub fn catalog_filter(&self) -> PerformanceFilter {
        PerformanceFilter {
            region: self.region.clone(),
            age_category: self.age_category,
            performance_type: self.performance_type,
            event_ids: Vec::new(),
        }
    }

    /// 风格过滤（精确匹配）
    pub fn matches_style(&self, performance: &Performance) -> bool {
        match &self.item_style {
            Some(style) => performance.item_style == *style,
            None => true,
        }
    }
}
