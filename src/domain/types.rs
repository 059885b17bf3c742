// ==========================================
// 舞蹈比赛计分系统 - 领域类型定义
// ==========================================
// 职责: 年龄组、表演类型、排名视图、Top-N 边界策略
// 说明: 过滤值解析失败统一返回 None（视为"无匹配"，不是错误）
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 年龄组 (Age Category)
// ==========================================
// 数据库存储为标签字符串（例如 "10-12"）
// 顺序: 年龄从小到大
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgeCategory {
    #[serde(rename = "6 & Under")]
    SixAndUnder,
    #[serde(rename = "7-9")]
    SevenToNine,
    #[serde(rename = "10-12")]
    TenToTwelve,
    #[serde(rename = "13-15")]
    ThirteenToFifteen,
    #[serde(rename = "16-18")]
    SixteenToEighteen,
    #[serde(rename = "19-25")]
    NineteenToTwentyFive,
    #[serde(rename = "26 & Over")]
    TwentySixAndOver,
}

impl AgeCategory {
    /// 全部年龄组（按年龄升序）
    pub const ALL: [AgeCategory; 7] = [
        AgeCategory::SixAndUnder,
        AgeCategory::SevenToNine,
        AgeCategory::TenToTwelve,
        AgeCategory::ThirteenToFifteen,
        AgeCategory::SixteenToEighteen,
        AgeCategory::NineteenToTwentyFive,
        AgeCategory::TwentySixAndOver,
    ];

    /// 存储/展示用标签
    pub fn as_str(&self) -> &'static str {
        match self {
            AgeCategory::SixAndUnder => "6 & Under",
            AgeCategory::SevenToNine => "7-9",
            AgeCategory::TenToTwelve => "10-12",
            AgeCategory::ThirteenToFifteen => "13-15",
            AgeCategory::SixteenToEighteen => "16-18",
            AgeCategory::NineteenToTwentyFive => "19-25",
            AgeCategory::TwentySixAndOver => "26 & Over",
        }
    }

    /// 从标签解析（忽略首尾空白）
    ///
    /// # 返回
    /// - Some(AgeCategory): 已知年龄组
    /// - None: 不在枚举范围内
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

impl fmt::Display for AgeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 表演类型 (Performance Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PerformanceType {
    Solo,
    Duet,
    Trio,
    Group,
}

impl PerformanceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PerformanceType::Solo => "SOLO",
            PerformanceType::Duet => "DUET",
            PerformanceType::Trio => "TRIO",
            PerformanceType::Group => "GROUP",
        }
    }

    /// 解析表演类型（大小写不敏感）
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SOLO" => Some(PerformanceType::Solo),
            "DUET" => Some(PerformanceType::Duet),
            "TRIO" => Some(PerformanceType::Trio),
            "GROUP" => Some(PerformanceType::Group),
            _ => None,
        }
    }
}

impl fmt::Display for PerformanceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 排名视图 (Ranking View)
// ==========================================
// all:        按 (赛区, 年龄组, 表演类型) 分组的完整排名
// top5_age:   按年龄组重新分组，取前 N
// top5_style: 按舞种重新分组，取前 N
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingView {
    All,
    #[serde(rename = "top5_age")]
    TopByAge,
    #[serde(rename = "top5_style")]
    TopByStyle,
}

impl RankingView {
    pub fn as_str(&self) -> &'static str {
        match self {
            RankingView::All => "all",
            RankingView::TopByAge => "top5_age",
            RankingView::TopByStyle => "top5_style",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "all" => Some(RankingView::All),
            "top5_age" => Some(RankingView::TopByAge),
            "top5_style" => Some(RankingView::TopByStyle),
            _ => None,
        }
    }
}

impl fmt::Display for RankingView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// Top-N 边界并列策略 (Tie Boundary Policy)
// ==========================================
// CAP:          严格按位置截断，恰好 N 行
// INCLUDE_TIES: 与第 N 名同分的条目全部保留
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TieBoundaryPolicy {
    #[default]
    Cap,
    IncludeTies,
}

impl TieBoundaryPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            TieBoundaryPolicy::Cap => "CAP",
            TieBoundaryPolicy::IncludeTies => "INCLUDE_TIES",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CAP" => Some(TieBoundaryPolicy::Cap),
            "INCLUDE_TIES" => Some(TieBoundaryPolicy::IncludeTies),
            _ => None,
        }
    }
}

impl fmt::Display for TieBoundaryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_age_category_parse() {
        assert_eq!(AgeCategory::parse("10-12"), Some(AgeCategory::TenToTwelve));
        assert_eq!(AgeCategory::parse(" 26 & Over "), Some(AgeCategory::TwentySixAndOver));
        assert_eq!(AgeCategory::parse("10 - 12"), None);
        assert_eq!(AgeCategory::parse(""), None);
    }

    #[test]
    fn test_age_category_label_roundtrip() {
        for category in AgeCategory::ALL {
            assert_eq!(AgeCategory::parse(category.as_str()), Some(category));
        }
    }

    #[test]
    fn test_performance_type_parse_case_insensitive() {
        assert_eq!(PerformanceType::parse("solo"), Some(PerformanceType::Solo));
        assert_eq!(PerformanceType::parse("Group"), Some(PerformanceType::Group));
        assert_eq!(PerformanceType::parse("quartet"), None);
    }

    #[test]
    fn test_ranking_view_parse() {
        assert_eq!(RankingView::parse("all"), Some(RankingView::All));
        assert_eq!(RankingView::parse("top5_age"), Some(RankingView::TopByAge));
        assert_eq!(RankingView::parse("top5_style"), Some(RankingView::TopByStyle));
        assert_eq!(RankingView::parse("top10"), None);
    }

    #[test]
    fn test_ranking_view_serde_matches_wire_names() {
        let json = serde_json::to_string(&RankingView::TopByStyle).unwrap();
        assert_eq!(json, "\"top5_style\"");
    }

    #[test]
    fn test_tie_policy_default_is_cap() {
        assert_eq!(TieBoundaryPolicy::default(), TieBoundaryPolicy::Cap);
        assert_eq!(TieBoundaryPolicy::parse("include_ties"), Some(TieBoundaryPolicy::IncludeTies));
    }
}
