// ==========================================
// 舞蹈比赛计分系统 - 分组排名引擎
// ==========================================
// 职责: 按分组键切分已汇总表演，组内排序并分配竞赛名次
// 红线: 排序确定: total_score 降序，同分按 performance_id 升序
// 红线: 竞赛名次 (1,1,3,4): 仅当分数与前一名不同时名次才推进到当前位置
// ==========================================

use crate::domain::ranking::{Grouping, RankedRow, RankingGroupKey, ScoredPerformance};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// 为已按分数降序排列的序列分配竞赛名次
///
/// `[90, 90, 85, 80]` → `[1, 1, 3, 4]`
pub fn assign_competition_ranks(sorted_scores: &[f64]) -> Vec<u32> {
    let mut ranks = Vec::with_capacity(sorted_scores.len());
    let mut current_rank = 0u32;

    for (idx, score) in sorted_scores.iter().enumerate() {
        let position = idx as u32 + 1;
        match idx.checked_sub(1).map(|prev| sorted_scores[prev]) {
            Some(prev_score) if prev_score == *score => {}
            _ => current_rank = position,
        }
        ranks.push(current_rank);
    }

    ranks
}

/// 排名排序比较: total_score 降序, performance_id 升序
pub fn compare_for_ranking(a: &ScoredPerformance, b: &ScoredPerformance) -> Ordering {
    b.result
        .total_score
        .total_cmp(&a.result.total_score)
        .then_with(|| a.result.performance_id.cmp(&b.result.performance_id))
}

// ==========================================
// RankingEngine - 分组排名引擎
// ==========================================
#[derive(Debug, Default, Clone, Copy)]
pub struct RankingEngine;

impl RankingEngine {
    pub fn new() -> Self {
        Self
    }

    /// 分组排名
    ///
    /// # 返回
    /// 分组键升序的 (分组键, 组内已排名行) 列表
    #[instrument(skip(self, population), fields(count = population.len(), grouping = ?grouping))]
    pub fn rank_groups(
        &self,
        population: Vec<ScoredPerformance>,
        grouping: Grouping,
    ) -> Vec<(RankingGroupKey, Vec<RankedRow>)> {
        let mut groups: BTreeMap<RankingGroupKey, Vec<ScoredPerformance>> = BTreeMap::new();
        for item in population {
            if !item.result.is_rankable() {
                debug!(
                    performance_id = %item.result.performance_id,
                    "judge_count = 0，跳过排名"
                );
                continue;
            }
            groups
                .entry(grouping.key_for(&item.performance))
                .or_default()
                .push(item);
        }

        groups
            .into_iter()
            .map(|(key, mut members)| {
                members.sort_by(compare_for_ranking);
                let totals: Vec<f64> = members.iter().map(|m| m.result.total_score).collect();
                let ranks = assign_competition_ranks(&totals);

                let rows = members
                    .into_iter()
                    .zip(ranks)
                    .map(|(member, rank)| RankedRow {
                        group_key: key.clone(),
                        rank,
                        performance: member.performance,
                        result: member.result,
                    })
                    .collect();
                (key, rows)
            })
            .collect()
    }

    /// 分组排名并展平输出
    pub fn rank(&self, population: Vec<ScoredPerformance>, grouping: Grouping) -> Vec<RankedRow> {
        self.rank_groups(population, grouping)
            .into_iter()
            .flat_map(|(_, rows)| rows)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::performance::Performance;
    use crate::domain::ranking::AggregatedResult;
    use crate::domain::types::{AgeCategory, PerformanceType};

    fn scored(id: &str, region: &str, age: AgeCategory, total: f64, judges: u32) -> ScoredPerformance {
        ScoredPerformance {
            performance: Performance {
                performance_id: id.to_string(),
                event_id: "E1".to_string(),
                title: format!("Title {}", id),
                item_style: "Jazz".to_string(),
                mastery_level: "Open".to_string(),
                contestant_name: format!("Dancer {}", id),
                region: region.to_string(),
                age_category: age,
                performance_type: PerformanceType::Solo,
                event_name: "Solo".to_string(),
            },
            result: AggregatedResult {
                performance_id: id.to_string(),
                total_score: total,
                average_score: total / 5.0,
                judge_count: judges,
            },
        }
    }

    #[test]
    fn test_competition_ranks() {
        assert_eq!(assign_competition_ranks(&[90.0, 90.0, 85.0, 80.0]), vec![1, 1, 3, 4]);
        assert_eq!(assign_competition_ranks(&[70.0, 70.0, 70.0]), vec![1, 1, 1]);
        assert_eq!(assign_competition_ranks(&[99.0, 80.0, 80.0, 80.0, 10.0]), vec![1, 2, 2, 2, 5]);
        assert!(assign_competition_ranks(&[]).is_empty());
    }

    #[test]
    fn test_rank_within_group_with_tie_break() {
        let population = vec![
            scored("P3", "Gauteng", AgeCategory::TenToTwelve, 85.0, 2),
            scored("P2", "Gauteng", AgeCategory::TenToTwelve, 90.0, 2),
            scored("P1", "Gauteng", AgeCategory::TenToTwelve, 90.0, 3),
            scored("P4", "Gauteng", AgeCategory::TenToTwelve, 80.0, 1),
        ];

        let rows = RankingEngine::new().rank(population, Grouping::RegionAgeType);
        let ids: Vec<&str> = rows.iter().map(|r| r.performance.performance_id.as_str()).collect();
        let ranks: Vec<u32> = rows.iter().map(|r| r.rank).collect();

        assert_eq!(ids, vec!["P1", "P2", "P3", "P4"]);
        assert_eq!(ranks, vec![1, 1, 3, 4]);
    }

    #[test]
    fn test_groups_ranked_independently_in_key_order() {
        let population = vec![
            scored("P1", "Western Cape", AgeCategory::TenToTwelve, 70.0, 1),
            scored("P2", "Gauteng", AgeCategory::ThirteenToFifteen, 60.0, 1),
            scored("P3", "Gauteng", AgeCategory::TenToTwelve, 50.0, 1),
            scored("P4", "Gauteng", AgeCategory::TenToTwelve, 55.0, 1),
        ];

        let groups = RankingEngine::new().rank_groups(population, Grouping::RegionAgeType);
        let labels: Vec<String> = groups.iter().map(|(k, _)| k.label()).collect();
        assert_eq!(
            labels,
            vec![
                "Gauteng / 10-12 / SOLO",
                "Gauteng / 13-15 / SOLO",
                "Western Cape / 10-12 / SOLO",
            ]
        );

        let first: Vec<(&str, u32)> = groups[0]
            .1
            .iter()
            .map(|r| (r.performance.performance_id.as_str(), r.rank))
            .collect();
        assert_eq!(first, vec![("P4", 1), ("P3", 2)]);
        assert_eq!(groups[1].1[0].rank, 1);
        assert_eq!(groups[2].1[0].rank, 1);
    }

    #[test]
    fn test_zero_judge_results_never_ranked() {
        let population = vec![
            scored("P1", "Gauteng", AgeCategory::TenToTwelve, 0.0, 0),
            scored("P2", "Gauteng", AgeCategory::TenToTwelve, 40.0, 1),
        ];

        let rows = RankingEngine::new().rank(population, Grouping::AgeCategory);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].performance.performance_id, "P2");
    }

    #[test]
    fn test_rank_is_idempotent() {
        let population = vec![
            scored("P1", "Gauteng", AgeCategory::TenToTwelve, 75.5, 2),
            scored("P2", "Gauteng", AgeCategory::TenToTwelve, 75.5, 2),
            scored("P3", "Gauteng", AgeCategory::SevenToNine, 60.0, 2),
        ];

        let engine = RankingEngine::new();
        let first = engine.rank(population.clone(), Grouping::RegionAgeType);
        let second = engine.rank(population, Grouping::RegionAgeType);
        assert_eq!(first, second);
    }
}
