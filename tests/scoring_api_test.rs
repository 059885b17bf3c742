// ==========================================
// ScoringApi 集成测试
// ==========================================
// 测试范围:
// 1. 评分提交: 新增、覆盖（UPSERT）、操作日志
// 2. 校验: 越界分值、空评委ID、表演不存在
// 3. 重新提交后排名即时反映
// 4. 日志写入失败时评分不落库
// ==========================================

mod helpers;

use dance_tabulation::api::{ApiError, RankingQuery};
use dance_tabulation::domain::{AgeCategory, PerformanceType};
use helpers::api_test_helper::*;

fn env_with_one_performance() -> ApiTestEnv {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    env.add_event("E1", "Gauteng", AgeCategory::TenToTwelve, PerformanceType::Solo);
    env.add_performance("P1", "E1", "Jazz");
    env
}

#[test]
fn test_submit_score_creates_then_updates_in_place() {
    let env = env_with_one_performance();

    let first = env.submit_sum("J1", "P1", 70);
    assert!(first.created);
    assert_eq!(first.score.total(), 70);

    let second = env.submit_sum("J1", "P1", 75);
    assert!(!second.created);

    let scores = env.scoring_api.list_scores_for_performance("P1").unwrap();
    assert_eq!(scores.len(), 1);
    assert_eq!(scores[0].total(), 75);
}

#[test]
fn test_distinct_judges_do_not_conflict() {
    let env = env_with_one_performance();
    env.submit_sum("J2", "P1", 60);
    env.submit_sum("J1", "P1", 80);

    let scores = env.scoring_api.list_scores_for_performance("P1").unwrap();
    let judges: Vec<&str> = scores.iter().map(|s| s.judge_id.as_str()).collect();
    assert_eq!(judges, vec!["J1", "J2"]);
}

#[test]
fn test_submit_score_out_of_range_rejected() {
    let env = env_with_one_performance();

    for values in [[21, 10, 10, 10, 10], [10, 10, 10, 10, -1]] {
        let result = env.submit("J1", "P1", values);
        assert!(matches!(result, Err(ApiError::ValidationError(_))));
    }
    assert!(env.scoring_api.list_scores_for_performance("P1").unwrap().is_empty());
}

#[test]
fn test_submit_score_boundaries_accepted() {
    let env = env_with_one_performance();
    assert!(env.submit("J1", "P1", [0, 0, 0, 0, 0]).is_ok());
    assert!(env.submit("J2", "P1", [20, 20, 20, 20, 20]).is_ok());

    let result = env.ranking_api.get_performance_result("P1").unwrap();
    assert_eq!(result.total_score, 50.0);
    assert_eq!(result.average_score, 10.0);
}

#[test]
fn test_submit_score_requires_judge_id() {
    let env = env_with_one_performance();
    let result = env.submit("   ", "P1", [10, 10, 10, 10, 10]);
    assert!(matches!(result, Err(ApiError::InvalidInput(_))));
}

#[test]
fn test_submit_score_unknown_performance() {
    let env = env_with_one_performance();
    let result = env.submit("J1", "P404", [10, 10, 10, 10, 10]);
    assert!(matches!(result, Err(ApiError::NotFound(_))));

    assert!(matches!(
        env.scoring_api.list_scores_for_performance("P404"),
        Err(ApiError::NotFound(_))
    ));
}

#[test]
fn test_resubmission_reflected_in_next_ranking() {
    let env = env_with_one_performance();
    env.add_performance("P2", "E1", "Tap");
    env.submit_sum("J1", "P1", 80);
    env.submit_sum("J1", "P2", 70);

    let before = env
        .ranking_api
        .get_rankings(&RankingQuery::default(), "all")
        .unwrap();
    assert_eq!(before.rows[0].performance_id, "P1");

    env.submit_sum("J1", "P2", 90);

    let after = env
        .ranking_api
        .get_rankings(&RankingQuery::default(), "all")
        .unwrap();
    assert_eq!(after.rows[0].performance_id, "P2");
    assert_eq!(after.rows[0].total_score, 90.0);
}

#[test]
fn test_response_matches_stored_score() {
    let env = env_with_one_performance();
    let response = env.submit_sum("J1", "P1", 64);

    let stored = env.scoring_api.list_scores_for_performance("P1").unwrap();
    assert_eq!(stored, vec![response.score]);
}

#[test]
fn test_submit_score_not_saved_when_action_log_fails() {
    let env = env_with_one_performance();
    env.block_action_log();

    assert!(env.submit("J1", "P1", criteria_for_sum(70)).is_err());
    assert!(env.scoring_api.list_scores_for_performance("P1").unwrap().is_empty());

    env.unblock_action_log();
    let retry = env.submit_sum("J1", "P1", 70);
    assert!(retry.created);
}
