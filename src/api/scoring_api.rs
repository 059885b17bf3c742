// ==========================================
// 舞蹈比赛计分系统 - 评分提交 API
// ==========================================
// 职责: 评委评分提交（UPSERT）、评分查询
// 红线: 每个 (judge_id, performance_id) 至多一条评分，重复提交原地更新
// 红线: 所有提交写入 ActionLog
// ==========================================

use std::sync::Arc;
use chrono::SubsecRound;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::action_log::{ActionLog, ActionType};
use crate::domain::score::{CriterionScores, Score};
use crate::i18n::{t, t_with_args};
use crate::perf::PerfGuard;
use crate::repository::performance_repo::PerformanceRepository;
use crate::repository::score_repo::ScoreRepository;

// ==========================================
// 请求/响应 DTO
// ==========================================

/// 评分提交请求
///
/// 各项使用 i32 接收，越界值（负数、> 20）在校验阶段拒绝
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreSubmission {
    pub judge_id: String,
    pub performance_id: String,
    pub technique: i32,
    pub musicality: i32,
    pub performance: i32,
    pub styling: i32,
    pub overall_impression: i32,
    pub comments: Option<String>,
}

impl ScoreSubmission {
    /// 校验并转换为五项评分
    fn criteria(&self) -> ApiResult<CriterionScores> {
        let fields = [
            ("technique", self.technique),
            ("musicality", self.musicality),
            ("performance", self.performance),
            ("styling", self.styling),
            ("overall_impression", self.overall_impression),
        ];

        let mut values = [0u8; 5];
        for (slot, (field, value)) in values.iter_mut().zip(fields) {
            *slot = u8::try_from(value)
                .ok()
                .filter(|v| *v <= CriterionScores::MAX_PER_CRITERION)
                .ok_or_else(|| {
                    ApiError::ValidationError(t_with_args(
                        "score.out_of_range",
                        &[("field", field), ("value", &value.to_string())],
                    ))
                })?;
        }

        let [technique, musicality, performance, styling, overall_impression] = values;
        Ok(CriterionScores::new(
            technique,
            musicality,
            performance,
            styling,
            overall_impression,
        ))
    }
}

/// 评分提交响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitScoreResponse {
    /// true: 新增; false: 覆盖已有评分
    pub created: bool,
    pub score: Score,
}

// ==========================================
// ScoringApi - 评分提交 API
// ==========================================
pub struct ScoringApi {
    score_repo: Arc<ScoreRepository>,
    performance_repo: Arc<PerformanceRepository>,
}

impl ScoringApi {
    /// 创建新的ScoringApi实例
    pub fn new(
        score_repo: Arc<ScoreRepository>,
        performance_repo: Arc<PerformanceRepository>,
    ) -> Self {
        Self {
            score_repo,
            performance_repo,
        }
    }

    /// 提交评分
    ///
    /// # 返回
    /// - Ok(SubmitScoreResponse): 成功
    /// - Err(ApiError::InvalidInput): 评委ID为空
    /// - Err(ApiError::ValidationError): 评分项越界
    /// - Err(ApiError::NotFound): 表演不存在
    pub fn submit_score(&self, submission: &ScoreSubmission) -> ApiResult<SubmitScoreResponse> {
        let _perf = PerfGuard::new("api.submit_score");

        let judge_id = submission.judge_id.trim();
        if judge_id.is_empty() {
            return Err(ApiError::InvalidInput(t("score.judge_required")));
        }
        let criteria = submission.criteria()?;
        self.ensure_performance_exists(&submission.performance_id)?;

        let score = Score {
            judge_id: judge_id.to_string(),
            performance_id: submission.performance_id.clone(),
            criteria,
            comments: submission
                .comments
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string),
            // 库中时间精确到秒
            submitted_at: chrono::Local::now().naive_local().trunc_subsecs(0),
        };

        let created = self.score_repo.upsert(&score, |created| {
            ActionLog::now(
                ActionType::SubmitScore,
                judge_id,
                Some(&score.performance_id),
                Some(serde_json::json!({
                    "created": created,
                    "criteria": criteria,
                    "total": score.total(),
                })),
                None,
            )
        })?;

        info!(
            judge_id = %score.judge_id,
            performance_id = %score.performance_id,
            total = score.total(),
            created,
            "评分已提交"
        );

        Ok(SubmitScoreResponse { created, score })
    }

    /// 查询表演的全部评分（按评委ID排序）
    pub fn list_scores_for_performance(&self, performance_id: &str) -> ApiResult<Vec<Score>> {
        self.ensure_performance_exists(performance_id)?;
        Ok(self.score_repo.list_by_performance(performance_id)?)
    }

    fn ensure_performance_exists(&self, performance_id: &str) -> ApiResult<()> {
        match self.performance_repo.find_by_id(performance_id)? {
            Some(_) => Ok(()),
            None => Err(ApiError::NotFound(t_with_args(
                "score.performance_not_found",
                &[("id", performance_id)],
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(values: [i32; 5]) -> ScoreSubmission {
        ScoreSubmission {
            judge_id: "J1".to_string(),
            performance_id: "P1".to_string(),
            technique: values[0],
            musicality: values[1],
            performance: values[2],
            styling: values[3],
            overall_impression: values[4],
            comments: None,
        }
    }

    #[test]
    fn test_criteria_within_bounds() {
        let criteria = submission([0, 20, 10, 5, 15]).criteria().unwrap();
        assert_eq!(criteria.sum(), 50);
    }

    #[test]
    fn test_criteria_out_of_range() {
        for values in [[21, 0, 0, 0, 0], [0, 0, 0, 0, -1], [0, 0, 300, 0, 0]] {
            let err = submission(values).criteria().unwrap_err();
            assert!(matches!(err, ApiError::ValidationError(_)));
        }
    }
}
