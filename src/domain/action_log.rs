// ==========================================
// 舞蹈比赛计分系统 - 操作日志领域模型
// ==========================================
// 红线: 所有人工写入必须记录（评分提交、晋级标记）
// 对齐: action_log 表
// ==========================================

use chrono::{NaiveDateTime, SubsecRound};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionLog {
    pub action_id: String,
    pub action_type: String,      // 存储为 ActionType::as_str()
    pub action_ts: NaiveDateTime,
    pub actor: String,
    pub target_id: Option<String>, // 条目ID / 表演ID
    pub payload_json: Option<JsonValue>,
    pub detail: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionType {
    SubmitScore,      // 评委提交/修改评分
    SetQualification, // 设置晋级标记
}

impl ActionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::SubmitScore => "SUBMIT_SCORE",
            ActionType::SetQualification => "SET_QUALIFICATION",
        }
    }
}

impl ActionLog {
    /// 以当前时间创建日志
    pub fn now(
        action_type: ActionType,
        actor: &str,
        target_id: Option<&str>,
        payload_json: Option<JsonValue>,
        detail: Option<String>,
    ) -> Self {
        Self {
            action_id: uuid::Uuid::new_v4().to_string(),
            action_type: action_type.as_str().to_string(),
            action_ts: chrono::Local::now().naive_local().trunc_subsecs(0),
            actor: actor.to_string(),
            target_id: target_id.map(|s| s.to_string()),
            payload_json,
            detail,
        }
    }
}
