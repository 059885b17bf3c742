// ==========================================
// 舞蹈比赛计分系统 - 晋级标记 API
// ==========================================
// 职责: 人工设置晋级标记、查询条目与操作历史
// 红线: 晋级标记只由人工设置，排名计算从不读写
// 红线: 每次设置写入 ActionLog（幂等重复设置同样记录）
// ==========================================

use std::sync::Arc;
use tracing::info;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::action_log::{ActionLog, ActionType};
use crate::domain::entry::Entry;
use crate::i18n::{t, t_with_args};
use crate::repository::action_log_repo::ActionLogRepository;
use crate::repository::entry_repo::EntryRepository;

// ==========================================
// QualificationApi - 晋级标记 API
// ==========================================
pub struct QualificationApi {
    entry_repo: Arc<EntryRepository>,
    action_log_repo: Arc<ActionLogRepository>,
}

impl QualificationApi {
    /// 创建新的QualificationApi实例
    pub fn new(entry_repo: Arc<EntryRepository>, action_log_repo: Arc<ActionLogRepository>) -> Self {
        Self {
            entry_repo,
            action_log_repo,
        }
    }

    /// 设置晋级标记（幂等）
    ///
    /// # 参数
    /// - entry_id: 条目ID
    /// - qualified: 是否晋级
    /// - operator: 操作人
    ///
    /// # 返回
    /// - Ok(Entry): 更新后的条目
    /// - Err(ApiError::NotFound): 条目不存在
    pub fn set_qualification(
        &self,
        entry_id: &str,
        qualified: bool,
        operator: &str,
    ) -> ApiResult<Entry> {
        let operator = operator.trim();
        if operator.is_empty() {
            return Err(ApiError::InvalidInput(t("qualification.operator_required")));
        }

        let previous = self.get_entry(entry_id)?;
        let now = chrono::Local::now().naive_local();
        let log = ActionLog::now(
            ActionType::SetQualification,
            operator,
            Some(entry_id),
            Some(serde_json::json!({
                "performance_id": previous.performance_id,
                "previous": previous.qualified,
                "qualified": qualified,
            })),
            None,
        );
        // 标记与日志同一事务提交
        self.entry_repo
            .set_qualification(entry_id, qualified, operator, now, &log)?;

        info!(
            entry_id = entry_id,
            qualified,
            operator = operator,
            changed = previous.qualified != qualified,
            "晋级标记已设置"
        );

        self.get_entry(entry_id)
    }

    /// 查询条目
    pub fn get_entry(&self, entry_id: &str) -> ApiResult<Entry> {
        self.entry_repo.find_by_id(entry_id)?.ok_or_else(|| {
            ApiError::NotFound(t_with_args(
                "qualification.entry_not_found",
                &[("id", entry_id)],
            ))
        })
    }

    /// 查询所有已晋级条目
    pub fn list_qualified_entries(&self) -> ApiResult<Vec<Entry>> {
        Ok(self.entry_repo.list_qualified()?)
    }

    /// 查询条目的操作历史（按时间倒序）
    pub fn list_action_logs_by_entry(&self, entry_id: &str) -> ApiResult<Vec<ActionLog>> {
        self.get_entry(entry_id)?;
        Ok(self.action_log_repo.find_by_target(entry_id)?)
    }
}
