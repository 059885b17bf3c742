use super::ActionLogRepository;
use crate::domain::action_log::ActionLog;
use crate::repository::error::RepositoryResult;
use crate::repository::row_mapping::parse_ts;
use rusqlite::{params, Result as SqliteResult, Row};

const SELECT_ACTION_LOG_SQL: &str = r#"
    SELECT action_id, action_type, action_ts, actor, target_id, payload_json, detail
    FROM action_log
"#;

impl ActionLogRepository {
    /// 按ID查询
    pub fn find_by_id(&self, action_id: &str) -> RepositoryResult<Option<ActionLog>> {
        let conn = self.get_conn()?;
        let sql = format!("{} WHERE action_id = ?1", SELECT_ACTION_LOG_SQL);
        let mut stmt = conn.prepare(&sql)?;
        let mut rows = stmt.query_map(params![action_id], map_action_log_row)?;
        Ok(rows.next().transpose()?)
    }

    /// 查询某个对象（条目/表演）的操作历史，按时间倒序
    pub fn find_by_target(&self, target_id: &str) -> RepositoryResult<Vec<ActionLog>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "{} WHERE target_id = ?1 ORDER BY action_ts DESC, rowid DESC",
            SELECT_ACTION_LOG_SQL
        );
        let mut stmt = conn.prepare(&sql)?;
        let logs = stmt
            .query_map(params![target_id], map_action_log_row)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(logs)
    }
}

fn map_action_log_row(row: &Row<'_>) -> SqliteResult<ActionLog> {
    let payload: Option<String> = row.get(5)?;
    Ok(ActionLog {
        action_id: row.get(0)?,
        action_type: row.get(1)?,
        action_ts: parse_ts(2, row.get(2)?)?,
        actor: row.get(3)?,
        target_id: row.get(4)?,
        // payload 损坏时不阻断查询
        payload_json: payload.and_then(|s| serde_json::from_str(&s).ok()),
        detail: row.get(6)?,
    })
}
