use crate::domain::action_log::ActionLog;
use crate::repository::error::RepositoryResult;
use crate::repository::row_mapping::format_ts;
use rusqlite::{params, Connection, Transaction};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

const INSERT_ACTION_LOG_SQL: &str = r#"
    INSERT INTO action_log (
        action_id, action_type, action_ts, actor, target_id, payload_json, detail
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
"#;

/// 评分提交、晋级标记的审计记录（只追加）
pub struct ActionLogRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ActionLogRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    pub(super) fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        Ok(self.conn.lock()?)
    }

    /// 追加一条日志，返回 action_id
    pub fn insert(&self, log: &ActionLog) -> RepositoryResult<String> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;
        Self::insert_tx(&tx, log)?;
        tx.commit()?;
        Ok(log.action_id.clone())
    }

    /// 在调用方事务中追加日志，与业务写入同进同退
    pub(crate) fn insert_tx(tx: &Transaction, log: &ActionLog) -> RepositoryResult<()> {
        let payload = log.payload_json.as_ref().map(|v| v.to_string());
        tx.execute(
            INSERT_ACTION_LOG_SQL,
            params![
                log.action_id,
                log.action_type,
                format_ts(&log.action_ts),
                log.actor,
                log.target_id,
                payload,
                log.detail,
            ],
        )?;

        debug!(
            action_id = %log.action_id,
            action_type = %log.action_type,
            target_id = ?log.target_id,
            "操作日志已写入"
        );
        Ok(())
    }
}
