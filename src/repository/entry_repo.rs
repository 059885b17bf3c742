// ==========================================
// 舞蹈比赛计分系统 - 参赛条目数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 红线: 晋级标记只通过 set_qualification 人工写入
// ==========================================

use crate::domain::action_log::ActionLog;
use crate::domain::entry::Entry;
use crate::repository::action_log_repo::ActionLogRepository;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::row_mapping::{format_ts, parse_opt_ts};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

const SELECT_ENTRY_SQL: &str = r#"
    SELECT entry_id, performance_id, qualified, qualified_updated_at, qualified_by
    FROM competition_entry
"#;

// ==========================================
// EntryRepository - 参赛条目仓储
// ==========================================
pub struct EntryRepository {
    conn: Arc<Mutex<Connection>>,
}

impl EntryRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        Ok(self.conn.lock()?)
    }

    /// 创建参赛条目
    pub fn insert(&self, entry: &Entry) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO competition_entry (
                entry_id, performance_id, qualified, qualified_updated_at, qualified_by
            ) VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                entry.entry_id,
                entry.performance_id,
                entry.qualified,
                entry.qualified_updated_at.as_ref().map(format_ts),
                entry.qualified_by,
            ],
        )?;
        Ok(())
    }

    /// 按ID查询
    pub fn find_by_id(&self, entry_id: &str) -> RepositoryResult<Option<Entry>> {
        let conn = self.get_conn()?;
        let sql = format!("{} WHERE entry_id = ?1", SELECT_ENTRY_SQL);
        let entry = conn
            .query_row(&sql, params![entry_id], map_entry_row)
            .optional()?;
        Ok(entry)
    }

    /// 设置晋级标记（幂等），并在同一事务中写入操作日志
    ///
    /// 任一写入失败则整体回滚，标记与日志保持一致
    ///
    /// # 返回
    /// - Ok(()): 成功（值未变化时同样成功）
    /// - Err(RepositoryError::NotFound): 条目不存在
    pub fn set_qualification(
        &self,
        entry_id: &str,
        qualified: bool,
        operator: &str,
        updated_at: NaiveDateTime,
        log: &ActionLog,
    ) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;
        let rows = tx.execute(
            r#"
            UPDATE competition_entry
            SET qualified = ?2, qualified_updated_at = ?3, qualified_by = ?4
            WHERE entry_id = ?1
            "#,
            params![entry_id, qualified, format_ts(&updated_at), operator],
        )?;

        if rows == 0 {
            return Err(RepositoryError::not_found("Entry", entry_id));
        }

        ActionLogRepository::insert_tx(&tx, log)?;
        tx.commit()?;
        Ok(())
    }

    /// 查询所有已晋级条目
    pub fn list_qualified(&self) -> RepositoryResult<Vec<Entry>> {
        let conn = self.get_conn()?;
        let sql = format!("{} WHERE qualified = 1 ORDER BY entry_id ASC", SELECT_ENTRY_SQL);
        let mut stmt = conn.prepare(&sql)?;
        let entries = stmt
            .query_map([], map_entry_row)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(entries)
    }
}

fn map_entry_row(row: &Row<'_>) -> SqliteResult<Entry> {
    Ok(Entry {
        entry_id: row.get(0)?,
        performance_id: row.get(1)?,
        qualified: row.get(2)?,
        qualified_updated_at: parse_opt_ts(3, row.get(3)?)?,
        qualified_by: row.get(4)?,
    })
}
