// ==========================================
// 舞蹈比赛计分系统 - 评分数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 红线: (judge_id, performance_id) 唯一，重复提交走 UPSERT 原地更新
// ==========================================

use crate::domain::action_log::ActionLog;
use crate::domain::score::{CriterionScores, Score};
use crate::repository::action_log_repo::ActionLogRepository;
use crate::repository::collaborators::ScoreStore;
use crate::repository::error::RepositoryResult;
use crate::repository::row_mapping::{format_ts, parse_ts};
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

const SELECT_SCORE_SQL: &str = r#"
    SELECT
        judge_id, performance_id,
        technique, musicality, performance, styling, overall_impression,
        comments, submitted_at
    FROM score
"#;

// ==========================================
// ScoreRepository - 评分仓储
// ==========================================
pub struct ScoreRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ScoreRepository {
    /// 从共享连接创建仓储实例
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        Ok(self.conn.lock()?)
    }

    /// 写入或更新评分，并在同一事务中写入操作日志
    ///
    /// 同一评委对同一表演重复提交时覆盖原记录（last-write-wins）；
    /// `log_for` 接收是否新增，生成对应日志。日志写入失败时评分一并回滚
    ///
    /// # 返回
    /// - Ok(true): 新插入
    /// - Ok(false): 覆盖已有记录
    pub fn upsert(
        &self,
        score: &Score,
        log_for: impl FnOnce(bool) -> ActionLog,
    ) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;

        let existed: bool = tx
            .query_row(
                "SELECT 1 FROM score WHERE judge_id = ?1 AND performance_id = ?2",
                params![score.judge_id, score.performance_id],
                |_row| Ok(true),
            )
            .optional()?
            .unwrap_or(false);

        tx.execute(
            r#"
            INSERT INTO score (
                judge_id, performance_id,
                technique, musicality, performance, styling, overall_impression,
                comments, submitted_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            ON CONFLICT(judge_id, performance_id) DO UPDATE SET
                technique = excluded.technique,
                musicality = excluded.musicality,
                performance = excluded.performance,
                styling = excluded.styling,
                overall_impression = excluded.overall_impression,
                comments = excluded.comments,
                submitted_at = excluded.submitted_at
            "#,
            params![
                score.judge_id,
                score.performance_id,
                score.criteria.technique,
                score.criteria.musicality,
                score.criteria.performance,
                score.criteria.styling,
                score.criteria.overall_impression,
                score.comments,
                format_ts(&score.submitted_at),
            ],
        )?;

        let created = !existed;
        ActionLogRepository::insert_tx(&tx, &log_for(created))?;
        tx.commit()?;
        Ok(created)
    }

    /// 查询表演的全部评分（按评委ID排序）
    pub fn list_by_performance(&self, performance_id: &str) -> RepositoryResult<Vec<Score>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "{} WHERE performance_id = ?1 ORDER BY judge_id ASC",
            SELECT_SCORE_SQL
        );
        let mut stmt = conn.prepare(&sql)?;
        let scores = stmt
            .query_map(params![performance_id], map_score_row)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(scores)
    }
}

impl ScoreStore for ScoreRepository {
    fn list_scores(&self, performance_id: &str) -> RepositoryResult<Vec<Score>> {
        self.list_by_performance(performance_id)
    }
}

fn map_score_row(row: &Row<'_>) -> SqliteResult<Score> {
    Ok(Score {
        judge_id: row.get(0)?,
        performance_id: row.get(1)?,
        criteria: CriterionScores {
            technique: row.get(2)?,
            musicality: row.get(3)?,
            performance: row.get(4)?,
            styling: row.get(5)?,
            overall_impression: row.get(6)?,
        },
        comments: row.get(7)?,
        submitted_at: parse_ts(8, row.get(8)?)?,
    })
}
