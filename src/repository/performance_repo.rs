// ==========================================
// 舞蹈比赛计分系统 - 赛项/表演数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

use crate::domain::performance::{Event, EventScoreSummary, Performance, PerformanceFilter};
use crate::repository::collaborators::PerformanceCatalog;
use crate::repository::error::RepositoryResult;
use crate::repository::row_mapping::{parse_age_category, parse_performance_type};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

const SELECT_PERFORMANCE_SQL: &str = r#"
    SELECT
        p.performance_id, p.event_id, p.title, p.item_style, p.mastery_level,
        p.contestant_name, p.region, p.age_category, p.performance_type,
        e.name
    FROM performance p
    JOIN event e ON e.event_id = p.event_id
    WHERE 1 = 1
"#;

// ==========================================
// PerformanceRepository - 赛项/表演仓储
// ==========================================
pub struct PerformanceRepository {
    conn: Arc<Mutex<Connection>>,
}

impl PerformanceRepository {
    /// 从共享连接创建仓储实例
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        Ok(self.conn.lock()?)
    }

    // ==========================================
    // 写入操作（报名子系统导入用）
    // ==========================================

    /// 创建赛项
    pub fn insert_event(&self, event: &Event) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO event (event_id, name, region, age_category, performance_type)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                event.event_id,
                event.name,
                event.region,
                event.age_category.as_str(),
                event.performance_type.as_str(),
            ],
        )?;
        Ok(())
    }

    /// 创建表演
    ///
    /// 说明: event_name 为关联字段，不落库
    pub fn insert_performance(&self, performance: &Performance) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO performance (
                performance_id, event_id, title, item_style, mastery_level,
                contestant_name, region, age_category, performance_type
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                performance.performance_id,
                performance.event_id,
                performance.title,
                performance.item_style,
                performance.mastery_level,
                performance.contestant_name,
                performance.region,
                performance.age_category.as_str(),
                performance.performance_type.as_str(),
            ],
        )?;
        Ok(())
    }

    // ==========================================
    // 查询操作
    // ==========================================

    /// 按ID查询赛项
    pub fn find_event(&self, event_id: &str) -> RepositoryResult<Option<Event>> {
        let conn = self.get_conn()?;
        let event = conn
            .query_row(
                r#"
                SELECT event_id, name, region, age_category, performance_type
                FROM event
                WHERE event_id = ?1
                "#,
                params![event_id],
                |row| {
                    Ok(Event {
                        event_id: row.get(0)?,
                        name: row.get(1)?,
                        region: row.get(2)?,
                        age_category: parse_age_category(3, row.get(3)?)?,
                        performance_type: parse_performance_type(4, row.get(4)?)?,
                    })
                },
            )
            .optional()?;
        Ok(event)
    }

    /// 按ID查询表演
    pub fn find_by_id(&self, performance_id: &str) -> RepositoryResult<Option<Performance>> {
        let conn = self.get_conn()?;
        let sql = format!("{} AND p.performance_id = ?1", SELECT_PERFORMANCE_SQL);
        let performance = conn
            .query_row(&sql, params![performance_id], map_performance_row)
            .optional()?;
        Ok(performance)
    }

    /// 按条件查询表演
    ///
    /// # 参数
    /// - `filter`: 赛区/年龄组/表演类型/赛项ID（AND 组合；均为空时返回全部）
    ///
    /// # 返回
    /// 按 performance_id 升序排列的表演列表
    pub fn list(&self, filter: &PerformanceFilter) -> RepositoryResult<Vec<Performance>> {
        let (sql, args) = build_filter_sql(filter);

        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&sql)?;
        let performances = stmt
            .query_map(params_from_iter(args.iter()), map_performance_row)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(performances)
    }

    /// 查询至少有一条评分的赛项汇总
    pub fn list_events_with_scores(&self) -> RepositoryResult<Vec<EventScoreSummary>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT
                e.event_id, e.name, e.region, e.age_category, e.performance_type,
                COUNT(DISTINCT s.performance_id) AS performance_count,
                COUNT(*) AS score_count
            FROM event e
            JOIN performance p ON p.event_id = e.event_id
            JOIN score s ON s.performance_id = p.performance_id
            GROUP BY e.event_id, e.name, e.region, e.age_category, e.performance_type
            "#,
        )?;

        let mut summaries = stmt
            .query_map([], |row| {
                Ok(EventScoreSummary {
                    event_id: row.get(0)?,
                    event_name: row.get(1)?,
                    region: row.get(2)?,
                    age_category: parse_age_category(3, row.get(3)?)?,
                    performance_type: parse_performance_type(4, row.get(4)?)?,
                    performance_count: row.get(5)?,
                    score_count: row.get(6)?,
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;

        // 年龄组/类型按枚举声明顺序，与排名分组一致（文本排序会把 "10-12" 排在 "6 & Under" 前）
        summaries.sort_by(|a, b| {
            a.region
                .cmp(&b.region)
                .then(a.age_category.cmp(&b.age_category))
                .then(a.performance_type.cmp(&b.performance_type))
                .then_with(|| a.event_id.cmp(&b.event_id))
        });
        Ok(summaries)
    }
}

impl PerformanceCatalog for PerformanceRepository {
    fn list_performances(&self, filter: &PerformanceFilter) -> RepositoryResult<Vec<Performance>> {
        self.list(filter)
    }

    fn list_events_with_at_least_one_score(&self) -> RepositoryResult<Vec<EventScoreSummary>> {
        self.list_events_with_scores()
    }
}

/// 构建表演查询 SQL 与参数
fn build_filter_sql(filter: &PerformanceFilter) -> (String, Vec<String>) {
    let mut sql = String::from(SELECT_PERFORMANCE_SQL);
    let mut args: Vec<String> = Vec::new();

    if let Some(region) = &filter.region {
        args.push(region.clone());
        sql.push_str(&format!(" AND p.region = ?{}", args.len()));
    }
    if let Some(age_category) = filter.age_category {
        args.push(age_category.as_str().to_string());
        sql.push_str(&format!(" AND p.age_category = ?{}", args.len()));
    }
    if let Some(performance_type) = filter.performance_type {
        args.push(performance_type.as_str().to_string());
        sql.push_str(&format!(" AND p.performance_type = ?{}", args.len()));
    }
    if !filter.event_ids.is_empty() {
        let placeholders: Vec<String> = filter
            .event_ids
            .iter()
            .map(|id| {
                args.push(id.clone());
                format!("?{}", args.len())
            })
            .collect();
        sql.push_str(&format!(" AND p.event_id IN ({})", placeholders.join(", ")));
    }

    sql.push_str(" ORDER BY p.performance_id ASC");
    (sql, args)
}

fn map_performance_row(row: &Row<'_>) -> SqliteResult<Performance> {
    Ok(Performance {
        performance_id: row.get(0)?,
        event_id: row.get(1)?,
        title: row.get(2)?,
        item_style: row.get(3)?,
        mastery_level: row.get(4)?,
        contestant_name: row.get(5)?,
        region: row.get(6)?,
        age_category: parse_age_category(7, row.get(7)?)?,
        performance_type: parse_performance_type(8, row.get(8)?)?,
        event_name: row.get(9)?,
    })
}
