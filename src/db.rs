// ==========================================
// 舞蹈比赛计分系统 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为（外键、busy_timeout）
// - 统一建表入口，启动与测试共用同一份 schema
// ==========================================

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 当前代码所期望的 schema_version
pub const CURRENT_SCHEMA_VERSION: i64 = 1;

/// 建表语句（幂等）
const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS config_kv (
    scope_id TEXT NOT NULL,
    key TEXT NOT NULL,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL DEFAULT (datetime('now')),
    PRIMARY KEY (scope_id, key)
);

CREATE TABLE IF NOT EXISTS event (
    event_id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    region TEXT NOT NULL,
    age_category TEXT NOT NULL,
    performance_type TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS performance (
    performance_id TEXT PRIMARY KEY,
    event_id TEXT NOT NULL REFERENCES event(event_id),
    title TEXT NOT NULL,
    item_style TEXT NOT NULL,
    mastery_level TEXT NOT NULL,
    contestant_name TEXT NOT NULL,
    region TEXT NOT NULL,
    age_category TEXT NOT NULL,
    performance_type TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_performance_event ON performance(event_id);
CREATE INDEX IF NOT EXISTS idx_performance_group
    ON performance(region, age_category, performance_type);

CREATE TABLE IF NOT EXISTS score (
    judge_id TEXT NOT NULL,
    performance_id TEXT NOT NULL REFERENCES performance(performance_id),
    technique INTEGER NOT NULL CHECK (technique BETWEEN 0 AND 20),
    musicality INTEGER NOT NULL CHECK (musicality BETWEEN 0 AND 20),
    performance INTEGER NOT NULL CHECK (performance BETWEEN 0 AND 20),
    styling INTEGER NOT NULL CHECK (styling BETWEEN 0 AND 20),
    overall_impression INTEGER NOT NULL CHECK (overall_impression BETWEEN 0 AND 20),
    comments TEXT,
    submitted_at TEXT NOT NULL,
    PRIMARY KEY (judge_id, performance_id)
);

CREATE INDEX IF NOT EXISTS idx_score_performance ON score(performance_id);

CREATE TABLE IF NOT EXISTS competition_entry (
    entry_id TEXT PRIMARY KEY,
    performance_id TEXT NOT NULL UNIQUE REFERENCES performance(performance_id),
    qualified INTEGER NOT NULL DEFAULT 0,
    qualified_updated_at TEXT,
    qualified_by TEXT
);

CREATE TABLE IF NOT EXISTS action_log (
    action_id TEXT PRIMARY KEY,
    action_type TEXT NOT NULL,
    action_ts TEXT NOT NULL,
    actor TEXT NOT NULL,
    target_id TEXT,
    payload_json TEXT,
    detail TEXT
);

CREATE INDEX IF NOT EXISTS idx_action_log_target ON action_log(target_id, action_ts);
"#;

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - foreign_keys 需要“每个连接”单独开启
/// - busy_timeout 需要“每个连接”单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 建表并登记 schema_version（幂等）
pub fn ensure_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)?;
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        [CURRENT_SCHEMA_VERSION],
    )?;
    Ok(())
}

/// 读取 schema_version（若表不存在则返回 None）
pub fn read_schema_version(conn: &Connection) -> rusqlite::Result<Option<i64>> {
    let has_table: bool = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version' LIMIT 1",
            [],
            |_row| Ok(true),
        )
        .optional()?
        .unwrap_or(false);

    if !has_table {
        return Ok(None);
    }

    let v: Option<i64> = conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;
    Ok(v)
}
