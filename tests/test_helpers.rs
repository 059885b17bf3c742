// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供测试所需的数据库初始化、测试数据插入等功能
// ==========================================

#![allow(dead_code)]

use rusqlite::{params, Connection};
use std::error::Error;
use tempfile::NamedTempFile;

/// 创建临时测试数据库并初始化 schema
///
/// # 返回
/// - NamedTempFile: 临时数据库文件（需要保持存活）
/// - String: 数据库文件路径
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file
        .path()
        .to_str()
        .ok_or("临时文件路径非 UTF-8")?
        .to_string();

    let conn = open_test_connection(&db_path)?;
    dance_tabulation::db::ensure_schema(&conn)?;

    Ok((temp_file, db_path))
}

/// 打开测试数据库连接（统一 PRAGMA）
pub fn open_test_connection(db_path: &str) -> Result<Connection, Box<dyn Error>> {
    Ok(dance_tabulation::db::open_sqlite_connection(db_path)?)
}

/// 插入测试配置
pub fn insert_test_config(conn: &Connection, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
    conn.execute(
        "INSERT OR REPLACE INTO config_kv (scope_id, key, value, updated_at)
         VALUES ('global', ?1, ?2, datetime('now'))",
        params![key, value],
    )?;
    Ok(())
}

/// 将单项分值展开为五项评分，用于凑出指定的五项之和
///
/// 例如 sum=92 → [19, 19, 18, 18, 18]
pub fn criteria_for_sum(sum: u32) -> [i32; 5] {
    assert!(sum <= 100, "sum must be within 0..=100");
    let base = (sum / 5) as i32;
    let extra = (sum % 5) as usize;
    let mut values = [base; 5];
    for value in values.iter_mut().take(extra) {
        *value += 1;
    }
    values
}
