// ==========================================
// 舞蹈比赛计分系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::types::TieBoundaryPolicy;
use rusqlite::{params, Connection};
use serde_json::json;
use std::collections::BTreeMap;
use std::error::Error;
use std::sync::{Arc, Mutex};

/// 默认 Top-N 名额
pub const DEFAULT_TOP_N: usize = 5;

/// 默认界面语言
pub const DEFAULT_LOCALE: &str = "en";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> Result<Self, Box<dyn Error>> {
        let conn = open_sqlite_connection(db_path)?;
        crate::db::ensure_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：为保证连接行为一致，会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, Box<dyn Error>> {
        {
            let conn_guard = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    /// 写入配置值（UPSERT，scope_id='global'）
    pub fn set_config_value(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value, updated_at)
             VALUES ('global', ?1, ?2, datetime('now'))
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;

        tracing::info!(config_key = key, value = value, "配置已更新");
        Ok(())
    }

    fn get_config_or_default(&self, key: &str, default: &str) -> Result<String, Box<dyn Error>> {
        Ok(self.get_config_value(key)?.unwrap_or_else(|| default.to_string()))
    }

    /// 获取所有配置的快照（JSON格式）
    pub fn get_config_snapshot(&self) -> Result<String, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let mut stmt =
            conn.prepare("SELECT key, value FROM config_kv WHERE scope_id = 'global' ORDER BY key")?;

        let mut config_map: BTreeMap<String, String> = BTreeMap::new();
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }

        Ok(serde_json::to_string(&json!(config_map))?)
    }

    // ===== 排名配置 =====

    /// 获取 Top-N 名额
    ///
    /// # 返回
    /// - usize: 名额（默认 5）
    ///
    /// # 说明
    /// 配置值非法（非整数或 < 1）时回退默认值并告警
    pub fn get_top_n(&self) -> Result<usize, Box<dyn Error>> {
        let value = self.get_config_or_default(config_keys::TOP_N, "5")?;
        match value.trim().parse::<usize>() {
            Ok(n) if n >= 1 => Ok(n),
            _ => {
                tracing::warn!(
                    config_key = config_keys::TOP_N,
                    raw_value = %value,
                    "Top-N 配置非法，使用默认值"
                );
                Ok(DEFAULT_TOP_N)
            }
        }
    }

    /// 获取并列边界策略（默认 CAP）
    pub fn get_tie_policy(&self) -> Result<TieBoundaryPolicy, Box<dyn Error>> {
        let value = self.get_config_or_default(config_keys::TIE_POLICY, "CAP")?;
        Ok(TieBoundaryPolicy::parse(&value).unwrap_or_else(|| {
            tracing::warn!(
                config_key = config_keys::TIE_POLICY,
                raw_value = %value,
                "并列策略配置非法，使用 CAP"
            );
            TieBoundaryPolicy::Cap
        }))
    }

    /// 获取界面语言
    pub fn get_locale(&self) -> Result<String, Box<dyn Error>> {
        self.get_config_or_default(config_keys::LOCALE, DEFAULT_LOCALE)
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 排名
    pub const TOP_N: &str = "ranking/top_n";
    pub const TIE_POLICY: &str = "ranking/tie_policy";

    // 界面
    pub const LOCALE: &str = "ui/locale";
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_manager() -> ConfigManager {
        let conn = Connection::open_in_memory().unwrap();
        crate::db::ensure_schema(&conn).unwrap();
        ConfigManager::from_connection(Arc::new(Mutex::new(conn))).unwrap()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = setup_manager();
        assert_eq!(config.get_top_n().unwrap(), 5);
        assert_eq!(config.get_tie_policy().unwrap(), TieBoundaryPolicy::Cap);
        assert_eq!(config.get_locale().unwrap(), "en");
        assert!(config.get_config_value(config_keys::TOP_N).unwrap().is_none());
    }

    #[test]
    fn test_set_and_override() {
        let config = setup_manager();
        config.set_config_value(config_keys::TOP_N, "3").unwrap();
        config.set_config_value(config_keys::TOP_N, "10").unwrap();
        config
            .set_config_value(config_keys::TIE_POLICY, "include_ties")
            .unwrap();

        assert_eq!(config.get_top_n().unwrap(), 10);
        assert_eq!(config.get_tie_policy().unwrap(), TieBoundaryPolicy::IncludeTies);
    }

    #[test]
    fn test_invalid_top_n_falls_back() {
        let config = setup_manager();
        config.set_config_value(config_keys::TOP_N, "0").unwrap();
        assert_eq!(config.get_top_n().unwrap(), DEFAULT_TOP_N);

        config.set_config_value(config_keys::TOP_N, "five").unwrap();
        assert_eq!(config.get_top_n().unwrap(), DEFAULT_TOP_N);
    }

    #[test]
    fn test_config_snapshot() {
        let config = setup_manager();
        config.set_config_value(config_keys::LOCALE, "zh-CN").unwrap();
        config.set_config_value(config_keys::TOP_N, "7").unwrap();

        let snapshot: BTreeMap<String, String> =
            serde_json::from_str(&config.get_config_snapshot().unwrap()).unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot["ranking/top_n"], "7");
        assert_eq!(snapshot["ui/locale"], "zh-CN");
    }
}
