// ==========================================
// ConfigManager 集成测试
// ==========================================
// 测试目标: 验证基于数据库文件的配置读取/写入
// ==========================================

mod test_helpers;

use dance_tabulation::config::{config_keys, ConfigManager};
use dance_tabulation::domain::TieBoundaryPolicy;
use test_helpers::{create_test_db, insert_test_config, open_test_connection};

#[test]
fn test_config_manager_creation() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");

    let config_manager = ConfigManager::new(&db_path);
    assert!(
        config_manager.is_ok(),
        "ConfigManager should be created successfully"
    );
}

#[test]
fn test_reads_values_written_by_other_connection() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = open_test_connection(&db_path).expect("Failed to open db");
    insert_test_config(&conn, config_keys::TOP_N, "3").unwrap();
    insert_test_config(&conn, config_keys::TIE_POLICY, "INCLUDE_TIES").unwrap();
    insert_test_config(&conn, config_keys::LOCALE, "zh-CN").unwrap();

    let config_manager = ConfigManager::new(&db_path).expect("Failed to create ConfigManager");
    assert_eq!(config_manager.get_top_n().unwrap(), 3);
    assert_eq!(
        config_manager.get_tie_policy().unwrap(),
        TieBoundaryPolicy::IncludeTies
    );
    assert_eq!(config_manager.get_locale().unwrap(), "zh-CN");
}

#[test]
fn test_unknown_tie_policy_falls_back_to_cap() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let config_manager = ConfigManager::new(&db_path).unwrap();
    config_manager
        .set_config_value(config_keys::TIE_POLICY, "SOMETIMES")
        .unwrap();

    assert_eq!(config_manager.get_tie_policy().unwrap(), TieBoundaryPolicy::Cap);
}

#[test]
fn test_values_persist_across_instances() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    {
        let config_manager = ConfigManager::new(&db_path).unwrap();
        config_manager.set_config_value(config_keys::TOP_N, "8").unwrap();
    }

    let reopened = ConfigManager::new(&db_path).unwrap();
    assert_eq!(reopened.get_top_n().unwrap(), 8);
    assert!(reopened.get_config_snapshot().unwrap().contains("ranking/top_n"));
}
