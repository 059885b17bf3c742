// ==========================================
// 舞蹈比赛计分系统 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// ==========================================

use std::sync::{Arc, Mutex};

use crate::api::{QualificationApi, RankingApi, ScoringApi};
use crate::config::config_manager::ConfigManager;
use crate::engine::RankingOrchestrator;
use crate::repository::{
    ActionLogRepository, EntryRepository, PerformanceRepository, ScoreRepository,
};

/// 默认数据库路径环境变量
pub const DB_PATH_ENV: &str = "DANCE_TABULATION_DB_PATH";

/// 应用状态
///
/// 包含所有API实例和共享资源
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 排名查询API
    pub ranking_api: Arc<RankingApi>,

    /// 评分提交API
    pub scoring_api: Arc<ScoringApi>,

    /// 晋级标记API
    pub qualification_api: Arc<QualificationApi>,

    /// 配置管理器
    pub config_manager: Arc<ConfigManager>,

    /// 赛项/表演仓储（报名数据导入用）
    pub performance_repo: Arc<PerformanceRepository>,

    /// 参赛条目仓储（报名数据导入用）
    pub entry_repo: Arc<EntryRepository>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    ///
    /// # 返回
    /// - Ok(AppState): 成功
    /// - Err(String): 初始化错误
    ///
    /// # 说明
    /// 该方法会：
    /// 1. 打开共享连接并建表
    /// 2. 初始化所有Repository
    /// 3. 初始化排名编排器
    /// 4. 创建所有API实例
    pub fn new(db_path: String) -> Result<Self, String> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        // 创建数据库连接（共享连接）
        let mut conn = crate::db::open_sqlite_connection(&db_path)
            .map_err(|e| format!("无法打开数据库: {}", e))?;
        crate::db::ensure_schema(&conn).map_err(|e| format!("数据库建表失败: {}", e))?;
        let schema_version = crate::db::read_schema_version(&conn)
            .map_err(|e| format!("读取 schema_version 失败: {}", e))?;
        tracing::debug!(schema_version = ?schema_version, "数据库 schema 已就绪");
        crate::perf::install_sqlite_tracing(&mut conn);
        let conn = Arc::new(Mutex::new(conn));

        // ==========================================
        // 初始化Repository层
        // ==========================================
        let score_repo = Arc::new(ScoreRepository::new(conn.clone()));
        let performance_repo = Arc::new(PerformanceRepository::new(conn.clone()));
        let entry_repo = Arc::new(EntryRepository::new(conn.clone()));
        let action_log_repo = Arc::new(ActionLogRepository::new(conn.clone()));

        // 配置管理器
        let config_manager = Arc::new(
            ConfigManager::from_connection(conn.clone())
                .map_err(|e| format!("无法创建ConfigManager: {}", e))?,
        );

        match config_manager.get_locale() {
            Ok(locale) => {
                let applied = crate::i18n::set_locale(&locale);
                tracing::debug!(locale = applied, "界面语言已设置");
            }
            Err(e) => tracing::warn!("读取界面语言失败，使用默认语言: {}", e),
        }

        // ==========================================
        // 初始化Engine层
        // ==========================================
        let orchestrator = Arc::new(RankingOrchestrator::new(
            score_repo.clone(),
            performance_repo.clone(),
        ));

        // ==========================================
        // 创建API实例
        // ==========================================
        let ranking_api = Arc::new(RankingApi::new(
            orchestrator,
            performance_repo.clone(),
            config_manager.clone(),
        ));
        let scoring_api = Arc::new(ScoringApi::new(
            score_repo,
            performance_repo.clone(),
        ));
        let qualification_api = Arc::new(QualificationApi::new(entry_repo.clone(), action_log_repo));

        tracing::info!("AppState初始化完成");

        Ok(Self {
            db_path,
            ranking_api,
            scoring_api,
            qualification_api,
            config_manager,
            performance_repo,
            entry_repo,
        })
    }

    /// 获取数据库路径
    pub fn get_db_path(&self) -> &str {
        &self.db_path
    }
}

// ==========================================
// 默认数据库路径辅助函数
// ==========================================

/// 获取默认数据库路径
///
/// # 返回
/// - 环境变量 DANCE_TABULATION_DB_PATH（非空时）
/// - 否则: 用户数据目录/dance-tabulation/dance_tabulation.db
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    if let Ok(path) = std::env::var(DB_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./dance_tabulation.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("dance-tabulation");
        // 目录创建失败时回退到当前目录
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("dance_tabulation.db");
        }
    }

    path.to_string_lossy().to_string()
}
