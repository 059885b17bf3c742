// ==========================================
// API集成测试辅助工具
// ==========================================
// 职责: 提供API层集成测试的通用辅助函数
// ==========================================

#![allow(dead_code)]

#[path = "../test_helpers.rs"]
mod test_helpers;

use std::sync::Arc;
use tempfile::NamedTempFile;

use dance_tabulation::api::{
    QualificationApi, RankingApi, ScoreSubmission, ScoringApi, SubmitScoreResponse,
};
use dance_tabulation::app::AppState;
use dance_tabulation::config::ConfigManager;
use dance_tabulation::domain::{AgeCategory, Entry, Event, Performance, PerformanceType};
use dance_tabulation::repository::{EntryRepository, PerformanceRepository};

pub use test_helpers::criteria_for_sum;

// ==========================================
// API测试环境
// ==========================================

/// API测试环境
///
/// 通过 AppState 组装，与生产环境同一套初始化流程
pub struct ApiTestEnv {
    pub db_path: String,
    pub ranking_api: Arc<RankingApi>,
    pub scoring_api: Arc<ScoringApi>,
    pub qualification_api: Arc<QualificationApi>,
    pub config_manager: Arc<ConfigManager>,

    // Repository层（用于测试数据准备）
    pub performance_repo: Arc<PerformanceRepository>,
    pub entry_repo: Arc<EntryRepository>,

    // 临时文件（确保生命周期）
    _temp_file: NamedTempFile,
}

impl ApiTestEnv {
    /// 创建新的API测试环境
    pub fn new() -> Result<Self, String> {
        dance_tabulation::logging::init_test();

        let (temp_file, db_path) = test_helpers::create_test_db()
            .map_err(|e| format!("创建测试数据库失败: {}", e))?;

        let state = AppState::new(db_path.clone())?;

        Ok(Self {
            db_path,
            ranking_api: state.ranking_api,
            scoring_api: state.scoring_api,
            qualification_api: state.qualification_api,
            config_manager: state.config_manager,
            performance_repo: state.performance_repo,
            entry_repo: state.entry_repo,
            _temp_file: temp_file,
        })
    }

    // ==========================================
    // 测试数据准备
    // ==========================================

    /// 创建赛项
    pub fn add_event(&self, event_id: &str, region: &str, age: AgeCategory, kind: PerformanceType) {
        self.performance_repo
            .insert_event(&Event {
                event_id: event_id.to_string(),
                name: format!("{} {} {}", region, age, kind),
                region: region.to_string(),
                age_category: age,
                performance_type: kind,
            })
            .expect("创建赛项失败");
    }

    /// 创建表演（地区/年龄组/类型取自赛项）
    pub fn add_performance(&self, performance_id: &str, event_id: &str, item_style: &str) {
        let event = self
            .performance_repo
            .find_event(event_id)
            .expect("查询赛项失败")
            .expect("赛项不存在");

        self.performance_repo
            .insert_performance(&Performance {
                performance_id: performance_id.to_string(),
                event_id: event_id.to_string(),
                title: format!("Routine {}", performance_id),
                item_style: item_style.to_string(),
                mastery_level: "Open".to_string(),
                contestant_name: format!("Dancer {}", performance_id),
                region: event.region,
                age_category: event.age_category,
                performance_type: event.performance_type,
                event_name: event.name,
            })
            .expect("创建表演失败");
    }

    /// 创建参赛条目
    pub fn add_entry(&self, entry_id: &str, performance_id: &str) {
        self.entry_repo
            .insert(&Entry::new(entry_id.to_string(), performance_id.to_string()))
            .expect("创建条目失败");
    }

    /// 让后续操作日志写入失败（触发器拒绝插入）
    pub fn block_action_log(&self) {
        self.raw_connection()
            .execute_batch(
                r#"
                CREATE TRIGGER block_action_log BEFORE INSERT ON action_log
                BEGIN SELECT RAISE(ABORT, 'action_log unavailable'); END;
                "#,
            )
            .expect("创建触发器失败");
    }

    /// 恢复操作日志写入
    pub fn unblock_action_log(&self) {
        self.raw_connection()
            .execute_batch("DROP TRIGGER IF EXISTS block_action_log")
            .expect("删除触发器失败");
    }

    fn raw_connection(&self) -> rusqlite::Connection {
        test_helpers::open_test_connection(&self.db_path).expect("打开测试数据库失败")
    }

    /// 以指定五项之和提交评分
    pub fn submit_sum(&self, judge_id: &str, performance_id: &str, sum: u32) -> SubmitScoreResponse {
        self.submit(judge_id, performance_id, criteria_for_sum(sum))
            .expect("提交评分失败")
    }

    /// 提交评分（原始五项）
    pub fn submit(
        &self,
        judge_id: &str,
        performance_id: &str,
        values: [i32; 5],
    ) -> dance_tabulation::api::ApiResult<SubmitScoreResponse> {
        self.scoring_api.submit_score(&ScoreSubmission {
            judge_id: judge_id.to_string(),
            performance_id: performance_id.to_string(),
            technique: values[0],
            musicality: values[1],
            performance: values[2],
            styling: values[3],
            overall_impression: values[4],
            comments: None,
        })
    }
}
