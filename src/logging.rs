// ==========================================
// 舞蹈比赛计分系统 - 日志初始化
// ==========================================
// 输出: stderr（stdout 留给排名 CSV）
// 环境变量:
// - RUST_LOG: 过滤器，默认 info，例如 RUST_LOG=dance_tabulation::engine=debug
// - DANCE_TABULATION_LOG_FORMAT: text（默认）| json
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

pub const LOG_FORMAT_ENV: &str = "DANCE_TABULATION_LOG_FORMAT";

/// 日志输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    /// 解析格式名，未知值按 Text 处理
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Text
        }
    }

    pub fn from_env() -> Self {
        std::env::var(LOG_FORMAT_ENV)
            .map(|v| Self::parse(&v))
            .unwrap_or_default()
    }
}

fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// 按环境变量选择格式并初始化
///
/// ```no_run
/// dance_tabulation::logging::init();
/// ```
pub fn init() {
    match LogFormat::from_env() {
        LogFormat::Text => fmt()
            .with_env_filter(default_filter())
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_line_number(true)
            .init(),
        LogFormat::Json => fmt()
            .json()
            .with_env_filter(default_filter())
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_current_span(false)
            .init(),
    }
}

/// 测试用日志（debug 级别，重复调用安全）
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
