// ==========================================
// 舞蹈比赛计分系统 - 命令行入口
// ==========================================
// 用法:
//   dance-tabulation [db_path] [view] [region] [age_category] [performance_type]
//                    [item_style] [event_ids] [top_n]
//
// event_ids 以逗号分隔（如 E1,E3），非空时覆盖地区/年龄组/类型条件
// 输出: 排名 CSV（stdout）；日志写 stderr
// 参数为空字符串或 "-" 时视为未设置
// DANCE_TABULATION_LOG_FORMAT=json 时输出 JSON 日志
// ==========================================

use dance_tabulation::api::RankingQuery;
use dance_tabulation::app::{get_default_db_path, AppState};
use dance_tabulation::export::write_rankings_csv;

fn optional_arg(arg: Option<String>) -> Option<String> {
    arg.map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty() && s != "-")
}

fn event_ids_arg(arg: Option<String>) -> Vec<String> {
    optional_arg(arg)
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn top_n_arg(arg: Option<String>) -> Result<Option<usize>, String> {
    optional_arg(arg)
        .map(|raw| {
            raw.parse::<usize>()
                .map_err(|_| format!("top_n 必须是正整数: {}", raw))
        })
        .transpose()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dance_tabulation::logging::init();

    let mut args = std::env::args().skip(1);
    let db_path = optional_arg(args.next()).unwrap_or_else(get_default_db_path);
    let view = optional_arg(args.next()).unwrap_or_else(|| "all".to_string());
    let query = RankingQuery {
        region: optional_arg(args.next()),
        age_category: optional_arg(args.next()),
        performance_type: optional_arg(args.next()),
        item_style: optional_arg(args.next()),
        event_ids: event_ids_arg(args.next()),
        top_n: top_n_arg(args.next())?,
    };

    let state = AppState::new(db_path)?;
    tracing::info!(
        "{} v{} 使用数据库: {}",
        dance_tabulation::APP_NAME,
        dance_tabulation::VERSION,
        state.get_db_path()
    );
    let response = state.ranking_api.get_rankings(&query, &view)?;

    if let Some(message) = &response.message {
        tracing::info!("{}", message);
    }

    let stdout = std::io::stdout();
    write_rankings_csv(stdout.lock(), &response.rows)?;
    Ok(())
}
