// ==========================================
// 舞蹈比赛计分系统 - 性能统计
// ==========================================
// 职责:
// - 统计 API 操作耗时、SQL 语句数、慢 SQL 数、结果行数
// - 通过 rusqlite profile 钩子采集 SQL（每条语句执行完回调一次）
// - 不同时安装 trace：profile 会覆盖 SQLite 的 legacy trace 钩子
// 环境变量:
// - DANCE_TABULATION_PERF_SQL=1     强制开启 SQL 统计（Debug 默认开启）
// - DANCE_TABULATION_SLOW_SQL_MS=50 慢 SQL 阈值（毫秒）
// ==========================================

use rusqlite::Connection;
use std::cell::Cell;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};

const PERF_SQL_ENV: &str = "DANCE_TABULATION_PERF_SQL";
const SLOW_SQL_MS_ENV: &str = "DANCE_TABULATION_SLOW_SQL_MS";
const SQL_LOG_MAX_CHARS: usize = 420;

static SQL_STATS_ENABLED: AtomicBool = AtomicBool::new(false);
static SLOW_SQL_MS: AtomicU64 = AtomicU64::new(0);

thread_local! {
    static GUARD_DEPTH: Cell<u32> = const { Cell::new(0) };
    static STATS: Cell<SqlStats> = const { Cell::new(SqlStats { statements: 0, slow: 0 }) };
}

/// 当前线程的 SQL 计数快照
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct SqlStats {
    statements: u64,
    slow: u64,
}

impl SqlStats {
    fn current() -> Self {
        STATS.with(|s| s.get())
    }

    fn since(self, start: SqlStats) -> SqlStats {
        SqlStats {
            statements: self.statements.saturating_sub(start.statements),
            slow: self.slow.saturating_sub(start.slow),
        }
    }
}

fn bump(update: impl FnOnce(&mut SqlStats)) {
    if GUARD_DEPTH.with(|d| d.get()) == 0 {
        return;
    }
    STATS.with(|s| {
        let mut stats = s.get();
        update(&mut stats);
        s.set(stats);
    });
}

fn env_flag(name: &str) -> Option<bool> {
    std::env::var(name).ok().map(|v| {
        matches!(
            v.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    })
}

fn one_line_sql(sql: &str) -> String {
    let flat = sql.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= SQL_LOG_MAX_CHARS {
        return flat;
    }
    let head: String = flat.chars().take(SQL_LOG_MAX_CHARS).collect();
    format!("{}…", head)
}

/// 在连接上安装 SQL 统计钩子
pub fn install_sqlite_tracing(conn: &mut Connection) {
    let enabled = env_flag(PERF_SQL_ENV).unwrap_or(cfg!(debug_assertions));
    SQL_STATS_ENABLED.store(enabled, Ordering::Relaxed);

    if !enabled {
        conn.profile(None);
        return;
    }

    let default_ms = if cfg!(debug_assertions) { 50 } else { 200 };
    let slow_ms = std::env::var(SLOW_SQL_MS_ENV)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(default_ms);
    install_profile_hook(conn, slow_ms);
}

fn install_profile_hook(conn: &mut Connection, slow_ms: u64) {
    SQL_STATS_ENABLED.store(true, Ordering::Relaxed);
    SLOW_SQL_MS.store(slow_ms, Ordering::Relaxed);
    conn.profile(Some(on_sql_finished));
}

fn on_sql_finished(sql: &str, duration: Duration) {
    if !SQL_STATS_ENABLED.load(Ordering::Relaxed) {
        return;
    }
    bump(|s| s.statements = s.statements.saturating_add(1));

    let threshold = SLOW_SQL_MS.load(Ordering::Relaxed);
    let ms = duration.as_millis() as u64;
    if threshold == 0 || ms < threshold {
        return;
    }

    tracing::warn!(
        target: "slow_sql",
        duration_ms = ms,
        sql = %one_line_sql(sql),
        "slow sql"
    );
    bump(|s| s.slow = s.slow.saturating_add(1));
}

/// 操作级性能统计
///
/// Drop 时输出一条 `target: "perf"` 日志；嵌套 Guard 各自统计自身区间
///
/// ```ignore
/// let mut perf = dance_tabulation::perf::PerfGuard::new("api.get_rankings");
/// perf.set_rows(rows.len());
/// ```
pub struct PerfGuard {
    op: &'static str,
    start: Instant,
    sql_start: SqlStats,
    rows: Option<usize>,
}

impl PerfGuard {
    pub fn new(op: &'static str) -> Self {
        GUARD_DEPTH.with(|d| d.set(d.get().saturating_add(1)));
        Self {
            op,
            start: Instant::now(),
            sql_start: SqlStats::current(),
            rows: None,
        }
    }

    /// 记录本次操作返回的行数
    pub fn set_rows(&mut self, rows: usize) {
        self.rows = Some(rows);
    }
}

impl Drop for PerfGuard {
    fn drop(&mut self) {
        let sql = SqlStats::current().since(self.sql_start);
        let elapsed_ms = self.start.elapsed().as_millis() as u64;

        tracing::info!(
            target: "perf",
            op = self.op,
            elapsed_ms,
            sql_count = sql.statements,
            slow_sql_count = sql.slow,
            rows = ?self.rows,
            "done"
        );

        GUARD_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_line_sql() {
        assert_eq!(one_line_sql("SELECT 1\n  FROM score"), "SELECT 1 FROM score");
        let long = "x".repeat(SQL_LOG_MAX_CHARS + 10);
        assert_eq!(one_line_sql(&long).chars().count(), SQL_LOG_MAX_CHARS + 1);
    }

    #[test]
    fn test_counts_only_inside_guard() {
        bump(|s| s.statements += 1);
        assert_eq!(SqlStats::current().statements, 0);

        let guard = PerfGuard::new("test");
        bump(|s| s.statements += 2);
        bump(|s| s.slow += 1);
        assert_eq!(
            SqlStats::current().since(guard.sql_start),
            SqlStats { statements: 2, slow: 1 }
        );
        drop(guard);
        assert_eq!(GUARD_DEPTH.with(|d| d.get()), 0);
    }

    #[test]
    fn test_counts_statements_on_connection() {
        let mut conn = Connection::open_in_memory().unwrap();
        install_profile_hook(&mut conn, 10_000);
        conn.execute_batch("CREATE TABLE judge (id TEXT PRIMARY KEY)").unwrap();

        let guard = PerfGuard::new("test.sql");
        conn.execute("INSERT INTO judge (id) VALUES ('J1')", []).unwrap();
        conn.execute("INSERT INTO judge (id) VALUES ('J2')", []).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM judge", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 2);

        let stats = SqlStats::current().since(guard.sql_start);
        assert!(stats.statements >= 3, "statements = {}", stats.statements);
        assert_eq!(stats.slow, 0);
    }
}
