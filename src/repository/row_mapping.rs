// ==========================================
// 舞蹈比赛计分系统 - 行映射工具
// ==========================================
// 职责: TEXT 列与领域类型之间的转换
// 说明: 库中出现未知枚举值时返回 FromSqlConversionFailure，不做静默兜底
// ==========================================

use crate::domain::types::{AgeCategory, PerformanceType};
use chrono::NaiveDateTime;
use rusqlite::types::Type;

/// 时间戳存储格式
pub const TS_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn conversion_error(idx: usize, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, message.into())
}

pub fn format_ts(ts: &NaiveDateTime) -> String {
    ts.format(TS_FORMAT).to_string()
}

pub fn parse_ts(idx: usize, raw: String) -> rusqlite::Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(&raw, TS_FORMAT)
        .map_err(|e| conversion_error(idx, format!("时间格式错误 '{}': {}", raw, e)))
}

pub fn parse_opt_ts(idx: usize, raw: Option<String>) -> rusqlite::Result<Option<NaiveDateTime>> {
    raw.map(|s| parse_ts(idx, s)).transpose()
}

pub fn parse_age_category(idx: usize, raw: String) -> rusqlite::Result<AgeCategory> {
    AgeCategory::parse(&raw).ok_or_else(|| conversion_error(idx, format!("未知年龄组: {}", raw)))
}

pub fn parse_performance_type(idx: usize, raw: String) -> rusqlite::Result<PerformanceType> {
    PerformanceType::parse(&raw)
        .ok_or_else(|| conversion_error(idx, format!("未知表演类型: {}", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ts_roundtrip() {
        let ts = chrono::NaiveDate::from_ymd_opt(2026, 5, 2)
            .unwrap()
            .and_hms_opt(18, 45, 9)
            .unwrap();
        assert_eq!(parse_ts(0, format_ts(&ts)).unwrap(), ts);
    }

    #[test]
    fn test_unknown_enum_value_is_conversion_failure() {
        let err = parse_age_category(3, "adult".to_string()).unwrap_err();
        assert!(matches!(err, rusqlite::Error::FromSqlConversionFailure(3, _, _)));
    }
}
