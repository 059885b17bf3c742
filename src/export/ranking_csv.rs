// ==========================================
// 排名 CSV 导出
// ==========================================
// 分数保留两位小数；列顺序与 CSV_HEADER 一致
// ==========================================

use crate::api::ranking_api::RankingRow;
use csv::Writer;
use std::io::Write;

// CSV 表头
pub const CSV_HEADER: &[&str] = &[
    "group",
    "rank",
    "performance_id",
    "contestant_name",
    "title",
    "item_style",
    "event_name",
    "region",
    "age_category",
    "performance_type",
    "total_score",
    "average_score",
    "judge_count",
];

fn to_record(row: &RankingRow) -> Vec<String> {
    vec![
        row.group_key.clone(),
        row.rank.to_string(),
        row.performance_id.clone(),
        row.contestant_name.clone(),
        row.title.clone(),
        row.item_style.clone(),
        row.event_name.clone(),
        row.region.clone(),
        row.age_category.clone(),
        row.performance_type.clone(),
        format!("{:.2}", row.total_score),
        format!("{:.2}", row.average_score),
        row.judge_count.to_string(),
    ]
}

/// 将排名行写为 CSV（含表头）
pub fn write_rankings_csv<W: Write>(writer: W, rows: &[RankingRow]) -> anyhow::Result<()> {
    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(CSV_HEADER)?;
    for row in rows {
        wtr.write_record(to_record(row))?;
    }
    wtr.flush()?;
    Ok(())
}
