//! 时间工具函数 — 合同到期计算
//!
//! 所有到期判断统一用整数日差 (calendar day difference)，
//! 不用小时级时间戳，避免月边界附近的歧义。

use chrono::NaiveDate;

use super::{RosterError, RosterResult};

/// 解析日期字符串 (YYYY-MM-DD)
pub fn parse_date(date: &str) -> RosterResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| RosterError::validation(format!("Invalid date format: {}", date)))
}

/// 今天 (UTC)
pub fn today_utc() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

/// 剩余整数天数：`end - today`
///
/// 负数表示已过期。
pub fn days_until(today: NaiveDate, end: NaiveDate) -> i64 {
    end.signed_duration_since(today).num_days()
}
