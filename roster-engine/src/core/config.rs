//! 引擎配置 - 花名册引擎的所有可调项
//!
//! # 环境变量
//!
//! 所有配置项都可以通过环境变量覆盖：
//!
//! | 环境变量 | 默认值 | 说明 |
//! |----------|--------|------|
//! | ROSTER_PERMANENT_STATUS | Permanent | 免除合同到期跟踪的雇佣状态名 |
//! | ROSTER_EXPIRY_WINDOW_DAYS | 60 | 合同到期提醒窗口 (含当天) |
//! | ROSTER_URGENT_THRESHOLD_DAYS | 30 | 剩余天数低于该值时提醒级别为 urgent |
//! | ROSTER_CRITICAL_UTILIZATION | 90 | 利用率超过该值计为 critical |
//! | ROSTER_DEFAULT_NAME | Unnamed | 批量导入缺省姓名 |
//! | ROSTER_DEFAULT_PROJECT | General | 批量导入缺省项目 |
//! | ROSTER_DEFAULT_LOCATION | Jakarta | 批量导入缺省工作地 |
//! | ROSTER_DEFAULT_CONTACT | - | 批量导入缺省联系方式 |
//!
//! # 示例
//!
//! ```ignore
//! ROSTER_EXPIRY_WINDOW_DAYS=90 cargo run
//! ```

/// Engine configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// 雇佣状态中的"正式员工"类别名 (该类别记录的合同到期日必须为空)
    pub permanent_status: String,
    /// 合同到期提醒窗口 (天, 闭区间 [0, window])
    pub expiry_window_days: i64,
    /// urgent 级别阈值 (剩余天数 < threshold 为 urgent, 否则 warning)
    pub urgent_threshold_days: i64,
    /// critical 利用率阈值 (utilization > threshold)
    pub critical_utilization: u8,

    // === 批量导入缺省值 ===
    /// 缺省姓名
    pub default_name: String,
    /// 缺省项目
    pub default_project: String,
    /// 缺省工作地
    pub default_location: String,
    /// 缺省联系方式
    pub default_contact: String,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            permanent_status: std::env::var("ROSTER_PERMANENT_STATUS")
                .unwrap_or_else(|_| "Permanent".into()),
            expiry_window_days: std::env::var("ROSTER_EXPIRY_WINDOW_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
            urgent_threshold_days: std::env::var("ROSTER_URGENT_THRESHOLD_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            critical_utilization: std::env::var("ROSTER_CRITICAL_UTILIZATION")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(90),
            default_name: std::env::var("ROSTER_DEFAULT_NAME")
                .unwrap_or_else(|_| "Unnamed".into()),
            default_project: std::env::var("ROSTER_DEFAULT_PROJECT")
                .unwrap_or_else(|_| "General".into()),
            default_location: std::env::var("ROSTER_DEFAULT_LOCATION")
                .unwrap_or_else(|_| "Jakarta".into()),
            default_contact: std::env::var("ROSTER_DEFAULT_CONTACT")
                .unwrap_or_else(|_| "-".into()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            permanent_status: "Permanent".into(),
            expiry_window_days: 60,
            urgent_threshold_days: 30,
            critical_utilization: 90,
            default_name: "Unnamed".into(),
            default_project: "General".into(),
            default_location: "Jakarta".into(),
            default_contact: "-".into(),
        }
    }
}
