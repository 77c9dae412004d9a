//! 工具模块 - 通用工具函数和类型
//!
//! # 内容
//!
//! - [`RosterError`] - 引擎错误类型
//! - [`RosterResult`] - 统一 Result 别名
//! - 日志、日期等工具

pub mod error;
pub mod logger;
pub mod result;
pub mod time;

pub use error::RosterError;
pub use result::RosterResult;
