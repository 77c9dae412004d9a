//! Roster Engine - 人员花名册的数据核对与派生视图引擎
//!
//! # 架构概述
//!
//! 引擎负责三件事：
//!
//! - **同步** (`roster`): 在外部并发修改下保持本地花名册与远端权威数据一致
//! - **核对** (`import`): 把人工填写的批量导入行解析、校验成合法的写入请求
//! - **派生视图** (`views`): 从快照重算过滤/排序列表、汇总统计、到期提醒
//!
//! 持久化后端、表格编解码、身份会话都是外部协作方，只通过 `db` 与
//! `sheet` 中的窄接口接入。
//!
//! # 模块结构
//!
//! ```text
//! roster-engine/src/
//! ├── core/          # 配置
//! ├── db/            # 后端接口、数据模型
//! ├── lookup/        # 引用词表目录
//! ├── roster/        # 花名册存储 (快照换入 + 变更监听)
//! ├── import/        # 批量导入核对
//! ├── views/         # 派生视图 (纯函数)
//! ├── sheet/         # 表格编解码接口 + 导出投影
//! └── utils/         # 错误、日志、时间工具
//! ```

pub mod core;
pub mod db;
pub mod import;
pub mod lookup;
pub mod roster;
pub mod sheet;
pub mod utils;
pub mod views;

// Re-export 公共类型
pub use core::Config;
pub use db::{
    ChangeEvent, LookupEntry, PersonnelInput, PersonnelRecord, RecordId, RosterBackend, Shift,
    Vocabulary, WorkMode,
};
pub use import::{BulkImporter, ImportOutcome, SheetRow};
pub use lookup::LookupDirectory;
pub use roster::{ChangeListener, RosterStore};
pub use sheet::SheetCodec;
pub use utils::{RosterError, RosterResult};
pub use views::{
    ContractNotification, RosterStats, Severity, SortDirection, SortKey, SortSpec, SummaryFilter,
    ViewContext, ViewQuery,
};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
