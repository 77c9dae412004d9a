//! 统一错误处理
//!
//! 按错误来源分类：
//!
//! | 变体 | 分类 | 处理策略 |
//! |------|------|----------|
//! | Validation | 输入形状/范围错误 | 有安全默认值则降级，否则拒绝 |
//! | Reference | 引用名无法解析 | 永不降级，错误信息附带合法选项 |
//! | Duplicate | 员工编号冲突 | 写入前主动检查 |
//! | NotFound | 记录不存在 | 由后端上报 |
//! | Backend | 存储/网络故障 | 不自动重试，原样上抛 |

/// Engine error type
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unknown reference: {0}")]
    Reference(String),

    #[error("Backend error: {0}")]
    Backend(String),
}

// ========== Helper Constructors ==========

impl RosterError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn duplicate(msg: impl Into<String>) -> Self {
        Self::Duplicate(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn reference(msg: impl Into<String>) -> Self {
        Self::Reference(msg.into())
    }

    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    /// True for duplicate-code conflicts (user-actionable, not a system fault)
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate(_))
    }
}

impl From<validator::ValidationErrors> for RosterError {
    fn from(e: validator::ValidationErrors) -> Self {
        RosterError::Validation(e.to_string())
    }
}
