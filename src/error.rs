//! 统一错误处理 - 所有可能错误类型和恢复逻辑

/// 哈希表可能发生的错误
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("键已存在: {key}")]
    DuplicateKey {
        key: String,
    },

    #[error("键不存在: {key}")]
    NotFound {
        key: String,
    },

    #[error("无效配置: {reason}")]
    InvalidConfig {
        reason: String,
    },
}

impl TableError {
    pub(crate) fn duplicate(key: &str) -> Self {
        Self::DuplicateKey { key: key.to_owned() }
    }

    pub(crate) fn not_found(key: &str) -> Self {
        Self::NotFound { key: key.to_owned() }
    }

    /// 获取错误恢复建议
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            Self::DuplicateKey { .. } => Some("键已存在，先删除再插入"),
            Self::NotFound { .. } => Some("确认键值是否存在"),
            Self::InvalidConfig { .. } => Some("检查配置参数"),
        }
    }

    /// 判断错误是否可恢复
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::InvalidConfig { .. })
    }

    /// 引发错误的键
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::DuplicateKey { key } | Self::NotFound { key } => Some(key),
            Self::InvalidConfig { .. } => None,
        }
    }
}
