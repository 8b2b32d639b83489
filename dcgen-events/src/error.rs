//! 事件层统一错误定义
//!
//! 覆盖载荷编码/解码、标识生成、读回分类与存储乐观并发冲突，
//! 所有错误都以值的形式返回调用方，本层不做任何重试。
//!
use crate::persist::ExpectedRevision;
use thiserror::Error;

/// 统一错误类型
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DomainError {
    // --- 编解码 ---
    #[error("encoding error: field={field}, reason={reason}")]
    Encoding { field: &'static str, reason: String },
    #[error("decoding error: field={field}, reason={reason}")]
    Decoding { field: &'static str, reason: String },

    // --- 标识 ---
    #[error("identity generation failed: {reason}")]
    IdentityGeneration { reason: String },

    // --- 读回/存储 ---
    #[error("aggregate type unresolved: stream={stream_id}")]
    Unclassified { stream_id: String },
    #[error("version conflict: stream={stream_id}, expected={expected}, actual={actual}")]
    VersionConflict {
        stream_id: String,
        expected: ExpectedRevision,
        actual: ExpectedRevision,
    },
}

impl DomainError {
    pub fn encoding(field: &'static str, reason: impl ToString) -> Self {
        DomainError::Encoding {
            field,
            reason: reason.to_string(),
        }
    }

    pub fn decoding(field: &'static str, reason: impl ToString) -> Self {
        DomainError::Decoding {
            field,
            reason: reason.to_string(),
        }
    }

    pub fn identity_generation(reason: impl ToString) -> Self {
        DomainError::IdentityGeneration {
            reason: reason.to_string(),
        }
    }

    /// 是否为乐观并发冲突（调用方可据此刷新期望版本后自行重试）
    pub fn is_version_conflict(&self) -> bool {
        matches!(self, DomainError::VersionConflict { .. })
    }
}

/// 统一 Result 类型别名
pub type DomainResult<T> = Result<T, DomainError>;

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::decoding("json", err)
    }
}
