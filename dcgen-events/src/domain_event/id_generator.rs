use crate::error::{DomainError, DomainResult};
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// 事件唯一标识生成器
///
/// 生成失败视为不可恢复（`DomainError::IdentityGeneration`），正常运行中不应出现。
pub trait EventIdGenerator: Send + Sync {
    fn generate(&self) -> DomainResult<String>;
}

/// 基于 UUID v4 的无状态生成器（默认）
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidEventIdGenerator;

impl EventIdGenerator for UuidEventIdGenerator {
    fn generate(&self) -> DomainResult<String> {
        Ok(Uuid::new_v4().to_string())
    }
}

/// 带前缀的顺序生成器，输出可预测，便于测试断言
#[derive(Debug, Default)]
pub struct SequentialEventIdGenerator {
    prefix: String,
    next: AtomicU64,
}

impl SequentialEventIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self::starting_at(prefix, 1)
    }

    pub fn starting_at(prefix: impl Into<String>, start: u64) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(start),
        }
    }
}

impl EventIdGenerator for SequentialEventIdGenerator {
    fn generate(&self) -> DomainResult<String> {
        let n = self
            .next
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_add(1))
            .map_err(|_| DomainError::identity_generation("sequence exhausted"))?;

        Ok(format!("{}{}", self.prefix, n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn uuid_ids_are_unique() {
        let ids: HashSet<String> = (0..1_000)
            .map(|_| UuidEventIdGenerator.generate().unwrap())
            .collect();
        assert_eq!(ids.len(), 1_000);
        for id in &ids {
            assert!(Uuid::parse_str(id).is_ok());
        }
    }

    #[test]
    fn sequential_ids_are_ordered() {
        let ids = SequentialEventIdGenerator::new("evt-");
        assert_eq!(ids.generate().unwrap(), "evt-1");
        assert_eq!(ids.generate().unwrap(), "evt-2");
    }

    #[test]
    fn exhausted_sequence_fails() {
        let ids = SequentialEventIdGenerator::starting_at("", u64::MAX);
        match ids.generate().unwrap_err() {
            DomainError::IdentityGeneration { .. } => {}
            other => panic!("unexpected {other:?}"),
        }
    }
}
