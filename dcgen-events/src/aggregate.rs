//! 聚合能力（Aggregate capability）
//!
//! 本层对领域聚合的唯一要求：能读出类型、标识与当前版本。
//! 版本的推进完全由聚合自己负责，本层只在构造事件的瞬间读取。
//!
use crate::value_object::{AggregateType, Version};

/// 产生事件的聚合需要满足的只读契约
pub trait Aggregate {
    /// 聚合类型名
    const TYPE: &'static str;

    /// 聚合类型（默认取 `TYPE`）
    fn aggregate_type(&self) -> AggregateType {
        AggregateType::from(Self::TYPE)
    }

    /// 聚合实例标识（即事件流键）
    fn id(&self) -> &str;

    /// 当前版本
    fn version(&self) -> Version;
}
