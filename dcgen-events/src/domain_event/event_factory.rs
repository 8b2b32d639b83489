use crate::{
    aggregate::Aggregate,
    error::DomainResult,
    persist::ExpectedRevision,
    value_object::{EventType, Version},
};
use bon::Builder;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::trace;

use super::clock::{Clock, SystemClock};
use super::event_envelope::EventEnvelope;
use super::id_generator::{EventIdGenerator, UuidEventIdGenerator};

/// 信封版本号的约定
///
/// 工厂总是原样复制聚合在盖章瞬间的版本；约定描述的是该版本与事件的关系，
/// 并据此换算存储的事件序号与追加时的期望版本。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionConvention {
    /// 先盖章后应用：版本 = 已应用的事件数，事件序号 == 版本
    #[default]
    BeforeApply,
    /// 先应用后盖章：版本包含本事件，事件序号 == 版本 - 1
    AfterApply,
}

impl VersionConvention {
    /// 版本对应的存储事件序号（从 0 开始）
    pub fn event_number(&self, version: Version) -> Option<u64> {
        match self {
            VersionConvention::BeforeApply => Some(version.value()),
            VersionConvention::AfterApply => version.previous().map(|v| v.value()),
        }
    }

    /// 由存储事件序号反推版本
    pub fn version_for_event_number(&self, event_number: u64) -> Version {
        match self {
            VersionConvention::BeforeApply => Version::from_value(event_number),
            VersionConvention::AfterApply => Version::from_value(event_number.saturating_add(1)),
        }
    }

    /// 追加该版本事件时应提交给存储的期望版本（流头）
    ///
    /// 版本在该约定下没有对应的事件序号时（`AfterApply` 的版本 0）返回 `None`。
    pub fn expected_revision(&self, version: Version) -> Option<ExpectedRevision> {
        let event_number = self.event_number(version)?;
        Some(match event_number.checked_sub(1) {
            Some(head) => ExpectedRevision::Exact(head),
            None => ExpectedRevision::NoStream,
        })
    }
}

fn default_id_generator() -> Arc<dyn EventIdGenerator> {
    Arc::new(UuidEventIdGenerator)
}

fn default_clock() -> Arc<dyn Clock> {
    Arc::new(SystemClock)
}

/// 事件工厂：为新事件盖上标识、时间与聚合信息
///
/// ```
/// use dcgen_events::domain_event::{EventFactory, SequentialEventIdGenerator, VersionConvention};
/// use std::sync::Arc;
///
/// let factory = EventFactory::builder()
///     .id_generator(Arc::new(SequentialEventIdGenerator::new("evt-")))
///     .version_convention(VersionConvention::AfterApply)
///     .build();
/// assert_eq!(factory.version_convention(), VersionConvention::AfterApply);
/// ```
#[derive(Clone, Builder)]
pub struct EventFactory {
    #[builder(default = default_id_generator())]
    id_generator: Arc<dyn EventIdGenerator>,
    #[builder(default = default_clock())]
    clock: Arc<dyn Clock>,
    #[builder(default)]
    version_convention: VersionConvention,
}

impl Default for EventFactory {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl EventFactory {
    pub fn version_convention(&self) -> VersionConvention {
        self.version_convention
    }

    /// 从聚合当前可观察状态构造新信封，载荷与元数据为空
    pub fn new_event<A>(
        &self,
        aggregate: &A,
        event_type: impl Into<EventType>,
    ) -> DomainResult<EventEnvelope>
    where
        A: Aggregate,
    {
        let event_id = self.id_generator.generate()?;
        let event_type = event_type.into();
        let version = aggregate.version();

        trace!(
            event_id = %event_id,
            event_type = %event_type,
            aggregate_id = aggregate.id(),
            version = version.value(),
            "stamped event envelope"
        );

        Ok(EventEnvelope::builder()
            .event_id(event_id)
            .event_type(event_type)
            .timestamp(self.clock.now())
            .aggregate_type(aggregate.aggregate_type())
            .aggregate_id(aggregate.id())
            .version(version)
            .build())
    }
}
