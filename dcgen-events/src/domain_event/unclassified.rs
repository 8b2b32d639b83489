use crate::{
    error::{DomainError, DomainResult},
    persist::AggregateTypeClassifier,
    value_object::{AggregateType, EventType, Version},
};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::event_envelope::EventEnvelope;
use super::event_factory::VersionConvention;

/// 从存储读回、尚未确定聚合类型的信封
///
/// 存储的已记录记录没有聚合类型字段，分发前必须显式补齐：
/// `classify` 直接给出类型，`classify_with` 交给分类器判断，
/// `into_unclassified_envelope` 则得到聚合类型为零值的普通信封，由调用方回填。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnclassifiedEnvelope {
    envelope: EventEnvelope,
    event_number: u64,
}

impl UnclassifiedEnvelope {
    pub(crate) fn new(envelope: EventEnvelope, event_number: u64) -> Self {
        Self {
            envelope,
            event_number,
        }
    }

    pub fn event_id(&self) -> &str {
        self.envelope.event_id()
    }

    pub fn event_type(&self) -> &EventType {
        self.envelope.event_type()
    }

    pub fn payload(&self) -> &[u8] {
        self.envelope.payload()
    }

    pub fn json_payload<T>(&self) -> DomainResult<T>
    where
        T: DeserializeOwned,
    {
        self.envelope.json_payload()
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.envelope.timestamp()
    }

    /// 流标识
    pub fn aggregate_id(&self) -> &str {
        self.envelope.aggregate_id()
    }

    pub fn version(&self) -> Version {
        self.envelope.version()
    }

    /// 存储分配的事件序号
    pub fn event_number(&self) -> u64 {
        self.event_number
    }

    pub fn metadata(&self) -> &[u8] {
        self.envelope.metadata()
    }

    /// 按版本约定重新由事件序号推导版本（默认即 `BeforeApply`）
    pub fn with_convention(mut self, convention: VersionConvention) -> Self {
        self.envelope
            .set_version(convention.version_for_event_number(self.event_number));
        self
    }

    pub fn classify(mut self, aggregate_type: impl Into<AggregateType>) -> EventEnvelope {
        self.envelope.set_aggregate_type(aggregate_type);
        self.envelope
    }

    pub fn classify_with<C>(self, classifier: &C) -> DomainResult<EventEnvelope>
    where
        C: AggregateTypeClassifier + ?Sized,
    {
        match classifier.classify(self.aggregate_id(), self.event_type()) {
            Some(aggregate_type) => Ok(self.classify(aggregate_type)),
            None => {
                debug!(
                    stream_id = self.aggregate_id(),
                    event_type = %self.event_type(),
                    "no aggregate type for recorded event"
                );
                Err(DomainError::Unclassified {
                    stream_id: self.aggregate_id().to_string(),
                })
            }
        }
    }

    /// 聚合类型保持零值，调用方须在分发前通过 `set_aggregate_type` 回填
    pub fn into_unclassified_envelope(self) -> EventEnvelope {
        self.envelope
    }
}
