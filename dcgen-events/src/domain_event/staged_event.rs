use crate::{aggregate::Aggregate, error::DomainResult, value_object::EventType};
use uuid::Uuid;

use super::event_envelope::EventEnvelope;
use super::event_factory::EventFactory;

/// 尚未分配到事件流的暂存事件
///
/// 只有事件标识（若客户端已指定）、类型、载荷与元数据，没有流、时间与版本信息。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedEvent {
    event_id: Option<Uuid>,
    event_type: EventType,
    data: Vec<u8>,
    metadata: Vec<u8>,
}

impl StagedEvent {
    pub fn new(
        event_id: Option<Uuid>,
        event_type: impl Into<EventType>,
        data: impl Into<Vec<u8>>,
        metadata: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            event_id,
            event_type: event_type.into(),
            data: data.into(),
            metadata: metadata.into(),
        }
    }

    pub fn event_id(&self) -> Option<Uuid> {
        self.event_id
    }

    pub fn event_type(&self) -> &EventType {
        &self.event_type
    }

    pub fn payload(&self) -> &[u8] {
        &self.data
    }

    pub fn metadata(&self) -> &[u8] {
        &self.metadata
    }

    /// 将暂存事件绑定到聚合，得到完整信封；已指定的事件标识会被保留
    pub fn assign<A>(self, factory: &EventFactory, aggregate: &A) -> DomainResult<EventEnvelope>
    where
        A: Aggregate,
    {
        let mut envelope = factory.new_event(aggregate, self.event_type)?;
        if let Some(id) = self.event_id {
            envelope = envelope.with_event_id(id.to_string());
        }
        envelope.set_payload(self.data).set_metadata(self.metadata);

        Ok(envelope)
    }
}
