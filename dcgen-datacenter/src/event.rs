use dcgen_events::{
    domain_event::EventEnvelope,
    error::{DomainError, DomainResult},
    value_object::EventType,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Created {
    pub site: String,
    pub building: String,
    pub room: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RackAdded {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PodCounted {
    pub function: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceCounted {
    pub model_pid: String,
    pub variant: String,
}

/// 数据中心领域事件；事件类型写在信封上，载荷只保存各自的结构体
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatacenterEvent {
    Created(Created),
    RackAdded(RackAdded),
    PodCounted(PodCounted),
    DeviceCounted(DeviceCounted),
}

impl DatacenterEvent {
    pub const CREATED: &'static str = "DatacenterCreated";
    pub const RACK_ADDED: &'static str = "RackAdded";
    pub const POD_COUNTED: &'static str = "PodCounted";
    pub const DEVICE_COUNTED: &'static str = "DeviceCounted";

    pub fn event_type(&self) -> EventType {
        let name = match self {
            DatacenterEvent::Created(_) => Self::CREATED,
            DatacenterEvent::RackAdded(_) => Self::RACK_ADDED,
            DatacenterEvent::PodCounted(_) => Self::POD_COUNTED,
            DatacenterEvent::DeviceCounted(_) => Self::DEVICE_COUNTED,
        };
        EventType::from(name)
    }

    /// 将事件体以 JSON 写入信封载荷
    pub fn write_payload(&self, envelope: &mut EventEnvelope) -> DomainResult<()> {
        match self {
            DatacenterEvent::Created(e) => envelope.set_json_payload(e)?,
            DatacenterEvent::RackAdded(e) => envelope.set_json_payload(e)?,
            DatacenterEvent::PodCounted(e) => envelope.set_json_payload(e)?,
            DatacenterEvent::DeviceCounted(e) => envelope.set_json_payload(e)?,
        };
        Ok(())
    }

    /// 按信封上的事件类型选择载荷形状解码
    pub fn from_envelope(envelope: &EventEnvelope) -> DomainResult<Self> {
        let event = match envelope.event_type().as_str() {
            Self::CREATED => DatacenterEvent::Created(envelope.json_payload()?),
            Self::RACK_ADDED => DatacenterEvent::RackAdded(envelope.json_payload()?),
            Self::POD_COUNTED => DatacenterEvent::PodCounted(envelope.json_payload()?),
            Self::DEVICE_COUNTED => DatacenterEvent::DeviceCounted(envelope.json_payload()?),
            other => {
                return Err(DomainError::decoding(
                    "eventType",
                    format!("unknown datacenter event type: {other}"),
                ));
            }
        };
        Ok(event)
    }
}
