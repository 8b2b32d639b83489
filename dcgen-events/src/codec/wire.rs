use crate::{
    domain_event::EventEnvelope,
    error::{DomainError, DomainResult},
    value_object::{AggregateType, EventType, Version},
};
use base64::{Engine, engine::general_purpose::STANDARD};
use bon::Builder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use tracing::warn;

/// `data`/`metadata` 字节在 JSON 中的承载方式
///
/// - `Base64`（默认）：标准 base64 字符串，字节级无损；
/// - `Utf8`：按 UTF-8 文本直接写出。非法 UTF-8 字节会被替换为 U+FFFD，
///   这类载荷无法逐字节往返，仅用于兼容按文本存储的历史数据。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadEncoding {
    #[default]
    Base64,
    Utf8,
}

/// JSON 线格式对象
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireEvent {
    #[serde(rename = "eventID")]
    pub event_id: String,
    #[serde(rename = "eventType")]
    pub event_type: EventType,
    pub data: String,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "aggregateType")]
    pub aggregate_type: AggregateType,
    #[serde(rename = "aggregateID")]
    pub aggregate_id: String,
    pub version: Version,
    pub metadata: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Builder)]
pub struct WireCodec {
    #[builder(default)]
    encoding: PayloadEncoding,
}

impl WireCodec {
    pub fn new(encoding: PayloadEncoding) -> Self {
        Self { encoding }
    }

    pub fn encoding(&self) -> PayloadEncoding {
        self.encoding
    }

    pub fn to_wire(&self, envelope: &EventEnvelope) -> WireEvent {
        WireEvent {
            event_id: envelope.event_id().to_string(),
            event_type: envelope.event_type().clone(),
            data: self.encode_bytes("data", envelope.payload()),
            timestamp: envelope.timestamp(),
            aggregate_type: envelope.aggregate_type().clone(),
            aggregate_id: envelope.aggregate_id().to_string(),
            version: envelope.version(),
            metadata: self.encode_bytes("metadata", envelope.metadata()),
        }
    }

    pub fn from_wire(&self, wire: WireEvent) -> DomainResult<EventEnvelope> {
        let data = self.decode_bytes("data", wire.data)?;
        let metadata = self.decode_bytes("metadata", wire.metadata)?;

        Ok(EventEnvelope::builder()
            .event_id(wire.event_id)
            .event_type(wire.event_type)
            .data(data)
            .timestamp(wire.timestamp)
            .aggregate_type(wire.aggregate_type)
            .aggregate_id(wire.aggregate_id)
            .version(wire.version)
            .metadata(metadata)
            .build())
    }

    /// 信封 -> JSON 对象
    pub fn encode(&self, envelope: &EventEnvelope) -> DomainResult<Value> {
        serde_json::to_value(self.to_wire(envelope)).map_err(|e| DomainError::encoding("wire", e))
    }

    /// JSON 对象 -> 信封；缺失或类型错误的键报告为 `Decoding`
    pub fn decode(&self, value: Value) -> DomainResult<EventEnvelope> {
        let wire: WireEvent =
            serde_json::from_value(value).map_err(|e| DomainError::decoding("wire", e))?;
        self.from_wire(wire)
    }

    pub fn encode_to_vec(&self, envelope: &EventEnvelope) -> DomainResult<Vec<u8>> {
        serde_json::to_vec(&self.to_wire(envelope)).map_err(|e| DomainError::encoding("wire", e))
    }

    pub fn decode_slice(&self, bytes: &[u8]) -> DomainResult<EventEnvelope> {
        let wire: WireEvent =
            serde_json::from_slice(bytes).map_err(|e| DomainError::decoding("wire", e))?;
        self.from_wire(wire)
    }

    fn encode_bytes(&self, field: &'static str, bytes: &[u8]) -> String {
        match self.encoding {
            PayloadEncoding::Base64 => STANDARD.encode(bytes),
            PayloadEncoding::Utf8 => match std::str::from_utf8(bytes) {
                Ok(text) => text.to_string(),
                Err(err) => {
                    warn!(
                        field,
                        valid_up_to = err.valid_up_to(),
                        len = bytes.len(),
                        "payload is not valid UTF-8, wire representation is lossy"
                    );
                    String::from_utf8_lossy(bytes).into_owned()
                }
            },
        }
    }

    fn decode_bytes(&self, field: &'static str, text: String) -> DomainResult<Vec<u8>> {
        match self.encoding {
            PayloadEncoding::Base64 => STANDARD
                .decode(text)
                .map_err(|e| DomainError::decoding(field, e)),
            PayloadEncoding::Utf8 => Ok(text.into_bytes()),
        }
    }
}

impl Serialize for EventEnvelope {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        WireCodec::default().to_wire(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for EventEnvelope {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire = WireEvent::deserialize(deserializer)?;
        WireCodec::default()
            .from_wire(wire)
            .map_err(serde::de::Error::custom)
    }
}
