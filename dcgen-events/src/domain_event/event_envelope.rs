use crate::{
    aggregate::Aggregate,
    error::{DomainError, DomainResult},
    value_object::{AggregateType, EventType, Version},
};
use bon::Builder;
use chrono::{DateTime, Utc};
use serde::{Serialize, de::DeserializeOwned};
use std::fmt;

use super::event_factory::EventFactory;

/// 事件信封：一条领域事件的标准记录
///
/// - `event_id`、`event_type`、`aggregate_id`、`timestamp` 构造后不再变化；
/// - `data`/`metadata` 为不透明字节，在交给存储或传输之前可以替换；
/// - `version`、`aggregate_type` 提供显式 setter，用于存储读回后的回填。
///
/// 信封本身没有内部同步：修改方法需要 `&mut self`，在持久化或传输之前应视为独占持有。
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct EventEnvelope {
    #[builder(into)]
    event_id: String,
    #[builder(into)]
    event_type: EventType,
    #[builder(default, into)]
    data: Vec<u8>,
    timestamp: DateTime<Utc>,
    #[builder(default, into)]
    aggregate_type: AggregateType,
    #[builder(into)]
    aggregate_id: String,
    #[builder(default)]
    version: Version,
    #[builder(default, into)]
    metadata: Vec<u8>,
}

impl EventEnvelope {
    /// 使用默认工厂（UUID v4 + 系统时钟）从聚合当前状态盖章生成信封
    pub fn from_aggregate<A>(aggregate: &A, event_type: impl Into<EventType>) -> DomainResult<Self>
    where
        A: Aggregate,
    {
        EventFactory::default().new_event(aggregate, event_type)
    }

    pub(crate) fn with_event_id(mut self, event_id: String) -> Self {
        self.event_id = event_id;
        self
    }

    pub fn event_id(&self) -> &str {
        &self.event_id
    }

    pub fn event_type(&self) -> &EventType {
        &self.event_type
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn aggregate_type(&self) -> &AggregateType {
        &self.aggregate_type
    }

    /// 回填聚合类型（存储读回的记录不携带该字段）
    pub fn set_aggregate_type(&mut self, aggregate_type: impl Into<AggregateType>) -> &mut Self {
        self.aggregate_type = aggregate_type.into();
        self
    }

    pub fn aggregate_id(&self) -> &str {
        &self.aggregate_id
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn set_version(&mut self, version: impl Into<Version>) -> &mut Self {
        self.version = version.into();
        self
    }

    // --- 载荷 ---

    pub fn payload(&self) -> &[u8] {
        &self.data
    }

    pub fn set_payload(&mut self, data: impl Into<Vec<u8>>) -> &mut Self {
        self.data = data.into();
        self
    }

    /// 将结构化值以 JSON 写入载荷
    pub fn set_json_payload<T>(&mut self, value: &T) -> DomainResult<&mut Self>
    where
        T: Serialize + ?Sized,
    {
        self.data = serde_json::to_vec(value).map_err(|e| DomainError::encoding("data", e))?;
        Ok(self)
    }

    /// 按调用方给定的形状解码载荷
    pub fn json_payload<T>(&self) -> DomainResult<T>
    where
        T: DeserializeOwned,
    {
        serde_json::from_slice(&self.data).map_err(|e| DomainError::decoding("data", e))
    }

    // --- 元数据 ---

    pub fn metadata(&self) -> &[u8] {
        &self.metadata
    }

    pub fn set_metadata(&mut self, metadata: impl Into<Vec<u8>>) -> &mut Self {
        self.metadata = metadata.into();
        self
    }

    pub fn set_json_metadata<T>(&mut self, value: &T) -> DomainResult<&mut Self>
    where
        T: Serialize + ?Sized,
    {
        self.metadata =
            serde_json::to_vec(value).map_err(|e| DomainError::encoding("metadata", e))?;
        Ok(self)
    }

    pub fn json_metadata<T>(&self) -> DomainResult<T>
    where
        T: DeserializeOwned,
    {
        serde_json::from_slice(&self.metadata).map_err(|e| DomainError::decoding("metadata", e))
    }
}

impl fmt::Display for EventEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "EventEnvelope(aggregate_id={}, version={}, event_type={}, aggregate_type={}, metadata={}, timestamp={})",
            self.aggregate_id,
            self.version.value(),
            self.event_type,
            self.aggregate_type,
            String::from_utf8_lossy(&self.metadata),
            self.timestamp.to_rfc3339(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde::Deserialize;
    use std::collections::HashMap;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Counted {
        n: i64,
    }

    #[derive(Debug, Deserialize)]
    #[allow(dead_code)]
    struct Renamed {
        name: String,
    }

    fn envelope() -> EventEnvelope {
        EventEnvelope::builder()
            .event_id("e-1")
            .event_type("RackAdded")
            .timestamp(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap())
            .aggregate_type("datacenter")
            .aggregate_id("dc-42")
            .version(Version::from_value(3))
            .build()
    }

    #[test]
    fn json_payload_roundtrip() {
        let mut env = envelope();
        env.set_json_payload(&serde_json::json!({ "n": 3 })).unwrap();
        assert_eq!(env.payload(), br#"{"n":3}"#);

        let counted: Counted = env.json_payload().unwrap();
        assert_eq!(counted, Counted { n: 3 });
    }

    #[test]
    fn json_payload_into_incompatible_shape_fails() {
        let mut env = envelope();
        env.set_json_payload(&Counted { n: 3 }).unwrap();

        match env.json_payload::<Renamed>().unwrap_err() {
            DomainError::Decoding { field, .. } => assert_eq!(field, "data"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn json_payload_over_non_json_bytes_fails() {
        let mut env = envelope();
        env.set_payload(&b"\xff\x00not json"[..]);
        assert!(matches!(
            env.json_payload::<Counted>(),
            Err(DomainError::Decoding { .. })
        ));
    }

    #[test]
    fn unserializable_value_is_an_encoding_error() {
        let mut env = envelope();
        let mut bad: HashMap<Vec<u8>, i32> = HashMap::new();
        bad.insert(vec![1, 2], 1);

        match env.set_json_metadata(&bad).unwrap_err() {
            DomainError::Encoding { field, .. } => assert_eq!(field, "metadata"),
            other => panic!("unexpected {other:?}"),
        }
        assert!(env.metadata().is_empty());
    }

    #[test]
    fn json_metadata_roundtrip() {
        let mut env = envelope();
        env.set_json_metadata(&serde_json::json!({ "user": "ops" }))
            .unwrap();
        let meta: serde_json::Value = env.json_metadata().unwrap();
        assert_eq!(meta["user"], "ops");
    }

    #[test]
    fn setters_backfill_version_and_type() {
        let mut env = envelope();
        env.set_version(7u64).set_aggregate_type("rack");
        assert_eq!(env.version().value(), 7);
        assert_eq!(env.aggregate_type(), &AggregateType::from("rack"));
    }

    #[test]
    fn display_summarises_envelope() {
        let mut env = envelope();
        env.set_metadata(&b"{}"[..]);
        assert_eq!(
            env.to_string(),
            "EventEnvelope(aggregate_id=dc-42, version=3, event_type=RackAdded, aggregate_type=datacenter, metadata={}, timestamp=2024-05-01T12:00:00+00:00)"
        );
    }
}
