//! 信封与存储原生记录之间的转换
//!
use crate::domain_event::{EventEnvelope, StagedEvent, UnclassifiedEnvelope};
use crate::value_object::Version;

use super::record::{AppendRecord, ContentType, RecordedRecord};

impl EventEnvelope {
    /// 转为追加记录：只携带类型、内容类型、载荷与元数据
    pub fn to_append_record(&self) -> AppendRecord {
        AppendRecord::from(self)
    }
}

impl From<&EventEnvelope> for AppendRecord {
    fn from(envelope: &EventEnvelope) -> Self {
        AppendRecord::builder()
            .event_type(envelope.event_type().clone())
            .content_type(ContentType::Json)
            .data(envelope.payload())
            .metadata(envelope.metadata())
            .build()
    }
}

impl From<EventEnvelope> for AppendRecord {
    fn from(envelope: EventEnvelope) -> Self {
        AppendRecord::from(&envelope)
    }
}

/// 已记录记录 -> 未分类信封
///
/// 版本取存储分配的事件序号，聚合类型缺失，需调用方补齐。
impl From<&RecordedRecord> for UnclassifiedEnvelope {
    fn from(record: &RecordedRecord) -> Self {
        let envelope = EventEnvelope::builder()
            .event_id(record.event_id().to_string())
            .event_type(record.event_type().clone())
            .data(record.data())
            .timestamp(record.created_date())
            .aggregate_id(record.stream_id())
            .version(Version::from_value(record.event_number()))
            .metadata(record.user_metadata())
            .build();

        UnclassifiedEnvelope::new(envelope, record.event_number())
    }
}

impl From<RecordedRecord> for UnclassifiedEnvelope {
    fn from(record: RecordedRecord) -> Self {
        UnclassifiedEnvelope::from(&record)
    }
}

/// 原始追加载荷 -> 暂存事件（无流上下文）
impl From<&AppendRecord> for StagedEvent {
    fn from(record: &AppendRecord) -> Self {
        StagedEvent::new(
            record.event_id(),
            record.event_type().clone(),
            record.data(),
            record.metadata(),
        )
    }
}

impl From<&StagedEvent> for AppendRecord {
    fn from(staged: &StagedEvent) -> Self {
        AppendRecord::builder()
            .maybe_event_id(staged.event_id())
            .event_type(staged.event_type().clone())
            .content_type(ContentType::Json)
            .data(staged.payload())
            .metadata(staged.metadata())
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain_event::VersionConvention;
    use crate::value_object::{AggregateType, EventType};
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn recorded() -> RecordedRecord {
        RecordedRecord::builder()
            .event_id(Uuid::nil())
            .event_type("RackAdded")
            .data(&b"{}"[..])
            .created_date(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap())
            .stream_id("dc-42")
            .event_number(7)
            .build()
    }

    #[test]
    fn append_record_drops_stream_context() {
        let env = EventEnvelope::builder()
            .event_id("e-1")
            .event_type("RackAdded")
            .data(&b"{\"name\":\"r1\"}"[..])
            .timestamp(Utc::now())
            .aggregate_type("datacenter")
            .aggregate_id("dc-42")
            .version(Version::from_value(3))
            .metadata(&b"{}"[..])
            .build();

        let record = env.to_append_record();
        assert_eq!(record.event_id(), None);
        assert_eq!(record.event_type(), &EventType::from("RackAdded"));
        assert_eq!(record.content_type(), ContentType::Json);
        assert_eq!(record.data(), b"{\"name\":\"r1\"}");
        assert_eq!(record.metadata(), b"{}");
    }

    #[test]
    fn recorded_record_maps_stream_fields() {
        let unclassified = UnclassifiedEnvelope::from(&recorded());
        assert_eq!(unclassified.event_id(), Uuid::nil().to_string());
        assert_eq!(unclassified.aggregate_id(), "dc-42");
        assert_eq!(unclassified.version(), Version::from_value(7));
        assert_eq!(unclassified.event_number(), 7);

        let env = unclassified.into_unclassified_envelope();
        assert!(env.aggregate_type().is_unset());
        assert!(env.metadata().is_empty());
    }

    #[test]
    fn after_apply_convention_shifts_read_back_version() {
        let env = UnclassifiedEnvelope::from(recorded())
            .with_convention(VersionConvention::AfterApply)
            .classify("datacenter");
        assert_eq!(env.version(), Version::from_value(8));
        assert_eq!(env.aggregate_type(), &AggregateType::from("datacenter"));
    }

    #[test]
    fn staged_event_keeps_client_id() {
        let id = Uuid::new_v4();
        let record = AppendRecord::builder()
            .event_id(id)
            .event_type("PodCounted")
            .data(&b"{}"[..])
            .build();

        let staged = StagedEvent::from(&record);
        assert_eq!(staged.event_id(), Some(id));
        assert_eq!(AppendRecord::from(&staged), record);
    }
}
