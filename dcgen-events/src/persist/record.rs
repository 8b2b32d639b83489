use crate::value_object::EventType;
use bon::Builder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// 载荷内容类型
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    #[default]
    Json,
    Binary,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Json => "json",
            ContentType::Binary => "binary",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 追加时的期望流头（乐观并发）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpectedRevision {
    /// 不做检查
    Any,
    /// 流必须不存在（尚无事件）
    NoStream,
    /// 流头事件序号必须等于给定值
    Exact(u64),
}

impl ExpectedRevision {
    /// 当前流头（以最后一个事件序号表示）是否满足期望
    pub fn matches(&self, head: Option<u64>) -> bool {
        match (self, head) {
            (ExpectedRevision::Any, _) => true,
            (ExpectedRevision::NoStream, None) => true,
            (ExpectedRevision::Exact(expected), Some(actual)) => *expected == actual,
            _ => false,
        }
    }

    /// 以期望值的形式描述实际流头
    pub fn of_head(head: Option<u64>) -> Self {
        head.map_or(ExpectedRevision::NoStream, ExpectedRevision::Exact)
    }
}

impl fmt::Display for ExpectedRevision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpectedRevision::Any => f.write_str("any"),
            ExpectedRevision::NoStream => f.write_str("no_stream"),
            ExpectedRevision::Exact(n) => write!(f, "{n}"),
        }
    }
}

/// 存储追加记录：事件类型、内容类型、载荷与元数据
///
/// 标识、时间、流与序号由存储在追加时分配；`event_id` 仅在客户端预先指定时存在。
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct AppendRecord {
    event_id: Option<Uuid>,
    #[builder(into)]
    event_type: EventType,
    #[builder(default)]
    content_type: ContentType,
    #[builder(default, into)]
    data: Vec<u8>,
    #[builder(default, into)]
    metadata: Vec<u8>,
}

impl AppendRecord {
    pub fn event_id(&self) -> Option<Uuid> {
        self.event_id
    }

    pub fn event_type(&self) -> &EventType {
        &self.event_type
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn metadata(&self) -> &[u8] {
        &self.metadata
    }
}

/// 存储已记录记录（读取结果）
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct RecordedRecord {
    /// 存储分配的事件标识
    event_id: Uuid,
    #[builder(into)]
    event_type: EventType,
    #[builder(default)]
    content_type: ContentType,
    #[builder(default, into)]
    data: Vec<u8>,
    /// 存储分配的写入时间
    created_date: DateTime<Utc>,
    /// 流标识（即聚合 ID）
    #[builder(into)]
    stream_id: String,
    /// 流内事件序号，从 0 开始
    event_number: u64,
    #[builder(default, into)]
    user_metadata: Vec<u8>,
}

impl RecordedRecord {
    pub fn event_id(&self) -> Uuid {
        self.event_id
    }

    pub fn event_type(&self) -> &EventType {
        &self.event_type
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn created_date(&self) -> DateTime<Utc> {
        self.created_date
    }

    pub fn stream_id(&self) -> &str {
        &self.stream_id
    }

    pub fn event_number(&self) -> u64 {
        self.event_number
    }

    pub fn user_metadata(&self) -> &[u8] {
        &self.user_metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expected_revision_matches_head() {
        assert!(ExpectedRevision::Any.matches(None));
        assert!(ExpectedRevision::Any.matches(Some(9)));
        assert!(ExpectedRevision::NoStream.matches(None));
        assert!(!ExpectedRevision::NoStream.matches(Some(0)));
        assert!(ExpectedRevision::Exact(2).matches(Some(2)));
        assert!(!ExpectedRevision::Exact(2).matches(Some(3)));
        assert!(!ExpectedRevision::Exact(0).matches(None));
    }

    #[test]
    fn content_type_wire_value() {
        assert_eq!(ContentType::Json.to_string(), "json");
        assert_eq!(serde_json::to_string(&ContentType::Binary).unwrap(), "\"binary\"");
    }
}
