//! 内存版事件存储（InMemoryEventStore）
//!
//! 满足 `EventStore` 协议的轻量实现，用于测试、示例与本地开发：
//! - 按流保存已记录记录，事件序号从 0 连续递增；
//! - 追加时校验期望流头，不符即返回 `VersionConflict`；
//! - 事件标识沿用客户端指定值，否则分配 UUID v4，写入时间取注入的时钟。

use crate::domain_event::{Clock, SystemClock};
use crate::error::{DomainError, DomainResult};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};
use uuid::Uuid;

use super::event_store::EventStore;
use super::record::{AppendRecord, ExpectedRevision, RecordedRecord};

pub struct InMemoryEventStore {
    streams: Mutex<HashMap<String, Vec<RecordedRecord>>>,
    clock: Arc<dyn Clock>,
}

impl Default for InMemoryEventStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            streams: Mutex::new(HashMap::new()),
            clock,
        }
    }

    /// 当前流头事件序号
    pub fn head(&self, stream_id: &str) -> Option<u64> {
        self.lock()
            .get(stream_id)
            .and_then(|records| records.last())
            .map(RecordedRecord::event_number)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Vec<RecordedRecord>>> {
        self.streams.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl EventStore for InMemoryEventStore {
    fn append(
        &self,
        stream_id: &str,
        expected: ExpectedRevision,
        records: Vec<AppendRecord>,
    ) -> DomainResult<Option<u64>> {
        let mut streams = self.lock();
        let head = streams
            .get(stream_id)
            .and_then(|records| records.last())
            .map(RecordedRecord::event_number);

        if !expected.matches(head) {
            let actual = ExpectedRevision::of_head(head);
            warn!(stream_id, %expected, %actual, "append rejected: version conflict");
            return Err(DomainError::VersionConflict {
                stream_id: stream_id.to_string(),
                expected,
                actual,
            });
        }

        if records.is_empty() {
            return Ok(head);
        }

        let created_date = self.clock.now();
        let stream = streams.entry(stream_id.to_string()).or_default();
        let count = records.len();

        for record in records {
            let event_number = stream.len() as u64;
            stream.push(
                RecordedRecord::builder()
                    .event_id(record.event_id().unwrap_or_else(Uuid::new_v4))
                    .event_type(record.event_type().clone())
                    .content_type(record.content_type())
                    .data(record.data())
                    .created_date(created_date)
                    .stream_id(stream_id)
                    .event_number(event_number)
                    .user_metadata(record.metadata())
                    .build(),
            );
        }

        let new_head = stream.last().map(RecordedRecord::event_number);
        debug!(stream_id, count, head = ?new_head, "appended events");

        Ok(new_head)
    }

    fn read_stream(&self, stream_id: &str) -> DomainResult<Vec<RecordedRecord>> {
        let records = self.lock().get(stream_id).cloned().unwrap_or_default();
        debug!(stream_id, count = records.len(), "read stream");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain_event::FixedClock;
    use chrono::{TimeZone, Utc};

    fn record(event_type: &str) -> AppendRecord {
        AppendRecord::builder()
            .event_type(event_type)
            .data(&b"{}"[..])
            .build()
    }

    #[test]
    fn append_assigns_numbers_and_dates() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let store = InMemoryEventStore::with_clock(Arc::new(FixedClock::new(at)));

        let head = store
            .append(
                "dc-1",
                ExpectedRevision::NoStream,
                vec![record("A"), record("B")],
            )
            .unwrap();
        assert_eq!(head, Some(1));

        let records = store.read_stream("dc-1").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].event_number(), 0);
        assert_eq!(records[1].event_number(), 1);
        assert_eq!(records[1].created_date(), at);
        assert_eq!(records[1].stream_id(), "dc-1");
        assert_ne!(records[0].event_id(), records[1].event_id());
    }

    #[test]
    fn stale_expectation_is_rejected() {
        let store = InMemoryEventStore::new();
        store
            .append("dc-1", ExpectedRevision::NoStream, vec![record("A")])
            .unwrap();

        let err = store
            .append("dc-1", ExpectedRevision::NoStream, vec![record("B")])
            .unwrap_err();
        match err {
            DomainError::VersionConflict {
                expected, actual, ..
            } => {
                assert_eq!(expected, ExpectedRevision::NoStream);
                assert_eq!(actual, ExpectedRevision::Exact(0));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(store.head("dc-1"), Some(0));
    }

    #[test]
    fn client_event_id_is_kept() {
        let store = InMemoryEventStore::new();
        let id = Uuid::new_v4();
        store
            .append(
                "dc-1",
                ExpectedRevision::Any,
                vec![AppendRecord::builder().event_id(id).event_type("A").build()],
            )
            .unwrap();
        assert_eq!(store.read_stream("dc-1").unwrap()[0].event_id(), id);
    }

    #[test]
    fn missing_stream_reads_empty() {
        let store = InMemoryEventStore::new();
        assert!(store.read_stream("nope").unwrap().is_empty());
        assert_eq!(store.head("nope"), None);
    }

    #[test]
    fn empty_batch_reports_current_head() {
        let store = InMemoryEventStore::new();
        let head = store
            .append("dc-1", ExpectedRevision::NoStream, Vec::new())
            .unwrap();
        assert_eq!(head, None);

        store
            .append("dc-1", ExpectedRevision::NoStream, vec![record("A")])
            .unwrap();
        let head = store
            .append("dc-1", ExpectedRevision::Exact(0), Vec::new())
            .unwrap();
        assert_eq!(head, Some(0));
    }
}
