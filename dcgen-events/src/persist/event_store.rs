use crate::{
    domain_event::{EventEnvelope, UnclassifiedEnvelope, VersionConvention},
    error::{DomainError, DomainResult},
};
use std::sync::Arc;

use super::classifier::AggregateTypeClassifier;
use super::record::{AppendRecord, ExpectedRevision, RecordedRecord};

/// 外部事件存储的同步契约
///
/// 存储是顺序的权威：追加时若期望流头与实际不符，必须以
/// `DomainError::VersionConflict` 拒绝，由调用方决定是否刷新版本后重试。
pub trait EventStore: Send + Sync {
    /// 追加到流末尾，返回追加后的流头事件序号（流仍为空时为 `None`）
    fn append(
        &self,
        stream_id: &str,
        expected: ExpectedRevision,
        records: Vec<AppendRecord>,
    ) -> DomainResult<Option<u64>>;

    /// 按事件序号升序读取整条流，不存在的流返回空
    fn read_stream(&self, stream_id: &str) -> DomainResult<Vec<RecordedRecord>>;
}

impl<T> EventStore for Arc<T>
where
    T: EventStore + ?Sized,
{
    fn append(
        &self,
        stream_id: &str,
        expected: ExpectedRevision,
        records: Vec<AppendRecord>,
    ) -> DomainResult<Option<u64>> {
        (**self).append(stream_id, expected, records)
    }

    fn read_stream(&self, stream_id: &str) -> DomainResult<Vec<RecordedRecord>> {
        (**self).read_stream(stream_id)
    }
}

pub trait EventStoreExt: EventStore {
    /// 以信封的聚合 ID 为流、按版本约定推导期望流头后追加
    ///
    /// 版本在约定下没有对应的事件序号时返回 `Encoding { field: "version" }`，不做追加。
    fn append_envelope(
        &self,
        envelope: &EventEnvelope,
        convention: VersionConvention,
    ) -> DomainResult<Option<u64>> {
        let expected = convention
            .expected_revision(envelope.version())
            .ok_or_else(|| {
                DomainError::encoding(
                    "version",
                    format!(
                        "version {} has no event number under {convention:?}",
                        envelope.version().value()
                    ),
                )
            })?;

        self.append(
            envelope.aggregate_id(),
            expected,
            vec![envelope.to_append_record()],
        )
    }

    /// 读取整条流为未分类信封
    fn load_unclassified(&self, stream_id: &str) -> DomainResult<Vec<UnclassifiedEnvelope>> {
        Ok(self
            .read_stream(stream_id)?
            .into_iter()
            .map(UnclassifiedEnvelope::from)
            .collect())
    }

    /// 读取整条流并用分类器补齐聚合类型
    fn load_envelopes<C>(
        &self,
        stream_id: &str,
        convention: VersionConvention,
        classifier: &C,
    ) -> DomainResult<Vec<EventEnvelope>>
    where
        C: AggregateTypeClassifier + ?Sized,
    {
        self.load_unclassified(stream_id)?
            .into_iter()
            .map(|e| e.with_convention(convention).classify_with(classifier))
            .collect()
    }
}

impl<T> EventStoreExt for T where T: EventStore + ?Sized {}
