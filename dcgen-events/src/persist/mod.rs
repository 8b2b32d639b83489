//! 存储适配（persist）
//!
//! 外部追加式事件存储的原生记录形态、与信封之间的转换，以及存储契约：
//! - 追加记录（`AppendRecord`）与已记录记录（`RecordedRecord`）；
//! - 读回分类（`AggregateTypeClassifier`）；
//! - 同步存储协议（`EventStore`）与内存实现（`InMemoryEventStore`）。
//!
//! 本层不做重试、退避、批处理或冲突解决；追加失败原样返回给调用方。
//!
mod adapter;
mod classifier;
mod event_store;
mod in_memory;
mod record;

pub use classifier::{AggregateTypeClassifier, StreamPrefixClassifier, TypeRegistry};
pub use event_store::{EventStore, EventStoreExt};
pub use in_memory::InMemoryEventStore;
pub use record::{AppendRecord, ContentType, ExpectedRevision, RecordedRecord};
