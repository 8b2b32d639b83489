//! 事件信封与存储适配层（dcgen-events）
//!
//! 位于领域事件与外部追加式事件存储之间的转换边界：
//! - 聚合能力（`aggregate`）：产生事件所需的最小只读契约；
//! - 事件信封（`domain_event`）：标识、分类、时间、版本与载荷的统一表示；
//! - 线格式编解码（`codec`）：信封与 JSON 对象之间的转换；
//! - 存储适配（`persist`）：信封与存储原生追加/已记录记录之间的转换，以及存储契约。
//!
//! 典型用法：
//! 1. 聚合实现 `Aggregate`，在状态变化时通过 `EventFactory` 盖章生成信封；
//! 2. 附加 JSON 载荷/元数据后交给 `EventStore` 追加，或交给 `WireCodec` 传输；
//! 3. 读回时将 `RecordedRecord` 转为 `UnclassifiedEnvelope`，补齐聚合类型后再分发。
//!
pub mod aggregate;
pub mod codec;
pub mod domain_event;
pub mod error;
pub mod persist;
pub mod value_object;
