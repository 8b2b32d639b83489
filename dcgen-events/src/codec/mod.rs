//! 线格式编解码（Wire Codec）
//!
//! 信封与可移植 JSON 对象之间的转换。键集合固定为
//! `eventID/eventType/data/timestamp/aggregateType/aggregateID/version/metadata`。

mod wire;

pub use wire::{PayloadEncoding, WireCodec, WireEvent};
