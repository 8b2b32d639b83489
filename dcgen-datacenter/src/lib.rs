//! 数据中心配置聚合（dcgen-datacenter）
//!
//! 以机柜、按功能计数的 Pod、按型号/变体计数的设备为状态的简单聚合，
//! 通过 `dcgen-events` 为每次计数盖章生成事件信封，并可从事件流重建。
//!
mod datacenter;
mod event;

pub use datacenter::{Datacenter, stream_classifier};
pub use event::{Created, DatacenterEvent, DeviceCounted, PodCounted, RackAdded};
