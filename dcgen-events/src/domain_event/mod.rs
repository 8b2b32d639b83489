//! 领域事件信封（Event Envelope）
//!
//! 定义事件在进程内的标准表示 `EventEnvelope`、从聚合盖章生成信封的
//! `EventFactory`（可注入标识生成器与时钟），以及存储读回/暂存阶段的
//! 部分信封 `UnclassifiedEnvelope` 与 `StagedEvent`。

mod clock;
mod event_envelope;
mod event_factory;
mod id_generator;
mod staged_event;
mod unclassified;

pub use clock::{Clock, FixedClock, SystemClock};
pub use event_envelope::EventEnvelope;
pub use event_factory::{EventFactory, VersionConvention};
pub use id_generator::{EventIdGenerator, SequentialEventIdGenerator, UuidEventIdGenerator};
pub use staged_event::StagedEvent;
pub use unclassified::UnclassifiedEnvelope;
