use dcgen_events::{
    aggregate::Aggregate,
    domain_event::{EventEnvelope, EventFactory, VersionConvention},
    error::{DomainError, DomainResult},
    persist::StreamPrefixClassifier,
    value_object::Version,
};
use std::collections::HashMap;
use tracing::debug;

use crate::event::{Created, DatacenterEvent, DeviceCounted, PodCounted, RackAdded};

/// 数据中心聚合
///
/// 仅维护计数状态；每次变化由 `record` 先盖章再应用（或按工厂约定先应用后盖章），
/// 版本随每个事件加一。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Datacenter {
    id: String,
    version: Version,
    site: String,
    building: String,
    room: String,
    racks: Vec<String>,
    /// 按功能统计的 Pod 实例数
    pod_counts: HashMap<String, u64>,
    /// 按 型号 PID -> 变体 统计的设备实例数
    device_counts: HashMap<String, HashMap<String, u64>>,
}

impl Aggregate for Datacenter {
    const TYPE: &'static str = "datacenter";

    fn id(&self) -> &str {
        &self.id
    }

    fn version(&self) -> Version {
        self.version
    }
}

/// 数据中心流命名约定：`dc-<id>`
pub fn stream_classifier() -> StreamPrefixClassifier {
    StreamPrefixClassifier::new('-').register("dc", Datacenter::TYPE)
}

impl Datacenter {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// 创建数据中心并记录创建事件
    pub fn create(
        factory: &EventFactory,
        id: impl Into<String>,
        site: impl Into<String>,
        building: impl Into<String>,
        room: impl Into<String>,
    ) -> DomainResult<(Self, EventEnvelope)> {
        let mut datacenter = Self::new(id);
        let envelope = datacenter.record(
            factory,
            DatacenterEvent::Created(Created {
                site: site.into(),
                building: building.into(),
                room: room.into(),
            }),
        )?;
        Ok((datacenter, envelope))
    }

    /// 从事件流重建状态
    ///
    /// 每个信封的版本必须与按 `convention` 推得的下一版本一致，
    /// 重复或缺失的事件以 `Decoding { field: "version" }` 拒绝。
    pub fn replay<'a, I>(
        id: impl Into<String>,
        convention: VersionConvention,
        envelopes: I,
    ) -> DomainResult<Self>
    where
        I: IntoIterator<Item = &'a EventEnvelope>,
    {
        let mut datacenter = Self::new(id);
        for envelope in envelopes {
            if envelope.aggregate_id() != datacenter.id {
                return Err(DomainError::decoding(
                    "aggregateID",
                    format!(
                        "event {} belongs to {}, not {}",
                        envelope.event_id(),
                        envelope.aggregate_id(),
                        datacenter.id
                    ),
                ));
            }
            let expected = match convention {
                VersionConvention::BeforeApply => datacenter.version,
                VersionConvention::AfterApply => datacenter.version.next(),
            };
            if envelope.version() != expected {
                return Err(DomainError::decoding(
                    "version",
                    format!(
                        "event {} carries {}, expected {expected}",
                        envelope.event_id(),
                        envelope.version()
                    ),
                ));
            }
            let event = DatacenterEvent::from_envelope(envelope)?;
            datacenter.apply(&event);
        }
        debug!(
            datacenter_id = %datacenter.id,
            version = datacenter.version.value(),
            "replayed datacenter"
        );
        Ok(datacenter)
    }

    /// 盖章并应用事件，返回带 JSON 载荷的信封
    pub fn record(
        &mut self,
        factory: &EventFactory,
        event: DatacenterEvent,
    ) -> DomainResult<EventEnvelope> {
        let envelope = match factory.version_convention() {
            VersionConvention::BeforeApply => {
                let envelope = self.stamp(factory, &event)?;
                self.apply(&event);
                envelope
            }
            VersionConvention::AfterApply => {
                let mut next = self.clone();
                next.apply(&event);
                let envelope = next.stamp(factory, &event)?;
                *self = next;
                envelope
            }
        };
        Ok(envelope)
    }

    fn stamp(
        &self,
        factory: &EventFactory,
        event: &DatacenterEvent,
    ) -> DomainResult<EventEnvelope> {
        let mut envelope = factory.new_event(self, event.event_type())?;
        event.write_payload(&mut envelope)?;
        Ok(envelope)
    }

    fn apply(&mut self, event: &DatacenterEvent) {
        match event {
            DatacenterEvent::Created(e) => {
                self.site = e.site.clone();
                self.building = e.building.clone();
                self.room = e.room.clone();
            }
            DatacenterEvent::RackAdded(e) => self.racks.push(e.name.clone()),
            DatacenterEvent::PodCounted(e) => {
                *self.pod_counts.entry(e.function.clone()).or_default() += 1;
            }
            DatacenterEvent::DeviceCounted(e) => {
                *self
                    .device_counts
                    .entry(e.model_pid.clone())
                    .or_default()
                    .entry(e.variant.clone())
                    .or_default() += 1;
            }
        }
        self.version = self.version.next();
    }

    pub fn add_rack(
        &mut self,
        factory: &EventFactory,
        name: impl Into<String>,
    ) -> DomainResult<EventEnvelope> {
        self.record(
            factory,
            DatacenterEvent::RackAdded(RackAdded { name: name.into() }),
        )
    }

    /// 为指定功能的 Pod 计数加一
    pub fn count_pod(
        &mut self,
        factory: &EventFactory,
        function: impl Into<String>,
    ) -> DomainResult<EventEnvelope> {
        self.record(
            factory,
            DatacenterEvent::PodCounted(PodCounted {
                function: function.into(),
            }),
        )
    }

    /// 为指定型号/变体的设备计数加一
    pub fn count_device(
        &mut self,
        factory: &EventFactory,
        model_pid: impl Into<String>,
        variant: impl Into<String>,
    ) -> DomainResult<EventEnvelope> {
        self.record(
            factory,
            DatacenterEvent::DeviceCounted(DeviceCounted {
                model_pid: model_pid.into(),
                variant: variant.into(),
            }),
        )
    }

    pub fn num_pod_instances(&self, function: &str) -> u64 {
        self.pod_counts.get(function).copied().unwrap_or(0)
    }

    pub fn num_device_instances(&self, model_pid: &str, variant: &str) -> u64 {
        self.device_counts
            .get(model_pid)
            .and_then(|variants| variants.get(variant))
            .copied()
            .unwrap_or(0)
    }

    pub fn site(&self) -> &str {
        &self.site
    }

    pub fn building(&self) -> &str {
        &self.building
    }

    pub fn room(&self) -> &str {
        &self.room
    }

    pub fn racks(&self) -> &[String] {
        &self.racks
    }
}
