//! 数据中心事件流示例
//!
//! 展示从聚合盖章生成事件、追加到内存存储、读回分类并重建聚合的完整流程。
//!
//! 运行示例：
//! ```bash
//! cargo run -p dcgen-datacenter --example datacenter_events
//! ```

use dcgen_datacenter::{Datacenter, stream_classifier};
use dcgen_events::codec::WireCodec;
use dcgen_events::domain_event::EventFactory;
use dcgen_events::error::DomainResult;
use dcgen_events::persist::{EventStoreExt, InMemoryEventStore};

fn main() -> DomainResult<()> {
    let factory = EventFactory::default();
    let store = InMemoryEventStore::new();

    // 1. 创建聚合并记录若干计数事件
    let (mut dc, created) = Datacenter::create(&factory, "dc-42", "ams1", "b3", "hall-2")?;
    let mut envelopes = vec![created];
    envelopes.push(dc.add_rack(&factory, "r01")?);
    envelopes.push(dc.count_pod(&factory, "compute")?);
    envelopes.push(dc.count_device(&factory, "N9K-C93180YC-FX", "leaf")?);

    // 2. 逐个追加，期望流头由版本约定推导
    for env in &envelopes {
        store.append_envelope(env, factory.version_convention())?;
        println!("   appended: {env}");
    }

    // 3. 读回并按流命名约定补齐聚合类型
    let read = store.load_envelopes(
        "dc-42",
        factory.version_convention(),
        &stream_classifier(),
    )?;

    let codec = WireCodec::default();
    for env in &read {
        println!("   wire: {}", codec.encode(env)?);
    }

    // 4. 重建聚合
    let rebuilt = Datacenter::replay("dc-42", factory.version_convention(), &read)?;
    println!(
        "   rebuilt: racks={}, compute pods={}, leaf switches={}",
        rebuilt.racks().len(),
        rebuilt.num_pod_instances("compute"),
        rebuilt.num_device_instances("N9K-C93180YC-FX", "leaf"),
    );

    Ok(())
}
