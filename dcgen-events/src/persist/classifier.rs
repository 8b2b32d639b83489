use crate::value_object::{AggregateType, EventType};
use std::collections::HashMap;

/// 为读回的事件确定聚合类型
///
/// 存储记录只有流标识与事件类型，聚合类型需由命名约定或类型注册表推断。
pub trait AggregateTypeClassifier {
    fn classify(&self, stream_id: &str, event_type: &EventType) -> Option<AggregateType>;
}

impl<F> AggregateTypeClassifier for F
where
    F: Fn(&str, &EventType) -> Option<AggregateType>,
{
    fn classify(&self, stream_id: &str, event_type: &EventType) -> Option<AggregateType> {
        self(stream_id, event_type)
    }
}

/// 按流命名约定 `<prefix><separator><id>` 推断聚合类型
#[derive(Debug, Clone)]
pub struct StreamPrefixClassifier {
    separator: char,
    prefixes: HashMap<String, AggregateType>,
}

impl StreamPrefixClassifier {
    pub fn new(separator: char) -> Self {
        Self {
            separator,
            prefixes: HashMap::new(),
        }
    }

    pub fn register(
        mut self,
        prefix: impl Into<String>,
        aggregate_type: impl Into<AggregateType>,
    ) -> Self {
        self.prefixes.insert(prefix.into(), aggregate_type.into());
        self
    }
}

impl AggregateTypeClassifier for StreamPrefixClassifier {
    fn classify(&self, stream_id: &str, _event_type: &EventType) -> Option<AggregateType> {
        let (prefix, _) = stream_id.split_once(self.separator)?;
        self.prefixes.get(prefix).cloned()
    }
}

/// 事件类型 -> 聚合类型 的注册表
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: HashMap<EventType, AggregateType>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        mut self,
        event_type: impl Into<EventType>,
        aggregate_type: impl Into<AggregateType>,
    ) -> Self {
        self.types.insert(event_type.into(), aggregate_type.into());
        self
    }
}

impl AggregateTypeClassifier for TypeRegistry {
    fn classify(&self, _stream_id: &str, event_type: &EventType) -> Option<AggregateType> {
        self.types.get(event_type).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_classifier_uses_stream_name() {
        let c = StreamPrefixClassifier::new('-').register("dc", "datacenter");
        let t = EventType::from("RackAdded");
        assert_eq!(
            c.classify("dc-42", &t),
            Some(AggregateType::from("datacenter"))
        );
        assert_eq!(c.classify("rack-1", &t), None);
        assert_eq!(c.classify("dc42", &t), None);
    }

    #[test]
    fn registry_uses_event_type() {
        let c = TypeRegistry::new().register("RackAdded", "datacenter");
        assert_eq!(
            c.classify("anything", &EventType::from("RackAdded")),
            Some(AggregateType::from("datacenter"))
        );
        assert_eq!(c.classify("anything", &EventType::from("Other")), None);
    }

    #[test]
    fn closures_are_classifiers() {
        let c = |_: &str, _: &EventType| Some(AggregateType::from("datacenter"));
        assert!(c.classify("x", &EventType::from("y")).is_some());
    }
}
