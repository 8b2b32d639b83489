//! 值对象（Value Object）
//!
//! 事件信封上以值相等为准的不可变概念：版本号与字符串分类标签。
//!

use serde::{Deserialize, Serialize};
use std::fmt;

/// 版本号（用于乐观锁和并发控制）
///
/// 表示聚合在某一时刻的版本，也作为追加事件时的期望版本来源。
///
/// # 示例
///
/// ```
/// use dcgen_events::value_object::Version;
///
/// let v1 = Version::new();
/// assert_eq!(v1.value(), 0);
/// assert!(v1.is_new());
///
/// let v2 = v1.next();
/// assert_eq!(v2.value(), 1);
/// assert!(v2 > v1);
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Version(u64);

impl Version {
    /// 创建初始版本（版本号为 0）
    pub const fn new() -> Self {
        Self(0)
    }

    /// 从值创建版本号
    pub const fn from_value(value: u64) -> Self {
        Self(value)
    }

    /// 获取下一个版本号
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    /// 获取上一个版本号，初始版本没有上一个版本
    pub fn previous(&self) -> Option<Self> {
        self.0.checked_sub(1).map(Self)
    }

    /// 获取版本号的值
    pub const fn value(&self) -> u64 {
        self.0
    }

    /// 检查是否为初始版本
    pub fn is_new(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl From<u64> for Version {
    fn from(value: u64) -> Self {
        Self::from_value(value)
    }
}

impl From<Version> for u64 {
    fn from(version: Version) -> Self {
        version.value()
    }
}

// 字符串承载的分类标签：序列化为裸字符串，空字符串即“未设置”
macro_rules! string_tag {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// 是否为零值（未设置）
            pub fn is_unset(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

string_tag! {
    /// 事件类型（如 `RackAdded`），构造后不可变
    EventType
}

string_tag! {
    /// 聚合类型（如 `datacenter`），标识事件所属聚合的种类
    AggregateType
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_next_and_previous() {
        let v = Version::new().next().next().next();
        assert_eq!(v.value(), 3);
        assert_eq!(v.previous(), Some(Version::from_value(2)));
        assert_eq!(Version::new().previous(), None);
    }

    #[test]
    fn test_version_display() {
        assert_eq!(format!("{}", Version::from_value(5)), "v5");
    }

    #[test]
    fn test_version_serde() {
        let v = Version::from_value(42);
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, "42");
        let back: Version = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
    }

    #[test]
    fn test_tags_serialize_as_plain_strings() {
        let t = EventType::from("RackAdded");
        assert_eq!(serde_json::to_string(&t).unwrap(), "\"RackAdded\"");
        assert_eq!(t, "RackAdded");

        let unset = AggregateType::default();
        assert!(unset.is_unset());
        assert!(!AggregateType::new("datacenter").is_unset());
    }
}
