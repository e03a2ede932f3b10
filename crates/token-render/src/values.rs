//! 占位符取值

use std::{
    borrow::{Borrow, Cow},
    collections::{BTreeMap, HashMap},
    hash::{BuildHasher, Hash},
};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 渲染时的取值来源
///
/// 缺失的键返回 None, 查找本身不会失败.
pub trait Lookup {
    fn lookup(&self, key: &str) -> Option<Cow<'_, str>>;
}

/// 可作为占位符值的类型
///
/// None 表示未提供 (包括显式的 null).
pub trait AsValue {
    fn as_value(&self) -> Option<Cow<'_, str>>;
}

impl AsValue for str {
    fn as_value(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self))
    }
}

impl AsValue for String {
    fn as_value(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self))
    }
}

impl AsValue for Cow<'_, str> {
    fn as_value(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self))
    }
}

impl<T: AsValue> AsValue for Option<T> {
    fn as_value(&self) -> Option<Cow<'_, str>> {
        self.as_ref().and_then(T::as_value)
    }
}

impl<T: AsValue + ?Sized> AsValue for &T {
    fn as_value(&self) -> Option<Cow<'_, str>> {
        (**self).as_value()
    }
}

/// 字符串原样使用, 数字与布尔取其 JSON 文本, 其余视为未提供
impl AsValue for Value {
    fn as_value(&self) -> Option<Cow<'_, str>> {
        match self {
            Value::String(s) => Some(Cow::Borrowed(s)),
            Value::Number(n) => Some(Cow::Owned(n.to_string())),
            Value::Bool(b) => Some(Cow::Owned(b.to_string())),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }
}

/// 占位符键值表
///
/// 区分 "键不存在" 与 "键存在但值为 null / 空串", 渲染时三者均回退到默认值.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenValues(HashMap<String, Option<String>>);

impl TokenValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// 写入值, 返回旧值
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<Option<String>> {
        self.0.insert(key.into(), Some(value.into()))
    }

    /// 写入显式空值
    pub fn insert_null(&mut self, key: impl Into<String>) -> Option<Option<String>> {
        self.0.insert(key.into(), None)
    }

    pub fn remove(&mut self, key: &str) -> Option<Option<String>> {
        self.0.remove(key)
    }

    /// 获取值, 键不存在或为 null 时返回 None
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Option::as_deref)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> Extend<(K, V)> for TokenValues
where
    K: Into<String>,
    V: AsValue,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.0.extend(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.as_value().map(Cow::into_owned))),
        );
    }
}

impl<K, V> FromIterator<(K, V)> for TokenValues
where
    K: Into<String>,
    V: AsValue,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = Self::new();
        values.extend(iter);
        values
    }
}

impl<K, V, S> From<HashMap<K, V, S>> for TokenValues
where
    K: Into<String>,
    V: AsValue,
{
    fn from(value: HashMap<K, V, S>) -> Self {
        value.into_iter().collect()
    }
}

//////////////// Lookup ////////////////

impl Lookup for TokenValues {
    fn lookup(&self, key: &str) -> Option<Cow<'_, str>> {
        self.get(key).map(Cow::Borrowed)
    }
}

impl<K, V, S> Lookup for HashMap<K, V, S>
where
    K: Borrow<str> + Hash + Eq,
    V: AsValue,
    S: BuildHasher,
{
    fn lookup(&self, key: &str) -> Option<Cow<'_, str>> {
        self.get(key).and_then(AsValue::as_value)
    }
}

impl<K, V> Lookup for BTreeMap<K, V>
where
    K: Borrow<str> + Ord,
    V: AsValue,
{
    fn lookup(&self, key: &str) -> Option<Cow<'_, str>> {
        self.get(key).and_then(AsValue::as_value)
    }
}

impl Lookup for Map<String, Value> {
    fn lookup(&self, key: &str) -> Option<Cow<'_, str>> {
        self.get(key).and_then(AsValue::as_value)
    }
}

/// 仅对象可取值, 其他 JSON 值视为空表
impl Lookup for Value {
    fn lookup(&self, key: &str) -> Option<Cow<'_, str>> {
        self.as_object().and_then(|map| map.lookup(key))
    }
}

/// 空表
impl Lookup for () {
    fn lookup(&self, _key: &str) -> Option<Cow<'_, str>> {
        None
    }
}

/// None 视为空表
impl<L: Lookup> Lookup for Option<L> {
    fn lookup(&self, key: &str) -> Option<Cow<'_, str>> {
        self.as_ref().and_then(|values| values.lookup(key))
    }
}

impl<L: Lookup + ?Sized> Lookup for &L {
    fn lookup(&self, key: &str) -> Option<Cow<'_, str>> {
        (**self).lookup(key)
    }
}
