//! 占位符片段

use std::{borrow::Cow, fmt};

use serde::{Deserialize, Serialize};

pub(crate) const OPEN: &str = "{{";
pub(crate) const CLOSE: &str = "}}";
const SEPARATOR: char = '|';

/// 单个占位符
///
/// 模板串为 "{{key}}" / "{{key|default}}" (含 {{}} 边界).
/// key 与 default 均按原文保留, 不做裁剪.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    raw: String,
    key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default_value: Option<String>,
}

impl Token {
    /// 从单个占位符创建
    ///
    /// 文本不是恰好一个 {{...}} 时返回 None
    pub fn parse(raw: &str) -> Option<Self> {
        let body = raw.strip_prefix(OPEN)?;
        // 首个 }} 即闭合, 必须恰好位于末尾
        let end = body.find(CLOSE)?;
        (end + CLOSE.len() == body.len()).then(|| Self::from_inner(raw, &body[..end]))
    }

    /// 由匹配结果创建, raw 已保证形如 {{inner}}
    pub(crate) fn from_inner(raw: &str, inner: &str) -> Self {
        // 仅按第一个 | 分割
        let (key, default_value) = match inner.split_once(SEPARATOR) {
            None => (inner, None),
            Some((key, default)) => (key, Some(default.to_string())),
        };

        Self {
            raw: raw.to_string(),
            key: key.to_string(),
            default_value,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// 默认值, Some("") 为有效的空默认值
    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    /// 按 值 -> 默认值 -> 原文 的顺序确定替换内容
    ///
    /// 值会先去除首尾空白, 空值视为未提供.
    pub fn resolve<'a>(&'a self, value: Option<Cow<'a, str>>) -> Resolution<'a> {
        let value = value.map(|v| match v {
            Cow::Borrowed(b) => Cow::Borrowed(b.trim()),
            Cow::Owned(o) if o.trim().len() == o.len() => Cow::Owned(o),
            Cow::Owned(o) => Cow::Owned(o.trim().to_string()),
        });

        match (value, &self.default_value) {
            (Some(v), _) if !v.is_empty() => Resolution::Value(v),
            (_, Some(d)) => Resolution::Default(d),
            (_, None) => Resolution::Unresolved(&self.raw),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// 占位符的替换结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// 使用提供的值 (已去除首尾空白)
    Value(Cow<'a, str>),
    /// 使用内联默认值
    Default(&'a str),
    /// 保留原文
    Unresolved(&'a str),
}

impl Resolution<'_> {
    pub fn is_resolved(&self) -> bool {
        !matches!(self, Self::Unresolved(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Value(v) => v,
            Self::Default(d) | Self::Unresolved(d) => d,
        }
    }

    pub(crate) fn tier(&self) -> &'static str {
        match self {
            Self::Value(_) => "value",
            Self::Default(_) => "default",
            Self::Unresolved(_) => "raw",
        }
    }
}
