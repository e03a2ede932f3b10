//! 模板字符串提取与渲染

use std::{borrow::Cow, collections::HashSet, convert::Infallible, str::FromStr};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace};

use crate::{
    error::*,
    token::{OPEN, Token},
    values::Lookup,
};

/// 捕获 {{...}} 的正则, 首个 }} 即闭合
static PLACEHOLDER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\{\{(.*?)\}\}").expect("placeholder regex is a valid constant")
});

#[derive(Debug, Clone)]
enum Segment {
    Text(String),
    Replace(Token),
}

/// 预编译的模板
///
/// 模板串为包含了 {{key}} / {{key|default}} 的字符串.
///
/// 渲染时, 将对应 key 替换为传入的值 (去除首尾空白, 空值视为未提供),
/// 未提供时采用默认值, 仍无则保留原文.
/// 替换按占位符所在位置进行, 替换结果不会被再次匹配.
#[derive(Debug, Clone)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    /// 从模板字符串创建
    ///
    /// 未闭合的 {{ 按文本处理, 并返回诊断
    pub fn new(template: &str) -> (Self, Vec<Error>) {
        let mut segments = Vec::new();
        let mut last = 0;

        for caps in PLACEHOLDER_REGEX.captures_iter(template) {
            let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
                continue;
            };

            if last < whole.start() {
                segments.push(Segment::Text(template[last..whole.start()].to_string()));
            }
            segments.push(Segment::Replace(Token::from_inner(
                whole.as_str(),
                inner.as_str(),
            )));
            last = whole.end();
        }

        // 最后一个占位符之后的 {{ 均无法闭合
        let tail = &template[last..];
        let errs: Vec<_> = tail
            .match_indices(OPEN)
            .map(|(i, _)| {
                debug!(offset = last + i, "unterminated placeholder");
                Error::Unterminated { offset: last + i }
            })
            .collect();
        if !tail.is_empty() {
            segments.push(Segment::Text(tail.to_string()));
        }

        (
            Self {
                source: template.to_string(),
                segments,
            },
            errs,
        )
    }

    /// 原始模板串
    pub fn source(&self) -> &str {
        &self.source
    }

    /// 按出现顺序遍历全部占位符 (含重复)
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Replace(token) => Some(token),
            Segment::Text(_) => None,
        })
    }

    /// 去重后的占位符, 以原文判等, 保留首次出现顺序
    pub fn unique_tokens(&self) -> Vec<&Token> {
        let mut seen = HashSet::new();
        let mut unique = Vec::new();
        for token in self.tokens() {
            if seen.insert(token.raw()) {
                unique.push(token);
            }
        }
        unique
    }

    /// 去重后的 key, 保留首次出现顺序
    pub fn keys(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.tokens()
            .map(Token::key)
            .filter(|key| seen.insert(*key))
            .collect()
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.segments
            .into_iter()
            .filter_map(|segment| match segment {
                Segment::Replace(token) => Some(token),
                Segment::Text(_) => None,
            })
            .collect()
    }

    /// 使用取值表渲染模板
    pub fn render<L: Lookup + ?Sized>(&self, values: &L) -> String {
        self.fill(|key| values.lookup(key)).0
    }

    /// 使用闭包取值渲染模板
    pub fn render_with<F>(&self, mut map: F) -> String
    where
        F: FnMut(&str) -> Option<Cow<'_, str>>,
    {
        self.fill(|key| map(key)).0
    }

    /// 渲染模板
    ///
    /// 结果与 render 相同, 另对每个保留原文的占位符返回报错
    pub fn render_checked<L: Lookup + ?Sized>(&self, values: &L) -> (String, Vec<Error>) {
        self.fill(|key| values.lookup(key))
    }

    fn fill<'a, F>(&'a self, mut lookup: F) -> (String, Vec<Error>)
    where
        F: FnMut(&'a str) -> Option<Cow<'a, str>>,
    {
        let mut result = String::with_capacity(self.source.len());
        let mut errs = Vec::new();

        for segment in &self.segments {
            let token = match segment {
                Segment::Text(t) => {
                    result.push_str(t);
                    continue;
                }
                Segment::Replace(token) => token,
            };

            let resolution = token.resolve(lookup(token.key()));
            trace!(raw = token.raw(), tier = resolution.tier(), "placeholder resolved");

            if !resolution.is_resolved() {
                errs.push(Error::Unresolved {
                    raw: token.raw().to_string(),
                    key: token.key().to_string(),
                });
            }
            result.push_str(resolution.as_str());
        }

        (result, errs)
    }
}

impl FromStr for Template {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl From<&str> for Template {
    /// 创建模板, 丢弃诊断
    fn from(value: &str) -> Self {
        Self::new(value).0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unterminated_offset() {
        let (template, errs) = Template::new("{{a}} and {{b");
        assert_eq!(errs, vec![Error::Unterminated { offset: 10 }]);
        assert_eq!(template.tokens().count(), 1);
        assert_eq!(template.render(&()), "{{a}} and {{b");
    }

    #[test]
    fn test_keys() {
        let template = Template::from("{{a}} {{b|x}} {{a|y}} {{b|x}}");
        assert_eq!(template.keys(), vec!["a", "b"]);
        assert_eq!(template.unique_tokens().len(), 3);
        assert_eq!(template.tokens().count(), 4);
    }
}
