//! 模板占位符替换
//!
//! 模板串中的占位符形如 `{{key}}` 或 `{{key|default}}`.
//!
//! - [`extract`] 提取占位符
//! - [`render`] 按 值 -> 默认值 -> 原文 的顺序填充占位符
//!
//! 重复使用同一模板时, 可通过 [`Template`] 预编译.
//!
//! ```
//! use token_render::{TokenValues, render};
//!
//! let mut values = TokenValues::new();
//! values.insert("name", " Anon ");
//!
//! assert_eq!(
//!     render("Hello {{name}} from {{city|Tokyo}}, {{missing}}", &values),
//!     "Hello Anon from Tokyo, {{missing}}",
//! );
//! ```

mod error;
mod parser;
mod token;
mod values;

pub use error::*;
pub use parser::Template;
pub use token::{Resolution, Token};
pub use values::{AsValue, Lookup, TokenValues};

/// 按出现顺序提取模板中的占位符
///
/// `only_unique` 为 true 时按原文去重, 保留首次出现的位置.
/// 未闭合的 {{ 不会被提取.
pub fn extract(template: &str, only_unique: bool) -> Vec<Token> {
    let (template, _) = Template::new(template);
    match only_unique {
        true => template.unique_tokens().into_iter().cloned().collect(),
        false => template.into_tokens(),
    }
}

/// 渲染模板
///
/// 无取值表时传入 `&()`. 渲染不会失败, 无法填充的占位符保留原文.
pub fn render<L: Lookup + ?Sized>(template: &str, values: &L) -> String {
    Template::from(template).render(values)
}
