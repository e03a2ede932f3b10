use thiserror::Error;

/// 模板诊断信息
///
/// 提取与渲染本身不会失败, 诊断随结果一并返回, 由调用方决定是否视为错误.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("Unterminated placeholder: offset={offset}")]
    Unterminated { offset: usize },

    #[error("Placeholder unresolved: raw={raw}, key={key}")]
    Unresolved { raw: String, key: String },
}
