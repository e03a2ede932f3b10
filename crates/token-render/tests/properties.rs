//! 提取与渲染的性质测试

use std::{borrow::Cow, collections::HashSet};

use proptest::prelude::*;
use token_render::*;

/// 逐字扫描统计 {{...}} 个数
fn count_markers(template: &str) -> usize {
    let mut count = 0;
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        match rest[start + 2..].find("}}") {
            Some(end) => {
                count += 1;
                rest = &rest[start + 2 + end + 2..];
            }
            None => break,
        }
    }
    count
}

/// 花括号密集的模板
fn template_strategy() -> impl Strategy<Value = String> {
    "[ab{}| ]{0,48}"
}

proptest! {
    #[test]
    fn unique_extraction_is_idempotent(template in template_strategy()) {
        let tokens = extract(&template, true);

        let raws: HashSet<_> = tokens.iter().map(Token::raw).collect();
        prop_assert_eq!(raws.len(), tokens.len());

        let joined = tokens.iter().map(Token::raw).collect::<Vec<_>>().join(" ");
        prop_assert_eq!(extract(&joined, true), tokens);
    }

    #[test]
    fn extraction_is_complete(template in template_strategy()) {
        prop_assert_eq!(extract(&template, false).len(), count_markers(&template));
    }

    #[test]
    fn tokens_keep_raw_shape(template in template_strategy()) {
        for token in extract(&template, false) {
            let rebuilt = match token.default_value() {
                Some(default) => format!("{{{{{}|{}}}}}", token.key(), default),
                None => format!("{{{{{}}}}}", token.key()),
            };
            prop_assert_eq!(token.raw(), rebuilt);
            prop_assert!(!token.key().contains('|'));
        }
    }

    #[test]
    fn render_without_values_keeps_markers(template in "[ab{} ]{0,48}") {
        prop_assert_eq!(render(&template, &()), template);
    }

    #[test]
    fn render_fills_every_occurrence(template in template_strategy()) {
        let parser = Template::from(template.as_str());
        let count = parser.tokens().count();

        let (result, errs) = parser.render_checked(&TokenValues::new());
        let bare = parser.tokens().filter(|t| t.default_value().is_none()).count();
        prop_assert_eq!(errs.len(), bare);

        let result_filled = parser.render_with(|_| Some(Cow::Borrowed("#")));
        prop_assert_eq!(result_filled.matches('#').count(), count);
        prop_assert_eq!(render(&template, &()), result);
    }

    #[test]
    fn render_is_total(template in any::<String>(), value in any::<String>()) {
        let tokens = extract(&template, true);
        let values: TokenValues = tokens.iter().map(|t| (t.key(), value.as_str())).collect();

        let _ = render(&template, &values);
    }
}
