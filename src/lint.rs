use crate::component::Content;
use derive_more::Display;

/// Advisory warning about a component wrapping a block element instead of inline content.
/// Balancing behaves the same either way.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display(
    "<Balancer> should not wrap <{tag}> inside. Instead, it should directly wrap text or inline nodes.\n\n\
     Try changing this:\n  <Balancer><{tag}>content</{tag}></Balancer>\n\
     To:\n  <{tag}><Balancer>content</Balancer></{tag}>"
)]
pub struct NestingWarning {
    pub tag: String,
}

/// Warn when the only child is an element other than `span`
pub fn check_nesting(children: &[Content]) -> Option<NestingWarning> {
    match children {
        [Content::Element { tag, .. }] if !tag.eq_ignore_ascii_case("span") => {
            Some(NestingWarning { tag: tag.clone() })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_block_child_is_flagged() {
        let warning = check_nesting(&[Content::element("h1", vec![Content::text("Title")])]);
        assert_eq!(
            warning,
            Some(NestingWarning {
                tag: "h1".to_string()
            })
        );
        let message = warning.map(|w| w.to_string()).unwrap_or_default();
        assert!(message.starts_with("<Balancer> should not wrap <h1> inside."));
        assert!(message.ends_with("<h1><Balancer>content</Balancer></h1>"));
    }

    #[test]
    fn text_spans_and_mixed_children_pass() {
        assert_eq!(check_nesting(&[Content::text("plain")]), None);
        assert_eq!(check_nesting(&[Content::element("span", vec![])]), None);
        assert_eq!(
            check_nesting(&[Content::text("a "), Content::element("em", vec![])]),
            None
        );
    }
}
