use crate::bridge::{Relayout, Target};
use crate::capability::probe_capability;
use crate::config::Config;
use crate::engine::BalanceReport;
use crate::host::LayoutHost;
use crate::lint::check_nesting;
use crate::markup::{instance_script, is_tag_name, js_number, wrapper_element};
use crate::watch::release_watch;
use htmlize::escape_text;

/// Content placed inside a balancer
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Text(String),
    Element { tag: String, children: Vec<Content> },
}

impl Content {
    pub fn text<S: ToString>(text: S) -> Content {
        Content::Text(text.to_string())
    }

    pub fn element<S: ToString>(tag: S, children: Vec<Content>) -> Content {
        Content::Element {
            tag: tag.to_string(),
            children,
        }
    }

    fn write_html(&self, html: &mut String) {
        match self {
            Content::Text(text) => html.push_str(&escape_text(text.as_str())),
            Content::Element { tag, children } if is_tag_name(tag) => {
                html.push_str(&format!("<{tag}>"));
                for child in children {
                    child.write_html(html);
                }
                html.push_str(&format!("</{tag}>"));
            }
            Content::Element { tag, children } => {
                tracing::warn!(tag, "invalid tag name, rendering only the children");
                for child in children {
                    child.write_html(html);
                }
            }
        }
    }

    /// The text content, without any markup
    pub fn plain_text(&self) -> String {
        match self {
            Content::Text(text) => text.clone(),
            Content::Element { children, .. } => children.iter().map(Content::plain_text).collect(),
        }
    }
}

/// Generates identifiers that are stable between a server render and the hydration that
/// follows it, as long as both create instances in the same order
#[derive(Debug, Default, Clone)]
pub struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    pub fn new() -> IdGenerator {
        IdGenerator::default()
    }

    /// The next identifier, `:r0:`, `:r1:`, … with the counter in base 32
    pub fn next_id(&mut self) -> String {
        const DIGITS: &[u8; 32] = b"0123456789abcdefghijklmnopqrstuv";

        let mut n = self.next;
        self.next += 1;

        let mut digits = Vec::new();
        loop {
            digits.push(DIGITS[(n % 32) as usize]);
            n /= 32;
            if n == 0 {
                break;
            }
        }
        digits.reverse();
        format!(":r{}:", String::from_utf8_lossy(&digits))
    }
}

/// What the embedding component is rendered with
#[derive(Debug, Default, Clone, PartialEq)]
pub struct BalancerProps {
    /// Wrapper element, [`Config::default_tag`] if unset
    pub tag: Option<String>,
    /// Balance ratio, [`Config::default_ratio`] if unset. `0` keeps the host's own wrapping,
    /// `1` is the narrowest width that keeps the line count.
    pub ratio: Option<f32>,
    /// Extra attributes for the wrapper element
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Content>,
}

impl BalancerProps {
    pub fn new() -> BalancerProps {
        BalancerProps::default()
    }

    /// Set the wrapper element, modifying `self`
    pub fn tag<S: ToString>(&mut self, tag: S) -> &mut Self {
        self.tag = Some(tag.to_string());
        self
    }

    /// Set the balance ratio, modifying `self`
    pub fn ratio(&mut self, ratio: f32) -> &mut Self {
        self.ratio = Some(ratio);
        self
    }

    /// Add an attribute to the wrapper element, modifying `self`
    pub fn attribute<S: ToString, T: ToString>(&mut self, name: S, value: T) -> &mut Self {
        self.attributes.push((name.to_string(), value.to_string()));
        self
    }

    /// Append content, modifying `self`
    pub fn child(&mut self, child: Content) -> &mut Self {
        self.children.push(child);
        self
    }

    pub fn resolved_ratio(&self, config: &Config) -> f32 {
        self.ratio.unwrap_or(config.default_ratio)
    }

    /// Server-render the wrapper and its initializer script for the instance `id`
    pub fn render_to_string(&self, id: &str, config: &Config) -> String {
        if config.lint_nesting {
            if let Some(warning) = check_nesting(&self.children) {
                tracing::warn!("{warning}");
            }
        }

        let mut inner = String::new();
        for child in &self.children {
            child.write_html(&mut inner);
        }

        let ratio = self.resolved_ratio(config);
        let tag = self.tag.as_deref().unwrap_or(&config.default_tag);
        let mut html = wrapper_element(config, tag, id, ratio, &self.attributes, &inner);
        html.push_str(&instance_script(config, id, ratio));
        html
    }
}

/// The client-side half of the embedding component: one instance per rendered wrapper.
///
/// The configuration an instance is created with names its attributes and drives every pass
/// it runs, including the resize watch those passes attach.
#[derive(Debug, Clone)]
pub struct Balancer<E> {
    id: String,
    ratio: f32,
    wrapper: Option<E>,
    relayout: Relayout,
}

impl<E: Copy + Eq + std::fmt::Debug> Balancer<E> {
    /// Take over a server-rendered wrapper, found by its identifier, and run the mount pass
    pub fn hydrate<H: LayoutHost<Element = E>>(
        host: &mut H,
        id: &str,
        ratio: f32,
        config: Config,
    ) -> Balancer<E> {
        let wrapper = host.find_by_attribute(&config.id_attribute, id);
        if wrapper.is_none() {
            tracing::debug!(id, "hydrating a balancer whose wrapper is gone");
        }
        let mut balancer = Balancer {
            id: id.to_string(),
            ratio,
            wrapper,
            relayout: Relayout::new(config),
        };
        balancer.layout_effect(host);
        balancer
    }

    /// Mount on a freshly created wrapper element: tag it with the identifier and ratio, then
    /// run the mount pass
    pub fn mount<H: LayoutHost<Element = E>>(
        host: &mut H,
        wrapper: E,
        id: &str,
        ratio: f32,
        config: Config,
    ) -> Balancer<E> {
        host.set_attribute(wrapper, &config.id_attribute, id);
        host.set_attribute(wrapper, &config.ratio_attribute, &js_number(ratio));
        let mut balancer = Balancer {
            id: id.to_string(),
            ratio,
            wrapper: Some(wrapper),
            relayout: Relayout::new(config),
        };
        balancer.layout_effect(host);
        balancer
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn ratio(&self) -> f32 {
        self.ratio
    }

    pub fn wrapper(&self) -> Option<E> {
        self.wrapper
    }

    pub fn config(&self) -> &Config {
        self.relayout.config()
    }

    /// The pass that runs after every render: nothing when the host balances natively or the
    /// page has no entry point yet, otherwise balance by reference with this instance's
    /// configuration
    pub fn layout_effect<H: LayoutHost<Element = E>>(&mut self, host: &mut H) -> BalanceReport {
        if probe_capability(host).is_native() {
            return BalanceReport::NativeBypass;
        }
        let Some(wrapper) = self.wrapper else {
            return BalanceReport::Detached;
        };
        if host.globals().relayout().is_none() {
            tracing::trace!(id = %self.id, "no entry point installed yet");
            return BalanceReport::NotInstalled;
        }
        self.relayout.call(host, Target::Element(wrapper), self.ratio)
    }

    /// The ratio prop changed: update the attribute resize notifications read, then re-run
    pub fn set_ratio<H: LayoutHost<Element = E>>(
        &mut self,
        host: &mut H,
        ratio: f32,
    ) -> BalanceReport {
        self.ratio = ratio;
        if let Some(wrapper) = self.wrapper {
            let attribute = &self.relayout.config().ratio_attribute;
            host.set_attribute(wrapper, attribute, &js_number(ratio));
        }
        self.layout_effect(host)
    }

    /// The children changed
    pub fn content_changed<H: LayoutHost<Element = E>>(
        &mut self,
        host: &mut H,
    ) -> BalanceReport {
        self.layout_effect(host)
    }

    /// Tear down: release the wrapper's resize watch. Returns whether one was released.
    pub fn unmount<H: LayoutHost<Element = E>>(self, host: &mut H) -> bool {
        if probe_capability(host).is_native() {
            return false;
        }
        match self.wrapper {
            Some(wrapper) => release_watch(host, wrapper),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn identifiers_count_in_base_32() {
        let mut ids = IdGenerator::new();
        let first: Vec<String> = (0..33).map(|_| ids.next_id()).collect();
        assert_eq!(first[0], ":r0:");
        assert_eq!(first[10], ":ra:");
        assert_eq!(first[31], ":rv:");
        assert_eq!(first[32], ":r10:");
    }

    #[test]
    fn renders_wrapper_and_initializer() {
        let mut props = BalancerProps::new();
        props
            .attribute("class", "headline")
            .child(Content::text("Fish & chips"));
        let html = props.render_to_string(":r0:", &Config::default());
        assert_eq!(
            html,
            "<span class=\"headline\" data-br=\":r0:\" data-brr=\"0.75\" \
             style=\"display:inline-block;vertical-align:top;text-wrap:balance\">Fish &amp; chips</span>\
             <script>self.__relayoutText(\":r0:\",0.75)</script>"
        );
    }

    #[test]
    fn custom_tag_and_ratio() {
        let mut props = BalancerProps::new();
        props
            .tag("div")
            .ratio(0.5)
            .child(Content::element("em", vec![Content::text("x")]));
        let html = props.render_to_string(":r2:", &Config::default());
        assert!(html.starts_with("<div data-br=\":r2:\" data-brr=\"0.5\""));
        assert!(html.contains("><em>x</em></div><script>"));
        assert_eq!(props.children[0].plain_text(), "x");
    }

    #[test]
    fn invalid_tag_names_never_reach_the_markup() {
        let mut props = BalancerProps::new();
        props.tag("span onmouseover=alert(1)").child(Content::element(
            "b onclick=x",
            vec![Content::text("bold")],
        ));
        let html = props.render_to_string(":r3:", &Config::default());
        assert!(html.starts_with("<span data-br=\":r3:\""));
        assert!(html.contains(">bold</span><script>"));
        assert!(!html.contains("onmouseover"));
        assert!(!html.contains("onclick"));
    }
}
