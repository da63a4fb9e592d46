//! Server-rendered markup that lets a page balance before the application attaches.
//!
//! A page emits [`relayout_script`] once, typically in its `<head>`, and every component
//! instance emits its wrapper followed by an [`instance_script`]. The bootstrap seeds the
//! capability global and installs [`relayout_function`], a script rendition of
//! [`balance`](crate::balance), under the relayout global, so each instance script balances
//! its wrapper as soon as the browser parses it. The script keeps the engine's bounds, rounding
//! and lower-bound refinement, and attaches one resize observer per wrapper that re-reads the
//! ratio attribute.

use crate::bridge::Relayout;
use crate::config::Config;
use htmlize::escape_attribute;

/// Inline style of every wrapper. `text-wrap: balance` lets hosts with native support do the
/// work themselves; the balancer then never touches `max-width`.
pub const WRAPPER_STYLE: &str = "display:inline-block;vertical-align:top;text-wrap:balance";

/// Format a number the way a script literal or attribute expects it
pub(crate) fn js_number(value: f32) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else {
        value.to_string()
    }
}

/// A string literal that is safe to embed inside a `<script>` element
fn js_string(value: &str) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| "\"\"".to_string())
        .replace("</", "<\\/")
}

/// An element name: an ASCII letter followed by letters, digits or hyphens
pub(crate) fn is_tag_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|first| first.is_ascii_alphabetic())
        && chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '-')
}

/// An attribute name: no whitespace, controls, quotes, `<`, `>`, `/` or `=`
pub(crate) fn is_attribute_name(name: &str) -> bool {
    !name.is_empty()
        && name.chars().all(|ch| {
            !ch.is_whitespace()
                && !ch.is_control()
                && !matches!(ch, '"' | '\'' | '<' | '>' | '/' | '=')
        })
}

/// The balancing entry point as a script function `(id, ratio, wrapper?)`.
///
/// Resolves the wrapper by identifier unless one is passed, skips everything under native
/// support or when the wrapper is detached, runs the search against the container's client
/// metrics, applies the interpolated width and attaches a resize observer that calls the
/// relayout global again with the ratio attribute's current value.
pub fn relayout_function(config: &Config) -> String {
    let Config {
        id_attribute,
        ratio_attribute,
        relayout_global: relayout,
        capability_global: capability,
        observer_property,
        refine_lower_bound,
        ..
    } = config;
    let selector = js_string(&format!("[{id_attribute}=\""));
    let ratio_attribute = js_string(ratio_attribute);
    let observer = js_string(observer_property);
    let refine = if *refine_lower_bound {
        "u(l);l=Math.max(w.scrollWidth,l);"
    } else {
        ""
    };
    format!(
        "function(i,r,w){{\
         if(self.{capability}==1)return;\
         w=w||document.querySelector({selector}+i+'\"]');\
         var c=w&&w.parentElement;\
         if(!c)return;\
         var u=function(x){{w.style.maxWidth=x+\"px\"}};\
         w.style.maxWidth=\"\";\
         var W=c.clientWidth,H=c.clientHeight,l=W/2-.25,h=W+.5,m;\
         if(W){{{refine}\
         while(l+1<h){{m=Math.round((l+h)/2);u(m);if(c.clientHeight===H)h=m;else l=m}}\
         u(h*r+W*(1-r))}}\
         if(!w[{observer}]&&typeof ResizeObserver!==\"undefined\")\
         (w[{observer}]=new ResizeObserver(function(){{\
         var q=+w.getAttribute({ratio_attribute});if(q===q)self.{relayout}(0,q,w)}})).observe(c)}}"
    )
}

/// The body of the bootstrap script. Both assignments keep a value that is already present.
pub fn relayout_script_code(config: &Config) -> String {
    let Config {
        relayout_global: relayout,
        capability_global: capability,
        ..
    } = config;
    format!(
        "self.{capability}=self.{capability}||\
         (self.CSS&&CSS.supports(\"text-wrap\",\"balance\")?1:2);\
         self.{relayout}=self.{relayout}||{}",
        relayout_function(config)
    )
}

/// The bootstrap script element, tagged with the entry point version it expects
pub fn relayout_script(config: &Config) -> String {
    format!(
        "<script data-relayout=\"{}\">{}</script>",
        escape_attribute(Relayout::VERSION),
        relayout_script_code(config)
    )
}

/// The per-instance initializer calling the relayout global by identifier
pub fn instance_script(config: &Config, id: &str, ratio: f32) -> String {
    format!(
        "<script>self.{}({},{})</script>",
        config.relayout_global,
        js_string(id),
        js_number(ratio)
    )
}

/// The wrapper element around already-rendered `inner_html`. Extra `attributes` come first;
/// the identifier, ratio and style always win over them. A `tag` that is not an element name
/// falls back to [`Config::default_tag`], and extra attributes with invalid names are dropped.
pub fn wrapper_element(
    config: &Config,
    tag: &str,
    id: &str,
    ratio: f32,
    attributes: &[(String, String)],
    inner_html: &str,
) -> String {
    let tag = if is_tag_name(tag) {
        tag
    } else {
        tracing::warn!(tag, "invalid wrapper tag name, using the default");
        if is_tag_name(&config.default_tag) {
            config.default_tag.as_str()
        } else {
            "span"
        }
    };

    let mut html = format!("<{tag}");
    for (name, value) in attributes {
        if name == &config.id_attribute || name == &config.ratio_attribute || name == "style" {
            continue;
        }
        if !is_attribute_name(name) {
            tracing::warn!(name, "dropping wrapper attribute with an invalid name");
            continue;
        }
        html.push_str(&format!(" {}=\"{}\"", name, escape_attribute(value.as_str())));
    }
    html.push_str(&format!(
        " {}=\"{}\" {}=\"{}\" style=\"{}\">{}</{}>",
        config.id_attribute,
        escape_attribute(id),
        config.ratio_attribute,
        js_number(ratio),
        WRAPPER_STYLE,
        inner_html,
        tag
    ));
    html
}
