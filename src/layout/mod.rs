//! A reference layout host for wrapped text.
//!
//! [`LayoutDocument`] implements [`LayoutHost`](crate::LayoutHost) without a browser: it
//! sizes inline-block wrappers shrink-to-fit inside fixed-width containers and wraps their
//! text greedily at whitespace with fixed-advance metrics. It reproduces the behaviours the
//! balancer depends on (height growing when a line is added, content overflowing a box
//! narrower than its longest word, hidden zero-width containers) and lets tests observe how
//! many metrics were read.
//!
//! # Example
//!
//! ```
//! use wrap_balancer::layout::{LayoutDocument, Padding, TextStyle};
//! use wrap_balancer::{balance, Config, LayoutHost, Px};
//!
//! let mut doc = LayoutDocument::new();
//! let container = doc.add_container(Px(400.0), Padding::empty());
//! let wrapper = doc
//!     .add_wrapper(
//!         container,
//!         "The quick brown fox jumps over",
//!         TextStyle::monospace(Px(10.0), Px(20.0)),
//!     )
//!     .expect("container exists");
//!
//! balance(&mut doc, wrapper, 1.0, &Config::default());
//! assert_eq!(doc.max_width(wrapper), Some(Px(300.0)));
//! ```

mod document;
mod padding;
mod text;

pub use document::*;
pub use padding::*;
pub use text::*;
