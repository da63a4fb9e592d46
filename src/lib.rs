//! Balances the line lengths of wrapped inline text.
//!
//! Greedy wrapping fills each line as far as it can and leaves whatever is left over on the
//! last one, often a single orphaned word. This crate narrows the box the text wraps in until
//! just before another line would be needed, so the lines come out roughly even. It never
//! measures text itself: it writes a wrapper's `max-width` through a [`LayoutHost`] and reads
//! back the host's own layout.
//!
//! # Example
//!
//! ```
//! use wrap_balancer::layout::{LayoutDocument, Padding, TextStyle};
//! use wrap_balancer::{init_wrap_balancer, invoke_by_id, BalanceReport, LayoutHost, Px};
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
//! doc.set_attribute(wrapper, "data-br", ":r0:");
//!
//! // before the entry point exists, calls by identifier wait in a queue
//! assert_eq!(invoke_by_id(&mut doc, ":r0:", 0.5), BalanceReport::Queued);
//! init_wrap_balancer(&mut doc);
//! assert_eq!(doc.max_width(wrapper), Some(Px(350.0)));
//! ```

mod bridge;
pub use bridge::*;

mod capability;
pub use capability::*;

/// The client-side and server-side halves of the embedding component
pub mod component;

mod config;
pub use config::*;

mod engine;
pub use engine::*;

mod error;
pub use error::*;

mod globals;
pub use globals::*;

mod host;
pub use host::*;

/// A reference [`LayoutHost`] that lays out text in memory
pub mod layout;

/// Development-time checks on component children
pub mod lint;

pub mod markup;

mod units;
pub use units::*;

mod watch;
pub use watch::*;
