use crate::config::Config;
use crate::engine::{balance, BalanceReport};
use crate::globals::PendingCall;
use crate::host::LayoutHost;

/// How a call names the wrapper to balance
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Target<'a, E> {
    /// By the value of its identifier attribute, before a live reference exists
    Id(&'a str),
    /// By a live reference
    Element(E),
}

/// The balancing entry point installed in a host's globals.
///
/// There is exactly one implementation, shared by markup-driven calls (by identifier) and
/// component-driven calls (by reference), so both paths compute the same width. The version
/// is written into the bootstrap script so a page can tell which entry point it expects.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Relayout {
    config: Config,
}

impl Relayout {
    pub const VERSION: &'static str = env!("CARGO_PKG_VERSION");

    pub fn new(config: Config) -> Relayout {
        Relayout { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Resolve `target` and balance it. An identifier that matches nothing is a no-op.
    pub fn call<H: LayoutHost>(
        &self,
        host: &mut H,
        target: Target<'_, H::Element>,
        ratio: f32,
    ) -> BalanceReport {
        let wrapper = match target {
            Target::Element(wrapper) => wrapper,
            Target::Id(id) => match host.find_by_attribute(&self.config.id_attribute, id) {
                Some(wrapper) => wrapper,
                None => {
                    tracing::debug!(id, "no wrapper carries this identifier");
                    return BalanceReport::NotFound;
                }
            },
        };
        balance(host, wrapper, ratio, &self.config)
    }
}

/// Balance through the host's installed entry point. Identifier-based calls made before
/// anything is installed are queued and replayed by [`install`]; reference-based calls are
/// dropped since the component re-runs them once it mounts.
pub fn relayout<H: LayoutHost>(
    host: &mut H,
    target: Target<'_, H::Element>,
    ratio: f32,
) -> BalanceReport {
    if let Some(relayout) = host.globals().relayout().cloned() {
        return relayout.call(host, target, ratio);
    }

    match target {
        Target::Id(id) => {
            tracing::trace!(id, ratio, "queueing call until an entry point is installed");
            host.globals().queue(PendingCall {
                id: id.to_string(),
                ratio,
            });
            BalanceReport::Queued
        }
        Target::Element(_) => BalanceReport::NotInstalled,
    }
}

/// Balance the wrapper carrying identifier `id`
pub fn invoke_by_id<H: LayoutHost>(host: &mut H, id: &str, ratio: f32) -> BalanceReport {
    relayout(host, Target::Id(id), ratio)
}

/// Install an entry point built from `config` unless one is present, then replay any queued
/// calls through whichever entry point ended up installed. Returns the number replayed.
pub fn install<H: LayoutHost>(host: &mut H, config: Config) -> usize {
    let (relayout, installed) = host.globals().install_relayout(Relayout::new(config));
    let relayout = relayout.clone();
    if installed {
        tracing::debug!(version = Relayout::VERSION, "installed relayout entry point");
    }

    let pending = host.globals().take_pending();
    let replayed = pending.len();
    for call in pending {
        relayout.call(host, Target::Id(&call.id), call.ratio);
    }
    replayed
}

/// Install the default entry point for pages rendered without the bootstrap script. Does
/// nothing if one is already installed. Returns whether this call installed it.
pub fn init_wrap_balancer<H: LayoutHost>(host: &mut H) -> bool {
    let was_installed = host.globals().relayout().is_some();
    install(host, Config::default());
    !was_installed
}
