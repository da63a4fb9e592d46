use crate::bridge::Relayout;
use crate::config::Config;
use crate::engine::{balance, BalanceReport};
use crate::error::BalanceError;
use crate::host::LayoutHost;

/// A wrapper whose observed container changed size, with the entry point its watch was
/// created for
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeNotification<E> {
    pub wrapper: E,
    pub relayout: Relayout,
}

/// Attach a resize watch on `container` to `wrapper` unless it already has one or the host
/// cannot observe sizes. The watch re-balances with `config`, whatever entry point is installed
/// later. Returns whether a watch was created.
pub fn ensure_watch<H: LayoutHost>(
    host: &mut H,
    wrapper: H::Element,
    container: H::Element,
    config: &Config,
) -> bool {
    if host.has_resize_watch(wrapper) {
        return false;
    }
    if !host.supports_resize_observer() {
        tracing::debug!(?wrapper, "host cannot observe resizes, balancing once only");
        return false;
    }
    host.attach_resize_watch(wrapper, container, Relayout::new(config.clone()));
    tracing::trace!(?wrapper, ?container, "attached resize watch");
    true
}

/// Disconnect the watch owned by `wrapper`. Returns whether there was one.
pub fn release_watch<H: LayoutHost>(host: &mut H, wrapper: H::Element) -> bool {
    let released = host.detach_resize_watch(wrapper);
    if released {
        tracing::trace!(?wrapper, "released resize watch");
    }
    released
}

/// Read the wrapper's ratio attribute as it is right now
pub fn current_ratio<H: LayoutHost>(
    host: &H,
    wrapper: H::Element,
    attribute: &str,
) -> Result<f32, BalanceError> {
    let value = host
        .attribute(wrapper, attribute)
        .ok_or_else(|| BalanceError::MissingRatio {
            attribute: attribute.to_string(),
        })?;
    value
        .trim()
        .parse::<f32>()
        .map_err(|_| BalanceError::InvalidRatio {
            attribute: attribute.to_string(),
            value,
        })
}

/// Re-balance a wrapper whose container resized, using the ratio its attribute holds now
pub fn notify<H: LayoutHost>(
    host: &mut H,
    wrapper: H::Element,
    relayout: &Relayout,
) -> Result<BalanceReport, BalanceError> {
    let config = relayout.config();
    let ratio = current_ratio(host, wrapper, &config.ratio_attribute)?;
    Ok(balance(host, wrapper, ratio, config))
}

/// Dispatch every pending resize notification of the host. Notifications for wrappers whose
/// ratio cannot be read are skipped with a warning. Returns how many wrappers were
/// re-balanced.
///
/// Notifications are not debounced: every one triggers a full search.
pub fn deliver_resize_notifications<H: LayoutHost>(host: &mut H) -> usize {
    let notified = host.take_resize_notifications();
    if notified.is_empty() {
        return 0;
    }

    let mut count = 0;
    for ResizeNotification { wrapper, relayout } in notified {
        match notify(host, wrapper, &relayout) {
            Ok(_) => count += 1,
            Err(error) => tracing::warn!(?wrapper, %error, "skipping resize notification"),
        }
    }
    count
}
