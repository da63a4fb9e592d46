//! The balancing search and its adapter onto a [`LayoutHost`].
//!
//! The search itself is a pure function of the container's unconstrained width, its height at
//! that width, and whatever a [`Measure`] reports for candidate widths. The host adapter only
//! translates probes into `max-width` writes followed by metric reads.

use crate::capability::probe_capability;
use crate::config::Config;
use crate::host::LayoutHost;
use crate::units::Px;
use crate::watch::ensure_watch;

/// Answers layout questions for candidate wrapper widths.
pub trait Measure {
    /// Constrain the wrapper to `width` and report the container's height
    fn height_at(&mut self, width: Px) -> Px;

    /// Constrain the wrapper to `width` and report the wrapper's scroll width
    fn overflow_at(&mut self, width: Px) -> Px;
}

impl<H, O> Measure for (H, O)
where
    H: FnMut(Px) -> Px,
    O: FnMut(Px) -> Px,
{
    fn height_at(&mut self, width: Px) -> Px {
        (self.0)(width)
    }

    fn overflow_at(&mut self, width: Px) -> Px {
        (self.1)(width)
    }
}

/// Final bounds of one search
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SearchOutcome {
    /// The container's unconstrained width
    pub full_width: Px,
    /// Widest width found to add a line
    pub lower: Px,
    /// Narrowest width found to keep the original height
    pub upper: Px,
    /// How many widths were applied during the search
    pub probes: usize,
}

impl SearchOutcome {
    /// Interpolate between the narrowest width (`ratio = 1`) and the full width (`ratio = 0`).
    /// Ratios outside `[0, 1]` extrapolate.
    pub fn width_for(&self, ratio: f32) -> Px {
        self.upper * ratio + self.full_width * (1.0 - ratio)
    }
}

/// Binary search for the narrowest whole-pixel width at which the container keeps
/// `base_height`. Height is the proxy for line count: a width that does not grow the container
/// is assumed to keep the same number of lines.
pub fn search<M: Measure>(
    full_width: Px,
    base_height: Px,
    measure: &mut M,
    refine_lower_bound: bool,
) -> SearchOutcome {
    let mut lower = full_width / 2.0 - Px(0.25);
    let mut upper = full_width + Px(0.5);
    let mut probes = 0;

    if refine_lower_bound {
        // never search below the width at which the content starts to overflow
        lower = measure.overflow_at(lower).max(lower);
        probes += 1;
    }

    while lower + Px(1.0) < upper {
        let middle = ((lower + upper) / 2.0).round();
        probes += 1;
        if measure.height_at(middle) == base_height {
            upper = middle;
        } else {
            lower = middle;
        }
    }

    SearchOutcome {
        full_width,
        lower,
        upper,
        probes,
    }
}

/// What a balancing call did
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum BalanceReport {
    /// A search ran and `width` was applied
    Applied { width: Px, outcome: SearchOutcome },
    /// The container has no width; the constraint was cleared and left empty
    Collapsed,
    /// The wrapper has no layout parent; nothing was touched
    Detached,
    /// No wrapper carries the requested identifier
    NotFound,
    /// The host balances natively; nothing was touched
    NativeBypass,
    /// No entry point is installed yet; the call was queued for replay
    Queued,
    /// No entry point is installed and the call could not be queued
    NotInstalled,
}

impl BalanceReport {
    /// The applied width, if a search ran
    pub fn width(&self) -> Option<Px> {
        match self {
            BalanceReport::Applied { width, .. } => Some(*width),
            _ => None,
        }
    }
}

/// Forwards probes to a host as `max-width` writes followed by reads
struct HostMeasure<'h, H: LayoutHost> {
    host: &'h mut H,
    wrapper: H::Element,
    container: H::Element,
}

impl<H: LayoutHost> Measure for HostMeasure<'_, H> {
    fn height_at(&mut self, width: Px) -> Px {
        self.host.set_max_width(self.wrapper, Some(width));
        self.host.client_height(self.container)
    }

    fn overflow_at(&mut self, width: Px) -> Px {
        self.host.set_max_width(self.wrapper, Some(width));
        self.host.scroll_width(self.wrapper)
    }
}

/// Balance `wrapper` unless the host balances natively, in which case the wrapper is left
/// completely untouched.
pub fn balance<H: LayoutHost>(
    host: &mut H,
    wrapper: H::Element,
    ratio: f32,
    config: &Config,
) -> BalanceReport {
    if probe_capability(host).is_native() {
        return BalanceReport::NativeBypass;
    }
    balance_unchecked(host, wrapper, ratio, config)
}

/// Balance `wrapper` without consulting the capability flag.
///
/// Clears the constraint, searches from scratch against the container's current metrics,
/// applies the interpolated width and finally makes sure a resize watch exists. A zero-width
/// container skips the search but still gets watched so a later resize can balance it.
pub fn balance_unchecked<H: LayoutHost>(
    host: &mut H,
    wrapper: H::Element,
    ratio: f32,
    config: &Config,
) -> BalanceReport {
    let Some(container) = host.parent(wrapper) else {
        tracing::debug!(?wrapper, "wrapper is detached, skipping balance");
        return BalanceReport::Detached;
    };

    host.set_max_width(wrapper, None);

    let full_width = host.client_width(container);
    let base_height = host.client_height(container);

    let report = if full_width.is_positive() {
        let outcome = search(
            full_width,
            base_height,
            &mut HostMeasure {
                host: &mut *host,
                wrapper,
                container,
            },
            config.refine_lower_bound,
        );
        let width = outcome.width_for(ratio);
        host.set_max_width(wrapper, Some(width));
        tracing::trace!(
            ?wrapper,
            %full_width,
            upper = %outcome.upper,
            probes = outcome.probes,
            %width,
            "balanced wrapper"
        );
        BalanceReport::Applied { width, outcome }
    } else {
        tracing::debug!(?wrapper, "container has no width, leaving wrapper unconstrained");
        BalanceReport::Collapsed
    };

    ensure_watch(host, wrapper, container, config);
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    /// One line (20px) at `threshold` and wider, two lines (40px) below it; content never
    /// overflows its box.
    fn step(threshold: f32) -> impl Measure {
        (
            move |w: Px| if w.0 >= threshold { Px(20.0) } else { Px(40.0) },
            |w: Px| w,
        )
    }

    #[test]
    fn finds_the_smallest_width_keeping_one_line() {
        let outcome = search(Px(400.0), Px(20.0), &mut step(287.0), true);
        assert_eq!(outcome.upper, Px(287.0));
        assert_eq!(outcome.width_for(1.0), Px(287.0));
        assert_eq!(outcome.width_for(0.0), Px(400.0));
        assert_eq!(outcome.width_for(0.5), Px(343.5));
    }

    #[test]
    fn fractional_threshold_rounds_up_to_a_whole_pixel() {
        let outcome = search(Px(400.0), Px(20.0), &mut step(250.4), false);
        assert_eq!(outcome.upper, Px(251.0));
        assert!(outcome.lower < Px(250.4));
    }

    #[test]
    fn refinement_does_not_change_the_result() {
        let plain = search(Px(640.0), Px(20.0), &mut step(401.0), false);
        let refined = search(Px(640.0), Px(20.0), &mut step(401.0), true);
        assert_eq!(plain.upper, refined.upper);
    }

    #[test]
    fn overflow_beyond_the_container_skips_the_loop() {
        // an unbreakable run wider than the container: the lower bound jumps past the upper one
        let mut measure = (|_: Px| Px(20.0), |_: Px| Px(900.0));
        let outcome = search(Px(400.0), Px(20.0), &mut measure, true);
        assert_eq!(outcome.probes, 1);
        assert_eq!(outcome.upper, Px(400.5));
    }

    #[test]
    fn probe_count_is_logarithmic() {
        let outcome = search(Px(1024.0), Px(20.0), &mut step(700.0), true);
        assert!(outcome.probes <= 11, "{} probes", outcome.probes);
        assert_eq!(outcome.upper, Px(700.0));
    }

    #[test]
    fn ratio_extrapolates_outside_the_unit_interval() {
        let outcome = SearchOutcome {
            full_width: Px(400.0),
            lower: Px(299.0),
            upper: Px(300.0),
            probes: 0,
        };
        assert_eq!(outcome.width_for(2.0), Px(200.0));
        assert_eq!(outcome.width_for(-1.0), Px(500.0));
    }
}
