use crate::host::LayoutHost;

/// Result of probing the host for native line balancing
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Capability {
    /// The host balances lines itself; the balancer must stay out of its way
    Native,
    /// The host does not balance lines; the balancer does the work
    Polyfill,
}

impl Capability {
    /// The value stored in the capability global by generated markup
    pub fn code(self) -> u8 {
        match self {
            Capability::Native => 1,
            Capability::Polyfill => 2,
        }
    }

    pub fn from_code(code: u8) -> Option<Capability> {
        match code {
            1 => Some(Capability::Native),
            2 => Some(Capability::Polyfill),
            _ => None,
        }
    }

    pub fn is_native(self) -> bool {
        self == Capability::Native
    }
}

/// Probe the host once and cache the answer in its globals; later calls return the cached flag
/// without asking the host again.
pub fn probe_capability<H: LayoutHost>(host: &H) -> Capability {
    host.globals().capability_or_probe(|| {
        let capability = if host.supports_native_balance() {
            Capability::Native
        } else {
            Capability::Polyfill
        };
        tracing::debug!(?capability, "probed native text balancing");
        capability
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutDocument;

    #[test]
    fn codes_round_trip_the_bootstrap_encoding() {
        assert_eq!(Capability::Native.code(), 1);
        assert_eq!(Capability::Polyfill.code(), 2);
        assert_eq!(Capability::from_code(1), Some(Capability::Native));
        assert_eq!(Capability::from_code(0), None);
    }

    #[test]
    fn probe_is_cached_after_first_call() {
        let mut doc = LayoutDocument::new();
        doc.set_native_balance(true);
        assert_eq!(probe_capability(&doc), Capability::Native);

        // the host changing its mind later does not affect the cached flag
        doc.set_native_balance(false);
        assert_eq!(probe_capability(&doc), Capability::Native);
        assert_eq!(doc.globals().capability(), Some(Capability::Native));
    }
}
