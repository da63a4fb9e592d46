use crate::bridge::Relayout;
use crate::capability::Capability;
use once_cell::sync::{Lazy, OnceCell};
use parking_lot::Mutex;

static PROCESS: Lazy<Globals> = Lazy::new(Globals::new);

/// An identifier-based call that arrived before any entry point was installed
#[derive(Debug, Clone, PartialEq)]
pub struct PendingCall {
    pub id: String,
    pub ratio: f32,
}

/// The well-known slots through which the bootstrap and the main entry point meet.
///
/// Both cells are written at most once and read many times afterwards. Writes after the first
/// are ignored, so whichever side initializes first wins and the other adopts its value.
#[derive(Debug, Default)]
pub struct Globals {
    capability: OnceCell<Capability>,
    relayout: OnceCell<Relayout>,
    pending: Mutex<Vec<PendingCall>>,
}

impl Globals {
    pub fn new() -> Globals {
        Globals::default()
    }

    /// The process-wide slots
    pub fn process() -> &'static Globals {
        &PROCESS
    }

    /// The cached capability flag, if it has been probed
    pub fn capability(&self) -> Option<Capability> {
        self.capability.get().copied()
    }

    /// Return the cached flag, evaluating `probe` only if nothing is cached yet
    pub fn capability_or_probe<F: FnOnce() -> Capability>(&self, probe: F) -> Capability {
        *self.capability.get_or_init(probe)
    }

    /// The installed entry point
    pub fn relayout(&self) -> Option<&Relayout> {
        self.relayout.get()
    }

    /// Install `relayout` unless an entry point is already present. Returns the entry point in
    /// effect and whether this call installed it.
    pub fn install_relayout(&self, relayout: Relayout) -> (&Relayout, bool) {
        let mut installed = false;
        let current = self.relayout.get_or_init(|| {
            installed = true;
            relayout
        });
        (current, installed)
    }

    pub(crate) fn queue(&self, call: PendingCall) {
        self.pending.lock().push(call);
    }

    pub(crate) fn take_pending(&self) -> Vec<PendingCall> {
        std::mem::take(&mut *self.pending.lock())
    }

    /// Number of calls waiting for an entry point
    pub fn pending_len(&self) -> usize {
        self.pending.lock().len()
    }
}
