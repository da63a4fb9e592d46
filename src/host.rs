use crate::bridge::Relayout;
use crate::globals::Globals;
use crate::units::Px;
use crate::watch::ResizeNotification;
use std::fmt::Debug;

/// The boundary between the balancer and whatever engine actually lays text out.
///
/// The balancer never measures text. It only writes a wrapper's `max-width`, then reads back
/// box metrics the host computed with its own line breaking. Every read must observe the
/// effect of the write before it.
///
/// Hosts are single threaded: notifications are delivered through
/// [`take_resize_notifications`](LayoutHost::take_resize_notifications) and dispatched by
/// [`deliver_resize_notifications`](crate::deliver_resize_notifications), never re-entrantly.
pub trait LayoutHost {
    /// A cheap handle to an element
    type Element: Copy + Eq + Debug;

    /// The global slots this host's pages rendezvous through. Defaults to the process-wide set.
    fn globals(&self) -> &Globals {
        Globals::process()
    }

    /// Whether the host's text renderer balances lines on its own
    fn supports_native_balance(&self) -> bool;

    /// Whether the host can notify about element size changes at all
    fn supports_resize_observer(&self) -> bool;

    /// The element's layout parent, if it is attached
    fn parent(&self, element: Self::Element) -> Option<Self::Element>;

    /// The first element whose attribute `name` equals `value`
    fn find_by_attribute(&self, name: &str, value: &str) -> Option<Self::Element>;

    fn attribute(&self, element: Self::Element, name: &str) -> Option<String>;

    fn set_attribute(&mut self, element: Self::Element, name: &str, value: &str);

    /// Set or clear (`None`) the element's `max-width` constraint
    fn set_max_width(&mut self, element: Self::Element, width: Option<Px>);

    fn max_width(&self, element: Self::Element) -> Option<Px>;

    /// Width of the element's padding box
    fn client_width(&self, element: Self::Element) -> Px;

    /// Height of the element's padding box
    fn client_height(&self, element: Self::Element) -> Px;

    /// Width of the element's content including anything overflowing its box
    fn scroll_width(&self, element: Self::Element) -> Px;

    fn has_resize_watch(&self, wrapper: Self::Element) -> bool;

    /// Attach a size observer on `container` owned by `wrapper`, remembering the entry point
    /// its notifications re-balance through
    fn attach_resize_watch(
        &mut self,
        wrapper: Self::Element,
        container: Self::Element,
        relayout: Relayout,
    );

    /// Disconnect and drop the observer owned by `wrapper`, returning whether one existed
    fn detach_resize_watch(&mut self, wrapper: Self::Element) -> bool;

    /// Wrappers whose observed container changed size since the last call
    fn take_resize_notifications(&mut self) -> Vec<ResizeNotification<Self::Element>>;
}
