use crate::bridge::Relayout;
use crate::error::BalanceError;
use crate::globals::Globals;
use crate::host::LayoutHost;
use crate::layout::padding::Padding;
use crate::layout::text::{max_content_width, min_content_width, wrap_lines, Line, TextStyle};
use crate::units::Px;
use crate::watch::ResizeNotification;
use id_arena::{Arena, Id};
use std::cell::Cell;

/// Handle to an element of a [`LayoutDocument`]
pub type ElementId = Id<Element>;

/// An element of a [`LayoutDocument`]
#[derive(Debug, Clone)]
pub struct Element {
    pub parent: Option<ElementId>,
    pub attributes: Vec<(String, String)>,
    pub kind: ElementKind,
}

#[derive(Debug, Clone)]
pub enum ElementKind {
    /// A block with a fixed width that stacks its wrappers vertically
    Container(ContainerBox),
    /// An inline-block holding text
    Wrapper(WrapperBox),
}

#[derive(Debug, Clone)]
pub struct ContainerBox {
    pub width: Px,
    pub padding: Padding,
    pub children: Vec<ElementId>,
}

#[derive(Debug, Clone)]
pub struct WrapperBox {
    pub text: String,
    pub style: TextStyle,
    pub max_width: Option<Px>,
    watch: Option<WatchHandle>,
}

/// A size observer on `container`, remembering the size it last reported
#[derive(Debug, Clone)]
struct WatchHandle {
    container: ElementId,
    last_size: (Px, Px),
    relayout: Relayout,
}

/// An in-memory rendering engine for wrapped text.
///
/// Containers are blocks of a given width; wrappers are inline-blocks inside them that size
/// themselves shrink-to-fit (clamped by their `max-width`) and wrap their text greedily at
/// whitespace. A container's height is the sum of its wrappers' heights plus its vertical
/// padding, which is exactly the line-count signal the balancer relies on.
///
/// Every document carries its own [`Globals`], standing in for a page's global scope.
#[derive(Debug)]
pub struct LayoutDocument {
    elements: Arena<Element>,
    globals: Globals,
    native_balance: bool,
    resize_observer: bool,
    layout_reads: Cell<usize>,
}

impl Default for LayoutDocument {
    fn default() -> Self {
        LayoutDocument {
            elements: Arena::new(),
            globals: Globals::new(),
            native_balance: false,
            resize_observer: true,
            layout_reads: Cell::new(0),
        }
    }
}

impl LayoutDocument {
    pub fn new() -> LayoutDocument {
        LayoutDocument::default()
    }

    /// Make the document report native line balancing (or not)
    pub fn set_native_balance(&mut self, native: bool) {
        self.native_balance = native;
    }

    /// Make the document support size observation (or not)
    pub fn set_resize_observer_support(&mut self, supported: bool) {
        self.resize_observer = supported;
    }

    /// Number of layout metrics read so far
    pub fn layout_reads(&self) -> usize {
        self.layout_reads.get()
    }

    pub fn element(&self, id: ElementId) -> Result<&Element, BalanceError> {
        self.elements
            .get(id)
            .ok_or(BalanceError::UnknownElement(id.index()))
    }

    fn element_mut(&mut self, id: ElementId) -> Result<&mut Element, BalanceError> {
        self.elements
            .get_mut(id)
            .ok_or(BalanceError::UnknownElement(id.index()))
    }

    /// Add a detached container of the given width
    pub fn add_container(&mut self, width: Px, padding: Padding) -> ElementId {
        self.elements.alloc(Element {
            parent: None,
            attributes: Vec::new(),
            kind: ElementKind::Container(ContainerBox {
                width,
                padding,
                children: Vec::new(),
            }),
        })
    }

    /// Append a wrapper holding `text` to `container`
    pub fn add_wrapper<S: ToString>(
        &mut self,
        container: ElementId,
        text: S,
        style: TextStyle,
    ) -> Result<ElementId, BalanceError> {
        if !matches!(self.element(container)?.kind, ElementKind::Container(_)) {
            return Err(BalanceError::NotAContainer(container.index()));
        }

        let wrapper = self.elements.alloc(Element {
            parent: Some(container),
            attributes: Vec::new(),
            kind: ElementKind::Wrapper(WrapperBox {
                text: text.to_string(),
                style,
                max_width: None,
                watch: None,
            }),
        });
        if let ElementKind::Container(ref mut c) = self.element_mut(container)?.kind {
            c.children.push(wrapper);
        }
        Ok(wrapper)
    }

    /// Remove a wrapper from its container. Its attributes, constraint and any resize watch
    /// stay attached to it.
    pub fn detach(&mut self, wrapper: ElementId) -> Result<(), BalanceError> {
        let Some(container) = self.element_mut(wrapper)?.parent.take() else {
            return Ok(());
        };
        if let ElementKind::Container(ref mut c) = self.element_mut(container)?.kind {
            c.children.retain(|&child| child != wrapper);
        }
        Ok(())
    }

    /// Replace the text of a wrapper
    pub fn set_text<S: ToString>(
        &mut self,
        wrapper: ElementId,
        text: S,
    ) -> Result<(), BalanceError> {
        if let ElementKind::Wrapper(ref mut w) = self.element_mut(wrapper)?.kind {
            w.text = text.to_string();
        }
        Ok(())
    }

    /// Change the width of a container
    pub fn resize(&mut self, container: ElementId, width: Px) -> Result<(), BalanceError> {
        match self.element_mut(container)?.kind {
            ElementKind::Container(ref mut c) => {
                c.width = width;
                Ok(())
            }
            ElementKind::Wrapper(_) => Err(BalanceError::NotAContainer(container.index())),
        }
    }

    /// The lines a wrapper currently renders
    pub fn lines(&self, wrapper: ElementId) -> Vec<Line> {
        self.wrapper_layout(wrapper)
            .map(|(_, lines)| lines)
            .unwrap_or_default()
    }

    fn content_width(&self, container: ElementId) -> Px {
        match self.elements.get(container).map(|e| &e.kind) {
            Some(ElementKind::Container(c)) => (c.width - c.padding.horizontal()).max(Px::ZERO),
            _ => Px::ZERO,
        }
    }

    /// Box width and lines of a wrapper: shrink-to-fit within its container's content box,
    /// then clamped by `max-width` even if that makes the content overflow
    fn wrapper_layout(&self, wrapper: ElementId) -> Option<(Px, Vec<Line>)> {
        let element = self.elements.get(wrapper)?;
        let ElementKind::Wrapper(ref w) = element.kind else {
            return None;
        };

        let available = element
            .parent
            .map(|parent| self.content_width(parent))
            .unwrap_or(Px::ZERO);
        let shrink_to_fit = min_content_width(&w.text, &w.style)
            .max(available)
            .min(max_content_width(&w.text, &w.style));
        let box_width = match w.max_width {
            Some(max_width) => shrink_to_fit.min(max_width.max(Px::ZERO)),
            None => shrink_to_fit,
        };
        Some((box_width, wrap_lines(&w.text, &w.style, box_width)))
    }

    fn width_of(&self, element: ElementId) -> Px {
        match self.elements.get(element).map(|e| &e.kind) {
            Some(ElementKind::Container(c)) => c.width,
            Some(ElementKind::Wrapper(_)) => self
                .wrapper_layout(element)
                .map(|(width, _)| width)
                .unwrap_or_default(),
            None => Px::ZERO,
        }
    }

    fn height_of(&self, element: ElementId) -> Px {
        match self.elements.get(element).map(|e| &e.kind) {
            Some(ElementKind::Container(c)) => {
                let content: Px = c.children.iter().map(|&child| self.height_of(child)).sum();
                content + c.padding.vertical()
            }
            Some(ElementKind::Wrapper(w)) => {
                let lines = self
                    .wrapper_layout(element)
                    .map(|(_, lines)| lines.len())
                    .unwrap_or_default();
                w.style.line_height * lines as f32
            }
            None => Px::ZERO,
        }
    }

    fn count_read(&self) {
        self.layout_reads.set(self.layout_reads.get() + 1);
    }

    fn wrapper_box(&self, element: ElementId) -> Option<&WrapperBox> {
        match self.elements.get(element).map(|e| &e.kind) {
            Some(ElementKind::Wrapper(w)) => Some(w),
            _ => None,
        }
    }

    fn wrapper_box_mut(&mut self, element: ElementId) -> Option<&mut WrapperBox> {
        match self.elements.get_mut(element).map(|e| &mut e.kind) {
            Some(ElementKind::Wrapper(w)) => Some(w),
            _ => None,
        }
    }
}

impl LayoutHost for LayoutDocument {
    type Element = ElementId;

    fn globals(&self) -> &Globals {
        &self.globals
    }

    fn supports_native_balance(&self) -> bool {
        self.native_balance
    }

    fn supports_resize_observer(&self) -> bool {
        self.resize_observer
    }

    fn parent(&self, element: ElementId) -> Option<ElementId> {
        self.elements.get(element).and_then(|e| e.parent)
    }

    fn find_by_attribute(&self, name: &str, value: &str) -> Option<ElementId> {
        self.elements
            .iter()
            .filter(|(_, e)| e.parent.is_some() || matches!(e.kind, ElementKind::Container(_)))
            .find(|(_, e)| e.attributes.iter().any(|(n, v)| n == name && v == value))
            .map(|(id, _)| id)
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<String> {
        self.elements
            .get(element)?
            .attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
    }

    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str) {
        let Some(element) = self.elements.get_mut(element) else {
            return;
        };
        match element.attributes.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => element
                .attributes
                .push((name.to_string(), value.to_string())),
        }
    }

    fn set_max_width(&mut self, element: ElementId, width: Option<Px>) {
        if let Some(w) = self.wrapper_box_mut(element) {
            w.max_width = width;
        }
    }

    fn max_width(&self, element: ElementId) -> Option<Px> {
        self.wrapper_box(element).and_then(|w| w.max_width)
    }

    fn client_width(&self, element: ElementId) -> Px {
        self.count_read();
        self.width_of(element)
    }

    fn client_height(&self, element: ElementId) -> Px {
        self.count_read();
        self.height_of(element)
    }

    fn scroll_width(&self, element: ElementId) -> Px {
        self.count_read();
        match self.wrapper_layout(element) {
            Some((box_width, lines)) => lines.iter().map(|l| l.width).fold(box_width, Px::max),
            None => self.width_of(element),
        }
    }

    fn has_resize_watch(&self, wrapper: ElementId) -> bool {
        self.wrapper_box(wrapper).is_some_and(|w| w.watch.is_some())
    }

    fn attach_resize_watch(
        &mut self,
        wrapper: ElementId,
        container: ElementId,
        relayout: Relayout,
    ) {
        let last_size = (self.width_of(container), self.height_of(container));
        if let Some(w) = self.wrapper_box_mut(wrapper) {
            w.watch = Some(WatchHandle {
                container,
                last_size,
                relayout,
            });
        }
    }

    fn detach_resize_watch(&mut self, wrapper: ElementId) -> bool {
        self.wrapper_box_mut(wrapper)
            .and_then(|w| w.watch.take())
            .is_some()
    }

    fn take_resize_notifications(&mut self) -> Vec<ResizeNotification<ElementId>> {
        let changed: Vec<(ElementId, (Px, Px))> = self
            .elements
            .iter()
            .filter_map(|(id, e)| match &e.kind {
                ElementKind::Wrapper(WrapperBox {
                    watch: Some(watch), ..
                }) => Some((id, watch.container, watch.last_size)),
                _ => None,
            })
            .filter_map(|(id, container, last_size)| {
                let size = (self.width_of(container), self.height_of(container));
                (size != last_size).then_some((id, size))
            })
            .collect();

        let mut notifications = Vec::with_capacity(changed.len());
        for (id, size) in changed {
            if let Some(watch) = self.wrapper_box_mut(id).and_then(|w| w.watch.as_mut()) {
                watch.last_size = size;
                notifications.push(ResizeNotification {
                    wrapper: id,
                    relayout: watch.relayout.clone(),
                });
            }
        }
        notifications
    }
}
