use crate::units::Px;

/// Padding inside a container. The container's client box includes its padding, while the
/// wrappers inside it only get the content box to lay out in.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Padding {
    pub top: Px,
    pub right: Px,
    pub bottom: Px,
    pub left: Px,
}

impl Padding {
    /// Create padding by specifying individual components in a clockwise fashion
    /// starting at the top (in the same order as CSS padding)
    pub fn trbl(top: Px, right: Px, bottom: Px, left: Px) -> Padding {
        Padding {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Create padding where all values are equal
    pub fn all<D: Into<Px>>(value: D) -> Padding {
        let value: Px = value.into();
        Padding {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Create padding by specifying different values for vertical (top and bottom)
    /// and horizontal (left and right) sides
    pub fn symmetric(vertical: Px, horizontal: Px) -> Padding {
        Padding {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    /// Create padding where all values are 0.0
    pub fn empty() -> Padding {
        Padding::default()
    }

    /// Combined left and right padding
    pub fn horizontal(&self) -> Px {
        self.left + self.right
    }

    /// Combined top and bottom padding
    pub fn vertical(&self) -> Px {
        self.top + self.bottom
    }
}
