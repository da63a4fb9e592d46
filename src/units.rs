use derive_more::{Add, AddAssign, Display, From, Into, Sub, SubAssign, Sum};
use std::ops::{Div, Mul};

/// A length in CSS pixels. Widths are fractional: the search works on whole pixels but
/// its starting bounds and the ratio interpolation produce fractional values.
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    AddAssign,
    Sub,
    SubAssign,
    Sum,
    From,
    Into,
    Display,
)]
pub struct Px(pub f32);

impl Px {
    pub const ZERO: Px = Px(0.0);

    /// Round to the nearest whole pixel, halves rounding up
    pub fn round(self) -> Px {
        Px(self.0.round())
    }

    pub fn max(self, other: Px) -> Px {
        Px(self.0.max(other.0))
    }

    pub fn min(self, other: Px) -> Px {
        Px(self.0.min(other.0))
    }

    /// Whether this length lays anything out at all. `NaN` counts as empty.
    pub fn is_positive(self) -> bool {
        self.0 > 0.0
    }

    /// Format as a CSS length, i.e. `"300px"` or `"350.5px"`
    pub fn to_css(self) -> String {
        format!("{}px", self.0)
    }
}

impl Mul<f32> for Px {
    type Output = Px;

    fn mul(self, rhs: f32) -> Px {
        Px(self.0 * rhs)
    }
}

impl Div<f32> for Px {
    type Output = Px;

    fn div(self, rhs: f32) -> Px {
        Px(self.0 / rhs)
    }
}

impl From<u16> for Px {
    fn from(value: u16) -> Self {
        Px(value as f32)
    }
}
