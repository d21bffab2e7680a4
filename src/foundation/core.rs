/// Pixel dimensions of an image; either side may be zero.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Bounds {
    pub width: u32,
    pub height: u32,
}

impl Bounds {
    pub const EMPTY: Self = Self {
        width: 0,
        height: 0,
    };

    /// Largest image, in pixels, a render step will allocate.
    pub const MAX_AREA: u64 = 1 << 28;

    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Build from signed sizes, clamping negatives to zero.
    pub fn from_signed(width: i64, height: i64) -> Self {
        fn clamp(v: i64) -> u32 {
            v.clamp(0, i64::from(u32::MAX)) as u32
        }
        Self {
            width: clamp(width),
            height: clamp(height),
        }
    }

    pub fn of(img: &image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self { width, height }
    }

    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Swap width and height (quarter turns, transpose).
    pub fn swapped(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }

    pub fn area(self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Byte length of a tightly packed RGBA8 buffer with these bounds.
    pub fn rgba_len(self) -> Option<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|v| v.checked_mul(4))
    }

    /// Whether an RGBA8 buffer of this size is within [`Self::MAX_AREA`].
    pub fn is_allocatable(self) -> bool {
        self.area() <= Self::MAX_AREA && self.rgba_len().is_some()
    }
}

impl std::fmt::Display for Bounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Integer rectangle in image space, `x0..x1` by `y0..y1` (exclusive ends).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PixelRect {
    pub x0: i64,
    pub y0: i64,
    pub x1: i64,
    pub y1: i64,
}

impl PixelRect {
    /// Rectangle spanned by two corners in any order.
    pub fn from_corners(xa: i64, ya: i64, xb: i64, yb: i64) -> Self {
        Self {
            x0: xa.min(xb),
            y0: ya.min(yb),
            x1: xa.max(xb),
            y1: ya.max(yb),
        }
    }

    pub fn of_bounds(b: Bounds) -> Self {
        Self {
            x0: 0,
            y0: 0,
            x1: i64::from(b.width),
            y1: i64::from(b.height),
        }
    }

    /// Overlap with `other`; `None` when the overlap has no area.
    pub fn intersect(self, other: Self) -> Option<Self> {
        let r = Self {
            x0: self.x0.max(other.x0),
            y0: self.y0.max(other.y0),
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
        };
        if r.x0 >= r.x1 || r.y0 >= r.y1 {
            None
        } else {
            Some(r)
        }
    }

    pub fn bounds(self) -> Bounds {
        Bounds::from_signed(self.x1 - self.x0, self.y1 - self.y0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
