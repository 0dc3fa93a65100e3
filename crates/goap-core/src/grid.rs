use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Integer tile coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// South, north, east, west. The order is part of the streamlining contract:
    /// the first matching neighbour wins.
    pub fn neighbors4(self) -> [Pos; 4] {
        [
            self.offset(0, -1),
            self.offset(0, 1),
            self.offset(1, 0),
            self.offset(-1, 0),
        ]
    }

    pub fn chebyshev(self, other: Pos) -> u32 {
        (self.x - other.x)
            .unsigned_abs()
            .max((self.y - other.y).unsigned_abs())
    }

    /// True when `other` is on top of or directly around `self` (8-neighbourhood).
    pub fn is_near(self, other: Pos) -> bool {
        self.chebyshev(other) <= 1
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Rectangular footprint of a target anchored at its minimum corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Footprint {
    pub width: u16,
    pub height: u16,
}

impl Footprint {
    pub const SINGLE: Footprint = Footprint {
        width: 1,
        height: 1,
    };

    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    pub fn is_multi(self) -> bool {
        self.width > 1 || self.height > 1
    }

    pub fn contains(self, anchor: Pos, p: Pos) -> bool {
        p.x >= anchor.x
            && p.y >= anchor.y
            && p.x < anchor.x + i32::from(self.width)
            && p.y < anchor.y + i32::from(self.height)
    }

    /// Tiles bordering the footprint on its four sides, corners excluded,
    /// walked row-major so the order is stable.
    pub fn outline(self, anchor: Pos) -> Vec<Pos> {
        let w = i32::from(self.width.max(1));
        let h = i32::from(self.height.max(1));
        let mut out = Vec::with_capacity(((w + h) * 2) as usize);
        for x in 0..w {
            out.push(anchor.offset(x, -1));
        }
        for y in 0..h {
            out.push(anchor.offset(-1, y));
            out.push(anchor.offset(w, y));
        }
        for x in 0..w {
            out.push(anchor.offset(x, h));
        }
        out
    }
}

impl Default for Footprint {
    fn default() -> Self {
        Self::SINGLE
    }
}
