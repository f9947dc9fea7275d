//! Grid addressing.

use std::fmt;

/// Width and height of every spell grid.
pub const GRID_SIZE: usize = 9;

/// A cell on the spell grid.
///
/// `x` is the column (left to right), `y` the row (top to bottom). A `Coord`
/// is always in bounds; the only way to build one is through the checked
/// constructors.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub struct Coord {
    y: u8,
    x: u8,
}

impl Coord {
    /// Create a coordinate, or `None` if it lies outside the grid.
    #[inline]
    pub fn new(x: usize, y: usize) -> Option<Coord> {
        if x < GRID_SIZE && y < GRID_SIZE {
            Some(Coord {
                x: u8::try_from(x).ok()?,
                y: u8::try_from(y).ok()?,
            })
        } else {
            None
        }
    }

    /// Rebuild a coordinate from its row-major index.
    #[inline]
    pub fn from_index(index: usize) -> Option<Coord> {
        Coord::new(index % GRID_SIZE, index / GRID_SIZE)
    }

    #[inline]
    pub fn x(self) -> usize {
        usize::from(self.x)
    }

    #[inline]
    pub fn y(self) -> usize {
        usize::from(self.y)
    }

    /// Row-major index, in `0..GRID_SIZE * GRID_SIZE`.
    #[inline]
    pub fn index(self) -> usize {
        self.y() * GRID_SIZE + self.x()
    }

    /// The neighbouring cell on `side`, if there is one.
    pub fn step(self, side: Side) -> Option<Coord> {
        let (x, y) = (self.x(), self.y());
        match side {
            Side::Off => None,
            Side::Top => y.checked_sub(1).and_then(|y| Coord::new(x, y)),
            Side::Bottom => Coord::new(x, y + 1),
            Side::Left => x.checked_sub(1).and_then(|x| Coord::new(x, y)),
            Side::Right => Coord::new(x + 1, y),
        }
    }

    /// Iterate every cell in reading order (top-to-bottom, left-to-right).
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..GRID_SIZE * GRID_SIZE).filter_map(Coord::from_index)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The side of a piece a parameter slot reads from.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Side {
    /// Not connected.
    #[default]
    Off,
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    pub fn is_connected(self) -> bool {
        !matches!(self, Side::Off)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Off => "off",
            Side::Top => "top",
            Side::Bottom => "bottom",
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
