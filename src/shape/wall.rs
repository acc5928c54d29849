use crate::shape::GridError;
use arrayvec::ArrayVec;
use core::fmt;
use core::str::FromStr;

/// The detector wall a hit was recorded on.
///
/// Walls are the six faces of the detector box. Their index order
/// (`+x, -x, +y, -y, +z, -z`) is the channel order of stacked wall grids.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Wall {
    /// The face along the `+x` coordinate axis.
    XPos = 0,
    /// The face along the `-x` coordinate axis.
    XNeg = 1,
    /// The face along the `+y` coordinate axis.
    YPos = 2,
    /// The face along the `-y` coordinate axis.
    YNeg = 3,
    /// The face along the `+z` coordinate axis.
    ZPos = 4,
    /// The face along the `-z` coordinate axis.
    ZNeg = 5,
}

impl Wall {
    /// The number of walls.
    pub const COUNT: usize = 6;

    /// All the walls, in index order.
    pub const ALL: [Wall; Self::COUNT] = [
        Wall::XPos,
        Wall::XNeg,
        Wall::YPos,
        Wall::YNeg,
        Wall::ZPos,
        Wall::ZNeg,
    ];

    /// The channel index of this wall.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The wall with the given channel index, if any.
    #[inline]
    pub fn from_index(index: usize) -> Option<Wall> {
        Self::ALL.get(index).copied()
    }

    /// The coordinate axis this wall is orthogonal to.
    #[inline]
    pub const fn axis(self) -> usize {
        self as usize / 2
    }

    /// The wall on the other side of the detector along the same axis.
    #[inline]
    pub const fn opposite(self) -> Wall {
        match self {
            Wall::XPos => Wall::XNeg,
            Wall::XNeg => Wall::XPos,
            Wall::YPos => Wall::YNeg,
            Wall::YNeg => Wall::YPos,
            Wall::ZPos => Wall::ZNeg,
            Wall::ZNeg => Wall::ZPos,
        }
    }

    /// The single-bit mask of this wall.
    #[inline]
    pub const fn mask(self) -> WallMask {
        WallMask::from_bits_truncate(1 << self as u8)
    }

    /// The textual label of this wall, e.g. `"+x"`.
    pub const fn label(self) -> &'static str {
        match self {
            Wall::XPos => "+x",
            Wall::XNeg => "-x",
            Wall::YPos => "+y",
            Wall::YNeg => "-y",
            Wall::ZPos => "+z",
            Wall::ZNeg => "-z",
        }
    }
}

impl FromStr for Wall {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "+x" => Ok(Wall::XPos),
            "-x" => Ok(Wall::XNeg),
            "+y" => Ok(Wall::YPos),
            "-y" => Ok(Wall::YNeg),
            "+z" => Ok(Wall::ZPos),
            "-z" => Ok(Wall::ZNeg),
            other => Err(GridError::UnknownWall(other.to_string())),
        }
    }
}

impl fmt::Display for Wall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
/// A set of detector walls, e.g. the walls whose grids touch a voxel.
pub struct WallMask(u8);

bitflags::bitflags! {
    /// Flags identifying the six detector walls.
    impl WallMask: u8 {
        /// The wall along the `+x` coordinate axis.
        const X_POS = 1 << 0;
        /// The wall along the `-x` coordinate axis.
        const X_NEG = 1 << 1;
        /// The wall along the `+y` coordinate axis.
        const Y_POS = 1 << 2;
        /// The wall along the `-y` coordinate axis.
        const Y_NEG = 1 << 3;
        /// The wall along the `+z` coordinate axis.
        const Z_POS = 1 << 4;
        /// The wall along the `-z` coordinate axis.
        const Z_NEG = 1 << 5;
    }
}

impl WallMask {
    /// The three pairs of walls facing each other across the detector.
    pub const OPPOSITE_PAIRS: [WallMask; 3] = [
        WallMask::X_POS.union(WallMask::X_NEG),
        WallMask::Y_POS.union(WallMask::Y_NEG),
        WallMask::Z_POS.union(WallMask::Z_NEG),
    ];

    /// The number of walls in this set.
    #[inline]
    pub const fn count(self) -> u32 {
        self.bits().count_ones()
    }

    /// Is this set exactly one pair of opposite walls?
    #[inline]
    pub fn is_opposite_pair(self) -> bool {
        Self::OPPOSITE_PAIRS.contains(&self)
    }

    /// The number of distinct sources this set stands for.
    ///
    /// A track crossing the detector is seen by the two walls it goes through, so
    /// a voxel touched only by an opposite pair counts as a single source.
    #[inline]
    pub fn consensus_count(self) -> u32 {
        if self.is_opposite_pair() {
            1
        } else {
            self.count()
        }
    }

    /// The walls of this set, in index order.
    pub fn walls(self) -> ArrayVec<Wall, { Wall::COUNT }> {
        Wall::ALL
            .iter()
            .copied()
            .filter(|wall| self.contains(wall.mask()))
            .collect()
    }
}

impl From<Wall> for WallMask {
    fn from(wall: Wall) -> Self {
        wall.mask()
    }
}
