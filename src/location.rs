use crate::constants::*;
use serde::*;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(transparent)]
pub struct Location {
    packed: u16,
}

impl Location {
    pub fn from_coords(x: u32, y: u32) -> Self {
        Location {
            packed: ((x << 8) | y) as u16,
        }
    }

    #[inline]
    pub fn from_xy(x: u8, y: u8) -> Self {
        Self::from_coords(x as u32, y as u32)
    }

    #[inline]
    pub fn x(self) -> u8 {
        ((self.packed >> 8) & 0xFF) as u8
    }

    #[inline]
    pub fn y(self) -> u8 {
        (self.packed & 0xFF) as u8
    }

    #[inline]
    pub fn packed_repr(self) -> u16 {
        self.packed
    }

    #[inline]
    pub fn from_packed(packed: u16) -> Self {
        Location { packed }
    }

    pub fn distance_to(self, other: Self) -> u8 {
        let dx = (self.x() as i16) - (other.x() as i16);
        let dy = (self.y() as i16) - (other.y() as i16);

        dx.abs().max(dy.abs()) as u8
    }

    /// Offset this location, returning `None` if the result leaves the site.
    pub fn checked_add(self, dx: i8, dy: i8) -> Option<Location> {
        let x = self.x() as i16 + dx as i16;
        let y = self.y() as i16 + dy as i16;
        if (0..SITE_WIDTH as i16).contains(&x) && (0..SITE_HEIGHT as i16).contains(&y) {
            Some(Location::from_coords(x as u32, y as u32))
        } else {
            None
        }
    }

    /// True if the tile is at least `inset` tiles away from every site edge.
    pub fn is_inset(self, inset: u8) -> bool {
        let x = self.x();
        let y = self.y();
        x >= inset && y >= inset && x < SITE_WIDTH - inset && y < SITE_HEIGHT - inset
    }

    /// Row-major ordering key (y first, then x), used for deterministic scans.
    #[inline]
    pub fn scan_key(self) -> (u8, u8) {
        (self.y(), self.x())
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x(), self.y())
    }
}

impl Serialize for Location {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.packed_repr().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Location {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        u16::deserialize(deserializer).map(Location::from_packed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_add_stays_inside_site() {
        let corner = Location::from_xy(0, 49);
        assert_eq!(corner.checked_add(-1, 0), None);
        assert_eq!(corner.checked_add(0, 1), None);
        assert_eq!(corner.checked_add(1, -1), Some(Location::from_xy(1, 48)));
    }

    #[test]
    fn inset_excludes_border_rows() {
        assert!(!Location::from_xy(2, 25).is_inset(3));
        assert!(Location::from_xy(3, 25).is_inset(3));
        assert!(Location::from_xy(46, 46).is_inset(3));
        assert!(!Location::from_xy(47, 10).is_inset(3));
    }

    #[test]
    fn distance_is_chebyshev() {
        let a = Location::from_xy(10, 10);
        assert_eq!(a.distance_to(Location::from_xy(13, 11)), 3);
        assert_eq!(a.distance_to(Location::from_xy(4, 18)), 8);
    }
}
