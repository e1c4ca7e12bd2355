use crate::constants::*;
use crate::error::TerrainError;
use crate::location::*;
use bitflags::*;
use serde::{Deserialize, Serialize};

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct TerrainFlags: u8 {
        const NONE = 0;
        const WALL = 1;
        const SWAMP = 2;
    }
}

/// Movement classification of a single tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerrainKind {
    Open,
    Hazardous,
    Impassable,
}

impl From<TerrainFlags> for TerrainKind {
    fn from(flags: TerrainFlags) -> Self {
        if flags.contains(TerrainFlags::WALL) {
            TerrainKind::Impassable
        } else if flags.contains(TerrainFlags::SWAMP) {
            TerrainKind::Hazardous
        } else {
            TerrainKind::Open
        }
    }
}

/// Read-only terrain of one site, stored as one flag byte per tile in row-major order.
#[derive(Clone)]
pub struct SiteTerrain {
    buffer: Vec<u8>,
}

impl SiteTerrain {
    pub fn new(buffer: Vec<u8>) -> Result<SiteTerrain, TerrainError> {
        let expected = SITE_WIDTH as usize * SITE_HEIGHT as usize;
        if buffer.len() != expected {
            return Err(TerrainError::InvalidSize {
                expected,
                actual: buffer.len(),
            });
        }
        Ok(SiteTerrain { buffer })
    }

    /// Parse terrain from one string per row: `#` impassable, `~` hazardous,
    /// anything else open.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<SiteTerrain, TerrainError> {
        if rows.len() != SITE_HEIGHT as usize {
            return Err(TerrainError::InvalidRowCount {
                expected: SITE_HEIGHT as usize,
                actual: rows.len(),
            });
        }

        let mut buffer = Vec::with_capacity(SITE_WIDTH as usize * SITE_HEIGHT as usize);
        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            if line.chars().count() != SITE_WIDTH as usize {
                return Err(TerrainError::InvalidRowWidth {
                    row,
                    expected: SITE_WIDTH as usize,
                    actual: line.chars().count(),
                });
            }
            buffer.extend(line.chars().map(|c| match c {
                '#' => TerrainFlags::WALL.bits(),
                '~' => TerrainFlags::SWAMP.bits(),
                _ => TerrainFlags::NONE.bits(),
            }));
        }

        SiteTerrain::new(buffer)
    }

    pub fn get(&self, pos: &Location) -> TerrainFlags {
        self.get_xy(pos.x(), pos.y())
    }

    pub fn get_xy(&self, x: u8, y: u8) -> TerrainFlags {
        let index = (y as usize * SITE_WIDTH as usize) + (x as usize);
        TerrainFlags::from_bits_truncate(self.buffer[index])
    }

    pub fn kind(&self, loc: Location) -> TerrainKind {
        self.get(&loc).into()
    }

    pub fn is_wall(&self, x: u8, y: u8) -> bool {
        self.get_xy(x, y).contains(TerrainFlags::WALL)
    }

    pub fn is_wall_at(&self, loc: Location) -> bool {
        self.is_wall(loc.x(), loc.y())
    }

    pub fn is_swamp(&self, x: u8, y: u8) -> bool {
        self.get_xy(x, y).contains(TerrainFlags::SWAMP)
    }
}

/// A 50x50 array for site-sized data.
#[derive(Clone, Debug, PartialEq)]
pub struct SiteDataArray<T: Copy> {
    data: Vec<T>,
}

impl<T: Copy> SiteDataArray<T> {
    pub fn new(initial: T) -> Self {
        SiteDataArray {
            data: vec![initial; (SITE_WIDTH as usize) * (SITE_HEIGHT as usize)],
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> &T {
        let index = y * (SITE_WIDTH as usize) + x;
        &self.data[index]
    }

    #[inline]
    pub fn get_mut(&mut self, x: usize, y: usize) -> &mut T {
        let index = y * (SITE_WIDTH as usize) + x;
        &mut self.data[index]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: T) {
        *self.get_mut(x, y) = value;
    }

    #[inline]
    pub fn at(&self, loc: Location) -> T {
        *self.get(loc.x() as usize, loc.y() as usize)
    }

    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), &T)> {
        self.data.iter().enumerate().map(|(i, v)| {
            let x = i % (SITE_WIDTH as usize);
            let y = i / (SITE_WIDTH as usize);
            ((x, y), v)
        })
    }
}

impl<T: Copy + Serialize> Serialize for SiteDataArray<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.data.serialize(serializer)
    }
}

impl<'de, T: Copy + Deserialize<'de>> Deserialize<'de> for SiteDataArray<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let data = Vec::<T>::deserialize(deserializer)?;
        if data.len() != (SITE_WIDTH as usize) * (SITE_HEIGHT as usize) {
            return Err(serde::de::Error::custom("Invalid site data array size"));
        }
        Ok(SiteDataArray { data })
    }
}

/// Neighbor offsets for 8-directional movement.
pub const NEIGHBORS_8: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
];

/// Compute a distance transform: for each tile, the Chebyshev distance to the
/// nearest impassable tile. Impassable tiles get 0 and tiles beyond the site
/// edge count as impassable.
///
/// Runs forward/backward sweeps until nothing changes, stopping after
/// `max_passes` sweep pairs.
pub fn distance_transform(terrain: &SiteTerrain, max_passes: usize) -> SiteDataArray<u8> {
    let width = SITE_WIDTH as usize;
    let height = SITE_HEIGHT as usize;
    let mut result = SiteDataArray::new(0u8);

    for y in 0..height {
        for x in 0..width {
            let value = if terrain.is_wall(x as u8, y as u8) { 0 } else { u8::MAX };
            result.set(x, y, value);
        }
    }

    // Off-grid neighbours read as 0, so an edge tile never exceeds 1.
    let read = |grid: &SiteDataArray<u8>, x: isize, y: isize| -> u8 {
        if x < 0 || y < 0 || x >= width as isize || y >= height as isize {
            0
        } else {
            *grid.get(x as usize, y as usize)
        }
    };

    for _ in 0..max_passes.max(1) {
        let mut changed = false;

        // Forward pass
        for y in 0..height as isize {
            for x in 0..width as isize {
                let current = read(&result, x, y);
                let min_val = [(-1, -1), (0, -1), (1, -1), (-1, 0)]
                    .iter()
                    .map(|(dx, dy)| read(&result, x + dx, y + dy).saturating_add(1))
                    .fold(current, u8::min);
                if min_val != current {
                    result.set(x as usize, y as usize, min_val);
                    changed = true;
                }
            }
        }

        // Backward pass
        for y in (0..height as isize).rev() {
            for x in (0..width as isize).rev() {
                let current = read(&result, x, y);
                let min_val = [(1, 1), (0, 1), (-1, 1), (1, 0)]
                    .iter()
                    .map(|(dx, dy)| read(&result, x + dx, y + dy).saturating_add(1))
                    .fold(current, u8::min);
                if min_val != current {
                    result.set(x as usize, y as usize, min_val);
                    changed = true;
                }
            }
        }

        if !changed {
            break;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;

    #[test]
    fn walled_site_distance_matches_border_distance() {
        let terrain = walled_terrain();
        let dt = distance_transform(&terrain, 8);

        for y in 0..SITE_HEIGHT {
            for x in 0..SITE_WIDTH {
                let expected = x
                    .min(y)
                    .min(SITE_WIDTH - 1 - x)
                    .min(SITE_HEIGHT - 1 - y);
                assert_eq!(*dt.get(x as usize, y as usize), expected, "tile ({x}, {y})");
            }
        }
    }

    #[test]
    fn interior_pillar_lowers_nearby_distances() {
        let mut rows = walled_rows();
        set_tile(&mut rows, 25, 25, '#');
        let terrain = terrain_from(&rows);
        let dt = distance_transform(&terrain, 8);

        assert_eq!(*dt.get(25, 25), 0);
        assert_eq!(*dt.get(26, 26), 1);
        assert_eq!(*dt.get(27, 25), 2);
        assert_eq!(*dt.get(20, 20), 5);
    }

    #[test]
    fn site_edge_counts_as_impassable() {
        let terrain = terrain_from(&open_rows());
        let dt = distance_transform(&terrain, 8);

        assert_eq!(*dt.get(0, 10), 1);
        assert_eq!(*dt.get(3, 10), 4);
        assert_eq!(*dt.get(24, 24), 25);
    }

    #[test]
    fn terrain_kinds_follow_flags() {
        let mut rows = walled_rows();
        set_tile(&mut rows, 10, 10, '~');
        let terrain = terrain_from(&rows);

        assert_eq!(terrain.kind(Location::from_xy(0, 0)), TerrainKind::Impassable);
        assert_eq!(terrain.kind(Location::from_xy(10, 10)), TerrainKind::Hazardous);
        assert_eq!(terrain.kind(Location::from_xy(11, 10)), TerrainKind::Open);
    }

    #[test]
    fn wrong_buffer_size_is_rejected() {
        assert!(matches!(
            SiteTerrain::new(vec![0; 10]),
            Err(TerrainError::InvalidSize { actual: 10, .. })
        ));
    }
}
