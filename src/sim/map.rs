//! Tile map: static wall/empty grid
//!
//! Authoritative for collision and ray termination. Validated once at load
//! (rectangular, walled border) and immutable afterwards.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::TILE_SIZE;
use crate::error::MapError;

/// A single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Wall,
}

/// Default arena: open floor with four L-shaped wall blocks (1 = wall)
const DEFAULT_LEVEL: [[u8; 12]; 12] = [
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 1, 1, 0, 0, 0, 0, 1, 1, 0, 1],
    [1, 0, 1, 0, 0, 0, 0, 0, 0, 1, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 1, 0, 0, 0, 0, 0, 0, 1, 0, 1],
    [1, 0, 1, 1, 0, 0, 0, 0, 1, 1, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
];

/// Rectangular tile grid with a guaranteed wall border
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileMap {
    cols: usize,
    rows: usize,
    tile_size: f32,
    /// Row-major cells
    cells: Vec<Cell>,
}

impl TileMap {
    /// Build from rows of 0 (empty) / 1 (wall)
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R], tile_size: f32) -> Result<Self, MapError> {
        if !tile_size.is_finite() || tile_size <= 0.0 {
            return Err(MapError::BadTileSize(tile_size));
        }
        let first = rows.first().ok_or(MapError::Empty)?;
        let cols = first.as_ref().len();
        if cols == 0 {
            return Err(MapError::Empty);
        }

        let mut cells = Vec::with_capacity(cols * rows.len());
        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            if line.len() != cols {
                return Err(MapError::Ragged {
                    row,
                    expected: cols,
                    found: line.len(),
                });
            }
            for (col, &value) in line.iter().enumerate() {
                cells.push(match value {
                    0 => Cell::Empty,
                    1 => Cell::Wall,
                    _ => return Err(MapError::InvalidCell { row, col, value }),
                });
            }
        }

        let map = Self {
            cols,
            rows: rows.len(),
            tile_size,
            cells,
        };
        map.check_border()?;
        Ok(map)
    }

    /// Build from ASCII art: `#` is a wall, `.` or space is empty
    ///
    /// Blank lines and surrounding whitespace are ignored.
    pub fn from_ascii(art: &str, tile_size: f32) -> Result<Self, MapError> {
        let rows: Vec<Vec<u8>> = art
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .enumerate()
            .map(|(row, line)| {
                line.bytes()
                    .enumerate()
                    .map(|(col, b)| match b {
                        b'#' => Ok(1),
                        b'.' | b' ' => Ok(0),
                        value => Err(MapError::InvalidCell { row, col, value }),
                    })
                    .collect::<Result<Vec<u8>, MapError>>()
            })
            .collect::<Result<_, _>>()?;
        Self::from_rows(&rows, tile_size)
    }

    /// The stock 12x12 arena
    pub fn default_level() -> Self {
        let cells = DEFAULT_LEVEL
            .iter()
            .flatten()
            .map(|&v| if v == 1 { Cell::Wall } else { Cell::Empty })
            .collect();
        Self {
            cols: DEFAULT_LEVEL[0].len(),
            rows: DEFAULT_LEVEL.len(),
            tile_size: TILE_SIZE,
            cells,
        }
    }

    fn check_border(&self) -> Result<(), MapError> {
        if self.cols < 3 || self.rows < 3 {
            return Err(MapError::TooSmall {
                cols: self.cols,
                rows: self.rows,
            });
        }
        for row in 0..self.rows {
            for col in 0..self.cols {
                let on_border =
                    row == 0 || col == 0 || row == self.rows - 1 || col == self.cols - 1;
                if on_border && self.cells[row * self.cols + col] != Cell::Wall {
                    return Err(MapError::OpenBorder { row, col });
                }
            }
        }
        Ok(())
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// Cell at grid coordinates; outside the grid counts as wall
    pub fn cell(&self, col: i32, row: i32) -> Cell {
        if col < 0 || row < 0 || col as usize >= self.cols || row as usize >= self.rows {
            return Cell::Wall;
        }
        self.cells[row as usize * self.cols + col as usize]
    }

    /// Grid coordinates of a world point
    #[inline]
    pub fn tile_of(&self, pos: Vec2) -> (i32, i32) {
        (
            (pos.x / self.tile_size).floor() as i32,
            (pos.y / self.tile_size).floor() as i32,
        )
    }

    /// World-space wall test used by rays and movement
    #[inline]
    pub fn is_wall(&self, pos: Vec2) -> bool {
        if !pos.is_finite() {
            return true;
        }
        let (col, row) = self.tile_of(pos);
        self.cell(col, row) == Cell::Wall
    }

    /// World-space center of a tile
    #[inline]
    pub fn tile_center(&self, col: usize, row: usize) -> Vec2 {
        Vec2::new(
            (col as f32 + 0.5) * self.tile_size,
            (row as f32 + 0.5) * self.tile_size,
        )
    }

    /// Iterate over all empty tiles as (col, row)
    pub fn empty_tiles(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.rows).flat_map(move |row| {
            (0..self.cols).filter_map(move |col| {
                (self.cells[row * self.cols + col] == Cell::Empty).then_some((col, row))
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level_loads() {
        let map = TileMap::default_level();
        assert_eq!(TileMap::from_rows(&DEFAULT_LEVEL, TILE_SIZE), Ok(map.clone()));
        assert_eq!(map.cols(), 12);
        assert_eq!(map.rows(), 12);
        assert!(map.is_wall(Vec2::new(10.0, 10.0)));
        assert!(!map.is_wall(map.tile_center(5, 5)));
        assert!(map.is_wall(map.tile_center(2, 2)));
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let rows: Vec<Vec<u8>> = vec![vec![1, 1, 1], vec![1, 0], vec![1, 1, 1]];
        assert_eq!(
            TileMap::from_rows(&rows, 64.0),
            Err(MapError::Ragged {
                row: 1,
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn test_open_border_rejected() {
        let rows = [[1, 1, 1], [0, 0, 1], [1, 1, 1]];
        assert_eq!(
            TileMap::from_rows(&rows, 64.0),
            Err(MapError::OpenBorder { row: 1, col: 0 })
        );
    }

    #[test]
    fn test_invalid_values_rejected() {
        let rows = [[1, 1, 1], [1, 2, 1], [1, 1, 1]];
        assert!(matches!(
            TileMap::from_rows(&rows, 64.0),
            Err(MapError::InvalidCell { value: 2, .. })
        ));
        let empty: [[u8; 0]; 0] = [];
        assert_eq!(TileMap::from_rows(&empty, 64.0), Err(MapError::Empty));
        assert!(matches!(
            TileMap::from_rows(&[[1u8]], 64.0),
            Err(MapError::TooSmall { .. })
        ));
        assert!(matches!(
            TileMap::from_rows(&DEFAULT_LEVEL, 0.0),
            Err(MapError::BadTileSize(_))
        ));
    }

    #[test]
    fn test_from_ascii() {
        let map = TileMap::from_ascii(
            "
            #####
            #...#
            #.#.#
            #...#
            #####
            ",
            10.0,
        )
        .expect("valid map");
        assert_eq!(map.cols(), 5);
        assert!(map.is_wall(Vec2::new(25.0, 25.0)));
        assert!(!map.is_wall(Vec2::new(15.0, 15.0)));
        assert_eq!(map.empty_tiles().count(), 8);
    }

    #[test]
    fn test_out_of_bounds_is_wall() {
        let map = TileMap::default_level();
        assert_eq!(map.cell(-1, 3), Cell::Wall);
        assert_eq!(map.cell(3, 99), Cell::Wall);
        assert!(map.is_wall(Vec2::new(-5.0, 100.0)));
        assert!(map.is_wall(Vec2::new(f32::NAN, 100.0)));
    }
}
