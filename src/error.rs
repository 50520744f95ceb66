//! Load-time validation errors
//!
//! Everything here is rejected before the first tick runs; the per-tick
//! pipeline itself is infallible.

/// Tile map rejected at level load
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MapError {
    #[error("tile map has no rows")]
    Empty,
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("invalid cell value {value} at row {row}, column {col}")]
    InvalidCell { row: usize, col: usize, value: u8 },
    #[error("border cell at row {row}, column {col} is not a wall")]
    OpenBorder { row: usize, col: usize },
    #[error("map must be at least 3x3, got {cols}x{rows}")]
    TooSmall { cols: usize, rows: usize },
    #[error("tile size must be positive and finite, got {0}")]
    BadTileSize(f32),
    #[error("map has no empty tile to stand on")]
    NoOpenTile,
}

/// Engine or wave tuning rejected at session start
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("field of view must be in (0, 2π), got {0}")]
    FieldOfView(f32),
    #[error("ray count must be non-zero")]
    ZeroRays,
    #[error("{field} must be positive and finite, got {value}")]
    NonPositive { field: &'static str, value: f32 },
    #[error("{field} must be within [0, 1], got {value}")]
    OutOfUnitRange { field: &'static str, value: f32 },
    #[error("elite wave cadence must be non-zero")]
    ZeroEliteCadence,
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Externally forced entity placement rejected
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SpawnError {
    #[error("spawn position ({x}, {y}) is inside a wall")]
    InsideWall { x: f32, y: f32 },
}

/// Umbrella error for session construction
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("map error: {0}")]
    Map(#[from] MapError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("spawn error: {0}")]
    Spawn(#[from] SpawnError),
}
