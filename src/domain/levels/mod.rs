//! Support/resistance level calculations.
//!
//! Each calculator maps a candle sequence to a same-length sequence of level
//! records, one per input day, in input order:
//! - `floor`: classic floor pivots
//! - `demark`: Tom DeMark predicted high/low
//! - `woodie`: Woodie pivots (close weighted twice)
//! - `camarilla`: Camarilla bands
//! - `fibonacci`: positional retracement levels (never merged)

pub mod camarilla;
pub mod demark;
pub mod fibonacci;
pub mod floor;
pub mod woodie;

pub use camarilla::calculate_camarilla;
pub use demark::calculate_demark;
pub use fibonacci::{calculate_fibonacci, FibonacciLevels, Trend, RETRACEMENTS};
pub use floor::calculate_floor_pivots;
pub use woodie::calculate_woodie;

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FloorPivots {
    pub r3: f64,
    pub r2: f64,
    pub r1: f64,
    pub pl: f64,
    pub s1: f64,
    pub s2: f64,
    pub s3: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DemarkPoints {
    pub low: f64,
    pub high: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WoodiePoints {
    pub pivot: f64,
    pub r1: f64,
    pub r2: f64,
    pub s1: f64,
    pub s2: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CamarillaLevels {
    pub r4: f64,
    pub r3: f64,
    pub r2: f64,
    pub r1: f64,
    pub s1: f64,
    pub s2: f64,
    pub s3: f64,
    pub s4: f64,
}

/// Any level record that can be attached to an enriched day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LevelRecord {
    Floor(FloorPivots),
    Demark(DemarkPoints),
    Woodie(WoodiePoints),
    Camarilla(CamarillaLevels),
}

impl From<FloorPivots> for LevelRecord {
    fn from(value: FloorPivots) -> Self {
        LevelRecord::Floor(value)
    }
}

impl From<DemarkPoints> for LevelRecord {
    fn from(value: DemarkPoints) -> Self {
        LevelRecord::Demark(value)
    }
}

impl From<WoodiePoints> for LevelRecord {
    fn from(value: WoodiePoints) -> Self {
        LevelRecord::Woodie(value)
    }
}

impl From<CamarillaLevels> for LevelRecord {
    fn from(value: CamarillaLevels) -> Self {
        LevelRecord::Camarilla(value)
    }
}

/// The indicators the default pipeline merges, with their field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LevelKind {
    Floor,
    Demark,
    Woodie,
    Camarilla,
}

impl LevelKind {
    /// Pipeline order.
    pub const ALL: [LevelKind; 4] = [
        LevelKind::Floor,
        LevelKind::Demark,
        LevelKind::Woodie,
        LevelKind::Camarilla,
    ];

    pub fn field(self) -> &'static str {
        match self {
            LevelKind::Floor => "floor",
            LevelKind::Demark => "tom",
            LevelKind::Woodie => "wood",
            LevelKind::Camarilla => "cam",
        }
    }
}

impl fmt::Display for LevelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelKind::Floor => write!(f, "FLOOR"),
            LevelKind::Demark => write!(f, "DEMARK"),
            LevelKind::Woodie => write!(f, "WOODIE"),
            LevelKind::Camarilla => write!(f, "CAMARILLA"),
        }
    }
}
