//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Simulation tick counter (one five-phase update)
pub type Tick = u64;

/// Agent wealth; may dip below zero between consumption and the death check
pub type Wealth = i64;

/// Cardinal heading on the toroidal grid
///
/// Declaration order is the enumeration order used for tie-breaking when
/// two directions see the same amount of grain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    North,
    East,
    South,
    West,
}

impl Direction {
    /// All directions in enumeration order
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Unit offset `(dx, dy)` for this heading
    pub fn offset(self) -> (i64, i64) {
        match self {
            Direction::North => (0, 1),
            Direction::East => (1, 0),
            Direction::South => (0, -1),
            Direction::West => (-1, 0),
        }
    }
}

/// Cell coordinates on a `width × height` torus
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: u32,
    pub y: u32,
}

impl Position {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Position `distance` cells away along `direction`, wrapping at the edges
    pub fn ahead(self, direction: Direction, distance: u32, width: u32, height: u32) -> Self {
        let (dx, dy) = direction.offset();
        let distance = i64::from(distance);
        Self::wrapped(
            i64::from(self.x) + dx * distance,
            i64::from(self.y) + dy * distance,
            width,
            height,
        )
    }

    /// Wrap arbitrary signed coordinates onto the torus
    pub fn wrapped(x: i64, y: i64, width: u32, height: u32) -> Self {
        // rem_euclid keeps results in [0, side), so the narrowing is lossless
        Self {
            x: x.rem_euclid(i64::from(width)) as u32,
            y: y.rem_euclid(i64::from(height)) as u32,
        }
    }
}
