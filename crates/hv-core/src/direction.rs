use std::fmt;

use serde::{Deserialize, Serialize};

/// Compass heading or vertical move that can label an exit.
///
/// The variant order is the order exits are listed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// North.
    North,
    /// South.
    South,
    /// East.
    East,
    /// West.
    West,
    /// Northeast.
    Northeast,
    /// Northwest.
    Northwest,
    /// Southeast.
    Southeast,
    /// Southwest.
    Southwest,
    /// Up a stair, ladder or slope.
    Up,
    /// Down.
    Down,
    /// Into a building or opening.
    In,
    /// Out of one.
    Out,
}

impl Direction {
    /// Lowercase word used when narrating a move in this direction.
    pub fn name(self) -> &'static str {
        use Direction::*;
        match self {
            North => "north",
            South => "south",
            East => "east",
            West => "west",
            Northeast => "northeast",
            Northwest => "northwest",
            Southeast => "southeast",
            Southwest => "southwest",
            Up => "up",
            Down => "down",
            In => "in",
            Out => "out",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
