//! The robot's idle chatter.

use hv_engine::Dice;
use serde::{Deserialize, Serialize};

/// Things the robot does when nothing else is going on.
pub const IDLE_ACTIONS: &[&str] = &[
    "Bolt produces a crayon from one of his compartments and scrawls his name on the wall. ",
    "Bolt absentmindedly recites the first six hundred digits of pi. ",
    "Bolt rubs his head affectionately against your shoulder. ",
    "Bolt examines himself for signs of rust. ",
    "Bolt asks if you want to play Hucka-Bucka-Beanstalk. ",
    "Bolt absentmindedly oils one of his joints. ",
    "Bolt sings an ancient ballad, totally out of key. ",
    "Bolt frets about the possibility of his batteries failing. ",
];

/// Decides whether the robot says something this turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialManager {
    chatter_odds: u32,
}

impl Default for SocialManager {
    fn default() -> Self {
        Self { chatter_odds: 12 }
    }
}

impl SocialManager {
    /// Chatter one turn in twelve.
    pub fn new() -> Self {
        Self::default()
    }

    /// Chatter one turn in `odds`.
    pub fn with_odds(mut self, odds: u32) -> Self {
        self.chatter_odds = odds.max(1);
        self
    }

    /// Maybe say something.
    pub fn chatter(&self, dice: &mut Dice) -> Option<&'static str> {
        if !dice.roll_success(self.chatter_odds) {
            return None;
        }
        dice.choose(IDLE_ACTIONS).copied()
    }
}
