//! Power state of the robot: the switch and the slow first boot.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Turns between the very first "turn on" and the robot coming alive.
pub const FIRST_BOOT_TURNS: u32 = 3;

/// Said when the robot finishes its first boot.
pub const COMES_ALIVE: &str = "Suddenly, the robot comes to life and its head starts swivelling \
                               about. It notices you and bounds over. \"Hi! I'm B-19-7, but to \
                               everyperson I'm called Bolt. Let's play Hider-and-Seeker you with \
                               me.\" ";

/// Tracks whether the robot is on and how far along its first boot is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PowerManager {
    on: bool,
    ever_switched_on: bool,
    boot_countdown: Option<u32>,
}

impl PowerManager {
    /// A robot that has never been switched on.
    pub fn new() -> Self {
        Self::default()
    }

    /// The robot is on and responsive.
    pub fn is_on(&self) -> bool {
        self.on
    }

    /// The first boot is still running.
    pub fn is_booting(&self) -> bool {
        self.boot_countdown.is_some()
    }

    /// Flip the switch on.
    pub fn activate(&mut self) -> &'static str {
        if self.on || self.is_booting() {
            return "The robot is already on. ";
        }
        if !self.ever_switched_on {
            self.ever_switched_on = true;
            self.boot_countdown = Some(FIRST_BOOT_TURNS);
            debug!("robot first boot started");
            return "You flip the robot's switch. Nothing seems to happen. ";
        }
        self.on = true;
        "Bolt jumps to his feet, hopping mad. \"Why you turn Bolt off?\" he asks accusingly. "
    }

    /// Flip the switch off.
    pub fn deactivate(&mut self) -> &'static str {
        if self.is_booting() {
            self.boot_countdown = None;
            return "The robot's switch clicks back. ";
        }
        if !self.on {
            return "The robot is already off. ";
        }
        self.on = false;
        "Bolt, shocked by this betrayal from his newfound friend, whimpers and keels over. "
    }

    /// Advance the first boot by one turn. Returns the greeting on the turn
    /// the robot comes alive.
    pub fn tick(&mut self) -> Option<&'static str> {
        let remaining = self.boot_countdown?.saturating_sub(1);
        if remaining > 0 {
            self.boot_countdown = Some(remaining);
            return None;
        }
        self.boot_countdown = None;
        self.on = true;
        debug!("robot came alive");
        Some(COMES_ALIVE)
    }
}
