//! Reference cast for Hollowvale.
//!
//! Each module is one character or gadget built on the engine's
//! extension points: the troll guard fights through the kill engine and
//! takes gifts through the give engine, the cyclops and the robot are
//! item-bound turn actors, and the lamp battery is a named timer.

/// The inflatable boat.
pub mod boat;
/// The companion robot and its managers.
pub mod companion;
/// The cyclops.
pub mod creature;
/// The troll and the room it guards.
pub mod guard;
/// The brass lantern and its battery.
pub mod lamp;

/// Re-export of [`boat::BoatBehavior`].
pub use boat::BoatBehavior;
/// Re-export of [`companion::RobotBehavior`].
pub use companion::RobotBehavior;
/// Re-export of cyclops types.
pub use creature::{Cyclops, CyclopsBehavior};
/// Re-export of guard types.
pub use guard::{GuardCombat, Troll, TrollBehavior, TrollRoom};
/// Re-export of lamp types.
pub use lamp::{LampBattery, LampBehavior};
