//! Intent resolution and turn simulation for Hollowvale.
//!
//! Resolves parsed player commands ([`Intent`]) against a [`hv_core::World`]
//! through a fixed chain of responders: the current location's behavior,
//! item behaviors, the generic processor chain, and finally generated
//! fallback narration. After each turn-consuming command the
//! [`TurnScheduler`] advances every registered actor once.

/// Location and item behaviors, and the cast that owns them.
pub mod behavior;
/// Configuration for a game session.
pub mod config;
/// Borrowed views handed to responders.
pub mod context;
/// Seeded dice with forced rolls for tests.
pub mod dice;
/// Dispatch of simple, multi-noun and null intents.
pub mod dispatch;
/// Error types for the engine crate.
pub mod error;
/// Top-level game orchestrator.
pub mod game;
/// The give/offer engine.
pub mod give;
/// Player intents and verb vocabularies.
pub mod intent;
/// The kill/attack engine.
pub mod kill;
/// Movement between locations.
pub mod movement;
/// Narration requests and clients.
pub mod narration;
/// Generic verb processors shared by all items.
pub mod processor;
/// Interaction results and disambiguation.
pub mod result;
/// Turn actors and the scheduler.
pub mod scheduler;
/// Boarding and leaving vessels.
pub mod sub_location;

/// Re-exports of behavior types.
pub use behavior::{Cast, ItemBehavior, LocationBehavior, PlainLocation, describe_location};
/// Re-export of [`config::EngineConfig`].
pub use config::EngineConfig;
/// Re-exports of [`context::EngineContext`] and [`context::Stage`].
pub use context::{EngineContext, Stage};
/// Re-export of [`dice::Dice`].
pub use dice::Dice;
/// Re-exports of [`error::EngineError`] and [`error::EngineResult`].
pub use error::{EngineError, EngineResult};
/// Re-exports of [`game::Game`] and [`game::TurnOutcome`].
pub use game::{Game, TurnOutcome};
/// Re-exports of the give engine.
pub use give::{GiveSomethingEngine, Recipient};
/// Re-exports of intent types.
pub use intent::{
    EnterSubLocationIntent, ExitSubLocationIntent, Intent, IntentKind, MoveIntent,
    MultiNounIntent, SimpleIntent,
};
/// Re-exports of the kill engine.
pub use kill::{CombatEngine, Foe, KillSomeoneEngine};
/// Re-export of [`movement::MovementParameters`].
pub use movement::MovementParameters;
/// Re-exports of narration types.
pub use narration::{DisabledNarrator, FixedNarrator, NarrationClient, NarrationRequest};
/// Re-exports of processor types.
pub use processor::{ItemProcessorFactory, StandardProcessors, VerbProcessor};
/// Re-exports of result types.
pub use result::{Disambiguation, InteractionResult, Outcome};
/// Re-exports of scheduler types.
pub use scheduler::{ActorId, TurnActor, TurnScheduler};
