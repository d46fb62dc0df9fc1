use std::fmt;

use hv_core::ItemId;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::behavior::Cast;
use crate::context::Stage;
use crate::error::EngineResult;

/// Identity of a turn-based actor.
///
/// Item-bound actors are NPCs whose behavior lives in the cast under the
/// item's ID. Named actors are free-standing timers that need not exist
/// anywhere in the world graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorId {
    /// An item's behavior acts.
    Item(ItemId),
    /// A named timer acts.
    Named(String),
}

impl ActorId {
    /// Shorthand for a named actor.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Item(id) => write!(f, "item:{id}"),
            Self::Named(name) => write!(f, "{name}"),
        }
    }
}

/// A free-standing per-turn actor: a countdown, a draining battery, a
/// latent hazard.
pub trait TurnActor: fmt::Debug + Send {
    /// Called once per turn while registered. Returns narration, possibly empty.
    fn act(&mut self, stage: &mut Stage<'_>) -> EngineResult<String>;
}

/// Registry of actors advanced once per player turn.
///
/// Registration is idempotent and ordered. A scheduling pass iterates a
/// snapshot taken when the pass starts, so actors registered or removed
/// during a pass take effect from the next one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TurnScheduler {
    registered: Vec<ActorId>,
}

impl TurnScheduler {
    /// Create an empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an actor. Returns false if it was already registered.
    pub fn register(&mut self, actor: ActorId) -> bool {
        if self.registered.contains(&actor) {
            return false;
        }
        debug!(%actor, "actor registered");
        self.registered.push(actor);
        true
    }

    /// Remove an actor. Returns false if it was not registered.
    pub fn remove(&mut self, actor: &ActorId) -> bool {
        let before = self.registered.len();
        self.registered.retain(|a| a != actor);
        let removed = self.registered.len() != before;
        if removed {
            debug!(%actor, "actor removed");
        }
        removed
    }

    /// Whether an actor is registered.
    pub fn is_registered(&self, actor: &ActorId) -> bool {
        self.registered.contains(actor)
    }

    /// Registered actors in registration order.
    pub fn snapshot(&self) -> Vec<ActorId> {
        self.registered.clone()
    }

    /// Number of registered actors.
    pub fn len(&self) -> usize {
        self.registered.len()
    }

    /// No actors registered.
    pub fn is_empty(&self) -> bool {
        self.registered.is_empty()
    }
}

/// Run one scheduling pass: every actor registered at the start of the pass
/// acts once, in registration order. Returns the non-empty outputs.
pub fn run_pass(cast: &mut Cast, stage: &mut Stage<'_>) -> EngineResult<Vec<String>> {
    let snapshot = stage.scheduler.snapshot();
    let mut outputs = Vec::new();

    for actor in snapshot {
        let output = match &actor {
            ActorId::Item(id) => match cast.item_mut(*id) {
                Some(behavior) => behavior.act(stage)?,
                None => {
                    warn!(%actor, "registered actor has no behavior");
                    continue;
                }
            },
            ActorId::Named(name) => match cast.timer_mut(name) {
                Some(timer) => timer.act(stage)?,
                None => {
                    warn!(%actor, "registered actor has no behavior");
                    continue;
                }
            },
        };
        if !output.trim().is_empty() {
            outputs.push(output);
        }
    }

    debug!(actors = outputs.len(), "scheduling pass complete");
    Ok(outputs)
}
