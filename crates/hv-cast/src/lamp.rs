//! The brass lantern and its battery.
//!
//! The battery is a named turn actor that counts the turns the lamp has been
//! lit. It warns three times as the charge fades, then puts the lamp out for
//! good.

use std::any::Any;

use hv_core::ItemId;
use hv_engine::{
    ActorId, EngineResult, Intent, InteractionResult, ItemBehavior, Stage, TurnActor,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Item flag set once the battery is dead.
pub const BURNED_OUT: &str = "burned_out";

/// Refusal when the player tries to relight a dead lamp.
pub const WONT_LIGHT: &str = "A burned-out lamp won't light. ";

/// Said on the turn the lamp dies.
pub const EXHAUSTED: &str = "You'd better have more light than from the brass lantern. ";

/// Lit turns the battery lasts.
pub const LIFETIME: u32 = 385;

const WARNINGS: &[(u32, &str)] = &[
    (200, "The lamp appears a bit dimmer. "),
    (300, "The lamp is definitely dimmer now. "),
    (370, "The lamp is nearly out. "),
];

/// Drains the lamp while it is lit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LampBattery {
    name: String,
    lamp: ItemId,
    turns_lit: u32,
    lifetime: u32,
}

impl LampBattery {
    /// Battery for `lamp`, registered with the scheduler under `name`.
    pub fn new(name: impl Into<String>, lamp: ItemId) -> Self {
        Self {
            name: name.into(),
            lamp,
            turns_lit: 0,
            lifetime: LIFETIME,
        }
    }

    /// Start with some of the charge already used.
    pub fn with_turns_lit(mut self, turns: u32) -> Self {
        self.turns_lit = turns;
        self
    }

    /// Turns the lamp has spent lit.
    pub fn turns_lit(&self) -> u32 {
        self.turns_lit
    }

    /// The scheduler identity of this battery.
    pub fn actor_id(&self) -> ActorId {
        ActorId::named(self.name.clone())
    }

    fn is_lit(stage: &Stage<'_>, lamp: ItemId) -> bool {
        stage.world.item(lamp).is_some_and(|item| item.is_lit())
    }

    fn within_sight(&self, stage: &Stage<'_>) -> bool {
        stage.world.location_of(self.lamp) == Some(stage.world.player().location())
    }

    fn burn_out(&mut self, stage: &mut Stage<'_>) -> EngineResult<()> {
        let lamp = stage.world.require_item_mut(self.lamp)?;
        if let Some(light) = lamp.capabilities.light.as_mut() {
            light.lit = false;
        }
        lamp.set_flag(BURNED_OUT, true);
        stage.scheduler.remove(&self.actor_id());
        info!(lamp = %self.lamp, turns = self.turns_lit, "lamp burned out");
        Ok(())
    }
}

impl TurnActor for LampBattery {
    fn act(&mut self, stage: &mut Stage<'_>) -> EngineResult<String> {
        if !Self::is_lit(stage, self.lamp) {
            return Ok(String::new());
        }
        self.turns_lit += 1;
        debug!(lamp = %self.lamp, turns = self.turns_lit, "lamp drained");

        if self.turns_lit >= self.lifetime {
            self.burn_out(stage)?;
            return Ok(if self.within_sight(stage) {
                EXHAUSTED.to_string()
            } else {
                String::new()
            });
        }

        let warning = WARNINGS
            .iter()
            .find(|(at, _)| *at == self.turns_lit)
            .map(|(_, text)| *text);
        match warning {
            Some(text) if self.within_sight(stage) => Ok(text.to_string()),
            _ => Ok(String::new()),
        }
    }
}

/// Keeps a dead lamp dark.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LampBehavior {
    lamp: ItemId,
}

impl LampBehavior {
    /// Behavior for the lamp item `lamp`.
    pub fn new(lamp: ItemId) -> Self {
        Self { lamp }
    }
}

impl ItemBehavior for LampBehavior {
    fn respond_to_simple(
        &mut self,
        intent: &Intent,
        stage: &mut Stage<'_>,
    ) -> EngineResult<Option<InteractionResult>> {
        let simple = intent.as_simple()?;
        let burned_out = stage.world.require_item(self.lamp)?.flag(BURNED_OUT);
        if burned_out && simple.switch_state() == Some(true) {
            return Ok(Some(InteractionResult::positive(WONT_LIGHT)));
        }
        Ok(None)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
