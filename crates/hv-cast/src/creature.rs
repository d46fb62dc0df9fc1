//! The cyclops: a hungry creature that can be fed, watered, and outlasted.
//!
//! Feeding it the lunch makes it thirsty and agitated. While agitated it is
//! a turn actor, growing more restless each turn until it loses patience.
//! The water bottle puts it to sleep and takes it off the schedule.

use std::any::Any;

use hv_core::{ItemId, MetadataValue};
use hv_engine::{
    ActorId, EngineResult, GiveSomethingEngine, Intent, InteractionResult, ItemBehavior,
    Recipient, Stage,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Flag set on the cyclops once it sleeps.
pub const ASLEEP: &str = "asleep";

/// Player flag set when the cyclops loses patience.
pub const EATEN: &str = "eaten";

/// Nouns the cyclops answers to.
pub const CYCLOPS_NOUNS: &[&str] = &["cyclops", "giant", "monster", "beast"];

const WARNINGS: &[&str] = &[
    "The cyclops seems somewhat agitated. ",
    "The cyclops appears to be getting more agitated. ",
    "The cyclops is moving about the room, looking for something. ",
    "The cyclops was looking for salt and pepper. I think he is gathering condiments for his upcoming snack. ",
    "The cyclops is moving toward you in an unfriendly manner. ",
    "You have two choices: 1. Leave  2. Become dinner. ",
];

const OUT_OF_PATIENCE: &str = "The cyclops, tired of all of your games and trickery, grabs you \
                               firmly. As he licks his chops, he says \"Mmm. Just like Mom used to \
                               make 'em.\" It's nice to be appreciated. ";

/// The cyclops and the items it cares about.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cyclops {
    id: ItemId,
    lunch: ItemId,
    garlic: ItemId,
    bottle: ItemId,
    agitated: bool,
    asleep: bool,
    turns_agitated: u32,
}

impl Cyclops {
    /// A cyclops that reacts to `lunch`, `garlic` and `bottle`.
    pub fn new(id: ItemId, lunch: ItemId, garlic: ItemId, bottle: ItemId) -> Self {
        Self {
            id,
            lunch,
            garlic,
            bottle,
            agitated: false,
            asleep: false,
            turns_agitated: 0,
        }
    }

    /// Whether the cyclops is agitated.
    pub fn is_agitated(&self) -> bool {
        self.agitated
    }

    /// Whether the cyclops is asleep.
    pub fn is_asleep(&self) -> bool {
        self.asleep
    }

    fn actor(&self) -> ActorId {
        ActorId::Item(self.id)
    }

    fn eat_lunch(&mut self, stage: &mut Stage<'_>) -> EngineResult<InteractionResult> {
        stage.world.remove_from_play(self.lunch)?;
        self.agitated = true;
        self.turns_agitated = 0;
        stage.scheduler.register(self.actor());
        info!(cyclops = %self.id, "cyclops agitated");
        Ok(InteractionResult::positive(
            "The cyclops says \"Mmm Mmm. I love hot peppers! But oh, could I use a drink. Perhaps \
             I could drink the blood of that thing.\" From the gleam in his eye, it could be \
             surmised that you are \"that thing\". ",
        ))
    }

    fn drink(&mut self, stage: &mut Stage<'_>) -> EngineResult<InteractionResult> {
        if !self.agitated {
            return Ok(InteractionResult::positive(
                "The cyclops apparently is not thirsty and refuses your generous offer. ",
            ));
        }

        for water in stage.world.contents_of(self.bottle).to_vec() {
            stage.world.remove_from_play(water)?;
        }
        stage.world.drop_here(self.bottle)?;
        self.agitated = false;
        self.asleep = true;
        stage.world.require_item_mut(self.id)?.set_flag(ASLEEP, true);
        stage.scheduler.remove(&self.actor());
        info!(cyclops = %self.id, "cyclops asleep");

        Ok(InteractionResult::positive(
            "The cyclops takes the bottle and drinks the water. A moment later, he lets out a \
             yawn that nearly blows you over, and then falls fast asleep (what did you put in \
             that drink, anyway?). ",
        ))
    }
}

impl Recipient for Cyclops {
    fn recipient_id(&self) -> ItemId {
        self.id
    }

    fn offer_this_thing(
        &mut self,
        item: ItemId,
        stage: &mut Stage<'_>,
    ) -> EngineResult<InteractionResult> {
        if item == self.bottle {
            self.drink(stage)
        } else if item == self.lunch {
            self.eat_lunch(stage)
        } else if item == self.garlic {
            Ok(InteractionResult::positive(
                "The cyclops may be hungry, but there is a limit. ",
            ))
        } else {
            Ok(InteractionResult::positive(
                "The cyclops is not so stupid as to eat THAT! ",
            ))
        }
    }
}

/// Item behavior wrapping the cyclops.
#[derive(Debug)]
pub struct CyclopsBehavior {
    cyclops: Cyclops,
    giver: GiveSomethingEngine<Cyclops>,
}

impl CyclopsBehavior {
    /// Behavior for `cyclops`.
    pub fn new(cyclops: Cyclops) -> Self {
        Self {
            cyclops,
            giver: GiveSomethingEngine::new(),
        }
    }

    /// The cyclops' state.
    pub fn cyclops(&self) -> &Cyclops {
        &self.cyclops
    }
}

impl ItemBehavior for CyclopsBehavior {
    fn respond_to_multi(
        &mut self,
        intent: &Intent,
        stage: &mut Stage<'_>,
    ) -> EngineResult<Option<InteractionResult>> {
        if self.cyclops.asleep {
            return Ok(None);
        }
        self.giver.resolve(intent, &mut self.cyclops, stage)
    }

    fn act(&mut self, stage: &mut Stage<'_>) -> EngineResult<String> {
        let cyclops = &mut self.cyclops;
        if !cyclops.agitated {
            return Ok(String::new());
        }
        cyclops.turns_agitated += 1;
        debug!(turns = cyclops.turns_agitated, "cyclops grows restless");

        // The countdown runs while the player is away; only the warnings wait.
        let here = stage.world.player().location();
        if stage.world.location_of(cyclops.id) != Some(here) {
            return Ok(String::new());
        }

        let turn = cyclops.turns_agitated as usize;
        if let Some(warning) = WARNINGS.get(turn - 1) {
            return Ok((*warning).to_string());
        }

        cyclops.agitated = false;
        stage.scheduler.remove(&cyclops.actor());
        stage
            .world
            .player_mut()
            .set_flag(EATEN, MetadataValue::Boolean(true));
        info!(cyclops = %cyclops.id, "cyclops lost patience");
        Ok(OUT_OF_PATIENCE.to_string())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
