//! The inflatable boat: pumping it up and patching it.
//!
//! Boarding and leaving are handled by the sub-location engine; this
//! behavior covers the verbs that change the vessel record itself.

use std::any::Any;

use hv_core::{Item, ItemId, Vessel, World};
use hv_engine::{
    EngineResult, Intent, InteractionResult, ItemBehavior, MultiNounIntent, Stage,
};
use serde::{Deserialize, Serialize};
use tracing::info;

const INFLATE_VERBS: &[&str] = &["inflate", "blow", "blow up", "use", "pump"];
const INFLATE_PREPOSITIONS: &[&str] = &["with", "to", "on", "using"];
const FIX_VERBS: &[&str] = &["fix", "repair", "patch", "mend", "glue"];
const FIX_PREPOSITIONS: &[&str] = &["with", "using"];
const APPLY_VERBS: &[&str] = &["apply", "put", "spread", "smear", "rub"];
const APPLY_PREPOSITIONS: &[&str] = &["on", "to", "against", "in", "onto"];
const LEAK_NOUNS: &[&str] = &["leak", "puncture", "hole"];

/// Said when the boat is carried while someone tries to inflate it.
pub const ON_THE_GROUND: &str = "The boat must be on the ground to be inflated. ";

/// Behavior for the inflatable boat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoatBehavior {
    boat: ItemId,
    pump: ItemId,
    glue: ItemId,
}

impl BoatBehavior {
    /// Behavior for `boat`, inflated with `pump` and patched with `glue`.
    pub fn new(boat: ItemId, pump: ItemId, glue: ItemId) -> Self {
        Self { boat, pump, glue }
    }

    fn vessel<'w>(&self, world: &'w World) -> EngineResult<&'w Vessel> {
        let item = world.require_item(self.boat)?;
        item.capabilities
            .vessel
            .as_ref()
            .ok_or_else(|| hv_core::CoreError::NotAVessel(self.boat).into())
    }

    fn vessel_mut<'w>(&self, world: &'w mut World) -> EngineResult<&'w mut Vessel> {
        let boat = self.boat;
        let item = world.require_item_mut(boat)?;
        item.capabilities
            .vessel
            .as_mut()
            .ok_or_else(|| hv_core::CoreError::NotAVessel(boat).into())
    }

    fn is_boat(&self, world: &World, noun: &str) -> bool {
        world.item(self.boat).is_some_and(|b| b.matches_noun(noun))
    }

    fn is_leak(&self, world: &World, noun: &str) -> bool {
        self.is_boat(world, noun) || LEAK_NOUNS.iter().any(|n| n.eq_ignore_ascii_case(noun.trim()))
    }

    fn answers(world: &World, id: ItemId, noun: &str) -> bool {
        world.item(id).is_some_and(|i: &Item| i.matches_noun(noun))
    }

    fn wants_repair(&self, multi: &MultiNounIntent, world: &World) -> bool {
        let fix = multi.verb_is(FIX_VERBS)
            && multi.preposition_is(FIX_PREPOSITIONS)
            && self.is_leak(world, &multi.noun_one)
            && Self::answers(world, self.glue, &multi.noun_two);
        let apply = multi.verb_is(APPLY_VERBS)
            && multi.preposition_is(APPLY_PREPOSITIONS)
            && Self::answers(world, self.glue, &multi.noun_one)
            && self.is_leak(world, &multi.noun_two);
        fix || apply
    }

    fn repair(&self, stage: &mut Stage<'_>) -> EngineResult<Option<InteractionResult>> {
        if !self.vessel(stage.world)?.punctured {
            return Ok(None);
        }
        if !stage.world.is_carried(self.glue) {
            return Ok(Some(InteractionResult::positive(
                "You don't have the viscous material. ",
            )));
        }
        self.vessel_mut(stage.world)?.punctured = false;
        info!(boat = %self.boat, "boat repaired");
        Ok(Some(InteractionResult::positive(
            "Well done. The boat is repaired. ",
        )))
    }

    fn inflate(
        &self,
        multi: &MultiNounIntent,
        stage: &mut Stage<'_>,
    ) -> EngineResult<Option<InteractionResult>> {
        if !self.is_boat(stage.world, &multi.noun_one)
            || !Self::answers(stage.world, self.pump, &multi.noun_two)
            || !multi.verb_is(INFLATE_VERBS)
            || !multi.preposition_is(INFLATE_PREPOSITIONS)
        {
            return Ok(None);
        }
        if stage.world.is_carried(self.boat) {
            return Ok(Some(InteractionResult::positive(ON_THE_GROUND)));
        }
        if !stage.world.is_carried(self.pump) {
            return Ok(Some(InteractionResult::positive("You don't have the air pump. ")));
        }

        let vessel = self.vessel_mut(stage.world)?;
        let message = if vessel.inflated {
            "Inflating it further would probably burst it. "
        } else if vessel.punctured {
            "This boat will not inflate since some moron punctured it. "
        } else {
            vessel.inflated = true;
            info!(boat = %self.boat, "boat inflated");
            "The boat inflates and appears seaworthy. "
        };
        Ok(Some(InteractionResult::positive(message)))
    }
}

impl ItemBehavior for BoatBehavior {
    fn respond_to_simple(
        &mut self,
        intent: &Intent,
        stage: &mut Stage<'_>,
    ) -> EngineResult<Option<InteractionResult>> {
        let simple = intent.as_simple()?;
        if !simple.verb_is(&["inflate", "blow up", "blow"]) {
            return Ok(None);
        }
        let message = if stage.world.is_carried(self.boat) {
            ON_THE_GROUND
        } else {
            "You don't have enough lung power to inflate it. "
        };
        Ok(Some(InteractionResult::positive(message)))
    }

    fn respond_to_multi(
        &mut self,
        intent: &Intent,
        stage: &mut Stage<'_>,
    ) -> EngineResult<Option<InteractionResult>> {
        let multi = intent.as_multi_noun()?;
        if self.wants_repair(multi, stage.world) {
            return self.repair(stage);
        }
        self.inflate(multi, stage)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hv_core::Location;
    use hv_engine::{Dice, TurnScheduler};

    struct Shore {
        world: World,
        scheduler: TurnScheduler,
        dice: Dice,
        behavior: BoatBehavior,
        boat: ItemId,
        pump: ItemId,
    }

    impl Shore {
        fn new() -> Self {
            let mut world = World::new("test", Location::new("Dam Base"));
            let here = world.player().location();
            let boat = world
                .add_item_to_location(
                    Item::new("magic boat", &["boat", "plastic", "pile"]).vessel(
                        Vessel::inflatable("magic boat", "pile of plastic", "punctured boat"),
                    ),
                    here,
                )
                .unwrap();
            let pump = world
                .add_item_to_location(Item::new("air pump", &["pump", "air pump"]).takeable(5), here)
                .unwrap();
            let glue = world
                .add_item_to_player(
                    Item::new("viscous material", &["glue", "material", "gunk"]).takeable(1),
                )
                .unwrap();
            Self {
                world,
                scheduler: TurnScheduler::new(),
                dice: Dice::seeded(1),
                behavior: BoatBehavior::new(boat, pump, glue),
                boat,
                pump,
            }
        }

        fn multi(&mut self, intent: Intent) -> Option<InteractionResult> {
            let mut stage = Stage::new(&mut self.world, &mut self.scheduler, &mut self.dice);
            self.behavior.respond_to_multi(&intent, &mut stage).unwrap()
        }

        fn vessel(&self) -> &Vessel {
            self.behavior.vessel(&self.world).unwrap()
        }
    }

    #[test]
    fn inflate_needs_the_pump_in_hand() {
        let mut shore = Shore::new();
        let inflate = || Intent::multi("inflate", "boat", "with", "pump");

        let r = shore.multi(inflate()).unwrap();
        assert_eq!(r.message, "You don't have the air pump. ");
        assert!(!shore.vessel().inflated);

        shore.world.give_to_player(shore.pump).unwrap();
        let r = shore.multi(inflate()).unwrap();
        assert_eq!(r.message, "The boat inflates and appears seaworthy. ");
        assert!(shore.vessel().inflated);

        let r = shore.multi(inflate()).unwrap();
        assert!(r.message.contains("burst"));
    }

    #[test]
    fn carried_boat_cannot_be_inflated() {
        let mut shore = Shore::new();
        shore.world.give_to_player(shore.pump).unwrap();
        shore.world.give_to_player(shore.boat).unwrap();

        let r = shore.multi(Intent::multi("inflate", "plastic", "with", "pump")).unwrap();
        assert_eq!(r.message, ON_THE_GROUND);
    }

    #[test]
    fn puncture_blocks_inflation_until_patched() {
        let mut shore = Shore::new();
        shore.world.give_to_player(shore.pump).unwrap();
        shore.behavior.vessel_mut(&mut shore.world).unwrap().punctured = true;

        let r = shore.multi(Intent::multi("inflate", "boat", "with", "pump")).unwrap();
        assert!(r.message.contains("some moron punctured it"));

        let r = shore.multi(Intent::multi("put", "glue", "on", "hole")).unwrap();
        assert_eq!(r.message, "Well done. The boat is repaired. ");
        assert!(!shore.vessel().punctured);

        assert!(shore.multi(Intent::multi("repair", "boat", "with", "glue")).is_none());
        let r = shore.multi(Intent::multi("inflate", "boat", "with", "pump")).unwrap();
        assert!(r.message.contains("seaworthy"));
    }

    #[test]
    fn unrelated_intents_pass() {
        let mut shore = Shore::new();
        assert!(shore.multi(Intent::multi("inflate", "boat", "with", "glue")).is_none());
        assert!(shore.multi(Intent::multi("put", "pump", "in", "boat")).is_none());

        let mut stage = Stage::new(&mut shore.world, &mut shore.scheduler, &mut shore.dice);
        let r = shore
            .behavior
            .respond_to_simple(&Intent::simple("blow up", "boat"), &mut stage)
            .unwrap()
            .unwrap();
        assert!(r.message.contains("lung power"));
    }
}
