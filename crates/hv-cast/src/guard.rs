//! The troll: a guard that blocks the way, takes back its axe, and fights.

use std::any::Any;

use hv_core::{Direction, ItemId, Location, Passage};
use hv_engine::{
    CombatEngine, EngineResult, Foe, GiveSomethingEngine, Intent, InteractionResult, ItemBehavior,
    KillSomeoneEngine, LocationBehavior, MovementParameters, Recipient, Stage,
};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Flag set on the troll when it dies.
pub const DEAD: &str = "dead";
/// Flag set on the troll while it is knocked out.
pub const UNCONSCIOUS: &str = "unconscious";

/// Said when the player swings at the troll with nothing in hand.
pub const BARE_HANDS: &str = "Trying to attack the troll with your bare hands is suicidal. ";

/// The troll's identity and the axe it wants back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Troll {
    id: ItemId,
    axe: ItemId,
}

impl Troll {
    /// A troll whose weapon is `axe`.
    pub fn new(id: ItemId, axe: ItemId) -> Self {
        Self { id, axe }
    }

    /// The troll's axe.
    pub fn axe(&self) -> ItemId {
        self.axe
    }
}

impl Foe for Troll {
    fn foe_id(&self) -> ItemId {
        self.id
    }
}

impl Recipient for Troll {
    fn recipient_id(&self) -> ItemId {
        self.id
    }

    fn offer_this_thing(
        &mut self,
        item: ItemId,
        stage: &mut Stage<'_>,
    ) -> EngineResult<InteractionResult> {
        if item == self.axe {
            stage.world.place_in_item(item, self.id)?;
            return Ok(InteractionResult::positive(
                "The troll scratches his head in confusion, then takes the axe. ",
            ));
        }

        let name = stage.world.require_item(item)?.name.clone();
        stage.world.drop_here(item)?;
        Ok(InteractionResult::positive(format!(
            "The troll, who is remarkably coordinated, catches the {name}. Not having the most \
             discriminating tastes, he sniffs it and throws it to the floor. "
        )))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Blow {
    Miss,
    Knockout,
    Fatal,
}

const BLOWS: &[(Blow, &str)] = &[
    (Blow::Miss, "A quick stroke, but the troll is on guard. "),
    (Blow::Fatal, "The troll takes a fatal blow and slumps to the floor dead. "),
    (Blow::Knockout, "The haft of your {weapon} knocks out the troll. "),
    (Blow::Miss, "You charge, but the troll jumps nimbly aside. "),
    (Blow::Miss, "A good stroke, but it's too slow; the troll dodges. "),
    (Blow::Miss, "Your {weapon} misses the troll by an inch. "),
    (Blow::Knockout, "The troll is battered into unconsciousness. "),
    (Blow::Miss, "Clang! Crash! The troll parries. "),
    (Blow::Fatal, "The fatal blow strikes the troll square in the heart: He dies. "),
    (Blow::Miss, "The force of your blow knocks the troll back, stunned. "),
    (Blow::Fatal, "It's curtains for the troll as your {weapon} removes his head. "),
    (Blow::Miss, "The troll is momentarily disoriented and can't fight back. "),
];

/// Dice-driven combat against the troll.
///
/// A helpless troll (unconscious or disarmed) always dies. Otherwise one
/// entry of the blow table is rolled.
#[derive(Debug, Clone, Copy, Default)]
pub struct GuardCombat;

impl GuardCombat {
    fn death_blow(
        stage: &mut Stage<'_>,
        foe: ItemId,
        text: &str,
    ) -> EngineResult<InteractionResult> {
        let floor = stage.world.location_of(foe);
        let held = stage.world.contents_of(foe).to_vec();
        if let Some(floor) = floor {
            for item in held {
                stage.world.place_in_location(item, floor)?;
            }
        }

        let troll = stage.world.require_item_mut(foe)?;
        troll.set_flag(DEAD, true);
        troll.hidden = true;
        info!(foe = %foe, "guard killed");

        Ok(InteractionResult::positive(format!(
            "{text}\nAlmost as soon as the troll breathes his last breath, a cloud of sinister black \
             fog envelops him, and when the fog lifts, the carcass has disappeared. "
        )))
    }
}

impl CombatEngine for GuardCombat {
    fn attack(
        &mut self,
        stage: &mut Stage<'_>,
        foe: ItemId,
        weapon: Option<ItemId>,
    ) -> EngineResult<InteractionResult> {
        let Some(weapon) = weapon else {
            return Ok(InteractionResult::positive(BARE_HANDS));
        };

        let troll = stage.world.require_item(foe)?;
        if troll.flag(UNCONSCIOUS) {
            return Self::death_blow(
                stage,
                foe,
                "The unconscious troll cannot defend himself: He dies. ",
            );
        }
        if stage.world.contents_of(foe).is_empty() {
            return Self::death_blow(stage, foe, "The unarmed troll cannot defend himself: He dies. ");
        }

        let weapon_noun = stage.world.require_item(weapon)?.longest_noun().to_string();
        let Some(&(blow, text)) = stage.dice.choose(BLOWS) else {
            return Ok(InteractionResult::positive(BARE_HANDS));
        };
        let text = text.replace("{weapon}", &weapon_noun);

        match blow {
            Blow::Miss => {}
            Blow::Knockout => stage.world.require_item_mut(foe)?.set_flag(UNCONSCIOUS, true),
            Blow::Fatal => return Self::death_blow(stage, foe, &text),
        }
        Ok(InteractionResult::positive(text))
    }
}

/// The troll's item behavior: fights through [`KillSomeoneEngine`] and takes
/// gifts through [`GiveSomethingEngine`].
#[derive(Debug)]
pub struct TrollBehavior {
    troll: Troll,
    killer: KillSomeoneEngine<Troll, GuardCombat>,
    giver: GiveSomethingEngine<Troll>,
}

impl TrollBehavior {
    /// Behavior for `troll`.
    pub fn new(troll: Troll) -> Self {
        Self {
            troll,
            killer: KillSomeoneEngine::new(GuardCombat),
            giver: GiveSomethingEngine::new(),
        }
    }
}

impl ItemBehavior for TrollBehavior {
    fn respond_to_simple(
        &mut self,
        intent: &Intent,
        stage: &mut Stage<'_>,
    ) -> EngineResult<Option<InteractionResult>> {
        self.killer.bare_handed(intent, &self.troll, stage)
    }

    fn respond_to_multi(
        &mut self,
        intent: &Intent,
        stage: &mut Stage<'_>,
    ) -> EngineResult<Option<InteractionResult>> {
        if let Some(result) = self.giver.resolve(intent, &mut self.troll, stage)? {
            return Ok(Some(result));
        }
        self.killer.with_weapon(intent, &self.troll, stage)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// The troll's room: every exit except the way back is barred while the
/// troll lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrollRoom {
    troll: ItemId,
    retreat: Direction,
}

impl TrollRoom {
    /// A room guarded by `troll`; `retreat` stays open.
    pub fn new(troll: ItemId, retreat: Direction) -> Self {
        Self { troll, retreat }
    }
}

impl LocationBehavior for TrollRoom {
    fn navigate(&self, direction: Direction, location: &Location) -> Option<MovementParameters> {
        let mut params = MovementParameters::from(location.exit(direction)?);
        if direction != self.retreat {
            params.can_go = Some(Passage::WhenFlag {
                item: self.troll,
                key: DEAD.to_string(),
                value: true,
            });
            params.failure_message =
                Some("The troll fends you off with a menacing gesture. ".to_string());
        }
        Some(params)
    }
}
