//! The kill/attack decision engine, generic over the kind of foe, and the
//! combat port it delegates to.

use std::fmt;
use std::marker::PhantomData;

use hv_core::ItemId;
use tracing::debug;

use crate::context::Stage;
use crate::error::EngineResult;
use crate::intent::{Intent, KILL_VERBS, WEAPON_PREPOSITIONS};
use crate::result::InteractionResult;

/// Asked when the player carries several weapons and named none.
pub const WHICH_WEAPON: &str = "You'll need to specify which weapon you want to use. ";

/// Something that can be attacked.
pub trait Foe {
    /// The foe's item in the world.
    fn foe_id(&self) -> ItemId;
}

/// Resolves a single attack.
pub trait CombatEngine: fmt::Debug + Send {
    /// Attack `foe`, bare-handed when `weapon` is `None`.
    fn attack(
        &mut self,
        stage: &mut Stage<'_>,
        foe: ItemId,
        weapon: Option<ItemId>,
    ) -> EngineResult<InteractionResult>;
}

/// Implements "kill Y with X" and bare "kill Y" for foes of type `T`.
#[derive(Debug)]
pub struct KillSomeoneEngine<T, C> {
    combat: C,
    _foe: PhantomData<fn(&T)>,
}

impl<T: Foe, C: CombatEngine> KillSomeoneEngine<T, C> {
    /// Create the engine around a combat engine.
    pub fn new(combat: C) -> Self {
        Self {
            combat,
            _foe: PhantomData,
        }
    }

    /// The combat engine.
    pub fn combat(&self) -> &C {
        &self.combat
    }

    /// The combat engine, mutably.
    pub fn combat_mut(&mut self) -> &mut C {
        &mut self.combat
    }

    /// Resolve "kill Y with X" (or "stab X into Y", either noun order).
    /// Returns `Ok(None)` when the intent is not a valid armed attack on
    /// this foe.
    pub fn with_weapon(
        &mut self,
        intent: &Intent,
        foe: &T,
        stage: &mut Stage<'_>,
    ) -> EngineResult<Option<InteractionResult>> {
        let multi = intent.as_multi_noun()?;
        if !multi.verb_is(KILL_VERBS) {
            return Ok(None);
        }

        let target = stage.world.require_item(foe.foe_id())?;
        let weapon_noun = if target.answers_to(&multi.noun_one) {
            &multi.noun_two
        } else if target.answers_to(&multi.noun_two) {
            &multi.noun_one
        } else {
            return Ok(None);
        };

        let weapon = stage
            .scope()
            .item_in_scope(weapon_noun)
            .or_else(|| stage.world.find_item_by_noun(weapon_noun));
        let Some(weapon) = weapon else {
            return Ok(None);
        };
        let weapon_item = stage.world.require_item(weapon)?;
        if !weapon_item.is_weapon() {
            return Ok(None);
        }
        if !multi.preposition_is(WEAPON_PREPOSITIONS) {
            return Ok(None);
        }
        if !stage.world.is_carried(weapon) {
            return Ok(Some(InteractionResult::positive(format!(
                "You don't have the {}. ",
                weapon_item.name
            ))));
        }

        debug!(foe = %foe.foe_id(), weapon = %weapon, "armed attack");
        self.combat
            .attack(stage, foe.foe_id(), Some(weapon))
            .map(Some)
    }

    /// Resolve "kill Y" with no weapon named. One carried weapon is used
    /// implicitly; several need the player to choose.
    pub fn bare_handed(
        &mut self,
        intent: &Intent,
        foe: &T,
        stage: &mut Stage<'_>,
    ) -> EngineResult<Option<InteractionResult>> {
        let simple = intent.as_simple()?;
        if !simple.verb_is(KILL_VERBS) {
            return Ok(None);
        }
        if !stage.world.require_item(foe.foe_id())?.answers_to(&simple.noun) {
            return Ok(None);
        }

        let weapons: Vec<ItemId> = stage
            .world
            .inventory()
            .iter()
            .copied()
            .filter(|id| stage.world.item(*id).is_some_and(|i| i.is_weapon()))
            .collect();

        match weapons.as_slice() {
            [] => self.combat.attack(stage, foe.foe_id(), None).map(Some),
            [weapon] => {
                let name = stage.world.require_item(*weapon)?.name.clone();
                let result = self.combat.attack(stage, foe.foe_id(), Some(*weapon))?;
                let message = format!("(with the {name})\n{}", result.message);
                Ok(Some(result.with_message(message)))
            }
            _ => Ok(Some(InteractionResult::clarify(WHICH_WEAPON))),
        }
    }
}
