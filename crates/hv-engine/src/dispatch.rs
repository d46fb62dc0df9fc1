//! Interaction dispatch: resolves simple and multi-noun intents.
//!
//! Precedence is fixed. The location answers first, then the items on its
//! floor, then the player's own context (self-referential verbs and carried
//! items). Some verbs are deliberately shadowed at the location level, so
//! this order must not change. When nobody answers, the narrator explains
//! why nothing happened.

use std::collections::BTreeMap;

use hv_core::ItemId;
use tracing::debug;

use crate::context::{EngineContext, Stage};
use crate::error::EngineResult;
use crate::intent::{Intent, SimpleIntent};
use crate::narration::{NarrationRequest, narrate};
use crate::result::{Disambiguation, InteractionResult, list_with_or};

/// Said when the player tries to do something in the dark.
pub const TOO_DARK: &str = "It's too dark to see! ";

/// Verbs that list the inventory.
pub const INVENTORY_VERBS: &[&str] = &["inventory", "i"];

/// Verbs that describe the surroundings when used without a noun.
pub const LOOK_VERBS: &[&str] = &["look", "l"];

/// What an item walk found.
enum Walk {
    /// Something answered.
    Answered(InteractionResult),
    /// An item matched the noun but nothing took the verb.
    Matched(ItemId),
    /// No item matched the noun.
    Nothing,
}

/// How the noun narrowed down.
enum Target {
    /// Any matching item may answer.
    Any,
    /// Only this item may answer.
    Only(ItemId),
}

/// Resolve a simple intent.
pub async fn resolve_simple(
    intent: &Intent,
    ctx: &mut EngineContext<'_>,
) -> EngineResult<InteractionResult> {
    let simple = intent.as_simple()?;
    debug!(verb = %simple.verb, noun = %simple.noun, "dispatching simple intent");

    ctx.world.player_mut().last_noun = Some(simple.noun.clone());
    let has_noun = !simple.noun.trim().is_empty();

    let target = match disambiguate(simple, ctx) {
        Ok(target) => target,
        Err(question) => return Ok(question),
    };

    if has_noun && ctx.scope().is_dark() && !lights_the_way(&target, ctx) {
        return Ok(InteractionResult::positive(TOO_DARK));
    }

    let here = ctx.world.player().location();
    {
        let mut stage = Stage::new(&mut *ctx.world, &mut *ctx.scheduler, &mut *ctx.dice);
        if let Some(result) = ctx
            .cast
            .location_mut(here)
            .respond_to_simple(simple, &mut stage)?
        {
            return Ok(answered(result));
        }
    }

    let floor = ctx.scope().location_items();
    let mut matched = match walk(&floor, intent, simple, &target, ctx)? {
        Walk::Answered(result) => return Ok(answered(result)),
        Walk::Matched(id) => Some(id),
        Walk::Nothing => None,
    };

    if let Some(result) = respond_as_player(simple, ctx)? {
        return Ok(answered(result));
    }
    let carried = ctx.scope().inventory_items();
    match walk(&carried, intent, simple, &target, ctx)? {
        Walk::Answered(result) => return Ok(answered(result)),
        Walk::Matched(id) => matched = matched.or(Some(id)),
        Walk::Nothing => {}
    }

    fallback(simple, matched, ctx).await
}

/// Resolve a multi-noun intent.
pub async fn resolve_multi(
    intent: &Intent,
    ctx: &mut EngineContext<'_>,
) -> EngineResult<InteractionResult> {
    let multi = intent.as_multi_noun()?;
    debug!(
        verb = %multi.verb,
        noun_one = %multi.noun_one,
        noun_two = %multi.noun_two,
        preposition = %multi.preposition,
        "dispatching multi-noun intent"
    );

    ctx.world.player_mut().last_noun = None;

    if ctx.scope().is_dark() {
        return Ok(InteractionResult::positive(TOO_DARK));
    }

    let here = ctx.world.player().location();
    {
        let mut stage = Stage::new(&mut *ctx.world, &mut *ctx.scheduler, &mut *ctx.dice);
        if let Some(result) = ctx
            .cast
            .location_mut(here)
            .respond_to_multi(multi, &mut stage)?
        {
            return Ok(answered(result));
        }
    }

    let scope = ctx.scope();
    let mut responders = scope.location_items();
    responders.extend(scope.inventory_items());
    for id in responders {
        let Some(behavior) = ctx.cast.item_mut(id) else {
            continue;
        };
        let mut stage = Stage::new(&mut *ctx.world, &mut *ctx.scheduler, &mut *ctx.dice);
        if let Some(result) = behavior.respond_to_multi(intent, &mut stage)? {
            return Ok(answered(result));
        }
    }

    if let Some(result) = ctx.processors.process_multi(multi, ctx.world)? {
        return Ok(answered(result));
    }

    let known = |noun: &str| ctx.world.find_item_by_noun(noun).is_some();
    let request = if known(&multi.noun_one) || known(&multi.noun_two) {
        NarrationRequest::MultiNounVerbHasNoEffect {
            location: ctx.location_name(),
            input: multi.input(),
        }
    } else {
        NarrationRequest::CommandHasNoEffect {
            location: ctx.location_name(),
            input: multi.input(),
        }
    };
    let message = narrate(ctx.narrator, request, "").await?;
    Ok(quiet_or_terminated(InteractionResult::no_verb_match(), message))
}

/// Resolve an intent the parser could not make sense of.
pub async fn resolve_null(ctx: &mut EngineContext<'_>) -> EngineResult<InteractionResult> {
    let request = NarrationRequest::CommandHasNoEffect {
        location: ctx.location_name(),
        input: String::new(),
    };
    let message = narrate(ctx.narrator, request, "").await?;
    Ok(quiet_or_terminated(InteractionResult::no_noun_match(), message))
}

/// Fallback narration ends its line unless the narrator stayed silent.
fn quiet_or_terminated(result: InteractionResult, message: String) -> InteractionResult {
    if message.is_empty() {
        result
    } else {
        result.with_message(message).terminated()
    }
}

fn answered(result: InteractionResult) -> InteractionResult {
    if result.is_positive() || result.disambiguation_payload().is_some() {
        result.terminated()
    } else {
        result
    }
}

/// Narrow the noun to one item, or ask the player which one they meant.
fn disambiguate(
    simple: &SimpleIntent,
    ctx: &EngineContext<'_>,
) -> Result<Target, InteractionResult> {
    let candidates = ctx.scope().matching_items(&simple.noun);
    if candidates.len() < 2 {
        return Ok(candidates.first().map_or(Target::Any, |id| Target::Only(*id)));
    }

    let precise: Vec<ItemId> = candidates
        .iter()
        .copied()
        .filter(|id| {
            ctx.world
                .item(*id)
                .is_some_and(|i| i.matches_precise_noun(&simple.noun))
        })
        .collect();
    if let [only] = precise.as_slice() {
        return Ok(Target::Only(*only));
    }
    let ambiguous = if precise.is_empty() { candidates } else { precise };

    let mut names = Vec::new();
    let mut noun_map = BTreeMap::new();
    for item in ambiguous.iter().filter_map(|id| ctx.world.item(*id)) {
        let name = item.longest_precise_noun().to_string();
        for noun in item.precise() {
            noun_map
                .entry(noun.to_lowercase())
                .or_insert_with(|| name.clone());
        }
        noun_map
            .entry(name.to_lowercase())
            .or_insert_with(|| name.clone());
        names.push(name);
    }
    debug!(noun = %simple.noun, candidates = names.len(), "noun is ambiguous");

    let message = format!("Do you mean {}? ", list_with_or(&names));
    Err(InteractionResult::disambiguation(
        message,
        Disambiguation {
            candidates: names,
            noun_map,
            replacement: format!("{} {{0}}", simple.verb.trim()),
        },
    ))
}

/// In the dark, only a light source or something always at hand can be
/// used.
fn lights_the_way(target: &Target, ctx: &EngineContext<'_>) -> bool {
    let Target::Only(id) = target else {
        return false;
    };
    ctx.world
        .item(*id)
        .is_some_and(|i| i.is_light_source() || i.always_in_scope)
}

/// Ask every item in `ids` that answers to the noun: its behavior first,
/// then its processor chain.
fn walk(
    ids: &[ItemId],
    intent: &Intent,
    simple: &SimpleIntent,
    target: &Target,
    ctx: &mut EngineContext<'_>,
) -> EngineResult<Walk> {
    let mut matched = None;
    for &id in ids {
        if let Target::Only(only) = target {
            if *only != id {
                continue;
            }
        }
        let Some(item) = ctx.world.item(id) else {
            continue;
        };
        if !item.answers_to(&simple.noun) {
            continue;
        }
        matched.get_or_insert(id);

        if let Some(behavior) = ctx.cast.item_mut(id) {
            let mut stage = Stage::new(&mut *ctx.world, &mut *ctx.scheduler, &mut *ctx.dice);
            if let Some(result) = behavior.respond_to_simple(intent, &mut stage)? {
                return Ok(Walk::Answered(result));
            }
        }

        let chain = ctx.processors.processors_for(ctx.world.require_item(id)?);
        for processor in chain {
            if let Some(result) = processor.process(simple, id, ctx.world)? {
                return Ok(Walk::Answered(result));
            }
        }
    }
    Ok(matched.map_or(Walk::Nothing, Walk::Matched))
}

/// Verbs about the player rather than any item.
fn respond_as_player(
    simple: &SimpleIntent,
    ctx: &mut EngineContext<'_>,
) -> EngineResult<Option<InteractionResult>> {
    if simple.verb_is(INVENTORY_VERBS) {
        let carried: Vec<String> = ctx
            .world
            .inventory()
            .iter()
            .filter_map(|id| ctx.world.item(*id))
            .map(|i| format!("  A {}\n", i.name))
            .collect();
        if carried.is_empty() {
            return Ok(Some(InteractionResult::positive("You are empty-handed. ")));
        }
        return Ok(Some(InteractionResult::positive(format!(
            "You are carrying:\n{}",
            carried.concat()
        ))));
    }
    if simple.verb_is(LOOK_VERBS) && simple.noun.trim().is_empty() {
        let stage = Stage::new(&mut *ctx.world, &mut *ctx.scheduler, &mut *ctx.dice);
        let text = crate::behavior::describe_location(&stage)?;
        return Ok(Some(InteractionResult::positive(text)));
    }
    Ok(None)
}

/// Nobody answered: let the narrator say why.
async fn fallback(
    simple: &SimpleIntent,
    matched: Option<ItemId>,
    ctx: &mut EngineContext<'_>,
) -> EngineResult<InteractionResult> {
    let location = ctx.location_name();
    if let Some(id) = matched {
        let item = ctx.world.require_item(id)?;
        let noun = simple.noun.clone();
        let verb = simple.verb.clone();
        let request = if item.is_person() {
            NarrationRequest::VerbHasNoEffectOnPerson {
                location,
                noun,
                verb,
            }
        } else {
            NarrationRequest::VerbHasNoEffect {
                location,
                noun,
                verb,
            }
        };
        let message = narrate(ctx.narrator, request, "").await?;
        return Ok(quiet_or_terminated(InteractionResult::no_verb_match(), message));
    }

    let request = if ctx.world.find_item_by_noun(&simple.noun).is_some() {
        NarrationRequest::NounNotPresent {
            location,
            noun: simple.noun.clone(),
        }
    } else {
        NarrationRequest::CommandHasNoEffect {
            location,
            input: simple.input(),
        }
    };
    let message = narrate(ctx.narrator, request, "").await?;
    Ok(quiet_or_terminated(InteractionResult::no_noun_match(), message))
}

#[cfg(test)]
mod tests {
    use std::any::Any;

    use super::*;
    use crate::behavior::{Cast, ItemBehavior, LocationBehavior};
    use crate::config::EngineConfig;
    use crate::dice::Dice;
    use crate::error::EngineError;
    use crate::intent::MultiNounIntent;
    use crate::narration::DisabledNarrator;
    use crate::processor::StandardProcessors;
    use crate::result::Outcome;
    use crate::scheduler::TurnScheduler;
    use hv_core::{Item, Location, LocationId, World};

    struct Harness {
        world: World,
        cast: Cast,
        scheduler: TurnScheduler,
        dice: Dice,
        processors: StandardProcessors,
        config: EngineConfig,
    }

    impl Harness {
        fn new(world: World) -> Self {
            Self {
                world,
                cast: Cast::new(),
                scheduler: TurnScheduler::new(),
                dice: Dice::seeded(3),
                processors: StandardProcessors::default(),
                config: EngineConfig::default(),
            }
        }

        fn here(&self) -> LocationId {
            self.world.player().location()
        }

        async fn run(&mut self, intent: Intent) -> EngineResult<InteractionResult> {
            let mut ctx = EngineContext {
                world: &mut self.world,
                cast: &mut self.cast,
                scheduler: &mut self.scheduler,
                dice: &mut self.dice,
                narrator: &DisabledNarrator,
                processors: &self.processors,
                config: &self.config,
            };
            match intent {
                Intent::MultiNoun(_) => resolve_multi(&intent, &mut ctx).await,
                Intent::Null => resolve_null(&mut ctx).await,
                _ => resolve_simple(&intent, &mut ctx).await,
            }
        }
    }

    fn lanterns() -> (Harness, ItemId, ItemId) {
        let mut h = Harness::new(World::new("test", Location::new("Gallery")));
        let here = h.here();
        let brass = h
            .world
            .add_item_to_location(
                Item::new("brass lantern", &["lantern", "brass lantern", "brass"])
                    .with_precise_nouns(&["brass lantern", "brass"])
                    .takeable(10),
                here,
            )
            .unwrap();
        let broken = h
            .world
            .add_item_to_location(
                Item::new("broken lantern", &["lantern", "broken lantern", "broken"])
                    .with_precise_nouns(&["broken lantern", "broken"])
                    .takeable(10),
                here,
            )
            .unwrap();
        (h, brass, broken)
    }

    #[tokio::test]
    async fn shared_noun_asks_which_one() {
        let (mut h, brass, broken) = lanterns();

        let r = h.run(Intent::simple("take", "lantern")).await.unwrap();
        insta::assert_snapshot!(
            r.message.trim_end(),
            @"Do you mean the brass lantern or the broken lantern?"
        );
        assert!(!r.consumes_turn);
        let d = r.disambiguation_payload().unwrap();
        assert_eq!(d.candidates, vec!["brass lantern", "broken lantern"]);
        assert_eq!(d.resolve("brass").as_deref(), Some("take brass lantern"));
        assert_eq!(d.resolve("broken lantern").as_deref(), Some("take broken lantern"));
        assert!(h.world.inventory().is_empty());

        let r = h.run(Intent::simple("take", "brass")).await.unwrap();
        assert_eq!(r.message, "Taken. \n");
        assert!(h.world.is_held_by_player(brass));
        assert!(!h.world.is_held_by_player(broken));
    }

    #[tokio::test]
    async fn single_match_proceeds_without_asking() {
        let (mut h, brass, broken) = lanterns();
        h.world.remove_from_play(broken).unwrap();

        let r = h.run(Intent::simple("take", "lantern")).await.unwrap();
        assert_eq!(r.message, "Taken. \n");
        assert!(h.world.is_held_by_player(brass));
        assert_eq!(h.world.player().last_noun.as_deref(), Some("lantern"));
    }

    #[tokio::test]
    async fn darkness_blocks_everything_but_lights() {
        let mut h = Harness::new(World::new("test", Location::new("Cellar").dark()));
        let here = h.here();
        h.world
            .add_item_to_location(Item::new("rug", &["rug"]).takeable(5), here)
            .unwrap();
        let lamp = h
            .world
            .add_item_to_player(Item::new("lamp", &["lamp"]).takeable(5).light(false, true))
            .unwrap();

        let r = h.run(Intent::simple("take", "rug")).await.unwrap();
        assert_eq!(r.message, TOO_DARK);

        let r = h.run(Intent::simple("turn on", "lamp")).await.unwrap();
        assert_eq!(r.message, "It is now on. \n");
        assert!(h.world.item(lamp).unwrap().is_lit());

        let r = h.run(Intent::simple("take", "rug")).await.unwrap();
        assert_eq!(r.message, "Taken. \n");
    }

    #[derive(Debug)]
    struct NoTouching;

    impl LocationBehavior for NoTouching {
        fn respond_to_simple(
            &mut self,
            intent: &SimpleIntent,
            _stage: &mut Stage<'_>,
        ) -> EngineResult<Option<InteractionResult>> {
            if intent.verb_is(&["take"]) {
                return Ok(Some(InteractionResult::positive(
                    "A guard wags a finger at you. ",
                )));
            }
            Ok(None)
        }
    }

    #[tokio::test]
    async fn location_answers_before_items() {
        let (mut h, brass, _) = lanterns();
        let here = h.here();
        h.cast.add_location_behavior(here, NoTouching);

        let r = h.run(Intent::simple("take", "brass")).await.unwrap();
        assert_eq!(r.message, "A guard wags a finger at you. \n");
        assert!(!h.world.is_held_by_player(brass));
    }

    #[derive(Debug)]
    struct Grumpy;

    impl ItemBehavior for Grumpy {
        fn respond_to_simple(
            &mut self,
            intent: &Intent,
            _stage: &mut Stage<'_>,
        ) -> EngineResult<Option<InteractionResult>> {
            if intent.as_simple()?.verb_is(&["poke"]) {
                return Ok(Some(InteractionResult::positive("The gnome growls. ")));
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

    #[tokio::test]
    async fn item_behavior_precedes_processors_and_fallbacks_follow() {
        let mut h = Harness::new(World::new("test", Location::new("Garden")));
        let here = h.here();
        let gnome = h
            .world
            .add_item_to_location(Item::new("gnome", &["gnome"]).person(&["dwarf"]), here)
            .unwrap();
        h.cast.add_item_behavior(gnome, Grumpy);

        let r = h.run(Intent::simple("poke", "dwarf")).await.unwrap();
        assert_eq!(r.message, "The gnome growls. \n");

        let r = h.run(Intent::simple("tickle", "gnome")).await.unwrap();
        assert!(r.is_no_verb_match());
        assert_eq!(r.message, "");

        h.world.add_item(Item::new("sword", &["sword"]));
        let r = h.run(Intent::simple("take", "sword")).await.unwrap();
        assert_eq!(r.outcome, Outcome::NoNounMatch);
        assert_eq!(r.message, "You don't see that here. \n");

        let r = h.run(Intent::simple("take", "unicorn")).await.unwrap();
        assert_eq!(r.message, "Nothing happens. \n");
        assert_eq!(h.world.player().last_noun.as_deref(), Some("unicorn"));

        h.run(Intent::simple("look", "")).await.unwrap();
        assert_eq!(h.world.player().last_noun.as_deref(), Some(""));
    }

    #[tokio::test]
    async fn inventory_and_look() {
        let mut h = Harness::new(World::new(
            "test",
            Location::new("Attic").with_description("Dust everywhere."),
        ));
        let r = h.run(Intent::simple("i", "")).await.unwrap();
        assert_eq!(r.message, "You are empty-handed. \n");

        h.world
            .add_item_to_player(Item::new("rope", &["rope"]).takeable(5))
            .unwrap();
        let r = h.run(Intent::simple("inventory", "")).await.unwrap();
        assert_eq!(r.message, "You are carrying:\n  A rope\n");

        let r = h.run(Intent::simple("look", "")).await.unwrap();
        assert_eq!(r.message, "Attic\nDust everywhere.\n");
    }

    #[tokio::test]
    async fn multi_noun_put_and_fallbacks() {
        let mut h = Harness::new(World::new("test", Location::new("Pantry")));
        let here = h.here();
        let basket = h
            .world
            .add_item_to_location(
                Item::new("basket", &["basket"]).container(hv_core::Container::default()),
                here,
            )
            .unwrap();
        let apple = h
            .world
            .add_item_to_player(Item::new("apple", &["apple"]).takeable(1))
            .unwrap();
        h.world.player_mut().last_noun = Some("apple".into());

        let r = h
            .run(Intent::multi("put", "apple", "in", "basket"))
            .await
            .unwrap();
        assert_eq!(r.message, "Done. \n");
        assert_eq!(h.world.player().last_noun, None);
        assert!(h.world.is_inside(apple, basket));

        let r = h
            .run(Intent::multi("juggle", "apple", "with", "basket"))
            .await
            .unwrap();
        assert!(r.is_no_verb_match());

        let r = h
            .run(Intent::MultiNoun(MultiNounIntent::new("zap", "foo", "at", "bar")))
            .await
            .unwrap();
        assert_eq!(r.message, "Nothing happens. \n");
        h.world.check_containment().unwrap();
    }

    #[tokio::test]
    async fn wrong_variant_is_a_contract_error() {
        let mut h = Harness::new(World::new("test", Location::new("Void")));
        let mut ctx = EngineContext {
            world: &mut h.world,
            cast: &mut h.cast,
            scheduler: &mut h.scheduler,
            dice: &mut h.dice,
            narrator: &DisabledNarrator,
            processors: &h.processors,
            config: &h.config,
        };
        let err = resolve_multi(&Intent::simple("take", "lamp"), &mut ctx)
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::IntentMismatch { .. }));

        let err = resolve_simple(&Intent::enter("boat"), &mut ctx)
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::IntentMismatch { .. }));
    }
}
