//! Intent model: the structured, already-parsed form of a player command.

use std::fmt;

use hv_core::Direction;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Verbs that hand an item to someone.
pub const GIVE_VERBS: &[&str] = &["give", "offer", "transfer", "present"];

/// Verbs that start a fight.
pub const KILL_VERBS: &[&str] = &[
    "kill", "attack", "defeat", "destroy", "stab", "slay", "murder", "hit", "strike", "fight",
    "slice", "punch",
];

/// Prepositions that introduce the weapon in "kill X with Y".
pub const WEAPON_PREPOSITIONS: &[&str] = &["with", "using", "by", "to"];

/// Verbs that pick something up.
pub const TAKE_VERBS: &[&str] = &[
    "take", "get", "grab", "hold", "pick up", "acquire", "snatch", "carry",
];

/// Verbs that put something down.
pub const DROP_VERBS: &[&str] = &["drop", "discard", "put down", "throw away"];

/// Verbs that look closely at something.
pub const EXAMINE_VERBS: &[&str] = &["examine", "look at", "inspect", "x", "study", "look"];

/// Verbs that open something.
pub const OPEN_VERBS: &[&str] = &["open"];

/// Verbs that close something.
pub const CLOSE_VERBS: &[&str] = &["close", "shut"];

/// Verbs that switch something on.
pub const TURN_ON_VERBS: &[&str] = &["turn on", "light", "activate", "enable", "switch on"];

/// Verbs that switch something off.
pub const TURN_OFF_VERBS: &[&str] = &[
    "turn off", "extinguish", "blow out", "deactivate", "disable", "switch off",
];

/// Verbs that place one item in or on another.
pub const PUT_VERBS: &[&str] = &["put", "place", "insert", "shove", "stuff"];

/// Prepositions accepted by [`PUT_VERBS`].
pub const PUT_PREPOSITIONS: &[&str] = &["in", "into", "inside", "on", "onto"];

/// Case-insensitive membership test against a verb list.
pub fn verb_in(verb: &str, verbs: &[&str]) -> bool {
    let verb = verb.trim();
    verbs.iter().any(|v| v.eq_ignore_ascii_case(verb))
}

/// Case-insensitive comparison of two nouns.
pub fn same_noun(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

/// A single verb applied to at most one noun: "take lamp", "turn lamp on".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleIntent {
    /// The verb.
    pub verb: String,
    /// The noun. May be empty for verbs like "look".
    pub noun: String,
    /// A trailing adverb the parser split off ("turn lamp on").
    pub adverb: Option<String>,
    /// The raw input, when the parser kept it.
    pub original_input: Option<String>,
}

impl SimpleIntent {
    /// Create a simple intent.
    pub fn new(verb: impl Into<String>, noun: impl Into<String>) -> Self {
        Self {
            verb: verb.into(),
            noun: noun.into(),
            ..Self::default()
        }
    }

    /// Attach an adverb.
    pub fn with_adverb(mut self, adverb: impl Into<String>) -> Self {
        self.adverb = Some(adverb.into());
        self
    }

    /// Verb is one of the given verbs.
    pub fn verb_is(&self, verbs: &[&str]) -> bool {
        verb_in(&self.verb, verbs)
    }

    /// The command as typed, or rebuilt from its parts.
    pub fn input(&self) -> String {
        match &self.original_input {
            Some(raw) => raw.clone(),
            None => format!("{} {}", self.verb, self.noun).trim().to_string(),
        }
    }

    /// The state a switch command asks for: "turn on X" and "turn X on" are
    /// `Some(true)`, the off forms `Some(false)`, anything else `None`.
    pub fn switch_state(&self) -> Option<bool> {
        if self.verb_is(TURN_ON_VERBS) {
            return Some(true);
        }
        if self.verb_is(TURN_OFF_VERBS) {
            return Some(false);
        }
        if self.verb_is(&["turn", "switch"]) {
            return match self.adverb.as_deref().map(str::trim) {
                Some(a) if a.eq_ignore_ascii_case("on") => Some(true),
                Some(a) if a.eq_ignore_ascii_case("off") => Some(false),
                _ => None,
            };
        }
        None
    }
}

/// A verb relating two nouns: "give axe to troll", "kill troll with sword".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiNounIntent {
    /// The verb.
    pub verb: String,
    /// The first noun.
    pub noun_one: String,
    /// The second noun.
    pub noun_two: String,
    /// The preposition between them, possibly empty.
    pub preposition: String,
    /// The raw input, when the parser kept it.
    pub original_input: Option<String>,
}

impl MultiNounIntent {
    /// Create a multi-noun intent.
    pub fn new(
        verb: impl Into<String>,
        noun_one: impl Into<String>,
        preposition: impl Into<String>,
        noun_two: impl Into<String>,
    ) -> Self {
        Self {
            verb: verb.into(),
            noun_one: noun_one.into(),
            noun_two: noun_two.into(),
            preposition: preposition.into(),
            original_input: None,
        }
    }

    /// Verb is one of the given verbs.
    pub fn verb_is(&self, verbs: &[&str]) -> bool {
        verb_in(&self.verb, verbs)
    }

    /// Preposition is one of the given words.
    pub fn preposition_is(&self, words: &[&str]) -> bool {
        verb_in(&self.preposition, words)
    }

    /// The command as typed, or rebuilt from its parts.
    pub fn input(&self) -> String {
        match &self.original_input {
            Some(raw) => raw.clone(),
            None => [&self.verb, &self.noun_one, &self.preposition, &self.noun_two]
                .iter()
                .filter(|w| !w.trim().is_empty())
                .map(|w| w.trim())
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

/// Directional movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveIntent {
    /// Where to go.
    pub direction: Direction,
}

/// Climbing into a vessel: "get in boat".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnterSubLocationIntent {
    /// The vessel.
    pub noun: String,
}

/// Climbing out of a vessel: "get out of boat", "disembark".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitSubLocationIntent {
    /// The first noun; often the directional word "out".
    pub noun_one: String,
    /// The second noun; the vessel when noun one is "out".
    pub noun_two: String,
}

/// Which variant an [`Intent`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentKind {
    /// [`Intent::Simple`].
    Simple,
    /// [`Intent::MultiNoun`].
    MultiNoun,
    /// [`Intent::Move`].
    Move,
    /// [`Intent::EnterSubLocation`].
    EnterSubLocation,
    /// [`Intent::ExitSubLocation`].
    ExitSubLocation,
    /// [`Intent::Null`].
    Null,
}

impl fmt::Display for IntentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Simple => "simple",
            Self::MultiNoun => "multi-noun",
            Self::Move => "move",
            Self::EnterSubLocation => "enter-sub-location",
            Self::ExitSubLocation => "exit-sub-location",
            Self::Null => "null",
        };
        f.write_str(name)
    }
}

/// A player command, already parsed.
///
/// Every engine handles exactly one variant. Handing an engine the wrong
/// one is a caller defect and yields [`EngineError::IntentMismatch`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum Intent {
    /// Single verb and noun.
    Simple(SimpleIntent),
    /// Verb with two nouns.
    MultiNoun(MultiNounIntent),
    /// Directional movement.
    Move(MoveIntent),
    /// Board a vessel.
    EnterSubLocation(EnterSubLocationIntent),
    /// Leave a vessel.
    ExitSubLocation(ExitSubLocationIntent),
    /// The parser could not make sense of the input.
    Null,
}

impl Intent {
    /// Shorthand for a simple intent.
    pub fn simple(verb: impl Into<String>, noun: impl Into<String>) -> Self {
        Self::Simple(SimpleIntent::new(verb, noun))
    }

    /// Shorthand for a multi-noun intent.
    pub fn multi(
        verb: impl Into<String>,
        noun_one: impl Into<String>,
        preposition: impl Into<String>,
        noun_two: impl Into<String>,
    ) -> Self {
        Self::MultiNoun(MultiNounIntent::new(verb, noun_one, preposition, noun_two))
    }

    /// Shorthand for a move intent.
    pub fn go(direction: Direction) -> Self {
        Self::Move(MoveIntent { direction })
    }

    /// Shorthand for boarding a vessel.
    pub fn enter(noun: impl Into<String>) -> Self {
        Self::EnterSubLocation(EnterSubLocationIntent { noun: noun.into() })
    }

    /// Shorthand for leaving a vessel.
    pub fn exit(noun_one: impl Into<String>, noun_two: impl Into<String>) -> Self {
        Self::ExitSubLocation(ExitSubLocationIntent {
            noun_one: noun_one.into(),
            noun_two: noun_two.into(),
        })
    }

    /// The variant.
    pub fn kind(&self) -> IntentKind {
        match self {
            Self::Simple(_) => IntentKind::Simple,
            Self::MultiNoun(_) => IntentKind::MultiNoun,
            Self::Move(_) => IntentKind::Move,
            Self::EnterSubLocation(_) => IntentKind::EnterSubLocation,
            Self::ExitSubLocation(_) => IntentKind::ExitSubLocation,
            Self::Null => IntentKind::Null,
        }
    }

    fn mismatch(&self, expected: IntentKind) -> EngineError {
        EngineError::IntentMismatch {
            expected,
            found: self.kind(),
        }
    }

    /// The simple payload, or a contract error.
    pub fn as_simple(&self) -> EngineResult<&SimpleIntent> {
        match self {
            Self::Simple(intent) => Ok(intent),
            other => Err(other.mismatch(IntentKind::Simple)),
        }
    }

    /// The multi-noun payload, or a contract error.
    pub fn as_multi_noun(&self) -> EngineResult<&MultiNounIntent> {
        match self {
            Self::MultiNoun(intent) => Ok(intent),
            other => Err(other.mismatch(IntentKind::MultiNoun)),
        }
    }

    /// The move payload, or a contract error.
    pub fn as_move(&self) -> EngineResult<&MoveIntent> {
        match self {
            Self::Move(intent) => Ok(intent),
            other => Err(other.mismatch(IntentKind::Move)),
        }
    }

    /// The enter payload, or a contract error.
    pub fn as_enter(&self) -> EngineResult<&EnterSubLocationIntent> {
        match self {
            Self::EnterSubLocation(intent) => Ok(intent),
            other => Err(other.mismatch(IntentKind::EnterSubLocation)),
        }
    }

    /// The exit payload, or a contract error.
    pub fn as_exit(&self) -> EngineResult<&ExitSubLocationIntent> {
        match self {
            Self::ExitSubLocation(intent) => Ok(intent),
            other => Err(other.mismatch(IntentKind::ExitSubLocation)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verb_lists_match_case_insensitively() {
        assert!(verb_in("GIVE", GIVE_VERBS));
        assert!(verb_in(" Offer ", GIVE_VERBS));
        assert!(!verb_in("throw", GIVE_VERBS));
        assert!(verb_in("Stab", KILL_VERBS));
        assert!(verb_in("pick up", TAKE_VERBS));
    }

    #[test]
    fn accessors_return_matching_payload() {
        let intent = Intent::simple("take", "lamp");
        assert_eq!(intent.kind(), IntentKind::Simple);
        assert_eq!(intent.as_simple().unwrap().noun, "lamp");

        let intent = Intent::multi("give", "axe", "to", "troll");
        assert_eq!(intent.as_multi_noun().unwrap().noun_two, "troll");
    }

    #[test]
    fn wrong_variant_is_a_contract_error() {
        let intent = Intent::go(Direction::North);
        let err = intent.as_multi_noun().unwrap_err();
        assert!(matches!(
            err,
            EngineError::IntentMismatch {
                expected: IntentKind::MultiNoun,
                found: IntentKind::Move,
            }
        ));
        assert_eq!(
            err.to_string(),
            "intent mismatch: expected multi-noun, found move"
        );
        assert!(Intent::Null.as_simple().is_err());
    }

    #[test]
    fn input_is_rebuilt_when_not_kept() {
        assert_eq!(SimpleIntent::new("look", "").input(), "look");
        assert_eq!(
            MultiNounIntent::new("give", "axe", "to", "troll").input(),
            "give axe to troll"
        );
        assert_eq!(MultiNounIntent::new("offer", "troll", "", "axe").input(), "offer troll axe");
    }

    #[test]
    fn switch_state_reads_verb_or_adverb() {
        assert_eq!(SimpleIntent::new("Turn On", "lamp").switch_state(), Some(true));
        assert_eq!(SimpleIntent::new("extinguish", "lamp").switch_state(), Some(false));
        assert_eq!(
            SimpleIntent::new("switch", "lamp").with_adverb(" OFF ").switch_state(),
            Some(false)
        );
        assert_eq!(SimpleIntent::new("turn", "lamp").switch_state(), None);
        assert_eq!(SimpleIntent::new("take", "lamp").switch_state(), None);
    }

    #[test]
    fn intents_serialize_with_type_tag() {
        let json = serde_json::to_value(Intent::enter("boat")).unwrap();
        assert_eq!(json["type"], "enter_sub_location");
        assert_eq!(json["noun"], "boat");
    }
}
