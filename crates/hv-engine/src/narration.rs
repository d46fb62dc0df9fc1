//! Narration port: the engine's only asynchronous collaborator.
//!
//! Generated text covers the cases the world model cannot answer by itself:
//! verbs that do nothing, doors that do not exist, flavor on arrival. A
//! client can be switched off, in which case every request falls back to a
//! fixed canonical line so that runs stay deterministic.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::EngineResult;

/// The canonical "you cannot go" line.
pub const CANNOT_GO: &str = "You cannot go that way. ";

/// A request for generated narration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "template")]
pub enum NarrationRequest {
    /// The verb does nothing to the item.
    VerbHasNoEffect {
        /// Where the player is.
        location: String,
        /// The item's noun.
        noun: String,
        /// The verb.
        verb: String,
    },
    /// The verb does nothing to the person.
    VerbHasNoEffectOnPerson {
        /// Where the player is.
        location: String,
        /// The person's noun.
        noun: String,
        /// The verb.
        verb: String,
    },
    /// A two-noun command does nothing.
    MultiNounVerbHasNoEffect {
        /// Where the player is.
        location: String,
        /// The full command as typed.
        input: String,
    },
    /// The noun exists in the story but not here.
    NounNotPresent {
        /// Where the player is.
        location: String,
        /// The noun.
        noun: String,
    },
    /// The command refers to nothing the story knows about.
    CommandHasNoEffect {
        /// Where the player is.
        location: String,
        /// The command as typed.
        input: String,
    },
    /// There is no way out in that direction.
    CannotGoThatWay {
        /// Where the player is.
        location: String,
        /// The direction tried.
        direction: String,
    },
    /// The player tried to board something that is not a vessel.
    CannotBoard {
        /// Where the player is.
        location: String,
        /// The noun.
        noun: String,
    },
    /// The player tried to leave something they cannot leave.
    CannotDisembark {
        /// Where the player is.
        location: String,
        /// The noun.
        noun: String,
    },
    /// Flavor after arriving somewhere.
    AfterEnterLocation {
        /// The new location.
        location: String,
        /// Its description.
        description: String,
    },
}

impl NarrationRequest {
    /// The prompt sent to a generating client.
    pub fn prompt(&self) -> String {
        match self {
            Self::VerbHasNoEffect {
                location,
                noun,
                verb,
            } => format!(
                "The player is in {location} and tried to {verb} the {noun}. Nothing happens. \
                 Describe that in one short, wry sentence."
            ),
            Self::VerbHasNoEffectOnPerson {
                location,
                noun,
                verb,
            } => format!(
                "The player is in {location} and tried to {verb} the {noun}, who is a person. \
                 It has no effect. Describe the reaction in one short sentence."
            ),
            Self::MultiNounVerbHasNoEffect { location, input } => format!(
                "The player is in {location} and typed \"{input}\". Nothing happens. \
                 Say so in one short sentence."
            ),
            Self::NounNotPresent { location, noun } => format!(
                "The player is in {location} and referred to the {noun}, which is not here. \
                 Tell them in one short sentence."
            ),
            Self::CommandHasNoEffect { location, input } => format!(
                "The player is in {location} and typed \"{input}\", which makes no sense here. \
                 Respond in one short sentence."
            ),
            Self::CannotGoThatWay {
                location,
                direction,
            } => format!(
                "The player is in {location} and tried to go {direction}, but there is no way \
                 through. Describe the dead end in one short sentence."
            ),
            Self::CannotBoard { location, noun } => format!(
                "The player is in {location} and tried to climb into the {noun}, which cannot \
                 be boarded. Say so in one short sentence."
            ),
            Self::CannotDisembark { location, noun } => format!(
                "The player is in {location} and tried to get out of the {noun}, but they are \
                 not in it. Say so in one short sentence."
            ),
            Self::AfterEnterLocation {
                location,
                description,
            } => format!(
                "The player just arrived in {location}: {description} \
                 Add one sentence of atmosphere, or nothing."
            ),
        }
    }

    /// Text used when generation is disabled.
    pub fn canonical(&self) -> &'static str {
        match self {
            Self::VerbHasNoEffect { .. }
            | Self::VerbHasNoEffectOnPerson { .. }
            | Self::MultiNounVerbHasNoEffect { .. }
            | Self::AfterEnterLocation { .. } => "",
            Self::NounNotPresent { .. } => "You don't see that here. ",
            Self::CommandHasNoEffect { .. } => "Nothing happens. ",
            Self::CannotGoThatWay { .. }
            | Self::CannotBoard { .. }
            | Self::CannotDisembark { .. } => CANNOT_GO,
        }
    }
}

/// A text generator, typically backed by a language model.
#[async_trait]
pub trait NarrationClient: Send + Sync {
    /// When true the engine never calls [`generate_narration`](Self::generate_narration)
    /// and uses [`NarrationRequest::canonical`] text instead.
    fn is_disabled(&self) -> bool {
        false
    }

    /// Produce narration for a request. `seed` carries context the client
    /// may use to keep its voice consistent; it is empty when there is none.
    async fn generate_narration(&self, request: &NarrationRequest, seed: &str)
    -> EngineResult<String>;
}

/// A client that never generates anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledNarrator;

#[async_trait]
impl NarrationClient for DisabledNarrator {
    fn is_disabled(&self) -> bool {
        true
    }

    async fn generate_narration(
        &self,
        request: &NarrationRequest,
        _seed: &str,
    ) -> EngineResult<String> {
        Ok(request.canonical().to_string())
    }
}

/// A client that answers every request with the same line.
///
/// Useful for hosts running without a model and for exercising the
/// generated branches deterministically.
#[derive(Debug, Clone, Default)]
pub struct FixedNarrator {
    line: String,
}

impl FixedNarrator {
    /// Answer everything with `line`.
    pub fn new(line: impl Into<String>) -> Self {
        Self { line: line.into() }
    }
}

#[async_trait]
impl NarrationClient for FixedNarrator {
    async fn generate_narration(
        &self,
        _request: &NarrationRequest,
        _seed: &str,
    ) -> EngineResult<String> {
        Ok(self.line.clone())
    }
}

/// Ask the client for narration, honoring its disabled flag.
pub async fn narrate(
    client: &dyn NarrationClient,
    request: NarrationRequest,
    seed: &str,
) -> EngineResult<String> {
    if client.is_disabled() {
        return Ok(request.canonical().to_string());
    }
    debug!(prompt = %request.prompt(), "requesting narration");
    client.generate_narration(&request, seed).await
}
