use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A question for the player when a noun fits more than one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disambiguation {
    /// The most distinctive noun of each candidate, in scope order.
    pub candidates: Vec<String>,
    /// Every precise noun of every candidate, mapped to that candidate's
    /// longest precise noun. Replying with any key resolves to its value.
    pub noun_map: BTreeMap<String, String>,
    /// Command template with a `{0}` slot for the chosen noun.
    pub replacement: String,
}

impl Disambiguation {
    /// Turn the player's answer into a full command, if it names a candidate.
    pub fn resolve(&self, answer: &str) -> Option<String> {
        let noun = self.resolve_noun(answer)?;
        Some(self.replacement.replace("{0}", noun))
    }

    /// The candidate noun the player's answer stands for.
    pub fn resolve_noun(&self, answer: &str) -> Option<&str> {
        let answer = answer.trim();
        self.noun_map
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(answer))
            .map(|(_, v)| v.as_str())
    }

    /// The verb of the original command.
    pub fn verb(&self) -> &str {
        self.replacement
            .strip_suffix("{0}")
            .unwrap_or(&self.replacement)
            .trim_end()
    }
}

/// How an interaction ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Outcome {
    /// Something responded. The message is final.
    Happened,
    /// The noun was ambiguous; the player must choose.
    Disambiguation(Disambiguation),
    /// An item matched the noun but nothing understood the verb.
    NoVerbMatch,
    /// Nothing matched the noun.
    NoNounMatch,
}

/// What an interaction produced: narration plus a tag for the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionResult {
    /// Player-facing text.
    pub message: String,
    /// How the interaction ended.
    pub outcome: Outcome,
    /// Whether this interaction costs the player a turn.
    pub consumes_turn: bool,
}

impl InteractionResult {
    /// Something happened.
    pub fn positive(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            outcome: Outcome::Happened,
            consumes_turn: true,
        }
    }

    /// The player must clarify before anything happens. Costs no turn.
    pub fn clarify(message: impl Into<String>) -> Self {
        Self {
            consumes_turn: false,
            ..Self::positive(message)
        }
    }

    /// An item matched but did not understand the verb.
    pub fn no_verb_match() -> Self {
        Self {
            message: String::new(),
            outcome: Outcome::NoVerbMatch,
            consumes_turn: true,
        }
    }

    /// Nothing matched the noun.
    pub fn no_noun_match() -> Self {
        Self {
            message: String::new(),
            outcome: Outcome::NoNounMatch,
            consumes_turn: true,
        }
    }

    /// Ask the player which of several items they meant. Costs no turn.
    pub fn disambiguation(message: impl Into<String>, disambiguation: Disambiguation) -> Self {
        Self {
            message: message.into(),
            outcome: Outcome::Disambiguation(disambiguation),
            consumes_turn: false,
        }
    }

    /// Something responded.
    pub fn is_positive(&self) -> bool {
        matches!(self.outcome, Outcome::Happened)
    }

    /// A noun matched but the verb did not.
    pub fn is_no_verb_match(&self) -> bool {
        matches!(self.outcome, Outcome::NoVerbMatch)
    }

    /// The disambiguation payload, if any.
    pub fn disambiguation_payload(&self) -> Option<&Disambiguation> {
        match &self.outcome {
            Outcome::Disambiguation(d) => Some(d),
            _ => None,
        }
    }

    /// Replace the message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Make sure the message ends with a line break.
    pub fn terminated(mut self) -> Self {
        if !self.message.ends_with('\n') {
            self.message.push('\n');
        }
        self
    }
}

/// Render nouns as "the a, the b or the c".
pub fn list_with_or(nouns: &[String]) -> String {
    let with_article: Vec<String> = nouns.iter().map(|n| format!("the {n}")).collect();
    match with_article.split_last() {
        None => String::new(),
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} or {last}", rest.join(", ")),
    }
}
