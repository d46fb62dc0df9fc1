use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::direction::Direction;
use crate::id::{ItemId, LocationId};
use crate::world::World;

/// A passability rule evaluated when the player tries an exit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "rule")]
pub enum Passage {
    /// Always passable.
    Always,
    /// Never passable (a wall with a story behind it).
    Never,
    /// Passable while the given container (door, hatch) is open.
    WhenOpen {
        /// The door.
        item: ItemId,
    },
    /// Passable while an item flag has the given value.
    WhenFlag {
        /// The item carrying the flag.
        item: ItemId,
        /// Flag key.
        key: String,
        /// Required value.
        value: bool,
    },
}

impl Passage {
    /// Evaluate the rule against the current world.
    pub fn allows(&self, world: &World) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::WhenOpen { item } => world.item(*item).is_some_and(|i| i.is_open()),
            Self::WhenFlag { item, key, value } => {
                world.item(*item).is_some_and(|i| i.flag(key) == *value)
            }
        }
    }
}

/// One way out of a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exit {
    /// Where the exit leads. `None` is a dead end that only produces a message.
    pub destination: Option<LocationId>,
    /// The player may carry at most this much weight through.
    pub weight_limit: Option<u32>,
    /// Shown verbatim when the weight limit is exceeded.
    pub weight_message: String,
    /// Passability rule. `None` is always passable.
    pub passage: Option<Passage>,
    /// Shown when the passage rule fails.
    pub failure_message: Option<String>,
}

impl Exit {
    /// A plain exit to the destination.
    pub fn to(destination: LocationId) -> Self {
        Self {
            destination: Some(destination),
            weight_limit: None,
            weight_message: String::new(),
            passage: None,
            failure_message: None,
        }
    }

    /// Limit how much the player may carry through.
    pub fn with_weight_limit(mut self, limit: u32, message: impl Into<String>) -> Self {
        self.weight_limit = Some(limit);
        self.weight_message = message.into();
        self
    }

    /// Guard the exit with a passage rule.
    pub fn with_passage(mut self, passage: Passage) -> Self {
        self.passage = Some(passage);
        self
    }

    /// Custom text for when the passage rule fails.
    pub fn with_failure(mut self, message: impl Into<String>) -> Self {
        self.failure_message = Some(message.into());
        self
    }
}

/// A place the player can stand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    /// Unique identifier.
    pub id: LocationId,
    /// Display name.
    pub name: String,
    /// Room description.
    pub description: String,
    /// Exits keyed by direction.
    pub exits: BTreeMap<Direction, Exit>,
    /// No natural light.
    pub dark: bool,
    /// Leaving a vessel here is fatal; this is the warning shown instead.
    pub exit_hazard: Option<String>,
    /// Number of times the player has entered.
    pub visit_count: u32,
    pub(crate) items: Vec<ItemId>,
    pub(crate) sub_location: Option<ItemId>,
}

impl Location {
    /// Create a location with a random ID.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(LocationId::new(), name)
    }

    /// Create a location with a pre-assigned ID.
    pub fn with_id(id: LocationId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            exits: BTreeMap::new(),
            dark: false,
            exit_hazard: None,
            visit_count: 0,
            items: Vec::new(),
            sub_location: None,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Add an exit.
    pub fn with_exit(mut self, direction: Direction, exit: Exit) -> Self {
        self.exits.insert(direction, exit);
        self
    }

    /// Make the location dark.
    pub fn dark(mut self) -> Self {
        self.dark = true;
        self
    }

    /// Ban leaving a vessel here, with the warning to show.
    pub fn with_exit_hazard(mut self, message: impl Into<String>) -> Self {
        self.exit_hazard = Some(message.into());
        self
    }

    /// Items placed directly here, in placement order.
    pub fn items(&self) -> &[ItemId] {
        &self.items
    }

    /// The vessel the player occupies here, if any.
    pub fn sub_location(&self) -> Option<ItemId> {
        self.sub_location
    }

    /// The exit in a direction.
    pub fn exit(&self, direction: Direction) -> Option<&Exit> {
        self.exits.get(&direction)
    }
}
