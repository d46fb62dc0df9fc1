use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::{ItemId, LocationId};

/// A flexible metadata value for content-defined item state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    /// A text value.
    String(String),
    /// A 64-bit signed integer value.
    Integer(i64),
    /// A boolean value.
    Boolean(bool),
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{s}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Boolean(b) => write!(f, "{b}"),
        }
    }
}

/// The single owner of an item at any moment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "id")]
pub enum Holder {
    /// Out of play: eaten, destroyed, or not yet revealed.
    #[default]
    Nowhere,
    /// Carried by the player.
    Player,
    /// Inside (or held by) another item.
    Item(ItemId),
    /// Placed directly in a location.
    Location(LocationId),
}

/// Weight and pickup rules for items the player can carry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Takeable {
    /// Contribution to the player's carrying weight.
    pub weight: u32,
}

/// Something other items can be put into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Container {
    /// Whether the lid (or door, or flap) is currently open.
    pub open: bool,
    /// Whether the player can open and close it.
    pub openable: bool,
    /// Contents stay visible while closed.
    pub transparent: bool,
    /// Maximum total weight of contents. `None` means unlimited.
    pub capacity: Option<u32>,
}

impl Default for Container {
    fn default() -> Self {
        Self {
            open: true,
            openable: false,
            transparent: false,
            capacity: None,
        }
    }
}

/// A person or creature. Verbs that do nothing get person-flavored narration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Person {
    /// Extra nouns the player may use to address this person ("monster").
    pub aliases: Vec<String>,
}

/// Anything that lights up a dark room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightSource {
    /// Whether it currently gives off light.
    pub lit: bool,
    /// Whether the player can turn it on and off.
    pub switchable: bool,
}

/// A nested, boardable container such as a boat.
///
/// Inflatable vessels start as a shapeless pile on the ground and must be
/// inflated before anyone can climb in. Sharp objects puncture them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vessel {
    /// Needs inflating before use.
    pub inflatable: bool,
    /// Currently inflated.
    pub inflated: bool,
    /// Has a hole in it.
    pub punctured: bool,
    /// Name when usable ("magic boat").
    pub vessel_name: String,
    /// Name while deflated ("pile of plastic").
    pub ground_name: String,
    /// Name once holed ("punctured boat").
    pub punctured_name: String,
}

impl Vessel {
    /// A rigid vessel that is always ready to board.
    pub fn rigid(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            inflatable: false,
            inflated: true,
            punctured: false,
            vessel_name: name.clone(),
            ground_name: name.clone(),
            punctured_name: name,
        }
    }

    /// An inflatable vessel, initially deflated on the ground.
    pub fn inflatable(
        vessel_name: impl Into<String>,
        ground_name: impl Into<String>,
        punctured_name: impl Into<String>,
    ) -> Self {
        Self {
            inflatable: true,
            inflated: false,
            punctured: false,
            vessel_name: vessel_name.into(),
            ground_name: ground_name.into(),
            punctured_name: punctured_name.into(),
        }
    }

    /// Can be boarded right now.
    pub fn is_ready(&self) -> bool {
        !self.punctured && (!self.inflatable || self.inflated)
    }
}

/// Optional capability records. An item is whatever its records say it is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Capabilities {
    /// Can be picked up.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub takeable: Option<Takeable>,
    /// Refusal shown when the player tries to take a fixed item.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cannot_take_message: Option<String>,
    /// Can hold other items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<Container>,
    /// Text shown on examination. Falls back to the description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub examine_text: Option<String>,
    /// Is a person or creature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person: Option<Person>,
    /// Gives off light.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub light: Option<LightSource>,
    /// Can be boarded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vessel: Option<Vessel>,
    /// Usable in combat.
    #[serde(default)]
    pub weapon: bool,
    /// Punctures inflatable things.
    #[serde(default)]
    pub pointy: bool,
}

/// A thing in the world.
///
/// Items are never deleted. An item that is eaten or destroyed moves to
/// [`Holder::Nowhere`] or is marked hidden, so the arena always holds the
/// full cast. The holder and child list are owned by
/// [`World`](crate::world::World), which keeps both sides in step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Description shown in room listings.
    pub description: String,
    /// Every surface form that resolves to this item.
    pub nouns: Vec<String>,
    /// Nouns distinctive enough for disambiguation. `None` means all of [`Item::nouns`].
    pub precise_nouns: Option<Vec<String>>,
    /// Capability records.
    pub capabilities: Capabilities,
    /// Out of sight and out of reach while set.
    pub hidden: bool,
    /// Reachable even in the dark (the player's own hands, for instance).
    pub always_in_scope: bool,
    /// Content-defined state.
    pub properties: HashMap<String, MetadataValue>,
    pub(crate) holder: Holder,
    pub(crate) contents: Vec<ItemId>,
}

impl Item {
    /// Create an item with a random ID, known by the given nouns.
    pub fn new(name: impl Into<String>, nouns: &[&str]) -> Self {
        Self::with_id(ItemId::new(), name, nouns)
    }

    /// Create an item with a pre-assigned ID.
    pub fn with_id(id: ItemId, name: impl Into<String>, nouns: &[&str]) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            nouns: nouns.iter().map(|n| n.to_string()).collect(),
            precise_nouns: None,
            capabilities: Capabilities::default(),
            hidden: false,
            always_in_scope: false,
            properties: HashMap::new(),
            holder: Holder::Nowhere,
            contents: Vec::new(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Restrict disambiguation to the given nouns.
    pub fn with_precise_nouns(mut self, nouns: &[&str]) -> Self {
        self.precise_nouns = Some(nouns.iter().map(|n| n.to_string()).collect());
        self
    }

    /// Replace the capability records.
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Make the item takeable with the given weight.
    pub fn takeable(mut self, weight: u32) -> Self {
        self.capabilities.takeable = Some(Takeable { weight });
        self
    }

    /// Mark the item as a weapon.
    pub fn weapon(mut self) -> Self {
        self.capabilities.weapon = true;
        self
    }

    /// Mark the item as sharp.
    pub fn pointy(mut self) -> Self {
        self.capabilities.pointy = true;
        self
    }

    /// Give the item a container record.
    pub fn container(mut self, container: Container) -> Self {
        self.capabilities.container = Some(container);
        self
    }

    /// Give the item a light source record.
    pub fn light(mut self, lit: bool, switchable: bool) -> Self {
        self.capabilities.light = Some(LightSource { lit, switchable });
        self
    }

    /// Mark the item as a person, addressable by extra aliases.
    pub fn person(mut self, aliases: &[&str]) -> Self {
        self.capabilities.person = Some(Person {
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
        });
        self
    }

    /// Give the item a vessel record.
    pub fn vessel(mut self, vessel: Vessel) -> Self {
        self.capabilities.vessel = Some(vessel);
        self
    }

    /// Current owner.
    pub fn holder(&self) -> Holder {
        self.holder
    }

    /// Direct children, in placement order.
    pub fn contents(&self) -> &[ItemId] {
        &self.contents
    }

    /// Case-insensitive match against every noun.
    pub fn matches_noun(&self, noun: &str) -> bool {
        let noun = noun.trim();
        !noun.is_empty() && self.nouns.iter().any(|n| n.eq_ignore_ascii_case(noun))
    }

    /// Case-insensitive match against the precise nouns only.
    pub fn matches_precise_noun(&self, noun: &str) -> bool {
        let noun = noun.trim();
        !noun.is_empty() && self.precise().iter().any(|n| n.eq_ignore_ascii_case(noun))
    }

    /// Matches the noun directly or through a person alias.
    pub fn answers_to(&self, noun: &str) -> bool {
        self.matches_noun(noun)
            || self
                .capabilities
                .person
                .as_ref()
                .is_some_and(|p| p.aliases.iter().any(|a| a.eq_ignore_ascii_case(noun.trim())))
    }

    /// The nouns usable in a disambiguation prompt.
    pub fn precise(&self) -> &[String] {
        self.precise_nouns.as_deref().unwrap_or(&self.nouns)
    }

    /// The most distinctive (longest) matching noun.
    pub fn longest_noun(&self) -> &str {
        longest(&self.nouns).unwrap_or(&self.name)
    }

    /// The most distinctive (longest) precise noun.
    pub fn longest_precise_noun(&self) -> &str {
        longest(self.precise()).unwrap_or(&self.name)
    }

    /// Can be picked up.
    pub fn is_takeable(&self) -> bool {
        self.capabilities.takeable.is_some()
    }

    /// Weight toward the player's load. Fixed items weigh nothing.
    pub fn weight(&self) -> u32 {
        self.capabilities
            .takeable
            .as_ref()
            .map(|t| t.weight)
            .unwrap_or(0)
    }

    /// Has a container record.
    pub fn is_container(&self) -> bool {
        self.capabilities.container.is_some()
    }

    /// Is a container whose contents can be reached.
    pub fn is_open(&self) -> bool {
        self.capabilities.container.as_ref().is_some_and(|c| c.open)
    }

    /// Contents can be seen even while closed.
    pub fn is_transparent(&self) -> bool {
        self.capabilities
            .container
            .as_ref()
            .is_some_and(|c| c.transparent)
    }

    /// Contents are visible: open or transparent.
    pub fn exposes_contents(&self) -> bool {
        self.is_open() || self.is_transparent()
    }

    /// Usable as a weapon.
    pub fn is_weapon(&self) -> bool {
        self.capabilities.weapon
    }

    /// Sharp enough to puncture things.
    pub fn is_pointy(&self) -> bool {
        self.capabilities.pointy
    }

    /// Can be boarded as a sub-location.
    pub fn is_vessel(&self) -> bool {
        self.capabilities.vessel.is_some()
    }

    /// Is a light source of any kind.
    pub fn is_light_source(&self) -> bool {
        self.capabilities.light.is_some()
    }

    /// Is currently giving off light.
    pub fn is_lit(&self) -> bool {
        self.capabilities.light.as_ref().is_some_and(|l| l.lit)
    }

    /// Is a light source the player can switch.
    pub fn is_switchable_light(&self) -> bool {
        self.capabilities
            .light
            .as_ref()
            .is_some_and(|l| l.switchable)
    }

    /// Is a person or creature.
    pub fn is_person(&self) -> bool {
        self.capabilities.person.is_some()
    }

    /// Read a boolean property. Missing keys read as `false`.
    pub fn flag(&self, key: &str) -> bool {
        matches!(self.properties.get(key), Some(MetadataValue::Boolean(true)))
    }

    /// Set a boolean property.
    pub fn set_flag(&mut self, key: impl Into<String>, value: bool) {
        self.properties
            .insert(key.into(), MetadataValue::Boolean(value));
    }

    /// Read an integer property.
    pub fn counter(&self, key: &str) -> Option<i64> {
        match self.properties.get(key) {
            Some(MetadataValue::Integer(n)) => Some(*n),
            _ => None,
        }
    }

    /// Set an integer property.
    pub fn set_counter(&mut self, key: impl Into<String>, value: i64) {
        self.properties
            .insert(key.into(), MetadataValue::Integer(value));
    }
}

fn longest(nouns: &[String]) -> Option<&str> {
    // First of the longest wins so the choice is stable.
    nouns
        .iter()
        .fold(None::<&String>, |best, n| match best {
            Some(b) if b.len() >= n.len() => Some(b),
            _ => Some(n),
        })
        .map(String::as_str)
}
