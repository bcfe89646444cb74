use crate::Error;

use rand::Rng;
use serde::Deserialize;

use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pokemon {
    pub id: Id,
    pub name: String,
    /// Height in decimetres.
    pub height: u32,
    /// Weight in hectograms.
    pub weight: u32,
    pub types: Vec<Type>,
    pub abilities: Vec<Ability>,
    pub stats: Vec<Stat>,
    pub sprites: Sprites,
}

impl Pokemon {
    /// Decodes and validates a PokéAPI `pokemon` resource.
    pub fn parse(body: &[u8]) -> Result<Self, Error> {
        let response: Response = serde_json::from_slice(body)?;

        Self::try_from(response)
    }

    pub fn height_in_meters(&self) -> f64 {
        f64::from(self.height) / 10.0
    }

    pub fn weight_in_kilograms(&self) -> f64 {
        f64::from(self.weight) / 10.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Id(u32);

impl Id {
    pub fn new(id: u32) -> Option<Self> {
        (id > 0).then_some(Self(id))
    }

    /// Draws an id uniformly from `1..=max`.
    pub fn random(rng: &mut impl Rng, max: u32) -> Self {
        Self(rng.random_range(1..=max.max(1)))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Draws `count` independent random ids. Duplicates are kept.
pub fn random_ids(count: usize, max: u32) -> Vec<Id> {
    let mut rng = rand::rng();

    (0..count).map(|_| Id::random(&mut rng, max)).collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Id(Id),
    Name(Name),
}

impl Query {
    pub fn parse(query: &str) -> Result<Self, Error> {
        let query = query.trim();

        if query.is_empty() {
            return Err(Error::InvalidQuery(query.to_owned()));
        }

        if query.chars().all(|c| c.is_ascii_digit()) {
            return query
                .parse()
                .ok()
                .and_then(Id::new)
                .map(Query::Id)
                .ok_or_else(|| Error::InvalidQuery(query.to_owned()));
        }

        if !query.chars().all(|c| c.is_alphanumeric() || c == '-') {
            return Err(Error::InvalidQuery(query.to_owned()));
        }

        Ok(Query::Name(Name(query.to_lowercase())))
    }
}

/// A lowercase Pokémon name, only built by [`Query::parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name(String);

impl Name {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<Id> for Query {
    fn from(id: Id) -> Self {
        Query::Id(id)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Query::Id(id) => id.fmt(f),
            Query::Name(name) => f.write_str(name.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Type {
    pub slot: u8,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ability {
    pub slot: u8,
    pub name: String,
    pub is_hidden: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stat {
    pub name: String,
    pub base_value: u8,
}

impl Stat {
    pub const MAX: u8 = u8::MAX;

    /// Share of the maximum base stat, in `0.0..=100.0`.
    pub fn percentage(&self) -> f32 {
        f32::from(self.base_value) / f32::from(Self::MAX) * 100.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sprites {
    variants: BTreeMap<String, Option<String>>,
}

impl Sprites {
    pub fn get(&self, variant: &str) -> Option<&str> {
        self.variants.get(variant)?.as_deref()
    }

    pub fn front_default(&self) -> Option<&str> {
        self.get("front_default")
    }
}

impl FromIterator<(String, Option<String>)> for Sprites {
    fn from_iter<T: IntoIterator<Item = (String, Option<String>)>>(iter: T) -> Self {
        Self {
            variants: BTreeMap::from_iter(iter),
        }
    }
}

#[derive(Deserialize)]
struct Response {
    id: u32,
    name: String,
    height: u32,
    weight: u32,
    types: Vec<TypeSlot>,
    #[serde(default)]
    abilities: Vec<AbilitySlot>,
    stats: Vec<StatSlot>,
    sprites: BTreeMap<String, serde_json::Value>,
}

#[derive(Deserialize)]
struct NamedResource {
    name: String,
}

#[derive(Deserialize)]
struct TypeSlot {
    slot: u8,
    #[serde(rename = "type")]
    kind: NamedResource,
}

#[derive(Deserialize)]
struct AbilitySlot {
    slot: u8,
    is_hidden: bool,
    ability: NamedResource,
}

#[derive(Deserialize)]
struct StatSlot {
    base_stat: u8,
    stat: NamedResource,
}

impl TryFrom<Response> for Pokemon {
    type Error = Error;

    fn try_from(response: Response) -> Result<Self, Error> {
        let Some(id) = Id::new(response.id) else {
            return Err(Error::InvalidRecord("id must be positive".to_owned()));
        };

        if response.name.is_empty() {
            return Err(Error::InvalidRecord(format!("pokémon #{id} has no name")));
        }

        let mut types: Vec<_> = response
            .types
            .into_iter()
            .map(|slot| Type {
                slot: slot.slot,
                name: slot.kind.name,
            })
            .collect();
        types.sort_by_key(|kind| kind.slot);

        let mut abilities: Vec<_> = response
            .abilities
            .into_iter()
            .map(|slot| Ability {
                slot: slot.slot,
                name: slot.ability.name,
                is_hidden: slot.is_hidden,
            })
            .collect();
        abilities.sort_by_key(|ability| ability.slot);

        let stats = response
            .stats
            .into_iter()
            .map(|slot| Stat {
                name: slot.stat.name,
                base_value: slot.base_stat,
            })
            .collect();

        // Nested objects (`other`, `versions`) are not sprite URLs
        let sprites = response
            .sprites
            .into_iter()
            .filter_map(|(variant, value)| match value {
                serde_json::Value::String(url) => Some((variant, Some(url))),
                serde_json::Value::Null => Some((variant, None)),
                _ => None,
            })
            .collect();

        Ok(Pokemon {
            id,
            name: response.name,
            height: response.height,
            weight: response.weight,
            types,
            abilities,
            stats,
            sprites,
        })
    }
}
