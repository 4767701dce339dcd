use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

pub(crate) const DEFAULT_FORMATION_JSON: &str = include_str!("data/formation.json");

#[derive(Debug, Deserialize)]
pub struct FormationEntity {
    #[serde(default)]
    pub role: Vec<RoleEntity>,
    /// Position sets; only the first one is used. Keys are player numbers,
    /// anything else (such as a set name) is ignored.
    #[serde(default)]
    pub data: Vec<BTreeMap<String, Value>>,
}

#[derive(Debug, Deserialize)]
pub struct RoleEntity {
    pub number: u8,
    pub name: String,
    /// Lane on the pitch: C, L or R.
    #[serde(default)]
    pub side: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PositionEntity {
    pub x: f32,
    pub y: f32,
}

pub struct FormationLoader;

impl FormationLoader {
    pub fn parse(json: &str) -> Result<FormationEntity, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn load_default() -> Result<FormationEntity, serde_json::Error> {
        Self::parse(DEFAULT_FORMATION_JSON)
    }
}
