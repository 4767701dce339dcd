use crate::{FormationEntity, FormationError, FormationLoader, PositionEntity};
use agent_core::{Role, RoleManager};
use log::{debug, info};
use nalgebra::Vector2;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub struct FormationSlot {
    pub role: Role,
    pub lane: String,
}

/// Roles and kick-off positions of a team, read once at startup and shared
/// read-only between agents.
#[derive(Debug, Clone, Default)]
pub struct Formation {
    slots: HashMap<u8, FormationSlot>,
    positions: HashMap<u8, Vector2<f32>>,
}

impl Formation {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, FormationError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| FormationError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let formation = Self::from_json(&json)?;
        info!(
            "formation loaded from {}: {} roles, {} positions",
            path.display(),
            formation.slots.len(),
            formation.positions.len()
        );

        Ok(formation)
    }

    pub fn from_json(json: &str) -> Result<Self, FormationError> {
        Ok(Self::from_entity(FormationLoader::parse(json)?))
    }

    /// The embedded 4-3-3.
    pub fn default_formation() -> Result<Self, FormationError> {
        Ok(Self::from_entity(FormationLoader::load_default()?))
    }

    fn from_entity(entity: FormationEntity) -> Self {
        let slots = entity
            .role
            .into_iter()
            .map(|role| {
                (
                    role.number,
                    FormationSlot {
                        role: Role::from_name(&role.name),
                        lane: role.side,
                    },
                )
            })
            .collect();

        let mut positions = HashMap::new();
        if let Some(set) = entity.data.into_iter().next() {
            for (key, value) in set {
                let Ok(unum) = key.parse::<u8>() else {
                    continue;
                };

                match serde_json::from_value::<PositionEntity>(value) {
                    Ok(position) => {
                        positions.insert(unum, Vector2::new(position.x, position.y));
                    }
                    Err(e) => debug!("skipping position of player {}: {}", unum, e),
                }
            }
        }

        Formation { slots, positions }
    }

    pub fn slot(&self, unum: u8) -> Option<&FormationSlot> {
        self.slots.get(&unum)
    }

    pub fn is_goalie(&self, unum: u8) -> bool {
        self.role(unum).is_goalie()
    }
}

impl RoleManager for Formation {
    fn role(&self, unum: u8) -> Role {
        self.slots
            .get(&unum)
            .map(|slot| slot.role)
            .unwrap_or_default()
    }

    fn initial_position(&self, unum: u8) -> Vector2<f32> {
        self.positions.get(&unum).copied().unwrap_or_else(Vector2::zeros)
    }
}
