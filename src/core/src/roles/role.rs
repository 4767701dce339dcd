use serde::Serialize;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Role {
    Goalie,
    CenterBack,
    SideBack,
    #[default]
    Midfielder,
    Forward,
    CenterForward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RoleGroup {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

impl Role {
    /// Unknown names fall back to the neutral midfielder role.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "goalie" | "goalkeeper" => Role::Goalie,
            "centerback" | "center_back" => Role::CenterBack,
            "sideback" | "side_back" => Role::SideBack,
            "midfielder" => Role::Midfielder,
            "forward" => Role::Forward,
            "centerforward" | "center_forward" => Role::CenterForward,
            _ => Role::Midfielder,
        }
    }

    pub fn group(&self) -> RoleGroup {
        match self {
            Role::Goalie => RoleGroup::Goalkeeper,
            Role::CenterBack | Role::SideBack => RoleGroup::Defender,
            Role::Midfielder => RoleGroup::Midfielder,
            Role::Forward | Role::CenterForward => RoleGroup::Forward,
        }
    }

    pub fn is_goalie(&self) -> bool {
        *self == Role::Goalie
    }

    pub fn is_defensive(&self) -> bool {
        matches!(self.group(), RoleGroup::Goalkeeper | RoleGroup::Defender)
    }

    pub fn is_attacking(&self) -> bool {
        matches!(self.group(), RoleGroup::Midfielder | RoleGroup::Forward)
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Role::Goalie => "Goalie",
            Role::CenterBack => "CenterBack",
            Role::SideBack => "SideBack",
            Role::Midfielder => "Midfielder",
            Role::Forward => "Forward",
            Role::CenterForward => "CenterForward",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(Role::from_name("Goalie"), Role::Goalie);
        assert_eq!(Role::from_name("CenterBack"), Role::CenterBack);
        assert_eq!(Role::from_name("centerforward"), Role::CenterForward);
        assert_eq!(Role::from_name("Libero"), Role::Midfielder);
    }

    #[test]
    fn test_groups() {
        assert_eq!(Role::SideBack.group(), RoleGroup::Defender);
        assert_eq!(Role::CenterForward.group(), RoleGroup::Forward);
        assert!(Role::Goalie.is_defensive());
        assert!(!Role::Goalie.is_attacking());
        assert!(Role::Midfielder.is_attacking());
    }

    #[test]
    fn test_display_matches_formation_names() {
        for role in [
            Role::Goalie,
            Role::CenterBack,
            Role::SideBack,
            Role::Midfielder,
            Role::Forward,
            Role::CenterForward,
        ] {
            assert_eq!(Role::from_name(&role.to_string()), role);
        }
    }
}
