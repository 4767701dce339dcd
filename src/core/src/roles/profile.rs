use crate::roles::{Role, RoleGroup};

/// Per-role behaviour parameters, fixed when an engine is built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoleProfile {
    /// Inside this ball distance the approach slows down to keep control.
    pub approach_distance: f32,
    /// Farthest goal distance this role will shoot from.
    pub shoot_distance: f32,
    /// Farthest ball distance this role will chase.
    pub chase_distance: f32,
    /// Potential-field pull toward the target.
    pub attraction: f32,
    /// Constant pull toward the opponent goal while approaching.
    pub goal_bias: f32,
}

impl RoleProfile {
    pub fn for_role(role: Role) -> Self {
        Self::for_group(role.group())
    }

    pub fn for_group(group: RoleGroup) -> Self {
        match group {
            RoleGroup::Goalkeeper => RoleProfile {
                approach_distance: 5.0,
                shoot_distance: 0.0,
                chase_distance: 15.0,
                attraction: 20.0,
                goal_bias: 0.0,
            },
            RoleGroup::Defender => RoleProfile {
                approach_distance: 3.5,
                shoot_distance: 25.0,
                chase_distance: 20.0,
                attraction: 40.0,
                goal_bias: 0.0,
            },
            RoleGroup::Midfielder => RoleProfile {
                approach_distance: 2.5,
                shoot_distance: 35.0,
                chase_distance: 30.0,
                attraction: 60.0,
                goal_bias: 0.0,
            },
            RoleGroup::Forward => RoleProfile {
                approach_distance: 2.0,
                shoot_distance: 45.0,
                chase_distance: 40.0,
                attraction: 100.0,
                goal_bias: 10.0,
            },
        }
    }
}

impl Default for RoleProfile {
    fn default() -> Self {
        Self::for_role(Role::default())
    }
}
