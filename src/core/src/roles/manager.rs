use crate::roles::Role;
use nalgebra::Vector2;

/// Read-only role and formation lookup, loaded once at startup.
pub trait RoleManager: Send + Sync {
    /// Unknown player numbers resolve to the neutral role.
    fn role(&self, unum: u8) -> Role;

    fn initial_position(&self, unum: u8) -> Vector2<f32>;

    fn should_defend(&self, unum: u8) -> bool {
        self.role(unum).is_defensive()
    }

    fn should_attack(&self, unum: u8) -> bool {
        self.role(unum).is_attacking()
    }

    fn formation_zone(&self, unum: u8) -> Vector2<f32> {
        self.initial_position(unum)
    }
}
