use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerSide {
    Left,
    Right,
}

impl PlayerSide {
    /// Accepts the protocol tags `l`/`r` as well as `left`/`right`, ignoring case.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "l" | "left" => Some(PlayerSide::Left),
            "r" | "right" => Some(PlayerSide::Right),
            _ => None,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            PlayerSide::Left => PlayerSide::Right,
            PlayerSide::Right => PlayerSide::Left,
        }
    }

    pub fn tag(self) -> char {
        match self {
            PlayerSide::Left => 'l',
            PlayerSide::Right => 'r',
        }
    }
}

impl Display for PlayerSide {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(PlayerSide::parse("L"), Some(PlayerSide::Left));
        assert_eq!(PlayerSide::parse("right"), Some(PlayerSide::Right));
        assert_eq!(PlayerSide::parse("Right"), Some(PlayerSide::Right));
        assert_eq!(PlayerSide::parse("c"), None);
    }

    #[test]
    fn test_opposite() {
        assert_eq!(PlayerSide::Left.opposite(), PlayerSide::Right);
        assert_eq!(PlayerSide::Right.opposite(), PlayerSide::Left);
    }
}
