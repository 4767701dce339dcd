use crate::utils::polar_to_cartesian;
use crate::world::{PlayMode, PlayerSide};
use nalgebra::Vector2;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BallSighting {
    pub x: f32,
    pub y: f32,
    pub dist: f32,
    pub dir: f32,
}

impl BallSighting {
    pub fn from_polar(dist: f32, dir: f32) -> Self {
        let position = polar_to_cartesian(dist, dir);
        BallSighting {
            x: position.x,
            y: position.y,
            dist,
            dir,
        }
    }

    pub fn position(&self) -> Vector2<f32> {
        Vector2::new(self.x, self.y)
    }

    pub fn is_valid(&self) -> bool {
        is_valid_sighting(self.dist, self.dir, self.x, self.y)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerSighting {
    pub side: PlayerSide,
    pub unum: Option<u8>,
    pub goalie: bool,
    pub x: f32,
    pub y: f32,
    pub dist: f32,
    pub dir: f32,
}

impl PlayerSighting {
    pub fn from_polar(side: PlayerSide, unum: Option<u8>, dist: f32, dir: f32) -> Self {
        let position = polar_to_cartesian(dist, dir);
        PlayerSighting {
            side,
            unum,
            goalie: false,
            x: position.x,
            y: position.y,
            dist,
            dir,
        }
    }

    pub fn with_goalie(mut self, goalie: bool) -> Self {
        self.goalie = goalie;
        self
    }

    pub fn position(&self) -> Vector2<f32> {
        Vector2::new(self.x, self.y)
    }

    pub fn is_valid(&self) -> bool {
        is_valid_sighting(self.dist, self.dir, self.x, self.y)
    }
}

/// A sighting of one goal (either post group) by side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GoalSighting {
    pub side: PlayerSide,
    pub dist: f32,
    pub dir: f32,
}

impl GoalSighting {
    pub fn new(side: PlayerSide, dist: f32, dir: f32) -> Self {
        GoalSighting { side, dist, dir }
    }

    pub fn position(&self) -> Vector2<f32> {
        polar_to_cartesian(self.dist, self.dir)
    }

    pub fn is_valid(&self) -> bool {
        self.dist.is_finite() && self.dist >= 0.0 && self.dir.is_finite()
    }
}

/// Absolute pose on the pitch. Only present when something outside the core provides it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Pose {
    pub x: f32,
    pub y: f32,
    /// Body direction in degrees, 0 facing +x.
    pub body: f32,
}

impl Pose {
    pub fn origin() -> Self {
        Pose {
            x: 0.0,
            y: 0.0,
            body: 0.0,
        }
    }

    pub fn position(&self) -> Vector2<f32> {
        Vector2::new(self.x, self.y)
    }

    /// Maps a self-relative vector into this pose's frame.
    pub fn to_frame(&self, relative: &Vector2<f32>) -> Vector2<f32> {
        let (sin, cos) = self.body.to_radians().sin_cos();
        Vector2::new(
            self.x + relative.x * cos - relative.y * sin,
            self.y + relative.x * sin + relative.y * cos,
        )
    }
}

/// One structured sensory snapshot, as produced by the message parser.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Observation {
    pub time: Option<u32>,
    pub ball: Option<BallSighting>,
    pub players: Vec<PlayerSighting>,
    pub goals: Vec<GoalSighting>,
    pub referee_mode: Option<PlayMode>,
    pub stamina: Option<f32>,
    pub self_pose: Option<Pose>,
}

impl Observation {
    pub fn at(time: u32) -> Self {
        Observation {
            time: Some(time),
            ..Default::default()
        }
    }

    pub fn with_ball(mut self, dist: f32, dir: f32) -> Self {
        self.ball = Some(BallSighting::from_polar(dist, dir));
        self
    }

    pub fn with_player(mut self, side: PlayerSide, unum: Option<u8>, dist: f32, dir: f32) -> Self {
        self.players
            .push(PlayerSighting::from_polar(side, unum, dist, dir));
        self
    }

    pub fn with_goal(mut self, side: PlayerSide, dist: f32, dir: f32) -> Self {
        self.goals.push(GoalSighting::new(side, dist, dir));
        self
    }

    pub fn with_referee_mode(mut self, mode: PlayMode) -> Self {
        self.referee_mode = Some(mode);
        self
    }

    pub fn with_stamina(mut self, stamina: f32) -> Self {
        self.stamina = Some(stamina);
        self
    }

    pub fn with_pose(mut self, pose: Pose) -> Self {
        self.self_pose = Some(pose);
        self
    }
}

fn is_valid_sighting(dist: f32, dir: f32, x: f32, y: f32) -> bool {
    dist.is_finite() && dist >= 0.0 && dir.is_finite() && x.is_finite() && y.is_finite()
}
