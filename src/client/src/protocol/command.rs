use agent_core::ActionIntent;
use std::fmt::{Display, Formatter};

/// Outgoing player command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Init { team: String, version: u32, goalie: bool },
    Move { x: f32, y: f32 },
    Turn(f32),
    Dash(f32),
    Kick { power: f32, direction: f32 },
    Bye,
}

impl Command {
    /// Commands for one tick, in turn, dash, kick order. Zero turns and dashes
    /// are left out; a tick with nothing to do still sends `(turn 0.0)`.
    pub fn from_intent(intent: &ActionIntent) -> Vec<Command> {
        let mut commands = Vec::with_capacity(3);

        if intent.turn != 0.0 {
            commands.push(Command::Turn(intent.turn));
        }

        if intent.dash != 0.0 {
            commands.push(Command::Dash(intent.dash));
        }

        if let Some(kick) = intent.kick {
            commands.push(Command::Kick {
                power: kick.power,
                direction: kick.direction,
            });
        }

        if commands.is_empty() {
            commands.push(Command::Turn(0.0));
        }

        commands
    }
}

impl Display for Command {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::Init {
                team,
                version,
                goalie,
            } => {
                write!(f, "(init {} (version {})", team, version)?;
                if *goalie {
                    write!(f, " (goalie)")?;
                }
                write!(f, ")")
            }
            Command::Move { x, y } => write!(f, "(move {:.1} {:.1})", x, y),
            Command::Turn(moment) => write!(f, "(turn {:.1})", moment),
            Command::Dash(power) => write!(f, "(dash {:.1})", power),
            Command::Kick { power, direction } => write!(f, "(kick {:.1} {:.1})", power, direction),
            Command::Bye => write!(f, "(bye)"),
        }
    }
}
