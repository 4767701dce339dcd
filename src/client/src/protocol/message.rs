use crate::ParseError;
use crate::protocol::SExpr;
use agent_core::{Observation, PlayMode, PlayerSide, PlayerSighting};
use log::trace;

#[derive(Debug, Clone, PartialEq)]
pub enum ServerMessage {
    Init {
        side: PlayerSide,
        unum: u8,
        play_mode: PlayMode,
    },
    See(Observation),
    SenseBody {
        time: u32,
        stamina: Option<f32>,
    },
    Referee {
        time: u32,
        play_mode: PlayMode,
    },
    Error(String),
    /// Anything the agent does not react to, by head name.
    Other(String),
}

/// Turns raw server text into [`ServerMessage`]s for one player. Seen players
/// are resolved to a side by comparing their team name with ours.
#[derive(Debug, Clone)]
pub struct MessageParser {
    team: String,
    side: PlayerSide,
}

impl MessageParser {
    pub fn new(team: impl Into<String>, side: PlayerSide) -> Self {
        MessageParser {
            team: team.into(),
            side,
        }
    }

    pub fn set_side(&mut self, side: PlayerSide) {
        self.side = side;
    }

    pub fn parse(&self, raw: &str) -> Result<ServerMessage, ParseError> {
        let expr = SExpr::parse(raw)?;
        let items = expr.as_list().ok_or(ParseError::Missing {
            message: "message",
            field: "list",
        })?;

        match expr.head() {
            Some("init") => Self::parse_init(items),
            Some("see") => self.parse_see(items).map(ServerMessage::See),
            Some("sense_body") => Self::parse_sense_body(items),
            Some("hear") => Self::parse_hear(items),
            Some("error") => Ok(ServerMessage::Error(
                items.get(1).and_then(SExpr::as_atom).unwrap_or_default().to_string(),
            )),
            Some(head) => Ok(ServerMessage::Other(head.to_string())),
            None => Err(ParseError::Missing {
                message: "message",
                field: "head",
            }),
        }
    }

    /// `(init SIDE UNUM PLAYMODE)`
    fn parse_init(items: &[SExpr]) -> Result<ServerMessage, ParseError> {
        let side_atom = atom(items, 1, "init", "side")?;
        let side = PlayerSide::parse(side_atom).ok_or_else(|| invalid("init", "side", side_atom))?;

        let unum_atom = atom(items, 2, "init", "unum")?;
        let unum = unum_atom
            .parse::<u8>()
            .map_err(|_| invalid("init", "unum", unum_atom))?;

        let play_mode = items
            .get(3)
            .and_then(SExpr::as_atom)
            .map(PlayMode::parse)
            .unwrap_or_default();

        Ok(ServerMessage::Init {
            side,
            unum,
            play_mode,
        })
    }

    /// `(see TIME (OBJNAME DIST DIR ...) ...)`
    fn parse_see(&self, items: &[SExpr]) -> Result<Observation, ParseError> {
        let time = time(items, "see")?;
        let mut observation = Observation::at(time);

        for object in items.iter().skip(2).filter_map(SExpr::as_list) {
            let Some(name) = object.first().and_then(SExpr::as_list) else {
                continue;
            };

            // Objects reported with a direction only carry no distance.
            let (Some(dist), Some(dir)) = (
                object.get(1).and_then(SExpr::as_f32),
                object.get(2).and_then(SExpr::as_f32),
            ) else {
                continue;
            };

            match name.first().and_then(SExpr::as_atom) {
                Some("b" | "ball" | "B" | "Ball") => observation = observation.with_ball(dist, dir),
                Some("p" | "player") => {
                    if let Some(player) = self.parse_player(name, dist, dir) {
                        observation.players.push(player);
                    }
                }
                Some("g" | "goal") => {
                    if let Some(side) = name.get(1).and_then(SExpr::as_atom).and_then(PlayerSide::parse) {
                        observation = observation.with_goal(side, dist, dir);
                    }
                }
                other => trace!("ignoring seen object {:?}", other),
            }
        }

        Ok(observation)
    }

    /// `(p "TEAM" UNUM [goalie])`; players without a team name are skipped.
    fn parse_player(&self, name: &[SExpr], dist: f32, dir: f32) -> Option<PlayerSighting> {
        let team = name.get(1)?.as_atom()?;

        let side = if team == self.team {
            self.side
        } else {
            self.side.opposite()
        };

        let unum = name.get(2).and_then(SExpr::as_atom).and_then(|unum| unum.parse::<u8>().ok());
        let goalie = name.iter().skip(3).any(|item| item.as_atom() == Some("goalie"));

        Some(PlayerSighting::from_polar(side, unum, dist, dir).with_goalie(goalie))
    }

    /// `(sense_body TIME ... (stamina STAMINA EFFORT CAPACITY) ...)`
    fn parse_sense_body(items: &[SExpr]) -> Result<ServerMessage, ParseError> {
        let time = time(items, "sense_body")?;

        let stamina = items
            .iter()
            .skip(2)
            .filter_map(SExpr::as_list)
            .find(|entry| entry.first().and_then(SExpr::as_atom) == Some("stamina"))
            .and_then(|entry| entry.get(1))
            .and_then(SExpr::as_f32);

        Ok(ServerMessage::SenseBody { time, stamina })
    }

    /// `(hear TIME SENDER MESSAGE)`; only the referee matters.
    fn parse_hear(items: &[SExpr]) -> Result<ServerMessage, ParseError> {
        let time = time(items, "hear")?;

        match items.get(2).and_then(SExpr::as_atom) {
            Some("referee") => {
                let mode = atom(items, 3, "hear", "play mode")?;
                Ok(ServerMessage::Referee {
                    time,
                    play_mode: PlayMode::parse(mode),
                })
            }
            _ => Ok(ServerMessage::Other(String::from("hear"))),
        }
    }
}

fn atom<'a>(
    items: &'a [SExpr],
    index: usize,
    message: &'static str,
    field: &'static str,
) -> Result<&'a str, ParseError> {
    items
        .get(index)
        .and_then(SExpr::as_atom)
        .ok_or(ParseError::Missing { message, field })
}

fn time(items: &[SExpr], message: &'static str) -> Result<u32, ParseError> {
    let value = atom(items, 1, message, "time")?;
    value.parse().map_err(|_| invalid(message, "time", value))
}

fn invalid(message: &'static str, field: &'static str, value: &str) -> ParseError {
    ParseError::Invalid {
        message,
        field,
        value: value.to_string(),
    }
}
