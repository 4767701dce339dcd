use crate::protocol::{Command, MessageParser, ServerMessage};
use crate::{ClientConfig, ClientError, Connection, PROTOCOL_VERSION, TickLogger, TickRecord};
use agent_core::{
    ActionIntent, ActionPolicy, DecisionStrategy, EngineConfig, PlayMode, PlayerSide, RoleManager,
    StrategySelector, WorldModel,
};
use formation::Formation;
use log::{debug, error, info, trace, warn};
use nalgebra::Vector2;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

/// What a player does in answer to one server message.
#[derive(Debug, Clone, PartialEq)]
pub enum Reaction {
    /// Decision tick: send the intent and log it.
    Act(ActionIntent),
    Send(Vec<Command>),
    /// The match is over.
    Finish,
    Wait,
}

/// Network-free half of an agent: applies messages to the world model and
/// runs the strategy.
pub struct Player {
    world: WorldModel,
    strategy: Box<dyn DecisionStrategy>,
    home: Vector2<f32>,
}

impl Player {
    pub fn new(world: WorldModel, strategy: Box<dyn DecisionStrategy>, home: Vector2<f32>) -> Self {
        Player {
            world,
            strategy,
            home,
        }
    }

    pub fn world(&self) -> &WorldModel {
        &self.world
    }

    pub fn strategy(&self) -> &dyn DecisionStrategy {
        self.strategy.as_ref()
    }

    pub fn home_move(&self) -> Command {
        Command::Move {
            x: self.home.x,
            y: self.home.y,
        }
    }

    pub fn react(&mut self, message: ServerMessage) -> Reaction {
        match message {
            ServerMessage::See(observation) => {
                self.world.absorb(&observation);
                Reaction::Act(self.decide())
            }
            ServerMessage::SenseBody { time, stamina } => {
                self.world.time = self.world.time.max(time);
                self.world.update_from_body_sense(stamina);
                Reaction::Wait
            }
            ServerMessage::Referee { time, play_mode } => {
                self.world.time = self.world.time.max(time);
                debug!("player {}: play mode {}", self.world.unum, play_mode);

                let reaction = match &play_mode {
                    PlayMode::TimeOver => Reaction::Finish,
                    mode if mode.requires_reposition() => Reaction::Send(vec![self.home_move()]),
                    _ => Reaction::Wait,
                };

                self.world.update_play_mode(play_mode);
                reaction
            }
            ServerMessage::Error(reason) => {
                warn!("player {}: server error: {}", self.world.unum, reason);
                Reaction::Wait
            }
            ServerMessage::Init { .. } => Reaction::Wait,
            ServerMessage::Other(head) => {
                trace!("player {}: ignoring {}", self.world.unum, head);
                Reaction::Wait
            }
        }
    }

    /// One strategy step on whatever the world model currently holds. A
    /// panicking strategy costs this tick only.
    pub fn decide(&mut self) -> ActionIntent {
        let world = &self.world;
        let strategy = &mut self.strategy;

        match catch_unwind(AssertUnwindSafe(|| strategy.step(world))) {
            Ok(intent) => intent,
            Err(_) => {
                error!(
                    "player {}: strategy panicked at time {}, standing still",
                    world.unum, world.time
                );
                ActionIntent::idle()
            }
        }
    }
}

/// A connected player: one UDP session driving one [`Player`].
pub struct Agent {
    connection: Connection,
    parser: MessageParser,
    player: Player,
    logger: TickLogger,
}

impl Agent {
    /// Registers player `index` with the server and walks it to its formation
    /// position.
    pub async fn connect(
        index: u8,
        config: &ClientConfig,
        formation: Arc<Formation>,
        policy: Option<Box<dyn ActionPolicy>>,
    ) -> Result<Self, ClientError> {
        let mut connection = Connection::open(&config.server_address(), config.read_timeout).await?;
        let mut parser = MessageParser::new(config.team.clone(), PlayerSide::Right);

        // Role, home and the goalie request all follow the launch slot.
        let role = formation.role(index);

        let init = Command::Init {
            team: config.team.clone(),
            version: PROTOCOL_VERSION,
            goalie: formation.is_goalie(index),
        };

        let assignment = connection
            .handshake(index, &init, &parser, config.init_timeout)
            .await?;

        parser.set_side(assignment.side);

        if assignment.unum != index {
            debug!("player {}: server assigned number {}", index, assignment.unum);
        }

        let mut world = WorldModel::new(assignment.side, assignment.unum, role);
        world.update_play_mode(assignment.play_mode);

        let strategy = StrategySelector::select(role, EngineConfig::default(), policy);
        let home = formation.initial_position(index);

        info!(
            "player {} connected as {} {} ({}, {} strategy)",
            index,
            assignment.side,
            assignment.unum,
            role,
            strategy.name()
        );

        let logger = TickLogger::create(&config.log_dir, &config.team, assignment.unum).await;
        let player = Player::new(world, strategy, home);

        connection.send(&player.home_move()).await?;

        Ok(Agent {
            connection,
            parser,
            player,
            logger,
        })
    }

    /// Receives and reacts until the match ends or the socket fails.
    ///
    /// A read timeout still produces a decision from the last known state.
    pub async fn run(mut self) -> Result<(), ClientError> {
        let unum = self.player.world().unum;

        loop {
            let Some(text) = self.connection.recv().await? else {
                trace!("player {}: read timeout, deciding on stale state", unum);
                let intent = self.player.decide();
                self.act(&intent).await?;
                continue;
            };

            let message = match self.parser.parse(&text) {
                Ok(message) => message,
                Err(e) => {
                    debug!("player {}: skipping message: {}", unum, e);
                    continue;
                }
            };

            match self.player.react(message) {
                Reaction::Act(intent) => self.act(&intent).await?,
                Reaction::Send(commands) => self.connection.send_all(&commands).await?,
                Reaction::Finish => {
                    self.connection.send(&Command::Bye).await?;
                    info!("player {}: match over", unum);
                    return Ok(());
                }
                Reaction::Wait => {}
            }
        }
    }

    async fn act(&mut self, intent: &ActionIntent) -> Result<(), ClientError> {
        self.connection.send_all(&Command::from_intent(intent)).await?;
        self.log_tick(intent).await;
        Ok(())
    }

    async fn log_tick(&mut self, intent: &ActionIntent) {
        let world = self.player.world();

        let record = TickRecord {
            time: world.time,
            play_mode: &world.play_mode,
            stamina: world.stamina,
            role: world.role,
            state: self.player.strategy().state(),
            ball: world.ball,
            action: intent,
        };

        debug!(
            "player {} t={} {} -> {:?}",
            world.unum, world.time, record.state, intent
        );

        self.logger.log(&record).await;
    }
}
