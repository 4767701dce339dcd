use crate::{Agent, ClientConfig, ClientError};
use agent_core::ActionPolicy;
use formation::Formation;
use log::{error, info, warn};
use neural::{ActorNetwork, DefaultNeuralBackend};
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;

/// Launches and supervises every player of one team.
pub struct Team {
    config: ClientConfig,
    formation: Arc<Formation>,
    policy: Option<ActorNetwork<DefaultNeuralBackend>>,
}

impl Team {
    pub fn new(
        config: ClientConfig,
        formation: Arc<Formation>,
        policy: Option<ActorNetwork<DefaultNeuralBackend>>,
    ) -> Self {
        Team {
            config,
            formation,
            policy,
        }
    }

    /// Each agent gets its own copy of the network.
    fn policy_for_agent(&self) -> Option<Box<dyn ActionPolicy>> {
        self.policy
            .clone()
            .map(|network| Box::new(network) as Box<dyn ActionPolicy>)
    }

    /// Runs until every agent has finished or Ctrl-C is pressed. A failing
    /// agent only ends itself.
    pub async fn run(self) -> Result<(), ClientError> {
        let mut tasks = JoinSet::new();
        let now = Instant::now();

        for index in 1..=self.config.players {
            if index > 1 {
                tokio::time::sleep(self.config.stagger).await;
            }

            let config = self.config.clone();
            let formation = Arc::clone(&self.formation);
            let policy = self.policy_for_agent();

            tasks.spawn(async move {
                let result = match Agent::connect(index, &config, formation, policy).await {
                    Ok(agent) => agent.run().await,
                    Err(e) => Err(e),
                };
                (index, result)
            });
        }

        info!(
            "{}: {} players launched in {} ms",
            self.config.team,
            self.config.players,
            now.elapsed().as_millis()
        );

        tokio::select! {
            _ = Self::join_all(&mut tasks) => {
                info!("{}: all players finished", self.config.team);
            }
            signal = tokio::signal::ctrl_c() => {
                if let Err(e) = signal {
                    warn!("cannot listen for Ctrl-C: {}", e);
                }
                info!("{}: interrupted, stopping players", self.config.team);
                tasks.abort_all();
            }
        }

        Ok(())
    }

    async fn join_all(tasks: &mut JoinSet<(u8, Result<(), ClientError>)>) {
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((_, Ok(()))) => {}
                Ok((index, Err(e))) => error!("player {} stopped: {}", index, e),
                Err(e) if e.is_cancelled() => {}
                Err(e) => error!("player task failed: {}", e),
            }
        }
    }
}
