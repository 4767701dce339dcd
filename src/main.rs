use client::{ClientConfig, Team};
use env_logger::Env;
use formation::Formation;
use log::info;
use neural::{ActorNetwork, DEFAULT_NEURAL_DEVICE, DefaultNeuralBackend};
use std::sync::Arc;

#[cfg(target_os = "linux")]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = ClientConfig::from_env()?;

    let formation = match &config.formation {
        Some(path) => Formation::from_file(path)?,
        None => Formation::default_formation()?,
    };

    let policy = match &config.policy {
        Some(path) => {
            let network = ActorNetwork::<DefaultNeuralBackend>::from_file(path, &DEFAULT_NEURAL_DEVICE)?;
            info!("learned policy loaded from {}", path.display());
            Some(network)
        }
        None => None,
    };

    info!(
        "team {} connecting {} players to {}",
        config.team,
        config.players,
        config.server_address()
    );

    Team::new(config, Arc::new(formation), policy).run().await?;

    Ok(())
}
