use agent_core::{ActionIntent, BallSighting, DecisionState, PlayMode, Role};
use log::{debug, warn};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

/// One line of a tick log.
#[derive(Debug, Clone, Serialize)]
pub struct TickRecord<'a> {
    pub time: u32,
    pub play_mode: &'a PlayMode,
    pub stamina: f32,
    pub role: Role,
    pub state: DecisionState,
    pub ball: Option<BallSighting>,
    pub action: &'a ActionIntent,
}

/// Appends one JSON line per decision tick to
/// `<log_dir>/<team>_<unum>_<unix seconds>.jsonl`.
///
/// Logging never stops the agent: a file that cannot be created or written
/// disables the logger with a warning.
pub struct TickLogger {
    path: PathBuf,
    file: Option<File>,
}

impl TickLogger {
    pub async fn create(log_dir: &Path, team: &str, unum: u8) -> Self {
        let path = log_dir.join(format!(
            "{}_{}_{}.jsonl",
            team,
            unum,
            chrono::Utc::now().timestamp()
        ));

        let file = match Self::open(log_dir, &path).await {
            Ok(file) => {
                debug!("player {}: logging ticks to {}", unum, path.display());
                Some(file)
            }
            Err(e) => {
                warn!("player {}: tick log {} disabled: {}", unum, path.display(), e);
                None
            }
        };

        TickLogger { path, file }
    }

    async fn open(log_dir: &Path, path: &Path) -> std::io::Result<File> {
        tokio::fs::create_dir_all(log_dir).await?;

        File::options()
            .append(true)
            .create(true)
            .open(path)
            .await
    }

    pub fn is_enabled(&self) -> bool {
        self.file.is_some()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn log(&mut self, record: &TickRecord<'_>) {
        let Some(file) = self.file.as_mut() else {
            return;
        };

        let result = match serde_json::to_vec(record) {
            Ok(mut line) => {
                line.push(b'\n');
                match file.write_all(&line).await {
                    Ok(()) => file.flush().await,
                    Err(e) => Err(e),
                }
            }
            Err(e) => Err(e.into()),
        };

        if let Err(e) = result {
            warn!("tick log {} disabled after write error: {}", self.path.display(), e);
            self.file = None;
        }
    }
}
