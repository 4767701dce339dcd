use crate::ClientError;
use crate::protocol::{Command, MessageParser, ServerMessage};
use agent_core::{PlayMode, PlayerSide};
use log::{debug, trace};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::time::{Instant, timeout, timeout_at};

const MAX_DATAGRAM: usize = 8192;

/// Identity assigned by the server in its `init` reply.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub side: PlayerSide,
    pub unum: u8,
    pub play_mode: PlayMode,
}

/// One player's UDP session with the server.
pub struct Connection {
    socket: UdpSocket,
    server: SocketAddr,
    read_timeout: Duration,
    buffer: Vec<u8>,
}

impl Connection {
    pub async fn open(address: &str, read_timeout: Duration) -> Result<Self, ClientError> {
        let server = tokio::net::lookup_host(address)
            .await?
            .next()
            .ok_or_else(|| ClientError::Resolve(address.to_string()))?;

        let bind: SocketAddr = if server.is_ipv4() {
            SocketAddr::from(([0, 0, 0, 0], 0))
        } else {
            SocketAddr::from(([0u16; 8], 0))
        };

        let socket = UdpSocket::bind(bind).await?;

        Ok(Connection {
            socket,
            server,
            read_timeout,
            buffer: vec![0; MAX_DATAGRAM],
        })
    }

    pub fn server(&self) -> SocketAddr {
        self.server
    }

    pub async fn send(&self, command: &Command) -> Result<(), ClientError> {
        let text = command.to_string();
        trace!(">>> {}", text);

        self.socket.send_to(text.as_bytes(), self.server).await?;
        Ok(())
    }

    pub async fn send_all(&self, commands: &[Command]) -> Result<(), ClientError> {
        for command in commands {
            self.send(command).await?;
        }
        Ok(())
    }

    /// Next datagram as text, or `None` when nothing arrives within the read
    /// timeout.
    pub async fn recv(&mut self) -> Result<Option<String>, ClientError> {
        match timeout(self.read_timeout, self.recv_from()).await {
            Ok(result) => result.map(|(text, _)| Some(text)),
            Err(_) => Ok(None),
        }
    }

    async fn recv_from(&mut self) -> Result<(String, SocketAddr), ClientError> {
        let (len, from) = self.socket.recv_from(&mut self.buffer).await?;
        let text = String::from_utf8_lossy(&self.buffer[..len])
            .trim_end_matches('\0')
            .to_string();

        trace!("<<< {}", text);
        Ok((text, from))
    }

    /// Sends `init` and waits for the server's reply.
    ///
    /// The server answers from a dedicated port for this player; later
    /// commands go there.
    pub async fn handshake(
        &mut self,
        index: u8,
        init: &Command,
        parser: &MessageParser,
        limit: Duration,
    ) -> Result<Assignment, ClientError> {
        self.send(init).await?;

        let deadline = Instant::now() + limit;

        loop {
            let (text, from) = match timeout_at(deadline, self.recv_from()).await {
                Ok(received) => received?,
                Err(_) => {
                    return Err(ClientError::InitTimeout {
                        index,
                        timeout_ms: limit.as_millis() as u64,
                    });
                }
            };

            match parser.parse(&text) {
                Ok(ServerMessage::Init {
                    side,
                    unum,
                    play_mode,
                }) => {
                    self.server = from;
                    return Ok(Assignment {
                        side,
                        unum,
                        play_mode,
                    });
                }
                Ok(ServerMessage::Error(reason)) => {
                    return Err(ClientError::Rejected { index, reason });
                }
                Ok(_) => {}
                Err(e) => debug!("player {}: unreadable message during init: {}", index, e),
            }
        }
    }
}
