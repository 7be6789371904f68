//! Unix Domain Socket communication for service control

use std::io;
use std::path::{Path, PathBuf};

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::mpsc;

use super::signals::ServiceSignal;
use crate::domain::capture::SessionState;
use crate::domain::overlay::{OverlayCommand, OverlayState};

/// Overlay and session state reported to status queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceStatus {
    pub overlay: OverlayState,
    pub session: SessionState,
}

/// Socket path resolver
#[derive(Debug, Clone)]
pub struct SocketPath {
    path: PathBuf,
}

impl SocketPath {
    /// Create socket path, preferring XDG_RUNTIME_DIR
    pub fn new() -> Self {
        let path = std::env::var("XDG_RUNTIME_DIR")
            .map(|dir| PathBuf::from(dir).join("screenrec.sock"))
            .unwrap_or_else(|_| std::env::temp_dir().join("screenrec.sock"));
        Self { path }
    }

    /// Get the socket path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if socket file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Remove socket file if it exists
    pub fn cleanup(&self) -> io::Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

impl Default for SocketPath {
    fn default() -> Self {
        Self::new()
    }
}

/// Control socket server - listens for overlay commands
pub struct ControlSocketServer {
    socket_path: SocketPath,
    listener: Option<UnixListener>,
}

impl ControlSocketServer {
    /// Create a new socket server
    pub fn new(socket_path: SocketPath) -> Self {
        Self {
            socket_path,
            listener: None,
        }
    }

    /// Bind to the socket
    pub fn bind(&mut self) -> io::Result<()> {
        // Remove stale socket file if it exists
        self.socket_path.cleanup()?;

        let listener = UnixListener::bind(self.socket_path.path())?;
        self.listener = Some(listener);
        Ok(())
    }

    /// Get the socket path
    pub fn path(&self) -> &Path {
        self.socket_path.path()
    }

    /// Accept and handle connections
    ///
    /// Runs in a loop, accepting connections and forwarding commands to
    /// the service loop. The status_fn is called per status query.
    pub async fn run<F>(&self, tx: mpsc::Sender<ServiceSignal>, status_fn: F) -> io::Result<()>
    where
        F: Fn() -> ServiceStatus + Send + Sync + 'static,
    {
        let listener = self
            .listener
            .as_ref()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotConnected, "Socket not bound"))?;

        loop {
            match listener.accept().await {
                Ok((stream, _addr)) => {
                    let tx = tx.clone();
                    let status = status_fn();
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(stream, tx, status).await {
                            eprintln!("Socket connection error: {}", e);
                        }
                    });
                }
                Err(e) => {
                    eprintln!("Socket accept error: {}", e);
                }
            }
        }
    }

    /// Cleanup socket file
    pub fn cleanup(&self) {
        let _ = self.socket_path.cleanup();
    }
}

impl Drop for ControlSocketServer {
    fn drop(&mut self) {
        self.cleanup();
    }
}

/// Parse a wire command into an overlay command
fn parse_command(cmd: &str) -> Option<OverlayCommand> {
    match cmd {
        "expand" => Some(OverlayCommand::Expand),
        "start" => Some(OverlayCommand::Start),
        "back" => Some(OverlayCommand::Back),
        "close" => Some(OverlayCommand::Close),
        _ => None,
    }
}

/// Handle a single client connection
async fn handle_connection(
    stream: UnixStream,
    tx: mpsc::Sender<ServiceSignal>,
    status: ServiceStatus,
) -> io::Result<()> {
    let (reader, mut writer) = stream.into_split();
    let mut reader = BufReader::new(reader);
    let mut line = String::new();

    // Read command
    reader.read_line(&mut line).await?;
    let cmd = line.trim();

    // Process command
    let response = match cmd {
        "status" => format!("overlay={} session={}\n", status.overlay, status.session),
        _ => match parse_command(cmd) {
            Some(command) => {
                let _ = tx.send(ServiceSignal::Overlay(command)).await;
                "ok\n".to_string()
            }
            None => "error: unknown command\n".to_string(),
        },
    };

    writer.write_all(response.as_bytes()).await?;
    writer.flush().await?;

    Ok(())
}

/// Control socket client - connects and sends commands
pub struct ControlSocketClient {
    socket_path: SocketPath,
}

impl ControlSocketClient {
    /// Create a new socket client
    pub fn new(socket_path: SocketPath) -> Self {
        Self { socket_path }
    }

    /// Check if the service appears to be running (socket exists)
    pub fn is_service_running(&self) -> bool {
        self.socket_path.exists()
    }

    /// Send a command and receive response
    pub async fn send_command(&self, cmd: &str) -> io::Result<String> {
        let stream = UnixStream::connect(self.socket_path.path()).await?;
        let (reader, mut writer) = stream.into_split();

        // Send command
        writer.write_all(format!("{}\n", cmd).as_bytes()).await?;
        writer.flush().await?;

        // Read response
        let mut reader = BufReader::new(reader);
        let mut response = String::new();
        reader.read_line(&mut response).await?;

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn socket_path_uses_xdg_runtime_dir() {
        let path = std::env::var("XDG_RUNTIME_DIR")
            .map(|dir| PathBuf::from(dir).join("screenrec.sock"))
            .unwrap_or_else(|_| std::env::temp_dir().join("screenrec.sock"));

        let socket_path = SocketPath::new();
        assert_eq!(socket_path.path(), path.as_path());
    }

    #[test]
    fn wire_commands_map_to_overlay_commands() {
        assert_eq!(parse_command("expand"), Some(OverlayCommand::Expand));
        assert_eq!(parse_command("start"), Some(OverlayCommand::Start));
        assert_eq!(parse_command("back"), Some(OverlayCommand::Back));
        assert_eq!(parse_command("close"), Some(OverlayCommand::Close));
        assert_eq!(parse_command("toggle"), None);
        assert_eq!(parse_command(""), None);
    }

    #[tokio::test]
    async fn server_round_trip() {
        let path = std::env::temp_dir().join(format!("screenrec-test-{}.sock", std::process::id()));
        let socket_path = SocketPath {
            path: path.clone(),
        };

        let mut server = ControlSocketServer::new(socket_path.clone());
        server.bind().unwrap();

        let (tx, mut rx) = mpsc::channel(4);
        tokio::spawn(async move {
            let _ = server
                .run(tx, || ServiceStatus {
                    overlay: OverlayState::ShowingSmall,
                    session: SessionState::Idle,
                })
                .await;
        });

        let client = ControlSocketClient::new(socket_path);
        assert!(client.is_service_running());

        let response = client.send_command("expand").await.unwrap();
        assert_eq!(response.trim(), "ok");
        assert_eq!(
            rx.recv().await,
            Some(ServiceSignal::Overlay(OverlayCommand::Expand))
        );

        let response = client.send_command("status").await.unwrap();
        assert_eq!(response.trim(), "overlay=small session=idle");

        let response = client.send_command("bogus").await.unwrap();
        assert!(response.starts_with("error:"));

        let _ = std::fs::remove_file(&path);
    }
}
