//! Signal handling for the service loop

use colored::Colorize;
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::mpsc;

use crate::domain::foreground::PollDecision;
use crate::domain::overlay::OverlayCommand;

/// Events consumed by the service loop. Every mutation of the overlay or
/// the recording session flows through this one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceSignal {
    /// A control-socket overlay command
    Overlay(OverlayCommand),
    /// A foreground poll decision
    Poll(PollDecision),
    /// Shutdown request (SIGINT/SIGTERM or the overlay Close button)
    Shutdown,
}

/// Service signal handler
///
/// Handles OS shutdown signals (SIGINT/SIGTERM) and provides a channel
/// for events from other sources (socket server, foreground poller).
pub struct ServiceSignalHandler {
    receiver: mpsc::Receiver<ServiceSignal>,
}

impl ServiceSignalHandler {
    /// Create the handler and start listening for shutdown signals.
    ///
    /// Returns the handler and a sender for the other event sources.
    pub async fn new() -> Result<(Self, mpsc::Sender<ServiceSignal>), std::io::Error> {
        let (handler, tx) = Self::channel();

        // Setup SIGINT handler (shutdown)
        let tx_int = tx.clone();
        let mut sigint = signal(SignalKind::interrupt())?;
        tokio::spawn(async move {
            sigint.recv().await;
            eprintln!("{} Received SIGINT (shutdown)", "↓".cyan());
            let _ = tx_int.send(ServiceSignal::Shutdown).await;
        });

        // Setup SIGTERM handler (shutdown)
        let tx_term = tx.clone();
        let mut sigterm = signal(SignalKind::terminate())?;
        tokio::spawn(async move {
            sigterm.recv().await;
            eprintln!("{} Received SIGTERM (shutdown)", "↓".cyan());
            let _ = tx_term.send(ServiceSignal::Shutdown).await;
        });

        Ok((handler, tx))
    }

    /// Create a handler over a plain channel with no OS signal sources
    /// attached. Event sources push through the returned sender.
    pub fn channel() -> (Self, mpsc::Sender<ServiceSignal>) {
        let (tx, rx) = mpsc::channel(16);
        (Self { receiver: rx }, tx)
    }

    /// Wait for the next signal
    pub async fn recv(&mut self) -> Option<ServiceSignal> {
        self.receiver.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_signal_equality() {
        assert_eq!(
            ServiceSignal::Overlay(OverlayCommand::Expand),
            ServiceSignal::Overlay(OverlayCommand::Expand)
        );
        assert_ne!(
            ServiceSignal::Overlay(OverlayCommand::Expand),
            ServiceSignal::Shutdown
        );
        assert_ne!(
            ServiceSignal::Poll(PollDecision::Show),
            ServiceSignal::Poll(PollDecision::Hide)
        );
    }
}
