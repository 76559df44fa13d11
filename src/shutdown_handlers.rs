use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

use crate::shutdown::ShutdownSender;

#[cfg(unix)]
use tokio::signal::unix::{Signal, SignalKind, signal};

enum HandlerEvent {
    Shutdown(Result<(), RecvError>),
    Signal(&'static str),
    ListenFailed(std::io::Error),
}

/// Shutdown notifications this task sent itself and has not yet read back
/// from the shared channel.
#[derive(Debug, Default)]
struct OwnNotices {
    sent: u64,
    unread: u64,
}

impl OwnNotices {
    const fn sent(&self) -> u64 {
        self.sent
    }

    fn record_sent(&mut self) {
        self.sent = self.sent.saturating_add(1);
        self.unread = self.unread.saturating_add(1);
    }

    /// Whether `received` carries a shutdown that someone else sent.
    fn is_external(&mut self, received: Result<(), RecvError>) -> bool {
        match received {
            Ok(()) if self.unread == 0 => true,
            Ok(()) => {
                self.unread = self.unread.saturating_sub(1);
                false
            }
            Err(RecvError::Lagged(skipped)) if skipped > self.unread => true,
            Err(RecvError::Lagged(skipped)) => {
                self.unread = self.unread.saturating_sub(skipped);
                false
            }
            Err(RecvError::Closed) => true,
        }
    }
}

/// Spawns a task that turns every Ctrl+C (and SIGTERM on unix) into a
/// shutdown notification. The first one stops the run after the current
/// request; a repeat abandons that request. The task exits once anyone else
/// sends shutdown.
pub fn setup_signal_shutdown_handler(shutdown_tx: &ShutdownSender) -> tokio::task::JoinHandle<()> {
    let shutdown_tx = shutdown_tx.clone();
    // Subscribe before spawning so a shutdown sent right away is not missed.
    let mut shutdown_rx = shutdown_tx.subscribe();
    tokio::spawn(async move {
        #[cfg(unix)]
        let mut term_signal = match signal(SignalKind::terminate()) {
            Ok(signal) => Some(signal),
            Err(err) => {
                warn!("Failed to register SIGTERM handler: {}", err);
                None
            }
        };
        let mut own = OwnNotices::default();
        let mut ctrl_c_enabled = true;

        loop {
            #[cfg(unix)]
            let event = tokio::select! {
                received = shutdown_rx.recv() => HandlerEvent::Shutdown(received),
                result = tokio::signal::ctrl_c(), if ctrl_c_enabled => {
                    result.map_or_else(HandlerEvent::ListenFailed, |()| HandlerEvent::Signal("Ctrl+C"))
                }
                () = terminate(&mut term_signal) => HandlerEvent::Signal("SIGTERM"),
            };

            #[cfg(not(unix))]
            let event = tokio::select! {
                received = shutdown_rx.recv() => HandlerEvent::Shutdown(received),
                result = tokio::signal::ctrl_c(), if ctrl_c_enabled => {
                    result.map_or_else(HandlerEvent::ListenFailed, |()| HandlerEvent::Signal("Ctrl+C"))
                }
            };

            match event {
                HandlerEvent::Shutdown(received) => {
                    if own.is_external(received) {
                        break;
                    }
                }
                HandlerEvent::Signal(source) => {
                    if own.sent() == 0 {
                        info!(
                            "{} received, stopping after the current request (repeat to abandon it)",
                            source
                        );
                    } else {
                        info!("{} received again, abandoning the in-flight request", source);
                    }
                    if shutdown_tx.send(()).is_ok() {
                        own.record_sent();
                    }
                }
                HandlerEvent::ListenFailed(err) => {
                    warn!("Failed to listen for Ctrl+C: {}", err);
                    ctrl_c_enabled = false;
                }
            }
        }
    })
}

#[cfg(unix)]
async fn terminate(term_signal: &mut Option<Signal>) {
    if let Some(signal) = term_signal.as_mut()
        && signal.recv().await.is_some()
    {
        return;
    }
    std::future::pending::<()>().await;
}
