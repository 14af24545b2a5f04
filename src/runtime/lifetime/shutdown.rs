use tokio::signal;
use tracing::warn;

/// 等待终止信号
///
/// 除 Ctrl+C 外还监听 SIGTERM，容器编排停机时发送的是后者。
#[cfg(unix)]
pub async fn listen_for_shutdown() {
    use tokio::signal::unix::{SignalKind, signal as unix_signal};

    let mut sigterm =
        unix_signal(SignalKind::terminate()).expect("Failed to install SIGTERM handler");

    tokio::select! {
        _ = signal::ctrl_c() => {
            warn!("Ctrl+C received, initiating graceful shutdown...");
        }
        _ = sigterm.recv() => {
            warn!("SIGTERM received, initiating graceful shutdown...");
        }
    }
}

#[cfg(not(unix))]
pub async fn listen_for_shutdown() {
    signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
    warn!("Shutdown signal received, initiating graceful shutdown...");
}
