use tokio::signal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopSignal {
    Interrupt,
    Terminate,
}

impl StopSignal {
    fn as_str(self) -> &'static str {
        match self {
            Self::Interrupt => "SIGINT",
            Self::Terminate => "SIGTERM",
        }
    }
}

/// Resolve on the first Ctrl+C or SIGTERM.
///
/// A handler that cannot be installed is logged and treated as never
/// firing, so the server keeps running on the remaining one.
pub async fn stop_signal() -> StopSignal {
    let received = tokio::select! {
        signal = interrupt() => signal,
        signal = terminate() => signal,
    };
    tracing::info!(
        signal = received.as_str(),
        "stop signal received, draining in-flight requests"
    );
    received
}

async fn interrupt() -> StopSignal {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    StopSignal::Interrupt
}

#[cfg(unix)]
async fn terminate() -> StopSignal {
    match signal::unix::signal(signal::unix::SignalKind::terminate()) {
        Ok(mut handler) => {
            handler.recv().await;
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to install SIGTERM handler");
            std::future::pending::<()>().await;
        }
    }
    StopSignal::Terminate
}

#[cfg(not(unix))]
async fn terminate() -> StopSignal {
    std::future::pending::<StopSignal>().await
}
