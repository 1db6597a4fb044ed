use scenario_lab_core::prelude::ShutdownHandle;
use tokio::signal;

/// Turn Ctrl-C into a shutdown signal, which cancels the run in flight.
pub(crate) fn start_shutdown_listener(runtime: &tokio::runtime::Runtime, handle: ShutdownHandle) {
    runtime.spawn(async move {
        match signal::ctrl_c().await {
            Ok(()) => {
                println!("Received shutdown signal, cancelling the run in flight...");
                handle.shutdown();
            }
            Err(e) => log::error!("Failed to listen for Ctrl-C: {e:?}"),
        }
    });
}
