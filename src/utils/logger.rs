use once_cell::sync::OnceCell;
use tracing_subscriber::{EnvFilter, fmt};

static TRACING_INIT: OnceCell<()> = OnceCell::new();

/// Install a stderr subscriber for the client's request logs. Honors
/// `RUST_LOG`, defaulting to `info`. Does nothing if this or any other
/// subscriber is already installed.
pub fn init_tracing() {
    TRACING_INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(filter)
            // stderr keeps stdout free for the caller's own output
            .with_writer(std::io::stderr)
            .finish();

        // an application may already have installed its own subscriber
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}
