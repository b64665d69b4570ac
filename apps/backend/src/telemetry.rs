use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::RuntimeEnv;

const DEFAULT_FILTER: &str = "info,actix_web=info,reqwest=warn";

/// Install the global subscriber. Production logs one JSON object per line;
/// dev and test get compact text. `RUST_LOG` overrides the default filter.
pub fn init_tracing(runtime: RuntimeEnv) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let json = matches!(runtime, RuntimeEnv::Prod);

    let json_layer = json.then(|| {
        fmt::layer()
            .with_target(false)
            .with_file(false)
            .with_line_number(false)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_ansi(false)
            .json()
    });
    let text_layer = (!json).then(|| fmt::layer().with_target(true).compact());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}
