//! Binary entry point for `quill`. There are no flags and no configuration
//! file: the build runs against the fixed site layout in the working
//! directory (see [`quill::config::Config`]).

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quill::build::build_site;
use quill::config::Config;

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quill=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    build_site(&Config::default())?;
    Ok(())
}
