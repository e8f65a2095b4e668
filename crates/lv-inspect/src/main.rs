//! lv-inspect entry point

use clap::Parser;
use lv_inspect::{Args, InspectError, run};

fn main() -> Result<(), InspectError> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lv_inspect=info,lv_overlay=info,lv_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    tracing::info!("Inspecting {}", args.scene.display());
    let output = run(&args)?;
    println!("{output}");
    Ok(())
}
