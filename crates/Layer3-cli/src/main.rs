//! Scout CLI - Main entry point

mod cli;

use anyhow::{bail, Context};
use clap::Parser;
use cli::{Args, Command};
use scout_foundation::{ScoutConfig, ToolContext};
use scout_tool::{RuntimeContext, ToolRegistry};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match &args.cwd {
        Some(dir) => ScoutConfig::load_for(dir),
        None => ScoutConfig::load(),
    }
    .context("failed to load configuration")?;

    // Initialize logging
    let log_level = if args.debug {
        "debug".to_string()
    } else {
        config.log_level.clone().unwrap_or_else(|| "warn".to_string())
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let registry = ToolRegistry::from_config(&config);

    match &args.command {
        Command::Tools => {
            println!("{}", serde_json::to_string_pretty(&registry.schemas())?);
            return Ok(());
        }
        Command::Check { tool, params } => {
            let params: serde_json::Value =
                serde_json::from_str(params).context("parameters must be a JSON object")?;
            registry.validate(tool, &params)?;
            println!("ok");
            return Ok(());
        }
        _ => {}
    }

    let Some((tool, params)) = args.command.to_invocation() else {
        bail!("command does not invoke a tool");
    };

    let session_id = uuid::Uuid::new_v4().to_string();
    let ctx = match &args.cwd {
        Some(dir) => RuntimeContext::new(session_id, dir.clone()),
        None => RuntimeContext::current(session_id).context("cannot read current directory")?,
    };
    tracing::debug!("running '{}' (session {})", tool, ctx.session_id());

    let result = registry.execute(tool, params, &ctx).await?;
    match (args.json, result.payload()) {
        (true, Some(payload)) => println!("{}", serde_json::to_string_pretty(payload)?),
        _ => println!("{}", result.output),
    }

    Ok(())
}
