use clap::{Parser, Subcommand};
use leftright_core::layouts::LayoutRegistry;
use std::path::PathBuf;
use std::process;
use tracing::{error, info};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Extra layouts (JSON array) merged over the built-in ones.
    #[arg(global = true, long)]
    layout_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a recorded keystroke log and report per-hand speed.
    Replay(cmd::replay::ReplayArgs),
    /// Read or submit a community ratio.
    Ratio(cmd::ratio::RatioArgs),
    /// List layouts, optionally with a text's hand split.
    Layouts(cmd::layouts::LayoutsArgs),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();

    let mut registry = LayoutRegistry::new_with_defaults();
    if let Some(path) = &cli.layout_file {
        info!("📂 Loading layouts: {:?}", path);
        match LayoutRegistry::load_from_file(path) {
            Ok(custom) => registry.merge(custom),
            Err(e) => {
                error!("{}", e);
                process::exit(1);
            }
        }
    }

    let result = match cli.command {
        Commands::Replay(args) => cmd::replay::run(args, &registry)
            .await
            .map_err(|e| e.to_string()),
        Commands::Ratio(args) => cmd::ratio::run(args).await.map_err(|e| e.to_string()),
        Commands::Layouts(args) => {
            cmd::layouts::run(args, &registry).await;
            Ok(())
        }
    };

    if let Err(e) = result {
        error!("❌ {}", e);
        process::exit(1);
    }
}
