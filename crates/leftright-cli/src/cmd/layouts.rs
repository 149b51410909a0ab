use crate::reports;
use clap::Args;
use leftright_cli::client::HiveClient;
use leftright_core::layouts::{KeyboardLayout, LayoutRegistry};
use tracing::warn;

#[derive(Args, Debug, Clone)]
pub struct LayoutsArgs {
    /// Show how this text splits between the hands on every layout.
    #[arg(long)]
    pub text: Option<String>,

    /// Fetch community averages from this hive.
    #[arg(long)]
    pub hive: Option<String>,
}

pub async fn run(args: LayoutsArgs, registry: &LayoutRegistry) {
    let layouts: Vec<&KeyboardLayout> = registry.iter().collect();

    let ratios = match &args.hive {
        Some(url) => HiveClient::new(url).list_ratios().await.unwrap_or_else(|e| {
            warn!("⚠️  Could not fetch community averages: {}", e);
            Vec::new()
        }),
        None => Vec::new(),
    };

    println!("\n🗺️  === KNOWN LAYOUTS === 🗺️");
    reports::print_layout_list(&layouts, &ratios);

    if let Some(text) = &args.text {
        for layout in layouts {
            let d = layout.distribution(text);
            reports::print_distribution_report(layout, &d);
        }
    }
}
