use crate::reports;
use clap::Args;
use leftright_cli::client::HiveClient;
use leftright_cli::replay::{self, KeystrokeLog};
use leftright_core::config::SessionConfig;
use leftright_core::error::{LeftRightError, LrResult};
use leftright_core::layouts::LayoutRegistry;
use leftright_core::metrics::assess_balance;
use leftright_core::session::TypingSession;
use serde_json::json;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Args, Debug, Clone)]
pub struct ReplayArgs {
    /// JSON keystroke log to replay.
    pub log: PathBuf,

    #[command(flatten)]
    pub config: SessionConfig,

    /// Session settings file; replaces the flags above when given.
    #[arg(long)]
    pub session_config: Option<PathBuf>,

    #[arg(long, default_value = "http://localhost:3000")]
    pub hive: String,

    /// Skip the community comparison.
    #[arg(long, default_value_t = false)]
    pub offline: bool,

    /// Print the report as JSON instead of tables.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub async fn run(args: ReplayArgs, registry: &LayoutRegistry) -> LrResult<()> {
    let config = match &args.session_config {
        Some(path) => SessionConfig::load_from_file(path)?,
        None => {
            args.config.validate()?;
            args.config.clone()
        }
    };

    let log = KeystrokeLog::load_from_file(&args.log)?;
    let layout = registry.require(&log.layout)?.clone();

    let mut session = TypingSession::new(layout, &log.text, config);
    let summary = replay::replay(&log, &mut session);
    info!(
        "▶️  Replayed {} keys ({} dropped, {} ignored)",
        summary.accepted, summary.dropped_errors, summary.ignored
    );

    let report = session.report().ok_or_else(|| {
        LeftRightError::Validation("the run never finished; nothing to report".into())
    })?;

    if args.offline {
        info!("Offline run, comparing against the research ratio");
    } else if let Some(ticket) = session.submission_ticket() {
        let stat = HiveClient::new(&args.hive)
            .compare(&ticket.layout, Some(ticket.ratio))
            .await;
        if stat.is_none() {
            warn!("⚠️  Hive unreachable, comparing against the research ratio");
        }
        session.apply_community(&ticket, stat);
    }

    let reference = session.community().reference();
    let verdict = report.ratio.map(|r| assess_balance(r, reference));

    if args.json {
        let out = json!({
            "report": report,
            "reference": reference,
            "community": session.community().stat(),
            "verdict": verdict,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        reports::print_session_report(&report);
        reports::print_community_report(report.ratio, session.community().stat(), reference);
    }
    Ok(())
}
