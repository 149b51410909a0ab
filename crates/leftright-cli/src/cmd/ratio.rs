use clap::Args;
use leftright_cli::client::{ClientError, HiveClient};
use std::time::Duration;

#[derive(Args, Debug, Clone)]
pub struct RatioArgs {
    /// Layout key, e.g. `qwerty`.
    pub layout: String,

    /// Submit this right/left ratio before reading the average back.
    #[arg(long)]
    pub submit: Option<f64>,

    #[arg(long, default_value = "http://localhost:3000")]
    pub hive: String,

    /// Give up on the hive after this many seconds.
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

pub async fn run(args: RatioArgs) -> Result<(), ClientError> {
    let client = match args.timeout_secs {
        Some(secs) => HiveClient::with_timeout(&args.hive, Duration::from_secs(secs))?,
        None => HiveClient::new(&args.hive),
    };

    let resp = match args.submit {
        Some(ratio) => client.submit_ratio(&args.layout, ratio).await?,
        None => client.get_ratio(&args.layout).await?,
    };

    println!(
        "{}: average {:.3} over {} submissions",
        resp.layout, resp.average, resp.count
    );
    Ok(())
}
