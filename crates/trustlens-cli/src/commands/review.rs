// crates/trustlens-cli/src/commands/review.rs
//
// `trustlens review <url> --accuracy N --bias N --trust N` — rate a page's
// source on three 1-10 scales.

use clap::Args;

use trustlens_reputation::TrustLens;

use crate::output::{format_json, OutputFormat};

/// Arguments for the review command.
#[derive(Debug, Args)]
pub struct ReviewCmd {
    /// URL of the page being rated.
    pub url: String,
    /// Accuracy rating, 1-10.
    #[arg(long)]
    pub accuracy: i32,
    /// Bias control rating, 1-10.
    #[arg(long)]
    pub bias: i32,
    /// Trustworthiness rating, 1-10.
    #[arg(long = "trust")]
    pub trustworthiness: i32,
}

/// Run the review command.
pub async fn run(
    lens: &TrustLens,
    cmd: &ReviewCmd,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let (domain, aggregate) = lens
        .rate_url(&cmd.url, cmd.accuracy, cmd.bias, cmd.trustworthiness)
        .await?;

    if format == OutputFormat::Json {
        println!("{}", format_json(&aggregate));
        return Ok(());
    }

    println!("Review submitted for {}", domain);
    println!();
    println!("  Reviews:          {}", aggregate.total_reviews);
    println!("  Avg overall:      {}", aggregate.avg_overall);
    println!("  Avg accuracy:     {}", aggregate.avg_accuracy);
    println!("  Avg bias control: {}", aggregate.avg_bias);
    println!("  Avg trust:        {}", aggregate.avg_trustworthiness);

    Ok(())
}
