// crates/trustlens-cli/src/commands/reviews.rs
//
// `trustlens reviews <domain>` — list the locally submitted reviews for a
// domain key, oldest first.

use tabled::Tabled;

use trustlens_reputation::TrustLens;

use crate::output::{format_json, format_table, OutputFormat};

#[derive(Tabled)]
struct ReviewRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Submitted")]
    timestamp: String,
    #[tabled(rename = "Accuracy")]
    accuracy: u8,
    #[tabled(rename = "Bias")]
    bias: u8,
    #[tabled(rename = "Trust")]
    trustworthiness: u8,
    #[tabled(rename = "Overall")]
    overall: u8,
}

/// Run the reviews command.
pub async fn run(
    lens: &TrustLens,
    domain: &str,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let aggregate = lens.aggregate(domain).await?;

    if format == OutputFormat::Json {
        println!("{}", format_json(&aggregate));
        return Ok(());
    }

    let Some(aggregate) = aggregate else {
        println!("No reviews recorded for {}", domain);
        return Ok(());
    };

    let rows: Vec<ReviewRow> = aggregate
        .reviews
        .iter()
        .enumerate()
        .map(|(i, r)| ReviewRow {
            index: i + 1,
            timestamp: r.timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            accuracy: r.accuracy,
            bias: r.bias,
            trustworthiness: r.trustworthiness,
            overall: r.overall_score,
        })
        .collect();

    println!("{} review(s) for {}", aggregate.total_reviews, domain);
    println!("{}", format_table(&rows));
    println!(
        "Averages: overall {} | accuracy {} | bias {} | trust {}",
        aggregate.avg_overall,
        aggregate.avg_accuracy,
        aggregate.avg_bias,
        aggregate.avg_trustworthiness
    );

    Ok(())
}
