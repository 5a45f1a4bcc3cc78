// crates/trustlens-cli/src/commands/lookup.rs
//
// `trustlens lookup <url>` — show the merged trust record for a page.

use tabled::Tabled;

use trustlens_core::record::MergedRecord;
use trustlens_reputation::TrustLens;

use crate::output::{format_json, format_table, score_cell, OutputFormat};

/// A row in the trust metric table.
#[derive(Tabled)]
struct MetricRow {
    #[tabled(rename = "Metric")]
    metric: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

fn metric_rows(record: &MergedRecord) -> Vec<MetricRow> {
    let pct = |v: u8| if v == 0 { "-".to_string() } else { format!("{}%", v) };
    vec![
        MetricRow {
            metric: "Trust score",
            value: score_cell(record.trust_score),
        },
        MetricRow {
            metric: "Reputation",
            value: pct(record.reputation),
        },
        MetricRow {
            metric: "Accuracy",
            value: pct(record.accuracy),
        },
        MetricRow {
            metric: "Bias control",
            value: pct(record.bias),
        },
        MetricRow {
            metric: "Transparency",
            value: pct(record.transparency),
        },
        MetricRow {
            metric: "User engagement",
            value: pct(record.user_engagement),
        },
        MetricRow {
            metric: "Reviews",
            value: if record.total_reviews == 0 {
                "-".to_string()
            } else {
                format!("{} ({} local)", record.total_reviews, record.user_reviews)
            },
        },
    ]
}

/// Run the lookup command.
pub async fn run(
    lens: &TrustLens,
    url: &str,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let lookup = lens.lookup(url).await?;

    if format == OutputFormat::Json {
        println!("{}", format_json(&lookup));
        return Ok(());
    }

    println!("Domain: {}", lookup.domain);
    match &lookup.record {
        Some(record) => {
            println!("Source: {}", record.name);
            println!(
                "Status: {} ({})",
                record.status.headline(),
                record.status
            );
            println!();
            println!("{}", format_table(&metric_rows(record)));
            if record.trust_score.is_none() {
                println!();
                println!("No data available for this source. Be the first to rate it!");
            }
        }
        None => {
            println!("No data available for this source.");
        }
    }

    Ok(())
}
