// crates/trustlens-cli/src/commands/domains.rs
//
// `trustlens domains` — every domain with local reviews, with its merged
// trust score.

use serde::Serialize;
use tabled::Tabled;

use trustlens_core::error::TrustLensError;
use trustlens_reputation::TrustLens;

use crate::output::{format_json, format_table, score_cell, OutputFormat};

#[derive(Tabled, Serialize)]
struct DomainRow {
    #[tabled(rename = "Domain")]
    domain: String,
    #[tabled(rename = "Source")]
    name: String,
    #[tabled(rename = "Local reviews")]
    user_reviews: u64,
    #[tabled(rename = "Trust score")]
    trust_score: String,
    #[tabled(rename = "Status")]
    status: String,
}

/// Run the domains command.
pub async fn run(lens: &TrustLens, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let mut rows = Vec::new();
    for domain in lens.reviewed_domains().await? {
        let row = match lens.merged(&domain).await {
            Ok(record) => DomainRow {
                domain,
                name: record.name,
                user_reviews: record.user_reviews,
                trust_score: score_cell(record.trust_score),
                status: record.status.to_string(),
            },
            Err(TrustLensError::UnknownDomain(_)) => {
                let user_reviews = lens
                    .aggregate(&domain)
                    .await?
                    .map_or(0, |a| a.total_reviews);
                DomainRow {
                    domain,
                    name: "(not in trust database)".to_string(),
                    user_reviews,
                    trust_score: "-".to_string(),
                    status: "unknown".to_string(),
                }
            }
            Err(e) => return Err(e.into()),
        };
        rows.push(row);
    }

    match format {
        OutputFormat::Json => println!("{}", format_json(&rows)),
        OutputFormat::Table if rows.is_empty() => println!("No reviews recorded yet."),
        OutputFormat::Table => println!("{}", format_table(&rows)),
    }

    Ok(())
}
