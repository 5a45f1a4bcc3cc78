// crates/trustlens-cli/src/commands/notice.rs
//
// `trustlens notice <url>` — the one-line badge shown when a known source
// is opened. Prints nothing for unknown sources.

use trustlens_reputation::TrustLens;

use crate::output::{format_json, score_cell, OutputFormat};

/// Run the notice command.
pub fn run(lens: &TrustLens, url: &str, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let Some(notice) = lens.notice(url) else {
        if format == OutputFormat::Json {
            println!("null");
        }
        return Ok(());
    };

    match format {
        OutputFormat::Json => println!("{}", format_json(&notice)),
        OutputFormat::Table => println!(
            "{} | Trust Score: {}/100 | {}",
            notice.name,
            score_cell(notice.trust_score),
            notice.status.headline()
        ),
    }
    Ok(())
}
