// crates/trustlens-cli/src/commands/resolve.rs
//
// `trustlens resolve <url>` — print the trust database key for a URL.

use serde_json::json;

use trustlens_reputation::TrustLens;

use crate::output::{format_json, OutputFormat};

/// Run the resolve command.
pub fn run(lens: &TrustLens, url: &str, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let domain = lens.resolve(url);
    match format {
        OutputFormat::Json => println!("{}", format_json(&json!({ "url": url, "domain": domain }))),
        OutputFormat::Table => println!("{}", domain),
    }
    Ok(())
}
