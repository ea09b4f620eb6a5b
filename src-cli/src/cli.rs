//! Command-line interface for fontwatch.
//!
//! Each subcommand parses its input with the library crates and prints the
//! result as JSON.

use anyhow::Result;
use clap::{Parser, Subcommand};
use css_value::{parse_family_list, parse_src, FontValue};
use font_loader::{webkit_version, EngineCapabilities};
use serde::Serialize;
use unicode_range::UnicodeRange;

/// fontwatch - Inspect CSS font values and font detection settings
#[derive(Parser)]
#[command(name = "fontwatch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Print compact instead of pretty JSON
    #[arg(long, global = true)]
    pub compact: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a `font` shorthand value
    Font {
        #[arg(value_name = "VALUE")]
        value: String,
    },

    /// Parse a `font-family` list
    Family {
        #[arg(value_name = "VALUE")]
        value: String,
    },

    /// Parse a `unicode-range` descriptor and derive its test string
    Range {
        #[arg(value_name = "SPEC")]
        spec: String,

        /// Also print the test string as UTF-16 code units
        #[arg(long)]
        utf16: bool,
    },

    /// List the `url()` sources of an `@font-face` `src` descriptor
    Src {
        #[arg(value_name = "VALUE")]
        value: String,
    },

    /// Evaluate engine capabilities for a user agent string
    Capabilities {
        #[arg(value_name = "USER_AGENT")]
        user_agent: String,
    },
}

#[derive(Debug, Serialize)]
pub struct RangeReport {
    pub canonical: String,
    pub intervals: Vec<[u32; 2]>,
    pub test_string: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utf16: Option<Vec<u16>>,
}

#[derive(Debug, Serialize)]
pub struct CapabilitiesReport {
    #[serde(flatten)]
    pub capabilities: EngineCapabilities,
    pub webkit_version: Option<String>,
}

pub fn range_report(spec: &str, utf16: bool) -> Result<RangeReport> {
    let range = UnicodeRange::parse(spec)?;
    Ok(RangeReport {
        canonical: range.to_string(),
        intervals: range
            .intervals()
            .iter()
            .map(|interval| [interval.start(), interval.end()])
            .collect(),
        test_string: range.to_test_string(),
        utf16: utf16.then(|| range.to_test_utf16()),
    })
}

pub fn capabilities_report(user_agent: &str) -> CapabilitiesReport {
    CapabilitiesReport {
        capabilities: EngineCapabilities::from_user_agent(user_agent),
        webkit_version: webkit_version(user_agent)
            .map(|(major, minor)| format!("{}.{}", major, minor)),
    }
}

fn to_json<T: Serialize>(value: &T, compact: bool) -> Result<String> {
    let json = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    Ok(json)
}

/// Run a parsed command line, returning the JSON to print
pub fn run(cli: &Cli) -> Result<String> {
    match &cli.command {
        Commands::Font { value } => {
            let font: FontValue = value.parse()?;
            tracing::debug!("Parsed font value {:?}", font);
            to_json(&font, cli.compact)
        }
        Commands::Family { value } => to_json(&parse_family_list(value)?, cli.compact),
        Commands::Src { value } => {
            let sources = parse_src(value);
            if sources.is_empty() {
                anyhow::bail!("No url() source in {:?}", value);
            }
            to_json(&sources, cli.compact)
        }
        Commands::Range { spec, utf16 } => to_json(&range_report(spec, *utf16)?, cli.compact),
        Commands::Capabilities { user_agent } => {
            to_json(&capabilities_report(user_agent), cli.compact)
        }
    }
}
