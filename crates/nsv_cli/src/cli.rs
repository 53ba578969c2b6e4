use std::str::FromStr;
use std::time::Duration;

use clap::Parser;
use nsv_client::config::{DEFAULT_API_URL, DEFAULT_TIMEOUT};

#[derive(Debug, Clone, PartialEq)]
pub struct HumanDuration(pub Duration);

impl Default for HumanDuration {
    fn default() -> Self {
        HumanDuration(DEFAULT_TIMEOUT)
    }
}

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut total_seconds = 0u64;
        let mut current_number = String::new();
        let mut has_unit = false;

        for c in s.chars() {
            if c.is_ascii_digit() {
                current_number.push(c);
            } else if !current_number.is_empty() {
                let num = parse_count(&current_number)?;
                let scale = match c {
                    's' => 1,
                    'm' => 60,
                    'h' => 3600,
                    _ => return Err(format!("Invalid duration unit: {}", c)),
                };
                total_seconds = num
                    .checked_mul(scale)
                    .and_then(|secs| total_seconds.checked_add(secs))
                    .ok_or_else(too_large)?;
                current_number.clear();
                has_unit = true;
            } else if !c.is_whitespace() {
                return Err(format!("Invalid character in duration: {}", c));
            }
        }

        // a trailing bare number counts as seconds
        if !current_number.is_empty() {
            let num = parse_count(&current_number)?;
            total_seconds = total_seconds.checked_add(num).ok_or_else(too_large)?;
            has_unit = true;
        }

        if !has_unit {
            return Err("Duration must include a number".to_string());
        }
        if total_seconds == 0 {
            return Err("Duration must be greater than zero".to_string());
        }

        Ok(HumanDuration(Duration::from_secs(total_seconds)))
    }
}

fn parse_count(digits: &str) -> std::result::Result<u64, String> {
    digits.parse::<u64>().map_err(|_| too_large())
}

fn too_large() -> String {
    "Duration is too large".to_string()
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Look up and scrape news articles through an NSV backend", long_about = None)]
pub struct Cli {
    /// Backend to talk to: http (default) or memory for an offline session
    #[arg(long, default_value = "http")]
    pub backend: String,
    /// Base URL of the NSV API
    #[arg(long, default_value = DEFAULT_API_URL)]
    pub api_url: String,
    /// Request timeout (e.g. 30s, 1m, 1m30s)
    #[arg(long, default_value = "30s")]
    pub timeout: HumanDuration,
    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Look up a URL, scraping it if the backend has not seen it yet
    Lookup {
        url: String,
        /// Also print the detail panel
        #[arg(long)]
        details: bool,
    },
    /// Print the most recently scraped articles
    Recent,
    /// Start an interactive session (default)
    Interactive,
}
