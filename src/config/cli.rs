use crate::adapters::{mapbox, unece};
use crate::utils::error::{PortsError, Result};
use crate::utils::validation::{self, Validate};
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "ports-index")]
#[command(about = "UN/LOCODE port lookup and great-circle distance calculator")]
pub struct CliConfig {
    #[arg(long, default_value = unece::DEFAULT_BASE_URL)]
    pub directory_url: String,

    #[arg(long, default_value = mapbox::DEFAULT_BASE_URL)]
    pub geocoder_url: String,

    /// Geocoder access token; falls back to the MAPBOX_TOKEN environment
    /// variable.
    #[arg(long)]
    pub mapbox_token: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Compute distances for a CSV of origin/destination pairs.
    Bulk {
        /// Input CSV (origin,originCountry,destination,destinationCountry,type).
        #[arg(long)]
        input: String,

        /// Output CSV path.
        #[arg(long, default_value = "distance_results.csv")]
        output: String,
    },

    /// Look up a single LOCODE in the directory.
    Lookup {
        locode: String,
    },

    /// Distance between two LOCODEs.
    Distance {
        from: String,
        to: String,
    },

    /// Print the bulk input template.
    Template,
}

impl CliConfig {
    pub fn mapbox_token(&self) -> Result<String> {
        self.mapbox_token
            .clone()
            .or_else(|| std::env::var("MAPBOX_TOKEN").ok())
            .ok_or_else(|| PortsError::MissingConfigError {
                field: "mapbox_token".to_string(),
            })
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("directory_url", &self.directory_url)?;
        validation::validate_url("geocoder_url", &self.geocoder_url)?;

        match &self.command {
            Command::Bulk { input, output } => {
                validation::validate_non_empty_string("input", input)?;
                validation::validate_non_empty_string("output", output)?;
            }
            Command::Lookup { locode } => {
                validation::validate_non_empty_string("locode", locode)?;
            }
            Command::Distance { from, to } => {
                validation::validate_non_empty_string("from", from)?;
                validation::validate_non_empty_string("to", to)?;
            }
            Command::Template => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(command: Command) -> CliConfig {
        CliConfig {
            directory_url: unece::DEFAULT_BASE_URL.to_string(),
            geocoder_url: mapbox::DEFAULT_BASE_URL.to_string(),
            mapbox_token: Some("token".to_string()),
            verbose: false,
            command,
        }
    }

    #[test]
    fn test_validate_bulk() {
        let ok = config(Command::Bulk {
            input: "rows.csv".to_string(),
            output: "out.csv".to_string(),
        });
        assert!(ok.validate().is_ok());

        let bad = config(Command::Bulk {
            input: " ".to_string(),
            output: "out.csv".to_string(),
        });
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let mut cfg = config(Command::Template);
        cfg.directory_url = "not-a-url".to_string();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_token_flag_preferred() {
        let cfg = config(Command::Template);
        assert_eq!(cfg.mapbox_token().unwrap(), "token");
    }
}
