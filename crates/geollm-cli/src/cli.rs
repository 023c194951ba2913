use clap::{Args, Parser, Subcommand};
use geollm_core::config::{parse_geocoder_delay, parse_region_margin, CliConfigOverrides};
use geollm_core::models::AreaUnit;
use std::path::PathBuf;

/// GeoLLM - Geospatial assistant for India
#[derive(Parser, Debug)]
#[command(name = "geollm")]
#[command(about = "Geocoding, buffering, area measurement and Q&A for India", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// TOML configuration file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Nominatim base URL
    #[arg(long, global = true, value_name = "URL")]
    pub geocoder_url: Option<String>,

    /// Minimum milliseconds between geocoder requests
    #[arg(long, global = true, value_name = "MS", value_parser = delay_arg)]
    pub geocoder_delay_ms: Option<u64>,

    /// Text generation model name
    #[arg(long, global = true, value_name = "MODEL")]
    pub llm_model: Option<String>,

    /// Degrees of tolerance around India's bounding box
    #[arg(long, global = true, value_name = "DEGREES", value_parser = margin_arg)]
    pub region_margin: Option<f64>,

    #[command(subcommand)]
    pub command: Commands,
}

fn margin_arg(s: &str) -> Result<f64, String> {
    parse_region_margin(s).map_err(|e| e.to_string())
}

fn delay_arg(s: &str) -> Result<u64, String> {
    parse_geocoder_delay(s).map_err(|e| e.to_string())
}

impl Cli {
    /// Configuration values given on the command line
    pub fn config_overrides(&self) -> CliConfigOverrides {
        CliConfigOverrides {
            geocoder_url: self.geocoder_url.clone(),
            geocoder_min_delay_ms: self.geocoder_delay_ms,
            llm_model: self.llm_model.clone(),
            region_margin: self.region_margin,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve a place name to coordinates
    Geocode(GeocodeArgs),

    /// Buffer a point by a distance in kilometres
    Buffer(BufferArgs),

    /// Measure the area of the geometries in a GeoJSON file
    Area(AreaArgs),

    /// Ask the geospatial assistant a question
    Ask(AskArgs),

    /// Show effective configuration and where each value came from
    Config,
}

#[derive(Args, Debug)]
pub struct GeocodeArgs {
    /// Place name; multiple words are joined with spaces
    #[arg(required = true, num_args = 1..)]
    pub name: Vec<String>,
}

impl GeocodeArgs {
    pub fn name(&self) -> String {
        self.name.join(" ")
    }
}

#[derive(Args, Debug)]
pub struct BufferArgs {
    /// Latitude of the centre in degrees
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,

    /// Longitude of the centre in degrees
    #[arg(long, allow_negative_numbers = true)]
    pub lon: f64,

    /// Buffer radius in kilometres
    #[arg(long, default_value_t = 5.0)]
    pub distance_km: f64,
}

#[derive(Args, Debug)]
pub struct AreaArgs {
    /// GeoJSON file (Feature, FeatureCollection or bare geometry)
    pub path: PathBuf,

    /// Output unit (km2 or m2)
    #[arg(long, default_value = "km2")]
    pub units: AreaUnit,
}

#[derive(Args, Debug)]
pub struct AskArgs {
    /// Question text; multiple words are joined with spaces
    #[arg(required = true, num_args = 1..)]
    pub question: Vec<String>,
}

impl AskArgs {
    pub fn question(&self) -> String {
        self.question.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_geocode() {
        let cli = Cli::parse_from(["geollm", "geocode", "Connaught", "Place", "Delhi"]);
        match cli.command {
            Commands::Geocode(args) => assert_eq!(args.name(), "Connaught Place Delhi"),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_buffer_defaults() {
        let cli = Cli::parse_from(["geollm", "--json", "buffer", "--lat", "-12.5", "--lon", "130.8"]);
        assert!(cli.json);
        match cli.command {
            Commands::Buffer(args) => {
                assert_eq!(args.lat, -12.5);
                assert_eq!(args.distance_km, 5.0);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_area_units() {
        let cli = Cli::parse_from(["geollm", "area", "zones.geojson", "--units", "m2"]);
        match cli.command {
            Commands::Area(args) => assert_eq!(args.units, AreaUnit::SquareMeters),
            other => panic!("unexpected command {:?}", other),
        }
        assert!(Cli::try_parse_from(["geollm", "area", "zones.geojson", "--units", "acres"]).is_err());
    }

    #[test]
    fn test_config_overrides() {
        let cli = Cli::parse_from(["geollm", "--region-margin", "2", "--llm-model", "m", "config"]);
        let overrides = cli.config_overrides();
        assert_eq!(overrides.region_margin, Some(2.0));
        assert_eq!(overrides.llm_model.as_deref(), Some("m"));
        assert!(Cli::try_parse_from(["geollm", "--region-margin", "-1", "config"]).is_err());
    }

    #[test]
    fn test_geocoder_delay_below_one_second_rejected() {
        let cli = Cli::parse_from(["geollm", "--geocoder-delay-ms", "1500", "config"]);
        assert_eq!(cli.config_overrides().geocoder_min_delay_ms, Some(1500));
        assert!(Cli::try_parse_from(["geollm", "--geocoder-delay-ms", "0", "config"]).is_err());
        assert!(Cli::try_parse_from(["geollm", "--geocoder-delay-ms", "999", "config"]).is_err());
    }
}
