//! Buffer command implementation

use crate::cli::BufferArgs;
use crate::output::OutputWriter;
use anyhow::{Context, Result};
use geollm_core::models::GeoPoint;
use geollm_geo::{buffer, buffer_feature};

pub fn execute(args: BufferArgs, output: &OutputWriter) -> Result<()> {
    let center = GeoPoint::new(args.lat, args.lon)?;
    let polygon = buffer(center, args.distance_km).context("Could not create buffer")?;
    let feature = buffer_feature(&polygon, args.distance_km);

    if output.is_json() {
        output.result(&feature)
    } else {
        output.data(&feature)
    }
}
