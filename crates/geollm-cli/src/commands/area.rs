//! Area command implementation

use crate::cli::AreaArgs;
use crate::output::OutputWriter;
use crate::output_types::{AreaItem, AreaOutput};
use anyhow::{Context, Result};
use geojson::GeoJson;
use geollm_core::models::Geometry;
use geollm_geo::area;
use std::fs;
use std::path::Path;
use tabled::Tabled;

pub fn execute(args: AreaArgs, output: &OutputWriter) -> Result<()> {
    let geometries = read_geometries(&args.path)?;
    if geometries.is_empty() {
        anyhow::bail!("No geometries found in {}", args.path.display());
    }

    let items: Vec<AreaItem> = geometries
        .iter()
        .enumerate()
        .map(|(index, geometry)| AreaItem {
            index,
            geometry_type: format!("{:?}", geometry.geometry_type()),
            area: area(geometry, args.units).ok(),
        })
        .collect();
    let total: f64 = items.iter().filter_map(|item| item.area).sum();
    let failed = items.iter().filter(|item| item.area.is_none()).count();

    if output.is_json() {
        return output.result(AreaOutput {
            path: args.path.display().to_string(),
            units: args.units.symbol().to_string(),
            total,
            items,
        });
    }

    #[derive(Tabled)]
    struct AreaRow {
        #[tabled(rename = "#")]
        index: usize,
        #[tabled(rename = "Type")]
        geometry_type: String,
        #[tabled(rename = "Area")]
        area: String,
    }

    let rows = items
        .into_iter()
        .map(|item| AreaRow {
            index: item.index,
            geometry_type: item.geometry_type,
            area: item
                .area
                .map(|a| format!("{:.4} {}", a, args.units.symbol()))
                .unwrap_or_else(|| "invalid".to_string()),
        })
        .collect();
    output.table(rows);
    output.kv("Total", format!("{:.4} {}", total, args.units.symbol()));
    if failed > 0 {
        output.warning(format!("{} geometries could not be measured", failed));
    }
    Ok(())
}

/// Geometries of a GeoJSON document, in document order. Features without geometry are skipped.
fn read_geometries(path: &Path) -> Result<Vec<Geometry>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let geojson: GeoJson =
        content.parse().with_context(|| format!("{} is not valid GeoJSON", path.display()))?;

    let raw: Vec<geojson::Geometry> = match geojson {
        GeoJson::Geometry(geometry) => vec![geometry],
        GeoJson::Feature(feature) => feature.geometry.into_iter().collect(),
        GeoJson::FeatureCollection(collection) => {
            collection.features.into_iter().filter_map(|f| f.geometry).collect()
        }
    };

    raw.iter()
        .map(|geometry| {
            let value = serde_json::to_value(geometry)?;
            Geometry::from_geojson(&value)
                .with_context(|| format!("Unsupported geometry in {}", path.display()))
        })
        .collect()
}
