//! Config command implementation

use crate::output::OutputWriter;
use crate::output_types::{ConfigEntry, ConfigOutput};
use anyhow::Result;
use geollm_core::config::GeollmConfig;
use tabled::Tabled;

pub fn execute(config: &GeollmConfig, output: &OutputWriter) -> Result<()> {
    let values: Vec<ConfigEntry> = config
        .to_inspection_map()
        .into_iter()
        .map(|(key, (value, source))| ConfigEntry { key, value, source: format!("{:?}", source) })
        .collect();

    if output.is_json() {
        return output.result(ConfigOutput { values });
    }

    output.section("Configuration Values");

    #[derive(Tabled)]
    struct ConfigRow {
        #[tabled(rename = "Key")]
        key: String,
        #[tabled(rename = "Value")]
        value: String,
        #[tabled(rename = "Source")]
        source: String,
    }

    let rows = values
        .into_iter()
        .map(|entry| ConfigRow { key: entry.key, value: entry.value, source: entry.source })
        .collect();
    output.table(rows);
    Ok(())
}
