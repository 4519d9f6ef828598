//! Capture command: snapshot a namespace's replica counts into a preset file

use std::path::PathBuf;

use anyhow::Result;
use preset_lib::{store, ClusterAuth, ClusterClient, NullSink, Preset, ProgressSink};

use crate::output::{self, ConsoleSink, OutputFormat};

pub async fn run(
    auth: &ClusterAuth,
    name: &str,
    namespace: &str,
    file: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let client = ClusterClient::connect(auth).await?;

    let mut preset = Preset::new(name, namespace);
    let sink: &dyn ProgressSink = match format {
        OutputFormat::Table => {
            output::print_info(&format!(
                "Creating preset {name} from namespace {namespace}"
            ));
            &ConsoleSink
        }
        OutputFormat::Json => &NullSink,
    };

    let summary = preset.populate(&client, sink).await;

    let path = file
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(format!("{name}.yml")));
    store::save(&preset, &path)?;

    match format {
        OutputFormat::Table => {
            output::print_preset_table(&preset);
            output::print_success(&format!("Saved preset to {}", path.display()));
            if !summary.failed_kinds.is_empty() {
                let kinds: Vec<String> = summary
                    .failed_kinds
                    .iter()
                    .map(|kind| kind.to_string())
                    .collect();
                output::print_warning(&format!(
                    "Preset is partial: listing failed for {}",
                    kinds.join(", ")
                ));
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&preset)?);
        }
    }

    Ok(())
}
