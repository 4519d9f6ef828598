//! Restore command: apply a preset file's replica counts to the cluster

use std::path::Path;

use anyhow::Result;
use preset_lib::{
    store, validate, ApplyOptions, ClusterAuth, ClusterClient, Error, NullSink, ProgressSink,
};

use crate::output::{self, ConsoleSink, OutputFormat};

pub async fn run(
    auth: &ClusterAuth,
    file: &str,
    dry_run: bool,
    format: OutputFormat,
) -> Result<()> {
    // validation gate runs before any cluster contact
    let preset = store::load(Path::new(file))?;
    let violations = validate(&preset);
    if !violations.is_empty() {
        output::print_violations(&violations);
        return Err(Error::Validation(violations).into());
    }

    let client = ClusterClient::connect(auth).await?;

    let sink: &dyn ProgressSink = match format {
        OutputFormat::Table => {
            output::print_info(&format!(
                "Applying preset {} to namespace {}",
                preset.name, preset.namespace
            ));
            if dry_run {
                output::print_warning("Dry-run mode - no changes will be applied");
            }
            &ConsoleSink
        }
        OutputFormat::Json => &NullSink,
    };

    let options = ApplyOptions { dry_run };
    let summary = preset.apply(&client, &options, sink).await;

    match format {
        OutputFormat::Table => output::print_apply_summary(&summary),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
    }

    Ok(())
}
