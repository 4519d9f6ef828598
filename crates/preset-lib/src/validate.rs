//! Structural validation of loaded presets
//!
//! Runs before apply: a preset read from disk may be missing required fields
//! or carry negative replica counts. Each violation names the offending
//! field path and a human-readable reason.

use crate::preset::{Preset, ScalableResource};

/// A single field-level defect in a preset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Path of the offending field, e.g. `deployments[1].replicas`.
    pub field: String,
    pub reason: String,
}

/// Check a preset for structural completeness. Returns an empty list when
/// the preset is valid.
pub fn validate(preset: &Preset) -> Vec<Violation> {
    let mut violations = Vec::new();

    if preset.name.trim().is_empty() {
        violations.push(Violation {
            field: "name".to_string(),
            reason: "required field is missing or empty".to_string(),
        });
    }
    if preset.namespace.trim().is_empty() {
        violations.push(Violation {
            field: "namespace".to_string(),
            reason: "required field is missing or empty".to_string(),
        });
    }

    check_resources("deployments", &preset.deployments, &mut violations);
    check_resources("stateFulSets", &preset.stateful_sets, &mut violations);

    violations
}

fn check_resources(field: &str, resources: &[ScalableResource], violations: &mut Vec<Violation>) {
    for (index, resource) in resources.iter().enumerate() {
        if resource.name.trim().is_empty() {
            violations.push(Violation {
                field: format!("{field}[{index}].name"),
                reason: "required field is missing or empty".to_string(),
            });
        }
        if resource.replicas < 0 {
            violations.push(Violation {
                field: format!("{field}[{index}].replicas"),
                reason: format!("must be non-negative, got {}", resource.replicas),
            });
        }
    }
}
