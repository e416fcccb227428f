use std::fmt::Display;
use std::path::Path;

use credit_approval_core::eligibility::policy::EligibilityPolicy;

use crate::input::file;

/// Read an eligibility policy from JSON or YAML, chosen by file extension.
/// Fields left out of the file keep their default values.
pub fn read_policy(path: &str) -> Result<EligibilityPolicy, Box<dyn std::error::Error>> {
    let (canonical, contents) = file::read_source(path)?;
    parse_policy(&canonical, &contents)
}

/// Decode and validate a policy document; `path` selects the format.
pub fn parse_policy(
    path: &Path,
    contents: &str,
) -> Result<EligibilityPolicy, Box<dyn std::error::Error>> {
    let policy: EligibilityPolicy = match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") | Some("yml") => {
            serde_yaml::from_str(contents).map_err(|e| parse_error(path, e))?
        }
        Some("json") => serde_json::from_str(contents).map_err(|e| parse_error(path, e))?,
        _ => {
            return Err(format!(
                "Unsupported policy format '{}': expected .json, .yaml or .yml",
                path.display()
            )
            .into())
        }
    };

    policy.validate()?;
    Ok(policy)
}

fn parse_error(path: &Path, e: impl Display) -> String {
    format!("Failed to parse policy '{}': {}", path.display(), e)
}
