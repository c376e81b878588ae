//! Configuration file loading.

use intrinsic::AnalysisConfig;
use intrinsic::data::Result;
use std::path::Path;

/// Load analysis parameters from a JSON file, or defaults when no file is given.
///
/// Missing sections fall back to their defaults; the result is validated before
/// use.
pub(crate) fn load_config(path: Option<&Path>) -> Result<AnalysisConfig> {
    let Some(path) = path else {
        return Ok(AnalysisConfig::default());
    };

    let json = std::fs::read_to_string(path)?;
    let config: AnalysisConfig = serde_json::from_str(&json)?;
    config.validate()?;
    Ok(config)
}
