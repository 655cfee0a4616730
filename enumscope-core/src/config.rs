//! Configuration loading from enumscope.toml.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::error::AuditError;

/// File looked up next to the analyzed input.
pub const CONFIG_FILE_NAME: &str = "enumscope.toml";

/// Default per-parameter depth budget.
pub const DEFAULT_MAX_DEPTH: i32 = 6;

/// Audit settings. Every field falls back to its default when omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Only projects in this language are analyzed (case-insensitive).
    pub target_language: String,
    /// Recursive descents allowed per top-level parameter walk.
    pub max_depth: i32,
    /// Name suffix that marks a controller when inheritance does not.
    pub controller_suffix: String,
    /// Qualified names of the framework controller base classes.
    pub controller_base_types: Vec<String>,
    /// Attributes that exclude a public method from being an action.
    pub non_action_attributes: Vec<String>,
    /// Attributes marking a parameter as injected rather than bound.
    pub injection_attributes: Vec<String>,
    /// Qualified parameter types that are framework context, never request data.
    pub excluded_parameter_types: Vec<String>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            target_language: "C#".to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
            controller_suffix: "Controller".to_string(),
            controller_base_types: vec![
                "Microsoft.AspNetCore.Mvc.ControllerBase".to_string(),
                "Microsoft.AspNetCore.Mvc.Controller".to_string(),
            ],
            non_action_attributes: vec!["NonAction".to_string()],
            injection_attributes: vec!["FromServices".to_string()],
            excluded_parameter_types: vec![
                "System.Threading.CancellationToken".to_string(),
                "Microsoft.AspNetCore.Http.HttpContext".to_string(),
                "Microsoft.AspNetCore.Http.HttpRequest".to_string(),
                "Microsoft.AspNetCore.Http.HttpResponse".to_string(),
                "System.Security.Claims.ClaimsPrincipal".to_string(),
            ],
        }
    }
}

/// Loads configuration from enumscope.toml in `root` if it exists.
pub fn load_config(root: &Path) -> Result<Option<AuditConfig>> {
    let path = root.join(CONFIG_FILE_NAME);
    if !path.exists() {
        return Ok(None);
    }

    load_config_file(&path).map(Some)
}

/// Loads configuration from an explicit file.
pub fn load_config_file(path: &Path) -> Result<AuditConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let cfg = toml::from_str(&content).map_err(|e| AuditError::config(path, e.message()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("enumscope_config_{}_{}", tag, std::process::id()));
        if dir.exists() {
            fs::remove_dir_all(&dir).ok();
        }
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_defaults() {
        let cfg = AuditConfig::default();
        assert_eq!(cfg.max_depth, 6);
        assert_eq!(cfg.controller_suffix, "Controller");
        assert_eq!(cfg.controller_base_types.len(), 2);
        assert_eq!(cfg.excluded_parameter_types.len(), 5);
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = temp_dir("missing");
        assert!(load_config(&dir).unwrap().is_none());
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = temp_dir("partial");
        fs::write(
            dir.join(CONFIG_FILE_NAME),
            "max_depth = 3\ninjection_attributes = [\"FromServices\", \"FromKeyedServices\"]\n",
        )
        .unwrap();

        let cfg = load_config(&dir).unwrap().unwrap();
        assert_eq!(cfg.max_depth, 3);
        assert_eq!(cfg.injection_attributes.len(), 2);
        assert_eq!(cfg.target_language, "C#");
        assert_eq!(cfg.non_action_attributes, vec!["NonAction".to_string()]);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_invalid_file_is_error() {
        let dir = temp_dir("invalid");
        fs::write(dir.join(CONFIG_FILE_NAME), "max_depth = \"deep\"").unwrap();
        let err = load_config(&dir).unwrap_err();
        let audit_err = err.downcast_ref::<AuditError>().unwrap();
        assert!(audit_err.is_recoverable());
        assert!(audit_err.path().is_some_and(|p| p.ends_with(CONFIG_FILE_NAME)));
        fs::remove_dir_all(&dir).ok();
    }
}
