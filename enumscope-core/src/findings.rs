//! Report tree: project → controller → action → enum findings.

use serde::{Deserialize, Serialize};

/// An enum type reachable from a request parameter, and the path to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumFinding {
    /// Display name of the enum type.
    pub enum_type: String,
    /// Dotted access path rooted at the parameter name (`filter.Status`).
    pub path: String,
}

impl EnumFinding {
    pub fn new(enum_type: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            enum_type: enum_type.into(),
            path: path.into(),
        }
    }
}

/// A request parameter as shown in an action signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterInfo {
    pub name: String,
    pub type_name: String,
}

/// An action method with at least one enum finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResult {
    pub method_name: String,
    pub return_type: String,
    pub parameters: Vec<ParameterInfo>,
    pub enum_params: Vec<EnumFinding>,
}

impl ActionResult {
    /// Builds an action result; `None` when there is nothing to report.
    pub fn new(
        method_name: impl Into<String>,
        return_type: impl Into<String>,
        parameters: Vec<ParameterInfo>,
        enum_params: Vec<EnumFinding>,
    ) -> Option<Self> {
        if enum_params.is_empty() {
            return None;
        }
        Some(Self {
            method_name: method_name.into(),
            return_type: return_type.into(),
            parameters,
            enum_params,
        })
    }

    /// Same name, same return type, same ordered parameter types.
    pub fn has_same_signature(&self, other: &ActionResult) -> bool {
        self.method_name == other.method_name
            && self.return_type == other.return_type
            && self.parameters.len() == other.parameters.len()
            && self
                .parameters
                .iter()
                .zip(&other.parameters)
                .all(|(a, b)| a.type_name == b.type_name)
    }

    /// `Get(OrderFilter filter, int page)`
    pub fn signature(&self) -> String {
        let params: Vec<String> = self
            .parameters
            .iter()
            .map(|p| format!("{} {}", p.type_name, p.name))
            .collect();
        format!("{}({})", self.method_name, params.join(", "))
    }
}

/// A controller with at least one reported action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerResult {
    pub class_name: String,
    /// First source file of the class, or empty.
    pub file_path: String,
    pub actions: Vec<ActionResult>,
}

/// A project with at least one reported controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectResult {
    pub name: String,
    pub file_path: String,
    pub controllers: Vec<ControllerResult>,
}

/// Result of one audit pass, sorted at every level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub projects: Vec<ProjectResult>,
}

impl AnalysisReport {
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn controller_count(&self) -> usize {
        self.projects.iter().map(|p| p.controllers.len()).sum()
    }

    pub fn action_count(&self) -> usize {
        self.projects
            .iter()
            .flat_map(|p| &p.controllers)
            .map(|c| c.actions.len())
            .sum()
    }

    pub fn finding_count(&self) -> usize {
        self.projects
            .iter()
            .flat_map(|p| &p.controllers)
            .flat_map(|c| &c.actions)
            .map(|a| a.enum_params.len())
            .sum()
    }
}
