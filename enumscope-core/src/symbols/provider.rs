//! The seam to whatever turns a solution on disk into symbol graphs.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::compilation::Compilation;
use crate::error::AuditResult;

/// Identity and metadata of one project in a solution.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectInfo {
    /// Stable identity; two projects may share a display name.
    pub id: String,
    pub name: String,
    pub file_path: String,
    /// Source language as reported by the build system (`C#`, `Visual Basic`, ...).
    pub language: String,
}

impl ProjectInfo {
    /// A project whose identity is its file path.
    pub fn new(name: impl Into<String>, file_path: impl Into<String>, language: impl Into<String>) -> Self {
        let file_path = file_path.into();
        Self {
            id: file_path.clone(),
            name: name.into(),
            file_path,
            language: language.into(),
        }
    }
}

/// Capability set the audit needs from a loaded solution.
///
/// `compilation` may block while the build system produces a graph. Returning
/// `Ok(None)` means the graph is unavailable and the project is skipped; any
/// `Err` aborts the pass.
pub trait SolutionProvider {
    /// Projects of the loaded solution, in solution order.
    fn projects(&self) -> Vec<ProjectInfo>;

    /// Compiled symbol graph of `project`.
    fn compilation(&self, project: &ProjectInfo) -> AuditResult<Option<Arc<Compilation>>>;
}

/// A solution whose compilations are already in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySolution {
    projects: Vec<(ProjectInfo, Option<Arc<Compilation>>)>,
}

impl InMemorySolution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a project; `None` models a project that fails to compile.
    pub fn with_project(mut self, project: ProjectInfo, compilation: Option<Compilation>) -> Self {
        self.push(project, compilation);
        self
    }

    /// Adds a project, suffixing its id (`Api.csproj#2`) if another project already uses it.
    pub fn push(&mut self, mut project: ProjectInfo, compilation: Option<Compilation>) {
        if self.contains_id(&project.id) {
            let mut n = 2;
            while self.contains_id(&format!("{}#{}", project.id, n)) {
                n += 1;
            }
            project.id = format!("{}#{}", project.id, n);
        }
        self.projects.push((project, compilation.map(Arc::new)));
    }

    fn contains_id(&self, id: &str) -> bool {
        self.projects.iter().any(|(p, _)| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

impl SolutionProvider for InMemorySolution {
    fn projects(&self) -> Vec<ProjectInfo> {
        self.projects.iter().map(|(p, _)| p.clone()).collect()
    }

    fn compilation(&self, project: &ProjectInfo) -> AuditResult<Option<Arc<Compilation>>> {
        Ok(self
            .projects
            .iter()
            .find(|(p, _)| p.id == project.id)
            .and_then(|(_, c)| c.clone()))
    }
}
