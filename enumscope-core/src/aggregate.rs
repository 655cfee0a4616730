//! Folds per-action findings into the report tree.
//!
//! Projects are matched by identity, controllers by exact display name and
//! actions by signature. Re-inserting a known action is a no-op. Nothing is
//! created until an action arrives, so the tree never holds empty nodes.
//!
//! Ordering is applied once in [`ReportAggregator::finish`]: projects,
//! controllers and actions ascending by ordinal name. Findings keep the
//! order in which they were discovered.

use crate::findings::{ActionResult, AnalysisReport, ControllerResult, ProjectResult};
use crate::symbols::ProjectInfo;

/// Accumulates action results for one audit pass.
#[derive(Debug, Default)]
pub struct ReportAggregator {
    /// Parallel to `projects`: identity of each project entry.
    project_ids: Vec<String>,
    projects: Vec<ProjectResult>,
}

impl ReportAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    fn project_mut(&mut self, project: &ProjectInfo) -> &mut ProjectResult {
        let index = match self.project_ids.iter().position(|id| *id == project.id) {
            Some(index) => index,
            None => {
                self.project_ids.push(project.id.clone());
                self.projects.push(ProjectResult {
                    name: project.name.clone(),
                    file_path: project.file_path.clone(),
                    controllers: Vec::new(),
                });
                self.projects.len() - 1
            }
        };
        &mut self.projects[index]
    }

    /// Adds an action under its project and controller.
    ///
    /// Returns `false` when an action with the same signature was already
    /// recorded for that controller.
    pub fn add_action(
        &mut self,
        project: &ProjectInfo,
        controller_name: &str,
        controller_file: &str,
        action: ActionResult,
    ) -> bool {
        let project = self.project_mut(project);

        let index = match project
            .controllers
            .iter()
            .position(|c| c.class_name == controller_name)
        {
            Some(index) => index,
            None => {
                project.controllers.push(ControllerResult {
                    class_name: controller_name.to_string(),
                    file_path: controller_file.to_string(),
                    actions: Vec::new(),
                });
                project.controllers.len() - 1
            }
        };
        let controller = &mut project.controllers[index];

        if controller.actions.iter().any(|a| a.has_same_signature(&action)) {
            return false;
        }
        controller.actions.push(action);
        true
    }

    /// Sorts every level and hands over the finished report.
    pub fn finish(self) -> AnalysisReport {
        let mut projects = self.projects;
        projects.sort_by(|a, b| a.name.cmp(&b.name));
        for project in &mut projects {
            project.controllers.sort_by(|a, b| a.class_name.cmp(&b.class_name));
            for controller in &mut project.controllers {
                controller.actions.sort_by(|a, b| a.method_name.cmp(&b.method_name));
            }
        }
        AnalysisReport { projects }
    }
}
