//! Output formatting - plaintext and JSON.

use chrono::Utc;
use serde::Serialize;

use crate::findings::AnalysisReport;

/// Totals shown alongside the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub projects: usize,
    pub controllers: usize,
    pub actions: usize,
    pub findings: usize,
}

impl ReportSummary {
    pub fn of(report: &AnalysisReport) -> Self {
        Self {
            projects: report.projects.len(),
            controllers: report.controller_count(),
            actions: report.action_count(),
            findings: report.finding_count(),
        }
    }
}

#[derive(Serialize)]
struct JsonEnvelope<'a> {
    tool: &'static str,
    version: &'static str,
    generated_at: String,
    summary: ReportSummary,
    projects: &'a [crate::findings::ProjectResult],
}

/// Renders the report as an indented text tree.
pub fn render_plain(report: &AnalysisReport) -> String {
    if report.is_empty() {
        return "No enum-bearing request parameters found.\n".to_string();
    }

    let mut out = String::new();
    for project in &report.projects {
        out.push_str(&format!("Project: {} ({})\n", project.name, project.file_path));
        for controller in &project.controllers {
            if controller.file_path.is_empty() {
                out.push_str(&format!("  Controller: {}\n", controller.class_name));
            } else {
                out.push_str(&format!(
                    "  Controller: {} ({})\n",
                    controller.class_name, controller.file_path
                ));
            }
            for action in &controller.actions {
                out.push_str(&format!("    Action: {} -> {}\n", action.signature(), action.return_type));
                for finding in &action.enum_params {
                    out.push_str(&format!("      - {}: {}\n", finding.path, finding.enum_type));
                }
            }
        }
    }

    let summary = ReportSummary::of(report);
    out.push_str(&format!(
        "\n{} enum finding(s) in {} action(s) across {} controller(s) in {} project(s).\n",
        summary.findings, summary.actions, summary.controllers, summary.projects
    ));
    out
}

/// Renders the report as pretty JSON with a summary header.
pub fn render_json(report: &AnalysisReport) -> serde_json::Result<String> {
    let envelope = JsonEnvelope {
        tool: "enumscope",
        version: env!("CARGO_PKG_VERSION"),
        generated_at: Utc::now().to_rfc3339(),
        summary: ReportSummary::of(report),
        projects: &report.projects,
    };
    serde_json::to_string_pretty(&envelope)
}

/// Prints the report in plain text format.
pub fn print_plain(report: &AnalysisReport) {
    print!("{}", render_plain(report));
}

/// Prints the report in JSON format.
///
/// Falls back to the plain rendering if serialization fails.
pub fn print_json(report: &AnalysisReport) {
    match render_json(report) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("[WARN] JSON serialization failed: {}", e);
            print_plain(report);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::findings::{ActionResult, ControllerResult, EnumFinding, ParameterInfo, ProjectResult};

    fn sample() -> AnalysisReport {
        let action = ActionResult::new(
            "Get",
            "IActionResult",
            vec![ParameterInfo {
                name: "filter".into(),
                type_name: "OrderFilter".into(),
            }],
            vec![
                EnumFinding::new("Status", "filter.Status"),
                EnumFinding::new("Priority", "filter.Priorities"),
            ],
        )
        .unwrap();
        AnalysisReport {
            projects: vec![ProjectResult {
                name: "Shop".into(),
                file_path: "Shop.csproj".into(),
                controllers: vec![ControllerResult {
                    class_name: "OrdersController".into(),
                    file_path: "Controllers/OrdersController.cs".into(),
                    actions: vec![action],
                }],
            }],
        }
    }

    #[test]
    fn test_plain_tree() {
        let text = render_plain(&sample());
        assert!(text.starts_with("Project: Shop (Shop.csproj)\n"));
        assert!(text.contains("  Controller: OrdersController (Controllers/OrdersController.cs)\n"));
        assert!(text.contains("    Action: Get(OrderFilter filter) -> IActionResult\n"));
        assert!(text.contains("      - filter.Status: Status\n      - filter.Priorities: Priority\n"));
        assert!(text.contains("2 enum finding(s) in 1 action(s)"));
    }

    #[test]
    fn test_plain_empty() {
        assert_eq!(
            render_plain(&AnalysisReport::default()),
            "No enum-bearing request parameters found.\n"
        );
    }

    #[test]
    fn test_json_envelope() {
        let json = render_json(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["tool"], "enumscope");
        assert_eq!(value["summary"]["findings"], 2);
        assert_eq!(
            value["projects"][0]["controllers"][0]["actions"][0]["enum_params"][1]["path"],
            "filter.Priorities"
        );
        assert!(value["generated_at"].as_str().is_some());
    }
}
