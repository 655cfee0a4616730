//! Builder-style entry point that runs one audit pass.
//!
//! ```rust,ignore
//! use enumscope_core::prelude::*;
//!
//! let solution = load_solution(Path::new("dumps/"))?;
//! let report = EnumAudit::builder()
//!     .solution(&solution)
//!     .progress(|line| eprintln!("{}", line))
//!     .build()?
//!     .run()?;
//!
//! for project in &report.projects {
//!     println!("{}: {} controller(s)", project.name, project.controllers.len());
//! }
//! ```
//!
//! The pass is sequential. Cancellation is checked before each project and
//! each controller; a cancelled pass returns [`AuditError::Cancelled`] and
//! no partial report.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::debug;

use crate::aggregate::ReportAggregator;
use crate::classify::Classifier;
use crate::config::AuditConfig;
use crate::error::{AuditError, AuditResult};
use crate::findings::{ActionResult, AnalysisReport, ParameterInfo};
use crate::logging::{log_info, log_warn};
use crate::naming::{display_declared_type, display_type};
use crate::symbols::{Compilation, DeclaredType, ProjectInfo, SolutionProvider};
use crate::walker::TypeGraphWalker;

/// Shared flag for cooperative cancellation. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Fails with [`AuditError::Cancelled`] once cancellation was requested.
    pub fn check(&self) -> AuditResult<()> {
        if self.is_cancelled() {
            Err(AuditError::Cancelled)
        } else {
            Ok(())
        }
    }
}

type ProgressFn<'a> = Box<dyn FnMut(&str) + 'a>;

/// Configures an [`EnumAudit`].
#[derive(Default)]
pub struct EnumAuditBuilder<'a> {
    solution: Option<&'a dyn SolutionProvider>,
    config: AuditConfig,
    progress: Option<ProgressFn<'a>>,
    cancellation: CancellationToken,
}

impl<'a> EnumAuditBuilder<'a> {
    /// The solution to analyze. Required.
    pub fn solution(mut self, solution: &'a dyn SolutionProvider) -> Self {
        self.solution = Some(solution);
        self
    }

    pub fn config(mut self, config: AuditConfig) -> Self {
        self.config = config;
        self
    }

    /// Receives one line per project started or skipped.
    pub fn progress(mut self, progress: impl FnMut(&str) + 'a) -> Self {
        self.progress = Some(Box::new(progress));
        self
    }

    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Fails with [`AuditError::InvalidInput`] when no solution was given.
    pub fn build(self) -> AuditResult<EnumAudit<'a>> {
        let solution = self
            .solution
            .ok_or_else(|| AuditError::invalid_input("no solution to analyze"))?;
        Ok(EnumAudit {
            solution,
            config: self.config,
            progress: self.progress,
            cancellation: self.cancellation,
        })
    }
}

/// One configured audit over a solution.
pub struct EnumAudit<'a> {
    solution: &'a dyn SolutionProvider,
    config: AuditConfig,
    progress: Option<ProgressFn<'a>>,
    cancellation: CancellationToken,
}

impl<'a> EnumAudit<'a> {
    pub fn builder() -> EnumAuditBuilder<'a> {
        EnumAuditBuilder::default()
    }

    pub fn config(&self) -> &AuditConfig {
        &self.config
    }

    fn emit(&mut self, line: &str) {
        if let Some(progress) = self.progress.as_mut() {
            progress(line);
        }
    }

    /// Runs the pass and returns the sorted report.
    pub fn run(&mut self) -> AuditResult<AnalysisReport> {
        let mut aggregator = ReportAggregator::new();

        for project in self.solution.projects() {
            self.cancellation.check()?;

            if !project.language.eq_ignore_ascii_case(&self.config.target_language) {
                debug!(project = %project.name, language = %project.language, "skipping project in other language");
                continue;
            }

            self.emit(&format!("Analyzing project {}", project.name));
            log_info(&format!("analyzing project {}", project.name));

            let Some(compilation) = self.solution.compilation(&project)? else {
                let notice = format!("Skipping project {}: compilation unavailable", project.name);
                self.emit(&notice);
                log_warn(&notice);
                continue;
            };

            self.analyze_project(&project, &compilation, &mut aggregator)?;
        }

        Ok(aggregator.finish())
    }

    fn analyze_project(
        &self,
        project: &ProjectInfo,
        compilation: &Compilation,
        aggregator: &mut ReportAggregator,
    ) -> AuditResult<()> {
        let classifier = Classifier::new(&self.config, compilation);
        let walker = TypeGraphWalker::new(compilation);

        for controller in compilation
            .source_types()
            .into_iter()
            .filter(|t| classifier.is_controller(&t.decl))
        {
            self.cancellation.check()?;
            self.analyze_controller(project, &controller, &classifier, &walker, aggregator);
        }
        Ok(())
    }

    fn analyze_controller(
        &self,
        project: &ProjectInfo,
        controller: &DeclaredType,
        classifier: &Classifier<'_>,
        walker: &TypeGraphWalker<'_>,
        aggregator: &mut ReportAggregator,
    ) {
        let class_name = display_declared_type(controller);
        let file_path = controller
            .decl
            .locations
            .first()
            .map(|l| l.file.as_str())
            .unwrap_or("");
        debug!(controller = %class_name, "scanning controller");

        for method in controller.decl.methods.iter().filter(|m| classifier.is_action_method(m)) {
            let parameters: Vec<_> = method
                .parameters
                .iter()
                .filter(|p| classifier.is_request_parameter(p))
                .collect();
            if parameters.is_empty() {
                continue;
            }

            let findings: Vec<_> = parameters
                .iter()
                .flat_map(|p| walker.walk_parameter(&p.ty, &p.name, self.config.max_depth))
                .collect();

            let parameter_infos = parameters
                .iter()
                .map(|p| ParameterInfo {
                    name: p.name.clone(),
                    type_name: display_type(&p.ty),
                })
                .collect();

            let Some(action) = ActionResult::new(
                method.name.clone(),
                display_type(&method.return_type),
                parameter_infos,
                findings,
            ) else {
                continue;
            };

            debug!(
                controller = %class_name,
                action = %method.name,
                findings = action.enum_params.len(),
                "enum-bearing action"
            );
            aggregator.add_action(project, &class_name, file_path, action);
        }
    }
}
