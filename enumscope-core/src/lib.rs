//! enumscope-core: finds enum types reachable from web-API request parameters
//!
//! Given the compiled symbol graphs of a solution, this library locates
//! controller classes, their action methods and the parameters bound from
//! request data, then walks each parameter's type graph to report every enum
//! that can arrive over HTTP, with the dotted path that reaches it.
//!
//! # Quick Start
//!
//! Use the [`prelude`] module for convenient imports:
//!
//! ```rust,ignore
//! use enumscope_core::prelude::*;
//!
//! let solution = load_solution(Path::new("shop.symbols.json"))?;
//! let report = EnumAudit::builder().solution(&solution).build()?.run()?;
//!
//! for project in &report.projects {
//!     for controller in &project.controllers {
//!         for action in &controller.actions {
//!             for finding in &action.enum_params {
//!                 println!("{}.{}: {} via {}", controller.class_name,
//!                     action.method_name, finding.enum_type, finding.path);
//!             }
//!         }
//!     }
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`symbols`]: symbol model, provider seam, JSON symbol dumps
//! - [`classify`]: controller / action / request-parameter predicates
//! - [`naming`]: display and qualified names of types and attributes
//! - [`walker`]: depth-bounded, cycle-safe enum discovery
//! - [`aggregate`]: report tree construction, dedup and ordering
//! - [`audit`]: the pass itself, with progress and cancellation
//! - [`report`]: plain-text and JSON rendering
//! - [`config`]: `enumscope.toml` loading
//! - [`error`]: typed error handling

pub mod aggregate;
pub mod audit;
pub mod classify;
pub mod config;
pub mod error;
pub mod findings;
pub mod logging;
pub mod naming;
pub mod prelude;
pub mod report;
pub mod symbols;
pub mod walker;

// ============================================================================
// Explicit Re-exports (avoiding glob imports for clear API surface)
// ============================================================================

// Error types
pub use error::{AuditError, AuditResult, IoResultExt, ProviderFault};

// Audit entry point
pub use audit::{CancellationToken, EnumAudit, EnumAuditBuilder};

// Aggregation
pub use aggregate::ReportAggregator;

// Classification
pub use classify::{derives_from_controller_base, has_controller_suffix, Classifier};

// Configuration
pub use config::{load_config, load_config_file, AuditConfig, CONFIG_FILE_NAME, DEFAULT_MAX_DEPTH};

// Report model
pub use findings::{
    ActionResult, AnalysisReport, ControllerResult, EnumFinding, ParameterInfo, ProjectResult,
};

// Logging
pub use logging::{init_structured_logging, log_error, log_info, log_warn};

// Naming
pub use naming::{
    attribute_matches, display_declared_type, display_type, normalize_attribute_name,
    qualified_name, simple_name,
};

// Reporting
pub use report::{print_json, print_plain, render_json, render_plain, ReportSummary};

// Symbols
pub use symbols::{
    load_solution, Compilation, CompilationBuilder, InMemorySolution, ProjectInfo,
    SolutionProvider, TypeRef,
};

// Walking
pub use walker::{TypeGraphWalker, VisitedSet};
