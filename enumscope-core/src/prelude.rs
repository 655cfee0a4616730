//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use enumscope_core::prelude::*;
//! ```
//!
//! Brings in what a typical caller needs to load a solution, run an audit
//! and print the result.

// Running an audit
pub use crate::audit::{CancellationToken, EnumAudit};
pub use crate::config::{load_config, AuditConfig};
pub use crate::error::{AuditError, AuditResult};

// Report model
pub use crate::findings::{ActionResult, AnalysisReport, ControllerResult, EnumFinding, ProjectResult};

// Inputs
pub use crate::symbols::{load_solution, InMemorySolution, ProjectInfo, SolutionProvider};

// Output
pub use crate::report::{print_json, print_plain};
