//! Symbol graph model and the provider seam.
//!
//! The audit never talks to a compiler directly. It asks a
//! [`SolutionProvider`] for projects and their [`Compilation`]s, then walks
//! the declarations in memory.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────┐     ┌─────────────────────┐
//! │   dump.rs           │     │   builder.rs        │
//! │  ─────────────────  │     │  ─────────────────  │
//! │  JSON symbol dumps  │     │  hand-built graphs  │
//! └──────────┬──────────┘     └──────────┬──────────┘
//!            │                           │
//!            └───────────┬───────────────┘
//!                        ▼
//!            ┌─────────────────────┐
//!            │   provider.rs       │
//!            │  ─────────────────  │
//!            │  SolutionProvider   │
//!            └──────────┬──────────┘
//!                       ▼
//!            ┌─────────────────────┐
//!            │  compilation.rs     │
//!            │  model.rs           │
//!            └─────────────────────┘
//! ```

pub mod builder;
pub mod compilation;
pub mod dump;
pub mod model;
pub mod provider;

pub use builder::CompilationBuilder;
pub use compilation::{BaseChain, Compilation, CompilationData, DeclaredType};
pub use dump::{gather_dump_files, load_solution, ProjectDump, SolutionDump};
pub use model::{
    Accessibility, AttributeRef, MethodDecl, MethodKind, NamespaceDecl, ParameterDecl,
    PropertyDecl, SetterDecl, SourceLocation, TypeDecl, TypeKind, TypeRef, NULLABLE_VALUE_TYPE,
};
pub use provider::{InMemorySolution, ProjectInfo, SolutionProvider};
