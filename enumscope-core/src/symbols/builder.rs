//! Fluent construction of in-memory compilations.
//!
//! ```rust,ignore
//! let compilation = CompilationBuilder::new("Shop")
//!     .with_aspnet_core()
//!     .source_type("Shop.Models", TypeDecl::enumeration("Status"))
//!     .source_type(
//!         "Shop.Controllers",
//!         TypeDecl::class("OrdersController")
//!             .with_base(TypeRef::named("Microsoft.AspNetCore.Mvc.ControllerBase")),
//!     )
//!     .build();
//! ```

use std::sync::Arc;

use super::compilation::{Compilation, CompilationData};
use super::model::{NamespaceDecl, TypeDecl};

/// Builder for a [`Compilation`].
#[derive(Debug, Clone, Default)]
pub struct CompilationBuilder {
    assembly_name: String,
    global: NamespaceDecl,
    references: NamespaceDecl,
}

impl CompilationBuilder {
    pub fn new(assembly_name: impl Into<String>) -> Self {
        Self {
            assembly_name: assembly_name.into(),
            ..Default::default()
        }
    }

    /// Declares a type in source under a dotted namespace (empty for global).
    pub fn source_type(mut self, namespace: &str, decl: TypeDecl) -> Self {
        self.global.namespace_mut(namespace).types.push(Arc::new(decl));
        self
    }

    /// Declares a type from a referenced assembly.
    pub fn reference_type(mut self, namespace: &str, decl: TypeDecl) -> Self {
        self.references.namespace_mut(namespace).types.push(Arc::new(decl));
        self
    }

    /// Adds the ASP.NET Core controller bases as referenced types.
    pub fn with_aspnet_core(self) -> Self {
        self.reference_type("Microsoft.AspNetCore.Mvc", TypeDecl::class("ControllerBase").as_abstract())
            .reference_type(
                "Microsoft.AspNetCore.Mvc",
                TypeDecl::class("Controller")
                    .as_abstract()
                    .with_base(super::TypeRef::named("Microsoft.AspNetCore.Mvc.ControllerBase")),
            )
    }

    pub fn build(self) -> Compilation {
        Compilation::new(CompilationData {
            assembly_name: self.assembly_name,
            global_namespace: self.global,
            references: vec![self.references],
        })
    }
}
