//! Controller, action and request-parameter predicates.
//!
//! Each rule is a pure function over declarations. Controller detection is
//! two independent predicates tried in order: inheritance from a known
//! framework base, then the naming convention.

use crate::config::AuditConfig;
use crate::naming::{attribute_matches, qualified_name};
use crate::symbols::{
    Accessibility, AttributeRef, Compilation, MethodDecl, MethodKind, ParameterDecl, TypeDecl,
    TypeKind,
};

/// True if any type in the base chain of `decl` is one of `bases`, by exact qualified name.
pub fn derives_from_controller_base(decl: &TypeDecl, compilation: &Compilation, bases: &[String]) -> bool {
    compilation
        .base_chain(decl)
        .filter_map(|base| base.qualified_name())
        .any(|name| bases.iter().any(|b| b == name))
}

/// True if the simple type name ends with the controller suffix.
pub fn has_controller_suffix(name: &str, suffix: &str) -> bool {
    name.ends_with(suffix)
}

fn has_marker(attributes: &[AttributeRef], markers: &[String]) -> bool {
    attributes
        .iter()
        .any(|attr| markers.iter().any(|marker| attribute_matches(&attr.name, marker)))
}

/// Classification rules bound to one compilation and configuration.
pub struct Classifier<'a> {
    config: &'a AuditConfig,
    compilation: &'a Compilation,
}

impl<'a> Classifier<'a> {
    pub fn new(config: &'a AuditConfig, compilation: &'a Compilation) -> Self {
        Self { config, compilation }
    }

    /// Non-abstract class that inherits a framework controller base or is named like one.
    pub fn is_controller(&self, decl: &TypeDecl) -> bool {
        if decl.kind != TypeKind::Class || decl.is_abstract {
            return false;
        }
        derives_from_controller_base(decl, self.compilation, &self.config.controller_base_types)
            || has_controller_suffix(&decl.name, &self.config.controller_suffix)
    }

    /// Public, ordinary, non-static, non-abstract method that is not opted out.
    pub fn is_action_method(&self, method: &MethodDecl) -> bool {
        method.kind == MethodKind::Ordinary
            && !method.is_static
            && !method.is_abstract
            && method.accessibility == Accessibility::Public
            && !has_marker(&method.attributes, &self.config.non_action_attributes)
            && !method.is_explicit_interface_implementation
    }

    /// Parameter bound from request data rather than injected or framework-supplied.
    pub fn is_request_parameter(&self, parameter: &ParameterDecl) -> bool {
        if has_marker(&parameter.attributes, &self.config.injection_attributes) {
            return false;
        }
        let type_name = qualified_name(&parameter.ty);
        !self
            .config
            .excluded_parameter_types
            .iter()
            .any(|excluded| *excluded == type_name)
    }
}
