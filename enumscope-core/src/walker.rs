//! Enum discovery over the type graph of a request parameter.
//!
//! Starting from a parameter's declared type, the walker descends through
//! arrays, `Nullable<T>`, generic arguments and settable properties, and
//! records every enum it reaches together with the dotted property path.
//!
//! Traversal rules:
//! - Arrays, `Nullable<T>` and generic arguments keep the current path;
//!   only properties extend it (`filter` → `filter.Status`).
//! - Every descent costs one unit of depth, whatever its kind. The walk
//!   stops silently once the budget goes negative.
//! - A named type is expanded at most once per walk. The visited set
//!   belongs to one top-level parameter, so a second parameter of the same
//!   type reports its enums again.
//! - Enums are terminal and never enter the visited set.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::trace;

use crate::findings::EnumFinding;
use crate::naming::display_type;
use crate::symbols::{Compilation, TypeDecl, TypeKind, TypeRef};

/// Identities of named types already expanded in the current walk.
pub type VisitedSet = HashSet<TypeRef>;

/// Walks type graphs of one compilation.
pub struct TypeGraphWalker<'a> {
    compilation: &'a Compilation,
}

impl<'a> TypeGraphWalker<'a> {
    pub fn new(compilation: &'a Compilation) -> Self {
        Self { compilation }
    }

    /// Walks one top-level parameter with a fresh visited set.
    pub fn walk_parameter(&self, ty: &TypeRef, name: &str, max_depth: i32) -> Vec<EnumFinding> {
        let mut visited = VisitedSet::new();
        let mut findings = Vec::new();
        self.walk(ty, name, &mut visited, max_depth, &mut findings);
        findings
    }

    /// Appends every enum reachable from `ty` to `findings`.
    pub fn walk(
        &self,
        ty: &TypeRef,
        path: &str,
        visited: &mut VisitedSet,
        depth: i32,
        findings: &mut Vec<EnumFinding>,
    ) {
        if depth < 0 {
            return;
        }

        let ty = ty.without_annotation();

        if let Some(element) = ty.element_type() {
            self.walk(element, path, visited, depth - 1, findings);
            return;
        }

        if ty.qualified_name().is_none() {
            return;
        }

        let decl = self.compilation.resolve(&ty);
        if decl.is_some_and(|d| d.kind == TypeKind::Enum) {
            trace!(path = %path, enum_type = %display_type(&ty), "enum reached");
            findings.push(EnumFinding::new(display_type(&ty), path));
            return;
        }

        if !visited.insert(ty.erase_annotations()) {
            return;
        }

        if let Some(inner) = ty.nullable_value_underlying() {
            self.walk(inner, path, visited, depth - 1, findings);
            return;
        }

        for argument in ty.type_arguments() {
            self.walk(argument, path, visited, depth - 1, findings);
        }

        let Some(decl) = decl else {
            return;
        };
        if matches!(decl.kind, TypeKind::Class | TypeKind::Struct) {
            for (name, property_ty) in self.bindable_properties(&ty, decl) {
                let child = format!("{}.{}", path, name);
                self.walk(&property_ty, &child, visited, depth - 1, findings);
            }
        }
    }

    /// Settable public instance properties of `ty`, most derived first.
    ///
    /// Declared types are instantiated with the type arguments of `ty` (and of
    /// each generic base). A property hidden by a same-named one on a more
    /// derived type is listed once.
    fn bindable_properties(&self, ty: &TypeRef, decl: &Arc<TypeDecl>) -> Vec<(String, TypeRef)> {
        let mut properties = Vec::new();
        let mut seen_names = HashSet::new();
        let mut seen_types = HashSet::new();
        let mut current = Some((ty.clone(), Arc::clone(decl)));

        while let Some((current_ty, current_decl)) = current.take() {
            if !seen_types.insert(current_ty.erase_annotations()) {
                break;
            }
            let bindings = current_decl.bindings(&current_ty);
            for property in current_decl.properties.iter().filter(|p| p.is_bindable()) {
                if seen_names.insert(property.name.clone()) {
                    properties.push((property.name.clone(), property.ty.substitute(&bindings)));
                }
            }
            current = current_decl.base_type.as_ref().and_then(|base| {
                let base = base.substitute(&bindings);
                self.compilation
                    .resolve(&base)
                    .map(|base_decl| (base.clone(), Arc::clone(base_decl)))
            });
        }

        properties
    }
}
