//! A compiled symbol graph for one project.
//!
//! Holds the project's own namespace tree plus the metadata types it
//! references, and an index for resolving a [`TypeRef`] back to its
//! declaration.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::model::{NamespaceDecl, TypeDecl, TypeRef};

/// Lookup key: qualified name plus generic arity (`List` and `List<T>` differ).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct TypeKey {
    name: String,
    arity: usize,
}

/// A type declared in source, paired with its qualified name.
#[derive(Debug, Clone)]
pub struct DeclaredType {
    pub qualified_name: String,
    pub decl: Arc<TypeDecl>,
}

/// Serialized form of a [`Compilation`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompilationData {
    #[serde(default)]
    pub assembly_name: String,
    #[serde(default)]
    pub global_namespace: NamespaceDecl,
    /// Types from referenced assemblies; resolvable, never enumerated.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<NamespaceDecl>,
}

/// Compiled symbol graph of one project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "CompilationData", into = "CompilationData")]
pub struct Compilation {
    data: CompilationData,
    index: HashMap<TypeKey, Arc<TypeDecl>>,
}

impl From<CompilationData> for Compilation {
    fn from(data: CompilationData) -> Self {
        let mut index = HashMap::new();
        // Source declarations win over metadata with the same name.
        index_namespace(&data.global_namespace, "", &mut index);
        for reference in &data.references {
            index_namespace(reference, "", &mut index);
        }
        Self { data, index }
    }
}

impl From<Compilation> for CompilationData {
    fn from(compilation: Compilation) -> Self {
        compilation.data
    }
}

fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else if name.is_empty() {
        prefix.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}

fn index_namespace(ns: &NamespaceDecl, prefix: &str, index: &mut HashMap<TypeKey, Arc<TypeDecl>>) {
    let ns_name = join(prefix, &ns.name);
    for ty in &ns.types {
        index_type(ty, &ns_name, index);
    }
    for child in &ns.namespaces {
        index_namespace(child, &ns_name, index);
    }
}

fn index_type(ty: &Arc<TypeDecl>, prefix: &str, index: &mut HashMap<TypeKey, Arc<TypeDecl>>) {
    let name = join(prefix, &ty.name);
    for nested in &ty.nested_types {
        index_type(nested, &name, index);
    }
    index
        .entry(TypeKey {
            name,
            arity: ty.type_parameters.len(),
        })
        .or_insert_with(|| Arc::clone(ty));
}

fn collect_namespace(ns: &NamespaceDecl, prefix: &str, out: &mut Vec<DeclaredType>) {
    let ns_name = join(prefix, &ns.name);
    for ty in &ns.types {
        collect_type(ty, &ns_name, out);
    }
    for child in &ns.namespaces {
        collect_namespace(child, &ns_name, out);
    }
}

fn collect_type(ty: &Arc<TypeDecl>, prefix: &str, out: &mut Vec<DeclaredType>) {
    let qualified_name = join(prefix, &ty.name);
    out.push(DeclaredType {
        qualified_name: qualified_name.clone(),
        decl: Arc::clone(ty),
    });
    for nested in &ty.nested_types {
        collect_type(nested, &qualified_name, out);
    }
}

impl Compilation {
    pub fn new(data: CompilationData) -> Self {
        Self::from(data)
    }

    pub fn assembly_name(&self) -> &str {
        &self.data.assembly_name
    }

    pub fn global_namespace(&self) -> &NamespaceDecl {
        &self.data.global_namespace
    }

    /// Every type declared in source: namespaces recursively, nested types included.
    pub fn source_types(&self) -> Vec<DeclaredType> {
        let mut out = Vec::new();
        collect_namespace(&self.data.global_namespace, "", &mut out);
        out
    }

    /// Resolves a named type reference to its declaration.
    pub fn resolve(&self, ty: &TypeRef) -> Option<&Arc<TypeDecl>> {
        let name = ty.qualified_name()?;
        self.index.get(&TypeKey {
            name: name.to_string(),
            arity: ty.type_arguments().len(),
        })
    }

    /// Base types of `decl`, nearest first, as written on each declaration.
    ///
    /// Stops at the first base that cannot be resolved (after yielding it) and
    /// at the first repeated name, so a malformed inheritance loop ends.
    pub fn base_chain<'a>(&'a self, decl: &'a TypeDecl) -> BaseChain<'a> {
        BaseChain {
            compilation: self,
            next: decl.base_type.as_ref(),
            seen: HashSet::new(),
        }
    }
}

/// Iterator returned by [`Compilation::base_chain`].
pub struct BaseChain<'a> {
    compilation: &'a Compilation,
    next: Option<&'a TypeRef>,
    seen: HashSet<&'a str>,
}

impl<'a> Iterator for BaseChain<'a> {
    type Item = &'a TypeRef;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        if let Some(name) = current.qualified_name() {
            if !self.seen.insert(name) {
                return None;
            }
        }
        self.next = self
            .compilation
            .resolve(current)
            .and_then(|decl| decl.base_type.as_ref());
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Compilation {
        let mut global = NamespaceDecl::global();
        global.namespace_mut("Shop.Models").types.push(Arc::new(
            TypeDecl::class("Envelope")
                .with_type_parameters(["T"])
                .with_nested(TypeDecl::enumeration("Kind")),
        ));
        global
            .namespace_mut("Shop.Models")
            .types
            .push(Arc::new(TypeDecl::class("Envelope")));
        global.types.push(Arc::new(TypeDecl::class("Root")));

        let mut metadata = NamespaceDecl::global();
        metadata
            .namespace_mut("Microsoft.AspNetCore.Mvc")
            .types
            .push(Arc::new(TypeDecl::class("ControllerBase").as_abstract()));

        Compilation::new(CompilationData {
            assembly_name: "Shop".into(),
            global_namespace: global,
            references: vec![metadata],
        })
    }

    #[test]
    fn test_source_types_recurse_namespaces_and_nesting() {
        let names: Vec<String> = sample()
            .source_types()
            .into_iter()
            .map(|t| t.qualified_name)
            .collect();
        assert_eq!(
            names,
            vec!["Root", "Shop.Models.Envelope", "Shop.Models.Envelope.Kind", "Shop.Models.Envelope"]
        );
    }

    #[test]
    fn test_resolve_uses_arity() {
        let compilation = sample();
        let generic = TypeRef::generic("Shop.Models.Envelope", [TypeRef::named("System.Int32")]);
        let plain = TypeRef::named("Shop.Models.Envelope");

        assert_eq!(compilation.resolve(&generic).unwrap().type_parameters.len(), 1);
        assert!(compilation.resolve(&plain).unwrap().type_parameters.is_empty());
        assert!(compilation.resolve(&TypeRef::named("Shop.Models.Envelope.Kind")).is_some());
    }

    #[test]
    fn test_references_resolve_but_are_not_enumerated() {
        let compilation = sample();
        let base = TypeRef::named("Microsoft.AspNetCore.Mvc.ControllerBase");
        assert!(compilation.resolve(&base).is_some());
        assert!(compilation
            .source_types()
            .iter()
            .all(|t| t.qualified_name != "Microsoft.AspNetCore.Mvc.ControllerBase"));
    }

    #[test]
    fn test_base_chain_stops_on_loop() {
        let mut global = NamespaceDecl::global();
        global
            .types
            .push(Arc::new(TypeDecl::class("A").with_base(TypeRef::named("B"))));
        global
            .types
            .push(Arc::new(TypeDecl::class("B").with_base(TypeRef::named("A"))));
        let compilation = Compilation::new(CompilationData {
            global_namespace: global,
            ..Default::default()
        });

        let start = TypeDecl::class("C").with_base(TypeRef::named("A"));
        let chain: Vec<&str> = compilation
            .base_chain(&start)
            .filter_map(TypeRef::qualified_name)
            .collect();
        assert_eq!(chain, vec!["A", "B"]);
    }

    #[test]
    fn test_json_round_trip_rebuilds_index() {
        let json = serde_json::to_string(&sample()).unwrap();
        let restored: Compilation = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.assembly_name(), "Shop");
        assert!(restored
            .resolve(&TypeRef::named("Microsoft.AspNetCore.Mvc.ControllerBase"))
            .is_some());
    }
}
