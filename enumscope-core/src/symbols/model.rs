//! Declarations and type references of a compiled symbol graph.
//!
//! The shapes mirror what a compiler front end reports for C# sources:
//! named types with members, and type references that may be constructed
//! generics, arrays, type parameters, or carry a nullable-reference
//! annotation. Everything is serde-friendly so a graph can be exchanged as a
//! JSON symbol dump.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Qualified name of the one-argument nullable value wrapper.
pub const NULLABLE_VALUE_TYPE: &str = "System.Nullable";

fn is_false(value: &bool) -> bool {
    !*value
}

fn default_rank() -> u32 {
    1
}

fn is_single_rank(rank: &u32) -> bool {
    *rank == 1
}

/// Kind of a named type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    #[default]
    Class,
    Struct,
    Interface,
    Enum,
    Delegate,
}

/// Declared accessibility of a type or member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accessibility {
    Public,
    Internal,
    Protected,
    ProtectedInternal,
    PrivateProtected,
    #[default]
    Private,
}

/// Kind of a method symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodKind {
    #[default]
    Ordinary,
    Constructor,
    StaticConstructor,
    Destructor,
    PropertyGet,
    PropertySet,
    EventAdd,
    EventRemove,
    Operator,
    Conversion,
    ExplicitInterfaceImplementation,
    LocalFunction,
}

/// A reference to a type as it appears in a signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeRef {
    /// A named type, possibly constructed with type arguments.
    Named {
        /// Qualified name without generic arguments (`System.Collections.Generic.List`).
        name: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        type_arguments: Vec<TypeRef>,
        #[serde(default, skip_serializing_if = "is_false")]
        nullable: bool,
    },
    /// An array of `element`.
    Array {
        element: Box<TypeRef>,
        #[serde(default = "default_rank", skip_serializing_if = "is_single_rank")]
        rank: u32,
        #[serde(default, skip_serializing_if = "is_false")]
        nullable: bool,
    },
    /// A type parameter of the enclosing type or method.
    TypeParameter {
        name: String,
        #[serde(default, skip_serializing_if = "is_false")]
        nullable: bool,
    },
}

impl TypeRef {
    /// A non-generic named type.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named {
            name: name.into(),
            type_arguments: Vec::new(),
            nullable: false,
        }
    }

    /// A constructed generic type.
    pub fn generic(name: impl Into<String>, type_arguments: impl IntoIterator<Item = TypeRef>) -> Self {
        Self::Named {
            name: name.into(),
            type_arguments: type_arguments.into_iter().collect(),
            nullable: false,
        }
    }

    /// `System.Nullable<inner>`.
    pub fn nullable_value(inner: TypeRef) -> Self {
        Self::generic(NULLABLE_VALUE_TYPE, [inner])
    }

    /// A single-dimensional array.
    pub fn array(element: TypeRef) -> Self {
        Self::Array {
            element: Box::new(element),
            rank: 1,
            nullable: false,
        }
    }

    pub fn type_parameter(name: impl Into<String>) -> Self {
        Self::TypeParameter {
            name: name.into(),
            nullable: false,
        }
    }

    /// The same reference with the nullable-reference annotation set.
    pub fn annotated(mut self) -> Self {
        self.set_annotation(true);
        self
    }

    pub fn is_annotated(&self) -> bool {
        match self {
            Self::Named { nullable, .. }
            | Self::Array { nullable, .. }
            | Self::TypeParameter { nullable, .. } => *nullable,
        }
    }

    fn set_annotation(&mut self, value: bool) {
        match self {
            Self::Named { nullable, .. }
            | Self::Array { nullable, .. }
            | Self::TypeParameter { nullable, .. } => *nullable = value,
        }
    }

    /// Strips the top-level nullable-reference annotation.
    pub fn without_annotation(&self) -> Self {
        let mut stripped = self.clone();
        stripped.set_annotation(false);
        stripped
    }

    /// Strips nullable-reference annotations at every level.
    ///
    /// Two references that differ only in annotations denote the same type,
    /// so this is the form used as an identity key.
    pub fn erase_annotations(&self) -> Self {
        match self {
            Self::Named {
                name,
                type_arguments,
                ..
            } => Self::Named {
                name: name.clone(),
                type_arguments: type_arguments.iter().map(Self::erase_annotations).collect(),
                nullable: false,
            },
            Self::Array { element, rank, .. } => Self::Array {
                element: Box::new(element.erase_annotations()),
                rank: *rank,
                nullable: false,
            },
            Self::TypeParameter { name, .. } => Self::TypeParameter {
                name: name.clone(),
                nullable: false,
            },
        }
    }

    /// Qualified name of a named type, without generic arguments.
    pub fn qualified_name(&self) -> Option<&str> {
        match self {
            Self::Named { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Generic arguments of a constructed named type (empty otherwise).
    pub fn type_arguments(&self) -> &[TypeRef] {
        match self {
            Self::Named { type_arguments, .. } => type_arguments,
            _ => &[],
        }
    }

    /// Element type of an array.
    pub fn element_type(&self) -> Option<&TypeRef> {
        match self {
            Self::Array { element, .. } => Some(element),
            _ => None,
        }
    }

    /// The `T` of `System.Nullable<T>`.
    pub fn nullable_value_underlying(&self) -> Option<&TypeRef> {
        match self {
            Self::Named {
                name,
                type_arguments,
                ..
            } if name == NULLABLE_VALUE_TYPE && type_arguments.len() == 1 => type_arguments.first(),
            _ => None,
        }
    }

    /// Replaces type parameters bound in `bindings`.
    ///
    /// An annotated type parameter keeps its annotation on the substituted type.
    pub fn substitute(&self, bindings: &HashMap<&str, &TypeRef>) -> Self {
        if bindings.is_empty() {
            return self.clone();
        }
        match self {
            Self::Named {
                name,
                type_arguments,
                nullable,
            } => Self::Named {
                name: name.clone(),
                type_arguments: type_arguments.iter().map(|a| a.substitute(bindings)).collect(),
                nullable: *nullable,
            },
            Self::Array {
                element,
                rank,
                nullable,
            } => Self::Array {
                element: Box::new(element.substitute(bindings)),
                rank: *rank,
                nullable: *nullable,
            },
            Self::TypeParameter { name, nullable } => match bindings.get(name.as_str()) {
                Some(bound) if *nullable => (*bound).clone().annotated(),
                Some(bound) => (*bound).clone(),
                None => self.clone(),
            },
        }
    }
}

/// An attribute applied to a symbol, identified by its attribute class name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttributeRef {
    /// Qualified or simple class name (`Microsoft.AspNetCore.Mvc.NonActionAttribute`).
    pub name: String,
}

impl AttributeRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// First in-source declaration site of a symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: String,
    #[serde(default)]
    pub line: usize,
}

/// A method parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<AttributeRef>,
}

impl ParameterDecl {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            attributes: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>) -> Self {
        self.attributes.push(AttributeRef::new(name));
        self
    }
}

/// The `set` or `init` accessor of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetterDecl {
    #[serde(default)]
    pub accessibility: Accessibility,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_init_only: bool,
}

/// A property (or indexer) member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default)]
    pub accessibility: Accessibility,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_static: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_indexer: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setter: Option<SetterDecl>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<AttributeRef>,
}

impl PropertyDecl {
    /// A `public T Name { get; set; }` auto-property.
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            accessibility: Accessibility::Public,
            is_static: false,
            is_indexer: false,
            setter: Some(SetterDecl {
                accessibility: Accessibility::Public,
                is_init_only: false,
            }),
            attributes: Vec::new(),
        }
    }

    /// `{ get; init; }`
    pub fn init_only(mut self) -> Self {
        self.setter = Some(SetterDecl {
            accessibility: Accessibility::Public,
            is_init_only: true,
        });
        self
    }

    /// `{ get; }`
    pub fn read_only(mut self) -> Self {
        self.setter = None;
        self
    }

    pub fn with_setter_accessibility(mut self, accessibility: Accessibility) -> Self {
        if let Some(setter) = self.setter.as_mut() {
            setter.accessibility = accessibility;
        }
        self
    }

    pub fn with_accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn as_indexer(mut self) -> Self {
        self.is_indexer = true;
        self
    }

    /// Whether model binding can assign this property from request data.
    pub fn is_bindable(&self) -> bool {
        self.accessibility == Accessibility::Public
            && !self.is_static
            && !self.is_indexer
            && self
                .setter
                .is_some_and(|s| s.accessibility == Accessibility::Public)
    }
}

/// A method member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDecl {
    pub name: String,
    #[serde(default)]
    pub kind: MethodKind,
    #[serde(default)]
    pub accessibility: Accessibility,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_static: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_abstract: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_explicit_interface_implementation: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<AttributeRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ParameterDecl>,
    pub return_type: TypeRef,
}

impl MethodDecl {
    /// A public ordinary instance method.
    pub fn new(name: impl Into<String>, return_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            kind: MethodKind::Ordinary,
            accessibility: Accessibility::Public,
            is_static: false,
            is_abstract: false,
            is_explicit_interface_implementation: false,
            attributes: Vec::new(),
            parameters: Vec::new(),
            return_type,
        }
    }

    pub fn with_parameter(mut self, parameter: ParameterDecl) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>) -> Self {
        self.attributes.push(AttributeRef::new(name));
        self
    }

    pub fn with_kind(mut self, kind: MethodKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn as_abstract(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn as_explicit_interface_implementation(mut self) -> Self {
        self.is_explicit_interface_implementation = true;
        self
    }
}

/// A named type declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDecl {
    /// Simple name, without namespace or containing types.
    pub name: String,
    #[serde(default)]
    pub kind: TypeKind,
    #[serde(default)]
    pub accessibility: Accessibility,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_abstract: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_parameters: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_type: Option<TypeRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<AttributeRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<MethodDecl>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<PropertyDecl>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nested_types: Vec<Arc<TypeDecl>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<SourceLocation>,
}

impl TypeDecl {
    fn of_kind(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            accessibility: Accessibility::Public,
            is_abstract: false,
            type_parameters: Vec::new(),
            base_type: None,
            attributes: Vec::new(),
            methods: Vec::new(),
            properties: Vec::new(),
            nested_types: Vec::new(),
            locations: Vec::new(),
        }
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::of_kind(name, TypeKind::Class)
    }

    pub fn structure(name: impl Into<String>) -> Self {
        Self::of_kind(name, TypeKind::Struct)
    }

    pub fn enumeration(name: impl Into<String>) -> Self {
        Self::of_kind(name, TypeKind::Enum)
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self::of_kind(name, TypeKind::Interface)
    }

    pub fn with_base(mut self, base: TypeRef) -> Self {
        self.base_type = Some(base);
        self
    }

    pub fn with_type_parameters(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.type_parameters = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_property(mut self, property: PropertyDecl) -> Self {
        self.properties.push(property);
        self
    }

    pub fn with_method(mut self, method: MethodDecl) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>) -> Self {
        self.attributes.push(AttributeRef::new(name));
        self
    }

    pub fn with_nested(mut self, nested: TypeDecl) -> Self {
        self.nested_types.push(Arc::new(nested));
        self
    }

    pub fn with_location(mut self, file: impl Into<String>, line: usize) -> Self {
        self.locations.push(SourceLocation {
            file: file.into(),
            line,
        });
        self
    }

    pub fn as_abstract(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// Binds this declaration's type parameters to the arguments of `constructed`.
    ///
    /// Missing arguments leave the corresponding parameter unbound.
    pub fn bindings<'a>(&'a self, constructed: &'a TypeRef) -> HashMap<&'a str, &'a TypeRef> {
        self.type_parameters
            .iter()
            .map(String::as_str)
            .zip(constructed.type_arguments())
            .collect()
    }
}

/// A namespace and everything declared directly in it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamespaceDecl {
    /// Simple name; empty for the global namespace.
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub namespaces: Vec<NamespaceDecl>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<Arc<TypeDecl>>,
}

impl NamespaceDecl {
    pub fn global() -> Self {
        Self::default()
    }

    /// Finds or creates the nested namespace for a dotted path.
    pub fn namespace_mut(&mut self, dotted: &str) -> &mut NamespaceDecl {
        let mut current = self;
        for segment in dotted.split('.').filter(|s| !s.is_empty()) {
            let index = match current.namespaces.iter().position(|ns| ns.name == segment) {
                Some(index) => index,
                None => {
                    current.namespaces.push(NamespaceDecl {
                        name: segment.to_string(),
                        ..Default::default()
                    });
                    current.namespaces.len() - 1
                }
            };
            current = &mut current.namespaces[index];
        }
        current
    }
}
