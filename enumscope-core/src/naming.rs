//! Canonical type names for reports and comparisons.
//!
//! Two renderings exist:
//! - [`display_type`]: what a C# developer would write, with keyword
//!   aliases, generic arguments, `T?` for nullable values and the `?`
//!   annotation marker. Used for report fields.
//! - [`qualified_name`]: namespace-qualified name without generic
//!   arguments. Used for exact-match comparisons against configured names.

use crate::symbols::{DeclaredType, TypeRef};

/// Suffix the C# compiler lets attribute usages omit.
pub const ATTRIBUTE_SUFFIX: &str = "Attribute";

const SPECIAL_TYPES: &[(&str, &str)] = &[
    ("System.Boolean", "bool"),
    ("System.Byte", "byte"),
    ("System.SByte", "sbyte"),
    ("System.Char", "char"),
    ("System.Decimal", "decimal"),
    ("System.Double", "double"),
    ("System.Single", "float"),
    ("System.Int16", "short"),
    ("System.UInt16", "ushort"),
    ("System.Int32", "int"),
    ("System.UInt32", "uint"),
    ("System.Int64", "long"),
    ("System.UInt64", "ulong"),
    ("System.IntPtr", "nint"),
    ("System.UIntPtr", "nuint"),
    ("System.Object", "object"),
    ("System.String", "string"),
    ("System.Void", "void"),
];

fn keyword_for(qualified: &str) -> Option<&'static str> {
    SPECIAL_TYPES
        .iter()
        .find(|(name, _)| *name == qualified)
        .map(|(_, keyword)| *keyword)
}

/// Renders a type reference for display.
pub fn display_type(ty: &TypeRef) -> String {
    let mut out = String::new();
    write_display(ty, &mut out);
    out
}

fn write_display(ty: &TypeRef, out: &mut String) {
    match ty {
        TypeRef::Named {
            name,
            type_arguments,
            nullable,
        } => {
            if let Some(inner) = ty.nullable_value_underlying() {
                write_display(inner, out);
                out.push('?');
                return;
            }
            out.push_str(keyword_for(name).unwrap_or(name.as_str()));
            if !type_arguments.is_empty() {
                out.push('<');
                for (i, arg) in type_arguments.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    write_display(arg, out);
                }
                out.push('>');
            }
            if *nullable {
                out.push('?');
            }
        }
        TypeRef::Array {
            element,
            rank,
            nullable,
        } => {
            write_display(element, out);
            out.push('[');
            for _ in 1..*rank {
                out.push(',');
            }
            out.push(']');
            if *nullable {
                out.push('?');
            }
        }
        TypeRef::TypeParameter { name, nullable } => {
            out.push_str(name);
            if *nullable {
                out.push('?');
            }
        }
    }
}

/// Renders a declared type for display: qualified name plus its type parameters.
pub fn display_declared_type(ty: &DeclaredType) -> String {
    if ty.decl.type_parameters.is_empty() {
        ty.qualified_name.clone()
    } else {
        format!("{}<{}>", ty.qualified_name, ty.decl.type_parameters.join(", "))
    }
}

/// Qualified name without generic arguments or annotations.
pub fn qualified_name(ty: &TypeRef) -> String {
    match ty {
        TypeRef::Named { name, .. } => name.clone(),
        TypeRef::Array { element, rank, .. } => {
            format!("{}[{}]", qualified_name(element), ",".repeat((*rank as usize).saturating_sub(1)))
        }
        TypeRef::TypeParameter { name, .. } => name.clone(),
    }
}

/// Last dotted segment of a qualified name.
pub fn simple_name(qualified: &str) -> &str {
    qualified.rsplit('.').next().unwrap_or(qualified)
}

/// Simple attribute name with a trailing `Attribute` removed.
///
/// `Microsoft.AspNetCore.Mvc.NonActionAttribute`, `NonActionAttribute` and
/// `NonAction` all normalize to `NonAction`.
pub fn normalize_attribute_name(name: &str) -> &str {
    let simple = simple_name(name);
    match simple.strip_suffix(ATTRIBUTE_SUFFIX) {
        Some(stripped) if !stripped.is_empty() => stripped,
        _ => simple,
    }
}

/// Whether an applied attribute matches a configured marker name.
pub fn attribute_matches(applied: &str, marker: &str) -> bool {
    normalize_attribute_name(applied) == normalize_attribute_name(marker)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::TypeDecl;
    use std::sync::Arc;

    #[test]
    fn test_display_keywords_and_generics() {
        let ty = TypeRef::generic(
            "System.Collections.Generic.Dictionary",
            [TypeRef::named("System.String"), TypeRef::named("Shop.Status")],
        );
        assert_eq!(
            display_type(&ty),
            "System.Collections.Generic.Dictionary<string, Shop.Status>"
        );
    }

    #[test]
    fn test_display_nullable_forms() {
        let value = TypeRef::nullable_value(TypeRef::named("System.Int32"));
        assert_eq!(display_type(&value), "int?");

        let reference = TypeRef::named("Shop.OrderFilter").annotated();
        assert_eq!(display_type(&reference), "Shop.OrderFilter?");
    }

    #[test]
    fn test_display_arrays() {
        let jagged = TypeRef::array(TypeRef::array(TypeRef::named("Status")));
        assert_eq!(display_type(&jagged), "Status[][]");

        let matrix = TypeRef::Array {
            element: Box::new(TypeRef::named("System.Byte")),
            rank: 2,
            nullable: true,
        };
        assert_eq!(display_type(&matrix), "byte[,]?");
    }

    #[test]
    fn test_qualified_name_drops_arguments() {
        let ty = TypeRef::generic("System.Collections.Generic.List", [TypeRef::named("Status")]).annotated();
        assert_eq!(qualified_name(&ty), "System.Collections.Generic.List");
        assert_eq!(
            qualified_name(&TypeRef::named("System.Threading.CancellationToken")),
            "System.Threading.CancellationToken"
        );
        assert_eq!(qualified_name(&TypeRef::array(TypeRef::named("Status"))), "Status[]");
    }

    #[test]
    fn test_display_declared_type() {
        let plain = DeclaredType {
            qualified_name: "Shop.Controllers.OrdersController".into(),
            decl: Arc::new(TypeDecl::class("OrdersController")),
        };
        assert_eq!(display_declared_type(&plain), "Shop.Controllers.OrdersController");

        let generic = DeclaredType {
            qualified_name: "Shop.Controllers.CrudController".into(),
            decl: Arc::new(TypeDecl::class("CrudController").with_type_parameters(["TModel", "TKey"])),
        };
        assert_eq!(
            display_declared_type(&generic),
            "Shop.Controllers.CrudController<TModel, TKey>"
        );
    }

    #[test]
    fn test_attribute_normalization() {
        assert_eq!(normalize_attribute_name("Microsoft.AspNetCore.Mvc.NonActionAttribute"), "NonAction");
        assert_eq!(normalize_attribute_name("NonAction"), "NonAction");
        assert_eq!(normalize_attribute_name("Attribute"), "Attribute");
        assert!(attribute_matches("FromServicesAttribute", "FromServices"));
        assert!(attribute_matches("FromServices", "FromServicesAttribute"));
        assert!(!attribute_matches("FromBody", "FromServices"));
    }

    #[test]
    fn test_simple_name() {
        assert_eq!(simple_name("Shop.Controllers.OrdersController"), "OrdersController");
        assert_eq!(simple_name("Program"), "Program");
    }
}
