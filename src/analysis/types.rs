//! Type-expression rendering.
//!
//! Converts a tree-sitter type node into its canonical textual form.
//! The rendering is deliberately lossy: inline interfaces, function types
//! and unsupported shapes collapse to fixed literals, and array lengths are
//! dropped. Downstream consumers rely on these exact strings.

use std::fmt;

use tree_sitter::Node;

/// A syntactic type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// A plain type name (`int`, `Config`, `T`).
    Named(String),
    /// `*T`
    Pointer(Box<TypeExpr>),
    /// `[]T`, also used for fixed-length arrays.
    Slice(Box<TypeExpr>),
    /// `map[K]V`
    Map(Box<TypeExpr>, Box<TypeExpr>),
    /// `pkg.Name`
    Qualified { package: String, name: String },
    /// Any inline interface, method set not expanded.
    Interface,
    /// `chan T`, regardless of direction.
    Chan(Box<TypeExpr>),
    /// Any function type, signature not expanded.
    Func,
    Unknown,
}

impl TypeExpr {
    /// Build a type expression from a node. Never fails; unrecognized
    /// shapes become `Unknown`.
    pub fn from_node(node: Node, source: &[u8]) -> Self {
        match node.kind() {
            "type_identifier" | "identifier" => {
                TypeExpr::Named(node.utf8_text(source).unwrap_or("").to_string())
            }
            "pointer_type" => TypeExpr::Pointer(Box::new(Self::from_child(
                node.named_child(0),
                source,
            ))),
            "slice_type" | "array_type" | "implicit_length_array_type" => TypeExpr::Slice(
                Box::new(Self::from_child(node.child_by_field_name("element"), source)),
            ),
            "map_type" => TypeExpr::Map(
                Box::new(Self::from_child(node.child_by_field_name("key"), source)),
                Box::new(Self::from_child(node.child_by_field_name("value"), source)),
            ),
            "qualified_type" => {
                let package = node.child_by_field_name("package");
                let name = node.child_by_field_name("name");
                match (package, name) {
                    (Some(package), Some(name)) => TypeExpr::Qualified {
                        package: package.utf8_text(source).unwrap_or("").to_string(),
                        name: name.utf8_text(source).unwrap_or("").to_string(),
                    },
                    _ => TypeExpr::Unknown,
                }
            }
            "interface_type" => TypeExpr::Interface,
            "channel_type" => TypeExpr::Chan(Box::new(Self::from_child(
                node.child_by_field_name("value"),
                source,
            ))),
            "function_type" => TypeExpr::Func,
            _ => TypeExpr::Unknown,
        }
    }

    fn from_child(child: Option<Node>, source: &[u8]) -> Self {
        child
            .map(|c| Self::from_node(c, source))
            .unwrap_or(TypeExpr::Unknown)
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Named(name) => write!(f, "{}", name),
            TypeExpr::Pointer(inner) => write!(f, "*{}", inner),
            TypeExpr::Slice(elem) => write!(f, "[]{}", elem),
            TypeExpr::Map(key, value) => write!(f, "map[{}]{}", key, value),
            TypeExpr::Qualified { package, name } => write!(f, "{}.{}", package, name),
            TypeExpr::Interface => write!(f, "interface{{}}"),
            TypeExpr::Chan(elem) => write!(f, "chan {}", elem),
            TypeExpr::Func => write!(f, "func"),
            TypeExpr::Unknown => write!(f, "unknown"),
        }
    }
}

/// Render a type node to text.
pub fn render(node: Node, source: &[u8]) -> String {
    TypeExpr::from_node(node, source).to_string()
}

/// Render an optional type node; `None` when the node is absent.
pub fn render_opt(node: Option<Node>, source: &[u8]) -> Option<String> {
    node.map(|n| render(n, source))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Render the type of `type X <expr>`.
    fn render_spec(expr: &str) -> String {
        let source = format!("package p\n\ntype X {}\n", expr);
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&tree_sitter_go::LANGUAGE.into())
            .unwrap();
        let tree = parser.parse(source.as_bytes(), None).unwrap();
        let root = tree.root_node();

        let mut cursor = root.walk();
        let decl = root
            .children(&mut cursor)
            .find(|n| n.kind() == "type_declaration")
            .expect("type declaration");
        let mut cursor = decl.walk();
        let spec = decl
            .children(&mut cursor)
            .find(|n| n.kind() == "type_spec")
            .expect("type spec");
        let ty = spec.child_by_field_name("type").expect("type field");
        render(ty, source.as_bytes())
    }

    #[test]
    fn test_identifiers() {
        assert_eq!(render_spec("int"), "int");
        assert_eq!(render_spec("Config"), "Config");
    }

    #[test]
    fn test_composites() {
        assert_eq!(render_spec("*Config"), "*Config");
        assert_eq!(render_spec("[]string"), "[]string");
        assert_eq!(render_spec("[]*User"), "[]*User");
        assert_eq!(render_spec("map[string]int"), "map[string]int");
        assert_eq!(render_spec("map[string][]*User"), "map[string][]*User");
        assert_eq!(render_spec("chan int"), "chan int");
        assert_eq!(render_spec("**int"), "**int");
    }

    #[test]
    fn test_arrays_drop_length() {
        assert_eq!(render_spec("[4]byte"), "[]byte");
    }

    #[test]
    fn test_qualified() {
        assert_eq!(render_spec("time.Time"), "time.Time");
        assert_eq!(render_spec("*http.Request"), "*http.Request");
        assert_eq!(render_spec("map[string]json.RawMessage"), "map[string]json.RawMessage");
    }

    #[test]
    fn test_lossy_literals() {
        assert_eq!(render_spec("interface{ Close() error }"), "interface{}");
        assert_eq!(render_spec("func(int) (string, error)"), "func");
        assert_eq!(render_spec("<-chan func()"), "chan func");
        assert_eq!(render_spec("map[string]interface{}"), "map[string]interface{}");
    }

    #[test]
    fn test_unsupported_shapes_render_unknown() {
        assert_eq!(render_spec("struct{ A int }"), "unknown");
        assert_eq!(render_spec("[]struct{}"), "[]unknown");
        assert_eq!(render_spec("List[int]"), "unknown");
    }

    #[test]
    fn test_display_of_constructed_values() {
        let expr = TypeExpr::Map(
            Box::new(TypeExpr::Named("string".to_string())),
            Box::new(TypeExpr::Chan(Box::new(TypeExpr::Qualified {
                package: "io".to_string(),
                name: "Reader".to_string(),
            }))),
        );
        assert_eq!(expr.to_string(), "map[string]chan io.Reader");
        assert_eq!(TypeExpr::Pointer(Box::new(TypeExpr::Unknown)).to_string(), "*unknown");
    }
}
