//! Go language analyzer using tree-sitter.
//!
//! Extracts:
//! - Struct types with their fields, plus the methods declared on them
//! - Interface types with their method signatures
//! - Top-level functions
//! - Imports
//! - Documentation coverage over structs, interfaces, functions and methods
//!
//! Methods are not linked to their receiver type in the tree, and may be
//! declared before or after it. They are collected by receiver name during
//! the walk and joined onto the struct records once the walk is done.

use std::collections::HashMap;
use std::path::Path;

use tree_sitter::{Language, Node, Parser};

use crate::analysis::docs::{leading_doc, DocTally};
use crate::analysis::types::{render, render_opt, TypeExpr};
use crate::analysis::{
    AnalyzeError, FileAnalysis, FunctionInfo, ImportInfo, InterfaceInfo, LanguageAnalyzer,
    Location, MethodInfo, ParameterInfo, ParsedFile, PropertyInfo, StructInfo,
};

/// Name recorded for parameters declared by type only.
const UNNAMED_PARAMETER: &str = "_";

/// Longest snippet of offending source quoted in a syntax error.
const ERROR_SNIPPET_LEN: usize = 32;

/// Go language analyzer.
pub struct GoAnalyzer {
    language: Language,
}

impl GoAnalyzer {
    /// Create a new Go analyzer.
    pub fn new() -> Self {
        Self {
            language: tree_sitter_go::LANGUAGE.into(),
        }
    }

    /// Create a new parser for this call.
    fn create_parser(&self) -> Result<Parser, AnalyzeError> {
        let mut parser = Parser::new();
        parser.set_language(&self.language)?;
        Ok(parser)
    }
}

impl Default for GoAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageAnalyzer for GoAnalyzer {
    fn language_id(&self) -> &'static str {
        "go"
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        &["go"]
    }

    fn parse(&self, path: &Path, source: &[u8]) -> Result<ParsedFile, AnalyzeError> {
        let path = path.to_string_lossy().to_string();
        if let Err(e) = std::str::from_utf8(source) {
            let (line, column) = byte_position(source, e.valid_up_to());
            tracing::debug!(path = %path, line, "rejecting Go source with invalid UTF-8");
            return Err(AnalyzeError::Syntax {
                path,
                line,
                column,
                message: "illegal UTF-8 encoding".to_string(),
            });
        }

        let mut parser = self.create_parser()?;
        let tree = parser
            .parse(source, None)
            .ok_or_else(|| AnalyzeError::NoTree { path: path.clone() })?;

        let root = tree.root_node();
        if let Some(bad) = first_syntax_error(root) {
            let pos = bad.start_position();
            tracing::debug!(path = %path, line = pos.row + 1, "rejecting Go source with syntax errors");
            return Err(AnalyzeError::Syntax {
                message: describe_syntax_error(bad, source),
                path,
                line: pos.row + 1,
                column: pos.column + 1,
            });
        }

        let has_package = {
            let mut cursor = root.walk();
            let found = root
                .children(&mut cursor)
                .any(|n| n.kind() == "package_clause");
            found
        };
        if !has_package {
            return Err(AnalyzeError::MissingPackage { path });
        }

        Ok(ParsedFile {
            tree,
            source: source.to_vec(),
            path,
        })
    }

    fn analyze_parsed(&self, parsed: &ParsedFile) -> FileAnalysis {
        let mut walker = FileWalker::new(parsed);
        walker.walk(parsed.tree.root_node());
        walker.finish()
    }
}

/// Go's export rule: the name starts with an upper-case letter.
pub(crate) fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

/// 1-based line and column of a byte offset.
fn byte_position(source: &[u8], offset: usize) -> (usize, usize) {
    let before = &source[..offset.min(source.len())];
    let line = before.iter().filter(|&&b| b == b'\n').count() + 1;
    let line_start = before
        .iter()
        .rposition(|&b| b == b'\n')
        .map(|i| i + 1)
        .unwrap_or(0);
    (line, before.len() - line_start + 1)
}

/// First ERROR or MISSING node in document order.
fn first_syntax_error(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(found) = first_syntax_error(child) {
            return Some(found);
        }
    }
    None
}

fn describe_syntax_error(node: Node, source: &[u8]) -> String {
    if node.is_missing() {
        return format!("missing `{}`", node.kind());
    }
    let text = node.utf8_text(source).unwrap_or("");
    let first_line = text.lines().next().unwrap_or("").trim();
    if first_line.is_empty() {
        "syntax error".to_string()
    } else {
        let snippet: String = first_line.chars().take(ERROR_SNIPPET_LEN).collect();
        format!("syntax error near `{}`", snippet)
    }
}

/// Per-file extraction state. Lives for exactly one run.
struct FileWalker<'a> {
    parsed: &'a ParsedFile,
    structs: Vec<StructInfo>,
    functions: Vec<FunctionInfo>,
    interfaces: Vec<InterfaceInfo>,
    imports: Vec<ImportInfo>,
    /// Methods keyed by receiver type name, in discovery order.
    methods: HashMap<String, Vec<MethodInfo>>,
    tally: DocTally,
}

impl<'a> FileWalker<'a> {
    fn new(parsed: &'a ParsedFile) -> Self {
        Self {
            parsed,
            structs: Vec::new(),
            functions: Vec::new(),
            interfaces: Vec::new(),
            imports: Vec::new(),
            methods: HashMap::new(),
            tally: DocTally::default(),
        }
    }

    fn source(&self) -> &'a [u8] {
        &self.parsed.source
    }

    fn text(&self, node: Node) -> &'a str {
        self.parsed.node_text(node)
    }

    /// Pre-order traversal of the whole tree, so type declarations local to
    /// function bodies are seen too.
    fn walk(&mut self, root: Node) {
        let mut cursor = root.walk();
        loop {
            let node = cursor.node();
            if self.visit(node) && cursor.goto_first_child() {
                continue;
            }
            loop {
                if cursor.goto_next_sibling() {
                    break;
                }
                if !cursor.goto_parent() {
                    return;
                }
            }
        }
    }

    /// Dispatch one node. Returns whether to descend into it.
    fn visit(&mut self, node: Node) -> bool {
        match node.kind() {
            "type_declaration" => {
                self.visit_type_declaration(node);
                false
            }
            "import_declaration" => {
                self.visit_import_declaration(node);
                false
            }
            "function_declaration" => {
                self.extract_function(node);
                true
            }
            "method_declaration" => {
                self.extract_method(node);
                true
            }
            _ => true,
        }
    }

    fn visit_type_declaration(&mut self, decl: Node) {
        let specs: Vec<Node> = {
            let mut cursor = decl.walk();
            let specs = decl
                .children(&mut cursor)
                .filter(|n| matches!(n.kind(), "type_spec" | "type_alias"))
                .collect();
            specs
        };

        for spec in specs {
            let body = match spec.child_by_field_name("type") {
                Some(body) => body,
                None => continue,
            };
            match body.kind() {
                "struct_type" => self.extract_struct(decl, spec, body),
                "interface_type" => self.extract_interface(decl, spec, body),
                other => {
                    tracing::debug!(kind = other, "skipping type spec that is neither struct nor interface");
                }
            }
        }
    }

    /// Doc for a type spec is always the comment above the `type` keyword.
    /// Comments on individual specs inside a grouped block are not docs.
    fn decl_doc(&self, decl: Node) -> Option<String> {
        leading_doc(decl, self.source())
    }

    fn spec_name(&self, spec: Node) -> String {
        spec.child_by_field_name("name")
            .map(|n| self.text(n).to_string())
            .unwrap_or_default()
    }

    fn extract_struct(&mut self, decl: Node, spec: Node, body: Node) {
        let name = self.spec_name(spec);
        let documentation = self.decl_doc(decl);
        self.tally.record(&documentation);

        let field_nodes: Vec<Node> = {
            let mut cursor = body.walk();
            let list = body
                .children(&mut cursor)
                .find(|n| n.kind() == "field_declaration_list");
            match list {
                Some(list) => {
                    let mut cursor = list.walk();
                    let fields = list
                        .children(&mut cursor)
                        .filter(|n| n.kind() == "field_declaration")
                        .collect();
                    fields
                }
                None => Vec::new(),
            }
        };

        let fields = field_nodes
            .into_iter()
            .flat_map(|field| self.extract_fields(field))
            .collect();

        self.structs.push(StructInfo {
            is_exported: is_exported(&name),
            name,
            documentation,
            location: Location::from_node(spec),
            fields,
            methods: Vec::new(),
        });
    }

    /// One record per declared name; embedded fields get one record named
    /// after their type.
    fn extract_fields(&self, field: Node) -> Vec<PropertyInfo> {
        let documentation = leading_doc(field, self.source());
        let location = Location::from_node(field);
        let type_node = field.child_by_field_name("type");

        let names: Vec<&str> = {
            let mut cursor = field.walk();
            let names = field
                .children_by_field_name("name", &mut cursor)
                .map(|n| self.text(n))
                .collect();
            names
        };

        if names.is_empty() {
            let ty = match type_node {
                Some(ty) => ty,
                None => return Vec::new(),
            };
            let rendered = render(ty, self.source());
            let embedded = if has_pointer_marker(field) {
                format!("*{}", rendered)
            } else {
                rendered
            };
            return vec![PropertyInfo {
                name: embedded.clone(),
                type_name: Some(embedded),
                documentation,
                location,
                is_exported: true,
            }];
        }

        let type_name = render_opt(type_node, self.source());
        names
            .into_iter()
            .map(|name| PropertyInfo {
                name: name.to_string(),
                type_name: type_name.clone(),
                documentation: documentation.clone(),
                location,
                is_exported: is_exported(name),
            })
            .collect()
    }

    fn extract_interface(&mut self, decl: Node, spec: Node, body: Node) {
        let name = self.spec_name(spec);
        let documentation = self.decl_doc(decl);
        self.tally.record(&documentation);

        let elems: Vec<Node> = {
            let mut cursor = body.walk();
            let elems = body
                .children(&mut cursor)
                .filter(|n| matches!(n.kind(), "method_elem" | "method_spec"))
                .collect();
            elems
        };

        let mut methods = Vec::new();
        for elem in elems {
            // Embedded interfaces and type unions carry no method name.
            let method_name = match elem.child_by_field_name("name") {
                Some(n) => self.text(n).to_string(),
                None => continue,
            };
            let method = MethodInfo {
                is_exported: is_exported(&method_name),
                name: method_name,
                documentation: leading_doc(elem, self.source()),
                location: Location::from_node(elem),
                parameters: self.extract_parameters(elem.child_by_field_name("parameters")),
                return_type: self.extract_return_type(elem.child_by_field_name("result")),
                receiver_type: None,
            };
            self.tally.record(&method.documentation);
            methods.push(method);
        }

        self.interfaces.push(InterfaceInfo {
            is_exported: is_exported(&name),
            name,
            documentation,
            location: Location::from_node(spec),
            methods,
        });
    }

    fn extract_function(&mut self, node: Node) {
        let name = node
            .child_by_field_name("name")
            .map(|n| self.text(n).to_string())
            .unwrap_or_default();
        let documentation = leading_doc(node, self.source());
        self.tally.record(&documentation);

        self.functions.push(FunctionInfo {
            is_exported: is_exported(&name),
            name,
            documentation,
            location: Location::from_node(node),
            parameters: self.extract_parameters(node.child_by_field_name("parameters")),
            return_type: self.extract_return_type(node.child_by_field_name("result")),
        });
    }

    fn extract_method(&mut self, node: Node) {
        let receiver = node
            .child_by_field_name("receiver")
            .and_then(first_parameter)
            .and_then(|p| p.child_by_field_name("type"));
        let receiver = match receiver {
            Some(r) => r,
            None => {
                tracing::debug!(
                    line = node.start_position().row + 1,
                    "skipping method without a receiver type"
                );
                return;
            }
        };

        let rendered = render(receiver, self.source());
        let owner = rendered.strip_prefix('*').unwrap_or(&rendered).to_string();

        let name = node
            .child_by_field_name("name")
            .map(|n| self.text(n).to_string())
            .unwrap_or_default();
        let documentation = leading_doc(node, self.source());
        self.tally.record(&documentation);

        let method = MethodInfo {
            is_exported: is_exported(&name),
            name,
            documentation,
            location: Location::from_node(node),
            parameters: self.extract_parameters(node.child_by_field_name("parameters")),
            return_type: self.extract_return_type(node.child_by_field_name("result")),
            receiver_type: Some(owner.clone()),
        };
        self.methods.entry(owner).or_default().push(method);
    }

    /// Expand a parameter list; grouped names share their type.
    fn extract_parameters(&self, list: Option<Node>) -> Vec<ParameterInfo> {
        let list = match list {
            Some(list) => list,
            None => return Vec::new(),
        };

        let mut params = Vec::new();
        for group in parameter_groups(list) {
            let type_name = self.group_type(group);
            let mut cursor = group.walk();
            let names: Vec<&str> = group
                .children_by_field_name("name", &mut cursor)
                .map(|n| self.text(n))
                .collect();

            if names.is_empty() {
                params.push(ParameterInfo::new(UNNAMED_PARAMETER, type_name));
            } else {
                for name in names {
                    params.push(ParameterInfo::new(name, type_name.clone()));
                }
            }
        }
        params
    }

    /// Rendered type of one parameter group.
    fn group_type(&self, group: Node) -> Option<String> {
        match group.kind() {
            // Variadic element types are not expanded.
            "variadic_parameter_declaration" => Some(TypeExpr::Unknown.to_string()),
            _ => render_opt(group.child_by_field_name("type"), self.source()),
        }
    }

    /// A lone unnamed result renders bare; anything else renders as a
    /// parenthesized list with one entry per declaration group.
    fn extract_return_type(&self, result: Option<Node>) -> Option<String> {
        let result = result?;
        if result.kind() != "parameter_list" {
            return Some(render(result, self.source()));
        }

        let groups = parameter_groups(result);
        match groups.as_slice() {
            [] => None,
            [single] if single.child_by_field_name("name").is_none() => self.group_type(*single),
            _ => {
                let types: Vec<String> = groups.iter().filter_map(|g| self.group_type(*g)).collect();
                Some(format!("({})", types.join(", ")))
            }
        }
    }

    fn visit_import_declaration(&mut self, decl: Node) {
        let specs: Vec<Node> = {
            let mut specs = Vec::new();
            let mut cursor = decl.walk();
            for child in decl.children(&mut cursor) {
                match child.kind() {
                    "import_spec" => specs.push(child),
                    "import_spec_list" => {
                        let mut inner = child.walk();
                        specs.extend(
                            child
                                .children(&mut inner)
                                .filter(|n| n.kind() == "import_spec"),
                        );
                    }
                    _ => {}
                }
            }
            specs
        };

        for spec in specs {
            let module_specifier = spec
                .child_by_field_name("path")
                .map(|p| self.text(p).trim_matches('"').to_string())
                .unwrap_or_default();
            let imported_names = spec
                .child_by_field_name("name")
                .map(|n| vec![self.text(n).to_string()])
                .unwrap_or_default();

            self.imports.push(ImportInfo {
                imported_names,
                module_specifier,
            });
        }
    }

    /// Bind collected methods onto structs and assemble the result.
    fn finish(self) -> FileAnalysis {
        let FileWalker {
            parsed,
            mut structs,
            functions,
            interfaces,
            imports,
            methods,
            tally,
        } = self;

        for info in &mut structs {
            if let Some(bound) = methods.get(&info.name) {
                info.methods = bound.clone();
            }
        }

        FileAnalysis {
            path: parsed.path.clone(),
            classes: structs,
            functions,
            interfaces,
            enums: Vec::new(),
            type_aliases: Vec::new(),
            imports,
            exports: Vec::new(),
            documentation: tally.into_info(),
        }
    }
}

/// Parameter declarations of a list, skipping comments.
fn parameter_groups(list: Node) -> Vec<Node> {
    let mut cursor = list.walk();
    let groups = list
        .named_children(&mut cursor)
        .filter(|n| {
            matches!(
                n.kind(),
                "parameter_declaration" | "variadic_parameter_declaration"
            )
        })
        .collect();
    groups
}

fn first_parameter(list: Node) -> Option<Node> {
    parameter_groups(list).into_iter().next()
}

/// Embedded `*T` fields carry the `*` as a direct child of the declaration.
fn has_pointer_marker(field: Node) -> bool {
    let mut cursor = field.walk();
    let found = field.children(&mut cursor).any(|n| n.kind() == "*");
    found
}
