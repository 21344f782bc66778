//! Output records produced by an analysis run.
//!
//! The shape is shared with analyzers for other languages, so categories
//! Go has no counterpart for (enums, type aliases, exports) are kept as
//! always-empty arrays rather than dropped.

use serde::{Deserialize, Serialize};

/// Source location with 1-indexed line/column positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub start_line: usize,
    pub start_column: usize,
    pub end_line: usize,
    /// Column just past the last character of the node.
    pub end_column: usize,
}

impl Location {
    /// Create a location from a tree-sitter node.
    pub fn from_node(node: tree_sitter::Node) -> Self {
        let start = node.start_position();
        let end = node.end_position();
        Self {
            start_line: start.row + 1, // tree-sitter is 0-indexed
            start_column: start.column + 1,
            end_line: end.row + 1,
            end_column: end.column + 1,
        }
    }
}

/// A function, method, or interface-method parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterInfo {
    /// Parameter name, `_` when the declaration omits it.
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: Option<String>,
    /// Go has no optional parameters; always false.
    pub is_optional: bool,
    pub default_value: Option<String>,
}

impl ParameterInfo {
    pub fn new(name: impl Into<String>, type_name: Option<String>) -> Self {
        Self {
            name: name.into(),
            type_name,
            is_optional: false,
            default_value: None,
        }
    }
}

/// A struct field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
    pub location: Location,
    pub is_exported: bool,
}

/// A method declared with a receiver, or a method signature of an interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
    pub location: Location,
    pub is_exported: bool,
    pub parameters: Vec<ParameterInfo>,
    pub return_type: Option<String>,
    /// Receiver type name with any leading `*` stripped. Interface methods have none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver_type: Option<String>,
}

/// A top-level function (no receiver).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
    pub location: Location,
    pub is_exported: bool,
    pub parameters: Vec<ParameterInfo>,
    pub return_type: Option<String>,
}

/// A struct type declaration, with the methods bound to it after the walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
    pub location: Location,
    pub is_exported: bool,
    #[serde(rename = "properties")]
    pub fields: Vec<PropertyInfo>,
    pub methods: Vec<MethodInfo>,
}

/// An interface type declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
    pub location: Location,
    pub is_exported: bool,
    pub methods: Vec<MethodInfo>,
}

/// One import spec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportInfo {
    /// The explicit local name (`log`, `.`, `_`), empty when unaliased.
    pub imported_names: Vec<String>,
    pub module_specifier: String,
}

/// Documentation coverage for one file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentationInfo {
    pub has_documentation: bool,
    pub documented_symbols: usize,
    pub total_symbols: usize,
    /// Percentage, 0-100.
    pub coverage: f64,
}

/// Everything extracted from a single file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileAnalysis {
    pub path: String,
    pub classes: Vec<StructInfo>,
    pub functions: Vec<FunctionInfo>,
    pub interfaces: Vec<InterfaceInfo>,
    pub enums: Vec<serde_json::Value>,
    pub type_aliases: Vec<serde_json::Value>,
    pub imports: Vec<ImportInfo>,
    pub exports: Vec<serde_json::Value>,
    pub documentation: DocumentationInfo,
}

impl FileAnalysis {
    /// Find a struct record by name.
    pub fn find_struct(&self, name: &str) -> Option<&StructInfo> {
        self.classes.iter().find(|s| s.name == name)
    }

    /// Find an interface record by name.
    pub fn find_interface(&self, name: &str) -> Option<&InterfaceInfo> {
        self.interfaces.iter().find(|i| i.name == name)
    }

    /// Find a top-level function record by name.
    pub fn find_function(&self, name: &str) -> Option<&FunctionInfo> {
        self.functions.iter().find(|f| f.name == name)
    }
}

/// The only thing emitted when a run fails: no partial symbol data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedAnalysis {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl FailedAnalysis {
    pub fn new(error: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            path: Some(path.into()),
        }
    }

    /// Failure reported before any input path is known.
    pub fn without_path(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn loc() -> Location {
        Location {
            start_line: 3,
            start_column: 1,
            end_line: 5,
            end_column: 2,
        }
    }

    #[test]
    fn test_method_json_keys() {
        let method = MethodInfo {
            name: "Dist".to_string(),
            documentation: None,
            location: loc(),
            is_exported: true,
            parameters: vec![],
            return_type: None,
            receiver_type: Some("Point".to_string()),
        };

        let value = serde_json::to_value(&method).unwrap();
        assert_eq!(value["receiverType"], json!("Point"));
        assert_eq!(value["returnType"], json!(null));
        assert_eq!(value["isExported"], json!(true));
        assert_eq!(value["location"]["startLine"], json!(3));
        assert_eq!(value["location"]["endColumn"], json!(2));
        // Absent documentation is omitted, not null
        assert!(value.get("documentation").is_none());
    }

    #[test]
    fn test_interface_method_omits_receiver() {
        let method = MethodInfo {
            name: "Run".to_string(),
            documentation: Some("Run starts it.".to_string()),
            location: loc(),
            is_exported: true,
            parameters: vec![ParameterInfo::new("ctx", Some("context.Context".to_string()))],
            return_type: Some("error".to_string()),
            receiver_type: None,
        };

        let value = serde_json::to_value(&method).unwrap();
        assert!(value.get("receiverType").is_none());
        assert_eq!(value["documentation"], json!("Run starts it."));
        assert_eq!(
            value["parameters"][0],
            json!({
                "name": "ctx",
                "type": "context.Context",
                "isOptional": false,
                "defaultValue": null
            })
        );
    }

    #[test]
    fn test_struct_fields_serialize_as_properties() {
        let info = StructInfo {
            name: "Point".to_string(),
            documentation: None,
            location: loc(),
            is_exported: true,
            fields: vec![PropertyInfo {
                name: "X".to_string(),
                type_name: Some("int".to_string()),
                documentation: None,
                location: loc(),
                is_exported: true,
            }],
            methods: vec![],
        };

        let value = serde_json::to_value(&info).unwrap();
        assert_eq!(value["properties"][0]["name"], json!("X"));
        assert_eq!(value["properties"][0]["type"], json!("int"));
        assert_eq!(value["methods"], json!([]));
    }

    #[test]
    fn test_failed_analysis_shape() {
        let failed = FailedAnalysis::new("failed to parse file: x", "broken.go");
        assert_eq!(
            serde_json::to_value(&failed).unwrap(),
            json!({"error": "failed to parse file: x", "path": "broken.go"})
        );

        let missing = FailedAnalysis::without_path("No file path provided");
        assert_eq!(
            serde_json::to_value(&missing).unwrap(),
            json!({"error": "No file path provided"})
        );
    }
}
