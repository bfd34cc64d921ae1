//! Language bindings mapping editor language identifiers to grammars and
//! to the node-type sets the completion predicates consult.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tree_sitter::Language;

/// Languages with a registered grammar binding.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, Hash, PartialEq)]
pub enum LanguageId {
    Rust,
    Python,
    JavaScript,
    TypeScript,
    Go,
    Java,
}

impl LanguageId {
    /// Resolve an editor language identifier (or file extension) to a
    /// supported language. Lookup is by identifier only, never by content
    /// heuristics.
    pub fn from_identifier(id: &str) -> Option<Self> {
        match id.to_ascii_lowercase().as_str() {
            "rust" | "rs" => Some(LanguageId::Rust),
            "python" | "py" => Some(LanguageId::Python),
            "javascript" | "js" | "jsx" | "javascriptreact" => Some(LanguageId::JavaScript),
            "typescript" | "ts" | "tsx" | "typescriptreact" => Some(LanguageId::TypeScript),
            "go" | "golang" => Some(LanguageId::Go),
            "java" => Some(LanguageId::Java),
            _ => None,
        }
    }
}

impl std::fmt::Display for LanguageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LanguageId::Rust => "Rust",
            LanguageId::Python => "Python",
            LanguageId::JavaScript => "JavaScript",
            LanguageId::TypeScript => "TypeScript",
            LanguageId::Go => "Go",
            LanguageId::Java => "Java",
        };
        write!(f, "{}", name)
    }
}

/// Immutable per-language binding: the grammar handle plus the node-type
/// names the classifier and gate treat as function-like, body containers,
/// and control flow.
pub struct LanguageBinding {
    pub id: LanguageId,
    language: Language,
    pub function_types: &'static [&'static str],
    pub body_container_types: &'static [&'static str],
    pub control_flow_types: &'static [&'static str],
}

impl LanguageBinding {
    pub fn language(&self) -> &Language {
        &self.language
    }

    pub fn is_function_like(&self, kind: &str) -> bool {
        self.function_types.contains(&kind)
    }

    pub fn is_body_container(&self, kind: &str) -> bool {
        self.body_container_types.contains(&kind)
    }

    pub fn is_control_flow(&self, kind: &str) -> bool {
        self.control_flow_types.contains(&kind)
    }

    /// Indentation-based languages use a no-op keyword instead of an empty
    /// brace pair for placeholder bodies.
    pub fn placeholder_body(&self) -> Option<&'static str> {
        match self.id {
            LanguageId::Python => Some("pass"),
            _ => None,
        }
    }
}

static REGISTRY: Lazy<HashMap<LanguageId, LanguageBinding>> = Lazy::new(|| {
    let mut bindings = HashMap::new();

    bindings.insert(
        LanguageId::Rust,
        LanguageBinding {
            id: LanguageId::Rust,
            language: tree_sitter_rust::LANGUAGE.into(),
            function_types: &["function_item", "closure_expression"],
            body_container_types: &["block", "declaration_list", "field_declaration_list"],
            control_flow_types: &[
                "if_expression",
                "for_expression",
                "while_expression",
                "loop_expression",
                "match_expression",
            ],
        },
    );

    bindings.insert(
        LanguageId::Python,
        LanguageBinding {
            id: LanguageId::Python,
            language: tree_sitter_python::LANGUAGE.into(),
            function_types: &["function_definition"],
            body_container_types: &["block"],
            control_flow_types: &[
                "if_statement",
                "for_statement",
                "while_statement",
                "try_statement",
                "match_statement",
                "with_statement",
            ],
        },
    );

    bindings.insert(
        LanguageId::JavaScript,
        LanguageBinding {
            id: LanguageId::JavaScript,
            language: tree_sitter_javascript::LANGUAGE.into(),
            function_types: &[
                "function_declaration",
                "function_expression",
                "generator_function_declaration",
                "arrow_function",
                "method_definition",
            ],
            body_container_types: &["statement_block", "class_body"],
            control_flow_types: &[
                "if_statement",
                "for_statement",
                "while_statement",
                "do_statement",
                "switch_statement",
                "for_in_statement",
                "try_statement",
            ],
        },
    );

    bindings.insert(
        LanguageId::TypeScript,
        LanguageBinding {
            id: LanguageId::TypeScript,
            language: tree_sitter_typescript::LANGUAGE_TSX.into(),
            function_types: &[
                "function_declaration",
                "function_expression",
                "generator_function_declaration",
                "arrow_function",
                "method_definition",
            ],
            body_container_types: &[
                "statement_block",
                "class_body",
                "interface_body",
                "enum_body",
            ],
            control_flow_types: &[
                "if_statement",
                "for_statement",
                "while_statement",
                "do_statement",
                "switch_statement",
                "for_in_statement",
                "try_statement",
            ],
        },
    );

    bindings.insert(
        LanguageId::Go,
        LanguageBinding {
            id: LanguageId::Go,
            language: tree_sitter_go::LANGUAGE.into(),
            function_types: &["function_declaration", "method_declaration", "func_literal"],
            body_container_types: &["block"],
            control_flow_types: &[
                "if_statement",
                "for_statement",
                "expression_switch_statement",
                "type_switch_statement",
                "select_statement",
            ],
        },
    );

    bindings.insert(
        LanguageId::Java,
        LanguageBinding {
            id: LanguageId::Java,
            language: tree_sitter_java::LANGUAGE.into(),
            function_types: &["method_declaration", "constructor_declaration"],
            body_container_types: &[
                "block",
                "constructor_body",
                "class_body",
                "interface_body",
                "enum_body",
            ],
            control_flow_types: &[
                "if_statement",
                "for_statement",
                "enhanced_for_statement",
                "while_statement",
                "do_statement",
                "switch_expression",
                "try_statement",
            ],
        },
    );

    bindings
});

/// Force registry construction. Safe to call more than once; repeated
/// initialization is a no-op.
pub fn init() {
    Lazy::force(&REGISTRY);
}

/// Resolve a language identifier to its binding. `None` is the
/// deterministic "not supported" result; callers degrade to text-only
/// behavior rather than failing.
pub fn resolve(language_id: &str) -> Option<&'static LanguageBinding> {
    let id = LanguageId::from_identifier(language_id)?;
    REGISTRY.get(&id)
}

/// All registered bindings, in no particular order.
pub fn all() -> impl Iterator<Item = &'static LanguageBinding> {
    REGISTRY.values()
}
