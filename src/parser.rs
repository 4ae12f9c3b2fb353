// Copyright (C) Brian G. Milnes 2025

//! Parser front end: tree-sitter parse of JavaScript/TypeScript, lowered
//! to the analyzer's syntax model

pub mod parser {
    use std::fmt;
    use std::path::Path;

    use anyhow::{anyhow, Context, Result};
    use serde::Serialize;
    use tree_sitter::{Node, Parser, Tree};

    use crate::syntax::syntax::{Callee, NodeKind, Span, SyntaxNode};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
    pub enum SourceLanguage {
        JavaScript,
        TypeScript,
        Tsx,
    }

    impl SourceLanguage {
        /// Pick a grammar from the file extension
        pub fn from_path(path: &Path) -> Option<Self> {
            let ext = path.extension()?.to_str()?;
            match ext {
                "js" | "jsx" | "mjs" | "cjs" => Some(SourceLanguage::JavaScript),
                "ts" | "mts" | "cts" => Some(SourceLanguage::TypeScript),
                "tsx" => Some(SourceLanguage::Tsx),
                _ => None,
            }
        }

        fn grammar(self) -> tree_sitter::Language {
            match self {
                SourceLanguage::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
                SourceLanguage::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
                SourceLanguage::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
            }
        }
    }

    impl fmt::Display for SourceLanguage {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let name = match self {
                SourceLanguage::JavaScript => "javascript",
                SourceLanguage::TypeScript => "typescript",
                SourceLanguage::Tsx => "tsx",
            };
            f.write_str(name)
        }
    }

    /// A lowered parse of one source file
    #[derive(Debug, Clone, Serialize)]
    pub struct ParsedSource {
        pub language: SourceLanguage,
        pub root: SyntaxNode,
        /// ERROR and MISSING nodes tree-sitter recovered from
        pub error_count: usize,
    }

    /// Parse source text and lower it to a `SyntaxNode` tree.
    ///
    /// Syntax errors are not fatal: tree-sitter recovers and the damaged
    /// regions come through as `Other("ERROR")` nodes.
    pub fn parse_source(source: &str, language: SourceLanguage) -> Result<ParsedSource> {
        let mut parser = Parser::new();
        parser
            .set_language(&language.grammar())
            .with_context(|| format!("Failed to load {language} grammar"))?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| anyhow!("tree-sitter returned no tree for {language} source"))?;

        let mut root = lower(tree.root_node(), source.as_bytes());
        root.renumber();

        Ok(ParsedSource {
            language,
            root,
            error_count: count_errors(&tree),
        })
    }

    /// Read a file and parse it with the grammar its extension selects
    pub fn parse_file(path: &Path) -> Result<ParsedSource> {
        let language = SourceLanguage::from_path(path)
            .ok_or_else(|| anyhow!("Unsupported file type: {}", path.display()))?;
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        parse_source(&source, language)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    struct Pending<'t> {
        node: SyntaxNode,
        // Reversed so `pop` yields document order
        remaining: Vec<Node<'t>>,
    }

    impl<'t> Pending<'t> {
        fn new(ts_node: Node<'t>, source: &[u8]) -> Self {
            let mut cursor = ts_node.walk();
            let mut remaining: Vec<Node<'t>> = ts_node.named_children(&mut cursor).collect();
            remaining.reverse();
            Pending {
                node: lower_one(ts_node, source),
                remaining,
            }
        }
    }

    // Iterative so deeply nested callback chains cannot blow the stack.
    fn lower(root: Node<'_>, source: &[u8]) -> SyntaxNode {
        let mut stack = vec![Pending::new(root, source)];
        let mut lowered = None;

        while let Some(top) = stack.last_mut() {
            if let Some(child) = top.remaining.pop() {
                stack.push(Pending::new(child, source));
                continue;
            }
            let Some(finished) = stack.pop() else { break };
            match stack.last_mut() {
                Some(parent) => parent.node.children.push(finished.node),
                None => lowered = Some(finished.node),
            }
        }

        lowered.unwrap_or_else(|| SyntaxNode::new(NodeKind::Other("program"), Vec::new()))
    }

    fn lower_one(ts_node: Node<'_>, source: &[u8]) -> SyntaxNode {
        let span = span_of(ts_node);
        if ts_node.kind() == "call_expression" {
            if is_tagged_template(ts_node) {
                return SyntaxNode::new(NodeKind::Other("tagged_template"), Vec::new()).with_span(span);
            }
            SyntaxNode::call(callee_of(ts_node, source), Vec::new()).with_span(span)
        } else {
            SyntaxNode::new(NodeKind::Other(ts_node.kind()), Vec::new()).with_span(span)
        }
    }

    // tree-sitter parses tag`...` as a call whose arguments are a template
    // string; it invokes nothing the analyzer should count.
    fn is_tagged_template(call: Node<'_>) -> bool {
        call.child_by_field_name("arguments")
            .is_some_and(|args| args.kind() == "template_string")
    }

    fn callee_of(call: Node<'_>, source: &[u8]) -> Callee {
        let Some(mut function) = call.child_by_field_name("function") else {
            return Callee::unresolved();
        };
        // `(page.check)()` calls the member, as in ESTree
        while function.kind() == "parenthesized_expression" {
            match function.named_child(0) {
                Some(inner) => function = inner,
                None => return Callee::unresolved(),
            }
        }

        match function.kind() {
            "identifier" => match function.utf8_text(source) {
                Ok(name) => Callee::identifier(name),
                Err(_) => Callee::unresolved(),
            },
            "member_expression" => {
                let property = function
                    .child_by_field_name("property")
                    .and_then(|p| p.utf8_text(source).ok());
                match property {
                    Some(name) => Callee::member(name.trim_start_matches('#')),
                    None => Callee::unresolved(),
                }
            }
            // `page[expect]()` names the key identifier; `a['expect']()` does not
            "subscript_expression" => {
                let index = function
                    .child_by_field_name("index")
                    .filter(|i| i.kind() == "identifier")
                    .and_then(|i| i.utf8_text(source).ok());
                match index {
                    Some(name) => Callee::member(name),
                    None => Callee::unresolved(),
                }
            }
            _ => Callee::unresolved(),
        }
    }

    fn span_of(node: Node<'_>) -> Span {
        let start = node.start_position();
        let end = node.end_position();
        Span {
            start_byte: node.start_byte(),
            end_byte: node.end_byte(),
            start_line: start.row + 1,
            start_column: start.column + 1,
            end_line: end.row + 1,
            end_column: end.column + 1,
        }
    }

    fn count_errors(tree: &Tree) -> usize {
        if !tree.root_node().has_error() {
            return 0;
        }
        let mut count = 0;
        let mut cursor = tree.walk();
        loop {
            let node = cursor.node();
            if node.is_error() || node.is_missing() {
                count += 1;
            }
            // Error-free subtrees need no visit
            if node.has_error() && cursor.goto_first_child() {
                continue;
            }
            loop {
                if cursor.goto_next_sibling() {
                    break;
                }
                if !cursor.goto_parent() {
                    return count;
                }
            }
        }
    }

}
