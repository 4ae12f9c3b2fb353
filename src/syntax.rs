// Copyright (C) Brian G. Milnes 2025

//! Syntax model consumed by the analyzer
//!
//! A small, owned tree lowered from a concrete parse. Only the pieces the
//! analyzer reads are kept: node kind, callee descriptor for calls, span,
//! and children.

pub mod syntax {
    use serde::Serialize;

    /// Pre-order index of a node within its tree
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
    pub struct NodeId(pub usize);

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
    pub enum NodeKind {
        CallExpression,
        Other(&'static str),
    }

    /// What a call expression calls.
    ///
    /// Both fields may be set on malformed or hand-built trees; `property`
    /// wins when resolving a name.
    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
    pub struct Callee {
        /// Plain identifier callee: `verifyLabel()`
        pub name: Option<String>,
        /// Member-access callee property: `page.verifyLabel()`
        pub property: Option<String>,
    }

    impl Callee {
        pub fn identifier(name: &str) -> Self {
            Callee { name: Some(name.to_string()), property: None }
        }

        pub fn member(property: &str) -> Self {
            Callee { name: None, property: Some(property.to_string()) }
        }

        pub fn unresolved() -> Self {
            Callee::default()
        }

        /// Short name used for pattern matching; empty when nothing resolves
        pub fn resolved_name(&self) -> &str {
            self.property
                .as_deref()
                .or(self.name.as_deref())
                .unwrap_or("")
        }
    }

    /// Source location. Lines and columns are 1-indexed.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
    pub struct Span {
        pub start_byte: usize,
        pub end_byte: usize,
        pub start_line: usize,
        pub start_column: usize,
        pub end_line: usize,
        pub end_column: usize,
    }

    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct SyntaxNode {
        pub id: NodeId,
        pub kind: NodeKind,
        /// Set only for call expressions
        #[serde(skip_serializing_if = "Option::is_none")]
        pub callee: Option<Callee>,
        pub span: Span,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        pub children: Vec<SyntaxNode>,
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    pub enum WalkEvent<'a> {
        Enter(&'a SyntaxNode),
        Leave(&'a SyntaxNode),
    }

    impl SyntaxNode {
        pub fn new(kind: NodeKind, children: Vec<SyntaxNode>) -> Self {
            SyntaxNode {
                id: NodeId(0),
                kind,
                callee: None,
                span: Span::default(),
                children,
            }
        }

        pub fn call(callee: Callee, children: Vec<SyntaxNode>) -> Self {
            let mut node = SyntaxNode::new(NodeKind::CallExpression, children);
            node.callee = Some(callee);
            node
        }

        pub fn with_span(mut self, span: Span) -> Self {
            self.span = span;
            self
        }

        pub fn is_call(&self) -> bool {
            self.kind == NodeKind::CallExpression
        }

        /// Callee of a call expression; `None` for other nodes and for
        /// calls whose callee was never recorded
        pub fn callee(&self) -> Option<&Callee> {
            self.callee.as_ref()
        }

        /// Assign pre-order ids starting at 0. Returns the node count.
        pub fn renumber(&mut self) -> usize {
            let mut next = 0;
            let mut stack: Vec<&mut SyntaxNode> = vec![self];
            while let Some(node) = stack.pop() {
                node.id = NodeId(next);
                next += 1;
                for child in node.children.iter_mut().rev() {
                    stack.push(child);
                }
            }
            next
        }

        /// Depth-first walk: `Enter` before the children, `Leave` after them
        pub fn preorder(&self) -> Preorder<'_> {
            Preorder { stack: vec![(self, false)] }
        }

        pub fn descendants(&self) -> impl Iterator<Item = &SyntaxNode> {
            self.preorder().filter_map(|event| match event {
                WalkEvent::Enter(node) => Some(node),
                WalkEvent::Leave(_) => None,
            })
        }

        pub fn find(&self, id: NodeId) -> Option<&SyntaxNode> {
            self.descendants().find(|node| node.id == id)
        }
    }

    // Deep trees would overflow the stack with the derived, recursive drop.
    impl Drop for SyntaxNode {
        fn drop(&mut self) {
            let mut pending = std::mem::take(&mut self.children);
            while let Some(mut node) = pending.pop() {
                pending.append(&mut node.children);
            }
        }
    }

    /// Iterative pre-order walk; no recursion
    pub struct Preorder<'a> {
        stack: Vec<(&'a SyntaxNode, bool)>,
    }

    impl<'a> Iterator for Preorder<'a> {
        type Item = WalkEvent<'a>;

        fn next(&mut self) -> Option<Self::Item> {
            let (node, entered) = self.stack.pop()?;
            if entered {
                return Some(WalkEvent::Leave(node));
            }
            self.stack.push((node, true));
            for child in node.children.iter().rev() {
                self.stack.push((child, false));
            }
            Some(WalkEvent::Enter(node))
        }
    }

}
