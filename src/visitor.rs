// Copyright (C) Brian G. Milnes 2025

//! Visitor pattern implementation for traversing the lowered syntax tree
//!
//! Rules register interest in call expressions only; `walk` turns the
//! pre-order enter/leave events into `enter_call` / `exit_call` callbacks.

pub mod visitor {
    use crate::syntax::syntax::{SyntaxNode, WalkEvent};

    /// Callbacks on call-expression entry and exit
    pub trait CallVisitor {
        fn enter_call(&mut self, node: &SyntaxNode);
        fn exit_call(&mut self, node: &SyntaxNode);
    }

    /// Visit every call expression under `root`, parents before children
    /// on entry and children before parents on exit
    pub fn walk<V: CallVisitor + ?Sized>(root: &SyntaxNode, visitor: &mut V) {
        for event in root.preorder() {
            match event {
                WalkEvent::Enter(node) if node.is_call() => visitor.enter_call(node),
                WalkEvent::Leave(node) if node.is_call() => visitor.exit_call(node),
                _ => {}
            }
        }
    }

    /// Records the call events it sees; handy for checking traversal order
    #[derive(Debug, Default)]
    pub struct CallTrace {
        pub events: Vec<String>,
    }

    impl CallTrace {
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl CallVisitor for CallTrace {
        fn enter_call(&mut self, node: &SyntaxNode) {
            let name = node.callee().map(|c| c.resolved_name()).unwrap_or("");
            self.events.push(format!("enter {name}"));
        }

        fn exit_call(&mut self, node: &SyntaxNode) {
            let name = node.callee().map(|c| c.resolved_name()).unwrap_or("");
            self.events.push(format!("exit {name}"));
        }
    }
}
