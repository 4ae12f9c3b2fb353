// Copyright (C) Brian G. Milnes 2025

//! Analyzer module: the require-assertion rule
//!
//! Flags every `test(...)` / `x.test(...)` block whose body makes no call
//! whose name contains expect, verify, assert, check or waitFor.

pub mod analyzer {
    use std::sync::OnceLock;

    use regex::Regex;
    use serde::{Deserialize, Serialize};

    use crate::syntax::syntax::{NodeId, Span, SyntaxNode};
    use crate::visitor::visitor::{walk, CallVisitor};

    pub const TEST_BLOCK_NAME: &str = "test";
    pub const ASSERTION_PATTERN: &str = "(?i)(expect|verify|assert|check|waitFor)";

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub enum DiagnosticKind {
        MissingAssertion,
    }

    impl DiagnosticKind {
        pub fn message(self) -> &'static str {
            match self {
                DiagnosticKind::MissingAssertion => {
                    "Test has no assertions. Add an assertion call or use a page-object method whose name contains verify/assert/check/waitFor."
                }
            }
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
    pub struct Diagnostic {
        pub node: NodeId,
        pub span: Span,
        pub kind: DiagnosticKind,
    }

    /// How nested test blocks are tracked.
    ///
    /// `SingleSlot` keeps one flag pair for the whole file: leaving an inner
    /// test block stops tracking for the rest of the outer one, which is then
    /// reported. `Stack` gives every open block its own frame. The two differ
    /// only when test blocks nest.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub enum NestingPolicy {
        #[default]
        SingleSlot,
        Stack,
    }

    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct AnalyzerState {
        pub inside_test: bool,
        pub has_assertion: bool,
    }

    fn assertion_regex() -> &'static Regex {
        static RE: OnceLock<Regex> = OnceLock::new();
        RE.get_or_init(|| Regex::new(ASSERTION_PATTERN).expect("assertion pattern is valid"))
    }

    pub fn is_assertion_name(name: &str) -> bool {
        !name.is_empty() && assertion_regex().is_match(name)
    }

    /// `test(...)` or `<anything>.test(...)`
    pub fn is_test_block_call(node: &SyntaxNode) -> bool {
        if !node.is_call() {
            return false;
        }
        node.callee().is_some_and(|callee| {
            callee.name.as_deref() == Some(TEST_BLOCK_NAME)
                || callee.property.as_deref() == Some(TEST_BLOCK_NAME)
        })
    }

    pub fn resolved_name(node: &SyntaxNode) -> &str {
        node.callee().map(|c| c.resolved_name()).unwrap_or("")
    }

    /// One per file; feed it call enter/exit events, then `finish`
    #[derive(Debug, Default)]
    pub struct AssertionPresenceAnalyzer {
        policy: NestingPolicy,
        state: AnalyzerState,
        // Stack policy: one has-assertion flag per open test block
        frames: Vec<bool>,
        diagnostics: Vec<Diagnostic>,
    }

    impl AssertionPresenceAnalyzer {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_policy(policy: NestingPolicy) -> Self {
            AssertionPresenceAnalyzer { policy, ..Self::default() }
        }

        pub fn policy(&self) -> NestingPolicy {
            self.policy
        }

        /// Current single-slot state. Under `Stack` it mirrors the innermost frame.
        pub fn state(&self) -> AnalyzerState {
            match self.policy {
                NestingPolicy::SingleSlot => self.state,
                NestingPolicy::Stack => AnalyzerState {
                    inside_test: !self.frames.is_empty(),
                    has_assertion: self.frames.last().copied().unwrap_or(false),
                },
            }
        }

        pub fn diagnostics(&self) -> &[Diagnostic] {
            &self.diagnostics
        }

        /// Diagnostics for every closed test block. Blocks still open are dropped.
        pub fn finish(self) -> Vec<Diagnostic> {
            self.diagnostics
        }

        fn report(&mut self, node: &SyntaxNode) {
            self.diagnostics.push(Diagnostic {
                node: node.id,
                span: node.span,
                kind: DiagnosticKind::MissingAssertion,
            });
        }
    }

    impl CallVisitor for AssertionPresenceAnalyzer {
        fn enter_call(&mut self, node: &SyntaxNode) {
            if is_test_block_call(node) {
                match self.policy {
                    NestingPolicy::SingleSlot => {
                        self.state = AnalyzerState { inside_test: true, has_assertion: false };
                    }
                    NestingPolicy::Stack => self.frames.push(false),
                }
                return;
            }

            match self.policy {
                NestingPolicy::SingleSlot => {
                    if self.state.inside_test && is_assertion_name(resolved_name(node)) {
                        self.state.has_assertion = true;
                    }
                }
                NestingPolicy::Stack => {
                    if let Some(frame) = self.frames.last_mut() {
                        if is_assertion_name(resolved_name(node)) {
                            *frame = true;
                        }
                    }
                }
            }
        }

        fn exit_call(&mut self, node: &SyntaxNode) {
            if !is_test_block_call(node) {
                return;
            }
            match self.policy {
                NestingPolicy::SingleSlot => {
                    if !self.state.has_assertion {
                        self.report(node);
                    }
                    // The whole slot goes: an enclosing block sees neither
                    // its own earlier calls nor the inner block's assertions.
                    self.state = AnalyzerState::default();
                }
                NestingPolicy::Stack => {
                    // An exit with no open frame means the event stream is
                    // unbalanced; nothing to judge.
                    if let Some(has_assertion) = self.frames.pop() {
                        if !has_assertion {
                            self.report(node);
                        }
                    }
                }
            }
        }
    }

    /// Run the rule over one tree with a fresh analyzer
    pub fn analyze(root: &SyntaxNode) -> Vec<Diagnostic> {
        analyze_with(root, NestingPolicy::default())
    }

    pub fn analyze_with(root: &SyntaxNode, policy: NestingPolicy) -> Vec<Diagnostic> {
        let mut analyzer = AssertionPresenceAnalyzer::with_policy(policy);
        walk(root, &mut analyzer);
        analyzer.finish()
    }

}
