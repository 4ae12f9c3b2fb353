// Copyright (C) Brian G. Milnes 2025

//! Tests for call visitor dispatch

mod common;
use common::parse_ts;

use anyhow::Result;
use assertlint::{walk, CallTrace, CallVisitor, SyntaxNode};

#[test]
fn test_enter_exit_order() -> Result<()> {
    let root = parse_ts("test('a', () => { expect(x).toBe(1); }); done();")?;
    let mut trace = CallTrace::new();
    walk(&root, &mut trace);

    assert_eq!(trace.events, [
        "enter test",
        "enter toBe",
        "enter expect",
        "exit expect",
        "exit toBe",
        "exit test",
        "enter done",
        "exit done",
    ]);
    Ok(())
}

#[test]
fn test_events_balance() -> Result<()> {
    let root = parse_ts("test('a', async () => { await a(b(c())); test('n', () => d()); });")?;

    #[derive(Default)]
    struct Depth {
        current: i64,
        max: i64,
    }
    impl CallVisitor for Depth {
        fn enter_call(&mut self, _node: &SyntaxNode) {
            self.current += 1;
            self.max = self.max.max(self.current);
        }
        fn exit_call(&mut self, _node: &SyntaxNode) {
            self.current -= 1;
        }
    }

    let mut depth = Depth::default();
    walk(&root, &mut depth);
    assert_eq!(depth.current, 0);
    assert_eq!(depth.max, 4);
    Ok(())
}

#[test]
fn test_no_calls_no_events() -> Result<()> {
    let root = parse_ts("const answer: number = 42;")?;
    let mut trace = CallTrace::new();
    walk(&root, &mut trace);
    assert!(trace.events.is_empty());
    Ok(())
}
