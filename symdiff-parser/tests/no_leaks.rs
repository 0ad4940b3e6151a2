//! Checks that every allocation made while parsing is released once the result is dropped,
//! including the partial trees of every abandoned alternative.

use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;
use symdiff_parser::Parser;

/// Counts the allocations that are currently live on each thread.
struct Counting;

thread_local! {
    static LIVE: Cell<isize> = const { Cell::new(0) };
}

unsafe impl GlobalAlloc for Counting {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = System.alloc(layout);
        if !ptr.is_null() {
            let _ = LIVE.try_with(|live| live.set(live.get() + 1));
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout);
        let _ = LIVE.try_with(|live| live.set(live.get() - 1));
    }
}

#[global_allocator]
static GLOBAL: Counting = Counting;

fn live() -> isize {
    LIVE.with(Cell::get)
}

/// Runs `f` once to warm up any lazily initialized state, then returns the number of allocations
/// the second run left behind.
fn leaked(f: impl Fn()) -> isize {
    f();
    let before = live();
    f();
    live() - before
}

fn parse_expression(source: &str) -> bool {
    Parser::new(source).parse_expression().is_ok()
}

fn parse_program(source: &str) -> bool {
    Parser::new(source).parse_program().is_ok()
}

#[test]
fn dangling_operator() {
    assert_eq!(leaked(|| assert!(!parse_expression("(3.0+)$"))), 0);
}

#[test]
fn successful_parse() {
    assert_eq!(leaked(|| assert!(parse_expression("x = f(a, sin(b)) * (c - 2.5) ^ d$"))), 0);
}

#[test]
fn nested_failures() {
    let sources = [
        "x = (1 + $",
        "f(a, b, $",
        "g(1, h(2, ))$",
        "ln(x) + y = $",
        "a ~ (b < )$",
    ];
    for source in sources {
        assert_eq!(leaked(|| assert!(!parse_expression(source))), 0, "{}", source);
    }
}

#[test]
fn failures_inside_statements() {
    let sources = [
        "function f(a, b) { if (a < b) { return(a); } else { x = ; } }$",
        "function f() { while x > 0 { x = x - ; } }$",
        "function f() { for (i = 0; i < 10; i = ) { } }$",
        "function f(a,) { }$",
        "function f() { return(1) }$",
        "function f() { } function$",
    ];
    for source in sources {
        assert_eq!(leaked(|| assert!(!parse_program(source))), 0, "{}", source);
    }
}

#[test]
fn fatal_failure() {
    assert_eq!(leaked(|| assert!(!parse_expression("a + (b * averyveryverylongname)$"))), 0);
}

#[test]
fn successful_program() {
    let source = "function f(a, b) { if (a < b) { return(a); } else { return(b); } }
                  function g(n) { for (i = 0; i < n; i = i + 1) { n = f(n, i); } return(n); }$";
    assert_eq!(leaked(|| assert!(parse_program(source))), 0);
}
