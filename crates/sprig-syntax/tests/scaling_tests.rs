//! Scaling tests: tokenizing and parsing must stay linear in input length.
//!
//! Each case times parsing, counting and dropping an input and one eight
//! times larger. Linear work gives a ratio near 8, quadratic work near 64;
//! the bound sits well between them to absorb timer noise.

use std::time::{Duration, Instant};

use sprig_syntax::parse;

const GROWTH: usize = 8;
const MAX_RATIO: f64 = 24.0;
const RUNS: usize = 5;

/// Best-of-N wall time to parse `input`.
fn best_parse_time(input: &str) -> Duration {
    (0..RUNS)
        .map(|_| {
            let start = Instant::now();
            let root = parse(input).expect("scaling input should parse");
            assert!(root.element_count() > 0 || !input.contains('<'));
            drop(root);
            start.elapsed()
        })
        .min()
        .unwrap_or_default()
}

fn assert_linear(name: &str, make_input: impl Fn(usize) -> String, base: usize) {
    let small = make_input(base);
    let large = make_input(base * GROWTH);
    let small_time = best_parse_time(&small).as_secs_f64().max(1e-6);
    let large_time = best_parse_time(&large).as_secs_f64();
    let ratio = large_time / small_time;
    assert!(
        ratio < MAX_RATIO,
        "{name}: {GROWTH}x input took {ratio:.1}x as long ({small_time:.6}s -> {large_time:.6}s)"
    );
}

#[test]
fn test_long_text_scales_linearly() {
    assert_linear("long text", |n| "lorem ipsum ".repeat(n), 20_000);
}

#[test]
fn test_many_siblings_scale_linearly() {
    assert_linear("siblings", |n| "<p>text</p>".repeat(n), 10_000);
}

#[test]
fn test_repeated_nesting_scales_linearly() {
    let block = format!("{}x{}", "<a>".repeat(50), "</a>".repeat(50));
    assert_linear("nesting", |n| block.repeat(n), 200);
}

#[test]
fn test_deep_nesting_scales_linearly() {
    assert_linear(
        "deep nesting",
        |n| format!("{}x{}", "<a>".repeat(n), "</a>".repeat(n)),
        15_000,
    );
}
