//! Classifier and full-parse benchmarks.
//!
//! # Groups
//!
//! | Group | What it measures |
//! |-------|-----------------|
//! | `rule_position` | Classification cost by how deep the first matching rule sits |
//! | `parse` | Normalize + classify + extract per variant on a mixed line set |
//!
//! # Viewing results
//!
//! ```sh
//! cargo bench --bench classifier_bench
//! open target/criterion/report/index.html
//! ```

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use craftlog_core::classifier::Grammar;
use craftlog_core::{OutputParser, VariantId, VariantRegistry};

// ---------------------------------------------------------------------------
// Rule position
// ---------------------------------------------------------------------------

fn rule_position_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("rule_position");
    group.throughput(Throughput::Elements(1));

    let grammar = Grammar::vanilla();
    // Ordered by the rule that matches first.
    let lines = [
        ("warning", "[WARN] Can't keep up! Did the system time change?"),
        ("join", "[INFO] Bertware[/127.0.0.1:58189] logged in with entity id 27"),
        ("left", "[INFO] Bertware left the game."),
        ("info", "[INFO] Preparing spawn area: 42%"),
        ("unknown", "random unstructured text"),
    ];
    for (name, line) in lines {
        group.bench_with_input(BenchmarkId::from_parameter(name), line, |b, line| {
            b.iter(|| black_box(grammar.classify(black_box(line))))
        });
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// Full parse
// ---------------------------------------------------------------------------

const MIXED: &[&str] = &[
    "[12:30:01] [Server thread/INFO]: Bertware[/127.0.0.1:58189] logged in with entity id 27 at (-1001.0, 2.0, 1409.3)",
    "[12:31:00] [Server thread/WARN]: Can't keep up! Did the system time change, or is the server overloaded?",
    "[12:31:10] [Server thread/INFO]: Bertware lost connection: Disconnected",
    "[12:31:10] [Server thread/INFO]: Bertware left the game.",
    "[12:32:00] [Server thread/INFO]: Griefer42 lost connection: Banned by admin.",
    "[12:33:00] [Server thread/INFO]: There are 1/20 players online:",
    "random unstructured text",
];

fn parse_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    group.throughput(Throughput::Elements(MIXED.len() as u64));

    let registry = VariantRegistry::standard().expect("standard registry");
    for id in [VariantId::Vanilla, VariantId::Bukkit, VariantId::Paper, VariantId::Forge] {
        let parser = OutputParser::for_id(&registry, id).expect("registered variant");
        group.bench_with_input(BenchmarkId::from_parameter(id), &parser, |b, parser| {
            b.iter(|| {
                for line in MIXED {
                    black_box(parser.parse(black_box(line)));
                }
            })
        });
    }

    group.finish();
}

criterion_group!(benches, rule_position_bench, parse_bench);
criterion_main!(benches);
