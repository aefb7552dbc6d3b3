use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use moonbite_parser::lex;

const SOURCE: &str = r#"package bench
use "os"
use "binary" as bin

// a small but representative program
type Id uint64
type Pair<L, R> {
    left L;
    right R;
}

fun main() {
    var total = 0
    for (total < 1000) {
        total += 7 * 3 + 1
    }
    const label = match (total) {
        (. > 500) {
            "large"
        }
        base {
            "small"
        }
    }
}
"#;

fn lexer_benchmark(c: &mut Criterion) {
    c.bench_function("lex_small_program", |b| {
        b.iter(|| lex(black_box(SOURCE), "bench.mb"))
    });
}

criterion_group!(benches, lexer_benchmark);
criterion_main!(benches);
