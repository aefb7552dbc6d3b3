use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use moonbite_parser::parse;

const SOURCE: &str = r#"package bench
use "os"

type Id uint64
type Score int32 | float64

trait Printable {
    print() string
}

fun fibonacci(n int32) int32 {
    if (n <= 1) {
        return n
    }
    return fibonacci(n - 1) + fibonacci(n - 2)
}

fun main() {
    var total = 0
    for (total < 1000) {
        total += fibonacci(10)
    }
    const values = [1, 2, 3, 4]
    const lookup = {"one": 1, "two": 2}
}
"#;

fn parser_benchmark(c: &mut Criterion) {
    c.bench_function("parse_small_program", |b| {
        b.iter(|| parse(black_box(SOURCE), "bench.mb"))
    });
}

criterion_group!(benches, parser_benchmark);
criterion_main!(benches);
