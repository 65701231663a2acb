use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use datafile::{from_reader, from_str, to_string, Document};
use std::io::Cursor;

fn sample(sections: usize, keys: usize) -> String {
    let mut text = String::from("; generated\nName=bench\n");
    for s in 0..sections {
        text.push_str(&format!("\n; section {s}\n[Section{s}]\n"));
        for k in 0..keys {
            if k % 4 == 0 {
                text.push_str(&format!("; key {k}\n"));
            }
            text.push_str(&format!("Key{k} = value {s}.{k}\n"));
        }
    }
    text
}

fn benchmark_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for size in [10, 50, 200].iter() {
        let text = sample(*size, 20);
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| from_str(black_box(text)))
        });
    }

    group.finish();
}

fn benchmark_parse_reader(c: &mut Criterion) {
    let text = sample(50, 20);

    c.bench_function("parse_reader", |b| {
        b.iter(|| from_reader(Cursor::new(black_box(text.as_bytes()))).unwrap())
    });
}

fn benchmark_serialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize");

    for size in [10, 50, 200].iter() {
        let doc = from_str(&sample(*size, 20));
        group.bench_with_input(BenchmarkId::from_parameter(size), &doc, |b, doc| {
            b.iter(|| to_string(black_box(doc)))
        });
    }

    group.finish();
}

fn benchmark_lookup(c: &mut Criterion) {
    let doc = from_str(&sample(200, 20));

    c.bench_function("lookup_case_insensitive", |b| {
        b.iter(|| doc.get_value(black_box("KEY19"), black_box("section199")))
    });
}

fn benchmark_set(c: &mut Criterion) {
    c.bench_function("set_new_keys", |b| {
        b.iter(|| {
            let mut doc = Document::new();
            for i in 0..100 {
                let _ = doc.set_int(&format!("Key{i}"), i, "", "Numbers");
            }
            doc
        })
    });
}

fn benchmark_roundtrip(c: &mut Criterion) {
    let text = sample(50, 20);

    c.bench_function("roundtrip", |b| {
        b.iter(|| {
            let doc = from_str(black_box(&text));
            let _written = to_string(black_box(&doc));
        })
    });
}

criterion_group!(
    benches,
    benchmark_parse,
    benchmark_parse_reader,
    benchmark_serialize,
    benchmark_lookup,
    benchmark_set,
    benchmark_roundtrip
);
criterion_main!(benches);
