// Performance benchmarks for signature field insertion
//
// Run benchmarks with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lopdf::Document;
use pdf_sigfield::{acroform, fixtures, geometry, stamper, SignatureField, SignatureRect};

fn fixture_bytes(page_count: usize) -> Vec<u8> {
    fixtures::document_bytes(page_count).unwrap()
}

fn field() -> SignatureField {
    SignatureField::new("Signature1", SignatureRect::from_corners(36.0, 36.0, 236.0, 86.0)).unwrap()
}

/// Benchmark coordinate parsing
fn bench_rect_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("rect_parsing");

    group.bench_function("four_corners", |b| {
        b.iter(|| {
            SignatureRect::parse(
                black_box("236.5"),
                black_box("86"),
                black_box("-36"),
                black_box("1e2"),
            )
        })
    });

    group.bench_function("single_coordinate", |b| {
        b.iter(|| geometry::parse_coordinate(black_box("612.25")))
    });

    group.finish();
}

/// Benchmark the full parse -> insert -> serialize path at different document sizes
fn bench_field_insertion(c: &mut Criterion) {
    let mut group = c.benchmark_group("field_insertion");
    let field = field();

    for page_count in [1, 10, 100].iter() {
        let bytes = fixture_bytes(*page_count);
        group.bench_with_input(BenchmarkId::from_parameter(page_count), &bytes, |b, bytes| {
            b.iter(|| stamper::add_signature_field_to_bytes(black_box(bytes), &field, 1))
        });
    }

    group.finish();
}

/// Benchmark duplicate-name scanning over a populated form
fn bench_field_name_scan(c: &mut Criterion) {
    let mut doc = Document::load_mem(&fixture_bytes(1)).unwrap();
    for i in 0..200 {
        let rect = SignatureRect::from_corners(0.0, 0.0, 10.0, 10.0);
        let f = SignatureField::new(format!("Field{}", i), rect).unwrap();
        stamper::add_signature_field(&mut doc, &f, 1).unwrap();
    }

    c.bench_function("existing_field_names_200", |b| {
        b.iter(|| acroform::existing_field_names(black_box(&doc)))
    });
}

criterion_group!(
    benches,
    bench_rect_parsing,
    bench_field_insertion,
    bench_field_name_scan
);
criterion_main!(benches);
