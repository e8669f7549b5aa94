//! Benchmarks for parsing and rendering.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use docexport::{render_docx, render_pptx, SectionInput, StyleConfig};

/// Creates synthetic sections mixing paragraphs and two bullet levels.
fn create_sections(count: usize) -> Vec<SectionInput> {
    (0..count)
        .map(|i| {
            let mut content = String::new();
            for j in 0..10 {
                content.push_str(&format!("Paragraph {} of section {} with some filler text.\n", j, i));
                content.push_str(&format!("- Bullet {}\n  - Nested bullet {}\n\n", j, j));
            }
            SectionInput::new(format!("Section {}", i + 1), content)
        })
        .collect()
}

fn bench_parse(c: &mut Criterion) {
    let sections = create_sections(1);
    let content = &sections[0].content;

    c.bench_function("parse_section", |b| {
        b.iter(|| docexport::parse(black_box(content)));
    });
}

fn bench_render(c: &mut Criterion) {
    let style = StyleConfig::default();
    let mut group = c.benchmark_group("render");

    for count in [1, 10, 50].iter() {
        let sections = create_sections(*count);

        group.bench_function(format!("docx_{}_sections", count), |b| {
            b.iter(|| render_docx("Benchmark", black_box(&sections), &style).unwrap());
        });

        group.bench_function(format!("pptx_{}_sections", count), |b| {
            b.iter(|| render_pptx("Benchmark", black_box(&sections), None, &style).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse, bench_render);
criterion_main!(benches);
