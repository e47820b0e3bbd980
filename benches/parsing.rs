//! Benchmarks for kakaopack parsing and processing operations.
//!
//! Run with: `cargo bench`
//! Run specific group: `cargo bench --bench parsing -- desktop`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use kakaopack::core::output::{to_csv, to_json, to_jsonl};
use kakaopack::core::{FilterConfig, OutputConfig, apply_filters, merge_consecutive};
use kakaopack::parsers::KakaoParser;
use kakaopack::parsing::LineClassifier;

// =============================================================================
// Test Data Generators
// =============================================================================

/// Desktop layout: a date header every 100 messages, every 5th message
/// followed by a continuation line.
fn generate_desktop_txt(count: usize) -> String {
    let mut lines = Vec::with_capacity(count + count / 5 + count / 100 + 1);
    for i in 0..count {
        if i % 100 == 0 {
            let day = (i / 100) % 28 + 1;
            lines.push(format!(
                "--------------- 2024년 1월 {day}일 월요일 ---------------"
            ));
        }
        let sender = if i % 3 == 0 { "지수" } else { "민수" };
        let marker = if i % 2 == 0 { "오전" } else { "오후" };
        let hour = i % 12 + 1;
        let minute = i % 60;
        lines.push(format!(
            "[{sender}] [{marker} {hour}:{minute:02}] 메시지 번호 {i}"
        ));
        if i % 5 == 0 {
            lines.push(format!("이어지는 줄 {i}"));
        }
    }
    lines.join("\n")
}

/// Mobile layout: every line carries its own date.
fn generate_mobile_txt(count: usize) -> String {
    let mut lines = Vec::with_capacity(count);
    for i in 0..count {
        let sender = if i % 2 == 0 { "Alice" } else { "Bob" };
        let day = (i / 100) % 28 + 1;
        let hour = i % 12 + 1;
        let minute = i % 60;
        lines.push(format!(
            "2024. 1. {day}. PM {hour}:{minute:02}, {sender} : Message number {i}"
        ));
    }
    lines.join("\n")
}

// =============================================================================
// Parsing Benchmarks
// =============================================================================

fn bench_desktop_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("desktop_parsing");
    let parser = KakaoParser::new();

    for size in [100_usize, 1_000, 10_000, 50_000] {
        let txt = generate_desktop_txt(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &txt, |b, txt| {
            b.iter(|| {
                let messages = parser.parse_text(black_box(txt));
                black_box(messages)
            });
        });
    }
    group.finish();
}

fn bench_mobile_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("mobile_parsing");
    let parser = KakaoParser::new();

    for size in [100_usize, 1_000, 10_000, 50_000] {
        let txt = generate_mobile_txt(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &txt, |b, txt| {
            b.iter(|| {
                let messages = parser.parse_text(black_box(txt));
                black_box(messages)
            });
        });
    }
    group.finish();
}

fn bench_classifier(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify_line");
    let classifier = LineClassifier::new();

    let lines = [
        ("header", "--------------- 2024년 1월 1일 월요일 ---------------"),
        ("bracketed", "[지수] [오후 3:45] 안녕하세요"),
        ("dated", "2024. 1. 1. 오후 3:45, 민수 : 반가워요"),
        ("continuation", "그냥 이어지는 텍스트"),
    ];
    for (name, line) in lines {
        group.bench_with_input(BenchmarkId::from_parameter(name), &line, |b, line| {
            b.iter(|| black_box(classifier.classify(black_box(line))));
        });
    }
    group.finish();
}

// =============================================================================
// Processing Benchmarks
// =============================================================================

fn bench_merge_consecutive(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge_consecutive");
    let parser = KakaoParser::new();

    for size in [100_usize, 1_000, 10_000, 100_000] {
        let messages = parser.parse_text(&generate_desktop_txt(size));
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            &messages,
            |b, messages| {
                b.iter(|| {
                    let merged = merge_consecutive(black_box(messages.clone()));
                    black_box(merged)
                });
            },
        );
    }
    group.finish();
}

fn bench_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("filters");
    let messages = KakaoParser::new().parse_text(&generate_desktop_txt(10_000));
    let by_sender = FilterConfig::new().with_sender("지수");
    let by_date = FilterConfig::new()
        .with_date_from("2024-01-10")
        .unwrap()
        .with_date_to("2024-01-20")
        .unwrap();

    group.throughput(Throughput::Elements(messages.len() as u64));
    group.bench_function("sender", |b| {
        b.iter(|| black_box(apply_filters(messages.clone(), black_box(&by_sender))));
    });
    group.bench_function("date_range", |b| {
        b.iter(|| black_box(apply_filters(messages.clone(), black_box(&by_date))));
    });
    group.finish();
}

fn bench_output(c: &mut Criterion) {
    let mut group = c.benchmark_group("output");
    let messages = KakaoParser::new().parse_text(&generate_mobile_txt(10_000));
    let config = OutputConfig::new().with_timestamps();

    group.throughput(Throughput::Elements(messages.len() as u64));
    group.bench_function("csv", |b| {
        b.iter(|| black_box(to_csv(black_box(&messages), &config).unwrap()));
    });
    group.bench_function("json", |b| {
        b.iter(|| black_box(to_json(black_box(&messages), &config).unwrap()));
    });
    group.bench_function("jsonl", |b| {
        b.iter(|| black_box(to_jsonl(black_box(&messages), &config).unwrap()));
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_desktop_parsing,
    bench_mobile_parsing,
    bench_classifier,
    bench_merge_consecutive,
    bench_filters,
    bench_output,
);

criterion_main!(benches);
