use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use spider_html_cleaner::{Cleaner, CleanerConfig, IframePolicy, RulesetVersion};

// ---------------------------------------------------------------------------
// Fixture generators
// ---------------------------------------------------------------------------

/// Build a realistic HTML string with various elements.
fn generate_html(num_elements: usize) -> String {
    let mut html = String::from(
        "<!DOCTYPE html><html><head><title>Bench</title>\
         <meta charset=\"utf-8\"><meta name=\"viewport\" content=\"width=device-width\">\
         <style>body{margin:0}nav{display:flex}.hero{padding:2rem}</style>\
         <script>window.__data={init:true};</script></head><body>\
         <nav><a href=\"/\">Home</a><a href=\"/about\">About</a></nav>\
         <main>",
    );
    for i in 0..num_elements {
        match i % 8 {
            0 => html.push_str(&format!(
                "<div class=\"card\" id=\"c{i}\"><h2>Title {i}</h2><p>Description for item {i} with some text.</p></div>"
            )),
            1 => html.push_str(&format!(
                "<a href=\"/page/{i}\" class=\"link\" data-track=\"{i}\">Link {i}</a>"
            )),
            2 => html.push_str(&format!(
                "<button onclick=\"add({i})\" data-testid=\"add-{i}\" style=\"color:red\">Add</button>"
            )),
            3 => html.push_str(&format!(
                "<style>.item-{i}{{color:red;font-size:14px}}</style>"
            )),
            4 => html.push_str(&format!(
                "<svg viewBox=\"0 0 100 100\"><circle cx=\"50\" cy=\"50\" r=\"{}\"/></svg>",
                i % 50
            )),
            5 => html.push_str(&format!(
                "<img src=\"/img/{i}.jpg\" alt=\"Image {i}\" loading=\"lazy\">"
            )),
            6 => html.push_str(&format!(
                "<iframe src=\"/embed/{i}\" width=\"300\"><p>frame {i}</p></iframe>"
            )),
            _ => html.push_str(&format!(
                "<p data-id=\"{i}\">Paragraph {i} with <strong>bold</strong> and <em>italic</em> text.</p>"
            )),
        }
    }
    html.push_str("</main><footer><p>Copyright 2025</p></footer></body></html>");
    html
}

// ---------------------------------------------------------------------------
// Group 1: rewrite pass
// ---------------------------------------------------------------------------

fn bench_rewrite(c: &mut Criterion) {
    let mut group = c.benchmark_group("html-rewrite");

    let lean = Cleaner::default();
    let broad = Cleaner::new(&CleanerConfig::new().with_version(RulesetVersion::Broad))
        .expect("broad config");
    let inline = Cleaner::new(&CleanerConfig::new().with_iframe_policy(IframePolicy::Inline))
        .expect("inline config");

    let sizes = [
        ("small-1KB", 8),
        ("medium-50KB", 400),
        ("large-200KB", 1600),
    ];

    for (label, count) in &sizes {
        let html = generate_html(*count);

        group.bench_with_input(BenchmarkId::new("lean_disguise", label), &html, |b, h| {
            b.iter(|| lean.rewrite(black_box(h)))
        });
        group.bench_with_input(BenchmarkId::new("broad_disguise", label), &html, |b, h| {
            b.iter(|| broad.rewrite(black_box(h)))
        });
        group.bench_with_input(BenchmarkId::new("lean_inline", label), &html, |b, h| {
            b.iter(|| inline.rewrite(black_box(h)))
        });
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// Group 2: full cleanse (rewrite + minify)
// ---------------------------------------------------------------------------

fn bench_cleanse(c: &mut Criterion) {
    let mut group = c.benchmark_group("html-cleanse");

    let cleaner = Cleaner::default();

    for (label, count) in &[("small-1KB", 8), ("large-200KB", 1600)] {
        let html = generate_html(*count);

        group.bench_with_input(BenchmarkId::new("cleanse", label), &html, |b, h| {
            b.iter(|| cleaner.cleanse(black_box(h)))
        });
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// Criterion harness
// ---------------------------------------------------------------------------

criterion_group!(benches, bench_rewrite, bench_cleanse);
criterion_main!(benches);
