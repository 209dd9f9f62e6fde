//! Benchmarks for request localization
//!
//! Measures header parsing, locale negotiation and message lookup, the work
//! done on every request.

use criterion::{Criterion, criterion_group, criterion_main};
use lingo::{Localization, l10n_args, parse_accept_language, resolve_locale};
use std::hint::black_box;
use std::sync::Arc;

const HEADERS: &[&str] = &[
    "en",
    "en-US,en;q=0.9,fr;q=0.8,de;q=0.7",
    "fr-CH, fr;q=0.9, en;q=0.8, de;q=0.7, *;q=0.5",
    "ja;q=bogus,zh-Hant-TW;q=0.3,ko;q=0.2,pt-BR;q=0.1",
];

fn localization() -> Arc<Localization> {
    Arc::new(
        Localization::builder()
            .allowed_locales(["en", "de", "fr"])
            .default_locale("en")
            .source("en", "hello = Hello!\ngreeting = Hello, { $name }!\n    .title = Welcome")
            .source("de", "hello = Hallo!\ngreeting = Hallo, { $name }!")
            .source("fr", "hello = Bonjour!\ngreeting = Bonjour, { $name }!")
            .build()
            .expect("benchmark catalog"),
    )
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("accept_language_parse");

    for (i, header) in HEADERS.iter().enumerate() {
        group.bench_function(format!("header_{}", i), |b| {
            b.iter(|| parse_accept_language(black_box(header)))
        });
    }

    group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let allowed = ["en", "de", "fr"];
    let prefs = parse_accept_language(HEADERS[3]);

    c.bench_function("resolve_locale_fallback", |b| {
        b.iter(|| resolve_locale(black_box(&prefs), &allowed, "en").len())
    });
}

fn bench_lookup(c: &mut Criterion) {
    let l10n = localization();
    let args = l10n_args! { "name" => "John" };
    let mut group = c.benchmark_group("message_lookup");

    group.bench_function("plain", |b| {
        b.iter(|| l10n.gettext(black_box("hello"), None, Some("de")))
    });

    group.bench_function("with_args", |b| {
        b.iter(|| l10n.gettext(black_box("greeting"), Some(&args), Some("fr")))
    });

    group.bench_function("attribute", |b| {
        b.iter(|| l10n.gettext(black_box("greeting.title"), None, None))
    });

    group.bench_function("missing", |b| {
        b.iter(|| l10n.gettext(black_box("nope"), None, Some("en")))
    });

    group.bench_function("localizer_per_request", |b| {
        b.iter(|| {
            let localizer = l10n.localizer(Some(black_box(HEADERS[2])));
            localizer.gettext("greeting", Some(&args))
        })
    });

    group.finish();
}

criterion_group!(benches, bench_parse, bench_resolve, bench_lookup);
criterion_main!(benches);
