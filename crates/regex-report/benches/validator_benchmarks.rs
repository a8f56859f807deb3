//! Validator performance benchmarks.
//!
//! Measures full-match scanning and whole-prefix validation for namespaces of
//! increasing size.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use regex_report::validation::find_invalid;
use regex_report::{InMemoryIdentifiers, InMemoryRegistry, NullSink, PrefixPattern, PrefixValidator, Resource};

/// Patterns of the kind registries declare.
const PATTERNS: &[(&str, &str)] = &[
    ("numeric", "^\\d+$"),
    ("curie", "^GO:\\d{7}$"),
    ("uniprot", "^([A-N,R-Z][0-9]([A-Z][A-Z, 0-9][A-Z, 0-9][0-9]){1,2})|([O,P,Q][0-9][A-Z, 0-9][A-Z, 0-9][A-Z, 0-9][0-9])(\\.\\d+)?$"),
];

/// Identifiers with roughly one in ten failing a numeric pattern.
fn identifiers(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| {
            if i % 10 == 0 {
                format!("X{}", i)
            } else {
                i.to_string()
            }
        })
        .collect()
}

fn bench_find_invalid(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_invalid");
    let ids = identifiers(10_000);

    for (name, pattern) in PATTERNS {
        let pattern = PrefixPattern::new(pattern).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(name), &ids, |b, ids| {
            b.iter(|| find_invalid(black_box(&pattern), black_box(ids)))
        });
    }

    group.finish();
}

fn bench_validate_prefix(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate_prefix");
    let registry = InMemoryRegistry::new().with_resource(
        "chebi",
        Resource::new()
            .with_pattern("^\\d+$")
            .with_uri_format("http://purl.obolibrary.org/obo/CHEBI_$1"),
    );

    for size in [1_000, 10_000, 100_000] {
        let source = InMemoryIdentifiers::new().with_identifiers("chebi", identifiers(size));
        let validator = PrefixValidator::new(&registry, &source);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| validator.validate(black_box("chebi"), &NullSink))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_find_invalid, bench_validate_prefix);
criterion_main!(benches);
