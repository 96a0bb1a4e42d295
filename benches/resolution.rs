//! Resolution benchmarks
//!
//! Measures the two phases separately:
//! - building a flavor's shared configuration (capability loading,
//!   composition, glob compilation)
//! - resolving many files against one compiled stack, serially and in
//!   parallel
//!
//! ```bash
//! cargo bench --bench resolution
//! ```

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use lintstack::bundle::SharedConfig;
use lintstack::capability::{CapabilityLoader, StaticSource};
use lintstack::engine::{FileEntry, Resolver};
use lintstack::{Flavor, flavors};
use std::path::{Path, PathBuf};

fn shared(flavor: Flavor) -> SharedConfig {
    let specs = flavors::capabilities(flavor);
    let loader = CapabilityLoader::new(StaticSource::installing(&specs));
    SharedConfig::build(flavor, &loader, &[]).expect("built-in flavors compile")
}

fn files(count: usize) -> Vec<FileEntry> {
    const SHAPES: [&str; 6] = [
        "src/module{}/index.ts",
        "src/module{}/widget.test.ts",
        "src/module{}/Button.tsx",
        "scripts/task{}.js",
        "src/module{}/users.service.ts",
        "dist/chunk{}.js",
    ];
    (0..count)
        .map(|i| {
            let path = SHAPES[i % SHAPES.len()].replace("{}", &(i / SHAPES.len()).to_string());
            FileEntry::new(Path::new(""), PathBuf::from(path))
        })
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for flavor in Flavor::all() {
        group.bench_with_input(BenchmarkId::from_parameter(flavor), &flavor, |b, &flavor| {
            b.iter(|| shared(black_box(flavor)));
        });
    }
    group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let shared = shared(Flavor::Ui);
    let mut group = c.benchmark_group("resolve");

    for count in [100, 1_000, 10_000] {
        let files = files(count);
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("serial", count), &files, |b, files| {
            b.iter(|| {
                files
                    .iter()
                    .map(|file| shared.stack.resolve(black_box(&file.relative)))
                    .filter(|resolved| !resolved.ignored)
                    .count()
            });
        });

        group.bench_with_input(BenchmarkId::new("parallel", count), &files, |b, files| {
            b.iter(|| Resolver::new(&shared.stack).resolve(black_box(files)).files_resolved);
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_resolve);
criterion_main!(benches);
