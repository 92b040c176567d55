//! Benchmarks for path resolution, lookup and table loading.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use vfsterm_vfs::{PathSegments, SourceRecord, build, load_csv, resolve};

fn records(n_dirs: usize, files_per_dir: usize) -> Vec<SourceRecord> {
    let mut out = Vec::with_capacity(n_dirs * (files_per_dir + 1));
    for d in 0..n_dirs {
        out.push(SourceRecord::dir(&format!("/data/dir_{d}")));
        for f in 0..files_per_dir {
            out.push(SourceRecord::file(
                &format!("/data/dir_{d}/file_{f}.txt"),
                "raw",
                "payload",
            ));
        }
    }
    out
}

fn bench_resolve(c: &mut Criterion) {
    let cwd = PathSegments::parse("/home/user/projects/vfsterm");
    let mut group = c.benchmark_group("resolve");
    for input in ["", "..", "../../etc/./hosts", "/usr//local/bin/", "a/b/c/d/e/f"] {
        group.bench_function(BenchmarkId::new("resolve", input), |b| {
            b.iter(|| resolve(black_box(input), black_box(&cwd)));
        });
    }
    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");
    for n_dirs in [10, 100] {
        let tree = build(records(n_dirs, 20)).unwrap();
        let paths: Vec<PathSegments> = (0..n_dirs)
            .map(|d| PathSegments::parse(&format!("/data/dir_{d}/file_7.txt")))
            .collect();
        group.bench_function(BenchmarkId::new("lookup", n_dirs), |b| {
            b.iter(|| {
                for path in &paths {
                    let _ = black_box(tree.lookup(black_box(path)));
                }
            });
        });
    }
    group.finish();
}

fn bench_load_csv(c: &mut Criterion) {
    let mut csv_text = String::from("path,type,encoding,content\n");
    for record in records(50, 20) {
        match record.kind {
            vfsterm_vfs::RecordKind::Dir => csv_text.push_str(&format!("{},dir,,\n", record.path)),
            vfsterm_vfs::RecordKind::File => csv_text.push_str(&format!(
                "{},file,{},{}\n",
                record.path, record.encoding, record.content
            )),
        }
    }
    c.bench_function("load_csv_1050_rows", |b| {
        b.iter(|| load_csv(black_box(csv_text.as_bytes())).unwrap());
    });
}

criterion_group!(benches, bench_resolve, bench_lookup, bench_load_csv);
criterion_main!(benches);
