use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use launchman::catalog::{Catalog, DirectoryCatalog};
use launchman::search::SearchIndex;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

const FOLDERS: usize = 5;

/// Populate five folders with reverse-DNS launch item names, plus some non-plist noise.
fn create_launch_folders(files_per_folder: usize) -> (Vec<TempDir>, Catalog) {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let vendors = ["apple", "google", "microsoft", "adobe", "docker", "zoom", "dropbox"];
    let roles = ["agent", "helper", "updater", "daemon", "launcher", "sync"];

    let folders: Vec<TempDir> = (0..FOLDERS)
        .map(|_| TempDir::new().expect("Failed to create temp folder"))
        .collect();

    for folder in &folders {
        for i in 0..files_per_folder {
            let vendor = vendors[rng.gen_range(0..vendors.len())];
            let role = roles[rng.gen_range(0..roles.len())];
            let name = format!("com.{}.{}.{}.plist", vendor, role, i);
            fs::write(folder.path().join(name), b"<plist/>").expect("Failed to write file");
            if i % 10 == 0 {
                fs::write(folder.path().join(format!("notes-{}.txt", i)), b"")
                    .expect("Failed to write file");
            }
        }
    }

    let catalog = DirectoryCatalog::new(folders.iter().map(|d| d.path().to_path_buf()).collect())
        .load_all();
    (folders, catalog)
}

fn bench_index_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_build");
    group.sample_size(20);
    group.measurement_time(Duration::from_secs(3));

    for size in [50, 500, 2_000] {
        let (_folders, catalog) = create_launch_folders(size);
        group.bench_with_input(BenchmarkId::new("build", size), &catalog, |b, catalog| {
            b.iter(|| black_box(SearchIndex::build(catalog)));
        });
    }

    group.finish();
}

fn bench_index_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_query");
    group.sample_size(20);
    group.measurement_time(Duration::from_secs(3));

    let (_folders, catalog) = create_launch_folders(2_000);
    let index = SearchIndex::build(&catalog);

    for term in ["z", "GOOGLE", "updater.19", "no-such-item"] {
        group.bench_with_input(BenchmarkId::new("search", term), &term, |b, term| {
            b.iter(|| black_box(index.search(term)));
        });
    }

    group.finish();
}

fn bench_load_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("load_all");
    group.sample_size(10);

    let (folders, _) = create_launch_folders(500);
    let directories = DirectoryCatalog::new(folders.iter().map(|d| d.path().to_path_buf()).collect());

    group.bench_function("load_all_500", |b| {
        b.iter(|| black_box(directories.load_all()));
    });

    group.finish();
}

criterion_group!(benches, bench_index_build, bench_index_query, bench_load_all);
criterion_main!(benches);
