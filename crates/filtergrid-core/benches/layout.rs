use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use filtergrid_core::{FilterContainer, GridOptions, MemoryHost, Size};

fn make_page(items: usize) -> MemoryHost {
    let host = MemoryHost::new();
    let root = host.create_element("div", &["filtr-container"]);
    host.set_size(root, Size::new(1280.0, 0.0)).unwrap();
    for _ in 0..items {
        host.insert(root, "div", &["filtr-item"], Size::new(320.0, 240.0)).unwrap();
    }
    host
}

fn bench_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("container_new");
    for items in [10, 100, 1000] {
        let host = make_page(items);
        group.bench_with_input(BenchmarkId::from_parameter(items), &host, |b, host| {
            b.iter(|| {
                let grid = FilterContainer::new(
                    host.clone(),
                    black_box(".filtr-container"),
                    GridOptions::default(),
                )
                .unwrap();
                black_box(grid.len())
            })
        });
    }
    group.finish();
}

fn bench_resize_pass(c: &mut Criterion) {
    let mut grid =
        FilterContainer::new(make_page(1000), ".filtr-container", GridOptions::default()).unwrap();

    c.bench_function("resize_pass_1000_items", |b| {
        b.iter(|| {
            grid.update_width().unwrap();
            grid.update_filter_items_dimensions().unwrap();
            let columns = black_box(grid.calc_columns().unwrap());
            let rows = grid.len().div_ceil(columns.max(1));
            grid.update_height(rows as f32 * 240.0).unwrap();
        })
    });
}

criterion_group!(benches, bench_construction, bench_resize_pass);
criterion_main!(benches);
