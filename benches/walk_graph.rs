use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use godepgraph::app::{render_graph, Settings};
use godepgraph::graph::resolver::ManifestResolver;
use godepgraph::graph::Package;
use std::path::Path;

// Layered synthetic graph: every package imports the whole next layer.
fn layered(layers: usize, width: usize) -> ManifestResolver {
    let name = |l: usize, i: usize| format!("example.com/l{l}/p{i}");
    let mut pkgs = Vec::with_capacity(layers * width + 1);
    pkgs.push(Package {
        import_path: "example.com/root".into(),
        imports: (0..width).map(|i| name(0, i)).collect(),
        ..Package::default()
    });
    for l in 0..layers {
        for i in 0..width {
            let imports =
                if l + 1 < layers { (0..width).map(|j| name(l + 1, j)).collect() } else { Vec::new() };
            pkgs.push(Package { import_path: name(l, i), imports, ..Package::default() });
        }
    }
    ManifestResolver::from_packages(pkgs)
}

fn bench_render_graph(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_graph");
    let settings = Settings { roots: vec!["example.com/root".into()], ..Settings::default() };

    for (layers, width) in [(4, 8), (16, 16), (64, 8)] {
        let resolver = layered(layers, width);
        group.bench_function(BenchmarkId::new("layered", format!("{layers}x{width}")), |b| {
            b.iter(|| {
                let dot = render_graph(black_box(&settings), &resolver, Path::new("."))
                    .expect("render graph");
                black_box(dot.len())
            })
        });
    }

    group.finish();
}

criterion_group!(name = benches; config = Criterion::default(); targets = bench_render_graph);
criterion_main!(benches);
