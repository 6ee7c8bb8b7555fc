//! Benchmarks for index construction, querying and suggestions.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pantry_search::{Recipe, RecipeIndex, SearchConfig, SearchEngine, SearchOptions};

const DISHES: [&str; 8] = [
    "Chocolate Cake",
    "Lentil Soup",
    "Chicken Curry",
    "Caesar Salad",
    "Banana Bread",
    "Mushroom Risotto",
    "Beef Tacos",
    "Lemon Tart",
];

fn create_test_recipes(count: usize) -> Vec<Recipe> {
    (0..count)
        .map(|i| {
            let dish = DISHES[i % DISHES.len()];
            let title = format!("{} No. {}", dish, i);
            let description = format!("A reliable take on {}", dish.to_lowercase());
            Recipe::new(i as i64, title, description)
                .with_ingredients(["salt", "pepper", "olive oil", "garlic"])
                .with_tags(["weeknight", if i % 3 == 0 { "vegan" } else { "family" }])
                .with_categories([if i % 2 == 0 { "Mains" } else { "Desserts" }])
        })
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_build");
    let config = SearchConfig::default();

    for size in [100, 1000, 5000].iter() {
        let recipes = create_test_recipes(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| RecipeIndex::build(black_box(&recipes), &config))
        });
    }

    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("query");
    let recipes = create_test_recipes(2000);
    let index = RecipeIndex::build(&recipes, &SearchConfig::default()).unwrap();

    for query in ["chocolate", "choclate", "mushroom risotto", "vegan"] {
        group.bench_with_input(BenchmarkId::new("indexed", query), query, |b, q| {
            b.iter(|| index.search(black_box(q), 50))
        });
    }

    group.finish();
}

fn bench_engine(c: &mut Criterion) {
    let recipes = create_test_recipes(2000);
    let plain = SearchEngine::with_defaults();

    let mut config = SearchConfig::default();
    config.cache.enabled = true;
    let cached = SearchEngine::new(config).unwrap();

    let mut group = c.benchmark_group("engine_search");
    group.bench_function("rebuild_per_call", |b| {
        b.iter(|| plain.search(black_box(&recipes), "lentil", &SearchOptions::new()))
    });
    group.bench_function("cached", |b| {
        b.iter(|| cached.search(black_box(&recipes), "lentil", &SearchOptions::new()))
    });
    group.bench_function("suggest", |b| {
        b.iter(|| plain.suggest(black_box(&recipes), "lem", Some(5)))
    });
    group.finish();
}

criterion_group!(benches, bench_build, bench_query, bench_engine);
criterion_main!(benches);
