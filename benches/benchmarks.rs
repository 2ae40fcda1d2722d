use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

use sangtae::host::Consumer;
use sangtae::{use_get_store, Store};

fn store_creation_benchmark(c: &mut Criterion) {
    c.bench_function("store_creation", |b| {
        b.iter(|| {
            let store: Store<i32> = Store::new(black_box(42));
            store
        });
    });
}

fn store_read_benchmark(c: &mut Criterion) {
    let store: Store<i32> = Store::new(42);

    c.bench_function("store_read", |b| {
        b.iter(|| {
            black_box(store.get_state());
        });
    });
}

fn store_update_benchmark(c: &mut Criterion) {
    #[derive(Clone)]
    struct State {
        counter: usize,
        name: String,
    }

    let store = Store::new(State {
        counter: 0,
        name: "test".to_string(),
    });

    c.bench_function("store_update", |b| {
        let mut i = 0;
        b.iter(|| {
            store.update_state(|state| State {
                counter: black_box(i),
                name: state.name.clone(),
            });
            i += 1;
        });
    });
}

fn store_subscribe_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_subscribe");

    for listener_count in [1, 10, 100].iter() {
        let store = Store::new(0_usize);

        let handles: Vec<_> = (0..*listener_count)
            .map(|_| {
                store.subscribe_fn(|| {
                    // Empty listener
                })
            })
            .collect();

        group.bench_with_input(
            BenchmarkId::from_parameter(listener_count),
            listener_count,
            |b, _| {
                let mut i = 0;
                b.iter(|| {
                    store.set_state(black_box(i));
                    i += 1;
                });
            },
        );

        for handle in &handles {
            handle.unsubscribe();
        }
    }
    group.finish();
}

fn subscribe_unsubscribe_benchmark(c: &mut Criterion) {
    let store = Store::new(0_usize);

    c.bench_function("subscribe_unsubscribe", |b| {
        b.iter(|| {
            let handle = store.subscribe_fn(|| {});
            black_box(handle.unsubscribe());
        });
    });
}

fn consumer_flush_benchmark(c: &mut Criterion) {
    let store = Store::new(0_usize);
    let mut view = Consumer::mount({
        let store = store.clone();
        move |cx| *use_get_store(cx, &store)
    })
    .expect("initial render");

    c.bench_function("consumer_flush", |b| {
        let mut i = 0;
        b.iter(|| {
            store.set_state(black_box(i));
            black_box(view.flush().expect("render"));
            i += 1;
        });
    });
}

criterion_group!(
    benches,
    store_creation_benchmark,
    store_read_benchmark,
    store_update_benchmark,
    store_subscribe_benchmark,
    subscribe_unsubscribe_benchmark,
    consumer_flush_benchmark,
);
criterion_main!(benches);
