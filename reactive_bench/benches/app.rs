// Copyright 2026 the Reactive Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use reactive_app::reactivity::watch_phase;
use reactive_app::{App, AppOptions, Value};
use reactive_scheduler::SchedulerPolicy;

/// Entry point for `reactive_app` wind-tunnel benchmarks.
///
/// Registers scenarios that highlight how notify/drain cost scales with graph shape: chains,
/// fanout, disjoint trees, a shared upstream, and a layered DAG cone.
fn bench_app(c: &mut Criterion) {
    bench_chain_rerun(c);
    bench_chain_noop(c);
    bench_fanout_rerun(c);
    bench_disjoint_chains(c);
    bench_shared_upstream_one_watcher(c);
    bench_shared_upstream_all_watchers(c);
    bench_layered_dag_cone(c);
}

fn sync_app() -> App {
    App::new(AppOptions {
        scheduler_policy: SchedulerPolicy::Sync,
        ..AppOptions::default()
    })
}

fn install_counting_watch(app: &mut App) {
    app.define_phases(vec![watch_phase(|ctx| {
        black_box(ctx.node);
    })])
    .unwrap();
}

/// Linear chain of `len` watched paths, each a distinct leaf under `chain.N`.
///
/// Measures the cost of a single leaf mutation when `len` unrelated siblings are tracked
/// alongside it (the trie must reject the misses quickly).
fn build_chain(len: usize) -> App {
    let mut app = sync_app();
    for i in 0..len {
        app.set(&format!("chain.{i}"), Value::Int(0)).unwrap();
        let node = app.add_node(0, Some("cell"));
        app.track(node, &format!("chain.{i}")).unwrap();
    }
    install_counting_watch(&mut app);
    app
}

fn bench_chain_rerun(c: &mut Criterion) {
    let mut group = c.benchmark_group("chain_rerun");
    for &len in &[10_usize, 100, 1_000] {
        let mut app = build_chain(len);
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, _| {
            let mut v = 0_i64;
            b.iter(|| {
                v = v.wrapping_add(1);
                app.set("chain.0", Value::Int(black_box(v))).unwrap();
            });
        });
    }
    group.finish();
}

/// Steady-state overhead of `tick()` when nothing is dirty; should be near-constant and not
/// scale with the number of tracked nodes.
fn bench_chain_noop(c: &mut Criterion) {
    let mut group = c.benchmark_group("chain_noop_tick");
    for &len in &[10_usize, 100, 1_000] {
        let mut app = build_chain(len);
        app.advance_clock(1_000);
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, _| {
            b.iter(|| {
                app.tick();
            });
        });
    }
    group.finish();
}

/// One path fed into `fanout` independently tracked effect nodes, all under the deep wildcard
/// mask `*` (so every mutation admits every node; the cost is dominated by traversal/mark, not
/// trie rejection).
fn build_fanout(fanout: usize) -> App {
    let mut app = sync_app();
    app.set("root", Value::Int(0)).unwrap();
    let root = app.add_node(0, Some("cell"));
    app.track(root, "root").unwrap();
    for _ in 0..fanout {
        let leaf = app.add_node(0, Some("cell"));
        app.connect(root, leaf);
        app.track(leaf, "*").unwrap();
    }
    install_counting_watch(&mut app);
    app
}

fn bench_fanout_rerun(c: &mut Criterion) {
    let mut group = c.benchmark_group("fanout_rerun");
    for &fanout in &[10_usize, 100, 1_000] {
        let mut app = build_fanout(fanout);
        group.bench_with_input(BenchmarkId::from_parameter(fanout), &fanout, |b, _| {
            let mut v = 0_i64;
            b.iter(|| {
                v = v.wrapping_add(1);
                app.set("root", Value::Int(black_box(v))).unwrap();
            });
        });
    }
    group.finish();
}

/// Many disjoint single-node trees, each tracking a distinct path. Mutating one should stay
/// cheap as the total tree count grows.
fn build_disjoint(trees: usize) -> App {
    let mut app = sync_app();
    for i in 0..trees {
        app.set(&format!("tree.{i}.value"), Value::Int(0)).unwrap();
        let node = app.add_node(0, Some("cell"));
        app.track(node, &format!("tree.{i}.value")).unwrap();
    }
    install_counting_watch(&mut app);
    app
}

fn bench_disjoint_chains(c: &mut Criterion) {
    let mut group = c.benchmark_group("disjoint_trees_mutate_one");
    for &trees in &[10_usize, 100, 1_000] {
        let mut app = build_disjoint(trees);
        group.bench_with_input(BenchmarkId::from_parameter(trees), &trees, |b, &trees| {
            let mut v = 0_i64;
            let mut idx = 0_usize;
            b.iter(|| {
                v = v.wrapping_add(1);
                idx = (idx + 1) % trees;
                app.set(&format!("tree.{idx}.value"), Value::Int(black_box(v)))
                    .unwrap();
            });
        });
    }
    group.finish();
}

/// `tenants` leaves each depend on one shared upstream node plus their own per-tenant path.
/// Mutating a single tenant's own path should stay roughly constant as tenant count grows.
fn build_shared_upstream(tenants: usize) -> App {
    let mut app = sync_app();
    app.set("shared", Value::Int(0)).unwrap();
    let shared = app.add_node(0, Some("cell"));
    app.track(shared, "shared").unwrap();
    for i in 0..tenants {
        app.set(&format!("tenant.{i}"), Value::Int(0)).unwrap();
        let per = app.add_node(0, Some("cell"));
        app.track(per, &format!("tenant.{i}")).unwrap();
        let leaf = app.add_node(0, Some("cell"));
        app.connect(shared, leaf);
        app.connect(per, leaf);
        app.track(leaf, "*").unwrap();
    }
    install_counting_watch(&mut app);
    app
}

/// Invalidating exactly one tenant's own path; the shared node is untouched.
fn bench_shared_upstream_one_watcher(c: &mut Criterion) {
    let mut group = c.benchmark_group("shared_upstream_mutate_one_tenant");
    for &tenants in &[10_usize, 100, 1_000] {
        let mut app = build_shared_upstream(tenants);
        group.bench_with_input(
            BenchmarkId::from_parameter(tenants),
            &tenants,
            |b, &tenants| {
                let mut v = 0_i64;
                let mut idx = 0_usize;
                b.iter(|| {
                    v = v.wrapping_add(1);
                    idx = (idx + 1) % tenants;
                    app.set(&format!("tenant.{idx}"), Value::Int(black_box(v)))
                        .unwrap();
                });
            },
        );
    }
    group.finish();
}

/// Invalidating the shared path; every tenant's leaf should rerun, so cost should scale roughly
/// linearly with tenant count (the "blast radius" case).
fn bench_shared_upstream_all_watchers(c: &mut Criterion) {
    let mut group = c.benchmark_group("shared_upstream_mutate_shared");
    for &tenants in &[10_usize, 100, 1_000] {
        let mut app = build_shared_upstream(tenants);
        group.bench_with_input(BenchmarkId::from_parameter(tenants), &tenants, |b, _| {
            let mut v = 0_i64;
            b.iter(|| {
                v = v.wrapping_add(1);
                app.set("shared", Value::Int(black_box(v))).unwrap();
            });
        });
    }
    group.finish();
}

/// Layered DAG where layer `n`'s nodes each depend on two neighbors from layer `n - 1`; measures
/// the widening recompute cone from a single root mutation.
fn build_layered_dag(width: usize, layers: usize) -> App {
    let mut app = sync_app();
    let mut prev = Vec::with_capacity(width);
    for i in 0..width {
        app.set(&format!("layer0.{i}"), Value::Int(0)).unwrap();
        let node = app.add_node(0, Some("cell"));
        app.track(node, &format!("layer0.{i}")).unwrap();
        prev.push(node);
    }
    for _ in 1..layers {
        let mut next = Vec::with_capacity(width);
        for i in 0..width {
            let n = app.add_node(0, Some("cell"));
            app.connect(prev[i], n);
            app.connect(prev[(i + 1) % width], n);
            app.track(n, "*").unwrap();
            next.push(n);
        }
        prev = next;
    }
    install_counting_watch(&mut app);
    app
}

fn bench_layered_dag_cone(c: &mut Criterion) {
    let mut group = c.benchmark_group("layered_dag_cone_mutate_one_root");
    for &(width, layers) in &[(64_usize, 8_usize), (256, 8), (256, 16)] {
        let mut app = build_layered_dag(width, layers);
        group.bench_with_input(
            BenchmarkId::new("w_l", format!("{width}x{layers}")),
            &(width, layers),
            |b, &(width, _layers)| {
                let mut v = 0_i64;
                let mut idx = 0_usize;
                b.iter(|| {
                    v = v.wrapping_add(1);
                    idx = (idx + 1) % width;
                    app.set(&format!("layer0.{idx}"), Value::Int(black_box(v)))
                        .unwrap();
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_app);
criterion_main!(benches);
