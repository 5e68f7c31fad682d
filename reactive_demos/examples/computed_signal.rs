// Copyright 2026 the Reactive Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A computed effect `c = a + b` that re-evaluates exactly once per drain after either base
//! signal changes.

use std::cell::Cell;
use std::rc::Rc;

use reactive_app::reactivity::{Effect, Signal, computed_phase};
use reactive_app::{App, AppOptions, Value};
use reactive_scheduler::SchedulerPolicy;

fn main() {
    let mut app: App = App::new(AppOptions {
        scheduler_policy: SchedulerPolicy::Sync,
        ..AppOptions::default()
    });

    let a = Signal::new(&mut app, "a", Value::Int(1)).unwrap();
    let b = Signal::new(&mut app, "b", Value::Int(2)).unwrap();
    app.track(a.node(), "a").unwrap();
    app.track(b.node(), "b").unwrap();

    app.set("c", Value::Int(0)).unwrap();
    let c = Effect::new(&mut app, "c").unwrap();

    let recompute_count = Rc::new(Cell::new(0));
    let count_c = Rc::clone(&recompute_count);
    app.define_phases(vec![computed_phase(move |ctx| {
        count_c.set(count_c.get() + 1);
        let _ = ctx;
    })])
    .unwrap();

    // An initial evaluation wires the dependency edges a->c and b->c.
    app.with_compute_context(c.node(), |app| {
        a.get(app).unwrap();
        b.get(app).unwrap();
    });

    a.set(&mut app, Value::Int(5)).unwrap();

    println!("c recomputed {} time(s) after a changed", recompute_count.get());
    println!("a depends -> c: {}", app.depends_on(a.node(), c.node()));
}
