// Copyright 2026 the Reactive Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Builds a small array of rows addressed by index, then again by `[id=...]` parameter lookup,
//! and shows a watch firing when a specific row's field changes.

use std::cell::RefCell;
use std::rc::Rc;

use reactive_app::reactivity::{Watch, watch_phase};
use reactive_app::{App, AppOptions, Value};
use reactive_scheduler::SchedulerPolicy;

fn main() {
    let mut app: App = App::new(AppOptions {
        scheduler_policy: SchedulerPolicy::Sync,
        ..AppOptions::default()
    });

    for i in 0..5 {
        app.set(&format!("rows[{i}].id"), Value::Int(i as i64)).unwrap();
        app.set(&format!("rows[{i}].x"), Value::Int(0)).unwrap();
    }

    let by_index = app.get("rows[2].x").unwrap().cloned();
    println!("rows[2].x before write = {by_index:?}");

    let fired = Rc::new(RefCell::new(Vec::new()));
    let fired_c = Rc::clone(&fired);
    let watch = Watch::new(&mut app, "rows[id=2].*").unwrap();
    app.define_phases(vec![watch_phase(move |ctx| {
        fired_c.borrow_mut().push(ctx.node.as_u64());
    })])
    .unwrap();

    app.set("rows[id=2].x", Value::Int(7)).unwrap();

    let by_param = app.get("rows[id=2].x").unwrap().cloned();
    println!("rows[id=2].x after write = {by_param:?}");
    println!("watch {:?} fired: {}", watch.node(), fired.borrow().contains(&watch.node().as_u64()));
}
