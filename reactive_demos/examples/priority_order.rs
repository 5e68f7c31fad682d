// Copyright 2026 the Reactive Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Builds a small dependency fan-out and shows that a single drain visits nodes in
//! depth-ascending, weight-descending order within each depth.

use std::cell::RefCell;
use std::rc::Rc;

use reactive_app::{App, AppOptions, Executor, PhaseDef, TraversalPolicy, Value};
use reactive_scheduler::SchedulerPolicy;

fn main() {
    let mut app: App = App::new(AppOptions {
        scheduler_policy: SchedulerPolicy::Sync,
        ..AppOptions::default()
    });

    let a = app.add_node(0, Some("cell"));
    let b = app.add_node(5, Some("cell"));
    let c = app.add_node(3, Some("cell"));
    let d = app.add_node(10, Some("cell"));
    let e = app.add_node(1, Some("cell"));

    app.connect(a, b);
    app.connect(b, c);
    app.connect(a, d);
    app.connect(a, e);

    for node in [a, b, c, d, e] {
        app.track(node, "*").unwrap();
    }

    let order = Rc::new(RefCell::new(Vec::new()));
    let order_c = Rc::clone(&order);
    app.define_phases(vec![PhaseDef {
        name: Box::from("report"),
        id: reactive_scheduler::PhaseId::new(0),
        traversal: TraversalPolicy::DirtyOnly,
        masks: vec![Box::from("*")],
        filter: None,
        executor: Executor::Each(Box::new(move |ctx| {
            order_c.borrow_mut().push(ctx.node.as_u64());
        })),
    }])
    .unwrap();

    app.set("root", Value::Int(1)).unwrap();

    println!("drain order: {:?}", order.borrow());
}
