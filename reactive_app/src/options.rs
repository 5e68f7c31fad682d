// Copyright 2026 the Reactive Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction-time app configuration.

use reactive_data::AdapterOptions;
use reactive_scheduler::SchedulerPolicy;

/// Construction-time policy for an [`crate::App`].
#[derive(Clone, Copy, Debug)]
pub struct AppOptions {
    /// Drains per second the throttle allows.
    pub max_ups: u32,
    /// When a pending drain is actually run.
    pub scheduler_policy: SchedulerPolicy,
    /// Whether telemetry events/metrics are recorded.
    pub debug: bool,
    /// The data adapter's own construction-time policy.
    pub adapter: AdapterOptions,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            max_ups: 120,
            scheduler_policy: SchedulerPolicy::default(),
            debug: false,
            adapter: AdapterOptions::default(),
        }
    }
}
