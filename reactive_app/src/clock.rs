// Copyright 2026 the Reactive Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `App`'s clock is a fixed enum rather than a second generic parameter: a manually-advanced
//! clock always works (including `no_std`), and a wall-clock variant is added once `std` is
//! available.

use reactive_scheduler::Clock as ClockTrait;
use reactive_scheduler::ManualClock;
#[cfg(feature = "std")]
use reactive_scheduler::SystemClock;

/// The clock an [`crate::App`] drains against.
pub enum AppClock {
    /// A manually-advanced clock; the host calls `advance`/`set` itself.
    Manual(ManualClock),
    /// A wall-clock backed by `std::time::Instant`.
    #[cfg(feature = "std")]
    System(SystemClock),
}

impl AppClock {
    #[must_use]
    pub fn manual() -> Self {
        Self::Manual(ManualClock::new())
    }

    #[cfg(feature = "std")]
    #[must_use]
    pub fn system() -> Self {
        Self::System(SystemClock::new())
    }

    /// Advances a [`Self::Manual`] clock; a no-op on [`Self::System`].
    pub fn advance(&mut self, millis: u64) {
        if let Self::Manual(c) = self {
            c.advance(millis);
        }
    }
}

impl ClockTrait for AppClock {
    fn now_ms(&self) -> u64 {
        match self {
            Self::Manual(c) => c.now_ms(),
            #[cfg(feature = "std")]
            Self::System(c) => c.now_ms(),
        }
    }
}

impl Default for AppClock {
    fn default() -> Self {
        Self::manual()
    }
}
