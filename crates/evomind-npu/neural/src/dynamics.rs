// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Neural Dynamics
//!
//! Scalar building blocks of the per-tick update:
//!
//! ```text
//! Leaky-integrator voltage update:
//!     v(t+1) = v(t) + (-v(t) + I) * (tick_period / time_constant)
//!
//!     Where:
//!     - v = persistent integrator voltage
//!     - I = weighted input sum for this tick
//!
//! The result is clamped to [-VOLTAGE_LIMIT, VOLTAGE_LIMIT] so an evolved
//! genome with a degenerate time constant cannot diverge to infinity.
//! ```
//!
//! Non-finite intermediates are a recoverable condition: a long-running
//! evolutionary process must tolerate occasional numeric blow-ups in
//! individual genomes without crashing the population, so [`sanitize`]
//! substitutes 0 and logs a warning instead of failing the tick.

use tracing::warn;

/// Clamp bound for integrator voltages.
pub const VOLTAGE_LIMIT: f32 = 1.0e6;

/// Replace a non-finite value with 0, reporting a non-fatal numeric warning.
#[inline]
pub fn sanitize(value: f32, stage: &str) -> f32 {
    if value.is_finite() {
        value
    } else {
        warn!("non-finite {} value replaced with 0", stage);
        0.0
    }
}

/// Advance a leaky-integrator voltage by one tick.
///
/// A non-positive or degenerate time constant produces a non-finite step,
/// which is sanitized to 0 like any other numeric blow-up.
#[inline(always)]
pub fn integrate_voltage(voltage: f32, input_sum: f32, tick_period: f32, time_constant: f32) -> f32 {
    let next = voltage + (-voltage + input_sum) * (tick_period / time_constant);
    sanitize(next, "integrator voltage").clamp(-VOLTAGE_LIMIT, VOLTAGE_LIMIT)
}
