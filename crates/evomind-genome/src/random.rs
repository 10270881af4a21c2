// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Random draw helpers for the evolution operators.

use rand::Rng;

/// Draw from a zero-mean Gaussian with the given standard deviation using
/// the Box–Muller transform.
pub(crate) fn gaussian(rng: &mut impl Rng, std_dev: f32) -> f32 {
    // u1 is kept away from 0 so ln() stays finite.
    let u1: f32 = rng.gen_range(f32::EPSILON..1.0);
    let u2: f32 = rng.gen();
    (-2.0 * u1.ln()).sqrt() * (core::f32::consts::TAU * u2).cos() * std_dev
}
