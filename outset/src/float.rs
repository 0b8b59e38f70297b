// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Float helpers for `no_std` builds.
//!
//! `f64::sqrt` is not available in `core`. Kurbo covers the vector math (`hypot`, `atan2`,
//! `from_angle`); the few scalar calls left over dispatch to `libm` here.

/// Float math helpers for `f64` in `no_std` mode.
pub(crate) trait FloatExt {
    fn sqrt(self) -> Self;
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
impl FloatExt for f64 {
    fn sqrt(self) -> Self {
        libm::sqrt(self)
    }
}

#[cfg(all(not(feature = "std"), not(feature = "libm")))]
compile_error!("outset requires either the `std` or `libm` feature");
