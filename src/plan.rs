//! Per-stage twiddle precomputation and the plan cache.
//!
//! Each butterfly stage carries the two half-angle recurrence coefficients
//! that let the running twiddle factor be advanced by multiply-adds instead
//! of a fresh trig evaluation per butterfly. A [`TwiddlePlanner`] caches
//! built stage lists by `(size, direction)` so re-initializing an engine to
//! a previously seen size reuses the plan.

use alloc::sync::Arc;
use alloc::vec::Vec;
use hashbrown::HashMap;

use crate::engine::{Direction, FftError};
use crate::num::Float;

/// Precomputed coefficients for one butterfly stage.
///
/// Stages are ordered from `half_width == 1` up to `half_width == size / 2`,
/// one per power-of-two level, and are immutable once built. With the stage
/// angle `theta = angle / stride`, the coefficients are
/// `step_re = -2 * sin^2(theta / 2)` and `step_im = sin(theta)`; advancing
/// the running twiddle `(w_re, w_im)` by
///
/// ```text
/// w_re' = w_re * step_re - w_im * step_im + w_re
/// w_im' = w_im * step_re + w_re * step_im + w_im
/// ```
///
/// rotates it by `theta` exactly (up to the recurrence's accumulated
/// rounding, which stays within visualization-grade tolerance per stage).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TwiddleStage<T: Float> {
    /// Distance between the two butterfly operands (`imax`).
    pub half_width: usize,
    /// Distance between consecutive butterflies of one group (`2 * half_width`).
    pub stride: usize,
    /// Real recurrence coefficient (`wpr`).
    pub step_re: T,
    /// Imaginary recurrence coefficient (`wpi`).
    pub step_im: T,
}

impl<T: Float> TwiddleStage<T> {
    fn new(half_width: usize, angle: T) -> Option<Self> {
        let stride = half_width << 1;
        let theta = angle / T::from_usize(stride)?;
        let half_sin = (theta * T::from_f32(0.5)).sin();
        Some(Self {
            half_width,
            stride,
            step_re: -(T::from_f32(2.0) * half_sin * half_sin),
            step_im: theta.sin(),
        })
    }
}

/// Build the ordered stage list for a transform of `size` points.
///
/// Returns exactly `log2(size)` stages, smallest stride first. Fails with
/// [`FftError::InvalidSize`] when `size` is less than 2 or not a power of
/// two, or when `size` exceeds what the float type can represent exactly.
pub fn build_stages<T: Float>(
    size: usize,
    direction: Direction,
) -> Result<Arc<[TwiddleStage<T>]>, FftError> {
    if size < 2 || !size.is_power_of_two() {
        return Err(FftError::InvalidSize);
    }
    let angle = direction.angle::<T>();
    let mut stages = Vec::with_capacity(size.trailing_zeros() as usize);
    let mut half_width = 1;
    while half_width < size {
        let stage = TwiddleStage::new(half_width, angle).ok_or(FftError::InvalidSize)?;
        half_width = stage.stride;
        stages.push(stage);
    }
    Ok(stages.into())
}

/// Cache of built stage lists, keyed by `(size, direction)`.
///
/// Stage lists are shared out as `Arc<[TwiddleStage]>` clones; repeated
/// requests for the same key hand back the same allocation.
pub struct TwiddlePlanner<T: Float> {
    cache: HashMap<(usize, Direction), Arc<[TwiddleStage<T>]>>,
}

impl<T: Float> Default for TwiddlePlanner<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> TwiddlePlanner<T> {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
        }
    }

    /// Look up or build the stage list for `(size, direction)`.
    pub fn stages_for(
        &mut self,
        size: usize,
        direction: Direction,
    ) -> Result<Arc<[TwiddleStage<T>]>, FftError> {
        if let Some(stages) = self.cache.get(&(size, direction)) {
            return Ok(Arc::clone(stages));
        }
        let stages = build_stages(size, direction)?;
        self.cache.insert((size, direction), Arc::clone(&stages));
        Ok(stages)
    }

    /// Number of distinct plans currently cached.
    pub fn cached_plans(&self) -> usize {
        self.cache.len()
    }
}
