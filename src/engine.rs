//! The transform engine: buffer ownership, initialization, and the
//! in-place Danielson-Lanczos butterfly passes.
//!
//! The engine owns a single backing buffer stored in butterfly
//! (bit-reversed) order. The natural-order input view and the
//! butterfly-order output view are two index mappings over that one
//! buffer, so writing a sample through the input view is immediately
//! visible to the butterfly passes without a separate permute/copy step.

use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;

use crate::bitrev;
use crate::num::{Complex, Float};
use crate::plan::{TwiddlePlanner, TwiddleStage};

/// Transform direction, expressed as the sign of the rotation angle.
///
/// `Forward` rotates by `-2*pi` (the DFT), `Inverse` by `+2*pi`. Only the
/// forward transform is normalized; see [`FftEngine::execute`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Inverse,
}

impl Direction {
    /// Full-circle rotation angle with this direction's sign.
    pub(crate) fn angle<T: Float>(self) -> T {
        let two_pi = T::from_f32(2.0) * T::pi();
        match self {
            Direction::Forward => -two_pi,
            Direction::Inverse => two_pi,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FftError {
    /// Requested transform size is not a power of two, or is less than 2.
    InvalidSize,
    /// A bulk load/store was given a slice of the wrong length.
    MismatchedLengths,
}

impl core::fmt::Display for FftError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FftError::InvalidSize => write!(f, "transform size must be a power of two >= 2"),
            FftError::MismatchedLengths => write!(f, "slice length does not match transform size"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FftError {}

/// Read-only natural-order view over the engine's buffer.
pub struct InputView<'a, T: Float> {
    data: &'a [Complex<T>],
    perm: &'a [usize],
}

impl<'a, T: Float> InputView<'a, T> {
    pub fn len(&self) -> usize {
        self.perm.len()
    }
    pub fn is_empty(&self) -> bool {
        self.perm.is_empty()
    }
    pub fn get(&self, index: usize) -> Option<Complex<T>> {
        self.perm.get(index).map(|&slot| self.data[slot])
    }
    /// Iterate the samples in natural order.
    pub fn iter(&self) -> impl Iterator<Item = &Complex<T>> + '_ {
        self.perm.iter().map(move |&slot| &self.data[slot])
    }
    /// Collect the samples into a natural-order vector.
    pub fn to_vec(&self) -> Vec<Complex<T>> {
        self.iter().copied().collect()
    }
}

impl<'a, T: Float> core::ops::Index<usize> for InputView<'a, T> {
    type Output = Complex<T>;
    fn index(&self, index: usize) -> &Complex<T> {
        &self.data[self.perm[index]]
    }
}

/// Mutable natural-order view over the engine's buffer.
///
/// Writing `view[i]` stores through the bit-reversal permutation, so the
/// sample lands in the slot the butterfly passes will consume it from.
pub struct InputViewMut<'a, T: Float> {
    data: &'a mut [Complex<T>],
    perm: &'a [usize],
}

impl<'a, T: Float> InputViewMut<'a, T> {
    pub fn len(&self) -> usize {
        self.perm.len()
    }
    pub fn is_empty(&self) -> bool {
        self.perm.is_empty()
    }
    /// Overwrite every sample with zero.
    pub fn clear(&mut self) {
        for slot in self.data.iter_mut() {
            *slot = Complex::zero();
        }
    }
}

impl<'a, T: Float> core::ops::Index<usize> for InputViewMut<'a, T> {
    type Output = Complex<T>;
    fn index(&self, index: usize) -> &Complex<T> {
        &self.data[self.perm[index]]
    }
}

impl<'a, T: Float> core::ops::IndexMut<usize> for InputViewMut<'a, T> {
    fn index_mut(&mut self, index: usize) -> &mut Complex<T> {
        &mut self.data[self.perm[index]]
    }
}

/// In-place, power-of-two, iterative Cooley-Tukey FFT engine.
///
/// A host configures the engine once per size/direction, writes samples
/// through [`input_mut`](Self::input_mut) (natural order), calls
/// [`execute`](Self::execute), and reads results from
/// [`output`](Self::output). The engine is single-threaded and
/// synchronous; use one instance per thread for concurrent transforms.
pub struct FftEngine<T: Float> {
    size: usize,
    valid: bool,
    direction: Direction,
    scale: T,
    stages: Arc<[TwiddleStage<T>]>,
    perm: Vec<usize>,
    data: Vec<Complex<T>>,
    planner: TwiddlePlanner<T>,
}

impl<T: Float> Default for FftEngine<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> FftEngine<T> {
    /// Create an uninitialized engine (`size() == 0`, `is_valid() == false`).
    pub fn new() -> Self {
        Self {
            size: 0,
            valid: false,
            direction: Direction::Forward,
            scale: T::one(),
            stages: Vec::new().into(),
            perm: Vec::new(),
            data: Vec::new(),
            planner: TwiddlePlanner::new(),
        }
    }

    /// Configure the engine for a transform of `n` points.
    ///
    /// `n` must be a power of two and at least 2; anything else returns
    /// [`FftError::InvalidSize`] and marks the engine invalid while leaving
    /// its previous buffers untouched. Calling with the size the engine
    /// already holds (while valid) is a no-op that preserves buffer
    /// contents. A different valid size rebuilds the permutation and plan
    /// and resets the buffer to zero.
    pub fn initialize(&mut self, n: usize, direction: Direction) -> Result<(), FftError> {
        if self.valid && n == self.size {
            return Ok(());
        }
        if n < 2 || !n.is_power_of_two() {
            self.valid = false;
            return Err(FftError::InvalidSize);
        }
        let stages = match self.planner.stages_for(n, direction) {
            Ok(stages) => stages,
            Err(err) => {
                self.valid = false;
                return Err(err);
            }
        };
        let scale = match T::from_usize(n) {
            Some(len) => T::one() / len,
            None => {
                self.valid = false;
                return Err(FftError::InvalidSize);
            }
        };
        self.perm = bitrev::permutation(n);
        self.data = vec![Complex::zero(); n];
        self.stages = stages;
        self.scale = scale;
        self.direction = direction;
        self.size = n;
        self.valid = true;
        #[cfg(feature = "verbose-logging")]
        log::debug!(
            "fft engine initialized: n={} direction={:?} stages={}",
            n,
            direction,
            self.stages.len()
        );
        Ok(())
    }

    /// Whether the last `initialize` succeeded.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Currently held transform size (0 if never successfully initialized).
    pub fn size(&self) -> usize {
        self.size
    }

    /// Direction the current plan was built for.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Natural-order view of the buffer.
    pub fn input(&self) -> InputView<'_, T> {
        InputView {
            data: &self.data,
            perm: &self.perm,
        }
    }

    /// Mutable natural-order view of the buffer. Hosts write their samples
    /// through this before calling [`execute`](Self::execute).
    pub fn input_mut(&mut self) -> InputViewMut<'_, T> {
        InputViewMut {
            data: &mut self.data,
            perm: &self.perm,
        }
    }

    /// The backing buffer itself, in butterfly order.
    ///
    /// Before `execute` this aliases the input view: slot `i` holds the
    /// sample written at natural index `bit_reverse(i, size)`. After
    /// `execute` it holds the transform in natural bin order (the aliasing
    /// performs the reorder pass of the iterative FFT).
    pub fn output(&self) -> &[Complex<T>] {
        &self.data
    }

    /// Mutable access to the backing buffer.
    pub fn output_mut(&mut self) -> &mut [Complex<T>] {
        &mut self.data
    }

    /// Bulk write of natural-order samples into the buffer.
    pub fn load_input(&mut self, samples: &[Complex<T>]) -> Result<(), FftError> {
        if samples.len() != self.data.len() {
            return Err(FftError::MismatchedLengths);
        }
        for (i, &sample) in samples.iter().enumerate() {
            self.data[self.perm[i]] = sample;
        }
        Ok(())
    }

    /// Bulk read of the buffer (post-`execute`: natural bin order).
    pub fn copy_output(&self, out: &mut [Complex<T>]) -> Result<(), FftError> {
        if out.len() != self.data.len() {
            return Err(FftError::MismatchedLengths);
        }
        out.copy_from_slice(&self.data);
        Ok(())
    }

    /// Run the transform in place over the precomputed plan.
    ///
    /// A no-op when the engine is invalid or holds no buffer. Each stage
    /// resets the running twiddle to `(1, 0)` and advances it by the
    /// stage's half-angle recurrence after every butterfly group. After
    /// the last stage the buffer is scaled by `1/size` for `Forward`
    /// transforms only; the inverse is left unnormalized and callers must
    /// account for that.
    pub fn execute(&mut self) {
        if !self.valid || self.data.is_empty() {
            return;
        }
        #[cfg(feature = "verbose-logging")]
        log::debug!(
            "executing {:?} transform: n={} stages={}",
            self.direction,
            self.size,
            self.stages.len()
        );
        let stages = Arc::clone(&self.stages);
        for stage in stages.iter() {
            let mut w_re = T::one();
            let mut w_im = T::zero();
            for m in 0..stage.half_width {
                let mut i = m;
                while i < self.size {
                    let j = i + stage.half_width;
                    let a = self.data[j];
                    let b = self.data[i];
                    let t = Complex::new(
                        w_re * a.re - w_im * a.im,
                        w_re * a.im + w_im * a.re,
                    );
                    self.data[j] = b.sub(t);
                    self.data[i] = b.add(t);
                    i += stage.stride;
                }
                let tmp = w_re;
                w_re = tmp * stage.step_re - w_im * stage.step_im + tmp;
                w_im = w_im * stage.step_re + tmp * stage.step_im + w_im;
            }
        }
        if self.direction == Direction::Forward {
            for slot in self.data.iter_mut() {
                *slot = slot.scale(self.scale);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitrev::bit_reverse;
    use crate::num::Complex64;

    #[test]
    fn new_engine_is_uninitialized() {
        let engine = FftEngine::<f64>::new();
        assert!(!engine.is_valid());
        assert_eq!(engine.size(), 0);
        assert!(engine.output().is_empty());
    }

    #[test]
    fn input_and_output_views_alias() {
        let mut engine = FftEngine::<f64>::new();
        engine.initialize(16, Direction::Forward).unwrap();
        {
            let mut input = engine.input_mut();
            for i in 0..16 {
                input[i] = Complex64::new(i as f64, -(i as f64));
            }
        }
        // Every natural-order write must be visible through the
        // butterfly-order handle at the bit-reversed slot.
        for i in 0..16 {
            let slot = bit_reverse(i, 16);
            assert_eq!(engine.output()[slot], Complex64::new(i as f64, -(i as f64)));
            assert_eq!(engine.input()[i], engine.output()[slot]);
        }
    }

    #[test]
    fn load_input_routes_through_permutation() {
        let mut engine = FftEngine::<f64>::new();
        engine.initialize(8, Direction::Forward).unwrap();
        let samples: Vec<Complex64> = (0..8).map(|i| Complex64::new(i as f64, 0.0)).collect();
        engine.load_input(&samples).unwrap();
        for i in 0..8 {
            assert_eq!(engine.input()[i], samples[i]);
        }
        assert_eq!(
            engine.load_input(&samples[..4]).unwrap_err(),
            FftError::MismatchedLengths
        );
    }

    #[test]
    fn execute_on_invalid_engine_is_a_noop() {
        let mut engine = FftEngine::<f64>::new();
        engine.execute();
        assert!(!engine.is_valid());

        engine.initialize(4, Direction::Forward).unwrap();
        engine.input_mut()[0] = Complex64::new(1.0, 0.0);
        let before = engine.output().to_vec();
        assert!(engine.initialize(6, Direction::Forward).is_err());
        assert!(!engine.is_valid());
        engine.execute();
        assert_eq!(engine.output(), before.as_slice());
    }

    #[test]
    fn reinitialize_same_size_preserves_contents() {
        let mut engine = FftEngine::<f64>::new();
        engine.initialize(8, Direction::Forward).unwrap();
        engine.input_mut()[3] = Complex64::new(7.0, -1.0);
        engine.initialize(8, Direction::Forward).unwrap();
        assert_eq!(engine.input()[3], Complex64::new(7.0, -1.0));
    }

    #[test]
    fn reinitialize_new_size_resets_contents() {
        let mut engine = FftEngine::<f64>::new();
        engine.initialize(8, Direction::Forward).unwrap();
        engine.input_mut()[3] = Complex64::new(7.0, -1.0);
        engine.initialize(16, Direction::Forward).unwrap();
        assert_eq!(engine.size(), 16);
        assert!(engine.output().iter().all(|c| *c == Complex64::zero()));
    }

    #[test]
    fn failed_initialize_retains_previous_size() {
        let mut engine = FftEngine::<f64>::new();
        assert_eq!(
            engine.initialize(3, Direction::Forward).unwrap_err(),
            FftError::InvalidSize
        );
        assert_eq!(engine.size(), 0);

        engine.initialize(32, Direction::Forward).unwrap();
        assert!(engine.initialize(0, Direction::Forward).is_err());
        assert_eq!(engine.size(), 32);
        assert!(!engine.is_valid());

        // A later valid initialize revives the engine.
        engine.initialize(32, Direction::Forward).unwrap();
        assert!(engine.is_valid());
    }

    #[cfg(feature = "internal-tests")]
    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_forward_inverse_roundtrip(
                k in 1usize..9,
                ref signal in proptest::collection::vec(-1000.0f64..1000.0, 512),
            ) {
                let n = 1usize << k;
                let samples: Vec<Complex64> = signal
                    .iter()
                    .take(n)
                    .map(|&x| Complex64::new(x, -x))
                    .collect();

                let mut forward = FftEngine::<f64>::new();
                forward.initialize(n, Direction::Forward).unwrap();
                forward.load_input(&samples).unwrap();
                forward.execute();
                let spectrum = forward.output().to_vec();

                let mut inverse = FftEngine::<f64>::new();
                inverse.initialize(n, Direction::Inverse).unwrap();
                inverse.load_input(&spectrum).unwrap();
                inverse.execute();

                for (got, want) in inverse.output().iter().zip(samples.iter()) {
                    prop_assert!((got.re - want.re).abs() < 1e-6);
                    prop_assert!((got.im - want.im).abs() < 1e-6);
                }
            }
        }
    }
}
