//! # vizfft - in-place power-of-two FFT engine
//!
//! A small, allocation-light Discrete Fourier Transform engine built around
//! the iterative Cooley-Tukey / Danielson-Lanczos algorithm, intended for
//! embedding in visualization and signal-analysis hosts that repeatedly
//! transform buffers of a fixed size.
//!
//! The engine owns one complex buffer and exposes it through two aliased
//! views: a natural-order input view and a butterfly-order output view tied
//! together by the bit-reversal permutation. Writing a sample through the
//! input view places it directly in the slot the butterfly passes consume,
//! so no separate permute step runs at transform time.
//!
//! ```
//! use vizfft::{Complex64, Direction, FftEngine};
//!
//! let mut engine = FftEngine::<f64>::new();
//! engine.initialize(8, Direction::Forward).unwrap();
//! {
//!     let mut input = engine.input_mut();
//!     input[0] = Complex64::new(1.0, 0.0); // unit impulse
//! }
//! engine.execute();
//! // Forward transforms are scaled by 1/size.
//! for bin in engine.output() {
//!     assert!((bin.re - 0.125).abs() < 1e-12);
//! }
//! ```
//!
//! ## Conventions
//!
//! - Transform sizes must be powers of two, at least 2. Anything else is
//!   reported through [`FftError::InvalidSize`] and leaves the engine
//!   disabled until a valid `initialize`.
//! - `Forward` rotates by `-2*pi` and divides the result by the size;
//!   `Inverse` rotates by `+2*pi` and is left unnormalized. Hosts relying
//!   on a symmetric convention must rescale themselves.
//! - Per-stage twiddle factors are advanced by a half-angle recurrence, so
//!   each stage costs two trig calls total rather than two per butterfly.
//!
//! ## Cargo features
//!
//! - `std` (default): standard-library integration (`std::error::Error`).
//!   The crate itself is `no_std` + `alloc` throughout.
//! - `verbose-logging`: emit `log` records from `initialize`/`execute`.
//! - `internal-tests`: enable the property-based test suites.

#![no_std]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod bitrev;
pub mod engine;
pub mod num;
pub mod plan;

pub use bitrev::bit_reverse;
pub use engine::{Direction, FftEngine, FftError, InputView, InputViewMut};
pub use num::{Complex, Complex32, Complex64, Float};
pub use plan::{build_stages, TwiddlePlanner, TwiddleStage};
