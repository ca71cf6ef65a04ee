//! Demonstrates enabling verbose logging for vizfft.
//!
//! ```bash
//! cargo run --example verbose_logging --features verbose-logging
//! ```

use vizfft::{Complex64, Direction, FftEngine};

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .init();

    let mut engine = FftEngine::<f64>::new();
    engine
        .initialize(16, Direction::Forward)
        .expect("16 is a power of two");
    engine.input_mut()[0] = Complex64::new(1.0, 0.0);
    engine.execute();

    println!("dc bin: {:?}", engine.output()[0]);
}
