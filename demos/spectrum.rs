//! Host-style walkthrough: stage samples, transform, read magnitudes.
//!
//! ```bash
//! cargo run --example spectrum
//! ```

use vizfft::{Complex64, Direction, FftEngine};

fn main() {
    let n = 64;
    let mut engine = FftEngine::<f64>::new();
    engine
        .initialize(n, Direction::Forward)
        .expect("64 is a power of two");

    // A 4-cycle cosine plus a weaker 11-cycle sine.
    {
        let mut input = engine.input_mut();
        for i in 0..n {
            let t = i as f64 / n as f64;
            let sample = (2.0 * std::f64::consts::PI * 4.0 * t).cos()
                + 0.25 * (2.0 * std::f64::consts::PI * 11.0 * t).sin();
            input[i] = Complex64::new(sample, 0.0);
        }
    }

    engine.execute();

    println!("bins with significant energy (forward transform, 1/N scaled):");
    for (k, bin) in engine.output().iter().enumerate() {
        let mag = (bin.re * bin.re + bin.im * bin.im).sqrt();
        if mag > 1e-9 {
            println!("  bin {k:>2}: magnitude {mag:.4}");
        }
    }
}
