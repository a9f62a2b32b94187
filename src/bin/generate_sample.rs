//! Writes synthetic two-column event files (`mass label`) for trying out the
//! viewer: Z → ee/μμ, H → γγ and four-lepton events. Every four-lepton
//! marker row is followed by its two dilepton pair masses, which the
//! viewer drops at load time.

use std::fmt::Write as _;

/// splitmix64 stream; enough for reproducible sample files.
struct EventRng(u64);

impl EventRng {
    fn uniform(&mut self) -> f64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        (z ^ (z >> 31)) as f64 / u64::MAX as f64
    }

    /// Normal deviate (Marsaglia polar method).
    fn normal(&mut self, mean: f64, sigma: f64) -> f64 {
        loop {
            let u = 2.0 * self.uniform() - 1.0;
            let v = 2.0 * self.uniform() - 1.0;
            let s = u * u + v * v;
            if s > 0.0 && s < 1.0 {
                return mean + sigma * u * (-2.0 * s.ln() / s).sqrt();
            }
        }
    }

    /// Falling exponential continuum above `start`.
    fn tail(&mut self, start: f64, slope: f64) -> f64 {
        start - slope * (1.0 - self.uniform()).max(f64::MIN_POSITIVE).ln()
    }
}

/// `(label, peak mass, width, weight)` of the signal components.
const SIGNALS: &[(&str, f64, f64, f64)] = &[
    ("e", 91.19, 2.5, 0.35),
    ("m", 91.19, 2.5, 0.35),
    ("g", 125.1, 1.7, 0.1),
];

/// Four-lepton markers and the labels of their two pair rows.
const FOUR_LEPTON: &[(&str, &str, &str)] = &[
    ("4ee", "e", "e"),
    ("4mm", "m", "m"),
    ("4em", "e", "m"),
];

fn write_event(out: &mut String, rng: &mut EventRng) {
    let pick = rng.uniform();
    let mut acc = 0.0;
    for &(label, peak, width, weight) in SIGNALS {
        acc += weight;
        if pick < acc {
            let mass = if rng.uniform() < 0.8 {
                rng.normal(peak, width)
            } else {
                rng.tail(60.0, 40.0)
            };
            let _ = writeln!(out, "{mass:.3} {label}");
            return;
        }
    }

    let idx = ((rng.uniform() * FOUR_LEPTON.len() as f64) as usize).min(FOUR_LEPTON.len() - 1);
    let (marker, first, second) = FOUR_LEPTON[idx];
    let m4l = if rng.uniform() < 0.5 {
        rng.normal(125.1, 2.0)
    } else {
        rng.tail(180.0, 80.0)
    };
    let z1 = rng.normal(91.19, 3.0).min(m4l - 12.0);
    let z2 = (m4l - z1).max(12.0);
    let _ = writeln!(out, "{m4l:.3} {marker}");
    let _ = writeln!(out, "{z1:.3} {first}");
    let _ = writeln!(out, "{z2:.3} {second}");
}

fn main() {
    let mut rng = EventRng(42);
    let runs = [("sample_run_A.txt", 800), ("sample_run_B.txt", 1500), ("sample_run_C.txt", 400)];

    for (file_name, n_events) in runs {
        let mut out = String::new();
        for _ in 0..n_events {
            write_event(&mut out, &mut rng);
        }
        std::fs::write(file_name, &out).expect("Failed to write sample file");
        println!("Wrote {n_events} events to {file_name}");
    }
}
