//! Writes a synthetic `HousingData.csv` with the real column schema, including
//! `NA` cells in the columns that have gaps in the published dataset.

use anyhow::{Context, Result};

const HEADER: [&str; 14] = [
    "CRIM", "ZN", "INDUS", "CHAS", "NOX", "RM", "AGE", "DIS", "RAD", "TAX", "PTRATIO", "B",
    "LSTAT", "MEDV",
];

/// Columns that may contain `NA`, by header index.
const GAPPY: [usize; 6] = [0, 1, 2, 3, 6, 12];
const NA_RATE: f64 = 0.04;
const ROWS: usize = 506;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn pick<T: Copy>(&mut self, items: &[T]) -> T {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// One synthetic neighbourhood. Price rises with rooms and falls with
/// lower-status share, crime and pupil-teacher ratio.
fn generate_row(rng: &mut SimpleRng) -> [f64; 14] {
    let rm = rng.gauss(6.28, 0.7).clamp(3.56, 8.78);
    let crim = (-rng.next_f64().max(1e-9).ln() * 3.6).min(89.0);
    let zn = if rng.next_f64() < 0.7 { 0.0 } else { rng.pick(&[12.5, 20.0, 25.0, 40.0, 80.0]) };
    let indus = rng.gauss(11.1, 6.8).clamp(0.46, 27.74);
    let chas = if rng.next_f64() < 0.07 { 1.0 } else { 0.0 };
    let nox = (0.38 + indus * 0.012 + rng.gauss(0.0, 0.05)).clamp(0.385, 0.871);
    let age = rng.gauss(68.6, 28.0).clamp(2.9, 100.0);
    let dis = (12.0 - age * 0.09 + rng.gauss(0.0, 1.2)).clamp(1.13, 12.13);
    let rad = rng.pick(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 24.0]);
    let tax = if rad == 24.0 { 666.0 } else { rng.pick(&[188.0, 224.0, 264.0, 296.0, 307.0, 330.0, 384.0, 403.0]) };
    let ptratio = rng.pick(&[14.7, 15.2, 16.6, 17.8, 18.4, 19.2, 20.2, 21.0]);
    let b = (396.9 - rng.next_f64().powi(6) * 390.0).max(0.32);
    let lstat = (38.0 - 4.2 * rm + rng.gauss(0.0, 4.0)).clamp(1.73, 37.97);
    let medv = (-2.0 + 6.5 * rm - 0.55 * lstat - 0.1 * crim - 0.6 * (ptratio - 18.0)
        + 3.0 * chas
        + rng.gauss(0.0, 3.0))
    .clamp(5.0, 50.0);

    [crim, zn, indus, chas, nox, rm, age, dis, rad, tax, ptratio, b, lstat, medv]
}

fn format_cell(value: f64, column: usize) -> String {
    match column {
        // Integer-valued columns
        1 | 3 | 8 | 9 => format!("{value:.0}"),
        0 | 4 => format!("{value:.5}"),
        _ => format!("{value:.3}"),
    }
}

fn main() -> Result<()> {
    let output_path = std::env::args().nth(1).unwrap_or_else(|| "HousingData.csv".to_string());
    let mut rng = SimpleRng::new(42);

    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {output_path}"))?;
    writer.write_record(HEADER)?;

    let mut incomplete = 0usize;
    for _ in 0..ROWS {
        let row = generate_row(&mut rng);
        let mut has_na = false;
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(col, &value)| {
                if GAPPY.contains(&col) && rng.next_f64() < NA_RATE {
                    has_na = true;
                    "NA".to_string()
                } else {
                    format_cell(value, col)
                }
            })
            .collect();
        incomplete += usize::from(has_na);
        writer.write_record(&cells)?;
    }
    writer.flush().with_context(|| format!("writing {output_path}"))?;

    println!("Wrote {ROWS} rows ({incomplete} with NA cells) to {output_path}");
    Ok(())
}
