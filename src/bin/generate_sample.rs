use std::path::Path;

use anyhow::{Context, Result};
use csv::WriterBuilder;

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
}

/// Rows of `time, sine, cosine, noisy, <blank header>` with a few
/// non-numeric cells sprinkled into the noisy column.
fn sample_rows(n: usize, rng: &mut SimpleRng) -> Vec<[String; 5]> {
    (0..n)
        .map(|i| {
            let t = i as f64 * 0.05;
            let noisy = if i % 37 == 11 {
                "n/a".to_string()
            } else {
                format!("{:.4}", t.sin() + rng.gauss(0.0, 0.1))
            };
            [
                format!("{t:.2}"),
                format!("{:.4}", t.sin()),
                format!("{:.4}", t.cos()),
                noisy,
                format!("{:.4}", (t * 0.5).sin() * 2.0),
            ]
        })
        .collect()
}

const HEADER: [&str; 5] = ["time", "sine", "cosine", "noisy", ""];

fn write_table(path: &Path, delimiter: u8, rows: &[[String; 5]]) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    writer.write_record(HEADER)?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush().with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// A comma file with blank lines and occasional trailing marker fields, so
/// the comma count is not stable and sniffing falls back to the extension.
fn write_messy(path: &Path, rows: &[[String; 5]]) -> Result<()> {
    let mut text = String::from("\ntime,sine\n\n");
    for (i, row) in rows.iter().enumerate() {
        text.push_str(&format!("{},{}", row[0], row[1]));
        if i % 7 == 3 {
            text.push_str(",marker");
        }
        text.push('\n');
    }
    std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let rows = sample_rows(400, &mut rng);

    let outputs = [
        ("sample_data.csv", b','),
        ("sample_data.txt", b'\t'),
    ];
    for (name, delimiter) in outputs {
        write_table(Path::new(name), delimiter, &rows)?;
        println!("Wrote {} rows to {name}", rows.len());
    }

    write_messy(Path::new("sample_messy.csv"), &rows)?;
    println!("Wrote {} rows to sample_messy.csv", rows.len());

    Ok(())
}
