use anyhow::{Context, Result};
use serde::Serialize;

/// One segmented cell, in the column layout of a COMET export.
#[derive(Serialize)]
struct CellRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Image")]
    image: String,
    #[serde(rename = "Study level")]
    study_level: &'static str,
    #[serde(rename = "X")]
    x: f64,
    #[serde(rename = "Y")]
    y: f64,
    #[serde(rename = "Area (um2)")]
    area: f64,
    #[serde(rename = "Distance to Tumor")]
    distance: f64,
    #[serde(rename = "CD3")]
    cd3: f64,
    #[serde(rename = "CD8")]
    cd8: Option<f64>,
    #[serde(rename = "Ki67")]
    ki67: f64,
    #[serde(rename = "Phenotype")]
    phenotype: &'static str,
    #[serde(rename = "Region")]
    region: &'static str,
}

/// Minimal deterministic PRNG (xoshiro256**), the same generator the spectral
/// sample tool used, so sample files stay reproducible without a `rand` dependency.
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

/// Phenotype, cluster centre and mean CD3/CD8 intensity.
const POPULATIONS: [(&str, (f64, f64), f64, f64); 4] = [
    ("T helper", (300.0, 300.0), 80.0, 5.0),
    ("T cytotoxic", (700.0, 350.0), 75.0, 60.0),
    ("B cell", (450.0, 750.0), 8.0, 3.0),
    ("Tumor", (800.0, 800.0), 2.0, 1.0),
];

const TUMOR_CENTRE: (f64, f64) = (800.0, 800.0);

fn main() -> Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_data.tsv".to_string());
    let mut rng = SimpleRng::new(42);

    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_path(&output_path)
        .with_context(|| format!("creating {output_path}"))?;

    let mut n_rows = 0usize;
    for (phenotype, (cx, cy), cd3_mean, cd8_mean) in POPULATIONS {
        for _ in 0..500 {
            let x = rng.gauss(cx, 120.0).clamp(0.0, 1000.0);
            let y = rng.gauss(cy, 120.0).clamp(0.0, 1000.0);
            let distance = ((x - TUMOR_CENTRE.0).powi(2) + (y - TUMOR_CENTRE.1).powi(2)).sqrt();

            // A few saturated cells give the colour scale outliers to clip.
            let mut cd3 = rng.gauss(cd3_mean, cd3_mean * 0.2).max(0.0);
            if rng.next_f64() < 0.01 {
                cd3 *= 20.0;
            }
            // CD8 was not stained on every image.
            let cd8 = (rng.next_f64() > 0.05).then(|| rng.gauss(cd8_mean, cd8_mean * 0.25).max(0.0));

            let row = CellRow {
                name: format!("cell_{n_rows:05}"),
                image: format!("slide_{}.tif", n_rows % 3 + 1),
                study_level: "Cohort A",
                x,
                y,
                area: rng.gauss(60.0, 12.0).max(5.0),
                distance,
                cd3,
                cd8,
                ki67: rng.next_f64() * 100.0,
                phenotype,
                region: if distance < 250.0 { "Tumor core" } else { "Stroma" },
            };
            writer.serialize(&row).context("writing row")?;
            n_rows += 1;
        }
    }

    writer.flush().context("flushing output")?;
    println!("Wrote {n_rows} cells to {output_path}");
    Ok(())
}
