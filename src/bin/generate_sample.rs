//! Writes a synthetic passenger list with the same columns as the cleaned
//! Titanic dataset, for trying the pipeline without the real file.
//!
//! Usage: `generate_sample [PATH]` (default `Titanic-clean.csv`).

use anyhow::{Context, Result};

const PASSENGERS: usize = 891;

/// SplitMix64 generator; the same seed always yields the same sample.
struct SplitMix64(u64);

impl SplitMix64 {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in `[0, 1)`.
    fn unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Normal draw via the Marsaglia polar method.
    fn normal(&mut self, mean: f64, sd: f64) -> f64 {
        loop {
            let u = 2.0 * self.unit() - 1.0;
            let v = 2.0 * self.unit() - 1.0;
            let s = u * u + v * v;
            if s > 0.0 && s < 1.0 {
                return mean + sd * u * (-2.0 * s.ln() / s).sqrt();
            }
        }
    }

    /// Index into `weights` drawn proportionally to each weight.
    fn weighted(&mut self, weights: &[f64]) -> usize {
        let total: f64 = weights.iter().sum();
        let mut pick = self.unit() * total;
        for (i, w) in weights.iter().enumerate() {
            if pick < *w {
                return i;
            }
            pick -= w;
        }
        weights.len() - 1
    }
}

struct Passenger {
    id: usize,
    survived: u8,
    pclass: u8,
    sex: &'static str,
    age: f64,
    sibsp: u8,
    parch: u8,
    fare: f64,
    embarked: &'static str,
}

impl Passenger {
    fn random(id: usize, rng: &mut SplitMix64) -> Self {
        let pclass = [1, 2, 3][rng.weighted(&[0.24, 0.21, 0.55])];
        let sex = ["male", "female"][rng.weighted(&[0.65, 0.35])];
        let age = (rng.normal(29.7, 14.5).clamp(0.42, 80.0) * 10.0).round() / 10.0;
        let sibsp = rng.weighted(&[0.68, 0.23, 0.03, 0.02, 0.02, 0.02]) as u8;
        let parch = rng.weighted(&[0.76, 0.13, 0.09, 0.01, 0.01]) as u8;
        let fare = match pclass {
            1 => rng.normal(84.0, 40.0).max(5.0),
            2 => rng.normal(20.7, 10.0).max(5.0),
            _ => rng.normal(13.7, 8.0).max(4.0),
        };
        let embarked = ["S", "C", "Q"][rng.weighted(&[0.72, 0.19, 0.09])];

        let mut p_survive: f64 = if sex == "female" { 0.74 } else { 0.19 };
        p_survive += match pclass {
            1 => 0.15,
            2 => 0.02,
            _ => -0.12,
        };
        if age < 13.0 {
            p_survive += 0.2;
        }
        let survived = u8::from(rng.unit() < p_survive.clamp(0.02, 0.98));

        Passenger {
            id,
            survived,
            pclass,
            sex,
            age,
            sibsp,
            parch,
            fare: (fare * 100.0).round() / 100.0,
            embarked,
        }
    }

    fn age_group(&self) -> &'static str {
        match self.age {
            a if a < 13.0 => "child",
            a if a < 20.0 => "teen",
            a if a < 60.0 => "adult",
            _ => "senior",
        }
    }

    fn record(&self) -> Vec<String> {
        let family_size = u32::from(self.sibsp) + u32::from(self.parch) + 1;
        vec![
            self.id.to_string(),
            self.survived.to_string(),
            self.pclass.to_string(),
            self.sex.to_string(),
            format!("{:.1}", self.age),
            self.sibsp.to_string(),
            self.parch.to_string(),
            format!("{:.2}", self.fare),
            self.embarked.to_string(),
            family_size.to_string(),
            self.age_group().to_string(),
        ]
    }
}

fn main() -> Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "Titanic-clean.csv".to_string());
    let mut rng = SplitMix64(1912);

    let mut writer =
        csv::Writer::from_path(&output_path).with_context(|| format!("creating {output_path}"))?;
    writer.write_record([
        "PassengerId",
        "Survived",
        "Pclass",
        "Sex",
        "Age",
        "SibSp",
        "Parch",
        "Fare",
        "Embarked",
        "FamilySize",
        "age_group",
    ])?;

    let mut survivors = 0;
    for id in 1..=PASSENGERS {
        let passenger = Passenger::random(id, &mut rng);
        survivors += usize::from(passenger.survived);
        writer.write_record(passenger.record())?;
    }
    writer.flush().context("flushing CSV")?;

    println!("Wrote {PASSENGERS} passengers ({survivors} survived) to {output_path}");
    Ok(())
}
