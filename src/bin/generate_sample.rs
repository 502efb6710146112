use std::f64::consts::PI;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

/// Write a directory of synthetic closed-loop logs for batch-plotter.
#[derive(Parser)]
#[command(name = "generate_sample")]
struct Args {
    /// Output directory (created if missing)
    #[arg(default_value = "sample_data")]
    dir: PathBuf,
}

#[derive(Serialize)]
struct Row {
    t: f64,
    input: f64,
    output: f64,
    error: f64,
    control: f64,
}

#[derive(Clone, Copy)]
enum Reference {
    Step { amplitude: f64 },
    Sinusoid { period: f64, amplitude: f64, offset: f64 },
    Square { period: f64, amplitude: f64, offset: f64 },
    Sawtooth { period: f64, amplitude: f64, offset: f64 },
}

impl Reference {
    fn at(self, t: f64) -> f64 {
        match self {
            Reference::Step { amplitude } => amplitude,
            Reference::Sinusoid {
                period,
                amplitude,
                offset,
            } => offset + amplitude * (2.0 * PI * t / period).sin(),
            Reference::Square {
                period,
                amplitude,
                offset,
            } => {
                if (t % period) / period < 0.5 {
                    offset + amplitude
                } else {
                    offset
                }
            }
            Reference::Sawtooth {
                period,
                amplitude,
                offset,
            } => offset + amplitude * (t % period) / period,
        }
    }
}

#[derive(Clone, Copy)]
struct Gains {
    kp: f64,
    ki: f64,
    kd: f64,
}

/// Sensor noise added to the measured plant position.
///
/// Deterministic per seed: a splitmix64 stream, with normal samples
/// approximated by the Irwin-Hall sum of twelve uniforms.
struct MeasurementNoise {
    state: u64,
    std_dev: f64,
}

impl MeasurementNoise {
    fn new(seed: u64, std_dev: f64) -> Self {
        Self {
            state: seed,
            std_dev,
        }
    }

    fn uniform(&mut self) -> f64 {
        self.state = self.state.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^= z >> 31;
        (z >> 11) as f64 / (1u64 << 53) as f64
    }

    fn sample(&mut self) -> f64 {
        let sum: f64 = (0..12).map(|_| self.uniform()).sum();
        self.std_dev * (sum - 6.0)
    }
}

/// PID loop around a mass-spring-damper (m = 1, c = 0.2, k = 1), Euler
/// integration with a fixed step.
fn simulate(reference: Reference, gains: Gains, noise: &mut MeasurementNoise) -> Vec<Row> {
    const DT: f64 = 0.01;
    const DURATION: f64 = 10.0;
    const M: f64 = 1.0;
    const C: f64 = 0.2;
    const K: f64 = 1.0;

    let steps = (DURATION / DT).round() as usize;
    let (mut x, mut v) = (0.0, 0.0);
    let (mut integral, mut prev_error) = (0.0, 0.0);
    let mut rows = Vec::with_capacity(steps + 1);

    for i in 0..=steps {
        let t = i as f64 * DT;
        let r = reference.at(t);
        let measured = x + noise.sample();
        let error = r - measured;

        integral += error * DT;
        let derivative = if i == 0 { 0.0 } else { (error - prev_error) / DT };
        prev_error = error;
        let u = gains.kp * error + gains.ki * integral + gains.kd * derivative;

        rows.push(Row {
            t,
            input: r,
            output: measured,
            error,
            control: u,
        });

        let a = (u - C * v - K * x) / M;
        v += a * DT;
        x += v * DT;
    }
    rows
}

fn write_log(path: &Path, rows: &[Row]) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut noise = MeasurementNoise::new(42, 0.005);

    let tuned = Gains {
        kp: 8.0,
        ki: 2.0,
        kd: 1.5,
    };
    let sluggish = Gains {
        kp: 1.0,
        ki: 0.2,
        kd: 0.0,
    };

    let logs = [
        ("step.csv", Reference::Step { amplitude: 1.0 }, tuned),
        (
            "sinusoid.csv",
            Reference::Sinusoid {
                period: 2.0 * PI,
                amplitude: 1.0,
                offset: 0.0,
            },
            tuned,
        ),
        (
            "square.csv",
            Reference::Square {
                period: 4.0,
                amplitude: 1.0,
                offset: 0.0,
            },
            tuned,
        ),
        (
            "sawtooth.csv",
            Reference::Sawtooth {
                period: 5.0,
                amplitude: 2.0,
                offset: -1.0,
            },
            tuned,
        ),
        ("sluggish/step.csv", Reference::Step { amplitude: 1.0 }, sluggish),
        (
            "sluggish/deep/sinusoid_slow.csv",
            Reference::Sinusoid {
                period: 10.0,
                amplitude: 0.5,
                offset: 0.5,
            },
            sluggish,
        ),
    ];

    for (name, reference, gains) in logs {
        let path = args.dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let rows = simulate(reference, gains, &mut noise);
        write_log(&path, &rows)?;
        println!("Wrote {} samples to {}", rows.len(), path.display());
    }

    let notes = args.dir.join("notes.txt");
    fs::write(&notes, "Not a log; batch-plotter ignores this file.\n")
        .with_context(|| format!("writing {}", notes.display()))?;

    Ok(())
}
