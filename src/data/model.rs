// ---------------------------------------------------------------------------
// Sample – one row of a log file
// ---------------------------------------------------------------------------

/// A single time-series sample: reference (`input`) and measured (`output`)
/// value at time `t`. Missing cells are stored as `NaN`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub t: f64,
    pub input: f64,
    pub output: f64,
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// Which signal of a [`Sample`] to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Input,
    Output,
}

impl Signal {
    pub fn value(self, sample: &Sample) -> f64 {
        match self {
            Signal::Input => sample.input,
            Signal::Output => sample.output,
        }
    }
}

/// All samples of one source file, in file order.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub samples: Vec<Sample>,
}

impl Dataset {
    pub fn from_samples(samples: Vec<Sample>) -> Self {
        Dataset { samples }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Finite `(min, max)` of the time axis, `None` if no finite value exists.
    pub fn t_bounds(&self) -> Option<(f64, f64)> {
        finite_bounds(self.samples.iter().map(|s| s.t))
    }

    /// Finite `(min, max)` over both signals.
    pub fn value_bounds(&self) -> Option<(f64, f64)> {
        finite_bounds(self.samples.iter().flat_map(|s| [s.input, s.output]))
    }

    /// Split one signal into continuous `(t, value)` runs.
    ///
    /// A sample whose `t` or value is not finite ends the current run, so the
    /// chart shows a gap instead of joining across missing data.
    pub fn segments(&self, signal: Signal) -> Vec<Vec<(f64, f64)>> {
        let mut segments = Vec::new();
        let mut current = Vec::new();
        for sample in &self.samples {
            let value = signal.value(sample);
            if sample.t.is_finite() && value.is_finite() {
                current.push((sample.t, value));
            } else if !current.is_empty() {
                segments.push(std::mem::take(&mut current));
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
        segments
    }
}

fn finite_bounds(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}
