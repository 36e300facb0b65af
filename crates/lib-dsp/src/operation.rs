//! Operation selector.
//!
//! Each analysis function is one [`Operation`] variant carrying its parameter
//! record. Callers build an operation (directly or from a config file via
//! serde), bundle the arrays in [`Inputs`] and call [`execute`].

use crate::error::{DspError, DspResult};
use crate::phasor::{self, PhasorParams};
use crate::trend::{self, TrendSolver};
use crate::{calculus, composite, filter, moving_window, three_phase};
use lib_types::{ThreePhase, Waveform};
use serde::{Deserialize, Serialize};

/// One analysis function and its parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Operation {
    Derivative,
    Integration,
    LowPass {
        /// Filter time constant in seconds.
        time_constant: f64,
    },
    HighPass {
        /// Filter time constant in seconds.
        time_constant: f64,
    },
    PhasorMagnitude(PhasorParams),
    PhasorAngle(PhasorParams),
    Trend {
        lambda: f64,
        #[serde(default)]
        solver: TrendSolver,
    },
    MovingAverage {
        /// Window length in seconds.
        window: f64,
    },
    MovingRms {
        /// Window length in seconds.
        window: f64,
    },
    Clarke,
    InverseClarke,
    Park {
        /// Angular frequency in rad/s.
        omega: f64,
        /// Phase offset in radians.
        #[serde(default)]
        gamma: f64,
    },
    InversePark {
        /// Frequency in Hz (scaled by 2 pi internally).
        frequency: f64,
        /// Phase offset in radians.
        #[serde(default)]
        gamma: f64,
    },
    Sequence,
    LlRmsVoltage,
    LineCurrent,
}

/// Static description of an operation kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OperationInfo {
    /// Selector name used in config files.
    pub name: &'static str,
    /// Human-readable label.
    pub display_name: &'static str,
    /// Number of signal arrays consumed (1 or 3).
    pub channels: usize,
    /// Parameter names, in config-file spelling.
    pub parameters: &'static [&'static str],
}

const fn info(
    name: &'static str,
    display_name: &'static str,
    channels: usize,
    parameters: &'static [&'static str],
) -> OperationInfo {
    OperationInfo {
        name,
        display_name,
        channels,
        parameters,
    }
}

/// Every operation kind, in menu order.
pub const CATALOG: &[OperationInfo] = &[
    info("low_pass", "Low pass filter", 1, &["time_constant"]),
    info("high_pass", "High pass filter", 1, &["time_constant"]),
    info("derivative", "Differentiation", 1, &[]),
    info("integration", "Integration", 1, &[]),
    info("phasor_magnitude", "Windowed Phasor (Magnitude)", 1, PHASOR_PARAMETERS),
    info("phasor_angle", "Windowed Phasor (Angle)", 1, PHASOR_PARAMETERS),
    info("trend", "Trend filter", 1, &["lambda", "solver"]),
    info("moving_average", "Moving window average", 1, &["window"]),
    info("moving_rms", "Moving window RMS", 1, &["window"]),
    info("clarke", "Clarke's Transform", 3, &[]),
    info("inverse_clarke", "Clarke's Transform (Inverse)", 3, &[]),
    info("sequence", "Sequence Transform", 3, &[]),
    info("park", "Park's Transform", 3, &["omega", "gamma"]),
    info("inverse_park", "Park's Transform (Inverse)", 3, &["frequency", "gamma"]),
    info("ll_rms_voltage", "Instantaneous LL RMS voltage", 3, &[]),
    info("line_current", "Instantaneous line current", 3, &[]),
];

const PHASOR_PARAMETERS: &[&str] = &["stride", "cycles", "dominant_frequency"];

impl Operation {
    /// Catalog entry for this operation's kind.
    pub fn info(&self) -> &'static OperationInfo {
        let index = match self {
            Operation::LowPass { .. } => 0,
            Operation::HighPass { .. } => 1,
            Operation::Derivative => 2,
            Operation::Integration => 3,
            Operation::PhasorMagnitude(_) => 4,
            Operation::PhasorAngle(_) => 5,
            Operation::Trend { .. } => 6,
            Operation::MovingAverage { .. } => 7,
            Operation::MovingRms { .. } => 8,
            Operation::Clarke => 9,
            Operation::InverseClarke => 10,
            Operation::Sequence => 11,
            Operation::Park { .. } => 12,
            Operation::InversePark { .. } => 13,
            Operation::LlRmsVoltage => 14,
            Operation::LineCurrent => 15,
        };
        &CATALOG[index]
    }

    /// Selector name, as written in config files.
    pub fn name(&self) -> &'static str {
        self.info().name
    }

    /// Human-readable label.
    pub fn display_name(&self) -> &'static str {
        self.info().display_name
    }

    /// Number of signal arrays this operation consumes.
    pub fn channels(&self) -> usize {
        self.info().channels
    }
}

/// Arrays handed to [`execute`].
#[derive(Clone, Debug)]
pub struct Inputs<'a> {
    /// Time array shared by all signals.
    pub time: &'a [f64],
    /// One or three signal arrays.
    pub signals: Vec<&'a [f64]>,
}

impl<'a> Inputs<'a> {
    /// A single signal.
    pub fn single(time: &'a [f64], signal: &'a [f64]) -> Self {
        Self {
            time,
            signals: vec![signal],
        }
    }

    /// Three phase (or component) signals.
    pub fn three_phase(time: &'a [f64], a: &'a [f64], b: &'a [f64], c: &'a [f64]) -> Self {
        Self {
            time,
            signals: vec![a, b, c],
        }
    }
}

/// Result of an operation.
#[derive(Clone, Debug, PartialEq)]
pub enum Output {
    /// One array with its time base (possibly down-sampled).
    Series(Waveform),
    /// Three component arrays.
    Components(ThreePhase),
}

impl Output {
    /// Time base of the result.
    pub fn time(&self) -> &[f64] {
        match self {
            Output::Series(w) => &w.time,
            Output::Components(c) => &c.time,
        }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.time().len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Named value columns, excluding time.
    pub fn columns(&self, series_label: &str) -> Vec<(String, Vec<f64>)> {
        match self {
            Output::Series(w) => vec![(series_label.to_string(), w.samples.clone())],
            Output::Components(c) => c
                .basis
                .labels()
                .iter()
                .zip(c.to_vecs())
                .map(|(label, values)| (label.to_string(), values))
                .collect(),
        }
    }
}

/// Run `op` on `inputs`.
pub fn execute(op: &Operation, inputs: &Inputs<'_>) -> DspResult<Output> {
    let needed = op.channels();
    if inputs.signals.len() < needed {
        return Err(DspError::invalid(
            "signals",
            format!(
                "{} needs {} signal array(s), got {}",
                op.name(),
                needed,
                inputs.signals.len()
            ),
        ));
    }
    if inputs.signals.len() > needed {
        tracing::debug!(
            "{} uses {} of {} supplied signals",
            op.name(),
            needed,
            inputs.signals.len()
        );
    }

    tracing::debug!("Executing {} on {} samples", op.name(), inputs.time.len());

    let t = inputs.time;
    let x = inputs.signals[0];
    let same_base = |samples: Vec<f64>| Output::Series(Waveform::new(t.to_vec(), samples));

    let abc = || [inputs.signals[0], inputs.signals[1], inputs.signals[2]];

    let output = match op {
        Operation::Derivative => same_base(calculus::derivative(t, x)?),
        Operation::Integration => same_base(calculus::integration(t, x)?),
        Operation::LowPass { time_constant } => {
            same_base(filter::low_pass(t, x, *time_constant)?)
        }
        Operation::HighPass { time_constant } => {
            same_base(filter::high_pass(t, x, *time_constant)?)
        }
        Operation::PhasorMagnitude(params) => {
            Output::Series(phasor::window_phasor(t, x, params)?.magnitude_waveform())
        }
        Operation::PhasorAngle(params) => {
            Output::Series(phasor::window_phasor(t, x, params)?.angle_waveform())
        }
        Operation::Trend { lambda, solver } => {
            Output::Series(trend::trend_filter_with(t, x, *lambda, *solver)?)
        }
        Operation::MovingAverage { window } => {
            same_base(moving_window::avg_moving_window(t, x, *window)?)
        }
        Operation::MovingRms { window } => {
            same_base(moving_window::rms_moving_window(t, x, *window)?)
        }
        Operation::Clarke => {
            let [a, b, c] = abc();
            Output::Components(three_phase::clarke(t, a, b, c)?)
        }
        Operation::InverseClarke => {
            let [a, b, c] = abc();
            Output::Components(three_phase::inverse_clarke(t, a, b, c)?)
        }
        Operation::Park { omega, gamma } => {
            let [a, b, c] = abc();
            Output::Components(three_phase::park(t, a, b, c, *omega, *gamma)?)
        }
        Operation::InversePark { frequency, gamma } => {
            let [a, b, c] = abc();
            Output::Components(three_phase::inverse_park(t, a, b, c, *frequency, *gamma)?)
        }
        Operation::Sequence => {
            let [a, b, c] = abc();
            Output::Components(three_phase::sequence_transform(t, a, b, c)?)
        }
        Operation::LlRmsVoltage => {
            let [a, b, c] = abc();
            same_base(composite::insta_ll_rms_voltage(t, a, b, c)?)
        }
        Operation::LineCurrent => {
            let [a, b, c] = abc();
            same_base(composite::insta_line_current(t, a, b, c)?)
        }
    };
    Ok(output)
}
