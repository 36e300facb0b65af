//! Job orchestration.

use crate::config::{JobConfig, OperationConfig};
use crate::input::{read_table, SignalTable};
use anyhow::{Context, Result};
use lib_dsp::{execute, Inputs, Output};
use rayon::prelude::*;
use std::time::{Duration, Instant};

/// Job orchestrator.
pub struct Orchestrator {
    config: JobConfig,
}

/// Result of one configured operation.
#[derive(Clone, Debug)]
pub struct OperationResult {
    /// Position in the configuration, starting at 1.
    pub index: usize,
    /// Selector name.
    pub name: &'static str,
    /// Human-readable label.
    pub display_name: &'static str,
    /// Signals the operation consumed.
    pub channels: Vec<String>,
    pub output: Output,
    pub elapsed: Duration,
}

/// Results of a whole job.
#[derive(Clone, Debug)]
pub struct JobResults {
    pub job_name: String,
    pub file_prefix: String,
    /// Number of input samples.
    pub samples: usize,
    pub operations: Vec<OperationResult>,
}

impl Orchestrator {
    /// Create a new orchestrator.
    pub fn new(config: JobConfig) -> Result<Self> {
        Ok(Self { config })
    }

    /// Run the job.
    ///
    /// Operations are independent and run in parallel; results keep the
    /// configuration order.
    pub fn run(&self) -> Result<JobResults> {
        tracing::info!("Starting job: {}", self.config.name);

        let table = read_table(&self.config.input.path)?;
        let time = table.require(&self.config.input.time_column)?;
        tracing::info!(
            "Loaded {} rows x {} columns from {:?}",
            table.rows(),
            table.headers.len(),
            self.config.input.path
        );

        let operations = self
            .config
            .operations
            .par_iter()
            .enumerate()
            .map(|(i, entry)| self.run_operation(i + 1, entry, &table, time))
            .collect::<Result<Vec<_>>>()?;

        tracing::info!("Job complete: {} operations", operations.len());
        Ok(JobResults {
            job_name: self.config.name.clone(),
            file_prefix: self.config.file_prefix(),
            samples: time.len(),
            operations,
        })
    }

    /// Signal names an operation reads.
    fn channels_for(&self, entry: &OperationConfig) -> Vec<String> {
        let signals = &self.config.input.signals;
        if entry.operation.channels() == 3 {
            signals.iter().take(3).cloned().collect()
        } else {
            let name = entry
                .channel
                .clone()
                .or_else(|| signals.first().cloned())
                .unwrap_or_default();
            vec![name]
        }
    }

    fn run_operation(
        &self,
        index: usize,
        entry: &OperationConfig,
        table: &SignalTable,
        time: &[f64],
    ) -> Result<OperationResult> {
        let op = &entry.operation;
        let channels = self.channels_for(entry);
        let signals = channels
            .iter()
            .map(|name| table.require(name))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!("Operation {} ({}) on {:?}", index, op.name(), channels);

        let start = Instant::now();
        let output = execute(op, &Inputs { time, signals })
            .with_context(|| format!("Operation {} ({}) failed", index, op.name()))?;
        let elapsed = start.elapsed();

        tracing::info!(
            "{} finished in {:.2} ms ({} samples)",
            op.display_name(),
            elapsed.as_secs_f64() * 1e3,
            output.len()
        );

        Ok(OperationResult {
            index,
            name: op.name(),
            display_name: op.display_name(),
            channels,
            output,
            elapsed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config;
    use approx::assert_abs_diff_eq;
    use lib_types::Basis;

    #[test]
    fn test_run_job_in_config_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut csv = String::from("t,va,vb,vc\n");
        for i in 0..400 {
            let t = i as f64 * 1e-4;
            let w = 2.0 * std::f64::consts::PI * 50.0;
            csv.push_str(&format!(
                "{},{},{},{}\n",
                t,
                (w * t).sin(),
                (w * t - 2.0 * std::f64::consts::PI / 3.0).sin(),
                (w * t + 2.0 * std::f64::consts::PI / 3.0).sin()
            ));
        }
        std::fs::write(dir.path().join("abc.csv"), csv).unwrap();
        std::fs::write(
            dir.path().join("job.toml"),
            r#"
[input]
path = "abc.csv"
signals = ["va", "vb", "vc"]

[[operations]]
kind = "moving_average"
window = 0.02
channel = "vc"

[[operations]]
kind = "clarke"

[[operations]]
kind = "line_current"
"#,
        )
        .unwrap();

        let config = load_config(&dir.path().join("job.toml")).unwrap();
        let results = Orchestrator::new(config).unwrap().run().unwrap();

        assert_eq!(results.samples, 400);
        let names: Vec<_> = results.operations.iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["moving_average", "clarke", "line_current"]);
        assert_eq!(results.operations[0].channels, vec!["vc"]);
        assert_eq!(results.operations[2].index, 3);

        match &results.operations[1].output {
            Output::Components(c) => assert_eq!(c.basis, Basis::AlphaBetaZero),
            other => panic!("unexpected output {:?}", other),
        }
        match &results.operations[2].output {
            Output::Series(w) => assert_abs_diff_eq!(w.samples[100], 0.5f64.sqrt(), epsilon = 1e-6),
            other => panic!("unexpected output {:?}", other),
        }
    }

    #[test]
    fn test_kernel_error_names_operation() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("x.csv"), "t,x\n0,1\n1,2\n").unwrap();
        std::fs::write(
            dir.path().join("job.toml"),
            "[input]\npath = \"x.csv\"\nsignals = [\"x\"]\n[[operations]]\nkind = \"low_pass\"\ntime_constant = -1.0\n",
        )
        .unwrap();

        let config = load_config(&dir.path().join("job.toml")).unwrap();
        let err = Orchestrator::new(config).unwrap().run().unwrap_err();
        assert!(err.to_string().contains("Operation 1 (low_pass)"), "{}", err);
    }
}
