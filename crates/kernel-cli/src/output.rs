//! Result output formatting and writing.

use crate::orchestrator::{JobResults, OperationResult};
use crate::OutputFormat;
use anyhow::{Context, Result};
use serde::Serialize;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Per-operation figures reported in the summary.
#[derive(Clone, Debug, Serialize)]
pub struct OperationSummary {
    pub index: usize,
    pub kind: &'static str,
    pub display_name: &'static str,
    pub channels: Vec<String>,
    pub samples: usize,
    pub file: String,
    pub columns: Vec<ColumnSummary>,
    pub elapsed_ms: f64,
}

/// Range and final value of one output column.
#[derive(Clone, Debug, Serialize)]
pub struct ColumnSummary {
    pub name: String,
    pub min: f64,
    pub max: f64,
    pub last: f64,
}

impl ColumnSummary {
    fn new(name: String, values: &[f64]) -> Self {
        let (min, max) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        Self {
            name,
            min,
            max,
            last: values.last().copied().unwrap_or(f64::NAN),
        }
    }
}

/// File name for one operation's result.
pub fn result_file_name(prefix: &str, result: &OperationResult) -> String {
    format!("{}_{}_{}.csv", prefix, result.index, result.name)
}

/// Write a table with a header row.
pub fn write_table(path: &Path, headers: &[String], columns: &[Vec<f64>]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create output file: {:?}", path))?;
    let mut f = BufWriter::new(file);

    writeln!(f, "{}", headers.join(","))?;
    let rows = columns.first().map_or(0, Vec::len);
    for i in 0..rows {
        let row: Vec<String> = columns.iter().map(|c| c[i].to_string()).collect();
        writeln!(f, "{}", row.join(","))?;
    }
    f.flush()?;
    Ok(())
}

fn write_operation(result: &OperationResult, path: &Path) -> Result<Vec<ColumnSummary>> {
    let label = result.channels.first().map_or("value", String::as_str);
    let columns = result.output.columns(label);

    let mut headers = vec!["time".to_string()];
    headers.extend(columns.iter().map(|(name, _)| name.clone()));
    let mut data = vec![result.output.time().to_vec()];
    data.extend(columns.iter().map(|(_, values)| values.clone()));
    write_table(path, &headers, &data)?;

    tracing::info!("Wrote {} to {:?}", result.display_name, path);
    Ok(columns
        .into_iter()
        .map(|(name, values)| ColumnSummary::new(name, &values))
        .collect())
}

/// Write job results to output directory.
pub fn write_results(
    results: &JobResults,
    output_dir: &Path,
    format: OutputFormat,
) -> Result<Vec<OperationSummary>> {
    let mut summaries = Vec::with_capacity(results.operations.len());
    for result in &results.operations {
        let file = result_file_name(&results.file_prefix, result);
        let columns = write_operation(result, &output_dir.join(&file))?;
        summaries.push(OperationSummary {
            index: result.index,
            kind: result.name,
            display_name: result.display_name,
            channels: result.channels.clone(),
            samples: result.output.len(),
            file,
            columns,
            elapsed_ms: result.elapsed.as_secs_f64() * 1e3,
        });
    }

    let summary_path = summary_path(output_dir, format);
    let mut f = std::fs::File::create(&summary_path)?;

    match format {
        OutputFormat::Text => {
            writeln!(f, "Waveform Analysis Summary")?;
            writeln!(f, "=========================")?;
            writeln!(f)?;
            writeln!(f, "Job:     {}", results.job_name)?;
            writeln!(f, "Samples: {}", results.samples)?;
            for s in &summaries {
                writeln!(f)?;
                writeln!(f, "[{}] {} ({})", s.index, s.display_name, s.kind)?;
                writeln!(f, "  Channels: {}", s.channels.join(", "))?;
                writeln!(f, "  Samples:  {}", s.samples)?;
                writeln!(f, "  File:     {}", s.file)?;
                for c in &s.columns {
                    writeln!(
                        f,
                        "  {:<10} min {:>12.6}  max {:>12.6}  last {:>12.6}",
                        c.name, c.min, c.max, c.last
                    )?;
                }
            }
        }
        OutputFormat::Json => {
            let json = serde_json::json!({
                "job": results.job_name,
                "samples": results.samples,
                "operations": summaries,
            });
            writeln!(f, "{}", serde_json::to_string_pretty(&json)?)?;
        }
        OutputFormat::Csv => {
            writeln!(f, "index,kind,column,samples,min,max,last,elapsed_ms")?;
            for s in &summaries {
                for c in &s.columns {
                    writeln!(
                        f,
                        "{},{},{},{},{},{},{},{}",
                        s.index, s.kind, c.name, s.samples, c.min, c.max, c.last, s.elapsed_ms
                    )?;
                }
            }
        }
    }

    tracing::info!("Wrote summary to {:?}", summary_path);

    Ok(summaries)
}

fn summary_path(output_dir: &Path, format: OutputFormat) -> PathBuf {
    let ext = match format {
        OutputFormat::Text => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Csv => "csv",
    };
    output_dir.join(format!("summary.{}", ext))
}

/// Print results to stdout.
pub fn print_results(results: &JobResults) {
    println!("\n=== {} ===\n", results.job_name);
    println!("Input samples: {}", results.samples);

    for r in &results.operations {
        println!(
            "  [{}] {:<32} {:>8} samples  {:>8.2} ms",
            r.index,
            r.display_name,
            r.output.len(),
            r.elapsed.as_secs_f64() * 1e3
        );
    }

    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::read_table;
    use lib_dsp::Output;
    use lib_types::{Basis, ThreePhase, Waveform};
    use std::time::Duration;

    fn sample_results() -> JobResults {
        let time = vec![0.0, 0.5, 1.0];
        let series = OperationResult {
            index: 1,
            name: "derivative",
            display_name: "Differentiation",
            channels: vec!["x".into()],
            output: Output::Series(Waveform::new(time.clone(), vec![0.0, 2.0, -1.0])),
            elapsed: Duration::from_millis(3),
        };
        let components = OperationResult {
            index: 2,
            name: "sequence",
            display_name: "Sequence Transform",
            channels: vec!["a".into(), "b".into(), "c".into()],
            output: Output::Components(
                ThreePhase::from_components(time, Basis::Sequence, &[1.0; 3], &[2.0; 3], &[3.0; 3])
                    .unwrap(),
            ),
            elapsed: Duration::from_millis(1),
        };
        JobResults {
            job_name: "demo".into(),
            file_prefix: "demo".into(),
            samples: 3,
            operations: vec![series, components],
        }
    }

    #[test]
    fn test_writes_operation_files() {
        let dir = tempfile::tempdir().unwrap();
        let summaries = write_results(&sample_results(), dir.path(), OutputFormat::Text).unwrap();

        assert_eq!(summaries[0].file, "demo_1_derivative.csv");
        assert_eq!(summaries[0].columns[0].max, 2.0);
        assert_eq!(summaries[0].columns[0].last, -1.0);

        let table = read_table(&dir.path().join("demo_2_sequence.csv")).unwrap();
        assert_eq!(table.headers, vec!["time", "positive", "negative", "zero"]);
        assert_eq!(table.column("zero"), Some(&[3.0, 3.0, 3.0][..]));

        let first = read_table(&dir.path().join("demo_1_derivative.csv")).unwrap();
        assert_eq!(first.headers, vec!["time", "x"]);
        assert!(dir.path().join("summary.txt").exists());
    }

    #[test]
    fn test_json_summary() {
        let dir = tempfile::tempdir().unwrap();
        write_results(&sample_results(), dir.path(), OutputFormat::Json).unwrap();

        let content = std::fs::read_to_string(dir.path().join("summary.json")).unwrap();
        let json: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(json["samples"], 3);
        assert_eq!(json["operations"][1]["kind"], "sequence");
        assert_eq!(json["operations"][1]["columns"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_csv_summary_rows() {
        let dir = tempfile::tempdir().unwrap();
        write_results(&sample_results(), dir.path(), OutputFormat::Csv).unwrap();
        let content = std::fs::read_to_string(dir.path().join("summary.csv")).unwrap();
        // Header plus one row per output column.
        assert_eq!(content.lines().count(), 5);
    }
}
