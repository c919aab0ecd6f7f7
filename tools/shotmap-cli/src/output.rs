//! Rendering of the team differential table

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;
use shot_analytics::TeamDifferential;
use std::io::Write;

/// Output format for `visualize`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

/// One flat output row; bins are split into their edges
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DifferentialRow {
    pub team: String,
    pub year: i32,
    pub x_bin: String,
    pub y_bin: String,
    pub x_center: f64,
    pub y_center: f64,
    pub shots: u32,
    pub shots_per_hour: f64,
    pub league_shots_per_hour: Option<f64>,
    pub shot_diff: Option<f64>,
}

impl From<&TeamDifferential> for DifferentialRow {
    fn from(cell: &TeamDifferential) -> Self {
        Self {
            team: cell.team.clone(),
            year: cell.year,
            x_bin: cell.x_bin.to_string(),
            y_bin: cell.y_bin.to_string(),
            x_center: cell.x_center,
            y_center: cell.y_center,
            shots: cell.shots,
            shots_per_hour: cell.shots_per_hour,
            league_shots_per_hour: cell.league_shots_per_hour,
            shot_diff: cell.shot_diff,
        }
    }
}

/// Write `cells` to `out` in the requested format
pub fn render<W: Write>(cells: &[TeamDifferential], format: OutputFormat, out: &mut W) -> Result<()> {
    let rows: Vec<DifferentialRow> = cells.iter().map(DifferentialRow::from).collect();

    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &rows)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(&mut *out);
            for row in &rows {
                writer.serialize(row)?;
            }
            writer.flush()?;
        }
        OutputFormat::Table => render_table(&rows, out)?,
    }

    Ok(())
}

fn render_table<W: Write>(rows: &[DifferentialRow], out: &mut W) -> Result<()> {
    writeln!(
        out,
        "{:<12} {:<12} {:>6} {:>10} {:>10} {:>10}",
        "x_bin", "y_bin", "shots", "shots/gp", "league/gp", "diff"
    )?;
    writeln!(out, "{}", "-".repeat(65))?;

    for row in rows {
        writeln!(
            out,
            "{:<12} {:<12} {:>6} {:>10.3} {:>10} {:>10}",
            row.x_bin,
            row.y_bin,
            row.shots,
            row.shots_per_hour,
            format_optional(row.league_shots_per_hour),
            format_optional(row.shot_diff),
        )?;
    }

    Ok(())
}

fn format_optional(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("{:.3}", value),
        None => "-".to_string(),
    }
}
