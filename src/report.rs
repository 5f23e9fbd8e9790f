use crate::load::RawTable;
use crate::stats::{DurationStats, StationStats, TimeStats, UserStats};
use crate::structs::Dataset;
use std::fmt::Display;
use std::io::{self, Write};
use std::time::Instant;

const RULE_WIDTH: usize = 40;

/// Prints the horizontal rule that closes every section.
pub fn rule<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))
}

/// Computes one statistic group, printing it with its heading and timing.
///
/// Returns the computed value so callers and tests can inspect it.
pub fn timed_section<W, S, F>(out: &mut W, heading: &str, compute: F) -> io::Result<S>
where
    W: Write,
    S: Display,
    F: FnOnce() -> S,
{
    writeln!(out, "\n{}\n", heading)?;
    let start = Instant::now();
    let stats = compute();
    let elapsed = start.elapsed();
    write!(out, "{}", stats)?;
    writeln!(out, "\nThis took {:.6} seconds.", elapsed.as_secs_f64())?;
    rule(out)?;
    Ok(stats)
}

pub fn time_stats<W: Write>(out: &mut W, dataset: &Dataset) -> io::Result<TimeStats> {
    timed_section(out, "Calculating The Most Frequent Times of Travel...", || {
        TimeStats::from_dataset(dataset)
    })
}

pub fn station_stats<W: Write>(out: &mut W, dataset: &Dataset) -> io::Result<StationStats> {
    timed_section(out, "Calculating The Most Popular Stations and Trip...", || {
        StationStats::from_dataset(dataset)
    })
}

pub fn trip_duration_stats<W: Write>(out: &mut W, dataset: &Dataset) -> io::Result<DurationStats> {
    timed_section(out, "Calculating Trip Duration...", || {
        DurationStats::from_dataset(dataset)
    })
}

pub fn user_stats<W: Write>(out: &mut W, dataset: &Dataset) -> io::Result<UserStats> {
    timed_section(out, "Calculating User Stats...", || {
        UserStats::from_dataset(dataset)
    })
}

/// Prints all four statistic groups in order.
pub fn all_stats<W: Write>(out: &mut W, dataset: &Dataset) -> io::Result<()> {
    if dataset.is_empty() {
        writeln!(out, "\nNo trips match the selected filters.")?;
    }
    time_stats(out, dataset)?;
    station_stats(out, dataset)?;
    trip_duration_stats(out, dataset)?;
    user_stats(out, dataset)?;
    Ok(())
}

/// Renders rows `start..start + len` of the raw table with a leading index
/// column, every column padded to its widest cell on the page.
pub fn format_page(raw: &RawTable, start: usize, len: usize) -> String {
    let end = (start + len).min(raw.len());
    if start >= end {
        return String::new();
    }

    let mut lines: Vec<Vec<String>> = Vec::with_capacity(end - start + 1);
    lines.push(
        std::iter::once(String::new())
            .chain(raw.headers.iter().map(String::from))
            .collect(),
    );
    for (i, row) in raw.rows[start..end].iter().enumerate() {
        lines.push(
            std::iter::once((start + i).to_string())
                .chain(row.iter().map(String::from))
                .collect(),
        );
    }

    let columns = lines.iter().map(Vec::len).max().unwrap_or(0);
    let widths: Vec<usize> = (0..columns)
        .map(|c| {
            lines
                .iter()
                .filter_map(|line| line.get(c))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    lines
        .iter()
        .map(|line| {
            line.iter()
                .zip(&widths)
                .map(|(cell, &width)| format!("{:<width$}", cell))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
