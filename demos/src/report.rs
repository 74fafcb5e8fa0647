//! Report writers for the noise sweep.
//!
//! Two artifacts per qubit count: a CSV table comparing counts across
//! the five noise conditions, and a plain-text histogram of the same
//! data. Rows cover the union of bitstrings observed in any condition,
//! sorted, so sparse and dense results line up.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use qnoise_hal::Counts;

use crate::runners::noise_sweep::ConditionResults;

/// Width of the widest histogram bar, in characters.
const BAR_WIDTH: usize = 50;

/// Labels paired with each condition's counts, in report order.
fn labeled<'a>(results: &'a ConditionResults) -> [(&'static str, &'a Counts); 5] {
    [
        ("Without noise", &results.baseline),
        ("With noise", &results.device),
        ("Depolarizing", &results.depolarizing),
        ("Amplitude dampening", &results.amplitude),
        ("Phase dampening", &results.phase),
    ]
}

/// Sorted union of bitstrings observed in any condition.
pub fn union_keys(results: &ConditionResults) -> Vec<String> {
    let mut keys = BTreeSet::new();
    for (_, counts) in labeled(results) {
        for key in counts.bitstrings() {
            keys.insert(key.clone());
        }
    }
    keys.into_iter().collect()
}

/// Write the comparison table as CSV.
pub fn write_csv(path: &Path, results: &ConditionResults) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);

    writeln!(out, "Qubit, Baseline, Real, Depolarizing, Amplitude, Phase")?;
    for key in union_keys(results) {
        writeln!(
            out,
            "{key}, {}, {}, {}, {}, {}",
            results.baseline.get(&key),
            results.device.get(&key),
            results.depolarizing.get(&key),
            results.amplitude.get(&key),
            results.phase.get(&key),
        )?;
    }
    out.flush()
}

/// Write a plain-text histogram of all five conditions.
pub fn write_histogram(path: &Path, results: &ConditionResults) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);

    let keys = union_keys(results);
    let max = labeled(results)
        .iter()
        .flat_map(|(_, counts)| keys.iter().map(|k| counts.get(k)))
        .max()
        .unwrap_or(0);

    for (label, counts) in labeled(results) {
        writeln!(out, "{label}")?;
        for key in &keys {
            let count = counts.get(key);
            let bar = if max == 0 {
                0
            } else {
                (count as usize * BAR_WIDTH) / max as usize
            };
            let bar = "█".repeat(bar);
            writeln!(out, "  {key}  {bar:<width$}  {count}", width = BAR_WIDTH)?;
        }
        writeln!(out)?;
    }
    out.flush()
}
