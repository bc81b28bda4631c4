//! Greedy top-N peak selection with minimum spacing.

use super::error::MovieError;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Result of one selection pass.
///
/// `indices` are positions in the input signal, in the order selected
/// (descending value, not ascending index).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeakSelection {
    pub indices: Vec<usize>,
    pub sampling_rate: Option<f64>,
    pub spacing: Option<f64>,
}

#[derive(Debug)]
struct Candidate {
    value: f64,
    index: usize,
}

impl Ord for Candidate {
    // Max-heap on value; equal values surface the smaller index first.
    fn cmp(&self, other: &Self) -> Ordering {
        self.value
            .total_cmp(&other.value)
            .then_with(|| other.index.cmp(&self.index))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

/// Pick up to `count` peaks, never two within the same exclusion window.
///
/// With both `spacing` (seconds) and `sampling_rate` (samples/sec) given,
/// selecting index `i` removes every index `j` with `|j - i| <= d` from
/// further consideration, where `d = sampling_rate * spacing / 2`. When the
/// candidates run out before `count` picks, the selection is simply shorter.
/// Equal maxima resolve to the first occurrence in index order.
///
/// Non-finite samples are rejected up front as a typed error.
pub fn select_peaks(
    signal: &[f64],
    count: usize,
    spacing: Option<f64>,
    sampling_rate: Option<f64>,
) -> Result<PeakSelection, MovieError> {
    if let Some(index) = signal.iter().position(|v| !v.is_finite()) {
        return Err(MovieError::NonFiniteSample { index });
    }
    let d = match (sampling_rate, spacing) {
        (Some(rate), Some(secs)) => {
            let d = rate * secs / 2.0;
            if d.is_finite() && d > 0.0 {
                d
            } else {
                0.0
            }
        }
        _ => 0.0,
    };

    // Entries that fall inside an already-excluded window are skipped lazily
    // on pop instead of being compacted out of a working buffer.
    let mut heap: BinaryHeap<Candidate> = signal
        .iter()
        .enumerate()
        .map(|(index, &value)| Candidate { value, index })
        .collect();
    let mut excluded = vec![false; signal.len()];
    let mut indices = Vec::with_capacity(count.min(signal.len()));

    while indices.len() < count {
        let Some(best) = heap.pop() else { break };
        if excluded[best.index] {
            continue;
        }
        indices.push(best.index);

        let lo = (best.index as f64 - d).ceil().max(0.0) as usize;
        let hi = ((best.index as f64 + d).floor() as usize).min(signal.len() - 1);
        for slot in &mut excluded[lo..=hi] {
            *slot = true;
        }
    }

    Ok(PeakSelection {
        indices,
        sampling_rate,
        spacing,
    })
}
