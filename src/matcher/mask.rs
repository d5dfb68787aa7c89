use smallvec::SmallVec;

use super::engine::Tracker;

/// Input spans consumed by wildcards, kept ordered and non-overlapping.
///
/// The walk only moves forward between rewinds, so recording and rewinding
/// are amortized O(1) whatever the span lengths.
pub(crate) struct MaskTracker {
    spans: SmallVec<[(usize, usize); 8]>,
}

impl MaskTracker {
    pub(crate) fn new() -> Self {
        Self {
            spans: SmallVec::new(),
        }
    }

    /// Collects the consumed characters of `input` in order.
    pub(crate) fn collect(&self, input: &[char]) -> String {
        self.spans
            .iter()
            .flat_map(|&(start, end)| input[start..end].iter())
            .collect()
    }
}

impl Tracker for MaskTracker {
    fn consume(&mut self, start: usize, end: usize) {
        if start >= end {
            return;
        }
        if let Some(last) = self.spans.last_mut()
            && start >= last.0
            && start <= last.1
        {
            last.1 = last.1.max(end);
            return;
        }
        self.spans.push((start, end));
    }

    fn rewind(&mut self, from: usize) {
        while let Some(last) = self.spans.last_mut() {
            if last.0 >= from {
                self.spans.pop();
                continue;
            }
            last.1 = last.1.min(from);
            break;
        }
    }

    fn is_consumed(&self, idx: usize) -> bool {
        let after = self.spans.partition_point(|&(start, _)| start <= idx);
        after > 0 && idx < self.spans[after - 1].1
    }
}
