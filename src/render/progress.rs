//! Cooperative progress reporting and cancellation.

/// Receives progress during a render; returning `false` cancels it.
pub trait ProgressCallback {
    /// `current` out of `total` units are done.
    fn amount_complete(&mut self, current: u64, total: u64) -> bool;
}

impl<F> ProgressCallback for F
where
    F: FnMut(u64, u64) -> bool,
{
    fn amount_complete(&mut self, current: u64, total: u64) -> bool {
        self(current, total)
    }
}

/// Progress sink that ignores reports and never cancels.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl ProgressCallback for NoProgress {
    fn amount_complete(&mut self, _current: u64, _total: u64) -> bool {
        true
    }
}

/// Remaps a stage's local progress into the `[start, end)` slice of a parent's `total`.
pub struct ProgressStage<'a> {
    parent: &'a mut dyn ProgressCallback,
    start: u64,
    end: u64,
    total: u64,
}

impl<'a> ProgressStage<'a> {
    /// Stage covering `start..end` out of `total` parent units.
    pub fn new(parent: &'a mut dyn ProgressCallback, start: u64, end: u64, total: u64) -> Self {
        Self {
            parent,
            start,
            end,
            total,
        }
    }
}

impl ProgressCallback for ProgressStage<'_> {
    fn amount_complete(&mut self, current: u64, total: u64) -> bool {
        let span = self.end.saturating_sub(self.start);
        let mapped = if total == 0 {
            self.start
        } else {
            let done = u128::from(current.min(total)) * u128::from(span) / u128::from(total);
            self.start + done as u64
        };
        self.parent.amount_complete(mapped, self.total)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/progress.rs"]
mod tests;
