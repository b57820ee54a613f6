use serde::Serialize;

/// Step counters behind the progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    /// Questions traversed so far: the active step index, or `total` at the gate.
    pub step: usize,
    pub total: usize,
    /// Questions with a stored answer.
    pub answered: usize,
}

impl Progress {
    pub fn new(step: usize, total: usize, answered: usize) -> Self {
        Self {
            step,
            total,
            answered,
        }
    }

    /// Completion percentage, clamped to `0..=100`.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        let percent = (self.step * 100) / self.total;
        percent.min(100) as u8
    }

    /// One-based "Paso k de N" label; never exceeds `N`.
    pub fn label(&self) -> String {
        format!(
            "Paso {} de {}",
            (self.step + 1).min(self.total),
            self.total
        )
    }
}
