//! Fresh-label allocation for control-flow targets.

/// Issues unique symbolic labels (`L0`, `L1`, ...).
///
/// State is explicit per generator instance: [`reset`](Self::reset)
/// restarts the counter at the top of each generation run, and a name is
/// never reused within one run, so nested and sequential control
/// structures cannot collide.
#[derive(Debug, Default)]
pub struct LabelAllocator {
    next: u32,
}

impl LabelAllocator {
    /// Create an allocator starting at `L0`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a label name never handed out before on this allocator.
    pub fn fresh(&mut self) -> String {
        let name = format!("L{}", self.next);
        self.next += 1;
        name
    }

    /// Restart the counter. Only valid between generation runs.
    pub fn reset(&mut self) {
        self.next = 0;
    }
}
