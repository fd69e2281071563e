/// Caps provider round trips for a single conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnBudget {
    max: usize,
    used: usize,
}

impl TurnBudget {
    pub fn new(max: usize) -> Self {
        Self { max, used: 0 }
    }

    /// Takes one round trip from the budget, or returns false if none remain.
    pub fn try_consume(&mut self) -> bool {
        if self.used >= self.max {
            return false;
        }
        self.used += 1;
        true
    }

    pub fn used(&self) -> usize {
        self.used
    }

    pub fn max(&self) -> usize {
        self.max
    }
}
