use aqmap_structs::Point;

/// Why the drone could not get where it was going.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum FlightError {
    /// Every move in the budget has been used.
    #[error("out of moves, all {budget} used")]
    BudgetExhausted { budget: u32 },

    /// The goal lies outside the area the drone is allowed to fly in.
    #[error("goal {goal} is outside the operating area")]
    GoalOutOfBounds { goal: Point },

    #[error("start {start} is outside the operating area")]
    StartOutOfBounds { start: Point },

    /// Sweeping the heading found no step that stays inside the area and
    /// clear of every no-fly zone.
    #[error("no legal heading from {from} after {attempts} rotations")]
    NoLegalHeading { from: Point, attempts: u32 },
}

impl FlightError {
    pub fn is_budget_exhausted(&self) -> bool {
        matches!(self, Self::BudgetExhausted { .. })
    }

    /// The goal can never be reached, whatever the budget.
    pub fn is_unreachable(&self) -> bool {
        matches!(
            self,
            Self::GoalOutOfBounds { .. } | Self::StartOutOfBounds { .. } | Self::NoLegalHeading { .. }
        )
    }
}
