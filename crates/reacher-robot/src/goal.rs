//! The four fixed target locations.

/// Half-width of the goal square. Gives roughly 10° per link at the goal.
pub const TARG_LIMIT: f64 = 0.116;

/// Goal positions, clockwise from north-east.
pub const GOAL_POSITIONS: [[f64; 2]; 4] = [
    [TARG_LIMIT, TARG_LIMIT],
    [TARG_LIMIT, -TARG_LIMIT],
    [-TARG_LIMIT, -TARG_LIMIT],
    [-TARG_LIMIT, TARG_LIMIT],
];

/// Quadrant a goal lies in, in the same order as [`GOAL_POSITIONS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GoalQuadrant {
    NorthEast,
    SouthEast,
    SouthWest,
    NorthWest,
}

impl GoalQuadrant {
    pub const ALL: [Self; 4] = [
        Self::NorthEast,
        Self::SouthEast,
        Self::SouthWest,
        Self::NorthWest,
    ];

    /// Quadrant for an index into [`GOAL_POSITIONS`]. `None` when out of range.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::NorthEast),
            1 => Some(Self::SouthEast),
            2 => Some(Self::SouthWest),
            3 => Some(Self::NorthWest),
            _ => None,
        }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Goal `(x, y)` for this quadrant.
    #[must_use]
    pub const fn position(self) -> [f64; 2] {
        GOAL_POSITIONS[self.index()]
    }
}
