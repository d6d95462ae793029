use Bound::{Above, AtLeast, Exactly};

/// Threshold test for one rubric step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    AtLeast(f64),
    Above(f64),
    Exactly(f64),
}

impl Bound {
    pub fn matches(&self, value: f64) -> bool {
        match self {
            Bound::AtLeast(n) => value >= *n,
            Bound::Above(n) => value > *n,
            Bound::Exactly(n) => value == *n,
        }
    }
}

/// An ordered step-function: steps are tried top-down and the first match
/// wins. Values matching no step score 0.
#[derive(Debug, Clone, Copy)]
pub struct Rubric {
    pub steps: &'static [(Bound, u8)],
}

impl Rubric {
    pub const fn new(steps: &'static [(Bound, u8)]) -> Self {
        Self { steps }
    }

    /// Score a value. NaN matches nothing and scores 0.
    pub fn evaluate(&self, value: f64) -> u8 {
        self.matched_step(value).map(|(_, score)| score).unwrap_or(0)
    }

    /// The step a value falls into, if any.
    pub fn matched_step(&self, value: f64) -> Option<(Bound, u8)> {
        self.steps
            .iter()
            .find(|(bound, _)| bound.matches(value))
            .copied()
    }

    /// Every score this rubric can produce, including the fallback 0.
    #[cfg(test)]
    pub fn possible_scores(&self) -> Vec<u8> {
        let mut scores: Vec<u8> = self.steps.iter().map(|(_, s)| *s).collect();
        scores.push(0);
        scores.sort_unstable();
        scores.dedup();
        scores
    }
}

/// Distinct top-VC matches.
pub const VC_RUBRIC: Rubric = Rubric::new(&[
    (AtLeast(5.0), 10),
    (AtLeast(3.0), 8),
    (Exactly(2.0), 5),
    (Exactly(1.0), 3),
]);

/// Last Known Valuation.
pub const VALUATION_RUBRIC: Rubric = Rubric::new(&[
    (AtLeast(10000.0), 10),
    (AtLeast(5000.0), 9),
    (AtLeast(1000.0), 8),
    (Above(900.0), 5),
    (Above(800.0), 4),
    (Above(700.0), 3),
    (Above(500.0), 2),
    (AtLeast(250.0), 1),
]);

/// Total Raised.
pub const RAISED_RUBRIC: Rubric = Rubric::new(&[
    (AtLeast(1000.0), 10),
    (Above(500.0), 8),
    (Above(300.0), 6),
    (Above(200.0), 4),
    (Above(100.0), 2),
    (AtLeast(50.0), 1),
]);

/// Headcount growth for companies at least four years old.
pub const MATURE_GROWTH_RUBRIC: Rubric = Rubric::new(&[
    (AtLeast(1000.0), 10),
    (Above(900.0), 9),
    (Above(800.0), 8),
    (Above(700.0), 7),
    (Above(600.0), 6),
    (Above(500.0), 5),
    (Above(400.0), 4),
    (Above(300.0), 3),
    (Above(0.0), 1),
]);

/// Headcount growth for companies younger than four years.
pub const YOUNG_GROWTH_RUBRIC: Rubric = Rubric::new(&[
    (Above(200.0), 10),
    (Above(100.0), 6),
    (Above(50.0), 3),
]);
