/// Scoring summary shown when a session completes.
///
/// The numbers are simulated: nothing is derived from the actual answers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreReport {
    pub overall: f64,
    pub technical: u8,
    pub communication: u8,
    pub problem_solving: u8,
    pub confidence: u8,
}

impl ScoreReport {
    pub fn simulated() -> Self {
        Self {
            overall: 7.8,
            technical: 85,
            communication: 75,
            problem_solving: 80,
            confidence: 70,
        }
    }

    /// (label, percent) pairs in display order.
    pub fn metrics(&self) -> [(&'static str, u8); 4] {
        [
            ("Technical", self.technical),
            ("Communication", self.communication),
            ("Problem Solving", self.problem_solving),
            ("Confidence", self.confidence),
        ]
    }
}
