use std::cmp::Reverse;

use super::AnalysisOutcome;

/// Orders outcomes by relevance score, highest first.
///
/// `sort_by_key` is stable, so outcomes with equal scores keep the order
/// they were handed in.
pub fn rank_outcomes(mut outcomes: Vec<AnalysisOutcome>) -> Vec<AnalysisOutcome> {
    outcomes.sort_by_key(|o| Reverse(o.relevance_score));
    outcomes
}
