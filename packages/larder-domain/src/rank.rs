use crate::substitution::MenuCandidate;

/// Orders candidates by availability tier, then relevance score ascending
/// (the backend reports a distance; lower is a better match). The sort is
/// stable, so ties keep the backend's original order.
pub fn rank(candidates: &mut [MenuCandidate]) {
	candidates.sort_by(|a, b| {
		a.availability
			.tier()
			.cmp(&b.availability.tier())
			.then_with(|| a.score.total_cmp(&b.score))
	});
}
