use super::length::LengthMetric;
use super::options::Preference;

/// Fills up to `n_candidates` slots with valid names and returns the best one.
///
/// Each slot gets up to `max_attempts` calls to `generate`; the first result
/// accepted by `is_valid` fills it. A slot whose attempts are all rejected
/// contributes nothing. Returns `None` if every slot came up empty.
pub fn select<G, V>(
	n_candidates: usize,
	max_attempts: usize,
	preference: Preference,
	metric: &LengthMetric,
	mean: f64,
	mut generate: G,
	is_valid: V,
) -> Option<String>
where
	G: FnMut() -> String,
	V: Fn(&str) -> bool,
{
	let mut candidates = Vec::with_capacity(n_candidates);
	for _ in 0..n_candidates {
		if let Some(name) = (0..max_attempts).map(|_| generate()).find(|name| is_valid(name)) {
			candidates.push(name);
		}
	}
	pick_best(candidates, preference, metric, mean)
}

/// Ranks candidates by `preference` and returns the winner.
///
/// Ties keep input order. With `Preference::Avg` the score is the relative
/// deviation `|metric - mean| / |mean|`, so a negative mean (possible with a
/// custom metric) still favours the closest candidate. A zero mean has no
/// relative deviation; the metric value itself is used instead (smallest wins).
pub fn pick_best(
	candidates: Vec<String>,
	preference: Preference,
	metric: &LengthMetric,
	mean: f64,
) -> Option<String> {
	let mut scored: Vec<(f64, String)> = candidates
		.into_iter()
		.map(|name| {
			let length = metric.measure(&name);
			let score = match preference {
				Preference::Avg if mean != 0.0 => (length - mean).abs() / mean.abs(),
				_ => length,
			};
			(score, name)
		})
		.collect();

	match preference {
		Preference::Max => scored.sort_by(|a, b| b.0.total_cmp(&a.0)),
		Preference::Min | Preference::Avg => scored.sort_by(|a, b| a.0.total_cmp(&b.0)),
	}

	scored.into_iter().next().map(|(_, name)| name)
}
