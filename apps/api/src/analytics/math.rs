/// Rounds to two decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `part / whole × 100`, rounded to two decimals. A zero `whole` yields 0.
pub fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    round2(part as f64 / whole as f64 * 100.0)
}

/// Mean of `total` over `count` items, rounded to two decimals. 0 when empty.
pub fn mean(total: f64, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    round2(total / count as f64)
}

/// First item with the highest `score`. A later item replaces the current
/// best only when strictly greater, so ties resolve to the earliest item.
pub fn first_max_by<I, F>(items: I, score: F) -> Option<I::Item>
where
    I: IntoIterator,
    F: Fn(&I::Item) -> f64,
{
    let mut best: Option<(I::Item, f64)> = None;
    for item in items {
        let value = score(&item);
        if best.as_ref().map_or(true, |(_, current)| value > *current) {
            best = Some((item, value));
        }
    }
    best.map(|(item, _)| item)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2_half_up() {
        assert_eq!(round2(66.666_666), 66.67);
        assert_eq!(round2(33.333_333), 33.33);
        assert_eq!(round2(12.5), 12.5);
    }

    #[test]
    fn test_percentage_zero_denominator() {
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(5, 0), 0.0);
    }

    #[test]
    fn test_percentage_rounds() {
        assert_eq!(percentage(2, 3), 66.67);
        assert_eq!(percentage(3, 4), 75.0);
    }

    #[test]
    fn test_mean_empty() {
        assert_eq!(mean(10.0, 0), 0.0);
        assert_eq!(mean(10.0, 4), 2.5);
    }

    #[test]
    fn test_first_max_by_prefers_earliest_on_ties() {
        let items = [("a", 1.0), ("b", 3.0), ("c", 3.0), ("d", 2.0)];
        assert_eq!(first_max_by(&items, |(_, v)| *v).map(|(k, _)| *k), Some("b"));
        assert_eq!(first_max_by(&items, |(_, v)| -*v).map(|(k, _)| *k), Some("a"));
    }

    #[test]
    fn test_first_max_by_empty() {
        let items: [f64; 0] = [];
        assert_eq!(first_max_by(&items, |v| **v), None);
    }
}
