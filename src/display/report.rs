//! Report formatting helpers

use crate::models::Money;

/// Number of cells in a budget progress bar
pub const BAR_WIDTH: usize = 10;

const FILLED: char = '█';
const EMPTY: char = '░';

/// Number of filled cells for `spent` against `limit`
///
/// `floor(min(spent / limit, 1) * BAR_WIDTH)`, with a zero or negative
/// limit counting as nothing spent. Never exceeds `BAR_WIDTH`.
pub fn filled_cells(spent: Money, limit: Money) -> usize {
    if limit.cents() <= 0 || spent.cents() <= 0 {
        return 0;
    }
    let filled = i128::from(spent.cents()) * BAR_WIDTH as i128 / i128::from(limit.cents());
    filled.min(BAR_WIDTH as i128) as usize
}

/// Render a fixed-width text progress bar
pub fn progress_bar(spent: Money, limit: Money) -> String {
    let filled = filled_cells(spent, limit);
    let mut bar = String::with_capacity(BAR_WIDTH * FILLED.len_utf8());
    bar.extend(std::iter::repeat(FILLED).take(filled));
    bar.extend(std::iter::repeat(EMPTY).take(BAR_WIDTH - filled));
    bar
}

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct < 0.1 && pct > 0.0 {
        format!("{:.2}%", pct)
    } else if pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(bar: &str, c: char) -> usize {
        bar.chars().filter(|x| *x == c).count()
    }

    #[test]
    fn test_half_spent() {
        let bar = progress_bar(Money::from_units(50), Money::from_units(100));
        assert_eq!(bar, "█████░░░░░");
    }

    #[test]
    fn test_zero_limit_is_empty_bar() {
        let bar = progress_bar(Money::zero(), Money::zero());
        assert_eq!(count(&bar, '█'), 0);
        assert_eq!(count(&bar, '░'), 10);

        let bar = progress_bar(Money::from_units(30), Money::zero());
        assert_eq!(count(&bar, '█'), 0);
    }

    #[test]
    fn test_overspent_caps_at_full() {
        let bar = progress_bar(Money::from_units(500), Money::from_units(100));
        assert_eq!(bar, "██████████");
    }

    #[test]
    fn test_floors_partial_cells() {
        // 19/20 = 0.95 -> 9 cells
        assert_eq!(filled_cells(Money::from_units(19), Money::from_units(20)), 9);
        // 0.099 -> 0 cells
        assert_eq!(filled_cells(Money::from_cents(99), Money::from_units(10)), 0);
    }

    #[test]
    fn test_negative_values_never_overflow_width() {
        let bar = progress_bar(Money::from_units(-5), Money::from_units(100));
        assert_eq!(bar.chars().count(), BAR_WIDTH);
        let bar = progress_bar(Money::from_units(5), Money::from_units(-100));
        assert_eq!(bar.chars().count(), BAR_WIDTH);
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.05), "0.05%");
        assert_eq!(format_percentage(5.5), "5.5%");
        assert_eq!(format_percentage(50.0), "50%");
    }
}
