// Growth-rate computation for the comparison chart
use super::chart_data::Comparison;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthResult {
    pub period_growth_pct: Option<f64>,
    pub year_growth_pct: Option<f64>,
}

impl GrowthResult {
    pub fn from_comparison(comparison: &Comparison) -> Self {
        Self {
            period_growth_pct: growth_pct(comparison.current, comparison.prior_period),
            year_growth_pct: growth_pct(comparison.current, comparison.prior_year),
        }
    }
}

/// Percentage change of `current` against `prior`, rounded to one decimal.
///
/// Only strictly positive priors produce a value: a negative prior is
/// treated the same as zero.
pub fn growth_pct(current: f64, prior: f64) -> Option<f64> {
    if prior > 0.0 {
        Some(round1((current - prior) / prior * 100.0))
    } else {
        None
    }
}

/// Ties round away from zero, so -2.25 becomes -2.3.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// "20.0" or "N/A"; callers append the percent sign
pub fn format_growth(pct: Option<f64>) -> String {
    match pct {
        Some(v) => format!("{:.1}", v),
        None => "N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comparison(values: [f64; 3]) -> Comparison {
        Comparison {
            labels: ["本期".to_string(), "上周".to_string(), "去年".to_string()],
            current: values[0],
            prior_period: values[1],
            prior_year: values[2],
        }
    }

    #[test]
    fn test_growth_against_both_priors() {
        let growth = GrowthResult::from_comparison(&comparison([120.0, 100.0, 150.0]));
        assert_eq!(growth.period_growth_pct, Some(20.0));
        assert_eq!(growth.year_growth_pct, Some(-20.0));
    }

    #[test]
    fn test_zero_prior_period_is_undefined() {
        let growth = GrowthResult::from_comparison(&comparison([50.0, 0.0, 40.0]));
        assert_eq!(growth.period_growth_pct, None);
        assert_eq!(growth.year_growth_pct, Some(25.0));
    }

    #[test]
    fn test_non_positive_prior_is_undefined() {
        for prior in [0.0, -0.5, -100.0] {
            for current in [-10.0, 0.0, 42.0] {
                assert_eq!(growth_pct(current, prior), None);
            }
        }
        let growth = GrowthResult::from_comparison(&comparison([10.0, 5.0, -5.0]));
        assert_eq!(growth.period_growth_pct, Some(100.0));
        assert_eq!(growth.year_growth_pct, None);
    }

    #[test]
    fn test_rounds_to_one_decimal() {
        // 1/3 growth
        assert_eq!(growth_pct(4.0, 3.0), Some(33.3));
        assert_eq!(growth_pct(2.0, 3.0), Some(-33.3));
        assert_eq!(round1(12.345), 12.3);
        assert_eq!(round1(-2.25), -2.3);
    }

    #[test]
    fn test_format_growth() {
        assert_eq!(format_growth(Some(20.0)), "20.0");
        assert_eq!(format_growth(Some(-20.0)), "-20.0");
        assert_eq!(format_growth(None), "N/A");
    }
}
