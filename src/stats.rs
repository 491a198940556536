//! Trend and anomaly helpers for the chart modules.

/// Least-squares fit of `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Regression {
    pub slope: f64,
    pub intercept: f64,
}

impl Regression {
    pub fn at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fits a regression line, or `None` when the x values carry no spread.
pub fn linear_regression(xs: &[f64], ys: &[f64]) -> Option<Regression> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }

    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let mut covariance = 0.0;
    let mut variance = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        covariance += (x - mean_x) * (y - mean_y);
        variance += (x - mean_x) * (x - mean_x);
    }

    if variance == 0.0 {
        return None;
    }

    let slope = covariance / variance;
    Some(Regression {
        slope,
        intercept: mean_y - slope * mean_x,
    })
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation.
pub fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let sum_sq: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    (sum_sq / (values.len() - 1) as f64).sqrt()
}

/// Flags values further than two standard deviations from the mean.
pub fn anomalies(values: &[f64]) -> Vec<bool> {
    let m = mean(values);
    let threshold = 2.0 * std_dev(values);
    values.iter().map(|v| (v - m).abs() > threshold).collect()
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_fit_exact_line() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let ys = [3.0, 5.0, 7.0, 9.0];

        let fit = linear_regression(&xs, &ys).unwrap();

        assert!((fit.slope - 2.0).abs() < 1e-12);
        assert!((fit.intercept - 1.0).abs() < 1e-12);
        assert!((fit.at(5.0) - 11.0).abs() < 1e-12);
    }

    #[test]
    fn should_refuse_degenerate_input() {
        assert!(linear_regression(&[1.0], &[2.0]).is_none());
        assert!(linear_regression(&[2.0, 2.0], &[1.0, 3.0]).is_none());
        assert!(linear_regression(&[1.0, 2.0], &[1.0]).is_none());
    }

    #[test]
    fn should_compute_sample_std_dev() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];

        assert!((mean(&values) - 5.0).abs() < 1e-12);
        assert!((std_dev(&values) - 2.138089935299395).abs() < 1e-12);
    }

    #[test]
    fn should_flag_only_outliers() {
        let mut values = vec![10.0; 20];
        values.push(11.0);
        values.push(100.0);

        let flags = anomalies(&values);

        assert!(flags[21]);
        assert!(!flags[20]);
        assert_eq!(flags.iter().filter(|&&f| f).count(), 1);
    }
}
