pub struct StatsHelper;

impl StatsHelper {
    /// Count ratio that reads as 0.0 when the denominator is empty.
    pub fn rate(numerator: usize, denominator: usize) -> f64 {
        if denominator == 0 {
            return 0.0;
        }
        numerator as f64 / denominator as f64
    }

    /// Trapezoidal area over `(x, y)` pairs taken in the given order.
    pub fn trapezoid<I>(points: I) -> f64
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let mut iter = points.into_iter();
        let Some(mut previous) = iter.next() else {
            return 0.0;
        };
        let mut area = 0.0;
        for current in iter {
            area += (current.0 - previous.0).abs() * (current.1 + previous.1) / 2.0;
            previous = current;
        }
        area
    }

    pub fn mean(values: &[f64]) -> f64 {
        if values.is_empty() {
            return 0.0;
        }
        values.iter().sum::<f64>() / values.len() as f64
    }

    /// Sample standard deviation; 0.0 for fewer than two values or a constant run.
    pub fn std_dev(values: &[f64]) -> f64 {
        if values.len() < 2 || values.iter().all(|&v| v == values[0]) {
            return 0.0;
        }
        let mean = Self::mean(values);
        let sum_sq: f64 = values.iter().map(|&v| (v - mean) * (v - mean)).sum();
        (sum_sq / (values.len() - 1) as f64).sqrt()
    }
}
