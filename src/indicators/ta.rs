//! Streaming rolling/expanding primitives used by the enrichment pass.
//!
//! Each indicator consumes one value per row and yields the windowed
//! aggregate, or NaN while the window is not yet full. A NaN input keeps
//! the output NaN until it leaves the window, which gives the derived
//! columns their leading undefined region for free.

/// The `Next` trait is used for indicators that produce a single value
pub trait Next<T> {
    type Output;
    fn next(&mut self, input: T) -> Self::Output;
}

/// Simple Moving Average over a trailing window
pub struct SimpleMovingAverage {
    period: usize,
    values: Vec<f64>,
}

impl SimpleMovingAverage {
    pub fn new(period: usize) -> anyhow::Result<Self> {
        if period == 0 {
            return Err(anyhow::anyhow!("Period must be greater than 0"));
        }

        Ok(Self {
            period,
            values: Vec::with_capacity(period),
        })
    }
}

impl Next<f64> for SimpleMovingAverage {
    type Output = f64;

    fn next(&mut self, input: f64) -> Self::Output {
        if self.values.len() >= self.period {
            self.values.remove(0);
        }

        self.values.push(input);

        if self.values.len() < self.period {
            return f64::NAN;
        }

        self.values.iter().sum::<f64>() / self.period as f64
    }
}

/// Sample standard deviation over a trailing window
pub struct RollingStdDev {
    period: usize,
    values: Vec<f64>,
}

impl RollingStdDev {
    pub fn new(period: usize) -> anyhow::Result<Self> {
        if period < 2 {
            return Err(anyhow::anyhow!("Period must be at least 2"));
        }

        Ok(Self {
            period,
            values: Vec::with_capacity(period),
        })
    }
}

impl Next<f64> for RollingStdDev {
    type Output = f64;

    fn next(&mut self, input: f64) -> Self::Output {
        if self.values.len() >= self.period {
            self.values.remove(0);
        }

        self.values.push(input);

        if self.values.len() < self.period {
            return f64::NAN;
        }

        let mean = self.values.iter().sum::<f64>() / self.period as f64;
        let variance = self
            .values
            .iter()
            .map(|v| (v - mean).powi(2))
            .sum::<f64>()
            / (self.period - 1) as f64;

        variance.sqrt()
    }
}

/// Expanding maximum from the first input through the current row
pub struct RunningMaximum {
    max: f64,
}

impl RunningMaximum {
    pub fn new() -> Self {
        Self { max: f64::NAN }
    }
}

impl Default for RunningMaximum {
    fn default() -> Self {
        Self::new()
    }
}

impl Next<f64> for RunningMaximum {
    type Output = f64;

    fn next(&mut self, input: f64) -> Self::Output {
        if self.max.is_nan() || input > self.max {
            self.max = input;
        }
        self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sma_warms_up_then_averages() {
        let mut sma = SimpleMovingAverage::new(3).unwrap();
        assert!(sma.next(1.0).is_nan());
        assert!(sma.next(2.0).is_nan());
        assert!((sma.next(3.0) - 2.0).abs() < 1e-12);
        assert!((sma.next(6.0) - 11.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_sma_rejects_zero_period() {
        assert!(SimpleMovingAverage::new(0).is_err());
    }

    #[test]
    fn test_rolling_std_is_sample_std() {
        let mut std = RollingStdDev::new(3).unwrap();
        std.next(2.0);
        std.next(4.0);
        // sample std of [2, 4, 6] = 2
        assert!((std.next(6.0) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_rolling_std_propagates_nan_through_window() {
        let mut std = RollingStdDev::new(2).unwrap();
        std.next(f64::NAN);
        assert!(std.next(1.0).is_nan()); // window still holds the NaN
        assert!(!std.next(2.0).is_nan()); // NaN has left the window
    }

    #[test]
    fn test_running_maximum_is_non_decreasing() {
        let mut max = RunningMaximum::new();
        let inputs = [100.0, 105.0, 95.0, 110.0];
        let outputs: Vec<f64> = inputs.iter().map(|&v| max.next(v)).collect();
        assert_eq!(outputs, vec![100.0, 105.0, 105.0, 110.0]);
    }
}
