//! Ambient temperature compensation for heat coming off the host board.

use heapless::Deque;

/// Empirical divisor for the CPU/ambient temperature gap.
pub const COMPENSATION_FACTOR: f64 = 2.25;

/// Number of CPU samples averaged by [`CpuSmoother`].
pub const CPU_SMOOTHING_WINDOW: usize = 5;

/// Correct a raw ambient temperature for self-heating.
///
/// `raw - ((cpu - raw) / factor)`
pub fn compensate(raw_temperature: f64, cpu_temperature: f64, factor: f64) -> f64 {
    raw_temperature - ((cpu_temperature - raw_temperature) / factor)
}

/// Rolling average over the last [`CPU_SMOOTHING_WINDOW`] CPU temperatures.
#[derive(Debug, Clone, Default)]
pub struct CpuSmoother {
    samples: Deque<f64, CPU_SMOOTHING_WINDOW>,
}

impl CpuSmoother {
    pub fn new() -> Self {
        Self {
            samples: Deque::new(),
        }
    }

    /// Fill the whole window with one sample.
    pub fn prime(&mut self, sample: f64) {
        self.samples.clear();
        while !self.samples.is_full() {
            self.samples.push_back(sample).ok();
        }
    }

    /// Push a sample, dropping the oldest once the window is full, and return
    /// the current average.
    ///
    /// An unprimed smoother primes itself with the first sample.
    pub fn push(&mut self, sample: f64) -> f64 {
        if self.samples.is_empty() {
            self.prime(sample);
            return sample;
        }
        if self.samples.is_full() {
            self.samples.pop_front();
        }
        self.samples.push_back(sample).ok();
        self.average()
    }

    pub fn average(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().sum::<f64>() / self.samples.len() as f64
    }

    pub fn is_primed(&self) -> bool {
        !self.samples.is_empty()
    }
}

/// How a raw CPU temperature is turned into the value used for compensation.
#[derive(Debug, Clone)]
pub enum CpuFilter {
    /// Use every reading as-is (logger)
    Raw,
    /// Rolling average (display)
    Smoothed(CpuSmoother),
}

impl CpuFilter {
    pub fn apply(&mut self, cpu_temperature: f64) -> f64 {
        match self {
            Self::Raw => cpu_temperature,
            Self::Smoothed(smoother) => smoother.push(cpu_temperature),
        }
    }

    /// Seed the window before the first cycle. No-op for [`CpuFilter::Raw`].
    pub fn prime(&mut self, cpu_temperature: f64) {
        if let Self::Smoothed(smoother) = self {
            smoother.prime(cpu_temperature);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compensate_example() {
        let corrected = compensate(20.0, 45.0, COMPENSATION_FACTOR);
        assert_eq!(corrected, 20.0 - ((45.0 - 20.0) / 2.25));
        assert!((corrected - 8.888_888_888_888_89).abs() < 1e-12);
    }

    #[test]
    fn test_compensate_matches_closed_form() {
        let raws = [-10.0, 0.0, 12.5, 21.3, 39.9];
        let cpus = [30.0, 45.0, 52.25, 70.0, 10.0];
        for raw in raws {
            for cpu in cpus {
                assert_eq!(
                    compensate(raw, cpu, COMPENSATION_FACTOR),
                    raw - ((cpu - raw) / COMPENSATION_FACTOR)
                );
            }
        }
    }

    #[test]
    fn test_equal_temperatures_need_no_correction() {
        assert_eq!(compensate(25.0, 25.0, COMPENSATION_FACTOR), 25.0);
    }

    #[test]
    fn test_smoother_primes_and_rolls() {
        let mut smoother = CpuSmoother::new();
        smoother.prime(50.0);
        assert_eq!(smoother.average(), 50.0);

        // [50, 50, 50, 50, 60]
        assert_eq!(smoother.push(60.0), 52.0);
        // [50, 50, 50, 60, 70]
        assert_eq!(smoother.push(70.0), 56.0);

        for _ in 0..CPU_SMOOTHING_WINDOW {
            smoother.push(40.0);
        }
        assert_eq!(smoother.average(), 40.0);
    }

    #[test]
    fn test_unprimed_smoother_uses_first_sample() {
        let mut smoother = CpuSmoother::new();
        assert!(!smoother.is_primed());
        assert_eq!(smoother.push(42.0), 42.0);
        assert!(smoother.is_primed());
    }

    #[test]
    fn test_raw_filter_passes_through() {
        let mut filter = CpuFilter::Raw;
        filter.prime(90.0);
        assert_eq!(filter.apply(45.0), 45.0);
        assert_eq!(filter.apply(60.0), 60.0);
    }
}
