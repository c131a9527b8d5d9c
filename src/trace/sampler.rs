//! Sampling strategy.

/// The sampling decision strategy applied by the tracer core.
///
/// Derived from the configured sampling rate; the rate itself is accepted
/// unvalidated, so out-of-range values simply saturate into the always-on
/// or always-off variants.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Sampler {
    /// Every new trace is sampled.
    AlwaysOn,
    /// No trace is sampled.
    AlwaysOff,
    /// A new trace is sampled with the given probability.
    Probability(f64),
}

impl Sampler {
    /// Derive a sampler from a sampling rate.
    pub fn from_rate(rate: f64) -> Sampler {
        if rate >= 1.0 {
            Sampler::AlwaysOn
        } else if rate <= 0.0 {
            Sampler::AlwaysOff
        } else {
            Sampler::Probability(rate)
        }
    }
}

impl Default for Sampler {
    fn default() -> Self {
        Sampler::AlwaysOn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_maps_onto_variants() {
        assert_eq!(Sampler::from_rate(1.0), Sampler::AlwaysOn);
        assert_eq!(Sampler::from_rate(0.0), Sampler::AlwaysOff);
        assert_eq!(Sampler::from_rate(0.25), Sampler::Probability(0.25));
    }

    #[test]
    fn out_of_range_rates_saturate() {
        assert_eq!(Sampler::from_rate(1.5), Sampler::AlwaysOn);
        assert_eq!(Sampler::from_rate(-3.0), Sampler::AlwaysOff);
    }
}
