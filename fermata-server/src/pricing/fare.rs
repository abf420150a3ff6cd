//! Fare arithmetic.

use serde::Serialize;

/// Rates and limits used by [`FareCalculator`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricingConfig {
    pub currency: String,
    pub base_fare: f64,
    pub per_km_rate: f64,
    pub per_minute_rate: f64,
    pub minimum_fare: f64,
    pub maximum_fare: f64,
    pub night_multiplier: f64,
    pub peak_hour_multiplier: f64,
    /// Distance above which the discount applies, in km.
    pub long_distance_threshold_km: f64,
    pub long_distance_discount: f64,
    /// Fares are rounded to a multiple of this.
    pub rounding_step: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            currency: "ETB".to_string(),
            base_fare: 25.0,
            per_km_rate: 12.0,
            per_minute_rate: 0.5,
            minimum_fare: 30.0,
            maximum_fare: 500.0,
            night_multiplier: 1.3,
            peak_hour_multiplier: 1.2,
            long_distance_threshold_km: 20.0,
            long_distance_discount: 0.9,
            rounding_step: 5.0,
        }
    }
}

/// Which adjustments were applied to a fare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AppliedMultipliers {
    pub night: bool,
    pub peak_hour: bool,
    pub long_distance_discount: bool,
}

/// A computed fare with its components.
///
/// The component fields are before discount, surcharges, clamping and
/// rounding; only `total_fare` reflects them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FareBreakdown {
    pub total_fare: f64,
    pub currency: String,
    pub base_fare: f64,
    pub distance_fare: f64,
    pub time_fare: f64,
    pub distance_km: f64,
    pub time_minutes: f64,
    pub multipliers: AppliedMultipliers,
}

/// Cheapest and dearest fare for a trip over all surcharge combinations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FareRange {
    pub minimum: f64,
    pub maximum: f64,
    pub average: f64,
    pub currency: String,
    pub distance_km: f64,
    pub time_minutes: f64,
}

/// Pure fare calculator over a [`PricingConfig`].
#[derive(Debug, Clone, Default)]
pub struct FareCalculator {
    config: PricingConfig,
}

impl FareCalculator {
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Fare for a trip of `distance_meters` taking `time_seconds`.
    ///
    /// Inputs are expected to be non-negative and finite.
    ///
    /// ```
    /// use fermata_server::pricing::FareCalculator;
    ///
    /// let fare = FareCalculator::default().calculate_fare(8500.0, 900.0, false, false);
    /// assert_eq!(fare.distance_fare, 102.0);
    /// assert_eq!(fare.time_fare, 7.5);
    /// assert_eq!(fare.total_fare, 135.0);
    /// ```
    pub fn calculate_fare(
        &self,
        distance_meters: f64,
        time_seconds: f64,
        is_night: bool,
        is_peak_hour: bool,
    ) -> FareBreakdown {
        let c = &self.config;
        let distance_km = distance_meters / 1000.0;
        let time_minutes = time_seconds / 60.0;

        let distance_fare = distance_km * c.per_km_rate;
        let time_fare = time_minutes * c.per_minute_rate;
        let mut fare = c.base_fare + distance_fare + time_fare;

        let long_distance = distance_km > c.long_distance_threshold_km;
        if long_distance {
            fare *= c.long_distance_discount;
        }

        let mut multiplier = 1.0;
        if is_night {
            multiplier *= c.night_multiplier;
        }
        if is_peak_hour {
            multiplier *= c.peak_hour_multiplier;
        }

        let fare = (fare * multiplier).clamp(c.minimum_fare, c.maximum_fare);

        FareBreakdown {
            total_fare: self.round(fare),
            currency: c.currency.clone(),
            base_fare: c.base_fare,
            distance_fare,
            time_fare,
            distance_km,
            time_minutes,
            multipliers: AppliedMultipliers {
                night: is_night,
                peak_hour: is_peak_hour,
                long_distance_discount: long_distance,
            },
        }
    }

    /// Fare range from no surcharge to night and peak together.
    pub fn estimate_fare_range(&self, distance_meters: f64, time_seconds: f64) -> FareRange {
        let low = self.calculate_fare(distance_meters, time_seconds, false, false);
        let high = self.calculate_fare(distance_meters, time_seconds, true, true);

        FareRange {
            minimum: low.total_fare,
            maximum: high.total_fare,
            average: (low.total_fare + high.total_fare) / 2.0,
            currency: low.currency,
            distance_km: low.distance_km,
            time_minutes: low.time_minutes,
        }
    }

    /// Nearest multiple of the rounding step; halfway cases go to the even
    /// multiple.
    fn round(&self, fare: f64) -> f64 {
        let step = self.config.rounding_step;
        (fare / step).round_ties_even() * step
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn fare_is_a_multiple_of_five_within_limits(
            distance in 0.0f64..200_000.0,
            time in 0.0f64..20_000.0,
            night in any::<bool>(),
            peak in any::<bool>(),
        ) {
            let fare = FareCalculator::default().calculate_fare(distance, time, night, peak);
            prop_assert_eq!(fare.total_fare % 5.0, 0.0);
            prop_assert!((30.0..=500.0).contains(&fare.total_fare));
        }

        /// Non-decreasing in distance on either side of the discount threshold.
        #[test]
        fn fare_grows_with_distance(
            a in 0.0f64..40_000.0,
            b in 0.0f64..40_000.0,
            time in 0.0f64..5_000.0,
            night in any::<bool>(),
            peak in any::<bool>(),
        ) {
            let (short, long) = if a <= b { (a, b) } else { (b, a) };
            prop_assume!((short > 20_000.0) == (long > 20_000.0));

            let calc = FareCalculator::default();
            let short_fare = calc.calculate_fare(short, time, night, peak).total_fare;
            let long_fare = calc.calculate_fare(long, time, night, peak).total_fare;
            prop_assert!(short_fare <= long_fare);
        }

        #[test]
        fn range_is_ordered(distance in 0.0f64..100_000.0, time in 0.0f64..10_000.0) {
            let range = FareCalculator::default().estimate_fare_range(distance, time);
            prop_assert!(range.minimum <= range.average);
            prop_assert!(range.average <= range.maximum);
        }
    }
}
