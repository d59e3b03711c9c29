//! Route metrics, savings, and fuel model types.

use serde::{Deserialize, Serialize};

/// Fuel consumption parameters used to derive fuel figures from distance.
///
/// # Examples
///
/// ```
/// use u_tour::models::FuelModel;
///
/// let fuel = FuelModel::default().with_liters_per_100km(10.0);
/// assert!((fuel.liters_for(50.0) - 5.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuelModel {
    /// Consumption in liters per 100 km.
    pub liters_per_100km: f64,
    /// Price per liter, in the caller's currency.
    pub price_per_liter: f64,
}

impl Default for FuelModel {
    fn default() -> Self {
        Self {
            liters_per_100km: 8.0,
            price_per_liter: 1.5,
        }
    }
}

impl FuelModel {
    pub fn with_liters_per_100km(mut self, liters: f64) -> Self {
        self.liters_per_100km = liters;
        self
    }

    pub fn with_price_per_liter(mut self, price: f64) -> Self {
        self.price_per_liter = price;
        self
    }

    /// Fuel burned over `km` kilometers.
    pub fn liters_for(&self, km: f64) -> f64 {
        km * self.liters_per_100km / 100.0
    }
}

/// A single driven leg within a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegMetrics {
    /// Position of the origin within the driven sequence.
    pub from: usize,
    /// Position of the destination within the driven sequence.
    pub to: usize,
    /// Leg distance in kilometers.
    pub distance_km: f64,
    /// Leg duration in minutes.
    pub duration_minutes: f64,
}

/// Coarse traffic classification derived from average speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CongestionLevel {
    /// Average speed of at least 40 km/h.
    Free,
    /// Average speed between 20 and 40 km/h.
    Moderate,
    /// Average speed below 20 km/h.
    Heavy,
    /// No driving time, speed undefined.
    Unknown,
}

impl CongestionLevel {
    /// Classifies an average speed in km/h.
    pub fn from_speed(kmh: Option<f64>) -> Self {
        match kmh {
            Some(v) if v >= 40.0 => CongestionLevel::Free,
            Some(v) if v >= 20.0 => CongestionLevel::Moderate,
            Some(_) => CongestionLevel::Heavy,
            None => CongestionLevel::Unknown,
        }
    }
}

/// Aggregate figures for one driven sequence.
///
/// Built once from its legs and never modified; a changed tour gets new
/// metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteMetrics {
    total_distance_km: f64,
    total_duration_minutes: f64,
    fuel_liters: f64,
    fuel_cost: f64,
    congestion: CongestionLevel,
    legs: Vec<LegMetrics>,
}

impl RouteMetrics {
    /// Sums the legs and derives fuel and congestion figures.
    pub fn from_legs(legs: Vec<LegMetrics>, fuel: &FuelModel) -> Self {
        let total_distance_km: f64 = legs.iter().map(|l| l.distance_km).sum();
        let total_duration_minutes: f64 = legs.iter().map(|l| l.duration_minutes).sum();
        let fuel_liters = fuel.liters_for(total_distance_km);
        let speed = average_speed(total_distance_km, total_duration_minutes);
        Self {
            total_distance_km,
            total_duration_minutes,
            fuel_liters,
            fuel_cost: fuel_liters * fuel.price_per_liter,
            congestion: CongestionLevel::from_speed(speed),
            legs,
        }
    }

    /// Metrics for a sequence with no legs.
    pub fn empty() -> Self {
        Self::from_legs(Vec::new(), &FuelModel::default())
    }

    /// Total distance in kilometers.
    pub fn total_distance_km(&self) -> f64 {
        self.total_distance_km
    }

    /// Total driving time in minutes.
    pub fn total_duration_minutes(&self) -> f64 {
        self.total_duration_minutes
    }

    /// Estimated fuel burned.
    pub fn fuel_liters(&self) -> f64 {
        self.fuel_liters
    }

    /// Estimated fuel cost.
    pub fn fuel_cost(&self) -> f64 {
        self.fuel_cost
    }

    /// Congestion class derived from average speed.
    pub fn congestion(&self) -> CongestionLevel {
        self.congestion
    }

    /// Per-leg breakdown.
    pub fn legs(&self) -> &[LegMetrics] {
        &self.legs
    }

    /// Average speed in km/h, `None` when no time was spent driving.
    pub fn average_speed_kmh(&self) -> Option<f64> {
        average_speed(self.total_distance_km, self.total_duration_minutes)
    }
}

fn average_speed(km: f64, minutes: f64) -> Option<f64> {
    if minutes > 0.0 {
        Some(km / (minutes / 60.0))
    } else {
        None
    }
}

/// Difference between a baseline route and a candidate route.
///
/// Positive values mean the candidate is better.
///
/// # Examples
///
/// ```
/// use u_tour::models::{FuelModel, LegMetrics, RouteMetrics, Savings};
///
/// let fuel = FuelModel::default();
/// let leg = |km: f64| LegMetrics { from: 0, to: 1, distance_km: km, duration_minutes: km };
/// let baseline = RouteMetrics::from_legs(vec![leg(20.0)], &fuel);
/// let candidate = RouteMetrics::from_legs(vec![leg(15.0)], &fuel);
///
/// let s = Savings::between(&baseline, &candidate);
/// assert!((s.distance_km - 5.0).abs() < 1e-10);
/// assert!((s.fuel_savings_percent - 25.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Savings {
    /// Kilometers saved.
    pub distance_km: f64,
    /// Minutes saved.
    pub duration_minutes: f64,
    /// Liters of fuel saved.
    pub fuel_liters: f64,
    /// Fuel cost saved.
    pub fuel_cost: f64,
    /// Fuel saved relative to the baseline, in percent.
    pub fuel_savings_percent: f64,
}

impl Savings {
    /// Compares two metrics results.
    pub fn between(baseline: &RouteMetrics, candidate: &RouteMetrics) -> Self {
        let fuel_liters = baseline.fuel_liters - candidate.fuel_liters;
        let fuel_savings_percent = if baseline.fuel_liters > 0.0 {
            fuel_liters / baseline.fuel_liters * 100.0
        } else {
            0.0
        };
        Self {
            distance_km: baseline.total_distance_km - candidate.total_distance_km,
            duration_minutes: baseline.total_duration_minutes - candidate.total_duration_minutes,
            fuel_liters,
            fuel_cost: baseline.fuel_cost - candidate.fuel_cost,
            fuel_savings_percent,
        }
    }
}
