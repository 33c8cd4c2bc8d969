use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Units used on screen. The API always answers in metric.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    pub fn temperature(self, celsius: f64) -> f64 {
        match self {
            Units::Metric => celsius,
            Units::Imperial => temperature::c2f(celsius),
        }
    }

    pub fn speed(self, kph: f64) -> f64 {
        match self {
            Units::Metric => kph,
            Units::Imperial => speed::kph2mph(kph),
        }
    }

    pub fn precipitation(self, mm: f64) -> f64 {
        match self {
            Units::Metric => mm,
            Units::Imperial => mm / 25.4,
        }
    }

    pub fn temperature_unit(self) -> &'static str {
        match self {
            Units::Metric => "°C",
            Units::Imperial => "°F",
        }
    }

    pub fn speed_unit(self) -> &'static str {
        match self {
            Units::Metric => "km/h",
            Units::Imperial => "mph",
        }
    }

    pub fn precipitation_unit(self) -> &'static str {
        match self {
            Units::Metric => "mm",
            Units::Imperial => "in",
        }
    }
}

pub mod temperature {
    pub fn c2f(temp_c: f64) -> f64 {
        temp_c * 9.0 / 5.0 + 32.0
    }

    #[test]
    fn test_temperature() {
        assert_eq!(c2f(0.0), 32.0);
        assert_eq!(c2f(100.0), 212.0);
        assert_eq!(c2f(-40.0), -40.0);
    }
}

pub mod speed {
    const MILES_PER_KM: f64 = 0.621371;

    pub fn kph2mph(kph: f64) -> f64 {
        kph * MILES_PER_KM
    }

    #[test]
    fn test_speed() {
        assert!((kph2mph(100.0) - 62.1371).abs() < 1e-9);
        assert_eq!(kph2mph(0.0), 0.0);
    }
}

pub mod direction {
    const COMPASS: [&str; 16] = [
        "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW",
        "NW", "NNW",
    ];

    pub fn degree_to_compass(deg: f64) -> &'static str {
        let deg = deg.rem_euclid(360.0);
        let idx = (deg / 22.5 + 0.5) as usize % 16;
        COMPASS[idx]
    }

    #[test]
    fn test_degree_to_compass() {
        assert_eq!(degree_to_compass(0.0), "N");
        assert_eq!(degree_to_compass(90.0), "E");
        assert_eq!(degree_to_compass(180.0), "S");
        assert_eq!(degree_to_compass(225.0), "SW");
        assert_eq!(degree_to_compass(270.0), "W");
        assert_eq!(degree_to_compass(359.0), "N");
        assert_eq!(degree_to_compass(360.0), "N");
        assert_eq!(degree_to_compass(-90.0), "W");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_passes_values_through() {
        assert_eq!(Units::Metric.temperature(21.5), 21.5);
        assert_eq!(Units::Metric.speed(12.0), 12.0);
        assert_eq!(Units::Metric.precipitation(3.0), 3.0);
        assert_eq!(Units::Metric.temperature_unit(), "°C");
    }

    #[test]
    fn imperial_converts() {
        assert_eq!(Units::Imperial.temperature(100.0), 212.0);
        assert!((Units::Imperial.precipitation(25.4) - 1.0).abs() < 1e-9);
        assert_eq!(Units::Imperial.speed_unit(), "mph");
    }
}
