use serde::Deserialize;

pub const MISSING: &str = "--";

/// Number of hourly entries shown on screen.
pub const HOURLY_ROWS: usize = 12;

/// A city name ready to be sent: trimmed and never blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherQuery(String);

impl WeatherQuery {
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn city(&self) -> &str {
        &self.0
    }
}

/// Payload returned by the weather endpoint.
///
/// Nothing is validated: every field may be absent and the display simply
/// leaves out what is not there.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct WeatherResult {
    pub current: Option<Current>,
    pub hourly: Option<Hourly>,
    pub daily: Option<Daily>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct Current {
    pub temperature_2m: Option<f64>,
    pub wind_speed_10m: Option<f64>,
    pub wind_direction_10m: Option<f64>,
    pub rain: Option<f64>,
    pub cloud_cover: Option<f64>,
    pub weathercode: Option<i64>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct Hourly {
    pub time: Vec<String>,
    pub temperature_2m: Vec<Option<f64>>,
    pub wind_speed_10m: Vec<Option<f64>>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct Daily {
    pub time: Vec<String>,
    pub temperature_2m_min: Vec<Option<f64>>,
    pub temperature_2m_max: Vec<Option<f64>>,
    pub sunrise: Vec<String>,
    pub sunset: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HourlyRow<'a> {
    pub time: &'a str,
    pub temperature: Option<f64>,
    pub wind_speed: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyRow<'a> {
    pub date: &'a str,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub sunrise: Option<&'a str>,
    pub sunset: Option<&'a str>,
}

/// Min/max temperature series for the trend chart, x being the day index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrendSeries<'a> {
    pub labels: Vec<&'a str>,
    pub min: Vec<(f64, f64)>,
    pub max: Vec<(f64, f64)>,
}

impl TrendSeries<'_> {
    pub fn is_empty(&self) -> bool {
        self.min.is_empty() && self.max.is_empty()
    }

    /// Lowest and highest temperature across both series.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        self.min
            .iter()
            .chain(self.max.iter())
            .map(|&(_, y)| y)
            .fold(None, |acc, y| match acc {
                None => Some((y, y)),
                Some((lo, hi)) => Some((lo.min(y), hi.max(y))),
            })
    }
}

impl WeatherResult {
    pub fn weather_code(&self) -> Option<i64> {
        self.current.as_ref().and_then(|c| c.weathercode)
    }

    pub fn temperature(&self) -> Option<f64> {
        self.current.as_ref().and_then(|c| c.temperature_2m)
    }

    pub fn sunrise_today(&self) -> Option<&str> {
        self.daily
            .as_ref()
            .and_then(|d| d.sunrise.first())
            .map(|s| time_of_day(s))
    }

    pub fn sunset_today(&self) -> Option<&str> {
        self.daily
            .as_ref()
            .and_then(|d| d.sunset.first())
            .map(|s| time_of_day(s))
    }

    /// The first [`HOURLY_ROWS`] index-aligned (time, temperature, wind) triples.
    pub fn hourly_rows(&self) -> Vec<HourlyRow<'_>> {
        let Some(hourly) = &self.hourly else {
            return Vec::new();
        };
        hourly
            .time
            .iter()
            .take(HOURLY_ROWS)
            .enumerate()
            .map(|(i, t)| HourlyRow {
                time: time_of_day(t),
                temperature: hourly.temperature_2m.get(i).copied().flatten(),
                wind_speed: hourly.wind_speed_10m.get(i).copied().flatten(),
            })
            .collect()
    }

    pub fn daily_rows(&self) -> Vec<DailyRow<'_>> {
        let Some(daily) = &self.daily else {
            return Vec::new();
        };
        daily
            .time
            .iter()
            .enumerate()
            .map(|(i, d)| DailyRow {
                date: d,
                min: daily.temperature_2m_min.get(i).copied().flatten(),
                max: daily.temperature_2m_max.get(i).copied().flatten(),
                sunrise: daily.sunrise.get(i).map(|s| time_of_day(s)),
                sunset: daily.sunset.get(i).map(|s| time_of_day(s)),
            })
            .collect()
    }

    pub fn trend(&self) -> TrendSeries<'_> {
        let mut series = TrendSeries::default();
        for (i, row) in self.daily_rows().into_iter().enumerate() {
            let x = i as f64;
            series.labels.push(row.date);
            if let Some(min) = row.min {
                series.min.push((x, min));
            }
            if let Some(max) = row.max {
                series.max.push((x, max));
            }
        }
        series
    }
}

/// `2024-01-15T07:15` -> `07:15`. Strings without a `T` are returned as-is.
pub fn time_of_day(timestamp: &str) -> &str {
    timestamp
        .split_once('T')
        .map(|(_, time)| time)
        .unwrap_or(timestamp)
}

/// Lookup lifecycle. Exactly one variant is active at a time.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestState {
    #[default]
    Idle,
    Loading,
    Success(WeatherResult),
    Failed(String),
}

impl RequestState {
    pub fn data(&self) -> Option<&WeatherResult> {
        match self {
            RequestState::Success(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            RequestState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(json: serde_json::Value) -> WeatherResult {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn query_is_trimmed() {
        let q = WeatherQuery::parse("  Paris \n").unwrap();
        assert_eq!(q.city(), "Paris");
    }

    #[test]
    fn blank_query_is_rejected() {
        assert_eq!(WeatherQuery::parse(""), None);
        assert_eq!(WeatherQuery::parse("   "), None);
        assert_eq!(WeatherQuery::parse("\t\n"), None);
    }

    #[test]
    fn hourly_rows_stop_at_twelve() {
        let times: Vec<String> = (0..20).map(|h| format!("2024-01-15T{h:02}:00")).collect();
        let temps: Vec<f64> = (0..20).map(f64::from).collect();
        let winds: Vec<f64> = (0..20).map(|w| f64::from(w) * 2.0).collect();
        let result = payload(serde_json::json!({
            "hourly": { "time": times, "temperature_2m": temps, "wind_speed_10m": winds }
        }));

        let rows = result.hourly_rows();
        assert_eq!(rows.len(), 12);
        assert_eq!(rows[0].time, "00:00");
        assert_eq!(rows[11].time, "11:00");
        assert_eq!(rows[11].temperature, Some(11.0));
        assert_eq!(rows[11].wind_speed, Some(22.0));
    }

    #[test]
    fn short_parallel_arrays_leave_gaps() {
        let result = payload(serde_json::json!({
            "hourly": {
                "time": ["2024-01-15T00:00", "2024-01-15T01:00"],
                "temperature_2m": [3.5],
                "wind_speed_10m": [null, 4.0]
            }
        }));

        let rows = result.hourly_rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].wind_speed, None);
        assert_eq!(rows[1].temperature, None);
        assert_eq!(rows[1].wind_speed, Some(4.0));
    }

    #[test]
    fn missing_sections_are_not_errors() {
        let result = payload(serde_json::json!({ "current": { "temperature_2m": 12.0 } }));
        assert!(result.hourly_rows().is_empty());
        assert!(result.daily_rows().is_empty());
        assert_eq!(result.sunrise_today(), None);
        assert_eq!(result.weather_code(), None);
        assert_eq!(result.temperature(), Some(12.0));
    }

    #[test]
    fn daily_rows_cover_every_day() {
        let result = payload(serde_json::json!({
            "daily": {
                "time": ["2024-01-15", "2024-01-16", "2024-01-17"],
                "temperature_2m_min": [2.0, 1.0, 3.0],
                "temperature_2m_max": [8.0, 6.0, 10.0],
                "sunrise": ["2024-01-15T07:15", "2024-01-16T07:14", "2024-01-17T07:13"],
                "sunset": ["2024-01-15T16:30", "2024-01-16T16:32", "2024-01-17T16:34"]
            }
        }));

        let rows = result.daily_rows();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2].date, "2024-01-17");
        assert_eq!(rows[2].sunset, Some("16:34"));
        assert_eq!(result.sunrise_today(), Some("07:15"));

        let trend = result.trend();
        assert_eq!(trend.labels.len(), 3);
        assert_eq!(trend.min[1], (1.0, 1.0));
        assert_eq!(trend.max[2], (2.0, 10.0));
        assert_eq!(trend.bounds(), Some((1.0, 10.0)));
    }

    #[test]
    fn time_of_day_without_separator() {
        assert_eq!(time_of_day("07:15"), "07:15");
        assert_eq!(time_of_day("2024-01-15T07:15"), "07:15");
    }

    #[test]
    fn state_accessors() {
        assert!(RequestState::Loading.is_loading());
        assert_eq!(RequestState::Failed("x".into()).error(), Some("x"));
        assert!(RequestState::Idle.data().is_none());
    }
}
