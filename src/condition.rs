//! Weather code (WMO) to label and icon.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionIcon {
    DaySunny,
    Cloud,
    Cloudy,
    DayFog,
    Rain,
    Snow,
    Thunderstorm,
}

impl ConditionIcon {
    /// Terminal glyph for the icon.
    pub fn glyph(self) -> &'static str {
        match self {
            ConditionIcon::DaySunny => "☀",
            ConditionIcon::Cloud => "⛅",
            ConditionIcon::Cloudy => "☁",
            ConditionIcon::DayFog => "🌫",
            ConditionIcon::Rain => "🌧",
            ConditionIcon::Snow => "❄",
            ConditionIcon::Thunderstorm => "⛈",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditionMeta {
    pub label: &'static str,
    pub icon: ConditionIcon,
}

const UNKNOWN: ConditionMeta = ConditionMeta {
    label: "Unknown",
    icon: ConditionIcon::Cloud,
};

pub fn classify(code: Option<i64>) -> ConditionMeta {
    use ConditionIcon::*;

    let Some(code) = code else {
        return UNKNOWN;
    };
    let (label, icon) = match code {
        0 => ("Clear sky", DaySunny),
        1 => ("Mainly clear", DaySunny),
        2 => ("Partly cloudy", Cloud),
        3 => ("Overcast", Cloudy),
        45 => ("Fog", DayFog),
        48 => ("Rime Fog", DayFog),
        51 => ("Light Drizzle", Rain),
        53 => ("Moderate Drizzle", Rain),
        55 => ("Dense Drizzle", Rain),
        61 => ("Slight Rain", Rain),
        63 => ("Moderate Rain", Rain),
        65 => ("Heavy Rain", Rain),
        71 => ("Slight Snow", Snow),
        73 => ("Moderate Snow", Snow),
        75 => ("Heavy Snow", Snow),
        80 => ("Rain showers", Rain),
        81 => ("Moderate showers", Rain),
        82 => ("Violent showers", Rain),
        95 => ("Thunderstorm", Thunderstorm),
        96 => ("Thunderstorm (Slight Hail)", Thunderstorm),
        99 => ("Thunderstorm (Heavy Hail)", Thunderstorm),
        _ => return UNKNOWN,
    };
    ConditionMeta { label, icon }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: [(i64, &str, ConditionIcon); 21] = [
        (0, "Clear sky", ConditionIcon::DaySunny),
        (1, "Mainly clear", ConditionIcon::DaySunny),
        (2, "Partly cloudy", ConditionIcon::Cloud),
        (3, "Overcast", ConditionIcon::Cloudy),
        (45, "Fog", ConditionIcon::DayFog),
        (48, "Rime Fog", ConditionIcon::DayFog),
        (51, "Light Drizzle", ConditionIcon::Rain),
        (53, "Moderate Drizzle", ConditionIcon::Rain),
        (55, "Dense Drizzle", ConditionIcon::Rain),
        (61, "Slight Rain", ConditionIcon::Rain),
        (63, "Moderate Rain", ConditionIcon::Rain),
        (65, "Heavy Rain", ConditionIcon::Rain),
        (71, "Slight Snow", ConditionIcon::Snow),
        (73, "Moderate Snow", ConditionIcon::Snow),
        (75, "Heavy Snow", ConditionIcon::Snow),
        (80, "Rain showers", ConditionIcon::Rain),
        (81, "Moderate showers", ConditionIcon::Rain),
        (82, "Violent showers", ConditionIcon::Rain),
        (95, "Thunderstorm", ConditionIcon::Thunderstorm),
        (96, "Thunderstorm (Slight Hail)", ConditionIcon::Thunderstorm),
        (99, "Thunderstorm (Heavy Hail)", ConditionIcon::Thunderstorm),
    ];

    #[test]
    fn known_codes() {
        for (code, label, icon) in TABLE {
            assert_eq!(classify(Some(code)), ConditionMeta { label, icon }, "code {code}");
        }
    }

    #[test]
    fn everything_else_is_unknown() {
        let known: Vec<i64> = TABLE.iter().map(|(c, _, _)| *c).collect();
        for code in -10..=120 {
            if known.contains(&code) {
                continue;
            }
            assert_eq!(classify(Some(code)), UNKNOWN, "code {code}");
        }
        assert_eq!(classify(Some(i64::MIN)), UNKNOWN);
        assert_eq!(classify(Some(i64::MAX)), UNKNOWN);
        assert_eq!(classify(None), UNKNOWN);
        assert_eq!(classify(None).label, "Unknown");
        assert_eq!(classify(None).icon, ConditionIcon::Cloud);
    }
}
