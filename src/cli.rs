use std::path::PathBuf;

use clap::builder::{styling::AnsiColor, Styles};
use clap::Parser;

use crate::app::{Background, WidgetLayout};
use crate::config::Config;
use crate::units::Units;

const ABOUT: &str = "City weather TUI";

const LONG_ABOUT: &str = "
TUI for looking up the weather in a city.

Type a city name and press Enter to see current conditions, the next twelve hours, the daily
forecast and a min/max temperature chart. Tab switches between the table and card layouts,
Esc quits.

The last city you looked up is saved, so subsequent runs of `wxcity` start with it unless another
city is given on the command line.
";

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default())
    .usage(AnsiColor::Green.on_default())
    .literal(AnsiColor::Green.on_default())
    .placeholder(AnsiColor::Green.on_default());

#[derive(Parser, Debug)]
#[command(version, styles=STYLES, about=ABOUT, long_about = LONG_ABOUT)]
pub struct Args {
    #[arg(help = "City to look up on start (e.g. Paris, \"New York\")")]
    pub city: Option<String>,

    #[arg(long, help = "Base URL of the weather service")]
    pub endpoint: Option<String>,

    #[arg(long, value_enum, help = "Background style")]
    pub background: Option<Background>,

    #[arg(long, value_enum, help = "Layout of the current conditions")]
    pub layout: Option<WidgetLayout>,

    #[arg(long, value_enum, help = "Display units")]
    pub units: Option<Units>,

    #[arg(long, help = "Request timeout in seconds (default: wait indefinitely)")]
    pub timeout: Option<u64>,

    #[arg(long, help = "Do not remember the last city")]
    pub no_save: bool,

    #[arg(long, help = "Write logs to this file instead of the data directory")]
    pub log_file: Option<PathBuf>,
}

impl Args {
    /// Overlay command-line options on the stored config.
    pub fn apply(&self, config: &mut Config) {
        if let Some(endpoint) = &self.endpoint {
            config.base_url = endpoint.clone();
        }
        if let Some(background) = self.background {
            config.background = background;
        }
        if let Some(layout) = self.layout {
            config.layout = layout;
        }
        if let Some(units) = self.units {
            config.units = units;
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = Some(timeout);
        }
    }

    /// City to prefill: the one given on the command line, else the saved one.
    pub fn initial_city(&self, config: &Config) -> Option<String> {
        self.city.clone().or_else(|| config.last_city.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let args = Args::parse_from([
            "wxcity",
            "Paris",
            "--endpoint",
            "http://localhost:1234",
            "--layout",
            "table",
            "--units",
            "imperial",
            "--timeout",
            "7",
        ]);
        let mut cfg = Config {
            last_city: Some("Lisbon".into()),
            ..Config::default()
        };
        args.apply(&mut cfg);

        assert_eq!(cfg.base_url, "http://localhost:1234");
        assert_eq!(cfg.layout, WidgetLayout::Table);
        assert_eq!(cfg.units, Units::Imperial);
        assert_eq!(cfg.timeout_secs, Some(7));
        assert_eq!(cfg.background, Background::default());
        assert_eq!(args.initial_city(&cfg).as_deref(), Some("Paris"));
    }

    #[test]
    fn saved_city_is_used_without_argument() {
        let args = Args::parse_from(["wxcity", "--background", "none"]);
        let mut cfg = Config {
            last_city: Some("Lisbon".into()),
            ..Config::default()
        };
        args.apply(&mut cfg);

        assert_eq!(cfg.background, Background::None);
        assert_eq!(args.initial_city(&cfg).as_deref(), Some("Lisbon"));
    }
}
