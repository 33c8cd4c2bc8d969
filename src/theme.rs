use ratatui::style::Color;

/// Background gradient plus the two foreground hints used on top of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeDescriptor {
    pub gradient: Vec<Color>,
    pub text_color: Color,
    pub widget_color: Color,
}

const WHITE: Color = Color::Rgb(0xff, 0xff, 0xff);
const DARK: Color = Color::Rgb(0x1f, 0x29, 0x37);

fn theme(stops: &[(u8, u8, u8)], text_color: Color, widget_color: Color) -> ThemeDescriptor {
    ThemeDescriptor {
        gradient: stops.iter().map(|&(r, g, b)| Color::Rgb(r, g, b)).collect(),
        text_color,
        widget_color,
    }
}

pub fn night_fallback() -> ThemeDescriptor {
    theme(
        &[(0x0f, 0x17, 0x2a), (0x1e, 0x29, 0x3b), (0x33, 0x41, 0x55)],
        WHITE,
        WHITE,
    )
}

fn night() -> ThemeDescriptor {
    theme(
        &[(0x0b, 0x10, 0x26), (0x1b, 0x26, 0x4a), (0x2c, 0x3e, 0x73)],
        WHITE,
        Color::Rgb(0xcb, 0xd5, 0xe1),
    )
}

/// Pick the palette for the current conditions.
///
/// Weather code bands take precedence over the clock; codes outside every band
/// (including the gaps between them) fall through to time of day and
/// temperature.
pub fn derive_theme(temperature_c: f64, hour: u32, has_data: bool, code: Option<i64>) -> ThemeDescriptor {
    if !has_data {
        return night_fallback();
    }

    match code {
        Some(0..=1) => {
            return theme(
                &[(0xfd, 0xe6, 0x8a), (0xfb, 0xbf, 0x24), (0xf5, 0x9e, 0x0b)],
                DARK,
                DARK,
            )
        }
        Some(2..=3) => {
            return theme(
                &[(0x9c, 0xa3, 0xaf), (0x6b, 0x72, 0x80), (0x4b, 0x55, 0x63)],
                WHITE,
                Color::Rgb(0xf3, 0xf4, 0xf6),
            )
        }
        Some(45..=65) => {
            return theme(
                &[(0x1e, 0x3a, 0x8a), (0x1e, 0x40, 0xaf), (0x31, 0x2e, 0x81)],
                WHITE,
                Color::Rgb(0xbf, 0xdb, 0xfe),
            )
        }
        Some(71..=86) => {
            return theme(
                &[(0xe0, 0xf2, 0xfe), (0x93, 0xc5, 0xfd), (0x60, 0xa5, 0xfa)],
                DARK,
                WHITE,
            )
        }
        Some(95..=99) => {
            return theme(
                &[(0x33, 0x41, 0x55), (0x1e, 0x29, 0x3b), (0x0f, 0x17, 0x2a), (0x47, 0x55, 0x69)],
                WHITE,
                Color::Rgb(0xfb, 0xbf, 0x24),
            )
        }
        _ => {}
    }

    match hour {
        6..=9 => {
            if temperature_c < 10.0 {
                theme(
                    &[(0xbf, 0xdb, 0xfe), (0xdd, 0xd6, 0xfe), (0xfb, 0xcf, 0xe8)],
                    DARK,
                    DARK,
                )
            } else if temperature_c <= 25.0 {
                theme(
                    &[(0xfe, 0xd7, 0xaa), (0xfd, 0xe6, 0x8a), (0xbf, 0xdb, 0xfe)],
                    DARK,
                    DARK,
                )
            } else {
                theme(
                    &[(0xfd, 0xba, 0x74), (0xfb, 0x92, 0x3c), (0xfd, 0xe0, 0x47)],
                    DARK,
                    DARK,
                )
            }
        }
        10..=16 => {
            if temperature_c < 10.0 {
                theme(
                    &[(0x93, 0xc5, 0xfd), (0x60, 0xa5, 0xfa), (0x38, 0xbd, 0xf8)],
                    DARK,
                    WHITE,
                )
            } else if temperature_c <= 25.0 {
                theme(
                    &[(0x7d, 0xd3, 0xfc), (0x38, 0xbd, 0xf8), (0x0e, 0xa5, 0xe9)],
                    DARK,
                    WHITE,
                )
            } else {
                theme(
                    &[(0xfb, 0xbf, 0x24), (0xf9, 0x73, 0x16), (0xef, 0x44, 0x44)],
                    WHITE,
                    DARK,
                )
            }
        }
        17..=19 => theme(
            &[(0xf9, 0x73, 0x16), (0xdb, 0x27, 0x77), (0x7c, 0x3a, 0xed), (0x31, 0x2e, 0x81)],
            WHITE,
            Color::Rgb(0xfe, 0xd7, 0xaa),
        ),
        _ => night(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sunny() -> ThemeDescriptor {
        derive_theme(20.0, 12, true, Some(0))
    }
    fn rain() -> ThemeDescriptor {
        derive_theme(20.0, 12, true, Some(61))
    }
    fn snow() -> ThemeDescriptor {
        derive_theme(20.0, 12, true, Some(73))
    }

    #[test]
    fn no_data_is_always_night_fallback() {
        for code in [None, Some(0), Some(3), Some(65), Some(95), Some(100)] {
            for hour in 0..24 {
                for temp in [-20.0, 5.0, 18.0, 40.0] {
                    assert_eq!(derive_theme(temp, hour, false, code), night_fallback());
                }
            }
        }
    }

    #[test]
    fn code_bands_ignore_clock_and_temperature() {
        assert_eq!(derive_theme(-5.0, 3, true, Some(1)), sunny());
        assert_eq!(derive_theme(35.0, 18, true, Some(45)), rain());
        assert_eq!(derive_theme(35.0, 23, true, Some(71)), snow());
        assert_ne!(derive_theme(20.0, 12, true, Some(2)), sunny());
        assert_eq!(derive_theme(20.0, 12, true, Some(2)), derive_theme(0.0, 0, true, Some(3)));
        assert_eq!(derive_theme(20.0, 12, true, Some(99)).widget_color, Color::Rgb(0xfb, 0xbf, 0x24));
    }

    #[test]
    fn band_edges() {
        assert_eq!(derive_theme(20.0, 12, true, Some(65)), rain());
        assert_eq!(derive_theme(20.0, 12, true, Some(86)), snow());
        // 100 matches no band, so the clock decides
        assert_eq!(
            derive_theme(20.0, 12, true, Some(100)),
            derive_theme(20.0, 12, true, None)
        );
        assert_ne!(derive_theme(20.0, 12, true, Some(100)), rain());
        // gaps between bands behave the same way
        assert_eq!(
            derive_theme(20.0, 22, true, Some(70)),
            derive_theme(20.0, 22, true, Some(90))
        );
    }

    #[test]
    fn time_of_day_bands() {
        let morning_cold = derive_theme(5.0, 6, true, None);
        let morning_mild = derive_theme(10.0, 9, true, None);
        let morning_hot = derive_theme(30.0, 7, true, None);
        let day_cold = derive_theme(5.0, 10, true, None);
        let day_mild = derive_theme(25.0, 16, true, None);
        let day_hot = derive_theme(25.5, 12, true, None);
        let palettes = [
            &morning_cold,
            &morning_mild,
            &morning_hot,
            &day_cold,
            &day_mild,
            &day_hot,
        ];
        for (i, a) in palettes.iter().enumerate() {
            for b in &palettes[i + 1..] {
                assert_ne!(a, b);
            }
        }

        let sunset = derive_theme(-10.0, 17, true, None);
        assert_eq!(sunset, derive_theme(40.0, 19, true, None));
        assert_eq!(derive_theme(5.0, 20, true, None), derive_theme(30.0, 5, true, None));
        assert_ne!(sunset, derive_theme(5.0, 20, true, None));
    }

    #[test]
    fn gradient_has_three_or_four_stops() {
        for code in [None, Some(0), Some(2), Some(50), Some(80), Some(96)] {
            for hour in 0..24 {
                for temp in [-5.0, 15.0, 30.0] {
                    let len = derive_theme(temp, hour, true, code).gradient.len();
                    assert!((3..=4).contains(&len));
                }
            }
        }
        assert_eq!(night_fallback().text_color, WHITE);
    }
}
