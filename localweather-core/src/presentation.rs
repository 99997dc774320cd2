//! Static display metadata for each weather condition.
//!
//! Icon ids are Material Design Icons names; colors are hex background colors.

use serde::Serialize;

use crate::model::ConditionCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct IconId(&'static str);

impl IconId {
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ColorValue(&'static str);

impl ColorValue {
    /// `#RRGGBB`
    pub const fn as_hex(&self) -> &'static str {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ConditionPresentation {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub icon: IconId,
    pub color: ColorValue,
}

const fn entry(
    title: &'static str,
    subtitle: &'static str,
    icon: &'static str,
    color: &'static str,
) -> ConditionPresentation {
    ConditionPresentation {
        title,
        subtitle,
        icon: IconId(icon),
        color: ColorValue(color),
    }
}

static THUNDERSTORM: ConditionPresentation =
    entry("A Storm is coming", "Because Gods are angry", "weather-lightning", "#616161");
static DRIZZLE: ConditionPresentation =
    entry("Drizzle", "Partially raining...", "weather-hail", "#076585");
static RAIN: ConditionPresentation =
    entry("Raining", "Get a cup of coffee", "weather-rainy", "#005BEA");
static SNOW: ConditionPresentation =
    entry("Snow", "Get out and build a snowman for me", "weather-snowy", "#00d2ff");
static CLEAR: ConditionPresentation =
    entry("So Sunny", "It is hurting my eyes", "weather-sunny", "#f7b733");
static CLOUDS: ConditionPresentation = entry("Clouds", "Everywhere", "weather-cloudy", "#1F1C2C");
static MIST: ConditionPresentation = entry("Mist", "Don't roam in forests!", "weather-fog", "#3CD3AD");
static SMOKE: ConditionPresentation =
    entry("Smoke", "Keep the windows shut", "weather-hazy", "#5D5D5D");
static HAZE: ConditionPresentation =
    entry("Haze", "Another name for Partial Raining", "weather-hail", "#66A6FF");
static DUST: ConditionPresentation =
    entry("Dust", "Time to wash the car, later", "weather-dust", "#B79891");
static FOG: ConditionPresentation = entry("Fog", "Can't see a thing", "weather-fog", "#757F9A");
static SAND: ConditionPresentation =
    entry("Sand", "Protect your eyes", "weather-dust", "#C2B280");
static ASH: ConditionPresentation =
    entry("Volcanic Ash", "Stay indoors if you can", "weather-cloudy-alert", "#434343");
static SQUALL: ConditionPresentation =
    entry("Squalls", "Hold on to your hat", "weather-windy", "#4B6CB7");
static TORNADO: ConditionPresentation =
    entry("Tornado", "Find shelter right now", "weather-tornado", "#232526");
static UNKNOWN: ConditionPresentation =
    entry("Unknown", "The sky is keeping its secrets", "help-circle-outline", "#7F8C8D");

/// Presentation record for `condition`. Total: `Unknown` has its own entry.
pub fn presentation_for(condition: ConditionCode) -> &'static ConditionPresentation {
    match condition {
        ConditionCode::Thunderstorm => &THUNDERSTORM,
        ConditionCode::Drizzle => &DRIZZLE,
        ConditionCode::Rain => &RAIN,
        ConditionCode::Snow => &SNOW,
        ConditionCode::Clear => &CLEAR,
        ConditionCode::Clouds => &CLOUDS,
        ConditionCode::Mist => &MIST,
        ConditionCode::Smoke => &SMOKE,
        ConditionCode::Haze => &HAZE,
        ConditionCode::Dust => &DUST,
        ConditionCode::Fog => &FOG,
        ConditionCode::Sand => &SAND,
        ConditionCode::Ash => &ASH,
        ConditionCode::Squall => &SQUALL,
        ConditionCode::Tornado => &TORNADO,
        ConditionCode::Unknown => &UNKNOWN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_hex_color(value: &str) -> bool {
        value.len() == 7
            && value.starts_with('#')
            && value[1..].chars().all(|c| c.is_ascii_hexdigit())
    }

    #[test]
    fn every_condition_has_a_complete_entry() {
        for code in ConditionCode::all() {
            let p = presentation_for(*code);
            assert!(!p.title.is_empty(), "{code}");
            assert!(!p.subtitle.is_empty(), "{code}");
            assert!(!p.icon.as_str().is_empty(), "{code}");
            assert!(is_hex_color(p.color.as_hex()), "{code}: {}", p.color.as_hex());
        }
    }

    #[test]
    fn lookup_is_idempotent() {
        for code in ConditionCode::all() {
            assert_eq!(presentation_for(*code), presentation_for(*code));
        }
    }

    #[test]
    fn unknown_has_a_distinct_fallback() {
        let unknown = presentation_for(ConditionCode::Unknown);
        assert_eq!(unknown.title, "Unknown");
        assert_ne!(unknown, presentation_for(ConditionCode::Clear));
    }

    #[test]
    fn clouds_entry() {
        let clouds = presentation_for(ConditionCode::Clouds);
        assert_eq!(clouds.title, "Clouds");
        assert_eq!(clouds.subtitle, "Everywhere");
        assert_eq!(clouds.icon.as_str(), "weather-cloudy");
        assert_eq!(clouds.color.as_hex(), "#1F1C2C");
    }

    #[test]
    fn serializes_flat() {
        let json = serde_json::to_value(presentation_for(ConditionCode::Rain)).unwrap();
        assert_eq!(json["icon"], "weather-rainy");
        assert_eq!(json["color"], "#005BEA");
    }
}
