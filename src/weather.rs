use serde::Serialize;

/// Coarse condition derived from an upstream WMO weather code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionCategory {
    Clear,
    PartlyCloudy,
    Cloudy,
    Rainy,
    Snowy,
    Thunderstorm,
}

impl ConditionCategory {
    pub const ALL: [ConditionCategory; 6] = [
        Self::Clear,
        Self::PartlyCloudy,
        Self::Cloudy,
        Self::Rainy,
        Self::Snowy,
        Self::Thunderstorm,
    ];

    pub fn icon(self) -> Icon {
        match self {
            Self::Clear => Icon::Sunny,
            Self::PartlyCloudy => Icon::PartlySunny,
            Self::Cloudy => Icon::Cloudy,
            Self::Rainy => Icon::Rainy,
            Self::Snowy => Icon::Snow,
            Self::Thunderstorm => Icon::Thunderstorm,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Icon {
    #[serde(rename = "sunny")]
    Sunny,
    #[serde(rename = "partly-sunny")]
    PartlySunny,
    #[serde(rename = "cloudy")]
    Cloudy,
    #[serde(rename = "rainy")]
    Rainy,
    #[serde(rename = "snow")]
    Snow,
    #[serde(rename = "thunderstorm")]
    Thunderstorm,
}

impl Icon {
    pub fn id(self) -> &'static str {
        match self {
            Self::Sunny => "sunny",
            Self::PartlySunny => "partly-sunny",
            Self::Cloudy => "cloudy",
            Self::Rainy => "rainy",
            Self::Snow => "snow",
            Self::Thunderstorm => "thunderstorm",
        }
    }

    /// Single-width glyph used by the terminal renderer.
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Sunny => "☀",
            Self::PartlySunny => "⛅",
            Self::Cloudy => "☁",
            Self::Rainy => "☂",
            Self::Snow => "❄",
            Self::Thunderstorm => "⚡",
        }
    }
}

/// Maps a weather code onto its category and icon.
///
/// Ranges are checked in ascending order, so each arm only sees codes the
/// previous arms rejected. Every `u32` classifies.
pub fn classify(code: u32) -> (ConditionCategory, Icon) {
    let category = match code {
        0 => ConditionCategory::Clear,
        1..=3 => ConditionCategory::PartlyCloudy,
        4..=48 => ConditionCategory::Cloudy,
        49..=67 => ConditionCategory::Rainy,
        68..=77 => ConditionCategory::Snowy,
        _ => ConditionCategory::Thunderstorm,
    };
    (category, category.icon())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentConditions {
    pub temperature_c: i32,
    pub category: ConditionCategory,
    pub icon: Icon,
    pub high_c: i32,
    pub low_c: i32,
    pub humidity_pct: i32,
    pub wind_kph: i32,
    /// Upstream supplies no apparent temperature, so this mirrors `temperature_c`.
    pub feels_like_c: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourlySlice {
    pub hour_label: String,
    pub temperature_c: i32,
    pub icon: Icon,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyOutlook {
    pub day_label: String,
    pub high_c: i32,
    pub low_c: i32,
    pub precipitation_pct: i32,
    pub category: ConditionCategory,
    pub icon: Icon,
}

/// Everything the presentation layer needs for one location at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewModel {
    pub current: CurrentConditions,
    pub hourly: Vec<HourlySlice>,
    pub daily: Vec<DailyOutlook>,
}
