use clap::ValueEnum;

use crate::weather::ConditionCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Locale {
    #[default]
    #[value(name = "ja")]
    Japanese,
    #[value(name = "en")]
    English,
}

impl Locale {
    pub fn toggled(self) -> Self {
        match self {
            Self::Japanese => Self::English,
            Self::English => Self::Japanese,
        }
    }

    pub fn strings(self) -> &'static StringTable {
        strings_for(self)
    }
}

/// Every user-visible string for one locale.
#[derive(Debug)]
pub struct StringTable {
    pub loading: &'static str,
    pub error_title: &'static str,
    pub error_message: &'static str,
    pub today: &'static str,
    /// Indexed 0 (Sunday) through 6 (Saturday).
    pub weekdays: [&'static str; 7],
    pub clear: &'static str,
    pub partly_cloudy: &'static str,
    pub cloudy: &'static str,
    pub rainy: &'static str,
    pub snowy: &'static str,
    pub thunderstorm: &'static str,
    pub high: &'static str,
    pub low: &'static str,
    pub humidity: &'static str,
    pub wind_speed: &'static str,
    pub feels_like: &'static str,
    pub hourly_forecast: &'static str,
    pub weekly_forecast: &'static str,
    pub footer: &'static str,
    /// Caption of the language switch; names the locale it switches to.
    pub toggle_language: &'static str,
    pub key_location: &'static str,
    pub key_theme: &'static str,
    pub key_quit: &'static str,
}

impl StringTable {
    pub fn condition(&self, category: ConditionCategory) -> &'static str {
        match category {
            ConditionCategory::Clear => self.clear,
            ConditionCategory::PartlyCloudy => self.partly_cloudy,
            ConditionCategory::Cloudy => self.cloudy,
            ConditionCategory::Rainy => self.rainy,
            ConditionCategory::Snowy => self.snowy,
            ConditionCategory::Thunderstorm => self.thunderstorm,
        }
    }

    /// Weekday name for a chrono `num_days_from_sunday` value.
    pub fn weekday(&self, days_from_sunday: u32) -> &'static str {
        self.weekdays[days_from_sunday as usize % 7]
    }
}

static JAPANESE: StringTable = StringTable {
    loading: "読み込み中...",
    error_title: "エラー",
    error_message: "天気データを読み込めませんでした。もう一度お試しください。",
    today: "今日",
    weekdays: [
        "日曜日", "月曜日", "火曜日", "水曜日", "木曜日", "金曜日", "土曜日",
    ],
    clear: "晴れ",
    partly_cloudy: "曇り",
    cloudy: "曇天",
    rainy: "雨",
    snowy: "雪",
    thunderstorm: "雷雨",
    high: "最高",
    low: "最低",
    humidity: "湿度",
    wind_speed: "風速",
    feels_like: "体感温度",
    hourly_forecast: "時間別予報",
    weekly_forecast: "週間予報",
    footer: "東京天気予報 • Tokyo Weather",
    toggle_language: "EN",
    key_location: "地区",
    key_theme: "テーマ",
    key_quit: "終了",
};

static ENGLISH: StringTable = StringTable {
    loading: "Loading...",
    error_title: "Error",
    error_message: "Weather data could not be loaded. Please try again.",
    today: "Today",
    weekdays: [
        "Sunday",
        "Monday",
        "Tuesday",
        "Wednesday",
        "Thursday",
        "Friday",
        "Saturday",
    ],
    clear: "Clear",
    partly_cloudy: "Partly Cloudy",
    cloudy: "Cloudy",
    rainy: "Rainy",
    snowy: "Snowy",
    thunderstorm: "Thunderstorm",
    high: "High",
    low: "Low",
    humidity: "Humidity",
    wind_speed: "Wind",
    feels_like: "Feels Like",
    hourly_forecast: "Hourly Forecast",
    weekly_forecast: "Weekly Forecast",
    footer: "Tokyo Weather Forecast",
    toggle_language: "日本語",
    key_location: "District",
    key_theme: "Theme",
    key_quit: "Quit",
};

pub fn strings_for(locale: Locale) -> &'static StringTable {
    match locale {
        Locale::Japanese => &JAPANESE,
        Locale::English => &ENGLISH,
    }
}
