//! Turns a raw Open-Meteo payload into the fixed-shape view model.
//!
//! Everything here is pure: the same payload, reference instant and locale
//! always produce the same [`ViewModel`].

use chrono::{Datelike, NaiveDateTime, Timelike};

use crate::locale::{strings_for, Locale, StringTable};
use crate::openmeteo::{sample, DailySeries, HourlySeries, RawForecastPayload};
use crate::units::rounding::{display, display_or_zero};
use crate::weather::{classify, CurrentConditions, DailyOutlook, HourlySlice, Icon, ViewModel};

pub const HOURLY_SLOTS: usize = 6;
pub const DAILY_SLOTS: usize = 7;

/// Hourly icon when the payload carries no hourly weather codes.
const DEFAULT_HOURLY_ICON: Icon = Icon::PartlySunny;

/// Builds the view model for `payload` as seen at `reference`, the wall
/// clock time in the location's timezone.
///
/// An absent payload means the forecast is still loading and yields `None`.
pub fn normalize(
    payload: Option<&RawForecastPayload>,
    reference: NaiveDateTime,
    locale: Locale,
) -> Option<ViewModel> {
    let payload = payload?;
    let hour = reference.hour() as usize;

    Some(ViewModel {
        current: current_conditions(payload, hour),
        hourly: hourly_outlook(payload.hourly.as_ref(), hour),
        daily: daily_outlook(payload.daily.as_ref(), reference, strings_for(locale)),
    })
}

fn current_conditions(payload: &RawForecastPayload, hour: usize) -> CurrentConditions {
    let now = &payload.current_weather;
    let (category, icon) = classify(now.weathercode);
    let daily = payload.daily.as_ref();
    let temperature_c = display(now.temperature);

    CurrentConditions {
        temperature_c,
        category,
        icon,
        high_c: display_or_zero(daily.and_then(|d| sample(&d.temperature_2m_max, 0))),
        low_c: display_or_zero(daily.and_then(|d| sample(&d.temperature_2m_min, 0))),
        humidity_pct: display_or_zero(
            payload
                .hourly
                .as_ref()
                .and_then(|h| sample(&h.relativehumidity_2m, hour)),
        ),
        wind_kph: display(now.windspeed),
        feels_like_c: temperature_c,
    }
}

/// Clamps `index` into a series of `len` samples; `None` for an empty series.
fn clamp_index(index: usize, len: usize) -> Option<usize> {
    len.checked_sub(1).map(|last| index.min(last))
}

fn clamped_sample<T: Copy>(series: &Option<Vec<Option<T>>>, index: usize) -> Option<T> {
    let len = series.as_ref().map_or(0, Vec::len);
    clamp_index(index, len).and_then(|i| sample(series, i))
}

fn hourly_outlook(hourly: Option<&HourlySeries>, hour: usize) -> Vec<HourlySlice> {
    (0..HOURLY_SLOTS)
        .map(|i| {
            let index = hour + i;
            let temperature = hourly.and_then(|h| clamped_sample(&h.temperature_2m, index));
            let icon = hourly
                .and_then(|h| clamped_sample(&h.weathercode, index))
                .map_or(DEFAULT_HOURLY_ICON, |code| classify(code).1);

            HourlySlice {
                hour_label: format!("{index}:00"),
                temperature_c: display_or_zero(temperature),
                icon,
            }
        })
        .collect()
}

fn daily_outlook(
    daily: Option<&DailySeries>,
    reference: NaiveDateTime,
    strings: &StringTable,
) -> Vec<DailyOutlook> {
    let first_weekday = reference.weekday().num_days_from_sunday();

    (0..DAILY_SLOTS)
        .map(|i| {
            let day_label = if i == 0 {
                strings.today
            } else {
                strings.weekday(first_weekday + i as u32)
            };
            let code = daily.and_then(|d| sample(&d.weathercode, i)).unwrap_or(0);
            let (category, icon) = classify(code);

            DailyOutlook {
                day_label: day_label.to_string(),
                high_c: display_or_zero(daily.and_then(|d| sample(&d.temperature_2m_max, i))),
                low_c: display_or_zero(daily.and_then(|d| sample(&d.temperature_2m_min, i))),
                precipitation_pct: display_or_zero(
                    daily.and_then(|d| sample(&d.precipitation_probability_max, i)),
                ),
                category,
                icon,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::openmeteo::fixtures::week_payload;
    use crate::openmeteo::CurrentWeather;
    use crate::weather::ConditionCategory;
    use chrono::NaiveDate;

    const MONDAY_CODES: [u32; 7] = [0, 2, 50, 80, 5, 1, 65];

    /// 2026-10-12 is a Monday.
    fn monday_at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 12)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_absent_payload_is_loading() {
        assert_eq!(normalize(None, monday_at(9), Locale::English), None);
        assert_eq!(normalize(None, monday_at(0), Locale::Japanese), None);
    }

    #[test]
    fn test_shape() {
        let payload = week_payload(MONDAY_CODES);
        for locale in [Locale::English, Locale::Japanese] {
            let view = normalize(Some(&payload), monday_at(9), locale).unwrap();
            assert_eq!(view.hourly.len(), HOURLY_SLOTS);
            assert_eq!(view.daily.len(), DAILY_SLOTS);
            assert_eq!(view.daily[0].day_label, strings_for(locale).today);
        }
    }

    #[test]
    fn test_monday_scenario() {
        let payload = week_payload(MONDAY_CODES);
        let view = normalize(Some(&payload), monday_at(9), Locale::English).unwrap();

        let categories: Vec<_> = view.daily.iter().map(|d| d.category).collect();
        assert_eq!(
            categories,
            [
                ConditionCategory::Clear,
                ConditionCategory::PartlyCloudy,
                ConditionCategory::Rainy,
                ConditionCategory::Thunderstorm,
                ConditionCategory::Cloudy,
                ConditionCategory::PartlyCloudy,
                ConditionCategory::Rainy,
            ]
        );

        let labels: Vec<_> = view.daily.iter().map(|d| d.day_label.as_str()).collect();
        assert_eq!(
            labels,
            ["Today", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"]
        );
        assert_eq!(view.daily[3].icon, Icon::Thunderstorm);
        assert_eq!(view.daily[2].high_c, 22);
        assert_eq!(view.daily[2].low_c, 12);
        assert_eq!(view.daily[2].precipitation_pct, 20);
    }

    #[test]
    fn test_japanese_labels() {
        let payload = week_payload(MONDAY_CODES);
        let view = normalize(Some(&payload), monday_at(9), Locale::Japanese).unwrap();
        assert_eq!(view.daily[0].day_label, "今日");
        assert_eq!(view.daily[1].day_label, "火曜日");
        assert_eq!(view.daily[6].day_label, "日曜日");
    }

    #[test]
    fn test_current_conditions() {
        let payload = week_payload(MONDAY_CODES);
        let current = normalize(Some(&payload), monday_at(9), Locale::English)
            .unwrap()
            .current;

        assert_eq!(current.temperature_c, 19);
        assert_eq!(current.feels_like_c, 19);
        assert_eq!(current.category, ConditionCategory::PartlyCloudy);
        assert_eq!(current.icon, Icon::PartlySunny);
        assert_eq!(current.high_c, 20);
        assert_eq!(current.low_c, 10);
        assert_eq!(current.humidity_pct, 49);
        assert_eq!(current.wind_kph, 12);
    }

    #[test]
    fn test_rounding_at_the_boundary() {
        let mut payload = week_payload(MONDAY_CODES);
        payload.current_weather.temperature = 18.6;
        let view = normalize(Some(&payload), monday_at(9), Locale::English).unwrap();
        assert_eq!(view.current.temperature_c, 19);

        payload.current_weather.temperature = 18.4;
        let view = normalize(Some(&payload), monday_at(9), Locale::English).unwrap();
        assert_eq!(view.current.temperature_c, 18);
    }

    #[test]
    fn test_humidity_rounds_half_up() {
        let mut payload = week_payload(MONDAY_CODES);
        let humidity = payload.hourly.as_mut().unwrap().relativehumidity_2m.as_mut().unwrap();
        humidity[9] = Some(72.5);
        humidity[10] = Some(72.4);

        let view = normalize(Some(&payload), monday_at(9), Locale::English).unwrap();
        assert_eq!(view.current.humidity_pct, 73);

        let view = normalize(Some(&payload), monday_at(10), Locale::English).unwrap();
        assert_eq!(view.current.humidity_pct, 72);
    }

    #[test]
    fn test_hourly_uses_raw_hour_labels() {
        let payload = week_payload(MONDAY_CODES);
        let view = normalize(Some(&payload), monday_at(21), Locale::English).unwrap();

        let labels: Vec<_> = view.hourly.iter().map(|h| h.hour_label.as_str()).collect();
        assert_eq!(labels, ["21:00", "22:00", "23:00", "24:00", "25:00", "26:00"]);

        // Indices 24.. are the first hours of the next day in the series.
        let temps: Vec<_> = view.hourly.iter().map(|h| h.temperature_c).collect();
        assert_eq!(temps, [31, 32, 33, 10, 11, 12]);
        assert!(view.hourly.iter().all(|h| h.icon == DEFAULT_HOURLY_ICON));
    }

    #[test]
    fn test_hourly_clamps_short_series() {
        let mut payload = week_payload(MONDAY_CODES);
        let hourly = payload.hourly.as_mut().unwrap();
        hourly.temperature_2m = Some((0..12).map(|h| Some(h as f64)).collect());
        hourly.weathercode = Some(vec![Some(0), Some(61)]);

        let view = normalize(Some(&payload), monday_at(9), Locale::English).unwrap();
        let temps: Vec<_> = view.hourly.iter().map(|h| h.temperature_c).collect();
        assert_eq!(temps, [9, 10, 11, 11, 11, 11]);
        assert!(view.hourly.iter().all(|h| h.icon == Icon::Rainy));
        assert_eq!(view.hourly[5].hour_label, "14:00");
    }

    #[test]
    fn test_missing_series_default_to_zero() {
        let payload = RawForecastPayload {
            current_weather: CurrentWeather {
                temperature: 7.5,
                windspeed: 3.2,
                weathercode: 71,
            },
            hourly: Some(HourlySeries::default()),
            daily: Some(DailySeries {
                temperature_2m_max: Some(vec![Some(9.0), None]),
                precipitation_probability_max: Some(vec![None]),
                ..Default::default()
            }),
            ..Default::default()
        };

        let view = normalize(Some(&payload), monday_at(9), Locale::English).unwrap();
        assert_eq!(view.hourly.len(), HOURLY_SLOTS);
        assert_eq!(view.daily.len(), DAILY_SLOTS);
        assert_eq!(view.current.temperature_c, 8);
        assert_eq!(view.current.category, ConditionCategory::Snowy);
        assert_eq!(view.current.high_c, 9);
        assert_eq!(view.current.low_c, 0);
        assert_eq!(view.current.humidity_pct, 0);
        assert!(view.hourly.iter().all(|h| h.temperature_c == 0));
        assert!(view.daily.iter().all(|d| d.precipitation_pct == 0));
        assert_eq!(view.daily[1].high_c, 0);
        assert_eq!(view.daily[6].category, ConditionCategory::Clear);
    }

    #[test]
    fn test_payload_without_series_sections() {
        let payload = RawForecastPayload::default();
        let view = normalize(Some(&payload), monday_at(23), Locale::Japanese).unwrap();
        assert_eq!(view.hourly.len(), HOURLY_SLOTS);
        assert_eq!(view.daily.len(), DAILY_SLOTS);
        assert_eq!(view.hourly[0].hour_label, "23:00");
    }

    #[test]
    fn test_clamp_index() {
        assert_eq!(clamp_index(5, 0), None);
        assert_eq!(clamp_index(5, 3), Some(2));
        assert_eq!(clamp_index(1, 3), Some(1));
    }
}
