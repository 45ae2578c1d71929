use std::path::PathBuf;

use clap::builder::{styling::AnsiColor, Styles};
use clap::Parser;

use crate::locale::Locale;
use crate::openmeteo::{DEFAULT_BASE_URL, DEFAULT_TIMEZONE};
use crate::theme::ThemeMode;

const ABOUT: &str = "Tokyo district weather TUI";

const LONG_ABOUT: &str = "
TUI for viewing the weather of six Tokyo districts, sourced from Open-Meteo.

Keys: `l` cycles to the next district, `g` switches between Japanese and English, `t` switches
between the light and dark theme, `r` refreshes, `q` quits.

Nothing is saved between runs; pass --location, --locale and --theme to choose the starting view.
";

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default())
    .usage(AnsiColor::Green.on_default())
    .literal(AnsiColor::Green.on_default())
    .placeholder(AnsiColor::Green.on_default());

#[derive(Parser, Debug)]
#[command(version, styles=STYLES, about=ABOUT, long_about = LONG_ABOUT)]
pub struct Args {
    #[arg(
        default_value = "shibuya",
        help = "District to show first (shibuya, shinjuku, ginza, harajuku, akihabara, roppongi)"
    )]
    pub location: String,

    #[arg(long, value_enum, default_value_t = Locale::Japanese)]
    pub locale: Locale,

    #[arg(long, value_enum, default_value_t = ThemeMode::Light)]
    pub theme: ThemeMode,

    #[arg(long, default_value = DEFAULT_BASE_URL, help = "Open-Meteo API base URL")]
    pub base_url: String,

    #[arg(long, default_value = DEFAULT_TIMEZONE, help = "Timezone the forecast is aligned to")]
    pub timezone: String,

    #[arg(long, default_value_t = 10, help = "HTTP timeout in seconds")]
    pub timeout_secs: u64,

    #[arg(long, help = "Print the view model as JSON once and exit")]
    pub json: bool,

    #[arg(long, help = "Write logs to this file (filter with RUST_LOG)")]
    pub log_file: Option<PathBuf>,
}
