use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, Utc};
use tracing::{debug, info, warn};

use crate::forecast::normalize;
use crate::locale::{Locale, StringTable};
use crate::location::{Location, LocationCycle};
use crate::openmeteo::{FetchError, RawForecastPayload};
use crate::theme::{ColorPalette, ThemeMode};
use crate::weather::ViewModel;

/// Identifies one issued refresh. Only the most recent ticket may update
/// the session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RefreshTicket {
    pub generation: u64,
    pub location: &'static Location,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Applied,
    /// A newer refresh was issued after this one; the result was dropped.
    Stale,
    Failed,
}

#[derive(Debug)]
struct Snapshot {
    location: &'static Location,
    payload: RawForecastPayload,
    reference: NaiveDateTime,
}

/// Everything one viewer has selected, plus the last complete forecast.
#[derive(Debug)]
pub struct Session {
    cycle: LocationCycle,
    location: &'static Location,
    locale: Locale,
    theme: ThemeMode,
    generation: u64,
    loading: bool,
    fetch_failed: bool,
    snapshot: Option<Snapshot>,
    view: Option<ViewModel>,
}

impl Session {
    pub fn new(
        cycle: LocationCycle,
        location: &'static Location,
        locale: Locale,
        theme: ThemeMode,
    ) -> Self {
        Self {
            cycle,
            location,
            locale,
            theme,
            generation: 0,
            loading: false,
            fetch_failed: false,
            snapshot: None,
            view: None,
        }
    }

    pub fn location(&self) -> &'static Location {
        self.location
    }

    /// The location the displayed view model was built for, which lags
    /// behind [`Session::location`] while a refresh is pending or after one
    /// failed.
    pub fn forecast_location(&self) -> Option<&'static Location> {
        self.snapshot.as_ref().map(|s| s.location)
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn strings(&self) -> &'static StringTable {
        self.locale.strings()
    }

    pub fn theme(&self) -> ThemeMode {
        self.theme
    }

    pub fn palette(&self) -> &'static ColorPalette {
        self.theme.palette()
    }

    pub fn view(&self) -> Option<&ViewModel> {
        self.view.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Localized `(title, message)` of the pending error notice, if any.
    pub fn notice(&self) -> Option<(&'static str, &'static str)> {
        self.fetch_failed
            .then(|| (self.strings().error_title, self.strings().error_message))
    }

    pub fn dismiss_notice(&mut self) {
        self.fetch_failed = false;
    }

    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.generation += 1;
        self.loading = true;
        debug!(generation = self.generation, location = self.location.id, "refresh issued");
        RefreshTicket {
            generation: self.generation,
            location: self.location,
        }
    }

    pub fn select_next_location(&mut self) -> RefreshTicket {
        self.location = self.cycle.next(self.location);
        info!(location = self.location.id, "location selected");
        self.begin_refresh()
    }

    pub fn toggle_locale(&mut self) {
        self.locale = self.locale.toggled();
        self.rebuild_view();
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    /// Applies the result of the refresh identified by `generation`.
    ///
    /// `now` is converted into the payload's UTC offset so "today" and the
    /// current hour are those of the location, not of the viewer.
    pub fn complete_refresh(
        &mut self,
        generation: u64,
        result: Result<RawForecastPayload, FetchError>,
        now: DateTime<Utc>,
    ) -> RefreshOutcome {
        if generation != self.generation {
            debug!(generation, latest = self.generation, "discarding stale forecast");
            return RefreshOutcome::Stale;
        }
        self.loading = false;

        match result {
            Ok(payload) => {
                let reference = local_reference(now, payload.utc_offset_seconds);
                self.snapshot = Some(Snapshot {
                    location: self.location,
                    payload,
                    reference,
                });
                self.fetch_failed = false;
                self.rebuild_view();
                info!(generation, location = self.location.id, %reference, "forecast applied");
                RefreshOutcome::Applied
            }
            Err(err) => {
                warn!(generation, location = self.location.id, error = %err, "forecast refresh failed");
                self.fetch_failed = true;
                RefreshOutcome::Failed
            }
        }
    }

    fn rebuild_view(&mut self) {
        if let Some(snapshot) = &self.snapshot {
            self.view = normalize(Some(&snapshot.payload), snapshot.reference, self.locale);
        }
    }
}

fn local_reference(now: DateTime<Utc>, utc_offset_seconds: i32) -> NaiveDateTime {
    let offset = FixedOffset::east_opt(utc_offset_seconds).unwrap_or(Utc.fix());
    now.with_timezone(&offset).naive_local()
}
