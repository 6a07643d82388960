// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Process-wide defaults.
//!
//! Constructors that do not take a [`Chronology`] use the calendar and offset
//! recorded here. The configuration is installed at most once, typically at
//! program start; until then ISO at UTC is assumed.
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `TEMPOCAL_CALENDAR` | `iso` or `buddhist` | `iso` |
//! | `TEMPOCAL_OFFSET_SECONDS` | offset east of UTC, in seconds | `0` |

use crate::chronology::{utc, CalendarKind, Chronology};
use chrono::FixedOffset;
use std::sync::OnceLock;
use tracing::{debug, warn};

pub const CALENDAR_VAR: &str = "TEMPOCAL_CALENDAR";
pub const OFFSET_VAR: &str = "TEMPOCAL_OFFSET_SECONDS";

static CONFIG: OnceLock<TimeConfig> = OnceLock::new();

/// Default calendar and offset.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TimeConfig {
    pub calendar: CalendarKind,
    pub offset: FixedOffset,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            calendar: CalendarKind::Iso,
            offset: utc(),
        }
    }
}

impl TimeConfig {
    pub fn new(calendar: CalendarKind, offset: FixedOffset) -> Self {
        Self { calendar, offset }
    }

    /// The installed configuration, or the default if none was installed.
    pub fn current() -> Self {
        CONFIG.get().copied().unwrap_or_default()
    }

    /// Installs `self` as the process configuration.
    ///
    /// Only the first call takes effect; later calls hand back the rejected
    /// value.
    pub fn install(self) -> Result<(), TimeConfig> {
        CONFIG.set(self).map_err(|rejected| {
            warn!(?rejected, "time configuration already installed");
            rejected
        })?;
        debug!(calendar = %self.calendar, offset = %self.offset, "time configuration installed");
        Ok(())
    }

    /// Reads `TEMPOCAL_CALENDAR` and `TEMPOCAL_OFFSET_SECONDS`.
    ///
    /// Unset variables fall back to the defaults; malformed ones are logged
    /// and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(CALENDAR_VAR) {
            match raw.parse::<CalendarKind>() {
                Ok(calendar) => config.calendar = calendar,
                Err(err) => warn!(variable = CALENDAR_VAR, %err, "ignoring calendar"),
            }
        }

        if let Some(raw) = lookup(OFFSET_VAR) {
            let offset = raw
                .trim()
                .parse::<i32>()
                .ok()
                .and_then(FixedOffset::east_opt);
            match offset {
                Some(offset) => config.offset = offset,
                None => warn!(variable = OFFSET_VAR, value = %raw, "ignoring offset"),
            }
        }

        config
    }

    pub fn chronology(&self) -> Chronology {
        Chronology::get(self.calendar, self.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_to_iso_utc() {
        let config = TimeConfig::from_lookup(lookup(&[]));
        assert_eq!(config, TimeConfig::default());
        assert_eq!(config.chronology(), Chronology::iso());
    }

    #[test]
    fn reads_calendar_and_offset() {
        let config = TimeConfig::from_lookup(lookup(&[
            (CALENDAR_VAR, "Buddhist"),
            (OFFSET_VAR, "25200"),
        ]));
        assert_eq!(config.calendar, CalendarKind::Buddhist);
        assert_eq!(config.offset.local_minus_utc(), 25_200);
        assert_eq!(config.chronology().to_string(), "BuddhistChronology[+07:00]");
    }

    #[test]
    fn malformed_values_are_ignored() {
        let config = TimeConfig::from_lookup(lookup(&[
            (CALENDAR_VAR, "mayan"),
            (OFFSET_VAR, "999999999"),
        ]));
        assert_eq!(config, TimeConfig::default());
    }

    #[test]
    fn install_only_once() {
        // Same value as the default so other tests are unaffected.
        let first = TimeConfig::default().install();
        let second = TimeConfig::new(CalendarKind::Buddhist, utc()).install();
        assert!(first.is_ok() || first == Err(TimeConfig::default()));
        assert_eq!(second, Err(TimeConfig::new(CalendarKind::Buddhist, utc())));
        assert_eq!(TimeConfig::current(), TimeConfig::default());
    }
}
