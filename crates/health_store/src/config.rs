use crate::HealthStoreError;

/// Which step-counting strategy feeds the displayed total for a workout.
///
/// The two strategies apply different filters and can disagree; the
/// authoritative one is an explicit configuration choice, not a guess.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepSource {
    /// Sum every step sample saved against the workout object, regardless
    /// of source. This is the default.
    Linked,
    /// Sum step samples inside the workout's time range, optionally
    /// restricted to a manual-entry source name.
    TimeRange { manual_source: Option<String> },
}

#[derive(Clone, Debug)]
pub struct Config {
    pub step_source: StepSource,
    /// Length of the bucketed step-history window, in days.
    pub window_days: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            step_source: StepSource::Linked,
            window_days: 7,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, HealthStoreError> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Testable helper that reads configuration values using the provided
    /// function. This avoids mutating global environment in tests and keeps
    /// `from_env()` small and safe.
    pub fn from_env_with<F>(mut get: F) -> Result<Self, HealthStoreError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let manual_source =
            get("HEALTH_MANUAL_SOURCE").unwrap_or_else(|| "Health".to_owned());
        let step_source = match get("HEALTH_STEP_SOURCE").as_deref() {
            None | Some("linked") => StepSource::Linked,
            Some("range") => StepSource::TimeRange {
                manual_source: None,
            },
            Some("manual") => StepSource::TimeRange {
                manual_source: Some(manual_source),
            },
            Some(other) => {
                return Err(HealthStoreError::Config(format!(
                    "HEALTH_STEP_SOURCE must be linked, range, or manual (got {other:?})"
                )));
            }
        };
        let window_days = match get("HEALTH_WINDOW_DAYS") {
            None => 7,
            Some(raw) => raw.parse::<u32>().map_err(|_| {
                HealthStoreError::Config(format!("HEALTH_WINDOW_DAYS is not a number: {raw:?}"))
            })?,
        };
        if window_days == 0 {
            return Err(HealthStoreError::Config(
                "HEALTH_WINDOW_DAYS must be at least 1".into(),
            ));
        }
        Ok(Self {
            step_source,
            window_days,
        })
    }
}
