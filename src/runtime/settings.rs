use crate::config::Settings;

/// Settings to run with, plus why the loaded ones were rejected (if they were).
///
/// Config is optional: a missing, unreadable or invalid file never stops the
/// program, it only swaps in the defaults. The problem is handed back rather
/// than printed so it can be logged once the subscriber is installed.
pub fn load_settings() -> (Settings, Option<String>) {
    settle(Settings::load())
}

fn settle(loaded: Result<Settings, ::config::ConfigError>) -> (Settings, Option<String>) {
    match loaded {
        Ok(s) => match s.validate() {
            Ok(()) => (s, None),
            Err(msg) => (Settings::default(), Some(format!("invalid config: {msg}"))),
        },
        Err(e) => (
            Settings::default(),
            Some(format!("failed to load config: {e}")),
        ),
    }
}
