//! Wall-clock seam
//!
//! The simulation itself only counts ticks; the date is needed solely to
//! label high-score entries.

/// Source of the human-readable date stamped on a high score
pub trait Clock {
    fn date_label(&self) -> String;
}

/// A clock that always reports the same date (native builds and tests)
#[derive(Debug, Clone)]
pub struct FixedClock(pub String);

impl Default for FixedClock {
    fn default() -> Self {
        Self("N/A".to_string())
    }
}

impl Clock for FixedClock {
    fn date_label(&self) -> String {
        self.0.clone()
    }
}

/// Browser clock using the locale date format
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct BrowserClock;

#[cfg(target_arch = "wasm32")]
impl Clock for BrowserClock {
    fn date_label(&self) -> String {
        let date = js_sys::Date::new_0();
        String::from(date.to_locale_date_string("default", &wasm_bindgen::JsValue::UNDEFINED))
    }
}
