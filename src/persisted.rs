pub(crate) const SETTINGS_VERSION: u32 = 1;
pub(crate) const PROGRESS_VERSION: u32 = 1;

pub(crate) const SETTINGS_KEY: &str = "settings.v1";
pub(crate) const PROGRESS_KEY: &str = "progress.v1";

#[derive(Clone, Copy, PartialEq, Eq, rkyv::Archive, rkyv::Serialize, rkyv::Deserialize)]
pub(crate) enum ThemeMode {
    System,
    Light,
    Dark,
}

impl Default for ThemeMode {
    fn default() -> Self {
        ThemeMode::System
    }
}

impl ThemeMode {
    pub(crate) fn next(self) -> Self {
        match self {
            ThemeMode::System => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::System,
        }
    }

    /// Value for the `data-theme` attribute the stylesheet keys off.
    pub(crate) fn dom_value(self) -> &'static str {
        match self {
            ThemeMode::System => "system",
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }
}

#[derive(Clone, rkyv::Archive, rkyv::Serialize, rkyv::Deserialize)]
pub(crate) struct SettingsBlob {
    pub(crate) version: u32,
    pub(crate) narration_enabled: bool,
    pub(crate) narration_rate: f32,
    pub(crate) theme_mode: ThemeMode,
}

impl Default for SettingsBlob {
    fn default() -> Self {
        Self {
            version: SETTINGS_VERSION,
            narration_enabled: true,
            narration_rate: crate::narration::NARRATION_RATE_DEFAULT,
            theme_mode: ThemeMode::default(),
        }
    }
}

/// Flat progress counter. The engine reports grades outward; this is the
/// whole of what the app keeps.
#[derive(Clone, rkyv::Archive, rkyv::Serialize, rkyv::Deserialize)]
pub(crate) struct ProgressBlob {
    pub(crate) version: u32,
    pub(crate) score: u32,
    pub(crate) drills_completed: Vec<String>,
}

impl Default for ProgressBlob {
    fn default() -> Self {
        Self {
            version: PROGRESS_VERSION,
            score: 0,
            drills_completed: Vec::new(),
        }
    }
}

impl ProgressBlob {
    pub(crate) fn record_completion(&mut self, slug: &str, correct_count: usize) {
        self.score = self.score.saturating_add(correct_count as u32);
        if !self.drills_completed.iter().any(|done| done == slug) {
            self.drills_completed.push(slug.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn completion_bumps_score_and_dedupes_slug() {
        let mut progress = ProgressBlob::default();
        progress.record_completion("linkers-cause-contrast", 2);
        progress.record_completion("linkers-cause-contrast", 2);
        assert_eq!(progress.score, 4);
        assert_eq!(progress.drills_completed.len(), 1);
    }
}
