use serde::Deserialize;

/// What to do with the form once the server accepted it.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AfterSubmitConfig {
    #[default]
    ResetForm,
    DismissOverlay { close_selector: String },
    Nothing,
}

/// Selectors and endpoints the page is expected to provide.
///
/// Every field has a default matching the workout pages, so a JS caller only
/// passes the keys it wants to change.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub form_selector: String,
    pub container_selector: String,
    pub recent_endpoint: String,
    pub after_submit: AfterSubmitConfig,
    pub reps_selector: String,
    pub weight_selector: String,
    pub estimate_selector: String,
    pub log_level: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            form_selector: "#log-performance-form".to_string(),
            container_selector: "#recent-workouts-container".to_string(),
            recent_endpoint: "/api/api_recent_workouts.sql".to_string(),
            after_submit: AfterSubmitConfig::default(),
            reps_selector: r#"input[name="reps_1"]"#.to_string(),
            weight_selector: r#"input[name="weight_1"]"#.to_string(),
            estimate_selector: "#est_1rm_input".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl PageConfig {
    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}
