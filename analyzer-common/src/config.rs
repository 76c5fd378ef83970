/// Element identifier of the analysis form.
pub const FORM_ID: &str = "analysis-form";
/// Element identifier of the form's submit button.
pub const BUTTON_ID: &str = "analyze-button";
/// Element identifier of the loading indicator.
pub const LOADER_ID: &str = "loader";
/// Button label while an analysis is in flight ("Analyzing...").
pub const BUSY_LABEL: &str = "جاري التحليل...";
/// CSS `display` value that makes the loading indicator visible.
pub const LOADER_DISPLAY: &str = "block";

/// Identifiers and strings the submit guard works with.
///
/// `Default` matches the markup served with the analysis page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardConfig {
    pub form_id: String,
    pub button_id: String,
    pub loader_id: String,
    pub busy_label: String,
    pub loader_display: String,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            form_id: FORM_ID.to_string(),
            button_id: BUTTON_ID.to_string(),
            loader_id: LOADER_ID.to_string(),
            busy_label: BUSY_LABEL.to_string(),
            loader_display: LOADER_DISPLAY.to_string(),
        }
    }
}
