use crate::preferences::Preferences;

pub const CAT_PORTRAIT: &str = include_str!("../data/prompts/cat_portrait.txt");

/// Replace `{{key}}` placeholders in a template string.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{{{}}}}}", key), value);
    }
    result
}

/// Build the image prompt for a set of preference labels.
///
/// Unrecognized labels resolve to the category default, so this never fails.
pub fn compose_prompt(color: &str, personality: &str, appearance: &str, role: &str) -> String {
    Preferences::from_labels(color, personality, appearance, role).prompt()
}

pub(crate) fn render_portrait(preferences: &Preferences) -> String {
    let prompt = render(
        CAT_PORTRAIT,
        &[
            ("color", preferences.color.phrase()),
            ("personality", preferences.personality.phrase()),
            ("appearance", preferences.appearance.phrase()),
            ("role", preferences.role.phrase()),
        ],
    );
    let prompt = prompt.trim_end().to_string();
    tracing::debug!("Composed prompt: {}", prompt);
    prompt
}
