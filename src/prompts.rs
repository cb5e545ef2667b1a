pub const PART_OF_SPEECH_AVATAR: &str = include_str!("../data/prompts/part_of_speech.txt");

/// Replace `{{key}}` placeholders in a template string.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{{{}}}}}", key), value);
    }
    result
}
