use super::{Facts, ProvisionError};

/// Replaces every `{{ key }}` placeholder in `template` with the fact of the
/// same name. `origin` names the resource in error messages.
pub fn render_template(template: &str, facts: &Facts, origin: &str) -> Result<String, ProvisionError> {
    let mut rendered = String::with_capacity(template.len());
    let mut cursor = template;

    while let Some(start) = cursor.find("{{") {
        rendered.push_str(&cursor[..start]);
        let after_open = &cursor[start + 2..];
        let Some(close_offset) = after_open.find("}}") else {
            return Err(ProvisionError::Template {
                path: origin.to_string(),
                reason: "unclosed placeholder".to_string(),
            });
        };
        let token = after_open[..close_offset].trim();
        if token.is_empty() {
            return Err(ProvisionError::Template {
                path: origin.to_string(),
                reason: "empty placeholder".to_string(),
            });
        }
        rendered.push_str(facts.require(token)?);
        cursor = &after_open[close_offset + 2..];
    }

    rendered.push_str(cursor);
    Ok(rendered)
}
