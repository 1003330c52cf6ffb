use crate::core::validation::ResponseError;

/// Locate the first balanced JSON object in free-form model output
///
/// Scanning starts at the first `{` and tracks nesting depth, skipping
/// braces inside string literals. Prose or markdown fences around the
/// object are ignored.
pub fn extract_json_object(text: &str) -> Result<&str, ResponseError> {
    let start = text.find('{').ok_or(ResponseError::NoJsonFound)?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, byte) in text.as_bytes()[start..].iter().enumerate() {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match byte {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }

    Err(ResponseError::MalformedJson(format!(
        "unterminated object starting at byte {}",
        start
    )))
}
