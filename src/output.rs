use serde::Serialize;

use crate::error::AppResult;

/// Compact JSON for a non-empty result, `None` otherwise.
pub fn render<T: Serialize>(items: &[T]) -> AppResult<Option<String>> {
    if items.is_empty() {
        return Ok(None);
    }

    Ok(Some(serde_json::to_string(items)?))
}

pub fn print(payload: Option<&str>) {
    if let Some(payload) = payload {
        println!("{payload}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_result_renders_nothing() {
        let items: Vec<String> = Vec::new();
        assert_eq!(render(&items).expect("render"), None);
    }

    #[test]
    fn keeps_non_ascii_text() {
        let rendered = render(&["日報"]).expect("render");
        assert_eq!(rendered.as_deref(), Some(r#"["日報"]"#));
    }
}
