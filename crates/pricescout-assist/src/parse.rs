//! Pulling structured JSON out of free-form model output.

use pricescout_core::Comparison;

use crate::error::AssistError;

/// Narrows a model response down to the JSON it should contain.
///
/// Strips surrounding markdown code fences, then slices to the outermost
/// `[..]` (or `{..}`) so prose before or after the payload is dropped.
#[must_use]
pub fn extract_json(response: &str) -> &str {
    let stripped = response
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim();

    if let (Some(start), Some(end)) = (stripped.find('['), stripped.rfind(']')) {
        if start < end {
            return &stripped[start..=end];
        }
    }
    if let (Some(start), Some(end)) = (stripped.find('{'), stripped.rfind('}')) {
        if start < end {
            return &stripped[start..=end];
        }
    }
    stripped
}

/// Parses a model response into a comparison list.
///
/// # Errors
///
/// Returns [`AssistError::MalformedOutput`] when the response holds no
/// parseable JSON array of comparisons.
pub fn parse_comparison_array(response: &str) -> Result<Vec<Comparison>, AssistError> {
    let json = extract_json(response);
    serde_json::from_str(json).map_err(|e| AssistError::MalformedOutput {
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comparison_json() -> &'static str {
        r#"[{
            "title": "Sonos Ace",
            "store": "amazon.de",
            "price": 279.0,
            "currency": "€",
            "url": "https://www.amazon.de/dp/B0ABC123",
            "condition": "New",
            "assessment": { "cost": 2, "value": 2, "quality": 2, "description": "Found on amazon.de" }
        }]"#
    }

    #[test]
    fn extracts_from_json_fence() {
        let response = format!("```json\n{}\n```", comparison_json());
        assert_eq!(extract_json(&response), comparison_json());
    }

    #[test]
    fn extracts_from_bare_fence() {
        let response = format!("```\n{}\n```", comparison_json());
        assert_eq!(extract_json(&response), comparison_json());
    }

    #[test]
    fn passes_raw_json_through() {
        assert_eq!(extract_json(comparison_json()), comparison_json());
    }

    #[test]
    fn slices_past_surrounding_prose() {
        let response = format!(
            "Here are the matching offers:\n{}\nLet me know if you need more.",
            comparison_json()
        );
        assert_eq!(extract_json(&response), comparison_json());
    }

    #[test]
    fn parses_fenced_comparison_array() {
        let response = format!("```json\n{}\n```", comparison_json());
        let parsed = parse_comparison_array(&response).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].store, "amazon.de");
        assert_eq!(parsed[0].price, 279.0);
    }

    #[test]
    fn empty_array_parses_to_empty_list() {
        assert!(parse_comparison_array("[]").unwrap().is_empty());
    }

    #[test]
    fn non_array_output_is_malformed() {
        let result = parse_comparison_array(r#"{"matches": "none"}"#);
        assert!(
            matches!(result, Err(AssistError::MalformedOutput { .. })),
            "expected MalformedOutput, got: {result:?}"
        );
    }

    #[test]
    fn prose_without_json_is_malformed() {
        let result = parse_comparison_array("I cannot determine matching products.");
        assert!(
            matches!(result, Err(AssistError::MalformedOutput { .. })),
            "expected MalformedOutput, got: {result:?}"
        );
    }
}
