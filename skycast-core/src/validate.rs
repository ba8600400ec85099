//! Provider-level validity checks, applied to parsed documents before any
//! typed deserialization.

use serde_json::Value;

use crate::model::FetchError;

/// Which provider document a payload claims to be. The validity rule is
/// shared; what an invalid document *means* differs by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Current,
    Forecast,
}

/// Success sentinel for the provider's `cod` status field.
const SUCCESS_CODE: &str = "200";

/// Validate a parsed provider document.
///
/// A document is valid iff it is a non-empty object and, when it carries a
/// `cod` status field, that field stringifies to `"200"`. An invalid
/// current-weather document is a hard `LocationNotFound`; an invalid
/// forecast document yields `Ok(false)` so callers degrade to "no forecast
/// available" instead of aborting a fetch that already succeeded.
pub fn validate(document: &Value, kind: DocumentKind) -> Result<bool, FetchError> {
    if is_valid(document) {
        return Ok(true);
    }

    match kind {
        DocumentKind::Current => Err(FetchError::LocationNotFound),
        DocumentKind::Forecast => Ok(false),
    }
}

fn is_valid(document: &Value) -> bool {
    let Some(fields) = document.as_object() else {
        return false;
    };
    if fields.is_empty() {
        return false;
    }

    match fields.get("cod") {
        None => true,
        Some(code) => stringify(code) == SUCCESS_CODE,
    }
}

/// The provider encodes `cod` as a number or a string depending on the
/// endpoint, so the sentinel comparison is on string representations.
fn stringify(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numeric_and_string_success_codes_are_equivalent() {
        assert_eq!(validate(&json!({"cod": 200, "name": "x"}), DocumentKind::Current), Ok(true));
        assert_eq!(validate(&json!({"cod": "200", "name": "x"}), DocumentKind::Current), Ok(true));
    }

    #[test]
    fn missing_status_field_is_not_failure() {
        let doc = json!({"name": "London", "main": {"temp": 20.0}});
        assert_eq!(validate(&doc, DocumentKind::Current), Ok(true));
        assert_eq!(validate(&doc, DocumentKind::Forecast), Ok(true));
    }

    #[test]
    fn failure_code_on_current_is_location_not_found() {
        let doc = json!({"cod": "404", "message": "city not found"});
        assert_eq!(validate(&doc, DocumentKind::Current), Err(FetchError::LocationNotFound));
    }

    #[test]
    fn failure_code_on_forecast_degrades_instead_of_failing() {
        let doc = json!({"cod": 404});
        assert_eq!(validate(&doc, DocumentKind::Forecast), Ok(false));
    }

    #[test]
    fn empty_document_is_invalid() {
        assert_eq!(validate(&json!({}), DocumentKind::Current), Err(FetchError::LocationNotFound));
        assert_eq!(validate(&json!({}), DocumentKind::Forecast), Ok(false));
    }

    #[test]
    fn non_object_documents_are_invalid() {
        assert_eq!(validate(&json!([1, 2, 3]), DocumentKind::Current), Err(FetchError::LocationNotFound));
        assert_eq!(validate(&json!(null), DocumentKind::Forecast), Ok(false));
    }
}
