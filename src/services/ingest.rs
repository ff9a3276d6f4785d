use serde_json::Value;

pub(crate) const ANONYMOUS_STUDENT: &str = "anonymous";

/// The `data` object of a Tally webhook payload, if present. The surrounding
/// event envelope (eventId, createdAt, anything else) is ignored.
pub(crate) fn payload_data(body: &Value) -> Option<&Value> {
    body.get("data").filter(|value| value.is_object())
}

/// Best-effort student identifier from a webhook `data` object.
///
/// Tries, in order: the first field typed EMAIL, then the first field whose
/// key is "email" or whose label mentions "email". A rule only matches when
/// its field carries a non-empty string value; otherwise the submission is
/// recorded as anonymous.
pub(crate) fn extract_student_id(data: &Value) -> String {
    let fields = match data.get("fields").and_then(Value::as_array) {
        Some(fields) => fields.as_slice(),
        None => &[],
    };

    let email_field = fields.iter().find(|field| field_str(field, "type") == Some("EMAIL"));
    if let Some(value) = email_field.and_then(field_value) {
        return value.to_string();
    }

    let fallback = fields.iter().find(|field| {
        field_str(field, "key") == Some("email")
            || field_str(field, "label")
                .is_some_and(|label| label.to_lowercase().contains("email"))
    });
    if let Some(value) = fallback.and_then(field_value) {
        return value.to_string();
    }

    ANONYMOUS_STUDENT.to_string()
}

fn field_str<'a>(field: &'a Value, key: &str) -> Option<&'a str> {
    field.get(key).and_then(Value::as_str)
}

fn field_value(field: &Value) -> Option<&str> {
    field_str(field, "value").filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn payload_data_requires_object() {
        assert!(payload_data(&json!({ "data": { "fields": [] } })).is_some());
        assert!(payload_data(&json!({ "eventId": "evt_1" })).is_none());
        assert!(payload_data(&json!({ "data": "not-an-object" })).is_none());
        assert!(payload_data(&json!({ "data": null })).is_none());
    }

    #[test]
    fn email_typed_field_wins() {
        let data = json!({
            "fields": [
                { "key": "question_1", "label": "Q1", "type": "MULTIPLE_CHOICE", "value": "Paris" },
                { "key": "contact", "label": "Your address", "type": "EMAIL", "value": "ada@example.com" },
                { "key": "email", "label": "Email", "type": "INPUT_TEXT", "value": "ignored@example.com" }
            ]
        });
        assert_eq!(extract_student_id(&data), "ada@example.com");
    }

    #[test]
    fn empty_email_value_falls_back_to_key() {
        let data = json!({
            "fields": [
                { "key": "contact", "label": "Your address", "type": "EMAIL", "value": "" },
                { "key": "email", "label": "Backup", "type": "INPUT_TEXT", "value": "bob@example.com" }
            ]
        });
        assert_eq!(extract_student_id(&data), "bob@example.com");
    }

    #[test]
    fn label_match_is_case_insensitive() {
        let data = json!({
            "fields": [
                { "key": "q1", "label": "Student EMAIL Address", "type": "INPUT_TEXT", "value": "carol@example.com" }
            ]
        });
        assert_eq!(extract_student_id(&data), "carol@example.com");
    }

    #[test]
    fn no_match_yields_anonymous() {
        let data = json!({
            "fields": [
                { "key": "question_1", "label": "Q1", "type": "MULTIPLE_CHOICE", "value": "4" }
            ]
        });
        assert_eq!(extract_student_id(&data), ANONYMOUS_STUDENT);
    }

    #[test]
    fn missing_fields_array_yields_anonymous() {
        assert_eq!(extract_student_id(&json!({})), ANONYMOUS_STUDENT);
        assert_eq!(extract_student_id(&json!({ "fields": "oops" })), ANONYMOUS_STUDENT);
    }

    #[test]
    fn non_string_values_are_skipped() {
        let data = json!({
            "fields": [
                { "key": "email", "label": "Email", "type": "EMAIL", "value": 42 },
                { "key": "other", "label": "email backup", "type": "INPUT_TEXT", "value": ["x"] }
            ]
        });
        assert_eq!(extract_student_id(&data), ANONYMOUS_STUDENT);
    }

    #[test]
    fn fields_without_labels_are_tolerated() {
        let data = json!({
            "fields": [
                { "key": "q1", "type": "MULTIPLE_CHOICE", "value": "4" },
                { "key": "email", "type": "INPUT_TEXT", "value": "dan@example.com" }
            ]
        });
        assert_eq!(extract_student_id(&data), "dan@example.com");
    }
}
