use serde_json::Value;

use homework_common::error::PollError;
use homework_common::types::{HomeworkRecord, HomeworkStatus};

/// Render the notification text for one homework record.
///
/// A missing or null `homework_name` is `MissingField`; a `status` that is
/// absent, not a string, or not in the catalog is `UnknownStatus`.
pub fn extract(record: &HomeworkRecord) -> Result<String, PollError> {
    let name = match record.get("homework_name") {
        None | Some(Value::Null) => return Err(PollError::MissingField("homework_name")),
        Some(Value::String(name)) => name.clone(),
        Some(other) => other.to_string(),
    };

    let status = match record.get("status") {
        Some(Value::String(code)) => HomeworkStatus::from_code(code)
            .ok_or_else(|| PollError::UnknownStatus(code.clone()))?,
        Some(other) => return Err(PollError::UnknownStatus(other.to_string())),
        None => return Err(PollError::UnknownStatus("<absent>".to_string())),
    };

    Ok(format!(
        "Status changed for submission \"{}\". {}",
        name,
        status.verdict()
    ))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use homework_common::error::ErrorKind;

    #[test]
    fn test_approved_text() {
        let text = extract(&json!({"homework_name": "hw1", "status": "approved"})).unwrap();
        assert_eq!(
            text,
            "Status changed for submission \"hw1\". Работа проверена: ревьюеру всё понравилось. Ура!"
        );
    }

    #[test]
    fn test_reviewing_and_rejected() {
        assert!(
            extract(&json!({"homework_name": "hw2", "status": "reviewing"}))
                .unwrap()
                .ends_with("Работа взята на проверку ревьюером.")
        );
        assert!(
            extract(&json!({"homework_name": "hw3", "status": "rejected"}))
                .unwrap()
                .ends_with("Работа проверена: у ревьюера есть замечания.")
        );
    }

    #[test]
    fn test_missing_or_null_name() {
        for record in [
            json!({"status": "approved"}),
            json!({"homework_name": null, "status": "approved"}),
            json!("hw1"),
        ] {
            let err = extract(&record).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::MissingField);
        }
    }

    #[test]
    fn test_unknown_status() {
        for code in ["pending", "APPROVED", ""] {
            let err = extract(&json!({"homework_name": "hw1", "status": code})).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::UnknownStatus);
        }
    }

    #[test]
    fn test_non_string_status_is_unknown() {
        for status in [json!(3), json!(true), json!(["approved"])] {
            let err = extract(&json!({"homework_name": "hw1", "status": status})).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::UnknownStatus);
        }
    }

    #[test]
    fn test_missing_or_null_status_is_unknown() {
        for record in [
            json!({"homework_name": "hw1"}),
            json!({"homework_name": "hw1", "status": null}),
        ] {
            let err = extract(&record).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::UnknownStatus);
        }
    }
}
