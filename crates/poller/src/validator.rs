use serde_json::Value;

use homework_common::error::PollError;
use homework_common::types::HomeworkRecord;

/// Check the decoded payload's shape and return the `homeworks` list in
/// server order. Index 0 is the most recent submission.
pub fn validate(payload: Value) -> Result<Vec<HomeworkRecord>, PollError> {
    let Value::Object(mut map) = payload else {
        return Err(PollError::Schema("expected a JSON object".to_string()));
    };

    if map.is_empty() {
        return Err(PollError::Schema("response object is empty".to_string()));
    }

    let Some(homeworks) = map.remove("homeworks") else {
        tracing::error!("Response is missing the 'homeworks' key");
        return Err(PollError::Schema("missing 'homeworks' key".to_string()));
    };

    let Value::Array(items) = homeworks else {
        return Err(PollError::Schema("'homeworks' is not an array".to_string()));
    };

    Ok(items)
}
