use serde_json::Value;

use super::Submission;
use crate::error::WatchError;

/// Validated body of one poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollResult {
    /// Most recent first, as the API orders them.
    pub submissions: Vec<Submission>,
    /// Server time of the response; lower bound for the next poll.
    pub current_date: i64,
}

impl PollResult {
    pub fn latest(&self) -> Option<&Submission> {
        self.submissions.first()
    }
}

/// Check the shape of a decoded poll response.
///
/// A missing or non-array `homeworks` field is rejected rather than read as
/// an empty list. An empty array is valid and means there is nothing to report.
pub fn check_response(response: Value) -> Result<PollResult, WatchError> {
    let mut body = match response {
        Value::Object(body) => body,
        other => {
            return Err(WatchError::malformed(format!(
                "expected a JSON object, got {}",
                type_name(&other)
            )))
        }
    };

    let homeworks = body
        .remove("homeworks")
        .ok_or_else(|| WatchError::malformed("missing field 'homeworks'"))?;
    let items = match homeworks {
        Value::Array(items) => items,
        other => {
            return Err(WatchError::malformed(format!(
                "'homeworks' must be an array, got {}",
                type_name(&other)
            )))
        }
    };

    let current_date = match body.get("current_date") {
        Some(value) => value.as_i64().ok_or_else(|| {
            WatchError::malformed(format!(
                "'current_date' must be an integer timestamp, got {}",
                value
            ))
        })?,
        None => return Err(WatchError::malformed("missing field 'current_date'")),
    };

    let submissions = items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            serde_json::from_value::<Submission>(item)
                .map_err(|e| WatchError::malformed(format!("homeworks[{}]: {}", i, e)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PollResult {
        submissions,
        current_date,
    })
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::HomeworkStatus;
    use serde_json::json;

    fn assert_malformed(result: Result<PollResult, WatchError>, needle: &str) {
        match result {
            Err(WatchError::MalformedResponse(msg)) => {
                assert!(msg.contains(needle), "'{}' not in '{}'", needle, msg)
            }
            other => panic!("expected MalformedResponse, got {:?}", other),
        }
    }

    #[test]
    fn test_accepts_submissions_in_order() {
        let result = check_response(json!({
            "homeworks": [
                {"homework_name": "hw2", "status": "approved"},
                {"homework_name": "hw1", "status": "rejected"}
            ],
            "current_date": 1000
        }))
        .unwrap();

        assert_eq!(result.current_date, 1000);
        assert_eq!(result.submissions.len(), 2);
        let latest = result.latest().unwrap();
        assert_eq!(latest.homework_name, "hw2");
        assert_eq!(latest.status, HomeworkStatus::Approved);
    }

    #[test]
    fn test_empty_list_is_nothing_to_report() {
        let result = check_response(json!({"homeworks": [], "current_date": 1100})).unwrap();
        assert!(result.submissions.is_empty());
        assert!(result.latest().is_none());
        assert_eq!(result.current_date, 1100);
    }

    #[test]
    fn test_rejects_missing_homeworks() {
        assert_malformed(check_response(json!({"current_date": 1})), "missing field 'homeworks'");
    }

    #[test]
    fn test_rejects_non_array_homeworks() {
        assert_malformed(
            check_response(json!({"homeworks": {"homework_name": "hw1"}, "current_date": 1})),
            "must be an array",
        );
        assert_malformed(
            check_response(json!({"homeworks": null, "current_date": 1})),
            "got null",
        );
    }

    #[test]
    fn test_rejects_non_object_body() {
        assert_malformed(check_response(json!([1, 2, 3])), "expected a JSON object");
    }

    #[test]
    fn test_rejects_missing_or_bad_current_date() {
        assert_malformed(
            check_response(json!({"homeworks": []})),
            "missing field 'current_date'",
        );
        assert_malformed(
            check_response(json!({"homeworks": [], "current_date": "yesterday"})),
            "integer timestamp",
        );
    }

    #[test]
    fn test_rejects_bad_submission_entry() {
        assert_malformed(
            check_response(json!({
                "homeworks": [{"status": "approved"}],
                "current_date": 1
            })),
            "homeworks[0]",
        );
    }
}
