//! Decoding of plan generator output.
//!
//! The generator answers with exactly one stdout line holding a JSON object:
//!
//! ```json
//! {"commands": ["echo hi"], "files": [{"path": "a.txt", "content": "..."}], "error": null}
//! ```
//!
//! Decoding is strict: anything other than one well-formed payload is a
//! [`GenerationError`], never a partial plan.

use super::entities::{Plan, PlanFile};
use super::error::{GenerationError, PlanField};
use serde_json::Value;

/// Decode the complete stdout of a generator run.
///
/// Whitespace-only lines are not counted as output.
pub fn decode_generator_output<S: AsRef<str>>(lines: &[S]) -> Result<Plan, GenerationError> {
    let mut outputs = lines
        .iter()
        .map(AsRef::as_ref)
        .filter(|line| !line.trim().is_empty());

    let Some(line) = outputs.next() else {
        return Err(GenerationError::NoOutput);
    };
    if outputs.next().is_some() {
        return Err(GenerationError::MultipleOutputs);
    }

    decode_payload(line)
}

/// Decode a single payload line.
pub fn decode_payload(line: &str) -> Result<Plan, GenerationError> {
    let json: Value = serde_json::from_str(line.trim())
        .map_err(|e| GenerationError::InvalidPayload(e.to_string()))?;

    if let Some(message) = reported_error(&json) {
        return Err(GenerationError::Reported(message));
    }

    let commands = json
        .get("commands")
        .and_then(Value::as_array)
        .ok_or(GenerationError::InvalidField(PlanField::Commands))?
        .iter()
        .map(|c| c.as_str().map(str::to_string))
        .collect::<Option<Vec<_>>>()
        .ok_or(GenerationError::InvalidField(PlanField::Commands))?;

    let files = json
        .get("files")
        .and_then(Value::as_array)
        .ok_or(GenerationError::InvalidField(PlanField::Files))?
        .iter()
        .map(parse_file)
        .collect::<Option<Vec<_>>>()
        .ok_or(GenerationError::InvalidField(PlanField::Files))?;

    Ok(Plan::new(commands, files))
}

/// Search generator output for a payload carrying an `error` field.
///
/// Used when the generator exited abnormally: it may still have printed its
/// own error payload before exiting.
pub fn find_reported_error<S: AsRef<str>>(lines: &[S]) -> Option<String> {
    lines
        .iter()
        .filter_map(|line| serde_json::from_str::<Value>(line.as_ref().trim()).ok())
        .find_map(|json| reported_error(&json))
}

/// Extract a truthy `error` field. `null`, `false`, `0` and `""` mean no error.
fn reported_error(json: &Value) -> Option<String> {
    match json.get("error")? {
        Value::Null | Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn parse_file(value: &Value) -> Option<PlanFile> {
    let path = value.get("path")?.as_str()?;
    let content = match value.get("content") {
        None | Some(Value::Null) => "",
        Some(v) => v.as_str()?,
    };
    Some(PlanFile::new(path, content))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_single_command() {
        let plan = decode_generator_output(&[r#"{"commands":["echo hi"],"files":[]}"#]).unwrap();
        assert_eq!(plan.commands, vec!["echo hi"]);
        assert!(plan.files.is_empty());
    }

    #[test]
    fn test_decode_with_files_and_null_error() {
        let line = r#"{"commands":["touch a.txt","cat a.txt"],"files":[{"path":"a.txt","content":"hello"}],"error":null}"#;
        let plan = decode_generator_output(&[line]).unwrap();
        assert_eq!(plan.commands.len(), 2);
        assert_eq!(plan.files, vec![PlanFile::new("a.txt", "hello")]);
    }

    #[test]
    fn test_no_output() {
        let lines: [&str; 0] = [];
        assert_eq!(decode_generator_output(&lines), Err(GenerationError::NoOutput));
        assert_eq!(
            decode_generator_output(&["", "   "]),
            Err(GenerationError::NoOutput)
        );
    }

    #[test]
    fn test_multiple_outputs_regardless_of_content() {
        let valid = r#"{"commands":[],"files":[]}"#;
        assert_eq!(
            decode_generator_output(&[valid, valid]),
            Err(GenerationError::MultipleOutputs)
        );
        assert_eq!(
            decode_generator_output(&["garbage", "more garbage"]),
            Err(GenerationError::MultipleOutputs)
        );
    }

    #[test]
    fn test_trailing_blank_line_is_ignored() {
        let plan = decode_generator_output(&[r#"{"commands":["ls"],"files":[]}"#, ""]).unwrap();
        assert_eq!(plan.commands, vec!["ls"]);
    }

    #[test]
    fn test_invalid_payload() {
        let err = decode_generator_output(&["{not json"]).unwrap_err();
        assert!(matches!(err, GenerationError::InvalidPayload(_)));
        assert!(err.to_string().starts_with("invalid payload: "));
    }

    #[test]
    fn test_reported_error_wins_over_fields() {
        let line = r#"{"commands":["rm -rf /tmp/x"],"files":[],"error":"API token missing"}"#;
        assert_eq!(
            decode_generator_output(&[line]),
            Err(GenerationError::Reported("API token missing".to_string()))
        );
    }

    #[test]
    fn test_empty_error_string_is_not_an_error() {
        let line = r#"{"commands":[],"files":[],"error":""}"#;
        assert!(decode_generator_output(&[line]).is_ok());
    }

    #[test]
    fn test_zero_error_code_is_not_an_error() {
        for zero in ["0", "0.0", "-0"] {
            let line = format!(r#"{{"commands":["ls"],"files":[],"error":{}}}"#, zero);
            assert_eq!(
                decode_generator_output(&[line.as_str()]),
                Ok(Plan::new(vec!["ls".to_string()], vec![]))
            );
            assert_eq!(find_reported_error(&[line.as_str()]), None);
        }

        let line = r#"{"commands":[],"files":[],"error":2}"#;
        assert_eq!(
            decode_generator_output(&[line]),
            Err(GenerationError::Reported("2".to_string()))
        );
    }

    #[test]
    fn test_missing_commands() {
        assert_eq!(
            decode_generator_output(&[r#"{"files":[]}"#]),
            Err(GenerationError::InvalidField(PlanField::Commands))
        );
    }

    #[test]
    fn test_commands_not_a_sequence() {
        assert_eq!(
            decode_generator_output(&[r#"{"commands":"ls","files":[]}"#]),
            Err(GenerationError::InvalidField(PlanField::Commands))
        );
        assert_eq!(
            decode_generator_output(&[r#"{"commands":[1,2],"files":[]}"#]),
            Err(GenerationError::InvalidField(PlanField::Commands))
        );
    }

    #[test]
    fn test_missing_or_malformed_files() {
        assert_eq!(
            decode_generator_output(&[r#"{"commands":[]}"#]),
            Err(GenerationError::InvalidField(PlanField::Files))
        );
        assert_eq!(
            decode_generator_output(&[r#"{"commands":[],"files":{"a":"b"}}"#]),
            Err(GenerationError::InvalidField(PlanField::Files))
        );
        assert_eq!(
            decode_generator_output(&[r#"{"commands":[],"files":[{"content":"x"}]}"#]),
            Err(GenerationError::InvalidField(PlanField::Files))
        );
    }

    #[test]
    fn test_file_without_content_defaults_to_empty() {
        let plan = decode_generator_output(&[r#"{"commands":[],"files":[{"path":"x"}]}"#]).unwrap();
        assert_eq!(plan.files, vec![PlanFile::new("x", "")]);
    }

    #[test]
    fn test_non_object_payload_reports_commands() {
        assert_eq!(
            decode_generator_output(&["[1, 2, 3]"]),
            Err(GenerationError::InvalidField(PlanField::Commands))
        );
    }

    #[test]
    fn test_find_reported_error() {
        let lines = [
            "Traceback (most recent call last):",
            r#"{"commands":[],"files":[],"error":"Model is required"}"#,
        ];
        assert_eq!(find_reported_error(&lines), Some("Model is required".to_string()));
        assert_eq!(find_reported_error(&[r#"{"commands":[],"files":[]}"#]), None);
    }
}
