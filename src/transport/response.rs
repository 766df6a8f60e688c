#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),
}

/// The gateway's JSON is handed back untouched; no schema is imposed on it.
pub fn decode_json_response(body: &str) -> Result<serde_json::Value, TransportError> {
    Ok(serde_json::from_str(body)?)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn decode_returns_body_verbatim() {
        let body = r#"
        {
          "messages": [
            {
              "to": "255757294146",
              "status": { "groupId": 18, "groupName": "PENDING", "id": 51, "name": "ENROUTE (SENT)" },
              "messageId": "28089492984101631440",
              "smsCount": 1
            }
          ]
        }
        "#;

        let value = decode_json_response(body).unwrap();
        assert_eq!(value["messages"][0]["messageId"], json!("28089492984101631440"));
        assert_eq!(value["messages"][0]["status"]["groupName"], json!("PENDING"));
    }

    #[test]
    fn decode_rejects_non_json() {
        assert!(matches!(
            decode_json_response("<html>bad gateway</html>"),
            Err(TransportError::Json(_))
        ));
        assert!(decode_json_response("").is_err());
    }
}
