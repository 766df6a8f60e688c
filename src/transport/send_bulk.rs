use serde::Serialize;

use super::send_sms::MessageJsonBody;
use crate::domain::SendBulk;

#[derive(Debug, Clone, Serialize)]
struct SendBulkJsonBody<'a> {
    messages: Vec<MessageJsonBody<'a>>,
}

pub fn encode_send_bulk_body(request: &SendBulk) -> Result<serde_json::Value, serde_json::Error> {
    let body = SendBulkJsonBody {
        messages: request.messages().iter().map(MessageJsonBody::from).collect(),
    };
    serde_json::to_value(body)
}
