use serde::Serialize;

use crate::domain::{RawPhoneNumber, Recipients, SendSms};

#[derive(Debug, Clone, Serialize)]
pub(super) struct MessageJsonBody<'a> {
    from: &'a str,
    to: RecipientsJson<'a>,
    text: &'a str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
enum RecipientsJson<'a> {
    One(&'a str),
    Many(Vec<&'a str>),
}

impl<'a> From<&'a SendSms> for MessageJsonBody<'a> {
    fn from(request: &'a SendSms) -> Self {
        let to = match request.to() {
            Recipients::One(phone) => RecipientsJson::One(phone.raw()),
            Recipients::Many(phones) => {
                RecipientsJson::Many(phones.iter().map(RawPhoneNumber::raw).collect())
            }
        };
        Self {
            from: request.from().as_str(),
            to,
            text: request.text().as_str(),
        }
    }
}

pub fn encode_send_sms_body(request: &SendSms) -> Result<serde_json::Value, serde_json::Error> {
    serde_json::to_value(MessageJsonBody::from(request))
}
