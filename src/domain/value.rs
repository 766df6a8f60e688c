use crate::domain::validation::ValidationError;

use phonenumber::country;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// NextSMS account username.
///
/// Invariant: non-empty after trimming and free of `:`, which would make the
/// Basic-Auth pair ambiguous.
pub struct Username(String);

impl Username {
    /// Field name used in validation errors.
    pub const FIELD: &'static str = "username";

    /// Create a validated [`Username`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        if trimmed.contains(':') {
            return Err(ValidationError::InvalidCharacter {
                field: Self::FIELD,
                character: ':',
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated username.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// NextSMS account password.
///
/// Invariant: must not be empty (whitespace is preserved and allowed).
pub struct Password(String);

impl Password {
    /// Field name used in validation errors.
    pub const FIELD: &'static str = "password";

    /// Create a validated [`Password`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the password as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Sender id shown to the recipient (`from`).
///
/// Invariant: non-empty after trimming. The value must be registered with your
/// NextSMS account; [`SenderId::default`] is the gateway's shared `NEXTSMS` id.
pub struct SenderId(String);

impl SenderId {
    /// JSON field name used by NextSMS (`from`).
    pub const FIELD: &'static str = "from";

    /// Sender id used when none is given.
    pub const DEFAULT: &'static str = "NEXTSMS";

    /// Create a validated [`SenderId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated sender id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SenderId {
    fn default() -> Self {
        Self(Self::DEFAULT.to_owned())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS message text (`text`).
///
/// Invariant: non-empty after trimming. The original value (including whitespace) is preserved.
pub struct MessageText(String);

impl MessageText {
    /// JSON field name used by NextSMS (`text`).
    pub const FIELD: &'static str = "text";

    /// Create validated message text.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the message text as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Unvalidated phone number as sent to NextSMS (`to`).
///
/// Invariant: non-empty after trimming. This type does not normalize; if you want E.164
/// normalization, parse into [`PhoneNumber`] and convert it into [`RawPhoneNumber`].
pub struct RawPhoneNumber(String);

impl RawPhoneNumber {
    /// JSON field name used by NextSMS (`to`).
    pub const FIELD: &'static str = "to";

    /// Create a validated (non-empty) raw phone number.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Raw (trimmed) value as sent to NextSMS.
    pub fn raw(&self) -> &str {
        &self.0
    }
}

impl From<PhoneNumber> for RawPhoneNumber {
    /// Convert an already-parsed phone number to a normalized raw value (E.164).
    fn from(value: PhoneNumber) -> Self {
        Self(value.e164)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Recipients of a single message (`to`).
///
/// The shape is kept on the wire: [`Recipients::One`] is sent as a JSON string,
/// [`Recipients::Many`] as a JSON array, even when it holds a single number.
pub enum Recipients {
    One(RawPhoneNumber),
    Many(Vec<RawPhoneNumber>),
}

impl Recipients {
    /// Address a single number.
    pub fn one(phone: RawPhoneNumber) -> Self {
        Self::One(phone)
    }

    /// Address a list of numbers.
    ///
    /// Invariant: the list is non-empty.
    pub fn many(phones: Vec<RawPhoneNumber>) -> Result<Self, ValidationError> {
        if phones.is_empty() {
            return Err(ValidationError::Empty {
                field: RawPhoneNumber::FIELD,
            });
        }
        Ok(Self::Many(phones))
    }

    /// Number of addressed phones (at least one).
    pub fn count(&self) -> usize {
        match self {
            Self::One(_) => 1,
            Self::Many(phones) => phones.len(),
        }
    }
}

impl From<RawPhoneNumber> for Recipients {
    fn from(value: RawPhoneNumber) -> Self {
        Self::One(value)
    }
}

#[derive(Debug, Clone)]
/// Parsed phone number with an E.164 representation.
///
/// Equality, ordering, and hashing are based on the E.164 form.
pub struct PhoneNumber {
    raw: String,
    e164: String,
    parsed: phonenumber::PhoneNumber,
}

impl PhoneNumber {
    /// JSON field name used by NextSMS (`to`).
    pub const FIELD: &'static str = "to";

    /// Parse and normalize a phone number into E.164.
    ///
    /// `default_region` is used when the input does not contain an explicit country prefix.
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let input = input.into();
        let raw = input.trim().to_owned();
        if raw.is_empty() {
            return Err(ValidationError::InvalidPhoneNumber {
                input,
                reason: "number is blank".to_owned(),
            });
        }

        let parsed = phonenumber::parse(default_region, &raw).map_err(|err| {
            ValidationError::InvalidPhoneNumber {
                input: raw.clone(),
                reason: err.to_string(),
            }
        })?;

        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();

        Ok(Self { raw, e164, parsed })
    }

    /// Raw input after trimming.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Normalized E.164 representation.
    pub fn e164(&self) -> &str {
        &self.e164
    }

    /// The parsed phone number from the `phonenumber` crate.
    pub fn parsed(&self) -> &phonenumber::PhoneNumber {
        &self.parsed
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.e164 == other.e164
    }
}

impl Eq for PhoneNumber {}

impl std::hash::Hash for PhoneNumber {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.e164.hash(state);
    }
}

impl std::cmp::PartialOrd for PhoneNumber {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::cmp::Ord for PhoneNumber {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.e164.cmp(&other.e164)
    }
}

/// Region assumed for numbers written without a country prefix.
pub const DEFAULT_REGION: country::Id = country::Id::TZ;

/// Normalize a batch of numbers into E.164, preserving order.
///
/// Fails on the first entry that cannot be parsed; nothing is returned for the
/// entries before it.
pub fn normalize_numbers<I, S>(
    numbers: I,
    default_region: country::Id,
) -> Result<Vec<RawPhoneNumber>, ValidationError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    numbers
        .into_iter()
        .map(|number| PhoneNumber::parse(Some(default_region), number).map(RawPhoneNumber::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_newtypes_trim_or_validate() {
        let username = Username::new(" user ").unwrap();
        assert_eq!(username.as_str(), "user");
        assert!(Username::new("  ").is_err());

        let password = Password::new(" secret ").unwrap();
        assert_eq!(password.as_str(), " secret ");
        assert!(Password::new("").is_err());

        let sender = SenderId::new(" SHOP ").unwrap();
        assert_eq!(sender.as_str(), "SHOP");
        assert!(SenderId::new(" ").is_err());

        let msg = MessageText::new(" hi ").unwrap();
        assert_eq!(msg.as_str(), " hi ");
        assert!(MessageText::new("  ").is_err());
    }

    #[test]
    fn username_rejects_colon() {
        assert_eq!(
            Username::new("us:er"),
            Err(ValidationError::InvalidCharacter {
                field: Username::FIELD,
                character: ':',
            })
        );
    }

    #[test]
    fn password_debug_is_redacted() {
        let password = Password::new("hunter2").unwrap();
        assert_eq!(format!("{password:?}"), "Password(***)");
    }

    #[test]
    fn sender_id_defaults_to_nextsms() {
        assert_eq!(SenderId::default().as_str(), "NEXTSMS");
    }

    #[test]
    fn raw_phone_number_trims_and_exposes_raw() {
        let raw = RawPhoneNumber::new(" 255757294146 ").unwrap();
        assert_eq!(raw.raw(), "255757294146");
        assert!(RawPhoneNumber::new("").is_err());
    }

    #[test]
    fn recipients_many_rejects_empty_list() {
        assert_eq!(
            Recipients::many(Vec::new()),
            Err(ValidationError::Empty {
                field: RawPhoneNumber::FIELD
            })
        );

        let phone = RawPhoneNumber::new("255757294146").unwrap();
        let many = Recipients::many(vec![phone.clone()]).unwrap();
        assert_eq!(many.count(), 1);
        assert!(matches!(many, Recipients::Many(_)));
        assert_eq!(Recipients::from(phone.clone()), Recipients::One(phone));
    }

    #[test]
    fn phone_number_parsing_and_equality_use_e164() {
        let p1 = PhoneNumber::parse(Some(DEFAULT_REGION), "0757294146").unwrap();
        let p2 = PhoneNumber::parse(None, "+255 757 294 146").unwrap();
        assert_eq!(p1, p2);
        assert_eq!(p1.e164(), "+255757294146");
        assert_eq!(p1.raw(), "0757294146");

        let raw: RawPhoneNumber = p1.into();
        assert_eq!(raw.raw(), "+255757294146");
    }

    #[test]
    fn phone_number_parse_reports_input() {
        let err = PhoneNumber::parse(Some(DEFAULT_REGION), "not-a-number").unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidPhoneNumber { ref input, .. } if input == "not-a-number"
        ));
    }

    #[test]
    fn phone_number_parse_keeps_blank_input() {
        assert_eq!(
            PhoneNumber::parse(Some(DEFAULT_REGION), "   ").unwrap_err(),
            ValidationError::InvalidPhoneNumber {
                input: "   ".to_owned(),
                reason: "number is blank".to_owned(),
            }
        );
    }

    #[test]
    fn normalize_numbers_preserves_order() {
        let normalized =
            normalize_numbers(["0757294146", "+255 712 345 678"], DEFAULT_REGION).unwrap();
        let raw = normalized.iter().map(RawPhoneNumber::raw).collect::<Vec<_>>();
        assert_eq!(raw, vec!["+255757294146", "+255712345678"]);
    }

    #[test]
    fn normalize_numbers_fails_whole_batch() {
        let err = normalize_numbers(["0757294146", "not-a-number"], DEFAULT_REGION).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidPhoneNumber { .. }));
    }

    #[test]
    fn normalize_numbers_accepts_empty_batch() {
        let normalized = normalize_numbers(Vec::<String>::new(), DEFAULT_REGION).unwrap();
        assert!(normalized.is_empty());
    }
}
