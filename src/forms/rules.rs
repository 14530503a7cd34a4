//! Field validation rules shared by every form on the site.
//!
//! Values are trimmed before checking. Error strings are the exact copy
//! shown under the offending field.

use serde::Serialize;

/// What a text input holds, which decides the rule applied to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Name,
    Email,
    /// Optional, but length-checked when filled in.
    Referral,
    /// Any other text input marked required.
    RequiredText,
}

/// Validates one trimmed field value. `Err` carries the message to show.
pub fn validate(kind: FieldKind, raw: &str) -> Result<(), &'static str> {
    let value = raw.trim();
    let len = value.chars().count();
    match kind {
        FieldKind::Name => {
            if value.is_empty() {
                Err("Name is required")
            } else if len < 2 {
                Err("Name must be at least 2 characters")
            } else if len > 100 {
                Err("Name must be less than 100 characters")
            } else {
                Ok(())
            }
        }
        FieldKind::Email => {
            if value.is_empty() {
                Err("Email is required")
            } else if !is_valid_email(value) {
                Err("Please enter a valid email address")
            } else {
                Ok(())
            }
        }
        FieldKind::Referral => {
            if value.is_empty() {
                Ok(())
            } else if len < 3 {
                Err("Referral code must be at least 3 characters")
            } else if len > 50 {
                Err("Referral code must be less than 50 characters")
            } else {
                Ok(())
            }
        }
        FieldKind::RequiredText => {
            if value.is_empty() {
                Err("This field is required")
            } else {
                Ok(())
            }
        }
    }
}

/// Shape check for email addresses: a single `@` with non-empty halves, no
/// whitespace anywhere, and a dot inside the domain with characters on both
/// sides.
pub fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// What a successful waitlist submit hands off.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct WaitlistPayload {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referral: Option<String>,
}

impl WaitlistPayload {
    /// Builds the payload from raw input values; the referral is dropped
    /// when left blank.
    pub fn from_fields(name: &str, email: &str, referral: &str) -> Self {
        let referral = referral.trim();
        Self {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            referral: (!referral.is_empty()).then(|| referral.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_rule_boundaries() {
        assert_eq!(validate(FieldKind::Name, ""), Err("Name is required"));
        assert_eq!(validate(FieldKind::Name, "   "), Err("Name is required"));
        assert_eq!(
            validate(FieldKind::Name, "A"),
            Err("Name must be at least 2 characters")
        );
        assert_eq!(validate(FieldKind::Name, "Al"), Ok(()));
        assert_eq!(validate(FieldKind::Name, &"x".repeat(100)), Ok(()));
        assert_eq!(
            validate(FieldKind::Name, &"x".repeat(101)),
            Err("Name must be less than 100 characters")
        );
    }

    #[test]
    fn name_rule_trims_before_counting() {
        assert_eq!(validate(FieldKind::Name, "  Jo  "), Ok(()));
    }

    #[test]
    fn email_rule() {
        assert_eq!(validate(FieldKind::Email, ""), Err("Email is required"));
        assert_eq!(
            validate(FieldKind::Email, "not-an-email"),
            Err("Please enter a valid email address")
        );
        assert_eq!(validate(FieldKind::Email, "a@b.co"), Ok(()));
    }

    #[test]
    fn email_shapes() {
        for ok in ["a@b.c", "first.last@mail.example.com", "x@y.z.w", "a@b..c"] {
            assert!(is_valid_email(ok), "{ok} should pass");
        }
        for bad in [
            "a@b", "@b.c", "a@.c", "a@b.", "a b@c.d", "a@@b.c", "a@b@c.d", "", "plain",
            "a@ b.c",
        ] {
            assert!(!is_valid_email(bad), "{bad} should fail");
        }
    }

    #[test]
    fn referral_is_optional_but_length_checked() {
        assert_eq!(validate(FieldKind::Referral, ""), Ok(()));
        assert_eq!(validate(FieldKind::Referral, "   "), Ok(()));
        assert_eq!(
            validate(FieldKind::Referral, "ab"),
            Err("Referral code must be at least 3 characters")
        );
        assert_eq!(validate(FieldKind::Referral, "abc"), Ok(()));
        assert_eq!(validate(FieldKind::Referral, &"r".repeat(50)), Ok(()));
        assert_eq!(
            validate(FieldKind::Referral, &"r".repeat(51)),
            Err("Referral code must be less than 50 characters")
        );
    }

    #[test]
    fn required_text_rule() {
        assert_eq!(
            validate(FieldKind::RequiredText, " "),
            Err("This field is required")
        );
        assert_eq!(validate(FieldKind::RequiredText, "anything"), Ok(()));
    }

    #[test]
    fn payload_trims_and_drops_blank_referral() {
        let p = WaitlistPayload::from_fields(" Ada ", " ada@mail.dev ", "  ");
        assert_eq!(p.name, "Ada");
        assert_eq!(p.email, "ada@mail.dev");
        assert_eq!(p.referral, None);

        let q = WaitlistPayload::from_fields("Ada", "ada@mail.dev", " FRIEND42 ");
        assert_eq!(q.referral.as_deref(), Some("FRIEND42"));
    }

    #[test]
    fn payload_serializes_without_empty_referral() {
        let p = WaitlistPayload::from_fields("Ada", "ada@mail.dev", "");
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, r#"{"name":"Ada","email":"ada@mail.dev"}"#);
    }
}
