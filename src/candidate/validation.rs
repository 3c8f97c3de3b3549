//! Identity field validation for candidate registration and updates

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;

pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 100;
pub const COUNTRY_MAX_CHARS: usize = 100;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\d\s\-\+\(\)]+$").expect("valid phone pattern"));

/// Trimmed name of 2-100 characters
pub fn normalize_name(name: &str) -> Result<String> {
    let name = name.trim();
    let chars = name.chars().count();
    if chars < NAME_MIN_CHARS {
        return Err(Error::validation(
            "name",
            format!("Name must be at least {} characters", NAME_MIN_CHARS),
        ));
    }
    if chars > NAME_MAX_CHARS {
        return Err(Error::validation(
            "name",
            format!("Name cannot exceed {} characters", NAME_MAX_CHARS),
        ));
    }
    Ok(name.to_string())
}

/// Trimmed, lowercased email address
pub fn normalize_email(email: &str) -> Result<String> {
    let email = email.trim().to_lowercase();
    if !EMAIL_PATTERN.is_match(&email) {
        return Err(Error::validation("email", "Please provide a valid email address"));
    }
    Ok(email)
}

/// Trimmed phone number made of digits, spaces, `-`, `+` and parentheses
pub fn normalize_phone(phone: &str) -> Result<String> {
    let phone = phone.trim();
    if !PHONE_PATTERN.is_match(phone) {
        return Err(Error::validation("phone", "Please provide a valid phone number"));
    }
    Ok(phone.to_string())
}

/// Trimmed country; blank becomes `None`
pub fn normalize_country(country: Option<&str>) -> Result<Option<String>> {
    let Some(country) = country.map(str::trim).filter(|c| !c.is_empty()) else {
        return Ok(None);
    };
    if country.chars().count() > COUNTRY_MAX_CHARS {
        return Err(Error::validation(
            "country",
            format!("Country name cannot exceed {} characters", COUNTRY_MAX_CHARS),
        ));
    }
    Ok(Some(country.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_name() {
        assert_eq!(normalize_name("  Ada Lovelace ").unwrap(), "Ada Lovelace");
        assert!(normalize_name(" A ").is_err());
        assert!(normalize_name(&"x".repeat(101)).is_err());
        assert!(normalize_name(&"x".repeat(100)).is_ok());
    }

    #[test]
    fn test_email() {
        assert_eq!(
            normalize_email(" John.Doe@Example.COM ").unwrap(),
            "john.doe@example.com"
        );
        let err = normalize_email("invalidemail").unwrap_err();
        assert_matches!(err, Error::Validation { ref field, .. } if field == "email");
        assert!(normalize_email("a b@c.io").is_err());
        assert!(normalize_email("a@b").is_err());
    }

    #[test]
    fn test_phone() {
        assert_eq!(normalize_phone(" +1 (234) 567-890 ").unwrap(), "+1 (234) 567-890");
        assert!(normalize_phone("call me").is_err());
        assert!(normalize_phone("").is_err());
    }

    #[test]
    fn test_country() {
        assert_eq!(normalize_country(None).unwrap(), None);
        assert_eq!(normalize_country(Some("   ")).unwrap(), None);
        assert_eq!(normalize_country(Some(" UK ")).unwrap(), Some("UK".to_string()));
        assert!(normalize_country(Some(&"y".repeat(101))).is_err());
    }
}
