//! Rules selected by the `format` and content keywords of string properties.

use crate::error::CompileError;
use crate::rules::applied::AppliedRule;
use crate::schema::keywords::{self, format};
use crate::schema::{Property, TypeCategory};

pub(crate) const DATE: &str = "date";
pub(crate) const DATE_FORMAT: &str = "date_format";
pub(crate) const EMAIL: &str = "email";
pub(crate) const URL: &str = "url";
pub(crate) const IP: &str = "ip";
pub(crate) const IMAGE: &str = "image";

const DATE_FORMATS: [&str; 2] = [format::DATE, format::DATE_TIME];

/// `format` values with a fixed layout, mapped to PHP-style date patterns.
const DATE_LAYOUTS: [(&str, &str); 3] = [
    (format::FULL_DATE_TIME, "Y-m-d h:i:s"),
    (format::FULL_DATE, "Y-m-d"),
    (format::FULL_TIME, "h:i:s"),
];

const IP_FORMATS: [&str; 2] = [format::IPV4, format::IPV6];

const IMAGE_TYPES: [&str; 8] = [
    "image/png",
    "image/jpg",
    "image/jpeg",
    "image/bmp",
    "image/gif",
    "image/svg",
    "image/svg+xml",
    "image/webp",
];

/// The `format` of a string property, or `None` for any other type.
fn string_format(property: &Property) -> Result<Option<&str>, CompileError> {
    if !property.is_of_type(TypeCategory::String)? {
        return Ok(None);
    }
    Ok(property.get_str(keywords::FORMAT))
}

fn date_layout(format: &str) -> Option<&'static str> {
    DATE_LAYOUTS
        .iter()
        .find(|(name, _)| *name == format)
        .map(|(_, layout)| *layout)
}

pub(crate) fn check_date(property: &Property) -> Result<bool, CompileError> {
    Ok(string_format(property)?.is_some_and(|f| DATE_FORMATS.contains(&f)))
}

pub(crate) fn check_date_format(property: &Property) -> Result<bool, CompileError> {
    Ok(string_format(property)?.and_then(date_layout).is_some())
}

pub(crate) fn apply_date_format(property: &Property) -> AppliedRule {
    let layout = property
        .get_str(keywords::FORMAT)
        .and_then(date_layout)
        .unwrap_or_default();
    AppliedRule::with_param(DATE_FORMAT, layout)
}

pub(crate) fn check_email(property: &Property) -> Result<bool, CompileError> {
    Ok(string_format(property)? == Some(format::EMAIL))
}

pub(crate) fn check_url(property: &Property) -> Result<bool, CompileError> {
    Ok(string_format(property)? == Some(format::URI))
}

pub(crate) fn check_ip_address(property: &Property) -> Result<bool, CompileError> {
    Ok(string_format(property)?.is_some_and(|f| IP_FORMATS.contains(&f)))
}

pub(crate) fn check_image(property: &Property) -> Result<bool, CompileError> {
    if !property.is_of_type(TypeCategory::String)? {
        return Ok(false);
    }
    let base64 = property.get_str(keywords::CONTENT_ENCODING) == Some(keywords::BASE64);
    let image = property
        .get_str(keywords::CONTENT_MEDIA_TYPE)
        .is_some_and(|media| IMAGE_TYPES.contains(&media));
    Ok(base64 && image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn string_with_format(format: &str) -> Property {
        Property::new("field", &json!({"type": "string", "format": format}))
    }

    #[test]
    fn test_date_formats() {
        assert!(check_date(&string_with_format("date")).unwrap());
        assert!(check_date(&string_with_format("date-time")).unwrap());
        assert!(!check_date(&string_with_format("full-date")).unwrap());

        let integer = Property::new("field", &json!({"type": "integer", "format": "date"}));
        assert!(!check_date(&integer).unwrap());
    }

    #[test]
    fn test_date_layouts() {
        let cases = [
            ("full-date full-time", "date_format:Y-m-d h:i:s"),
            ("full-date", "date_format:Y-m-d"),
            ("full-time", "date_format:h:i:s"),
        ];
        for (format, expected) in cases {
            let property = string_with_format(format);
            assert!(check_date_format(&property).unwrap());
            assert_eq!(apply_date_format(&property).to_string(), expected);
        }
        assert!(!check_date_format(&string_with_format("date")).unwrap());
    }

    #[test]
    fn test_email_url_ip() {
        assert!(check_email(&string_with_format("email")).unwrap());
        assert!(!check_email(&string_with_format("uri")).unwrap());
        assert!(check_url(&string_with_format("uri")).unwrap());
        assert!(check_ip_address(&string_with_format("ipv4")).unwrap());
        assert!(check_ip_address(&string_with_format("ipv6")).unwrap());
        assert!(!check_ip_address(&string_with_format("ip")).unwrap());
    }

    #[test]
    fn test_image_needs_base64_and_known_type() {
        let png = Property::new(
            "avatar",
            &json!({"type": "string", "contentEncoding": "base64", "contentMediaType": "image/png"}),
        );
        let pdf = Property::new(
            "avatar",
            &json!({"type": "string", "contentEncoding": "base64", "contentMediaType": "application/pdf"}),
        );
        let raw = Property::new(
            "avatar",
            &json!({"type": "string", "contentMediaType": "image/png"}),
        );

        assert!(check_image(&png).unwrap());
        assert!(!check_image(&pdf).unwrap());
        assert!(!check_image(&raw).unwrap());
    }
}
