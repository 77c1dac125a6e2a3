//! JSON Schema keywords and values the rule compiler reads.

pub const PROPERTIES: &str = "properties";
pub const REQUIRED: &str = "required";

pub const TYPE: &str = "type";
pub const FORMAT: &str = "format";
pub const ENUM: &str = "enum";
pub const PATTERN: &str = "pattern";
pub const MULTIPLE_OF: &str = "multipleOf";
pub const UNIQUE_ITEMS: &str = "uniqueItems";
pub const CONTENT_ENCODING: &str = "contentEncoding";
pub const CONTENT_MEDIA_TYPE: &str = "contentMediaType";

pub const MINIMUM: &str = "minimum";
pub const MAXIMUM: &str = "maximum";
pub const MIN_LENGTH: &str = "minLength";
pub const MAX_LENGTH: &str = "maxLength";
pub const MIN_ITEMS: &str = "minItems";
pub const MAX_ITEMS: &str = "maxItems";

pub const NOT: &str = "not";
pub const ALL_OF: &str = "allOf";

/// Values of the `format` keyword.
pub mod format {
    pub const DATE: &str = "date";
    pub const DATE_TIME: &str = "date-time";
    pub const FULL_DATE: &str = "full-date";
    pub const FULL_TIME: &str = "full-time";
    pub const FULL_DATE_TIME: &str = "full-date full-time";
    pub const URI: &str = "uri";
    pub const EMAIL: &str = "email";
    pub const IPV4: &str = "ipv4";
    pub const IPV6: &str = "ipv6";
}

/// `contentEncoding` value for base64 payloads.
pub const BASE64: &str = "base64";
