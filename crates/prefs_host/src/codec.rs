//! Canonical text encoding for typed preference values.
//!
//! Every value persisted as text goes through these functions. Encoding uses Rust's
//! locale-independent `Display` impls, so floats always use `.` as the decimal separator and print
//! the shortest representation that parses back to the same `f32`. Decoding ignores surrounding
//! ASCII whitespace and returns `None` for anything that is not a well-formed value.

/// A typed preference value.
#[derive(Debug, Clone, PartialEq)]
pub enum PrefValue {
    /// 32-bit signed integer.
    Int(i32),
    /// 32-bit float.
    Float(f32),
    /// UTF-8 text.
    String(String),
}

impl PrefValue {
    /// Returns the canonical text form of this value.
    pub fn encode(&self) -> String {
        match self {
            Self::Int(value) => encode_int(*value),
            Self::Float(value) => encode_float(*value),
            Self::String(value) => encode_string(value),
        }
    }
}

/// Encodes an integer as base-10 decimal.
pub fn encode_int(value: i32) -> String {
    value.to_string()
}

/// Encodes a float as a round-trippable decimal.
pub fn encode_float(value: f32) -> String {
    value.to_string()
}

/// Strings are stored verbatim.
pub fn encode_string(value: &str) -> String {
    value.to_string()
}

/// ASCII whitespace plus vertical tab.
fn is_padding(c: char) -> bool {
    c.is_ascii_whitespace() || c == '\x0B'
}

/// Decodes base-10 integer text, accepting a leading sign.
pub fn decode_int(raw: &str) -> Option<i32> {
    raw.trim_matches(is_padding)
        .parse()
        .ok()
}

/// Decodes decimal float text, accepting exponent notation, `NaN` and `inf`.
pub fn decode_float(raw: &str) -> Option<f32> {
    raw.trim_matches(is_padding)
        .parse()
        .ok()
}

/// Strings always decode.
pub fn decode_string(raw: &str) -> Option<String> {
    Some(raw.to_string())
}
