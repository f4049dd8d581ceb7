//! Input Masks
//!
//! Formatting applied to form inputs while typing, and the postal code type.
//! Masks only decorate complete digit runs; partial input stays as bare digits.

use std::fmt;

use crate::error::{UiError, UiResult};

/// Keep ASCII digits only
pub fn digits(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// CEP: `01310-100`. Dash goes in once a sixth digit is typed.
pub fn mask_postal_code(input: &str) -> String {
    let d = digits(input);
    if d.len() > 5 && d.len() <= 8 {
        format!("{}-{}", &d[..5], &d[5..])
    } else {
        d
    }
}

/// Phone: `(11) 98765-4321` for mobiles, `(11) 3456-7890` for landlines
pub fn mask_phone(input: &str) -> String {
    let d = digits(input);
    match d.len() {
        11 => format!("({}) {}-{}", &d[..2], &d[2..7], &d[7..]),
        10 => format!("({}) {}-{}", &d[..2], &d[2..6], &d[6..]),
        _ => d,
    }
}

/// CPF: `123.456.789-09`
pub fn mask_cpf(input: &str) -> String {
    let d = digits(input);
    if d.len() == 11 {
        format!("{}.{}.{}-{}", &d[..3], &d[3..6], &d[6..9], &d[9..])
    } else {
        d
    }
}

/// Admin date fields: `dd/mm/yyyy`, year capped at four digits
pub fn mask_date(input: &str) -> String {
    let mut value = digits(input);
    if value.len() >= 2 {
        value = format!("{}/{}", &value[..2], &value[2..]);
    }
    if value.len() >= 5 {
        let year_end = value.len().min(9);
        value = format!("{}/{}", &value[..5], &value[5..year_end]);
    }
    value
}

/// Brazilian postal code, exactly eight digits
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PostalCode(String);

impl PostalCode {
    pub const LEN: usize = 8;

    /// Strip everything but digits; accept only exactly eight of them
    pub fn parse(raw: &str) -> UiResult<Self> {
        let d = digits(raw);
        if d.len() == Self::LEN {
            Ok(Self(d))
        } else {
            Err(UiError::InvalidPostalCode)
        }
    }

    /// Digits only, as sent to the server
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", &self.0[..5], &self.0[5..])
    }
}
