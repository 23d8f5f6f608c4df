/// PIN format rules for Punchcard.
///
/// Requirements:
/// - Exactly 4 characters
/// - ASCII digits only (PINs are strings, not numbers: "0042" keeps its
///   leading zero)
/// - "0000" is the reserved default an admin reset falls back to; an
///   employee signing in with it must pick a new PIN before anything else.

pub const PIN_LEN: usize = 4;

/// The shared default every admin reset (without an explicit PIN) produces.
pub const DEFAULT_PIN: &str = "0000";

pub fn is_valid_pin(pin: &str) -> bool {
    pin.len() == PIN_LEN && pin.bytes().all(|b| b.is_ascii_digit())
}

pub fn validate_pin(pin: &str) -> Result<(), &'static str> {
    if is_valid_pin(pin) {
        Ok(())
    } else {
        Err("PIN must be exactly 4 digits")
    }
}

pub fn is_default_pin(pin: &str) -> bool {
    pin == DEFAULT_PIN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_all_digit_pins() {
        assert!(is_valid_pin("0000"));
        assert!(is_valid_pin("0042"));
        assert!(is_valid_pin("9999"));
    }

    #[test]
    fn test_rejects_wrong_length() {
        assert!(!is_valid_pin(""));
        assert!(!is_valid_pin("123"));
        assert!(!is_valid_pin("123456"));
    }

    #[test]
    fn test_rejects_non_digits() {
        assert!(!is_valid_pin("12a4"));
        assert!(!is_valid_pin("12 4"));
        assert!(!is_valid_pin("-123"));
        // Arabic-Indic digits are 4 characters but not ASCII digits.
        assert!(!is_valid_pin("١٢٣٤"));
    }

    #[test]
    fn test_validate_pin_message() {
        assert_eq!(validate_pin("123"), Err("PIN must be exactly 4 digits"));
        assert_eq!(validate_pin("1234"), Ok(()));
    }

    #[test]
    fn test_default_pin_is_valid_but_flagged() {
        assert!(is_valid_pin(DEFAULT_PIN));
        assert!(is_default_pin("0000"));
        assert!(!is_default_pin("0001"));
    }
}
