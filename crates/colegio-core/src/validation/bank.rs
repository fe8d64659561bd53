//! Bank account and CLABE validation
//!
//! Account/card numbers and CLABE interbank keys are mutually
//! distinguishable by shape: an account or card number has 10 to 16 digits,
//! a CLABE has exactly 18. A CLABE-shaped value in the account field is
//! rejected (and vice versa) instead of being silently accepted into the
//! wrong column. 16-digit values are card numbers and must pass the Luhn
//! checksum.

use crate::error::AppError;

/// A CLABE interbank key is always exactly 18 numeric digits.
pub const CLABE_LENGTH: usize = 18;

const ACCOUNT_MIN_DIGITS: usize = 10;
const ACCOUNT_MAX_DIGITS: usize = 16;
const CARD_DIGITS: usize = 16;

fn all_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

/// Luhn checksum, as used for card numbers.
pub fn is_valid_luhn(number: &str) -> bool {
    if !all_digits(number) {
        return false;
    }

    let mut sum = 0u32;
    let mut should_double = false;

    for b in number.bytes().rev() {
        let mut digit = (b - b'0') as u32;
        if should_double {
            digit *= 2;
            if digit > 9 {
                digit -= 9;
            }
        }
        sum += digit;
        should_double = !should_double;
    }

    sum % 10 == 0
}

/// Validate an account or card number: 10-16 numeric digits, not
/// CLABE-shaped, Luhn-checked when it is a 16-digit card number.
pub fn validate_account_number(value: &str) -> Result<(), AppError> {
    if !all_digits(value) {
        return Err(AppError::InvalidInput(
            "Account number must contain only digits, without spaces or dashes".to_string(),
        ));
    }

    if value.len() == CLABE_LENGTH {
        return Err(AppError::InvalidInput(
            "This looks like a CLABE; it belongs in the CLABE field, not the account field"
                .to_string(),
        ));
    }

    if value.len() < ACCOUNT_MIN_DIGITS || value.len() > ACCOUNT_MAX_DIGITS {
        return Err(AppError::InvalidInput(format!(
            "Account number must have {}-{} digits",
            ACCOUNT_MIN_DIGITS, ACCOUNT_MAX_DIGITS
        )));
    }

    if value.len() == CARD_DIGITS && !is_valid_luhn(value) {
        return Err(AppError::InvalidInput(
            "Card number failed checksum verification".to_string(),
        ));
    }

    Ok(())
}

/// Validate a CLABE: exactly 18 numeric digits.
pub fn validate_clabe_number(value: &str) -> Result<(), AppError> {
    if !all_digits(value) {
        return Err(AppError::InvalidInput(
            "CLABE must contain only numeric digits".to_string(),
        ));
    }

    if value.len() != CLABE_LENGTH {
        return Err(AppError::InvalidInput(format!(
            "CLABE must be exactly {} digits",
            CLABE_LENGTH
        )));
    }

    Ok(())
}

/// Validate the account/CLABE pair on a bank detail: at least one must be
/// present, and each present value must pass its own shape check.
pub fn validate_bank_detail_numbers(
    account_number: Option<&str>,
    clabe_number: Option<&str>,
) -> Result<(), AppError> {
    let account = account_number.filter(|v| !v.is_empty());
    let clabe = clabe_number.filter(|v| !v.is_empty());

    if account.is_none() && clabe.is_none() {
        return Err(AppError::InvalidInput(
            "Either an account number or a CLABE is required".to_string(),
        ));
    }

    if let Some(value) = account {
        validate_account_number(value)?;
    }

    if let Some(value) = clabe {
        validate_clabe_number(value)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_number_ten_digits_accepted() {
        assert!(validate_account_number("1234567890").is_ok());
    }

    #[test]
    fn test_clabe_shaped_value_rejected_in_account_field() {
        let err = validate_account_number("123456789012345678").unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(ref msg) if msg.contains("CLABE")));
    }

    #[test]
    fn test_account_number_rejects_non_digits_and_short_values() {
        assert!(validate_account_number("12345 67890").is_err());
        assert!(validate_account_number("123456789").is_err());
        assert!(validate_account_number("").is_err());
    }

    #[test]
    fn test_card_number_luhn() {
        // Classic Luhn-valid test card number
        assert!(is_valid_luhn("4539578763621486"));
        assert!(!is_valid_luhn("4539578763621487"));
        assert!(validate_account_number("4539578763621486").is_ok());
        assert!(validate_account_number("4539578763621487").is_err());
    }

    #[test]
    fn test_luhn_only_applies_to_sixteen_digit_values() {
        // 10-digit account numbers are not card numbers; no checksum applies.
        assert!(validate_account_number("1234567890").is_ok());
    }

    #[test]
    fn test_clabe_must_be_exactly_eighteen_digits() {
        assert!(validate_clabe_number("123456789012345678").is_ok());
        assert!(validate_clabe_number("12345678901234567").is_err());
        assert!(validate_clabe_number("1234567890123456789").is_err());
        assert!(validate_clabe_number("12345678901234567a").is_err());
    }

    #[test]
    fn test_at_least_one_of_account_or_clabe() {
        assert!(validate_bank_detail_numbers(None, None).is_err());
        assert!(validate_bank_detail_numbers(Some(""), Some("")).is_err());
        assert!(validate_bank_detail_numbers(Some("1234567890"), None).is_ok());
        assert!(validate_bank_detail_numbers(None, Some("123456789012345678")).is_ok());
        assert!(
            validate_bank_detail_numbers(Some("1234567890"), Some("123456789012345678")).is_ok()
        );
    }
}
