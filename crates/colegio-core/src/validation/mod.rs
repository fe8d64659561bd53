//! Validation modules

pub mod bank;

pub use bank::{
    is_valid_luhn, validate_account_number, validate_bank_detail_numbers, validate_clabe_number,
    CLABE_LENGTH,
};
