//! Random secrets: access token values, reset codes and activation codes.

use rand::distr::{Alphanumeric, SampleString};
use rand::Rng;

pub const RESET_PASSWORD_CODE_LENGTH: usize = 10;
pub const ACTIVATION_CODE_MIN: i32 = 10_000;
pub const ACTIVATION_CODE_MAX: i32 = 99_999;

/// Alphanumeric string of `length` characters.
pub fn alphanumeric(length: usize) -> String {
    Alphanumeric.sample_string(&mut rand::rng(), length)
}

pub fn reset_password_code() -> String {
    alphanumeric(RESET_PASSWORD_CODE_LENGTH)
}

pub fn activation_code() -> i32 {
    rand::rng().random_range(ACTIVATION_CODE_MIN..=ACTIVATION_CODE_MAX)
}
