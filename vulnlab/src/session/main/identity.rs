use std::num::IntErrorKind;

use crate::session::errors::IdentityError;
use crate::session::types::{SubjectId, UserId};

// 2^63 as f64; anything at or above it cannot be an i64.
const I64_UPPER_BOUND_F64: f64 = 9_223_372_036_854_775_808.0;

/// Canonicalizes whatever representation of the subject the session carried.
///
/// Accepts integers, integral finite floats and decimal strings. Everything
/// else is rejected with the reason.
pub fn normalize_user_id(subject: &SubjectId) -> Result<UserId, IdentityError> {
    match subject {
        SubjectId::Integer(id) => Ok(UserId::new(*id)),
        SubjectId::Float(value) => {
            if !value.is_finite() {
                return Err(IdentityError::NonNumeric(value.to_string()));
            }
            if value.fract() != 0.0 {
                return Err(IdentityError::NotIntegral);
            }
            if *value < -I64_UPPER_BOUND_F64 || *value >= I64_UPPER_BOUND_F64 {
                return Err(IdentityError::OutOfRange);
            }
            Ok(UserId::new(*value as i64))
        }
        SubjectId::Text(text) => {
            if text.is_empty() {
                return Err(IdentityError::Empty);
            }
            text.parse::<i64>()
                .map(UserId::new)
                .map_err(|e| match e.kind() {
                    IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                        IdentityError::OutOfRange
                    }
                    _ => IdentityError::NonNumeric(text.clone()),
                })
        }
    }
}
