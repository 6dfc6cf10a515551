// ============================================================================
// Form Input Interface
// Defines the contract between raw form fields and typed calculator inputs
// ============================================================================

use crate::error::CalcResult;
use crate::form::FormFields;

/// Build a validated input record from submitted form fields.
///
/// Implementations either return a complete, validated record or an
/// `InvalidInput` error naming the offending field. They never fill a missing
/// required field with a default.
pub trait FromForm: Sized {
    fn from_form(fields: &FormFields) -> CalcResult<Self>;
}
