//! Cart quantity rules.

use crate::error::CoreError;
use crate::types::DbId;

/// Quantity used when an add-to-cart request omits it.
pub const DEFAULT_ADD_QUANTITY: i32 = 1;

/// Smallest quantity a cart line may hold.
pub const MIN_QUANTITY: i32 = 1;

/// Largest quantity a cart line may hold, including the sum of repeated adds.
pub const MAX_QUANTITY: i32 = 999;

/// Reject quantities outside `MIN_QUANTITY..=MAX_QUANTITY`.
pub fn validate_quantity(quantity: i32) -> Result<i32, CoreError> {
    if quantity < MIN_QUANTITY {
        return Err(CoreError::Validation(format!(
            "Quantity must be at least {MIN_QUANTITY}"
        )));
    }
    if quantity > MAX_QUANTITY {
        return Err(quantity_limit_exceeded());
    }
    Ok(quantity)
}

/// Error for a line whose quantity would pass [`MAX_QUANTITY`].
pub fn quantity_limit_exceeded() -> CoreError {
    CoreError::Validation(format!("Quantity cannot exceed {MAX_QUANTITY}"))
}

/// Validate the inputs of an add-to-cart request.
///
/// Both references are required; the quantity defaults to
/// [`DEFAULT_ADD_QUANTITY`].
pub fn validate_add(
    product_id: Option<DbId>,
    variant_id: Option<DbId>,
    quantity: Option<i32>,
) -> Result<(DbId, DbId, i32), CoreError> {
    let (Some(product_id), Some(variant_id)) = (product_id, variant_id) else {
        return Err(CoreError::Validation(
            "Product ID and variant ID are required".into(),
        ));
    };
    let quantity = validate_quantity(quantity.unwrap_or(DEFAULT_ADD_QUANTITY))?;
    Ok((product_id, variant_id, quantity))
}
