//! Scalar aliases shared across the order book.
//!
//! Prices and quantities are fixed-point integers: the venue feed multiplies
//! external decimal values by [`SCALE_FACTOR`] on the way in and divides on
//! the way out. The matching core never sees a fraction.

/// Fixed-point price in scaled integer units.
pub type Price = u64;

/// Fixed-point quantity in scaled integer units.
pub type Quantity = u64;

/// Unique order identifier, assigned by the caller.
pub type OrderId = u64;

/// A batch of order identifiers, used by the batched cancel path.
pub type OrderIds = Vec<OrderId>;

/// Conversion factor between external decimal values and internal integers.
pub const SCALE_FACTOR: u64 = 100_000_000;
