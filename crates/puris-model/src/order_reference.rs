//! Order position reference
//!
//! Deliveries and productions may reference the order they fulfil through
//! three fields: customer order number, customer order position number and
//! supplier order number. The reference is all-or-nothing: either none of
//! the three is given or all of them are.

/// Borrowed view over the three order reference fields
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderReference<'a> {
    /// Customer order number
    pub customer_order_number: Option<&'a str>,
    /// Customer order position number
    pub customer_order_position_number: Option<&'a str>,
    /// Supplier order number
    pub supplier_order_number: Option<&'a str>,
}

impl<'a> OrderReference<'a> {
    /// Build a view from the three optional fields
    #[inline]
    #[must_use]
    pub fn new(
        customer_order_number: Option<&'a str>,
        customer_order_position_number: Option<&'a str>,
        supplier_order_number: Option<&'a str>,
    ) -> Self {
        Self {
            customer_order_number,
            customer_order_position_number,
            supplier_order_number,
        }
    }

    /// All three present and non-empty, or all three absent/empty
    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        is_valid_order_reference(
            self.customer_order_number,
            self.customer_order_position_number,
            self.supplier_order_number,
        )
    }

    /// No field set
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        [
            self.customer_order_number,
            self.customer_order_position_number,
            self.supplier_order_number,
        ]
        .iter()
        .all(|f| !is_filled(*f))
    }

    /// `"<customer> / <position>"` and supplier number, or `-` when empty
    #[must_use]
    pub fn display(&self) -> String {
        if self.is_empty() {
            return "-".to_string();
        }
        format!(
            "{} / {} ({})",
            self.customer_order_number.unwrap_or("-"),
            self.customer_order_position_number.unwrap_or("-"),
            self.supplier_order_number.unwrap_or("-"),
        )
    }
}

/// All-or-nothing rule over the three order reference fields
///
/// An empty string counts as absent.
#[must_use]
pub fn is_valid_order_reference(
    customer_order_number: Option<&str>,
    customer_order_position_number: Option<&str>,
    supplier_order_number: Option<&str>,
) -> bool {
    let filled = [
        customer_order_number,
        customer_order_position_number,
        supplier_order_number,
    ]
    .into_iter()
    .filter(|f| is_filled(*f))
    .count();

    filled == 0 || filled == 3
}

#[inline]
fn is_filled(field: Option<&str>) -> bool {
    field.is_some_and(|s| !s.is_empty())
}

/// Records carrying an order reference
pub trait OrderReferenced {
    /// Borrowed view of the reference
    fn order_reference(&self) -> OrderReference<'_>;

    /// Mutable access to the three raw fields
    fn order_reference_fields_mut(&mut self) -> [&mut Option<String>; 3];

    /// Map empty strings in the reference fields to absent
    fn normalize_order_reference(&mut self) {
        for field in self.order_reference_fields_mut() {
            if field.as_deref() == Some("") {
                *field = None;
            }
        }
    }
}
