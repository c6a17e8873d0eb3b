//! Static backfill table for legacy gateway error codes.
//!
//! The REST layer sits on top of an older protocol that cannot target
//! individual fields. For the well-known legacy status codes this table
//! supplies the request property the error relates to, and a message fit to
//! show to a customer, so validation errors can still be attached to
//! specific form fields on the caller's side. Loaded once, read-only.

use std::{collections::HashMap, sync::LazyLock};

/// Field targeting details for one legacy code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeDetails {
    /// The request property the error relates to.
    pub property: &'static str,
    /// A message suitable for showing to the paying customer.
    pub client_message: &'static str,
}

const fn details(property: &'static str, client_message: &'static str) -> CodeDetails {
    CodeDetails {
        property,
        client_message,
    }
}

static CODE_DETAILS: LazyLock<HashMap<u32, CodeDetails>> = LazyLock::new(|| {
    HashMap::from([
        (
            4021,
            details("cardNumber", "The card number is not supported."),
        ),
        (
            4022,
            details("cardNumber", "The card type does not match the card number."),
        ),
        (4023, details("expiryDate", "The card expiry date is invalid.")),
        (4025, details("securityCode", "The security code is invalid.")),
        (4026, details("securityCode", "The security code is required.")),
        (4035, details("cardholderName", "The cardholder name is invalid.")),
        (
            4041,
            details("amount", "The amount is invalid for the specified currency."),
        ),
        (
            4042,
            details("currency", "The currency is not supported on this account."),
        ),
        (
            5021,
            details("customerFirstName", "The first name is required."),
        ),
        (5022, details("customerLastName", "The last name is required.")),
        (
            5036,
            details(
                "merchantSessionKey",
                "The session has expired. Please start again.",
            ),
        ),
        (
            5055,
            details("billingAddress.postalCode", "The postal code is required."),
        ),
        (
            5060,
            details("billingAddress", "The billing address could not be verified."),
        ),
    ])
});

/// Field details for a legacy code, if it is one this library knows how to
/// attribute to a request property.
pub fn lookup(code: u32) -> Option<&'static CodeDetails> {
    CODE_DETAILS.get(&code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_code_is_backfilled() {
        let found = lookup(5055).unwrap();
        assert_eq!(found.property, "billingAddress.postalCode");
    }

    #[test]
    fn unknown_code_is_absent() {
        assert!(lookup(9999).is_none());
    }
}
