//! Payment, repeat and refund endpoints.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::{
    auth::{Authentication, RequestAuth},
    currency::Currency,
    errors::{BuildError, CustomResult, UnknownOptionValue},
    request::RequestContent,
    requests::{parse_option, ApiRequest},
    responses::TransactionType,
    types::{Amount, MinorUnit},
};

/// How the card details entered the system.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::VariantNames,
)]
pub enum EntryMethod {
    /// Cardholder-present e-commerce entry.
    Ecommerce,
    /// Mail order.
    MailOrder,
    /// Telephone order.
    TelephoneOrder,
}

impl EntryMethod {
    /// Look up by name, rejecting values outside the closed set.
    pub fn from_name(value: &str) -> CustomResult<Self, UnknownOptionValue> {
        parse_option("entryMethod", value)
    }
}

/// Whether AVS/CVC checking applies to this transaction.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::VariantNames,
)]
#[allow(clippy::upper_case_acronyms)]
pub enum ApplyAvsCvcCheck {
    /// Follow the account's configuration.
    UseMSPSetting,
    /// Force the checks on.
    Force,
    /// Disable the checks.
    Disable,
    /// Force the checks but ignore the rule outcome.
    ForceIgnoringRules,
}

impl ApplyAvsCvcCheck {
    /// Look up by name, rejecting values outside the closed set.
    pub fn from_name(value: &str) -> CustomResult<Self, UnknownOptionValue> {
        parse_option("applyAvsCvcCheck", value)
    }
}

/// Whether 3-D Secure applies to this transaction.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::VariantNames,
)]
#[allow(clippy::upper_case_acronyms)]
pub enum Apply3dSecure {
    /// Follow the account's configuration.
    UseMSPSetting,
    /// Force authentication.
    Force,
    /// Disable authentication.
    Disable,
    /// Force authentication but ignore the rule outcome.
    ForceIgnoringRules,
}

impl Apply3dSecure {
    /// Look up by name, rejecting values outside the closed set.
    pub fn from_name(value: &str) -> CustomResult<Self, UnknownOptionValue> {
        parse_option("apply3DSecure", value)
    }
}

/// How a stored credential will be reused.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::VariantNames,
)]
pub enum RecurringIndicator {
    /// Fixed-schedule recurring charge.
    Recurring,
    /// Instalment against a fixed total.
    Instalment,
    /// Unscheduled merchant-initiated charge.
    Unscheduled,
}

impl RecurringIndicator {
    /// Look up by name, rejecting values outside the closed set.
    pub fn from_name(value: &str) -> CustomResult<Self, UnknownOptionValue> {
        parse_option("recurringIndicator", value)
    }
}

/// Challenge window size requested for 3-D Secure v2.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::VariantNames,
)]
pub enum ChallengeWindowSize {
    /// 250 x 400
    Small,
    /// 390 x 400
    Medium,
    /// 500 x 600
    Large,
    /// 600 x 400
    ExtraLarge,
    /// Full screen
    FullScreen,
}

impl ChallengeWindowSize {
    /// Look up by name, rejecting values outside the closed set.
    pub fn from_name(value: &str) -> CustomResult<Self, UnknownOptionValue> {
        parse_option("challengeWindowSize", value)
    }
}

/// A billing address.
#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// First address line
    #[serde(rename = "address1")]
    pub address_1: String,
    /// Second address line
    #[serde(rename = "address2")]
    pub address_2: Option<String>,
    /// Town or city
    pub city: String,
    /// Postal code; optional for countries without one
    pub postal_code: Option<String>,
    /// ISO 3166-1 alpha-2 country code
    pub country: String,
    /// State code, for US addresses
    pub state: Option<String>,
}

/// Recipient and destination for physical goods.
#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingDetails {
    /// Recipient first name
    pub recipient_first_name: String,
    /// Recipient last name
    pub recipient_last_name: String,
    /// First address line
    #[serde(rename = "shippingAddress1")]
    pub shipping_address_1: String,
    /// Town or city
    pub shipping_city: String,
    /// Postal code
    pub shipping_postal_code: Option<String>,
    /// ISO 3166-1 alpha-2 country code
    pub shipping_country: String,
}

/// Browser environment data for 3-D Secure v2 risk assessment, plus the
/// URL the gateway notifies when a challenge completes.
#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaRequest {
    /// Where the ACS posts its challenge notification
    #[serde(rename = "notificationURL")]
    pub notification_url: String,
    /// The browser's Accept header
    pub browser_accept_header: Option<String>,
    /// The browser's User-Agent header
    pub browser_user_agent: Option<String>,
    /// The browser's language tag
    pub browser_language: Option<String>,
    /// The cardholder's IP address
    pub browser_ip: Option<String>,
    /// Requested challenge window size
    pub challenge_window_size: Option<ChallengeWindowSize>,
}

/// The tokenized card a payment charges.
#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRequest {
    /// Session key the identifier was minted under
    pub merchant_session_key: String,
    /// The card identifier being charged
    pub card_identifier: String,
    /// Set when charging a previously saved (reusable) identifier
    pub reusable: Option<bool>,
    /// Ask the gateway to keep the identifier for future charges
    pub save: Option<bool>,
}

/// The payment method block of a payment request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethodRequest {
    /// Card payment
    pub card: CardRequest,
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PaymentBody<'a> {
    transaction_type: TransactionType,
    payment_method: &'a PaymentMethodRequest,
    vendor_tx_code: &'a str,
    amount: MinorUnit,
    currency: Currency,
    description: &'a str,
    customer_first_name: &'a str,
    customer_last_name: &'a str,
    billing_address: &'a Address,
    shipping_details: Option<&'a ShippingDetails>,
    customer_email: Option<&'a str>,
    customer_phone: Option<&'a str>,
    entry_method: Option<EntryMethod>,
    apply_avs_cvc_check: Option<ApplyAvsCvcCheck>,
    #[serde(rename = "apply3DSecure")]
    apply_3d_secure: Option<Apply3dSecure>,
    recurring_indicator: Option<RecurringIndicator>,
    strong_customer_authentication: Option<&'a ScaRequest>,
}

/// `POST /transactions` with `transactionType: Payment`.
#[derive(Debug)]
pub struct CreatePayment<'a> {
    authentication: &'a Authentication,
    vendor_tx_code: String,
    amount: Amount,
    description: String,
    payment_method: PaymentMethodRequest,
    customer_first_name: String,
    customer_last_name: String,
    billing_address: Address,
    shipping_details: Option<ShippingDetails>,
    customer_email: Option<String>,
    customer_phone: Option<String>,
    entry_method: Option<EntryMethod>,
    apply_avs_cvc_check: Option<ApplyAvsCvcCheck>,
    apply_3d_secure: Option<Apply3dSecure>,
    recurring_indicator: Option<RecurringIndicator>,
    strong_customer_authentication: Option<ScaRequest>,
}

impl<'a> CreatePayment<'a> {
    /// A payment for `amount`, charging a tokenized card.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        authentication: &'a Authentication,
        vendor_tx_code: impl Into<String>,
        amount: Amount,
        description: impl Into<String>,
        card: CardRequest,
        customer_first_name: impl Into<String>,
        customer_last_name: impl Into<String>,
        billing_address: Address,
    ) -> Self {
        Self {
            authentication,
            vendor_tx_code: vendor_tx_code.into(),
            amount,
            description: description.into(),
            payment_method: PaymentMethodRequest { card },
            customer_first_name: customer_first_name.into(),
            customer_last_name: customer_last_name.into(),
            billing_address,
            shipping_details: None,
            customer_email: None,
            customer_phone: None,
            entry_method: None,
            apply_avs_cvc_check: None,
            apply_3d_secure: None,
            recurring_indicator: None,
            strong_customer_authentication: None,
        }
    }

    /// Attach shipping details.
    pub fn with_shipping_details(mut self, shipping_details: ShippingDetails) -> Self {
        self.shipping_details = Some(shipping_details);
        self
    }

    /// Attach the customer's email address.
    pub fn with_customer_email(mut self, email: impl Into<String>) -> Self {
        self.customer_email = Some(email.into());
        self
    }

    /// Attach the customer's phone number.
    pub fn with_customer_phone(mut self, phone: impl Into<String>) -> Self {
        self.customer_phone = Some(phone.into());
        self
    }

    /// Set the card entry method.
    pub fn with_entry_method(mut self, entry_method: EntryMethod) -> Self {
        self.entry_method = Some(entry_method);
        self
    }

    /// Set the AVS/CVC checking mode.
    pub fn with_apply_avs_cvc_check(mut self, mode: ApplyAvsCvcCheck) -> Self {
        self.apply_avs_cvc_check = Some(mode);
        self
    }

    /// Set the 3-D Secure mode.
    pub fn with_apply_3d_secure(mut self, mode: Apply3dSecure) -> Self {
        self.apply_3d_secure = Some(mode);
        self
    }

    /// Mark the stored-credential usage category.
    pub fn with_recurring_indicator(mut self, indicator: RecurringIndicator) -> Self {
        self.recurring_indicator = Some(indicator);
        self
    }

    /// Attach 3-D Secure v2 browser data and notification URL.
    pub fn with_strong_customer_authentication(mut self, sca: ScaRequest) -> Self {
        self.strong_customer_authentication = Some(sca);
        self
    }
}

impl ApiRequest for CreatePayment<'_> {
    fn resource_segments(&self) -> Vec<String> {
        vec!["transactions".to_string()]
    }

    fn auth(&self) -> RequestAuth<'_> {
        RequestAuth::Basic(self.authentication)
    }

    fn request_content(&self) -> CustomResult<Option<RequestContent>, BuildError> {
        RequestContent::json(&PaymentBody {
            transaction_type: TransactionType::Payment,
            payment_method: &self.payment_method,
            vendor_tx_code: &self.vendor_tx_code,
            amount: self.amount.minor_units(),
            currency: self.amount.currency(),
            description: &self.description,
            customer_first_name: &self.customer_first_name,
            customer_last_name: &self.customer_last_name,
            billing_address: &self.billing_address,
            shipping_details: self.shipping_details.as_ref(),
            customer_email: self.customer_email.as_deref(),
            customer_phone: self.customer_phone.as_deref(),
            entry_method: self.entry_method,
            apply_avs_cvc_check: self.apply_avs_cvc_check,
            apply_3d_secure: self.apply_3d_secure,
            recurring_indicator: self.recurring_indicator,
            strong_customer_authentication: self.strong_customer_authentication.as_ref(),
        })
        .map(Some)
    }
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReferencedBody<'a> {
    transaction_type: TransactionType,
    reference_transaction_id: &'a str,
    vendor_tx_code: &'a str,
    amount: MinorUnit,
    currency: Currency,
    description: &'a str,
    recurring_indicator: Option<RecurringIndicator>,
}

/// `POST /transactions` with `transactionType: Repeat` — charge again
/// against an earlier transaction.
#[derive(Debug)]
pub struct CreateRepeatPayment<'a> {
    authentication: &'a Authentication,
    reference_transaction_id: String,
    vendor_tx_code: String,
    amount: Amount,
    description: String,
    recurring_indicator: Option<RecurringIndicator>,
}

impl<'a> CreateRepeatPayment<'a> {
    /// A repeat charge against `reference_transaction_id`.
    pub fn new(
        authentication: &'a Authentication,
        reference_transaction_id: impl Into<String>,
        vendor_tx_code: impl Into<String>,
        amount: Amount,
        description: impl Into<String>,
    ) -> Self {
        Self {
            authentication,
            reference_transaction_id: reference_transaction_id.into(),
            vendor_tx_code: vendor_tx_code.into(),
            amount,
            description: description.into(),
            recurring_indicator: None,
        }
    }

    /// Mark the stored-credential usage category.
    pub fn with_recurring_indicator(mut self, indicator: RecurringIndicator) -> Self {
        self.recurring_indicator = Some(indicator);
        self
    }
}

impl ApiRequest for CreateRepeatPayment<'_> {
    fn resource_segments(&self) -> Vec<String> {
        vec!["transactions".to_string()]
    }

    fn auth(&self) -> RequestAuth<'_> {
        RequestAuth::Basic(self.authentication)
    }

    fn request_content(&self) -> CustomResult<Option<RequestContent>, BuildError> {
        RequestContent::json(&ReferencedBody {
            transaction_type: TransactionType::Repeat,
            reference_transaction_id: &self.reference_transaction_id,
            vendor_tx_code: &self.vendor_tx_code,
            amount: self.amount.minor_units(),
            currency: self.amount.currency(),
            description: &self.description,
            recurring_indicator: self.recurring_indicator,
        })
        .map(Some)
    }
}

/// `POST /transactions` with `transactionType: Refund` — return funds from
/// an earlier transaction.
#[derive(Debug)]
pub struct CreateRefund<'a> {
    authentication: &'a Authentication,
    reference_transaction_id: String,
    vendor_tx_code: String,
    amount: Amount,
    description: String,
}

impl<'a> CreateRefund<'a> {
    /// A refund of `amount` against `reference_transaction_id`.
    pub fn new(
        authentication: &'a Authentication,
        reference_transaction_id: impl Into<String>,
        vendor_tx_code: impl Into<String>,
        amount: Amount,
        description: impl Into<String>,
    ) -> Self {
        Self {
            authentication,
            reference_transaction_id: reference_transaction_id.into(),
            vendor_tx_code: vendor_tx_code.into(),
            amount,
            description: description.into(),
        }
    }
}

impl ApiRequest for CreateRefund<'_> {
    fn resource_segments(&self) -> Vec<String> {
        vec!["transactions".to_string()]
    }

    fn auth(&self) -> RequestAuth<'_> {
        RequestAuth::Basic(self.authentication)
    }

    fn request_content(&self) -> CustomResult<Option<RequestContent>, BuildError> {
        RequestContent::json(&ReferencedBody {
            transaction_type: TransactionType::Refund,
            reference_transaction_id: &self.reference_transaction_id,
            vendor_tx_code: &self.vendor_tx_code,
            amount: self.amount.minor_units(),
            currency: self.amount.currency(),
            description: &self.description,
            recurring_indicator: None,
        })
        .map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_lookup_accepts_members_of_the_set() {
        assert_eq!(
            EntryMethod::from_name("MailOrder").unwrap(),
            EntryMethod::MailOrder
        );
        assert_eq!(
            Apply3dSecure::from_name("UseMSPSetting").unwrap(),
            Apply3dSecure::UseMSPSetting
        );
    }

    #[test]
    fn option_lookup_names_the_allowed_set_on_rejection() {
        let err = EntryMethod::from_name("CarrierPigeon").unwrap_err();
        let context = err.current_context();
        assert_eq!(context.option, "entryMethod");
        assert_eq!(context.value, "CarrierPigeon");
        assert_eq!(
            context.allowed,
            &["Ecommerce", "MailOrder", "TelephoneOrder"]
        );
    }
}
