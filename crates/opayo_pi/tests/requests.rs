#![allow(clippy::unwrap_used, clippy::panic)]

use opayo_masking::SensitiveValue;
use opayo_pi::{
    request::{Method, RequestContent},
    requests::{
        Address, Apply3dSecure, CardDetails, CardRequest, CreateCardIdentifier, CreateInstruction,
        CreatePayment, CreateRefund, CreateRepeatPayment, CreateSecure3d, CreateSessionKey,
        EntryMethod, FetchTransaction, ScaRequest,
    },
    ApiRequest, Amount, Authentication, Currency, Endpoint, Environment,
};

fn test_auth() -> Authentication {
    Authentication::new(
        "acmecorp",
        SensitiveValue::new("integration-key".to_string()),
        SensitiveValue::new("integration-password".to_string()),
    )
}

fn test_endpoint() -> Endpoint {
    Endpoint::new(Environment::Test)
}

fn body_json(body: Option<RequestContent>) -> serde_json::Value {
    serde_json::from_str(&body.unwrap().into_inner()).unwrap()
}

fn billing_address() -> Address {
    Address {
        address_1: "88 The Street".to_string(),
        address_2: None,
        city: "Townsville".to_string(),
        postal_code: Some("412".to_string()),
        country: "GB".to_string(),
        state: None,
    }
}

#[test]
fn session_key_request() {
    let auth = test_auth();
    let request = CreateSessionKey::new(&auth).build(&test_endpoint()).unwrap();

    assert_eq!(request.method, Method::Post);
    assert_eq!(
        request.url,
        "https://pi-test.sagepay.com/api/v1/merchant-session-keys"
    );

    let authorization = request
        .headers
        .iter()
        .find(|(name, _)| name.as_str() == "Authorization")
        .unwrap();
    assert!(authorization.1.is_masked());
    assert!(authorization.1.peek_inner().starts_with("Basic "));

    assert_eq!(
        body_json(request.body),
        serde_json::json!({"vendorName": "acmecorp"})
    );
}

#[test]
fn card_identifier_request_uses_the_session_key() {
    let card_details = CardDetails::new(
        SensitiveValue::new("SAM JONES".to_string()),
        SensitiveValue::new("4929000005559".to_string()),
        SensitiveValue::new("0327".to_string()),
        SensitiveValue::new("123".to_string()),
    );
    let request = CreateCardIdentifier::new("MSK-1", card_details)
        .build(&test_endpoint())
        .unwrap();

    assert_eq!(
        request.url,
        "https://pi-test.sagepay.com/api/v1/card-identifiers"
    );
    let authorization = request
        .headers
        .iter()
        .find(|(name, _)| name.as_str() == "Authorization")
        .unwrap();
    assert_eq!(authorization.1.peek_inner(), "Bearer MSK-1");

    // the wire body carries the real card data
    let body = body_json(request.body);
    assert_eq!(body["cardDetails"]["cardNumber"], "4929000005559");
    assert_eq!(body["cardDetails"]["securityCode"], "123");
}

#[test]
fn request_debug_output_masks_the_body() {
    let card_details = CardDetails::new(
        SensitiveValue::new("SAM JONES".to_string()),
        SensitiveValue::new("4929000005559".to_string()),
        SensitiveValue::new("0327".to_string()),
        SensitiveValue::new("123".to_string()),
    );
    let request = CreateCardIdentifier::new("MSK-1", card_details)
        .build(&test_endpoint())
        .unwrap();

    let printed = format!("{:?}", request);
    assert!(!printed.contains("4929000005559"));
    assert!(printed.contains("JsonRequestBody"));
}

#[test]
fn payment_request_body() {
    let auth = test_auth();
    let amount = Amount::from_major_units(Currency::GBP, "25.99").unwrap();
    let payment = CreatePayment::new(
        &auth,
        "demotransaction-1",
        amount,
        "Demo transaction",
        CardRequest {
            merchant_session_key: "MSK-1".to_string(),
            card_identifier: "C1".to_string(),
            reusable: None,
            save: None,
        },
        "Sam",
        "Jones",
        billing_address(),
    )
    .with_entry_method(EntryMethod::Ecommerce)
    .with_apply_3d_secure(Apply3dSecure::UseMSPSetting)
    .with_customer_email("sam@example.com")
    .with_strong_customer_authentication(ScaRequest {
        notification_url: "https://merchant.example/3ds-notify".to_string(),
        browser_accept_header: Some("*/*".to_string()),
        browser_user_agent: Some("Mozilla/5.0".to_string()),
        browser_language: Some("en-GB".to_string()),
        browser_ip: None,
        challenge_window_size: None,
    });

    let request = payment.build(&test_endpoint()).unwrap();
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.url, "https://pi-test.sagepay.com/api/v1/transactions");

    let body = body_json(request.body);
    assert_eq!(body["transactionType"], "Payment");
    assert_eq!(body["amount"], 2599);
    assert_eq!(body["currency"], "GBP");
    assert_eq!(body["vendorTxCode"], "demotransaction-1");
    assert_eq!(body["paymentMethod"]["card"]["cardIdentifier"], "C1");
    assert_eq!(body["billingAddress"]["address1"], "88 The Street");
    assert_eq!(body["entryMethod"], "Ecommerce");
    assert_eq!(body["apply3DSecure"], "UseMSPSetting");
    assert_eq!(
        body["strongCustomerAuthentication"]["notificationURL"],
        "https://merchant.example/3ds-notify"
    );
    // unset options never reach the wire
    assert!(body.get("applyAvsCvcCheck").is_none());
    assert!(body.get("shippingDetails").is_none());
    assert!(body.get("recurringIndicator").is_none());
}

#[test]
fn repeat_and_refund_reference_the_original_transaction() {
    let auth = test_auth();
    let amount = Amount::from_minor_units(Currency::GBP, 1_000).unwrap();

    let repeat = CreateRepeatPayment::new(&auth, "T-ORIG", "repeat-1", amount, "Monthly charge")
        .build(&test_endpoint())
        .unwrap();
    let body = body_json(repeat.body);
    assert_eq!(body["transactionType"], "Repeat");
    assert_eq!(body["referenceTransactionId"], "T-ORIG");

    let refund = CreateRefund::new(&auth, "T-ORIG", "refund-1", amount, "Order cancelled")
        .build(&test_endpoint())
        .unwrap();
    let body = body_json(refund.body);
    assert_eq!(body["transactionType"], "Refund");
    assert_eq!(body["amount"], 1_000);
}

#[test]
fn release_instruction_carries_the_amount() {
    let auth = test_auth();
    let amount = Amount::from_minor_units(Currency::GBP, 2_599).unwrap();
    let request = CreateInstruction::release(&auth, "T1", amount)
        .build(&test_endpoint())
        .unwrap();

    assert_eq!(
        request.url,
        "https://pi-test.sagepay.com/api/v1/transactions/T1/instructions"
    );
    assert_eq!(
        body_json(request.body),
        serde_json::json!({"instructionType": "release", "amount": 2599})
    );
}

#[test]
fn void_instruction_has_no_amount() {
    let auth = test_auth();
    let request = CreateInstruction::void(&auth, "T1")
        .build(&test_endpoint())
        .unwrap();
    assert_eq!(
        body_json(request.body),
        serde_json::json!({"instructionType": "void"})
    );
}

#[test]
fn secure3d_submission() {
    let auth = test_auth();
    let request = CreateSecure3d::new(&auth, "T1", "eJxVUtt")
        .build(&test_endpoint())
        .unwrap();
    assert_eq!(
        request.url,
        "https://pi-test.sagepay.com/api/v1/transactions/T1/3d-secure"
    );
    assert_eq!(
        body_json(request.body),
        serde_json::json!({"paRes": "eJxVUtt"})
    );
}

#[test]
fn fetch_transaction_is_a_bare_get() {
    let auth = test_auth();
    let request = FetchTransaction::new(&auth, "T 1/2")
        .build(&test_endpoint())
        .unwrap();
    assert_eq!(request.method, Method::Get);
    // path parameter is percent-encoded as a single segment
    assert_eq!(
        request.url,
        "https://pi-test.sagepay.com/api/v1/transactions/T%201%2F2"
    );
    assert!(request.body.is_none());
}
