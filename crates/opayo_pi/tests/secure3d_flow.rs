#![allow(clippy::unwrap_used, clippy::panic)]

//! Walks a full 3-D Secure v1 round trip the way an integrating
//! application would: each gateway response is classified or resolved on
//! its own, with the application carrying `md`/`transactionId` between
//! steps.

use opayo_masking::SensitiveValue;
use opayo_pi::{
    classify::{classify, ResponseVariant},
    resolve::{from_acs_notification, resolve, Secure3dState, TransactionState},
    responses::Secure3dStatus,
    ApiRequest, Authentication, Endpoint, Environment,
};

fn test_auth() -> Authentication {
    Authentication::new(
        "acmecorp",
        SensitiveValue::new("integration-key".to_string()),
        SensitiveValue::new("integration-password".to_string()),
    )
}

#[test]
fn v1_redirect_round_trip() {
    // 1. the payment response demands a redirect
    let variant = classify(
        202,
        "application/json",
        br#"{"transactionId": "T1",
             "transactionType": "Payment",
             "statusCode": "2007",
             "status": "3DAuth",
             "statusDetail": "Please redirect your customer",
             "acsUrl": "https://acs.example/auth",
             "paReq": "eJxVUtt",
             "md": "M123"}"#,
    )
    .unwrap();
    let ResponseVariant::Secure3dRedirect(redirect) = variant else {
        panic!("expected Secure3dRedirect");
    };

    // 2. the application POSTs the browser to the ACS with these fields
    let fields = redirect.pa_request_fields("https://merchant.example/acs-return");
    assert_eq!(fields[0], ("PaReq".to_string(), "eJxVUtt".to_string()));
    assert_eq!(fields[1], ("MD".to_string(), "M123".to_string()));

    // 3. the ACS calls back with the authentication result
    let state = from_acs_notification(
        "application/x-www-form-urlencoded",
        b"PaRes=eJxResult&MD=M123",
    )
    .unwrap();
    let Secure3dState::V1Returned { pa_res, md } = state else {
        panic!("expected V1Returned");
    };
    assert_eq!(md.as_deref(), Some("M123"));

    // 4. the result goes back to the gateway against the stored
    //    transaction id
    let auth = test_auth();
    let request = opayo_pi::requests::CreateSecure3d::new(
        &auth,
        redirect.transaction_id.clone().unwrap(),
        pa_res,
    )
    .build(&Endpoint::new(Environment::Test))
    .unwrap();
    assert_eq!(
        request.url,
        "https://pi-test.sagepay.com/api/v1/transactions/T1/3d-secure"
    );

    // 5. the gateway answers with a bare authentication outcome; the
    //    resolver interprets it even though the classifier has no rule
    //    for the shape
    let body = serde_json::json!({"status": "Authenticated"});
    let variant = classify(200, "application/json", body.to_string().as_bytes()).unwrap();
    assert!(matches!(variant, ResponseVariant::Unclassified(_)));

    let snapshot = resolve(&body);
    assert_eq!(
        snapshot.secure3d,
        Secure3dState::Final(Secure3dStatus::Authenticated)
    );
    assert_eq!(snapshot.transaction, TransactionState::Authorized);

    // 6. the final transaction fetch is terminal
    let final_body = serde_json::json!({
        "transactionId": "T1",
        "transactionType": "Payment",
        "status": "Ok",
        "3DSecure": {"status": "Authenticated"}
    });
    let snapshot = resolve(&final_body);
    assert!(snapshot.is_terminal());
    assert_eq!(snapshot.transaction, TransactionState::Authorized);
}

#[test]
fn v2_challenge_round_trip() {
    // the gateway answers a payment with a v2 challenge
    let body = serde_json::json!({
        "transactionId": "T2",
        "transactionType": "Payment",
        "status": "3DAuth",
        "acsUrl": "https://acs.example/challenge",
        "cReq": "eyJ0aHJlZURT",
        "dsTranId": "DS-9"
    });
    let snapshot = resolve(&body);
    assert_eq!(snapshot.transaction, TransactionState::PendingSecure3d);
    assert!(snapshot.secure3d.is_pending());

    // the classifier sees an ordinary pending payment (no v1 statusCode);
    // the typed snapshot hands out the challenge details
    let variant = classify(200, "application/json", body.to_string().as_bytes()).unwrap();
    let ResponseVariant::Payment(transaction) = variant else {
        panic!("expected Payment");
    };
    let challenge = transaction.secure3d_v2_challenge().unwrap();
    assert_eq!(challenge.acs_url, "https://acs.example/challenge");
    assert_eq!(challenge.c_req, "eyJ0aHJlZURT");
    assert_eq!(challenge.ds_tran_id.as_deref(), Some("DS-9"));
    assert_eq!(
        challenge.creq_fields(Some("sess-1")),
        vec![
            ("creq".to_string(), "eyJ0aHJlZURT".to_string()),
            ("threeDSSessionData".to_string(), "sess-1".to_string()),
        ]
    );

    // the ACS notifies completion as JSON
    let state = from_acs_notification(
        "application/json",
        br#"{"cres": "eyJhY3Mi", "threeDSSessionData": "sess-1"}"#,
    )
    .unwrap();
    let Secure3dState::V2Returned { c_res, .. } = state else {
        panic!("expected V2Returned");
    };

    // and the challenge result goes back to the gateway
    let auth = test_auth();
    let request = opayo_pi::requests::CreateSecure3dv2Challenge::new(&auth, "T2", c_res)
        .build(&Endpoint::new(Environment::Test))
        .unwrap();
    assert_eq!(
        request.url,
        "https://pi-test.sagepay.com/api/v1/transactions/T2/3d-secure-challenge"
    );
}

#[test]
fn declined_payment_is_terminal_without_secure3d() {
    let body = serde_json::json!({
        "transactionId": "T3",
        "transactionType": "Payment",
        "status": "NotAuthed",
        "statusCode": "2000",
        "statusDetail": "Authorisation Declined."
    });
    let snapshot = resolve(&body);
    assert_eq!(snapshot.transaction, TransactionState::Declined);
    assert_eq!(snapshot.secure3d, Secure3dState::NotApplicable);
    assert!(snapshot.is_terminal());
}
