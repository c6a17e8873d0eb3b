//! Fetching transaction snapshots.

use crate::{
    auth::{Authentication, RequestAuth},
    request::Method,
    requests::ApiRequest,
};

/// `GET /transactions/{transactionId}` — the current snapshot of a
/// transaction, typically polled after a 3-D Secure round-trip.
#[derive(Debug)]
pub struct FetchTransaction<'a> {
    authentication: &'a Authentication,
    transaction_id: String,
}

impl<'a> FetchTransaction<'a> {
    /// A fetch for the given transaction.
    pub fn new(authentication: &'a Authentication, transaction_id: impl Into<String>) -> Self {
        Self {
            authentication,
            transaction_id: transaction_id.into(),
        }
    }
}

impl ApiRequest for FetchTransaction<'_> {
    fn method(&self) -> Method {
        Method::Get
    }

    fn resource_segments(&self) -> Vec<String> {
        vec!["transactions".to_string(), self.transaction_id.clone()]
    }

    fn auth(&self) -> RequestAuth<'_> {
        RequestAuth::Basic(self.authentication)
    }
}
