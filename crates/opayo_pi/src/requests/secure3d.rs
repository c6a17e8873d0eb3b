//! Submitting 3-D Secure authentication results back to the gateway.

use serde::Serialize;

use crate::{
    auth::{Authentication, RequestAuth},
    errors::{BuildError, CustomResult},
    request::RequestContent,
    requests::ApiRequest,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PaResBody<'a> {
    pa_res: &'a str,
}

/// `POST /transactions/{transactionId}/3d-secure` — hand the v1 `PaRes`
/// returned by the ACS back to the gateway.
#[derive(Debug)]
pub struct CreateSecure3d<'a> {
    authentication: &'a Authentication,
    transaction_id: String,
    pa_res: String,
}

impl<'a> CreateSecure3d<'a> {
    /// Submit the payer authentication response for a transaction.
    pub fn new(
        authentication: &'a Authentication,
        transaction_id: impl Into<String>,
        pa_res: impl Into<String>,
    ) -> Self {
        Self {
            authentication,
            transaction_id: transaction_id.into(),
            pa_res: pa_res.into(),
        }
    }
}

impl ApiRequest for CreateSecure3d<'_> {
    fn resource_segments(&self) -> Vec<String> {
        vec![
            "transactions".to_string(),
            self.transaction_id.clone(),
            "3d-secure".to_string(),
        ]
    }

    fn auth(&self) -> RequestAuth<'_> {
        RequestAuth::Basic(self.authentication)
    }

    fn request_content(&self) -> CustomResult<Option<RequestContent>, BuildError> {
        RequestContent::json(&PaResBody {
            pa_res: &self.pa_res,
        })
        .map(Some)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CResBody<'a> {
    c_res: &'a str,
}

/// `POST /transactions/{transactionId}/3d-secure-challenge` — hand the v2
/// challenge response (`cRes`) back to the gateway.
#[derive(Debug)]
pub struct CreateSecure3dv2Challenge<'a> {
    authentication: &'a Authentication,
    transaction_id: String,
    c_res: String,
}

impl<'a> CreateSecure3dv2Challenge<'a> {
    /// Submit the challenge result for a transaction.
    pub fn new(
        authentication: &'a Authentication,
        transaction_id: impl Into<String>,
        c_res: impl Into<String>,
    ) -> Self {
        Self {
            authentication,
            transaction_id: transaction_id.into(),
            c_res: c_res.into(),
        }
    }
}

impl ApiRequest for CreateSecure3dv2Challenge<'_> {
    fn resource_segments(&self) -> Vec<String> {
        vec![
            "transactions".to_string(),
            self.transaction_id.clone(),
            "3d-secure-challenge".to_string(),
        ]
    }

    fn auth(&self) -> RequestAuth<'_> {
        RequestAuth::Basic(self.authentication)
    }

    fn request_content(&self) -> CustomResult<Option<RequestContent>, BuildError> {
        RequestContent::json(&CResBody {
            c_res: &self.c_res,
        })
        .map(Some)
    }
}
