//! User data service.

use std::sync::Arc;

use super::{
    error::{Error, Result},
    http::{ApiRequest, HttpClient},
};

/// User data service.
pub struct UserDataService {
    http: Arc<HttpClient>,
    headers: Vec<(String, String)>,
}

impl UserDataService {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self {
            http,
            headers: Vec::new(),
        }
    }

    /// Adds a header to every call made through this handle, e.g.
    /// `X-Watson-Metadata: customer_id=...`.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Deletes all data associated with a customer ID.
    ///
    /// The customer ID is the one sent in the `X-Watson-Metadata` header
    /// (`customer_id=...`) of earlier requests. Deletion covers every
    /// request made with that ID; data without a customer ID is unaffected.
    pub async fn delete(&self, customer_id: &str) -> Result<()> {
        if customer_id.is_empty() {
            return Err(Error::required("customer_id"));
        }

        let req = ApiRequest::delete("DeleteUserData", "/v1/user_data", &[])?
            .query("customer_id", customer_id);

        self.http.request_empty(&req, &self.headers).await
    }
}
