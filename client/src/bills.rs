use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use crate::{
    envelope::Response,
    environment::Environment,
    http::{Client, Params},
    responses::{DStvTransaction, DStvUser, PackageDetails, PayDstvOptions},
    Result,
};

const SERVICE_DSTV: &str = "DSTV";

pub const PATH_USER_CHECK: &str = "/bills/user_check";
pub const PATH_GET_PACKAGE: &str = "/bills/get_package";
pub const PATH_PAY_DSTV: &str = "/bills/dstv";
pub const PATH_QUERY: &str = "/bills/query";

/// Operations on the `/bills/` endpoints, borrowing the client's shared
/// configuration.
///
/// Each operation has a `*_with_response` twin that also hands back the
/// envelope it was decoded from.
#[derive(Debug, Clone, Copy)]
pub struct BillsService<'a> {
    client: &'a Client,
}

impl<'a> BillsService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Validates a DStv smartcard number.
    pub async fn check_dstv_user(
        self,
        cancel: &CancellationToken,
        smartcard_number: &str,
    ) -> Result<DStvUser> {
        let (user, _) = self
            .check_dstv_user_with_response(cancel, smartcard_number)
            .await?;
        Ok(user)
    }

    pub async fn check_dstv_user_with_response(
        self,
        cancel: &CancellationToken,
        smartcard_number: &str,
    ) -> Result<(DStvUser, Response)> {
        let params = Params::from([
            ("service", SERVICE_DSTV.to_string()),
            ("number", smartcard_number.to_string()),
        ]);
        self.call(cancel, PATH_USER_CHECK, &params).await
    }

    /// Returns the name of the customer's current DStv package, if any.
    ///
    /// A body without a `packageName` key is a decode error, not `None`.
    pub async fn get_dstv_package(
        self,
        cancel: &CancellationToken,
        customer_number: i64,
    ) -> Result<Option<String>> {
        let (package, _) = self
            .get_dstv_package_with_response(cancel, customer_number)
            .await?;
        Ok(package)
    }

    pub async fn get_dstv_package_with_response(
        self,
        cancel: &CancellationToken,
        customer_number: i64,
    ) -> Result<(Option<String>, Response)> {
        let params = Params::from([
            ("service", SERVICE_DSTV.to_string()),
            ("customerNumber", customer_number.to_string()),
        ]);
        let (details, response): (PackageDetails, _) =
            self.call(cancel, PATH_GET_PACKAGE, &params).await?;
        Ok((details.package_name, response))
    }

    /// Pays a DStv subscription. Routed to the `_test` endpoint in the TEST
    /// environment.
    pub async fn pay_dstv(
        self,
        cancel: &CancellationToken,
        options: &PayDstvOptions,
    ) -> Result<DStvTransaction> {
        let (transaction, _) = self.pay_dstv_with_response(cancel, options).await?;
        Ok(transaction)
    }

    pub async fn pay_dstv_with_response(
        self,
        cancel: &CancellationToken,
        options: &PayDstvOptions,
    ) -> Result<(DStvTransaction, Response)> {
        let params = Params::from([
            ("product_code", options.product_code.to_string()),
            ("customer_name", options.customer_name.clone()),
            ("customer_number", options.customer_number.clone()),
            ("price", options.price.clone()),
            ("smartno", options.smartcard_number.clone()),
            ("trans_id", options.transaction_id.clone()),
        ]);
        let path = pay_dstv_path(self.client.environment());
        self.call(cancel, &path, &params).await
    }

    /// Fetches a DStv transaction by its ID.
    pub async fn query_dstv(
        self,
        cancel: &CancellationToken,
        transaction_id: &str,
    ) -> Result<DStvTransaction> {
        let (transaction, _) = self
            .query_dstv_with_response(cancel, transaction_id)
            .await?;
        Ok(transaction)
    }

    pub async fn query_dstv_with_response(
        self,
        cancel: &CancellationToken,
        transaction_id: &str,
    ) -> Result<(DStvTransaction, Response)> {
        let params = Params::from([("trans_id", transaction_id.to_string())]);
        self.call(cancel, PATH_QUERY, &params).await
    }

    async fn call<T: DeserializeOwned>(
        self,
        cancel: &CancellationToken,
        path: &str,
        params: &Params<'_>,
    ) -> Result<(T, Response)> {
        let response = self.client.execute(cancel, path, params).await?;
        let value = response.json()?;
        Ok((value, response))
    }
}

fn pay_dstv_path(environment: Environment) -> String {
    match environment {
        Environment::Live => PATH_PAY_DSTV.to_string(),
        Environment::Test => format!("{}_test", PATH_PAY_DSTV),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_path_follows_environment() {
        assert_eq!(pay_dstv_path(Environment::Live), "/bills/dstv");
        assert_eq!(pay_dstv_path(Environment::Test), "/bills/dstv_test");
    }
}
