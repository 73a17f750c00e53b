//! Shared fixtures for the bills integration tests.

#![allow(dead_code)]

use mobilenig_client::{
    config::{with_api_key, with_base_url, with_environment, with_username},
    Client, Environment,
};
use url::Url;
use wiremock::MockServer;

pub const TEST_USERNAME: &str = "test_username";
pub const TEST_API_KEY: &str = "test_api_key";

pub const ENVIRONMENTS: [Environment; 2] = [Environment::Live, Environment::Test];

pub fn client(server: &MockServer, environment: Environment) -> Client {
    Client::new([
        with_base_url(Url::parse(&server.uri()).ok()),
        with_username(TEST_USERNAME),
        with_api_key(TEST_API_KEY),
        with_environment(environment),
    ])
}

pub fn check_dstv_user_response() -> &'static str {
    r#"
    {
        "details": {
            "accountStatus":"OPEN",
            "firstName":"ESU",
            "lastName":"INI OBONG BASSEY",
            "customerType":"SUD",
            "invoicePeriod":1,
            "dueDate":"2018-11-13T00:00:00+01:00",
            "customerNumber":275953782
        }
    }
    "#
}

pub fn get_dstv_package_response() -> &'static str {
    r#"{"packageName":"DStv Compact"}"#
}

pub fn dstv_transaction_response() -> &'static str {
    r#"
    {
        "trans_id":"122790223",
        "details": {
            "service":"DSTV",
            "package":"DStv Mobile MAXI",
            "smartno":"4131953321",
            "price":"790",
            "status":"SUCCESSFUL",
            "balance":"7931"
        }
    }
    "#
}

pub fn error_response() -> &'static str {
    r#"
    {
        "code": "ERR101",
        "description": "Invalid username or api_key"
    }
    "#
}
