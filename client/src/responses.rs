use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize};
use std::{
    fmt::Display,
    hash::{Hash, Hasher},
};

/// Payload the API returns when it rejects a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DStvUser {
    pub details: DStvUserDetails,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DStvUserDetails {
    pub account_status: String,
    pub first_name: String,
    pub last_name: String,
    pub customer_type: String,
    pub invoice_period: i64,
    pub due_date: DateTime<FixedOffset>,
    pub customer_number: i64,
}

/// `packageName` must be present so an error-shaped body never reads as
/// "no package"; an explicit `null` is still allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct PackageDetails {
    #[serde(rename = "packageName", deserialize_with = "present_or_null")]
    pub package_name: Option<String>,
}

fn present_or_null<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)
}

/// A DStv subscription payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DStvTransaction {
    #[serde(rename = "trans_id")]
    pub transaction_id: String,
    pub details: DStvTransactionDetails,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DStvTransactionDetails {
    pub service: String,
    pub package: String,
    #[serde(rename = "smartno")]
    pub smartcard_number: String,
    pub price: String,
    pub status: String,
    pub balance: String,
}

/// DStv package codes accepted by the payment endpoint. Two values are equal
/// when they send the same wire code.
#[derive(Debug, Clone)]
pub enum DstvProductCode {
    Padi,
    YangaBouquet,
    Compact,
    CompactPlus,
    CompactPlusXtraView,
    Premium,
    PremiumXtraView,
    /// A code not listed above, sent verbatim.
    Other(String),
}

impl DstvProductCode {
    pub fn as_str(&self) -> &str {
        match self {
            DstvProductCode::Padi => "NLTESE36",
            DstvProductCode::YangaBouquet => "NNJ1E36",
            DstvProductCode::Compact => "COMPE36",
            DstvProductCode::CompactPlus => "COMPLE36",
            DstvProductCode::CompactPlusXtraView => "DCOHDPV",
            DstvProductCode::Premium => "PRWE36",
            DstvProductCode::PremiumXtraView => "DPRHDP",
            DstvProductCode::Other(code) => code,
        }
    }
}

impl PartialEq for DstvProductCode {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for DstvProductCode {}

impl Hash for DstvProductCode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl From<&str> for DstvProductCode {
    fn from(code: &str) -> Self {
        match code {
            "NLTESE36" => DstvProductCode::Padi,
            "NNJ1E36" => DstvProductCode::YangaBouquet,
            "COMPE36" => DstvProductCode::Compact,
            "COMPLE36" => DstvProductCode::CompactPlus,
            "DCOHDPV" => DstvProductCode::CompactPlusXtraView,
            "PRWE36" => DstvProductCode::Premium,
            "DPRHDP" => DstvProductCode::PremiumXtraView,
            other => DstvProductCode::Other(other.to_string()),
        }
    }
}

impl Display for DstvProductCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input for paying a DStv subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayDstvOptions {
    pub transaction_id: String,
    pub price: String,
    pub product_code: DstvProductCode,
    pub customer_name: String,
    pub customer_number: String,
    pub smartcard_number: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_codes_round_trip_through_wire_names() {
        for code in [
            DstvProductCode::Padi,
            DstvProductCode::YangaBouquet,
            DstvProductCode::Compact,
            DstvProductCode::CompactPlus,
            DstvProductCode::CompactPlusXtraView,
            DstvProductCode::Premium,
            DstvProductCode::PremiumXtraView,
        ] {
            assert_eq!(DstvProductCode::from(code.as_str()), code);
        }
        assert_eq!(
            DstvProductCode::from("BOXOFFICE"),
            DstvProductCode::Other("BOXOFFICE".to_string())
        );
    }

    #[test]
    fn product_codes_compare_by_wire_code() {
        use std::collections::HashSet;

        assert_eq!(
            DstvProductCode::Other("COMPE36".to_string()),
            DstvProductCode::Compact
        );
        assert_ne!(
            DstvProductCode::Other("COMPLE36".to_string()),
            DstvProductCode::Compact
        );

        let codes: HashSet<DstvProductCode> = [
            DstvProductCode::Premium,
            DstvProductCode::Other("PRWE36".to_string()),
        ]
        .into_iter()
        .collect();
        assert_eq!(codes.len(), 1);
    }

    #[test]
    fn error_response_requires_both_fields() {
        assert!(serde_json::from_str::<ErrorResponse>(r#"{"code":"ERR101"}"#).is_err());
        assert!(serde_json::from_str::<ErrorResponse>(r#"{"description":"x"}"#).is_err());
    }

    #[test]
    fn package_name_may_be_null_but_not_missing() {
        let null: PackageDetails = serde_json::from_str(r#"{"packageName":null}"#).unwrap();
        assert_eq!(null.package_name, None);

        assert!(serde_json::from_str::<PackageDetails>("{}").is_err());
        assert!(serde_json::from_str::<PackageDetails>(
            r#"{"code":"ERR101","description":"Invalid username or api_key"}"#
        )
        .is_err());
    }
}
