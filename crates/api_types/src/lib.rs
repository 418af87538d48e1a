//! JSON-API payloads shared by the server and its clients.

use serde::{Deserialize, Serialize};

pub use engine::Currency;

/// Media type of JSON-API request and response bodies.
pub const MEDIA_TYPE: &str = "application/vnd.api+json";

pub mod document {
    use super::*;

    /// Top level document carrying primary data: a resource or a list of them.
    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    pub struct Document<T> {
        pub data: T,
    }

    /// A resource object.
    ///
    /// `id` is absent in create requests, where the server assigns it.
    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    pub struct Resource<A> {
        #[serde(rename = "type")]
        pub kind: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub id: Option<String>,
        pub attributes: A,
    }

    /// Top level document carrying errors instead of data.
    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    pub struct ErrorDocument {
        pub errors: Vec<ErrorObject>,
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    pub struct ErrorObject {
        /// HTTP status code, as a string.
        pub status: String,
        pub title: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub detail: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub source: Option<ErrorSource>,
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    pub struct ErrorSource {
        /// JSON pointer to the offending request member, e.g.
        /// `/data/attributes/currency`.
        pub pointer: String,
    }
}

pub mod fund {
    use serde_json::Value;

    use super::{
        document::{Document, Resource},
        *,
    };

    pub const RESOURCE_TYPE: &str = "fund";

    /// Attributes of a stored fund.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct FundAttributes {
        pub name: String,
        pub currency: Currency,
    }

    /// Attributes of a create request.
    ///
    /// Both fields are required, but they are kept optional and untyped here
    /// so a missing value, or one of the wrong JSON type, is reported against
    /// its own field.
    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    pub struct FundAttributesNew {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub name: Option<Value>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub currency: Option<Value>,
    }

    pub type FundResource = Resource<FundAttributes>;
    pub type FundDocument = Document<FundResource>;
    pub type FundList = Document<Vec<FundResource>>;
    pub type FundNew = Document<Resource<FundAttributesNew>>;

    impl From<&engine::Fund> for FundResource {
        fn from(value: &engine::Fund) -> Self {
            Resource {
                kind: RESOURCE_TYPE.to_string(),
                id: Some(value.id.to_string()),
                attributes: FundAttributes {
                    name: value.name.clone(),
                    currency: value.currency,
                },
            }
        }
    }

    impl FundNew {
        /// Create request for a fund, as a client would send it.
        pub fn new(name: &str, currency: &str) -> Self {
            Document {
                data: Resource {
                    kind: RESOURCE_TYPE.to_string(),
                    id: None,
                    attributes: FundAttributesNew {
                        name: Some(Value::from(name)),
                        currency: Some(Value::from(currency)),
                    },
                },
            }
        }
    }
}
