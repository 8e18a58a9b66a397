//! Type URLs and packing helpers for `google.rpc` error details.
//!
//! Servers attach error details as `google.protobuf.Any` values inside a
//! `google.rpc.Status`, which gRPC transmits in the `grpc-status-details-bin`
//! trailer. These helpers build that payload.

use prost::Message;
use prost_types::Any;

use crate::generated::rpc;

const TYPE_URL_PREFIX: &str = "type.googleapis.com/";

pub const ERROR_INFO_TYPE_URL: &str = "type.googleapis.com/google.rpc.ErrorInfo";
pub const RETRY_INFO_TYPE_URL: &str = "type.googleapis.com/google.rpc.RetryInfo";
pub const REQUEST_INFO_TYPE_URL: &str = "type.googleapis.com/google.rpc.RequestInfo";
pub const RESOURCE_INFO_TYPE_URL: &str = "type.googleapis.com/google.rpc.ResourceInfo";

/// A message that can be packed into a `google.protobuf.Any`.
pub trait DetailMessage: Message + Sized {
    const TYPE_URL: &'static str;

    fn into_any(self) -> Any {
        Any {
            type_url: Self::TYPE_URL.to_string(),
            value: self.encode_to_vec(),
        }
    }
}

impl DetailMessage for rpc::ErrorInfo {
    const TYPE_URL: &'static str = ERROR_INFO_TYPE_URL;
}

impl DetailMessage for rpc::RetryInfo {
    const TYPE_URL: &'static str = RETRY_INFO_TYPE_URL;
}

impl DetailMessage for rpc::RequestInfo {
    const TYPE_URL: &'static str = REQUEST_INFO_TYPE_URL;
}

impl DetailMessage for rpc::ResourceInfo {
    const TYPE_URL: &'static str = RESOURCE_INFO_TYPE_URL;
}

/// Build the fully-qualified type URL for a protobuf message name,
/// e.g. `google.spanner.v1.Session`.
pub fn type_url_for(full_name: &str) -> String {
    format!("{TYPE_URL_PREFIX}{full_name}")
}

/// Encode a `google.rpc.Status` the way it travels in `grpc-status-details-bin`.
pub fn encode_status(code: i32, message: impl Into<String>, details: Vec<Any>) -> Vec<u8> {
    rpc::Status {
        code,
        message: message.into(),
        details,
    }
    .encode_to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_info_packs_with_type_url() {
        let any = rpc::ResourceInfo {
            resource_type: type_url_for("google.spanner.v1.Session"),
            resource_name: "projects/p/instances/i/databases/d/sessions/s".to_string(),
            owner: String::new(),
            description: "Session does not exist.".to_string(),
        }
        .into_any();

        assert_eq!(any.type_url, RESOURCE_INFO_TYPE_URL);
        let decoded = rpc::ResourceInfo::decode(any.value.as_slice()).unwrap();
        assert_eq!(
            decoded.resource_type,
            "type.googleapis.com/google.spanner.v1.Session"
        );
    }

    #[test]
    fn test_encode_status_keeps_detail_order() {
        let bytes = encode_status(
            5,
            "Session not found: s",
            vec![
                rpc::RequestInfo {
                    request_id: "req-1".to_string(),
                    serving_data: String::new(),
                }
                .into_any(),
                rpc::ResourceInfo::default().into_any(),
            ],
        );

        let status = rpc::Status::decode(bytes.as_slice()).unwrap();
        assert_eq!(status.code, 5);
        assert_eq!(status.message, "Session not found: s");
        assert_eq!(status.details[0].type_url, REQUEST_INFO_TYPE_URL);
        assert_eq!(status.details[1].type_url, RESOURCE_INFO_TYPE_URL);
    }
}
