//! Decoded view of `google.rpc.Status` and the capability trait that exposes it.

use prost::Message;
use prost_types::Any;
use spanner_probe_proto::generated::rpc;
use spanner_probe_proto::{
    ERROR_INFO_TYPE_URL, REQUEST_INFO_TYPE_URL, RESOURCE_INFO_TYPE_URL, RETRY_INFO_TYPE_URL,
};
use tonic::Code;

const RESOURCE_INFO_NAME: &str = "google.rpc.ResourceInfo";
const ERROR_INFO_NAME: &str = "google.rpc.ErrorInfo";
const RETRY_INFO_NAME: &str = "google.rpc.RetryInfo";
const REQUEST_INFO_NAME: &str = "google.rpc.RequestInfo";

/// The fully-qualified message name of an `Any` type URL.
///
/// Only the part after the last `/` identifies the type; the host prefix is
/// not checked.
fn message_name(type_url: &str) -> &str {
    type_url.rsplit('/').next().unwrap_or(type_url)
}

/// One structured detail record attached to a status.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorDetail {
    ResourceInfo(rpc::ResourceInfo),
    ErrorInfo(rpc::ErrorInfo),
    RetryInfo(rpc::RetryInfo),
    RequestInfo(rpc::RequestInfo),
    /// A detail of a type this crate does not decode, or whose payload was malformed.
    Unknown { type_url: String },
}

impl ErrorDetail {
    fn from_any(any: &Any) -> Self {
        let value = any.value.as_slice();
        let decoded = match message_name(&any.type_url) {
            RESOURCE_INFO_NAME => rpc::ResourceInfo::decode(value).map(ErrorDetail::ResourceInfo),
            ERROR_INFO_NAME => rpc::ErrorInfo::decode(value).map(ErrorDetail::ErrorInfo),
            RETRY_INFO_NAME => rpc::RetryInfo::decode(value).map(ErrorDetail::RetryInfo),
            REQUEST_INFO_NAME => rpc::RequestInfo::decode(value).map(ErrorDetail::RequestInfo),
            _ => {
                return ErrorDetail::Unknown {
                    type_url: any.type_url.clone(),
                }
            }
        };

        decoded.unwrap_or_else(|e| {
            tracing::debug!(type_url = %any.type_url, error = %e, "Failed to decode error detail");
            ErrorDetail::Unknown {
                type_url: any.type_url.clone(),
            }
        })
    }

    /// The type URL this detail was packed with
    pub fn type_url(&self) -> &str {
        match self {
            ErrorDetail::ResourceInfo(_) => RESOURCE_INFO_TYPE_URL,
            ErrorDetail::ErrorInfo(_) => ERROR_INFO_TYPE_URL,
            ErrorDetail::RetryInfo(_) => RETRY_INFO_TYPE_URL,
            ErrorDetail::RequestInfo(_) => REQUEST_INFO_TYPE_URL,
            ErrorDetail::Unknown { type_url } => type_url,
        }
    }
}

/// A gRPC status with its structured details decoded, in wire order.
#[derive(Debug, Clone, PartialEq)]
pub struct RpcStatus {
    pub code: Code,
    pub message: String,
    pub details: Vec<ErrorDetail>,
}

impl RpcStatus {
    pub fn new(code: Code, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: Vec::new(),
        }
    }

    /// Decode the `grpc-status-details-bin` payload that accompanies `code`.
    ///
    /// The code and message always come from the status line. An empty or
    /// undecodable payload yields a status without details.
    pub fn decode(code: Code, message: impl Into<String>, details: &[u8]) -> Self {
        let mut status = Self::new(code, message);
        if details.is_empty() {
            return status;
        }

        match rpc::Status::decode(details) {
            Ok(proto) => {
                status.details = proto.details.iter().map(ErrorDetail::from_any).collect();
            }
            Err(e) => {
                tracing::debug!(code = ?code, error = %e, "Failed to decode status details");
            }
        }
        status
    }

    /// The first `ResourceInfo` detail, if any
    pub fn resource_info(&self) -> Option<&rpc::ResourceInfo> {
        self.details.iter().find_map(|detail| match detail {
            ErrorDetail::ResourceInfo(info) => Some(info),
            _ => None,
        })
    }
}

/// Capability of an error value that carries a gRPC status.
///
/// Wrapping error types implement this by delegating to the error they wrap,
/// so the classifier never needs to know the concrete error representation.
pub trait GrpcStatusSource {
    /// The status code, or `None` if this error did not come from a gRPC status
    fn grpc_code(&self) -> Option<Code>;

    /// The status message, if any
    fn grpc_message(&self) -> Option<&str>;

    /// Raw `grpc-status-details-bin` payload; empty when absent
    fn grpc_details(&self) -> &[u8];

    /// Decode the full status, or `None` when no status can be extracted
    fn rpc_status(&self) -> Option<RpcStatus> {
        let code = self.grpc_code()?;
        Some(RpcStatus::decode(
            code,
            self.grpc_message().unwrap_or_default(),
            self.grpc_details(),
        ))
    }
}

impl GrpcStatusSource for tonic::Status {
    fn grpc_code(&self) -> Option<Code> {
        Some(self.code())
    }

    fn grpc_message(&self) -> Option<&str> {
        Some(self.message())
    }

    fn grpc_details(&self) -> &[u8] {
        self.details()
    }
}

impl<T: GrpcStatusSource + ?Sized> GrpcStatusSource for Box<T> {
    fn grpc_code(&self) -> Option<Code> {
        (**self).grpc_code()
    }

    fn grpc_message(&self) -> Option<&str> {
        (**self).grpc_message()
    }

    fn grpc_details(&self) -> &[u8] {
        (**self).grpc_details()
    }
}
