//! Resource-not-found classification for errors returned by the Spanner API.
//!
//! A `NOT_FOUND` status alone does not say *what* was not found. Spanner
//! attaches a `google.rpc.ResourceInfo` detail naming the resource type, and
//! only that detail distinguishes a dropped session from a missing database.

use tonic::Code;

use crate::status::GrpcStatusSource;

pub const SESSION_RESOURCE_TYPE: &str = "type.googleapis.com/google.spanner.v1.Session";
pub const DATABASE_RESOURCE_TYPE: &str =
    "type.googleapis.com/google.spanner.admin.database.v1.Database";
pub const INSTANCE_RESOURCE_TYPE: &str =
    "type.googleapis.com/google.spanner.admin.instance.v1.Instance";

/// Returns true if the given error is a `Session not found` error.
pub fn is_session_not_found_error<E>(err: Option<&E>) -> bool
where
    E: GrpcStatusSource + ?Sized,
{
    is_resource_not_found(err, SESSION_RESOURCE_TYPE)
}

/// Returns true if the given error is a `Database not found` error.
pub fn is_database_not_found_error<E>(err: Option<&E>) -> bool
where
    E: GrpcStatusSource + ?Sized,
{
    is_resource_not_found(err, DATABASE_RESOURCE_TYPE)
}

/// Returns true if the given error is an `Instance not found` error.
pub fn is_instance_not_found_error<E>(err: Option<&E>) -> bool
where
    E: GrpcStatusSource + ?Sized,
{
    is_resource_not_found(err, INSTANCE_RESOURCE_TYPE)
}

/// Returns true if `err` is `NOT_FOUND` and its first `ResourceInfo` detail
/// names exactly `resource_type`.
pub fn is_resource_not_found<E>(err: Option<&E>, resource_type: &str) -> bool
where
    E: GrpcStatusSource + ?Sized,
{
    let Some(err) = err else {
        return false;
    };
    if error_code(err) != Code::NotFound {
        return false;
    }
    extract_resource_type(err).is_some_and(|rt| rt == resource_type)
}

/// Extracts the resource type from the first `ResourceInfo` detail in the error.
///
/// Returns `None` when the error carries no gRPC status or no such detail.
pub fn extract_resource_type<E>(err: &E) -> Option<String>
where
    E: GrpcStatusSource + ?Sized,
{
    let status = err.rpc_status()?;
    status
        .resource_info()
        .map(|info| info.resource_type.clone())
}

/// The gRPC code of `err`, or [`Code::Unknown`] if it has none.
pub fn error_code<E>(err: &E) -> Code
where
    E: GrpcStatusSource + ?Sized,
{
    err.grpc_code().unwrap_or(Code::Unknown)
}
