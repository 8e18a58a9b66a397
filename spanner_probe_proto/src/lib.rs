//! Protocol definitions and generated code for the Spanner probe.
//!
//! This crate contains the Protobuf definitions for the session-management
//! subset of `google.spanner.v1.Spanner` and the `google.rpc` status and
//! error-detail messages that servers attach to failed calls.
//!
//! The code under `src/generated/` is produced by tonic-build; see `build.rs`.

pub mod generated {
    pub mod google {
        pub mod rpc {
            include!("generated/google.rpc.rs");
        }

        pub mod spanner {
            pub mod v1 {
                include!("generated/google.spanner.v1.rs");
            }
        }
    }

    pub use google::rpc;
    pub use google::spanner::v1 as spanner;
}

pub mod details;

pub use details::*;

// Re-export so dependents agree on the prost/tonic versions.
pub use prost;
pub use prost_types;
pub use tonic;
