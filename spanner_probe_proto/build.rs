//! Build script for spanner_probe_proto crate
//!
//! The generated gRPC/Protobuf code is checked in under `src/generated/`.
//! It is regenerated with tonic-build only when the `codegen` feature is
//! enabled, so ordinary builds do not need `protoc`.

use std::env;
use std::path::PathBuf;

const PROTO_FILES: &[&str] = &[
    "google/rpc/status.proto",
    "google/rpc/error_details.proto",
    "google/spanner/v1/spanner.proto",
];

fn main() {
    let crate_root = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    let proto_include = crate_root.join("proto");

    for file in PROTO_FILES {
        println!(
            "cargo:rerun-if-changed={}",
            proto_include.join(file).display()
        );
    }

    if env::var("CARGO_FEATURE_CODEGEN").is_err() {
        let generated = crate_root.join("src/generated");
        if !generated.join("google.spanner.v1.rs").exists() {
            println!("cargo:warning=Pre-generated protobuf code not found at src/generated/");
            println!("cargo:warning=Regenerate with: cargo build --features codegen");
        }
        return;
    }

    let proto_paths: Vec<PathBuf> = PROTO_FILES
        .iter()
        .map(|file| proto_include.join(file))
        .collect();

    tonic_build::configure()
        .build_client(true)
        .build_server(false)
        .out_dir("src/generated/")
        .compile_protos(&proto_paths, &[proto_include])
        .expect("Failed to compile protobuf files");
}
