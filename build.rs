fn main() -> Result<(), String> {
    println!("cargo:rerun-if-changed=proto/extension.proto");

    // messages only, the codecs are plugged into Ballista's own services
    tonic_build::configure()
        .build_client(false)
        .build_server(false)
        .protoc_arg("--experimental_allow_proto3_optional")
        .compile_protos(&["proto/extension.proto"], &["proto"])
        .map_err(|e| format!("protobuf compilation failed: {e}"))?;

    Ok(())
}
