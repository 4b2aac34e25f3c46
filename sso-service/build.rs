fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Generate gRPC code from proto files
    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .compile(&["../proto/sso.proto"], &["../proto"])?;

    println!("cargo:rerun-if-changed=../proto/sso.proto");

    Ok(())
}
