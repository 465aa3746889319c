use anyhow::Result;

pub fn run_version() -> Result<()> {
    println!("oci-tool {}", env!("CARGO_PKG_VERSION"));
    Ok(())
}
