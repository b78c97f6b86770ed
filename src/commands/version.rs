use anyhow::Result;

pub fn execute() -> Result<()> {
    println!("schedmon version {}", env!("CARGO_PKG_VERSION"));
    Ok(())
}
