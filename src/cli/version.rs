//! Version command handler

/// Display version information
pub fn display_version() {
    println!("recall-trace {}", env!("CARGO_PKG_VERSION"));
    println!("  {}", env!("CARGO_PKG_DESCRIPTION"));
    println!("  License: {}", env!("CARGO_PKG_LICENSE"));
}
