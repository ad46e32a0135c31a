//! Version command

use anstream::println;
use std::env::consts::{ARCH, OS};

/// Print the version and target platform
pub fn run_version() {
    println!("ghsync {} ({OS}/{ARCH})", env!("CARGO_PKG_VERSION"));
}
