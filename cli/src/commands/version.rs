//! Version command

/// Run the version command.
pub fn run() {
    println!("cf {}", env!("CARGO_PKG_VERSION"));
}
