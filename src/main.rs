// This binary crate is intentionally minimal.
// All network logic lives in the library (src/lib.rs and its modules).
// Run the demo or the HTTP studio with:
//   cargo run --example xor
//   cargo run --bin studio
fn main() {
    println!("ranger-nn: sparse signal-propagating networks with a local learning rule.");
    println!("Run `cargo run --example xor` for the XOR demo or `cargo run --bin studio` for the HTTP API.");
}
