//! Binary for building WASM contracts from odra modules.
#![doc = "Binary for building WASM contracts from odra modules."]

#[allow(unused_imports)]
use entry_fee_vault;

fn main() {
    // Invoked by `cargo odra build`; odra-build does the wasm compilation.
}
