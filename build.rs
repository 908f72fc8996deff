fn main() {
    // FFI scaffolding comes from uniffi::setup_scaffolding!() in src/uniffi_bindings.rs,
    // so there is no UDL file to watch
    println!("cargo:rerun-if-changed=src/uniffi_bindings.rs");
    println!("cargo:rerun-if-changed=build.rs");
}
