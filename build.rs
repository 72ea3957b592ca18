fn main() {
    // Git hash, build time and compiler version, shown by `celnav --version`
    // and in the run summary.
    built::write_built_file().expect("Failed to acquire build-time information");

    println!("cargo:rerun-if-changed=build.rs");
}
