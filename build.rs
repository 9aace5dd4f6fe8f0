fn main() {
    // Stamp the binary so `proscan --version` output can be traced to a build
    let build_date = chrono::Utc::now()
        .format("%Y-%m-%d %H:%M:%S UTC")
        .to_string();
    println!("cargo:rustc-env=PROSCAN_BUILD_DATE={}", build_date);
    println!("cargo:rerun-if-changed=build.rs");
}
