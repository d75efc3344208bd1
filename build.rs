// Build script to capture build timestamp for `sysdash --version`

fn main() {
    let build_time = chrono::Local::now().format("%Y-%m-%d %H:%M:%S %Z").to_string();
    println!("cargo:rustc-env=BUILD_TIMESTAMP={}", build_time);

    // Note: Not using rerun-if-changed means this script runs on every build,
    // ensuring BUILD_TIMESTAMP is always current
}
