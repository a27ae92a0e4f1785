// Stamp the build time into BUILD_DATE for `edmkit::BUILD_DATE` and the
// demo's startup log line.
fn main() {
    let stamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
    println!("cargo:rustc-env=BUILD_DATE={}", stamp);
}
