use std::process::Command;

#[test]
fn cli_compiles_without_warnings() {
    let status = Command::new(env!("CARGO"))
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .args(["check", "--quiet", "--bin", "chamber-crawl"])
        .status()
        .expect("failed to invoke cargo check for chamber-crawl CLI binary");

    assert!(status.success(), "cargo check --bin chamber-crawl should succeed");
}

#[test]
fn cli_rejects_requests_below_the_floor() {
    let output = Command::new(env!("CARGO"))
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .args([
            "run",
            "--quiet",
            "--bin",
            "chamber-crawl",
            "--",
            "--chambers",
            "3",
            "--seed",
            "1",
        ])
        .output()
        .expect("failed to invoke cargo run for chamber-crawl CLI binary");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("at least 5"), "unexpected stderr: {stderr}");
}
