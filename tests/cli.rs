use std::process::{Command, Output};

fn qiraster(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_qiraster"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run qiraster")
}

#[test]
fn test_default_svg_on_stdout() {
    let out = qiraster(&["-v", "1", "HELLO WORLD"]);
    assert!(out.status.success());
    let svg = String::from_utf8(out.stdout).unwrap();
    assert!(svg.starts_with("<svg width=\"145\" height=\"145\" xmlns=\"http://www.w3.org/2000/svg\">\n"));
    assert!(svg.ends_with("</svg>\n"));
    assert!(out.stderr.is_empty());
}

#[test]
fn test_png_output() {
    let out = qiraster(&["-f", "png", "-e", "high", "-s", "2", "-p", "1", "HELLO"]);
    assert!(out.status.success());
    let img = image::load_from_memory(&out.stdout).unwrap().to_luma8();
    // version 1 at level H holds up to 10 alphanumeric characters
    assert_eq!(img.dimensions(), (46, 46));
}

#[test]
fn test_bad_level_exits_one() {
    let out = qiraster(&["-e", "extreme", "text"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert_eq!(stderr.lines().count(), 1);
    assert!(stderr.starts_with("qiraster: "));
}

#[test]
fn test_version_out_of_range_exits_one() {
    let out = qiraster(&["-v", "41", "text"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
}

#[test]
fn test_missing_text_exits_one() {
    let out = qiraster(&[]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert_eq!(stderr.lines().count(), 1);
    assert!(stderr.contains("TEXT"), "stderr: {}", stderr);
}

#[test]
fn test_capacity_failure_exits_one() {
    let text = "x".repeat(100);
    let out = qiraster(&["-v", "1", &text]);
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.starts_with("qiraster: Unable to generate QR code"));
}

#[test]
fn test_zero_scale_exits_one() {
    let out = qiraster(&["-s", "0", "text"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
}
