use assert_cmd::Command;
use predicates::prelude::*;

fn tilebrot() -> Command {
    Command::cargo_bin("tilebrot").unwrap()
}

#[test]
fn renders_a_png() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("image.png");
    tilebrot()
        .args(&["-s", "tiny", "-c", "8", "-i", "200", "-o"])
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("saved:"));
    let bytes = std::fs::read(&out).unwrap();
    assert_eq!(&bytes[1..4], b"PNG");
}

#[test]
fn stamp_writes_a_second_copy() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("image.png");
    tilebrot()
        .args(&["-s", "32x24", "-t", "2x2", "-i", "50", "--stamp", "-o"])
        .arg(&out)
        .assert()
        .success();
    let names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names.len(), 2);
    assert!(names.iter().any(|n| n.starts_with("image_32x24_2x2_")));
}

#[test]
fn explicit_bounds_and_julia() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("julia.png");
    tilebrot()
        .args(&[
            "-s",
            "40x30",
            "-l",
            "-1.5,-1.0",
            "-u",
            "1.5,1.0",
            "-j",
            "-0.8,0.156",
            "--palette",
            "grey",
            "-o",
        ])
        .arg(&out)
        .assert()
        .success();
    assert!(out.exists());
}

#[test]
fn unknown_size_is_rejected() {
    tilebrot()
        .args(&["-s", "enormous"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown image size"));
}

#[test]
fn plane_preset_out_of_range_is_rejected() {
    tilebrot()
        .args(&["-s", "tiny", "-r", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn oversized_tile_grid_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("image.png");
    tilebrot()
        .args(&["-s", "4x4", "-t", "8x8", "-o"])
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not fit"));
    assert!(!out.exists());
}

#[test]
fn inverted_plane_is_rejected() {
    tilebrot()
        .args(&["-s", "tiny", "-l", "1.0,1.0", "-u", "-1.0,-1.0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("degenerate"));
}

#[test]
fn timeout_cancels_the_render() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("image.png");
    tilebrot()
        .args(&["-s", "std", "-i", "5000", "--timeout", "0.001", "-o"])
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("cancelled"));
    assert!(!out.exists());
}
