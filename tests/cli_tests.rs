use std::fs;
use std::process::Command;

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

fn write_png(path: &std::path::Path, width: u32, height: u32) {
    let img = DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 251) as u8, (y % 241) as u8, 128, 255])
    }));
    img.save_with_format(path, ImageFormat::Png).unwrap();
}

#[test]
fn once_flag_processes_corpus_and_exits() {
    let exe = env!("CARGO_BIN_EXE_mottle");
    let dir = tempfile::tempdir().unwrap();
    write_png(&dir.path().join("a.png"), 100, 100);

    let output = Command::new(exe)
        .args([
            "--once",
            "--json",
            "--path",
            dir.path().to_str().unwrap(),
            "--times",
            "2",
            "--target-kb",
            "0",
        ])
        .output()
        .expect("run failed");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("a.png"));
    assert!(stdout.contains("original"));
    assert!(dir.path().join("modified").join("a.png").exists());
}

#[test]
fn missing_root_fails_with_walk_error() {
    let exe = env!("CARGO_BIN_EXE_mottle");
    let output = Command::new(exe)
        .args([
            "--once",
            "--path",
            "/nonexistent/corpus",
            "--times",
            "1",
        ])
        .output()
        .expect("run failed");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("walk error"));
}

#[test]
fn modified_outputs_are_not_reprocessed_on_second_pass() {
    let exe = env!("CARGO_BIN_EXE_mottle");
    let dir = tempfile::tempdir().unwrap();
    write_png(&dir.path().join("a.png"), 100, 100);

    for _ in 0..2 {
        let output = Command::new(exe)
            .args([
                "--once",
                "--json",
                "--path",
                dir.path().to_str().unwrap(),
                "--times",
                "1",
                "--target-kb",
                "0",
            ])
            .output()
            .expect("run failed");
        assert!(output.status.success());
    }

    // The output folder holds exactly the one result; no modified/modified.
    let out_dir = dir.path().join("modified");
    let entries: Vec<_> = fs::read_dir(&out_dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name())
        .collect();
    assert_eq!(entries, vec![std::ffi::OsString::from("a.png")]);
}
