use assert_cmd::Command;

mod common;
use common::write_frames;

#[test]
fn runs() {
    let mut cmd = Command::cargo_bin("croppan").unwrap();
    cmd.assert().success();
}

#[test]
fn outputs_tool_name() {
    let mut cmd = Command::cargo_bin("croppan").unwrap();
    cmd.arg("-V");
    cmd.assert().success().stdout("croppan 0.1.0\n");
}

// Expand subcommand tests

#[test]
fn expand_prints_one_line_per_frame() {
    let mut cmd = Command::cargo_bin("croppan").unwrap();
    cmd.args([
        "expand",
        "--pan",
        r#"{"image0": "F0", "crop0": "0,10,200,210", "image1": "F2", "crop1": "2,12,202,212"}"#,
        "F0",
        "F1",
        "F2",
        "F3",
    ]);
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("00000 F0 (0, 10, 200, 210)"))
        .stdout(predicates::str::contains("00001 F1 (1, 11, 201, 211)"))
        .stdout(predicates::str::contains("00003 F3 (2, 12, 202, 212)"));
}

#[test]
fn expand_json_output_format() {
    let mut cmd = Command::cargo_bin("croppan").unwrap();
    cmd.args([
        "expand",
        "--output",
        "json",
        "--pan",
        r#"{"image0": "F0", "crop0": "0,1,2,3", "n": 2}"#,
        "F0",
        "F1",
    ]);
    let output = cmd.assert().success().get_output().stdout.clone();
    let frames: serde_json::Value = serde_json::from_slice(&output).expect("valid json");
    assert_eq!(
        frames,
        serde_json::json!([
            {"image": "F0", "crop": [0, 1, 2, 3]},
            {"image": "F0", "crop": [0, 1, 2, 3]},
            {"image": "F1", "crop": [0, 1, 2, 3]},
        ])
    );
}

#[test]
fn expand_concatenates_pan_sources() {
    let mut cmd = Command::cargo_bin("croppan").unwrap();
    cmd.args([
        "expand",
        "--pan",
        r#"{"image0": "F0", "crop0": "0,0,10,10"}"#,
        "--pan",
        r#"{"image0": "F2", "crop0": "5,5,15,15"}"#,
        "F0",
        "F1",
        "F2",
    ]);
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("00001 F1 (0, 0, 10, 10)"))
        .stdout(predicates::str::contains("00002 F2 (5, 5, 15, 15)"));
}

#[test]
fn expand_without_files_does_nothing() {
    let mut cmd = Command::cargo_bin("croppan").unwrap();
    cmd.args(["expand", "--pan", "not even json"]);
    cmd.assert().success().stdout("");
}

#[test]
fn expand_rejects_bad_crop_spec() {
    let mut cmd = Command::cargo_bin("croppan").unwrap();
    cmd.args(["expand", "--pan", r#"{"image0": "F0", "crop0": "0,RR,7,8"}"#, "F0"]);
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("Invalid crop term"));
}

#[test]
fn expand_rejects_malformed_pan_json() {
    let mut cmd = Command::cargo_bin("croppan").unwrap();
    cmd.args(["expand", "--pan", "nonexistent_file.json", "F0"]);
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("Failed to parse pan JSON"));
}

#[test]
fn expand_without_pans_fails() {
    let mut cmd = Command::cargo_bin("croppan").unwrap();
    cmd.args(["expand", "F0"]);
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("No pan specs given"));
}

// Pan subcommand tests

#[test]
fn pan_writes_cropped_and_resized_frames() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let names = write_frames(temp.path(), 3, 64, 48);
    let out_dir = temp.path().join("out");
    std::fs::create_dir_all(&out_dir).expect("create out dir");

    let pan = serde_json::json!({
        "image0": names[0],
        "crop0": "0,0,S32,S24",
        "image1": names[2],
        "crop1": "R-32,R-24,R0,R0",
    })
    .to_string();

    let mut cmd = Command::cargo_bin("croppan").unwrap();
    cmd.args(["pan", "--pan", pan.as_str(), "--size", "16,12", "--outtype", "png", "--outdir"])
        .arg(&out_dir)
        .args(&names);
    cmd.assert().success();

    for seq in 0..3 {
        let out = out_dir.join(format!("pan-F{seq:03}-{seq:05}.bmp"));
        // Names keep the source extension; sniff the written format instead
        let size = imagesize::size(&out).expect("read rendered frame");
        assert_eq!((size.width, size.height), (16, 12), "frame {seq}");
    }
}

#[test]
fn pan_default_naming_writes_next_to_sources() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let names = write_frames(temp.path(), 2, 20, 20);
    let pan = serde_json::json!({"image0": names[0], "crop0": "2,2,12,12"}).to_string();

    let mut cmd = Command::cargo_bin("croppan").unwrap();
    cmd.args(["pan", "--pan", pan.as_str()]).args(&names);
    cmd.assert().success();

    for seq in 0..2 {
        let out = temp.path().join(format!("pan-F{seq:03}-{seq:05}.bmp"));
        let size = imagesize::size(&out).expect("read rendered frame");
        assert_eq!((size.width, size.height), (10, 10));
    }
}

#[test]
fn pan_rejects_inverted_crop() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let names = write_frames(temp.path(), 1, 20, 20);
    let pan = serde_json::json!({"image0": names[0], "crop0": "10,10,2,2"}).to_string();

    let mut cmd = Command::cargo_bin("croppan").unwrap();
    cmd.args(["pan", "--pan", pan.as_str()]).args(&names);
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("cannot be applied"));
}

#[test]
fn pan_rejects_bad_size() {
    let mut cmd = Command::cargo_bin("croppan").unwrap();
    cmd.args(["pan", "--size", "1,2,3", "F0"]);
    cmd.assert().failure();
}
