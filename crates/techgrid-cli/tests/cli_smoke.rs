use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};

fn repo_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("expected crates/<name> layout")
        .to_path_buf()
}

fn fixture() -> PathBuf {
    let fixture = repo_root().join("fixtures").join("layers").join("basic.json");
    assert!(fixture.exists(), "fixture missing: {}", fixture.display());
    fixture
}

fn cli() -> Command {
    Command::new(assert_cmd::cargo_bin!("techgrid-cli"))
}

#[test]
fn cli_renders_svg_to_stdout() {
    let output = cli()
        .args(["render", fixture().to_string_lossy().as_ref()])
        .output()
        .expect("run cli");
    assert!(output.status.success());

    let svg = String::from_utf8(output.stdout).expect("utf-8 svg");
    assert!(svg.starts_with("<?xml version=\"1.0\" standalone=\"no\"?>\r\n<svg "));
    assert!(svg.contains(r#"id="svgfo""#));
    assert!(svg.contains(r##"fill="#e60d0d""##));
    assert!(svg.contains("Drive-by Compromise"));
}

#[test]
fn cli_overrides_label_mode_and_id() {
    let output = cli()
        .args([
            "render",
            "--label-mode",
            "acronym",
            "--id",
            "q3 export",
            fixture().to_string_lossy().as_ref(),
        ])
        .output()
        .expect("run cli");
    assert!(output.status.success());

    let svg = String::from_utf8(output.stdout).expect("utf-8 svg");
    assert!(svg.contains(r#"id="svgq3-export""#));
    assert!(svg.contains(">PH</text>"));
    assert!(!svg.contains("Drive-by Compromise"));
}

#[test]
fn cli_prints_layout_json() {
    let output = cli()
        .args(["layout", fixture().to_string_lossy().as_ref()])
        .output()
        .expect("run cli");
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("layout json");
    assert_eq!(json["name"], "Red Team Coverage (Q3)");
    assert_eq!(json["geometry"]["cell_height"], 194.0);
    assert_eq!(json["geometry"]["columns"].as_array().map(Vec::len), Some(3));
    assert_eq!(json["geometry"]["columns"][0]["category"], "initial-access");
    assert_eq!(json["page"]["width"], 960.0);
}

#[test]
fn cli_reads_layer_from_stdin() {
    let layer = fs::read_to_string(fixture()).expect("read fixture");
    cli()
        .args(["layout", "--width", "11", "--height", "8.5", "--unit", "in", "-"])
        .write_stdin(layer)
        .assert()
        .success();
}

#[test]
fn cli_renders_png_with_default_file_name() {
    let tmp = tempfile::tempdir().expect("tempdir");

    cli()
        .args([
            "render",
            "--format",
            "png",
            "--scale",
            "0.5",
            "--out-dir",
            tmp.path().to_string_lossy().as_ref(),
            fixture().to_string_lossy().as_ref(),
        ])
        .assert()
        .success();

    let bytes = fs::read(tmp.path().join("Red_Team_Coverage_Q3.png")).expect("read png");
    assert!(
        bytes.starts_with(b"\x89PNG\r\n\x1a\n"),
        "output is not a PNG"
    );
    let reader = png::Decoder::new(bytes.as_slice())
        .read_info()
        .expect("png header");
    assert_eq!((reader.info().width, reader.info().height), (480, 360));
}

#[test]
fn cli_writes_pdf_to_explicit_path() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = tmp.path().join("nested").join("matrix.pdf");

    cli()
        .args([
            "render",
            "--format",
            "pdf",
            "--out",
            out.to_string_lossy().as_ref(),
            fixture().to_string_lossy().as_ref(),
        ])
        .assert()
        .success();

    let bytes = fs::read(&out).expect("read pdf");
    assert!(bytes.starts_with(b"%PDF-"), "output is not a PDF");
}

#[test]
fn cli_rejects_bad_flags_with_usage_exit_code() {
    cli().args(["render", "--format", "gif"]).assert().code(2);
    cli().args(["render", "--unit", "furlong"]).assert().code(2);
    cli().args(["--bogus"]).assert().code(2);
}

#[test]
fn cli_reports_malformed_layers() {
    cli()
        .args(["render", "-"])
        .write_stdin("{ not json")
        .assert()
        .code(1);
}
