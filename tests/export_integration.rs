use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_dir(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!(
        "asdoc_json_it_{}_{}_{}",
        std::process::id(),
        nanos,
        name
    ))
}

fn write_file(path: &Path, content: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}

fn read_json(path: &Path) -> anyhow::Result<Value> {
    Ok(serde_json::from_str(&std::fs::read_to_string(path)?)?)
}

fn run(args: &[&str]) -> anyhow::Result<Output> {
    let bin = env!("CARGO_BIN_EXE_asdoc-json");
    Ok(Command::new(bin)
        .args(args)
        .env("ASDOC_JSON_LOG", "warn")
        .output()?)
}

fn run_json(args: &[&str]) -> anyhow::Result<Value> {
    let out = run(args)?;
    if !out.status.success() {
        return Err(anyhow::anyhow!(
            "command failed: status={:?}, stderr={}",
            out.status.code(),
            String::from_utf8_lossy(&out.stderr)
        ));
    }
    Ok(serde_json::from_slice(&out.stdout)?)
}

const LISTING: &str = r#"<html><body><table>
<tr><td><a href="org/bytearray/display/ScaleBitmap.html" title="org.bytearray.display.ScaleBitmap">ScaleBitmap</a></td></tr>
<tr><td><a href="com/example/Widget.html" title="com.example.Widget">Widget</a></td></tr>
<tr><td><a href="com/example/Untitled.html">Untitled</a></td></tr>
</table></body></html>"#;

const SCALE_BITMAP: &str = r##"<html><body>
<table class="classHeaderTable">
  <tr><td class="classHeaderTableLabel">Package</td><td>org.bytearray.display</td></tr>
  <tr><td class="classHeaderTableLabel">Class</td><td>public class ScaleBitmap</td></tr>
  <tr><td class="classHeaderTableLabel">Inheritance</td><td class="inheritanceList">ScaleBitmap &gt; Bitmap &gt; Object</td></tr>
</table>
<table id="summaryTableProperty">
  <tr><th>Property</th></tr>
  <tr><td class="summaryTableSignatureCol"><a href="#speed" class="signatureLink">speed</a> : Number<div class="summaryTableDescription">[read-only] How fast.</div></td></tr>
  <tr><td class="summaryTableSignatureCol"><a href="#frames" class="signatureLink">frames</a> : Vector.&lt;BitmapData&gt;[]<div class="summaryTableDescription">[override] [write-only] </div></td></tr>
</table>
<table id="summaryTableMethod">
  <tr><th>Method</th></tr>
  <tr><td class="summaryTableSignatureCol"><div class="summarySignature"><a href="#doThing()" class="signatureLink">doThing</a>(a:String, b:int):Boolean</div><div class="summaryTableDescription">Does it.</div></td></tr>
</table>
</body></html>"##;

const WIDGET: &str = r#"<html><body>
<table class="classHeaderTable">
  <tr><td class="classHeaderTableLabel">Package</td><td>com.example</td></tr>
  <tr><td class="classHeaderTableLabel">Class</td><td>public class Widget</td></tr>
</table>
</body></html>"#;

fn write_docs(input: &Path) -> anyhow::Result<()> {
    write_file(&input.join("all-classes.html"), LISTING)?;
    write_file(
        &input.join("org/bytearray/display/ScaleBitmap.html"),
        SCALE_BITMAP,
    )?;
    write_file(&input.join("com/example/Widget.html"), WIDGET)?;
    write_file(&input.join("com/example/Untitled.html"), WIDGET)?;
    Ok(())
}

#[test]
fn export_writes_records_and_content_tree() -> anyhow::Result<()> {
    let base = temp_dir("export");
    let input = base.join("asdoc");
    let output = base.join("json");
    write_docs(&input)?;

    let summary = run_json(&[
        input.to_string_lossy().as_ref(),
        output.to_string_lossy().as_ref(),
    ])?;
    assert_eq!(summary["references"], 2);
    assert_eq!(summary["written"], 2);
    assert_eq!(summary["skipped"], serde_json::json!([]));

    let tree = read_json(&output.join("contentTree.json"))?;
    assert_eq!(
        tree,
        serde_json::json!({
            "com.example": { "Widget": "com/example/Widget.json" },
            "org.bytearray.display": { "ScaleBitmap": "org/bytearray/display/ScaleBitmap.json" }
        })
    );

    let record = read_json(&output.join("org/bytearray/display/ScaleBitmap.json"))?;
    assert_eq!(record["name"], "ScaleBitmap");
    assert_eq!(record["package"], "org.bytearray.display");
    assert_eq!(record["inheritance"], serde_json::json!(["Bitmap", "Object"]));
    assert_eq!(record["properties"][0]["type"], "Number");
    assert_eq!(
        record["properties"][0]["modifiers"],
        serde_json::json!(["read-only"])
    );
    assert_eq!(record["properties"][0]["asdoc"], "[read-only] How fast.");
    assert_eq!(record["properties"][1]["name"], "frames");
    assert_eq!(record["properties"][1]["type"], "Vector.<BitmapData>");
    assert_eq!(
        record["properties"][1]["modifiers"],
        serde_json::json!(["override", "write-only"])
    );
    assert_eq!(record["properties"][1]["asdoc"], "[override] [write-only]");
    assert_eq!(record["methods"][0]["returnType"], "Boolean");
    assert_eq!(
        record["methods"][0]["params"],
        serde_json::json!([
            { "name": "a", "type": "String" },
            { "name": "b", "type": "int" }
        ])
    );

    let widget = read_json(&output.join("com/example/Widget.json"))?;
    assert_eq!(widget["properties"], serde_json::json!([]));
    assert_eq!(widget["methods"], serde_json::json!([]));

    let _ = std::fs::remove_dir_all(base);
    Ok(())
}

#[test]
fn export_skips_missing_and_unparseable_pages() -> anyhow::Result<()> {
    let base = temp_dir("skips");
    let input = base.join("asdoc");
    let output = base.join("json");
    write_docs(&input)?;
    std::fs::remove_file(input.join("com/example/Widget.html"))?;
    write_file(
        &input.join("org/bytearray/display/ScaleBitmap.html"),
        "<html><body><p>not a class page</p></body></html>",
    )?;

    let summary = run_json(&[
        input.to_string_lossy().as_ref(),
        output.to_string_lossy().as_ref(),
    ])?;
    assert_eq!(summary["written"], 0);
    assert_eq!(
        summary["skipped"],
        serde_json::json!([
            { "href": "org/bytearray/display/ScaleBitmap.html", "reason": "unparsed" },
            { "href": "com/example/Widget.html", "reason": "missing" }
        ])
    );
    assert_eq!(read_json(&output.join("contentTree.json"))?, serde_json::json!({}));

    let _ = std::fs::remove_dir_all(base);
    Ok(())
}

#[test]
fn non_empty_output_requires_clean() -> anyhow::Result<()> {
    let base = temp_dir("clean");
    let input = base.join("asdoc");
    let output = base.join("json");
    write_docs(&input)?;
    write_file(&output.join("stale/Old.json"), "{}")?;

    let refused = run(&[
        input.to_string_lossy().as_ref(),
        output.to_string_lossy().as_ref(),
    ])?;
    assert!(!refused.status.success());
    assert!(String::from_utf8_lossy(&refused.stderr).contains("--clean"));
    assert!(output.join("stale/Old.json").exists());

    let summary = run_json(&[
        input.to_string_lossy().as_ref(),
        output.to_string_lossy().as_ref(),
        "--clean",
        "--jobs",
        "2",
    ])?;
    assert_eq!(summary["written"], 2);
    assert!(!output.join("stale").exists());

    let _ = std::fs::remove_dir_all(base);
    Ok(())
}

#[test]
fn missing_listing_is_fatal() -> anyhow::Result<()> {
    let base = temp_dir("no_listing");
    let input = base.join("asdoc");
    std::fs::create_dir_all(&input)?;

    let out = run(&[
        input.to_string_lossy().as_ref(),
        base.join("json").to_string_lossy().as_ref(),
    ])?;
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("all-classes.html"));
    assert!(out.stdout.is_empty());

    let _ = std::fs::remove_dir_all(base);
    Ok(())
}

#[test]
fn export_is_repeatable() -> anyhow::Result<()> {
    let base = temp_dir("repeat");
    let input = base.join("asdoc");
    write_docs(&input)?;

    let first = base.join("first");
    let second = base.join("second");
    run_json(&[input.to_string_lossy().as_ref(), first.to_string_lossy().as_ref()])?;
    run_json(&[input.to_string_lossy().as_ref(), second.to_string_lossy().as_ref()])?;

    for rel in [
        "org/bytearray/display/ScaleBitmap.json",
        "com/example/Widget.json",
        "contentTree.json",
    ] {
        assert_eq!(
            std::fs::read(first.join(rel))?,
            std::fs::read(second.join(rel))?,
            "{rel} differs between runs"
        );
    }

    let _ = std::fs::remove_dir_all(base);
    Ok(())
}
