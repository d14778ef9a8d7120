use anyhow::Result;
use image::{GenericImageView, RgbImage};
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tempfile::tempdir;

const SPLIT_IMAGE: &str = env!("CARGO_BIN_EXE_split-image");

fn split_image(args: &[&str], cwd: &Path) -> Result<Output> {
    Ok(Command::new(SPLIT_IMAGE).args(args).current_dir(cwd).output()?)
}

fn write_test_image(path: &Path) -> Result<()> {
    RgbImage::from_fn(800, 600, |x, _| image::Rgb([(x % 256) as u8, 80, 120])).save(path)?;
    Ok(())
}

#[test]
fn test_no_arguments_prints_usage() -> Result<()> {
    let temp_dir = tempdir()?;
    let output = split_image(&[], temp_dir.path())?;

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage"), "stdout was: {}", stdout);

    Ok(())
}

#[test]
fn test_bad_arguments_exit_with_one() -> Result<()> {
    let temp_dir = tempdir()?;
    write_test_image(&temp_dir.path().join("door.png"))?;

    let bad_invocations: [&[&str]; 4] = [
        &["door.png", "--text-ratio", "0.6"],
        &["door.png", "--text-ratio", "wide"],
        &["door.png", "--quick", "--text-ratio", "0.2"],
        &["door.png", "--interactive", "--quick"],
    ];
    for args in bad_invocations {
        let output = split_image(args, temp_dir.path())?;
        assert_eq!(output.status.code(), Some(1), "{:?}", args);
        assert!(!output.stderr.is_empty(), "{:?} printed no error", args);
    }
    assert!(!temp_dir.path().join("data").exists());

    let help = split_image(&["--help"], temp_dir.path())?;
    assert!(help.status.success());
    assert!(String::from_utf8_lossy(&help.stdout).contains("--text-ratio"));

    Ok(())
}

#[test]
fn test_default_output_dir() -> Result<()> {
    let temp_dir = tempdir()?;
    write_test_image(&temp_dir.path().join("door.png"))?;

    let output = split_image(&["door.png"], temp_dir.path())?;
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Original image size: 800x600"));
    assert!(stdout.contains("Horizontal: 400px"));
    assert!(stdout.contains("Vertical: 420px (door), 180px (text)"));

    let data_dir = temp_dir.path().join("data");
    for name in ["left_door.jpeg", "right_door.jpeg", "left_bottom_text.jpeg", "right_bottom_text.jpeg"] {
        assert!(data_dir.join(name).is_file(), "{} missing", name);
    }

    Ok(())
}

#[test]
fn test_explicit_output_dir_and_quick_preset() -> Result<()> {
    let temp_dir = tempdir()?;
    write_test_image(&temp_dir.path().join("door.png"))?;

    let output = split_image(&["door.png", "invite/parts", "--quick"], temp_dir.path())?;
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let parts_dir = temp_dir.path().join("invite").join("parts");
    assert_eq!(image::open(parts_dir.join("left_door.jpeg"))?.dimensions(), (400, 450));
    assert_eq!(image::open(parts_dir.join("right_bottom_text.jpeg"))?.dimensions(), (400, 150));
    assert!(!temp_dir.path().join("data").exists());

    Ok(())
}

#[test]
fn test_missing_input_exits_non_zero() -> Result<()> {
    let temp_dir = tempdir()?;
    let output = split_image(&["missing.jpg"], temp_dir.path())?;

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("❌ Error"), "stderr was: {}", stderr);
    assert!(stderr.contains("failed to load image"), "stderr was: {}", stderr);
    assert!(!temp_dir.path().join("data").exists());

    Ok(())
}

#[test]
fn test_interactive_cancel_writes_nothing() -> Result<()> {
    let temp_dir = tempdir()?;
    write_test_image(&temp_dir.path().join("door.png"))?;

    let mut child = Command::new(SPLIT_IMAGE)
        .args(["door.png", "--interactive"])
        .current_dir(temp_dir.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(b"0.6\n0.2\nn\n")?;
    let output = child.wait_with_output()?;

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Please enter a value between 0.1 and 0.5"));
    assert!(stdout.contains("Vertical: 480px (door), 120px (text)"));
    assert!(stdout.contains("Split cancelled."));
    assert!(!temp_dir.path().join("data").exists());

    Ok(())
}
