use assert_cmd::Command;
use predicates::prelude::*;
use std::error::Error;
use std::fs::{self, File};
use std::path::Path;
use tempfile::tempdir;

/// A command with no user config and no inherited overrides.
fn mp3split(config_dir: &Path) -> Result<Command, Box<dyn Error>> {
    let mut cmd = Command::cargo_bin("mp3split")?;
    cmd.env("MP3SPLIT_CONFIG_PATH", config_dir.join("missing.toml"))
        .env("RUST_LOG", "error");
    Ok(cmd)
}

#[test]
fn cli_rejects_missing_input() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let missing = dir.path().join("nope.mp3");

    mp3split(dir.path())?
        .args(["--artist", "A", "--album", "B"])
        .arg(&missing)
        .assert()
        .failure()
        .stderr(predicate::str::contains("input does not exist"));
    Ok(())
}

#[test]
fn cli_rejects_out_of_range_track_count() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;

    mp3split(dir.path())?
        .args(["--tracks", "51", "a.mp3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--tracks"));
    Ok(())
}

#[test]
fn cli_requires_inputs_or_manifest() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;

    mp3split(dir.path())?.assert().failure();
    Ok(())
}

#[test]
fn cli_reports_missing_ffprobe() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let input = dir.path().join("song.mp3");
    fs::write(&input, b"not really audio")?;

    mp3split(dir.path())?
        .env("MP3SPLIT__TOOLS__FFPROBE", dir.path().join("no-such-ffprobe"))
        .args(["--artist", "A", "--album", "B"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("was not found"));
    Ok(())
}

#[cfg(unix)]
mod scripted {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use std::path::PathBuf;
    use zip::ZipArchive;

    const FAKE_FFPROBE: &str = r#"#!/bin/sh
case "$1" in -version) echo "ffprobe version fake"; exit 0;; esac
echo 95.4
"#;

    const FAKE_FFMPEG: &str = r#"#!/bin/sh
case "$1" in -version) echo "ffmpeg version fake"; exit 0;; esac
case "$*" in *"title=02 - "*) echo "boom" >&2; exit 1;; esac
for arg in "$@"; do out="$arg"; done
printf 'fake mp3' > "$out"
"#;

    fn script(dir: &Path, name: &str, body: &str) -> Result<PathBuf, Box<dyn Error>> {
        let path = dir.join(name);
        fs::write(&path, body)?;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))?;
        Ok(path)
    }

    /// Inputs plus fake tools; track 02 of every file fails to extract.
    fn setup() -> Result<(tempfile::TempDir, Command), Box<dyn Error>> {
        let dir = tempdir()?;
        let ffprobe = script(dir.path(), "ffprobe", FAKE_FFPROBE)?;
        let ffmpeg = script(dir.path(), "ffmpeg", FAKE_FFMPEG)?;
        fs::write(dir.path().join("song.mp3"), b"not really audio")?;

        let mut cmd = mp3split(dir.path())?;
        cmd.env("MP3SPLIT__TOOLS__FFPROBE", ffprobe)
            .env("MP3SPLIT__TOOLS__FFMPEG", ffmpeg);
        Ok((dir, cmd))
    }

    fn entries(path: &Path) -> Result<Vec<String>, Box<dyn Error>> {
        let archive = ZipArchive::new(File::open(path)?)?;
        let mut names: Vec<String> = archive.file_names().map(str::to_string).collect();
        names.sort();
        Ok(names)
    }

    #[test]
    fn cli_archives_tracks_and_reports_failures() -> Result<(), Box<dyn Error>> {
        let (dir, mut cmd) = setup()?;
        let out = dir.path().join("out");
        fs::create_dir(&out)?;

        cmd.args(["--artist", "Someone", "--album", "Live", "--tracks", "3", "--output"])
            .arg(&out)
            .arg(dir.path().join("song.mp3"))
            .assert()
            .success()
            .stdout(predicate::str::contains("song.mp3: 2 of 3 track(s) written"))
            .stdout(predicate::str::contains("failed 02 - song.mp3"));

        assert_eq!(
            entries(&out.join("split_tracks.zip"))?,
            vec!["01 - song.mp3", "03 - song.mp3"]
        );
        Ok(())
    }

    #[test]
    fn cli_strict_fails_when_a_track_fails() -> Result<(), Box<dyn Error>> {
        let (dir, mut cmd) = setup()?;

        cmd.args(["-a", "Someone", "-b", "Live", "-n", "2", "--strict", "--output"])
            .arg(dir.path())
            .arg(dir.path().join("song.mp3"))
            .assert()
            .failure();

        assert!(dir.path().join("split_tracks.zip").exists());
        Ok(())
    }

    #[test]
    fn cli_dry_run_prints_plan_without_writing() -> Result<(), Box<dyn Error>> {
        let (dir, mut cmd) = setup()?;

        cmd.args(["-a", "Someone", "-b", "Live", "-n", "2", "--dry-run", "--output"])
            .arg(dir.path())
            .arg(dir.path().join("song.mp3"))
            .assert()
            .success()
            .stdout(predicate::str::contains("Dry run: would write 2 track(s)"))
            .stdout(predicate::str::contains("song.mp3 (95.4s, 2 x 47s, last 1.4s dropped)"))
            .stdout(predicate::str::contains("  02 - song.mp3  [47s-94s]"));

        assert!(!dir.path().join("split_tracks.zip").exists());
        Ok(())
    }

    #[test]
    fn cli_refuses_to_overwrite_archive() -> Result<(), Box<dyn Error>> {
        let (dir, mut cmd) = setup()?;
        fs::write(dir.path().join("split_tracks.zip"), b"existing")?;

        cmd.args(["-a", "Someone", "-b", "Live", "-n", "1", "--output"])
            .arg(dir.path())
            .arg(dir.path().join("song.mp3"))
            .assert()
            .failure()
            .stderr(predicate::str::contains("split_tracks.zip"));

        assert_eq!(fs::read(dir.path().join("split_tracks.zip"))?, b"existing");
        Ok(())
    }

    #[test]
    fn cli_skips_file_with_blank_artist() -> Result<(), Box<dyn Error>> {
        let (dir, mut cmd) = setup()?;

        cmd.args(["--album", "Live", "-n", "1", "--output"])
            .arg(dir.path())
            .arg(dir.path().join("song.mp3"))
            .assert()
            .success()
            .stdout(predicate::str::contains("song.mp3: skipped (artist is blank)"))
            .stdout(predicate::str::contains("(0 track(s))"));
        Ok(())
    }
}
