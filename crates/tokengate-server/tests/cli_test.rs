//! End-to-end subcommand runs against files on disk.

use std::{fs, path::Path};

use clap::Parser;
use tempfile::TempDir;
use tokengate_harness::{FrameBuilder, http_request};
use tokengate_server::{Cli, ServerError, run};

const GOOD: [u8; 16] = *b"good-token-00001";
const BAD: [u8; 16] = *b"bad-token-000001";

fn write(dir: &TempDir, name: &str, contents: &str) -> String {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path.display().to_string()
}

fn tokens_file(dir: &TempDir) -> String {
    write(dir, "tokens.txt", "# authorized clients\ngood-token-00001\n")
}

fn run_args(args: &[&str]) -> Result<String, ServerError> {
    let cli = Cli::try_parse_from(std::iter::once("tokengate-server").chain(args.iter().copied()))
        .unwrap();
    let mut out = Vec::new();
    run(cli, &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

fn frame_hex(frame: &[u8]) -> String {
    hex::encode(frame)
}

#[test]
fn check_authorized_frame() {
    let dir = TempDir::new().unwrap();
    let tokens = tokens_file(&dir);
    let frame = frame_hex(&FrameBuilder::tcp().payload(http_request(&GOOD)).build());

    let out = run_args(&["check", "--tokens", &tokens, "--frame", &frame]).unwrap();
    insta::assert_snapshot!(out, @"pass (authorized token at payload offset 16)");
}

#[test]
fn check_unauthorized_frame() {
    let dir = TempDir::new().unwrap();
    let tokens = tokens_file(&dir);
    let frame = frame_hex(&FrameBuilder::tcp().payload(http_request(&BAD)).build());

    let out = run_args(&["check", "--tokens", &tokens, "--frame", &frame]).unwrap();
    insta::assert_snapshot!(out, @"drop (unauthorized token at payload offset 16)");
}

#[test]
fn check_non_tcp_frame() {
    let dir = TempDir::new().unwrap();
    let tokens = tokens_file(&dir);
    let frame = frame_hex(&FrameBuilder::tcp().ip_protocol(17).payload(http_request(&BAD)).build());

    let out = run_args(&["check", "--tokens", &tokens, "--frame", &frame]).unwrap();
    insta::assert_snapshot!(out, @"pass (not-tcp)");
}

#[test]
fn check_short_window_misses_token() {
    let dir = TempDir::new().unwrap();
    let tokens = tokens_file(&dir);
    let frame = frame_hex(&FrameBuilder::tcp().payload(http_request(&BAD)).build());

    let out =
        run_args(&["check", "--tokens", &tokens, "--max-scan-len", "40", "--frame", &frame])
            .unwrap();
    insta::assert_snapshot!(out, @"pass (no-authorization-header)");
}

#[test]
fn check_rejects_bad_frame_hex() {
    let dir = TempDir::new().unwrap();
    let tokens = tokens_file(&dir);

    let err = run_args(&["check", "--tokens", &tokens, "--frame", "zz"]).unwrap_err();
    assert!(matches!(err, ServerError::FrameArg(_)));
}

#[test]
fn replay_reports_counters() {
    let dir = TempDir::new().unwrap();
    let tokens = tokens_file(&dir);

    let mut capture = String::from("# captured on eth0\n");
    for frame in [
        FrameBuilder::tcp().payload(http_request(&GOOD)).build(),
        FrameBuilder::tcp().payload(http_request(&BAD)).build(),
        FrameBuilder::tcp().payload(http_request(&BAD)).build(),
        FrameBuilder::tcp().ether_type(0x86DD).build(),
        FrameBuilder::tcp().build(),
        vec![0u8; 10],
    ] {
        capture.push_str(&frame_hex(&frame));
        capture.push('\n');
    }
    let frames = write(&dir, "capture.txt", &capture);

    let out = run_args(&["replay", "--tokens", &tokens, "--frames", &frames, "--workers", "3"])
        .unwrap();
    insta::assert_snapshot!(out, @r"
frames: 6
passed: 4
dropped: 2
authorized: 1
skipped truncated-ethernet: 1
skipped not-ipv4: 1
skipped empty-payload: 1
");
}

#[test]
fn replay_names_bad_frame_line() {
    let dir = TempDir::new().unwrap();
    let tokens = tokens_file(&dir);
    let frames = write(&dir, "capture.txt", "\n# header\nabcd\nnot-hex\n");

    let err = run_args(&["replay", "--tokens", &tokens, "--frames", &frames]).unwrap_err();
    assert!(matches!(err, ServerError::InvalidFrame { line: 4, .. }));
}

#[test]
fn token_file_over_capacity_fails() {
    let dir = TempDir::new().unwrap();
    let tokens = write(&dir, "tokens.txt", "aaaaaaaaaaaaaaaa\nbbbbbbbbbbbbbbbb\n");
    let frame = frame_hex(&FrameBuilder::tcp().build());

    let err = run_args(&["check", "--tokens", &tokens, "--capacity", "1", "--frame", &frame])
        .unwrap_err();
    assert_eq!(err.to_string(), "line 2: authorization table full (1 tokens)");
}

#[test]
fn missing_token_file_fails() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent.txt");
    let frame = frame_hex(&FrameBuilder::tcp().build());

    let err = run_args(&["check", "--tokens", &path_str(&missing), "--frame", &frame])
        .unwrap_err();
    assert!(matches!(err, ServerError::Read { .. }));
}

fn path_str(path: &Path) -> String {
    path.display().to_string()
}
