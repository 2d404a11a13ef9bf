mod common;

use std::process::{Command, Output};

use eventtap::error::{EXIT_CONNECTION, EXIT_USAGE};
use eventtap::EventRecord;

use common::{wire, Producer};

fn subscriber(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_subscriber"))
        .args(args)
        .output()
        .expect("failed to run subscriber")
}

#[test]
fn prints_one_line_per_record() {
    let sent = vec![
        EventRecord::new(1.5, 0x1),
        EventRecord::new(12.25, 0xdead_beef_0000_0001),
    ];
    let producer = Producer::spawn(vec![wire(&sent)]);
    let path = producer.path().to_str().unwrap().to_string();

    let out = subscriber(&[&path, "0x00000000000000ff"]);
    assert_eq!(out.status.code(), Some(0), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(
        String::from_utf8(out.stdout).unwrap(),
        "1.5000000000: 0000000000000001\n12.2500000000: deadbeef00000001\n"
    );
    assert_eq!(producer.join(), [0xff, 0, 0, 0, 0, 0, 0, 0]);
}

#[test]
fn default_mask_selects_all_channels() {
    let producer = Producer::spawn(Vec::new());
    let path = producer.path().to_str().unwrap().to_string();

    let out = subscriber(&[&path]);
    assert_eq!(out.status.code(), Some(0));
    assert!(out.stdout.is_empty());
    assert_eq!(producer.join(), [0xff; 8]);
}

#[test]
fn truncated_tail_exits_zero() {
    let mut bytes = wire(&[EventRecord::new(0.5, 2)]);
    bytes.extend_from_slice(&[1, 2, 3]);
    let producer = Producer::spawn(vec![bytes]);
    let path = producer.path().to_str().unwrap().to_string();

    let out = subscriber(&[&path, "3"]);
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(String::from_utf8(out.stdout).unwrap(), "0.5000000000: 0000000000000002\n");
    assert_eq!(producer.join(), [3, 0, 0, 0, 0, 0, 0, 0]);
}

#[test]
fn unreachable_endpoint_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nobody-home");

    let out = subscriber(&[path.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(EXIT_CONNECTION));
    assert!(out.stdout.is_empty());
    assert!(String::from_utf8_lossy(&out.stderr).contains("failed to connect"));
}

#[test]
fn malformed_mask_is_a_usage_error() {
    let out = subscriber(&["./socket", "0xnope"]);
    assert_eq!(out.status.code(), Some(EXIT_USAGE));
    assert!(out.stdout.is_empty());
}
