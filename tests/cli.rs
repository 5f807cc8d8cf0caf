//! End-to-end tests for the `fp` binary

mod common;

use common::{assert_distinct, ipv6_available};
use std::process::{Command, Output};

fn fp(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_fp"))
        .args(args)
        .output()
        .expect("Failed to run fp")
}

fn stdout_ports(output: &Output) -> Vec<u16> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(|line| line.parse().expect("stdout line is not a port"))
        .collect()
}

/// No arguments prints a single port
#[test]
fn test_default_prints_one_port() {
    let output = fp(&[]);
    assert!(output.status.success(), "fp failed: {output:?}");
    assert_distinct(&stdout_ports(&output), 1);
}

/// `-n 10` prints ten distinct ports, one per line
#[test]
fn test_ten_ports() {
    let output = fp(&["-n", "10"]);
    assert!(output.status.success(), "fp failed: {output:?}");
    assert_distinct(&stdout_ports(&output), 10);
}

/// `-n 5 -r 10000:10050` prints five ports inside the range
#[test]
fn test_ranged_ports() {
    let output = fp(&["-n", "5", "-r", "10000:10050"]);
    assert!(output.status.success(), "fp failed: {output:?}");

    let ports = stdout_ports(&output);
    assert_distinct(&ports, 5);
    assert!(ports.iter().all(|&p| (10000..=10050).contains(&p)));
}

/// `-n 200 -r 8000:8010` fails without printing any port
#[test]
fn test_count_above_range_size() {
    let output = fp(&["-n", "200", "-r", "8000:8010"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("requested 200 ports but range only has 11"),
        "unexpected stderr: {stderr}"
    );
}

/// Out-of-bounds counts and malformed ranges are rejected
#[test]
fn test_invalid_arguments() {
    for args in [
        &["-n", "0"][..],
        &["-n", "1025"][..],
        &["-r", "9000:8000"][..],
        &["-r", "0:10"][..],
        &["-r", "1:70000"][..],
        &["-r", "8000"][..],
    ] {
        let output = fp(args);
        assert!(!output.status.success(), "{args:?} should fail");
        assert!(output.stdout.is_empty(), "{args:?} printed to stdout");
    }
}

/// `-u -6 -n 3` prints three UDP ports from the IPv6 loopback
#[test]
fn test_udp_ipv6() {
    if !ipv6_available() {
        eprintln!("Skipping: no IPv6 loopback");
        return;
    }

    let output = fp(&["-u", "-6", "-n", "3"]);
    assert!(output.status.success(), "fp failed: {output:?}");
    assert_distinct(&stdout_ports(&output), 3);
}

/// `-v` prints the crate version
#[test]
fn test_version_flag() {
    let output = fp(&["-v"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")), "unexpected: {stdout}");
}

/// `-h` shows usage
#[test]
fn test_help_flag() {
    let output = fp(&["-h"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage"));
    assert!(stdout.contains("MIN:MAX"));
}
