//! Device Operation Tests
//!
//! Each convenience operation is a formatter plus a reply parser; these
//! tests pin both sides against a scripted loopback device.

mod common;

use common::ScriptedDevice;
use netio::{Config, Device, NetioError, PortState};

/// Login reply followed by the given command replies
fn with_auth(replies: &[&str]) -> ScriptedDevice {
    let mut all = vec!["250 OK"];
    all.extend_from_slice(replies);
    ScriptedDevice::with_replies(&all)
}

// =============================================================================
// System Query Tests
// =============================================================================

#[test]
fn test_version() {
    let device = with_auth(&["250 2.33 (1.0.4)"]);
    let mut dev = Device::new(device.config()).unwrap();
    assert_eq!(dev.version().unwrap().as_deref(), Some("2.33 (1.0.4)"));
    drop(dev);
    assert_eq!(device.join().last().map(String::as_str), Some("version"));
}

#[test]
fn test_uptime_and_mac_and_time() {
    let device = with_auth(&[
        "250 12 days",
        "250 00:11:22:33:44:55",
        "250 2015/09/01,12:00:00",
    ]);
    let mut dev = Device::new(device.config()).unwrap();
    assert_eq!(dev.uptime().unwrap().as_deref(), Some("12 days"));
    assert_eq!(dev.mac().unwrap().as_deref(), Some("00:11:22:33:44:55"));
    assert_eq!(dev.time().unwrap().as_deref(), Some("2015/09/01,12:00:00"));
    drop(dev);
    let received = device.join();
    assert_eq!(&received[1..], ["uptime", "system mac", "system time"]);
}

#[test]
fn test_web_port_parses_number() {
    let device = with_auth(&["250 80"]);
    let mut dev = Device::new(device.config()).unwrap();
    assert_eq!(dev.web_port().unwrap(), Some(80));
    drop(dev);
    device.join();
}

#[test]
fn test_web_port_non_numeric_is_absent() {
    let device = with_auth(&["250 not-a-number"]);
    let mut dev = Device::new(device.config()).unwrap();
    assert_eq!(dev.web_port().unwrap(), None);
    drop(dev);
    device.join();
}

#[test]
fn test_kshell_port() {
    let device = with_auth(&["250 1234"]);
    let mut dev = Device::new(device.config()).unwrap();
    assert_eq!(dev.kshell_port().unwrap(), Some(1234));
    drop(dev);
    device.join();
}

#[test]
fn test_malformed_reply_is_absent_not_an_error() {
    let device = with_auth(&["garbage"]);
    let mut dev = Device::new(device.config()).unwrap();
    assert_eq!(dev.version().unwrap(), None);
    drop(dev);
    device.join();
}

// =============================================================================
// Alias Tests
// =============================================================================

#[test]
fn test_alias_strips_quotes() {
    let device = with_auth(&["250 \"power strip\""]);
    let mut dev = Device::new(device.config()).unwrap();
    assert_eq!(dev.alias().unwrap().as_deref(), Some("power strip"));
    drop(dev);
    device.join();
}

#[test]
fn test_set_alias() {
    let device = with_auth(&["250 OK"]);
    let mut dev = Device::new(device.config()).unwrap();
    assert!(dev.set_alias("rack-42").unwrap());
    drop(dev);
    assert_eq!(
        device.join().last().map(String::as_str),
        Some("alias rack-42")
    );
}

#[test]
fn test_set_alias_empty_is_rejected_before_io() {
    // Host never resolves; the argument check must fire first
    let config = Config::builder().host("hostname").port(1234).build();
    let mut dev = Device::new(config).unwrap();
    assert!(matches!(
        dev.set_alias(""),
        Err(NetioError::InvalidArgument(_))
    ));
}

// =============================================================================
// Outlet Tests
// =============================================================================

#[test]
fn test_port_state_on_and_off() {
    let device = with_auth(&["250 1", "250 0"]);
    let mut dev = Device::new(device.config()).unwrap();
    assert_eq!(dev.port_state(1).unwrap(), Some(PortState::On));
    assert_eq!(dev.port_state(2).unwrap(), Some(PortState::Off));
    drop(dev);
    let received = device.join();
    assert_eq!(&received[1..], ["port 1", "port 2"]);
}

#[test]
fn test_is_port_on() {
    let device = with_auth(&["250 1", "250 0"]);
    let mut dev = Device::new(device.config()).unwrap();
    assert!(dev.is_port_on(1).unwrap());
    assert!(dev.is_port_off(1).unwrap());
    drop(dev);
    device.join();
}

#[test]
fn test_set_port_on_and_off() {
    let device = with_auth(&["250 OK", "250 OK"]);
    let mut dev = Device::new(device.config()).unwrap();
    assert!(dev.set_port_on(1).unwrap());
    assert!(dev.set_port_off(4).unwrap());
    drop(dev);
    let received = device.join();
    assert_eq!(&received[1..], ["port 1 1", "port 4 0"]);
}

#[test]
fn test_toggle_reads_then_flips() {
    let device = with_auth(&["250 1", "250 OK"]);
    let mut dev = Device::new(device.config()).unwrap();
    assert!(dev.toggle_port(2).unwrap());
    drop(dev);
    let received = device.join();
    assert_eq!(&received[1..], ["port 2", "port 2 0"]);
}

#[test]
fn test_set_port_manual() {
    let device = with_auth(&["250 OK"]);
    let mut dev = Device::new(device.config()).unwrap();
    assert!(dev.set_port_manual(3).unwrap());
    drop(dev);
    assert_eq!(
        device.join().last().map(String::as_str),
        Some("port 3 manual")
    );
}

#[test]
fn test_port_name_quoted() {
    let device = with_auth(&["250 \"output 1\" manual mab 0"]);
    let mut dev = Device::new(device.config()).unwrap();
    assert_eq!(dev.port_name(1).unwrap().as_deref(), Some("output 1"));
    drop(dev);
    assert_eq!(
        device.join().last().map(String::as_str),
        Some("port setup 1")
    );
}

#[test]
fn test_port_name_unquoted() {
    let device = with_auth(&["250 server manual mab 0"]);
    let mut dev = Device::new(device.config()).unwrap();
    assert_eq!(dev.port_name(1).unwrap().as_deref(), Some("server"));
    drop(dev);
    device.join();
}

#[test]
fn test_port_name_repeated_queries() {
    let device = with_auth(&[
        "250 \"output 1\" manual mab 0",
        "250 lamp manual mab 0",
    ]);
    let mut dev = Device::new(device.config()).unwrap();
    assert_eq!(dev.port_name(1).unwrap().as_deref(), Some("output 1"));
    assert_eq!(dev.port_name(2).unwrap().as_deref(), Some("lamp"));
    drop(dev);
    device.join();
}

#[test]
fn test_port_name_without_setup_shape_is_absent() {
    let device = with_auth(&["250 OK"]);
    let mut dev = Device::new(device.config()).unwrap();
    assert_eq!(dev.port_name(1).unwrap(), None);
    drop(dev);
    device.join();
}

#[test]
fn test_set_ports_writes_exact_line() {
    let device = with_auth(&["250 OK"]);
    let mut dev = Device::new(device.config()).unwrap();
    assert!(dev.set_ports("01iu").unwrap());
    drop(dev);
    assert_eq!(
        device.join().last().map(String::as_str),
        Some("port list 01iu")
    );
}

#[test]
fn test_set_ports_invalid_rejected_before_io() {
    let config = Config::builder().host("hostname").port(1234).build();
    let mut dev = Device::new(config).unwrap();
    for states in ["0101x", "011", "01iuu", ""] {
        assert!(matches!(
            dev.set_ports(states),
            Err(NetioError::InvalidArgument(_))
        ));
    }
}

#[test]
fn test_invalid_port_number_rejected_before_io() {
    let config = Config::builder().host("hostname").port(1234).build();
    let mut dev = Device::new(config).unwrap();
    for port in [0, 5, 255] {
        assert!(matches!(
            dev.port_state(port),
            Err(NetioError::InvalidArgument(_))
        ));
        assert!(matches!(
            dev.set_port_on(port),
            Err(NetioError::InvalidArgument(_))
        ));
    }
}

// =============================================================================
// Maintenance Tests
// =============================================================================

#[test]
fn test_noop_keeps_state() {
    let device = with_auth(&["250 OK", "250 OK"]);
    let mut dev = Device::new(device.config()).unwrap();
    dev.noop().unwrap();
    dev.noop().unwrap();
    assert!(dev.session().is_authorized());
    drop(dev);
    let received = device.join();
    assert_eq!(&received[1..], ["noop", "noop"]);
}

#[test]
fn test_reboot_acknowledged_by_rebooting_code() {
    let device = with_auth(&["120 Rebooting..."]);
    let mut dev = Device::new(device.config()).unwrap();
    assert!(dev.reboot().unwrap());
    drop(dev);
    device.join();
}

#[test]
fn test_reboot_not_acknowledged_by_ok() {
    let device = with_auth(&["250 OK"]);
    let mut dev = Device::new(device.config()).unwrap();
    assert!(!dev.reboot().unwrap());
    drop(dev);
    device.join();
}
