//! Frame header tests.
//!
//! Verifies destination and source extraction, runt classification, group
//! address detection, and MAC formatting.

use bridgesim_core::bridge::frame::{
    BROADCAST, Frame, MIN_FRAME_OCTETS, format_mac, is_group,
};
use pretty_assertions::assert_eq;

use crate::common::{frame, mac};

#[test]
fn header_fields_are_extracted() {
    let dst = mac(0x22);
    let src = mac(0x11);
    let octets = frame(&dst, &src, 4);
    let parsed = Frame::new(octets.clone());

    assert_eq!(parsed.len(), 18);
    assert_eq!(parsed.dst(), Some(dst));
    assert_eq!(parsed.src(), Some(src));
    assert_eq!(parsed.octets(), &octets[..]);
}

#[test]
fn minimum_frame_is_header_only() {
    assert_eq!(MIN_FRAME_OCTETS, 14);
    let parsed = Frame::new(frame(&mac(1), &mac(2), 0));
    assert_eq!(parsed.len(), 14);
    assert!(!parsed.is_runt());
}

#[test]
fn short_frame_is_runt() {
    let parsed = Frame::new(vec![0xAA; 13]);
    assert!(parsed.is_runt());
    assert!(Frame::new(Vec::new()).is_runt());
    assert!(Frame::new(Vec::new()).is_empty());
}

#[test]
fn truncated_header_yields_no_addresses() {
    let parsed = Frame::new(vec![0xAA; 5]);
    assert_eq!(parsed.dst(), None);
    assert_eq!(parsed.src(), None);

    let parsed = Frame::new(vec![0xAA; 8]);
    assert_eq!(parsed.dst(), Some([0xAA; 6]));
    assert_eq!(parsed.src(), None);
}

#[test]
fn broadcast_and_multicast_are_group_addresses() {
    assert!(is_group(&BROADCAST));
    assert!(is_group(&[0x01, 0x00, 0x5E, 0x00, 0x00, 0x01]));
    assert!(is_group(&[0x33, 0x33, 0x00, 0x00, 0x00, 0x01]));
}

#[test]
fn unicast_addresses_are_not_group() {
    assert!(!is_group(&mac(0x01)));
    assert!(!is_group(&[0x00, 0x1B, 0x21, 0x3A, 0x4C, 0x5D]));
    // Only bit 0 of the first octet matters, not the rest of the address.
    assert!(!is_group(&[0xFE, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]));
}

#[test]
fn mac_formatting_is_lower_hex_colon_separated() {
    assert_eq!(format_mac(&BROADCAST), "ff:ff:ff:ff:ff:ff");
    assert_eq!(
        format_mac(&[0x00, 0x1B, 0x21, 0x3A, 0x4C, 0x5D]),
        "00:1b:21:3a:4c:5d"
    );
    assert_eq!(format_mac(&mac(7)), "02:00:00:00:00:07");
}

#[test]
fn into_octets_returns_wire_order() {
    let octets = frame(&mac(1), &mac(2), 2);
    let parsed = Frame::new(octets.clone());
    assert_eq!(parsed.into_octets(), octets);
}
