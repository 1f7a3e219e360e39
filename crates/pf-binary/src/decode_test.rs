use super::*;
use crate::encode::encode_plan;
use pf_core::{Plan, RelationKind};

fn plan_from_text(text: &str) -> Plan {
    pf_parser::resolve(pf_parser::parse(text).unwrap()).unwrap()
}

const FULL_PLAN: &str = r#"
pipelines {
  orders -> keep_large;
  keep_large -> totals;
  totals -> ranked;
  ranked -> root;
}

schema order_schema {
  id i32;
  region string;
  amount fp64;
}

source local_files order_files {
  items = [
    { uri_file: "orders.parquet" start: 0 length: 4096 parquet: {} }
  ]
}

read relation orders {
  base_schema order_schema;
  source order_files;
}

filter relation keep_large {
  filter gt(amount, 100.0_fp64) -> bool;
}

aggregate relation totals {
  grouping region;
  measure {
    measure sum(amount) -> fp64 named total;
  }
}

sort relation ranked {
  sort total by desc;
}
"#;

#[test]
fn test_roundtrip_preserves_plan() {
    let plan = plan_from_text(FULL_PLAN);
    let bytes = encode_plan(&plan).unwrap();
    let decoded = decode_plan(&bytes).unwrap();
    assert_eq!(decoded, plan);
}

#[test]
fn test_roundtrip_preserves_literal_types() {
    let plan = plan_from_text(FULL_PLAN);
    let decoded = decode_plan(&encode_plan(&plan).unwrap()).unwrap();
    let keep_large = decoded
        .relations
        .iter()
        .find(|r| r.name == "keep_large")
        .unwrap();
    match &keep_large.kind {
        RelationKind::Filter { condition, .. } => {
            assert_eq!(condition.to_string(), "gt(amount, 100.0_fp64) -> bool");
        }
        other => panic!("unexpected relation kind {other:?}"),
    }
}

#[test]
fn test_reencode_is_byte_identical() {
    let plan = plan_from_text(FULL_PLAN);
    let bytes = encode_plan(&plan).unwrap();
    let decoded = decode_plan(&bytes).unwrap();
    assert_eq!(encode_plan(&decoded).unwrap(), bytes);
}

#[test]
fn test_empty_buffer_is_rejected() {
    assert!(matches!(decode_plan(&[]), Err(DecodeError::EmptyBuffer)));
}

#[test]
fn test_short_buffer_is_rejected() {
    // too short to hold the length prefix
    let err = decode_plan(&[1, 2]).unwrap_err();
    assert!(matches!(err, DecodeError::Truncated { .. }));
}

#[test]
fn test_truncated_envelope_is_rejected() {
    let plan = plan_from_text(FULL_PLAN);
    let bytes = encode_plan(&plan).unwrap();
    let err = decode_plan(&bytes[..bytes.len() - 10]).unwrap_err();
    assert!(matches!(err, DecodeError::LengthMismatch { .. }));
}

#[test]
fn test_corrupted_payload_fails_checksum() {
    let plan = plan_from_text(FULL_PLAN);
    let mut bytes = encode_plan(&plan).unwrap();
    let mid = bytes.len() / 2;
    bytes[mid] ^= 0xff;
    let err = decode_plan(&bytes).unwrap_err();
    assert!(matches!(err, DecodeError::ChecksumMismatch { .. }));
}

#[test]
fn test_bad_magic_is_rejected() {
    let plan = plan_from_text(FULL_PLAN);
    let mut bytes = encode_plan(&plan).unwrap();
    bytes[4] = b'X';
    // fix the checksum so the magic check is what fires
    let end = bytes.len() - 4;
    let crc = crc32fast::hash(&bytes[4..end]);
    bytes[end..].copy_from_slice(&crc.to_le_bytes());
    assert!(matches!(decode_plan(&bytes), Err(DecodeError::BadMagic)));
}

#[test]
fn test_future_version_is_rejected() {
    let plan = plan_from_text(FULL_PLAN);
    let mut bytes = encode_plan(&plan).unwrap();
    bytes[8..10].copy_from_slice(&99u16.to_le_bytes());
    let end = bytes.len() - 4;
    let crc = crc32fast::hash(&bytes[4..end]);
    bytes[end..].copy_from_slice(&crc.to_le_bytes());
    assert!(matches!(
        decode_plan(&bytes),
        Err(DecodeError::UnsupportedVersion { version: 99 })
    ));
}

#[test]
fn test_unknown_relation_tag_is_rejected() {
    let plan = plan_from_text(FULL_PLAN);
    let mut bytes = encode_plan(&plan).unwrap();
    // relation tag follows the u32 name length and the name bytes inside
    // the relation record; find it by searching for the record name
    let pos = bytes
        .windows(10)
        .position(|w| w == b"keep_large")
        .expect("relation name in payload");
    bytes[pos + 10] = 0xee;
    let end = bytes.len() - 4;
    let crc = crc32fast::hash(&bytes[4..end]);
    bytes[end..].copy_from_slice(&crc.to_le_bytes());
    let err = decode_plan(&bytes).unwrap_err();
    assert!(matches!(err, DecodeError::UnknownTag { .. }));
}
