//! Integration tests for the keyrelay-core wire codec.
//!
//! These tests go through the public API only and check the properties the
//! server and client rely on: round trips, one record per line, and the
//! error classification the session loop branches on.

use keyrelay_core::{decode, encode, CharacterEvent, DecodeError, KeyMapper, RECORD_TERMINATOR};

/// Encodes an event, strips the terminator the way a line reader would, and
/// decodes the remainder.
fn roundtrip(event: &CharacterEvent) -> CharacterEvent {
    let bytes = encode(event);
    assert_eq!(bytes.last(), Some(&RECORD_TERMINATOR), "record must end with newline");
    decode(&bytes[..bytes.len() - 1]).expect("decode must succeed")
}

#[test]
fn test_roundtrip_every_printable_ascii_character() {
    for byte in 0x20u8..=0x7E {
        let original = CharacterEvent::new((byte as char).to_string()).unwrap();
        assert_eq!(roundtrip(&original), original, "byte {:?}", byte as char);
    }
}

#[test]
fn test_roundtrip_control_tokens() {
    for token in ["\r", "\t", "\u{8}", "\u{1b}", "\u{7f}"] {
        let original = CharacterEvent::new(token).unwrap();
        assert_eq!(roundtrip(&original), original, "token {token:?}");
    }
}

#[test]
fn test_roundtrip_multibyte_characters() {
    for text in ["é", "ß", "日", "🦀"] {
        let original = CharacterEvent::new(text).unwrap();
        assert_eq!(roundtrip(&original), original);
    }
}

#[test]
fn test_encoded_records_concatenate_into_splittable_stream() {
    // Arrange: three events written back to back, as a client would send them.
    let events: Vec<CharacterEvent> = ["h", "i", "\r"]
        .iter()
        .map(|t| CharacterEvent::new(*t).unwrap())
        .collect();
    let stream: Vec<u8> = events.iter().flat_map(encode).collect();

    // Act: split on the terminator and decode each line.
    let decoded: Vec<CharacterEvent> = stream
        .split(|b| *b == RECORD_TERMINATOR)
        .filter(|line| !line.is_empty())
        .map(|line| decode(line).unwrap())
        .collect();

    // Assert: same events, same order.
    assert_eq!(decoded, events);
}

#[test]
fn test_malformed_record_followed_by_valid_record() {
    let stream = b"not-json\n{\"char\":\"B\"}\n";
    let mut lines = stream.split(|b| *b == RECORD_TERMINATOR);

    assert!(matches!(
        decode(lines.next().unwrap()),
        Err(DecodeError::Malformed(_))
    ));
    assert_eq!(decode(lines.next().unwrap()).unwrap().as_str(), "B");
}

#[test]
fn test_decoded_event_resolves_to_a_key() {
    let event = decode(br#"{"char":"A"}"#).unwrap();
    let key = KeyMapper::position_for(&event).expect("ASCII letter must map");
    assert_eq!(KeyMapper::to_windows_vk(key), 0x41);
}
