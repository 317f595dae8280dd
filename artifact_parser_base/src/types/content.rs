//! Content handles and byte payload serialization

use std::io::Read;

/// Readable content of a collected file
///
/// The handle only borrows whatever it wraps (for example `&mut File`), so
/// dropping it inside an adapter never closes the caller's resource, and its
/// lifetime ties it to a single dispatch call.
pub type ContentHandle<'a> = Box<dyn Read + 'a>;

/// Wrap a byte slice as a content handle
pub fn handle_from_bytes(bytes: &[u8]) -> ContentHandle<'_> {
    Box::new(std::io::Cursor::new(bytes))
}

/// Serde adapter storing raw bytes as standard base64 strings
pub mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Payload {
        #[serde(with = "base64_bytes")]
        data: Vec<u8>,
    }

    #[test]
    fn test_base64_field() {
        let json = serde_json::to_string(&Payload {
            data: b"hello".to_vec(),
        })
        .unwrap();
        assert_eq!(json, r#"{"data":"aGVsbG8="}"#);

        let bad: Result<Payload, _> = serde_json::from_str(r#"{"data":"***"}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_handle_reads_bytes() {
        let mut handle = handle_from_bytes(b"127.0.0.1 localhost");
        let mut text = String::new();
        handle.read_to_string(&mut text).unwrap();
        assert_eq!(text, "127.0.0.1 localhost");
    }
}
