//! Tests using the `encodings.json` known-answer vectors.

use serde::Deserialize;
use stew::{Error, HashAlgorithm, Map, Signer};

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
enum Algorithm {
    HmacSha256,
    HmacSha512,
}

#[derive(Deserialize)]
struct EncodingTest {
    description: String,
    json: String,
    base64: String,
    key: String,
    algorithm: Algorithm,
    signature: String,
    sha256: String,
}

impl EncodingTest {
    fn signer(&self) -> Signer {
        Signer::new(match self.algorithm {
            Algorithm::HmacSha256 => HashAlgorithm::HmacSha256,
            Algorithm::HmacSha512 => HashAlgorithm::HmacSha512,
        })
    }

    fn signed(&self) -> String {
        format!("{}:{}", self.base64, self.signature)
    }
}

fn load_cases() -> Vec<EncodingTest> {
    let json = include_str!("testdata/encodings.json");
    serde_json::from_str(json).expect("Failed to parse test vectors")
}

#[test]
fn test_encoding_vectors_json_roundtrip() {
    for case in &load_cases() {
        let map = Map::from_json(&case.json)
            .unwrap_or_else(|e| panic!("from_json failed for '{}': {}", case.description, e));
        let json = map
            .to_json()
            .unwrap_or_else(|e| panic!("to_json failed for '{}': {}", case.description, e));
        assert_eq!(json, case.json, "JSON mismatch for '{}'", case.description);
    }
}

#[test]
fn test_encoding_vectors_base64() {
    for case in &load_cases() {
        let map = Map::from_json(&case.json).unwrap();
        assert_eq!(
            map.to_base64().unwrap(),
            case.base64,
            "base64 mismatch for '{}'",
            case.description
        );
        assert_eq!(
            Map::from_base64(&case.base64).unwrap(),
            map,
            "base64 decode mismatch for '{}'",
            case.description
        );
    }
}

#[test]
fn test_encoding_vectors_signed() {
    for case in &load_cases() {
        let map = Map::from_json(&case.json).unwrap();
        let signer = case.signer();

        assert_eq!(
            map.signed_base64_with(&signer, &case.key).unwrap(),
            case.signed(),
            "signature mismatch for '{}'",
            case.description
        );

        let decoded = Map::from_signed_base64_with(&case.signed(), &case.key, &signer)
            .unwrap_or_else(|e| panic!("signed decode failed for '{}': {}", case.description, e));
        assert_eq!(decoded, map, "signed decode mismatch for '{}'", case.description);
    }
}

#[test]
fn test_encoding_vectors_reject_wrong_key() {
    for case in &load_cases() {
        let result = Map::from_signed_base64_with(
            &case.signed(),
            format!("{}x", case.key),
            &case.signer(),
        );
        assert_eq!(
            result,
            Err(Error::SignatureMismatch),
            "wrong key accepted for '{}'",
            case.description
        );
    }
}

#[test]
fn test_encoding_vectors_hash() {
    for case in &load_cases() {
        let map = Map::from_json(&case.json).unwrap();
        assert_eq!(
            map.hash().unwrap(),
            case.sha256,
            "hash mismatch for '{}'",
            case.description
        );
        if matches!(case.algorithm, Algorithm::HmacSha256) {
            assert_eq!(
                map.hash_with_key(&case.key).unwrap(),
                case.signature,
                "keyed hash mismatch for '{}'",
                case.description
            );
        }
    }
}
