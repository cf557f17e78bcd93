//! Base64 and signed base64 encodings of attribute stores.
//!
//! The base64 form is the standard (padded, non URL-safe) alphabet applied to
//! the map's JSON text. The signed form appends a separator and a lowercase
//! hex HMAC of the base64 text:
//!
//! ```text
//! eyJuYW1lIjoidHlsZXIifQ==:282a4749fedb8e66c46aa18655e74c19...
//! └──────── payload ─────┘ └──────────── signature ──────────┘
//! ```
//!
//! The separator and hash algorithm are held by a [`Signer`]. Callers that
//! need to read strings produced with another separator or algorithm
//! configure one explicitly; everything else uses [`Signer::default`].

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256, Sha512};

use crate::error::{Error, Result};
use crate::map::Map;

/// Default separator between payload and signature.
pub const SIGNATURE_SEPARATOR: char = ':';

/// Keyed hash used to sign payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HashAlgorithm {
    #[default]
    HmacSha256,
    HmacSha512,
}

impl HashAlgorithm {
    fn tag(self, key: &[u8], payload: &[u8]) -> Vec<u8> {
        match self {
            HashAlgorithm::HmacSha256 => {
                let mut mac = Hmac::<Sha256>::new_from_slice(key)
                    .expect("HMAC accepts keys of any length");
                mac.update(payload);
                mac.finalize().into_bytes().to_vec()
            }
            HashAlgorithm::HmacSha512 => {
                let mut mac = Hmac::<Sha512>::new_from_slice(key)
                    .expect("HMAC accepts keys of any length");
                mac.update(payload);
                mac.finalize().into_bytes().to_vec()
            }
        }
    }

    /// Constant-time check of `tag` against the payload's HMAC.
    fn verify(self, key: &[u8], payload: &[u8], tag: &[u8]) -> bool {
        match self {
            HashAlgorithm::HmacSha256 => {
                let mut mac = Hmac::<Sha256>::new_from_slice(key)
                    .expect("HMAC accepts keys of any length");
                mac.update(payload);
                mac.verify_slice(tag).is_ok()
            }
            HashAlgorithm::HmacSha512 => {
                let mut mac = Hmac::<Sha512>::new_from_slice(key)
                    .expect("HMAC accepts keys of any length");
                mac.update(payload);
                mac.verify_slice(tag).is_ok()
            }
        }
    }
}

fn is_base64_alphabet(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '+' | '/' | '=')
}

fn is_lowercase_hex(s: &str) -> bool {
    s.len() % 2 == 0 && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

/// Signing configuration: hash algorithm plus payload/signature separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signer {
    algorithm: HashAlgorithm,
    separator: char,
}

impl Default for Signer {
    fn default() -> Self {
        Self::new(HashAlgorithm::default())
    }
}

impl Signer {
    /// Signer using `algorithm` and the default separator.
    #[must_use]
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self {
            algorithm,
            separator: SIGNATURE_SEPARATOR,
        }
    }

    /// Replace the separator.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidSeparator` if `separator` can appear in standard
    /// base64 output.
    pub fn with_separator(mut self, separator: char) -> Result<Self> {
        if is_base64_alphabet(separator) {
            return Err(Error::InvalidSeparator(separator));
        }
        self.separator = separator;
        Ok(self)
    }

    #[must_use]
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    #[must_use]
    pub fn separator(&self) -> char {
        self.separator
    }

    /// Lowercase hex HMAC of `payload` under `key`.
    #[must_use]
    pub fn hash(&self, payload: &str, key: impl AsRef<[u8]>) -> String {
        hex::encode(self.algorithm.tag(key.as_ref(), payload.as_bytes()))
    }

    /// `payload`, the separator, then the signature of `payload`.
    #[must_use]
    pub fn sign(&self, payload: &str, key: impl AsRef<[u8]>) -> String {
        let signature = self.hash(payload, key);
        format!("{payload}{}{signature}", self.separator)
    }

    /// Check a signed string and return its payload.
    ///
    /// # Errors
    ///
    /// Returns `Error::MalformedSignedString` unless `signed` contains the
    /// separator exactly once, and `Error::SignatureMismatch` if the
    /// signature does not authenticate the payload under `key`.
    pub fn verify<'a>(&self, signed: &'a str, key: impl AsRef<[u8]>) -> Result<&'a str> {
        let parts: Vec<&str> = signed.split(self.separator).collect();
        let &[payload, signature] = parts.as_slice() else {
            log::debug!("signed string has {} parts", parts.len());
            return Err(Error::MalformedSignedString { parts: parts.len() });
        };

        // `hex::decode` also accepts uppercase digits.
        if !is_lowercase_hex(signature) {
            log::warn!("signature is not lowercase hex");
            return Err(Error::SignatureMismatch);
        }
        let Ok(tag) = hex::decode(signature) else {
            log::warn!("signature is not valid hex");
            return Err(Error::SignatureMismatch);
        };

        if !self
            .algorithm
            .verify(key.as_ref(), payload.as_bytes(), &tag)
        {
            log::warn!("signature does not match payload");
            return Err(Error::SignatureMismatch);
        }

        log::trace!("verified {} byte payload", payload.len());
        Ok(payload)
    }
}

impl Map {
    /// Standard base64 of this map's JSON text.
    ///
    /// # Errors
    ///
    /// Returns any error from [`Map::to_json`].
    pub fn to_base64(&self) -> Result<String> {
        Ok(STANDARD.encode(self.to_json()?))
    }

    /// Decode a map from standard base64 JSON text.
    ///
    /// # Errors
    ///
    /// Returns `Error::Base64` for malformed base64, otherwise any error from
    /// [`Map::from_json`].
    pub fn from_base64(data: &str) -> Result<Map> {
        let bytes = STANDARD.decode(data).map_err(|e| {
            log::debug!("base64 decode failed: {e}");
            Error::Base64(e.to_string())
        })?;
        let json = String::from_utf8(bytes).map_err(|e| Error::JsonParse(e.to_string()))?;
        Map::from_json(&json)
    }

    /// Signed base64 using the default [`Signer`].
    ///
    /// # Errors
    ///
    /// Returns any error from [`Map::to_base64`].
    pub fn signed_base64(&self, key: impl AsRef<[u8]>) -> Result<String> {
        self.signed_base64_with(&Signer::default(), key)
    }

    /// Signed base64 using an explicit [`Signer`].
    ///
    /// # Errors
    ///
    /// Returns any error from [`Map::to_base64`].
    pub fn signed_base64_with(&self, signer: &Signer, key: impl AsRef<[u8]>) -> Result<String> {
        Ok(signer.sign(&self.to_base64()?, key))
    }

    /// Decode a signed base64 string produced with the default [`Signer`].
    ///
    /// # Errors
    ///
    /// Returns `Error::MalformedSignedString` or `Error::SignatureMismatch`
    /// before anything is decoded, otherwise any error from
    /// [`Map::from_base64`].
    pub fn from_signed_base64(data: &str, key: impl AsRef<[u8]>) -> Result<Map> {
        Self::from_signed_base64_with(data, key, &Signer::default())
    }

    /// Decode a signed base64 string produced with `signer`.
    ///
    /// # Errors
    ///
    /// Same as [`Map::from_signed_base64`].
    pub fn from_signed_base64_with(
        data: &str,
        key: impl AsRef<[u8]>,
        signer: &Signer,
    ) -> Result<Map> {
        let payload = signer.verify(data, key)?;
        Map::from_base64(payload)
    }

    /// Lowercase hex SHA-256 of this map's base64 encoding.
    ///
    /// # Errors
    ///
    /// Returns any error from [`Map::to_base64`].
    pub fn hash(&self) -> Result<String> {
        Ok(hex::encode(Sha256::digest(self.to_base64()?.as_bytes())))
    }

    /// Lowercase hex HMAC of this map's base64 encoding, using the default
    /// [`Signer`]. Equal to the signature part of [`Map::signed_base64`].
    ///
    /// # Errors
    ///
    /// Returns any error from [`Map::to_base64`].
    pub fn hash_with_key(&self, key: impl AsRef<[u8]>) -> Result<String> {
        Ok(Signer::default().hash(&self.to_base64()?, key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map;

    const KEY: &str = "e1zJJGjCJfLAR1b4dDqg0PY33731D8gM";
    const TYLER_B64: &str = "eyJuYW1lIjoidHlsZXIifQ==";
    const TYLER_SHA256_SIG: &str =
        "282a4749fedb8e66c46aa18655e74c192cb95f6517bff146c069e7d5f4e2137f";

    fn tyler() -> Map {
        map! { "name" => "tyler" }
    }

    #[test]
    fn test_to_base64() {
        assert_eq!(tyler().to_base64().unwrap(), TYLER_B64);
    }

    #[test]
    fn test_from_base64() {
        let m = Map::from_base64(TYLER_B64).unwrap();
        assert_eq!(m.get_str("name"), Ok("tyler"));
    }

    #[test]
    fn test_from_base64_malformed() {
        assert!(matches!(Map::from_base64("!!!"), Err(Error::Base64(_))));
    }

    #[test]
    fn test_from_base64_not_json() {
        // "hello"
        assert!(matches!(
            Map::from_base64("aGVsbG8="),
            Err(Error::JsonParse(_))
        ));
    }

    #[test]
    fn test_signed_base64() {
        assert_eq!(
            tyler().signed_base64(KEY).unwrap(),
            format!("{TYLER_B64}:{TYLER_SHA256_SIG}")
        );
    }

    #[test]
    fn test_from_signed_base64() {
        let m = Map::from_signed_base64(&format!("{TYLER_B64}:{TYLER_SHA256_SIG}"), KEY).unwrap();
        assert_eq!(m.get_str("name"), Ok("tyler"));
    }

    #[test]
    fn test_from_signed_base64_missing_separator() {
        let result = Map::from_signed_base64(&format!("{TYLER_B64}{TYLER_SHA256_SIG}"), KEY);
        assert_eq!(result, Err(Error::MalformedSignedString { parts: 1 }));
    }

    #[test]
    fn test_from_signed_base64_extra_separator() {
        let result = Map::from_signed_base64(&format!("{TYLER_B64}:{TYLER_SHA256_SIG}:x"), KEY);
        assert_eq!(result, Err(Error::MalformedSignedString { parts: 3 }));
    }

    #[test]
    fn test_from_signed_base64_altered_signature() {
        let result =
            Map::from_signed_base64(&format!("{TYLER_B64}:{TYLER_SHA256_SIG}BREAK"), KEY);
        assert_eq!(result, Err(Error::SignatureMismatch));

        let mut flipped = TYLER_SHA256_SIG.to_string();
        flipped.replace_range(0..1, "3");
        let result = Map::from_signed_base64(&format!("{TYLER_B64}:{flipped}"), KEY);
        assert_eq!(result, Err(Error::SignatureMismatch));
    }

    #[test]
    fn test_from_signed_base64_uppercased_signature() {
        let tampered = TYLER_SHA256_SIG.replacen("c46aa186", "c46aA186", 1);
        assert_ne!(tampered, TYLER_SHA256_SIG);
        let result = Map::from_signed_base64(&format!("{TYLER_B64}:{tampered}"), KEY);
        assert_eq!(result, Err(Error::SignatureMismatch));

        let upper = TYLER_SHA256_SIG.to_ascii_uppercase();
        let result = Map::from_signed_base64(&format!("{TYLER_B64}:{upper}"), KEY);
        assert_eq!(result, Err(Error::SignatureMismatch));
    }

    #[test]
    fn test_signer_accessors() {
        let signer = Signer::default();
        assert_eq!(signer.algorithm(), HashAlgorithm::HmacSha256);
        assert_eq!(signer.separator(), SIGNATURE_SEPARATOR);

        let signer = Signer::new(HashAlgorithm::HmacSha512)
            .with_separator('_')
            .unwrap();
        assert_eq!(signer.algorithm(), HashAlgorithm::HmacSha512);
        assert_eq!(signer.separator(), '_');
    }

    #[test]
    fn test_from_signed_base64_altered_payload() {
        let result =
            Map::from_signed_base64(&format!("eyJuYW1lIjoidHlXIifQ==:{TYLER_SHA256_SIG}"), KEY);
        assert_eq!(result, Err(Error::SignatureMismatch));
    }

    #[test]
    fn test_from_signed_base64_wrong_key() {
        let signed = tyler().signed_base64(KEY).unwrap();
        let result = Map::from_signed_base64(&signed, "another key");
        assert_eq!(result, Err(Error::SignatureMismatch));
    }

    #[test]
    fn test_hash() {
        assert_eq!(
            tyler().hash().unwrap(),
            "6098ec78aeeff258d6606334eb03b28017292f30f5db331c3f954bd8fa2b902b"
        );
    }

    #[test]
    fn test_hash_with_key() {
        assert_eq!(tyler().hash_with_key(KEY).unwrap(), TYLER_SHA256_SIG);
    }

    #[test]
    fn test_sha512_signer() {
        let signer = Signer::new(HashAlgorithm::HmacSha512);
        assert_eq!(
            signer.hash(TYLER_B64, KEY),
            "68603b3e86c29ed843b65f3485b55ceadc1dbb9fa94abac709b95a1ad00746099cc96fd883aacc590158bd6d11fa0cdacd1132a55a02ddd927790336b03b51b9"
        );

        let signed = tyler().signed_base64_with(&signer, KEY).unwrap();
        let m = Map::from_signed_base64_with(&signed, KEY, &signer).unwrap();
        assert_eq!(m, tyler());

        // Default signer cannot read it.
        assert_eq!(
            Map::from_signed_base64(&signed, KEY),
            Err(Error::SignatureMismatch)
        );
    }

    #[test]
    fn test_custom_separator() {
        let signer = Signer::default().with_separator('_').unwrap();
        let signed = tyler().signed_base64_with(&signer, KEY).unwrap();
        assert_eq!(signed, format!("{TYLER_B64}_{TYLER_SHA256_SIG}"));
        assert_eq!(
            Map::from_signed_base64_with(&signed, KEY, &signer).unwrap(),
            tyler()
        );
    }

    #[test]
    fn test_separator_from_base64_alphabet_rejected() {
        for c in ['A', 'z', '0', '+', '/', '='] {
            assert_eq!(
                Signer::default().with_separator(c),
                Err(Error::InvalidSeparator(c))
            );
        }
    }

    #[test]
    fn test_verify_returns_payload() {
        let signer = Signer::default();
        let signed = signer.sign("payload", KEY);
        assert_eq!(signer.verify(&signed, KEY), Ok("payload"));
    }
}
