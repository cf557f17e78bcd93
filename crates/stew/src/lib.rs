//! Dynamic nested maps with dot-path access, plus small scalar, slice and
//! string helpers.
//!
//! The centre of the crate is [`Map`], an attribute store whose values are
//! [`Value`]s and whose accessors take dot-separated paths:
//!
//! ```
//! use stew::{Map, map};
//!
//! let mut m = map! { "name" => "tyler" };
//! m.set("request.url", "http://www.stretchr.com/");
//!
//! assert_eq!(m.get_str("request.url"), Ok("http://www.stretchr.com/"));
//! assert_eq!(m.to_base64().unwrap(), "eyJuYW1lIjoidHlsZXIiLCJyZXF1ZXN0Ijp7InVybCI6Imh0dHA6Ly93d3cuc3RyZXRjaHIuY29tLyJ9fQ==");
//!
//! let signed = m.signed_base64("secret").unwrap();
//! assert_eq!(Map::from_signed_base64(&signed, "secret").unwrap(), m);
//! ```

pub mod encoding;
pub mod error;
pub mod json;
mod macros;
pub mod map;
pub mod number;
pub mod slice;
pub mod strings;
pub mod value;

pub use encoding::{HashAlgorithm, SIGNATURE_SEPARATOR, Signer};
pub use error::{Error, Result};
pub use map::{Map, PATH_SEPARATOR};
pub use number::Number;
pub use value::Value;
