//! Content fingerprints

use md5::{Digest, Md5};

/// Lowercase hex MD5 of a string
pub fn md5_hex(text: &str) -> String {
    hex::encode(Md5::digest(text.as_bytes()))
}
