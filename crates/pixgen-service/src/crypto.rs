//! Webhook signature primitives.
//!
//! Razorpay signs each webhook delivery with HMAC-SHA256 over the raw
//! request body and sends the hex digest in the `X-Razorpay-Signature`
//! header. Verification recomputes the digest and compares in constant
//! time.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Compute the hex-encoded HMAC-SHA256 digest of a message.
///
/// # Panics
///
/// This function will never panic in practice. The `expect` call is guarded by
/// the invariant that HMAC-SHA256 accepts keys of any size per RFC 2104.
#[must_use]
pub fn hmac_sha256_hex(secret: &str, message: &str) -> String {
    // INVARIANT: HMAC-SHA256 accepts keys of any size per RFC 2104, so
    // `new_from_slice` only fails if the Hmac implementation is broken.
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC-SHA256 accepts any key size");
    mac.update(message.as_bytes());

    hex::encode(mac.finalize().into_bytes())
}

/// Check a delivery's signature against the digest of its raw body.
///
/// The comparison is constant-time so it does not leak how many leading
/// characters of the signature matched.
#[must_use]
pub fn verify_signature(secret: &str, payload: &str, signature: &str) -> bool {
    let expected = hmac_sha256_hex(secret, payload);

    if expected.len() != signature.len() {
        return false;
    }

    let mut diff = 0u8;
    for (x, y) in expected.bytes().zip(signature.bytes()) {
        diff |= x ^ y;
    }
    diff == 0
}
