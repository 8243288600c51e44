//! Two-token upload protocol.
//!
//! The wire format is deliberately minimal:
//!
//! ```text
//! PER LINE (client -> peer):  [raw line bytes, '\n' retained when present]
//! ACK (peer -> client):       [up to 1024 bytes, content unframed]
//! END (client -> peer):       [4 bytes: "quit"]
//! ```
//!
//! An acknowledgement counts as a success signal only when the bytes
//! received by a single read are exactly `success` (7 bytes). There is
//! no length prefix and no delimiter, so `success!`, a padded buffer,
//! or a `success` split across two reads all fail the comparison. The
//! first success acknowledgement terminates the transfer early; every
//! other acknowledgement is ignored.

use bytes::Bytes;

/// Acknowledgement token that stops the transfer
pub const SUCCESS_TOKEN: &[u8] = b"success";

/// Token sent to signal end of transfer
pub const QUIT_TOKEN: &[u8] = b"quit";

/// Maximum bytes requested by a single acknowledgement read
pub const ACK_BUFFER_SIZE: usize = 1024;

/// Classified acknowledgement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ack {
    /// Received bytes were exactly the success token
    Success,
    /// Anything else, including an empty read on peer close
    Other(Bytes),
}

impl Ack {
    /// Classify the bytes returned by a single acknowledgement read.
    pub fn classify(received: &[u8]) -> Ack {
        if received == SUCCESS_TOKEN {
            Ack::Success
        } else {
            Ack::Other(Bytes::copy_from_slice(received))
        }
    }

    /// Whether this acknowledgement stops the transfer.
    pub fn is_success(&self) -> bool {
        matches!(self, Ack::Success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_is_success() {
        assert_eq!(Ack::classify(b"success"), Ack::Success);
        assert!(Ack::classify(b"success").is_success());
    }

    #[test]
    fn test_trailing_bytes_fail_equality() {
        // No framing, so a suffix makes the whole comparison fail
        let ack = Ack::classify(b"success!");
        assert!(!ack.is_success());
        assert_eq!(ack, Ack::Other(Bytes::from_static(b"success!")));
    }

    #[test]
    fn test_prefix_fails_equality() {
        assert!(!Ack::classify(b"succes").is_success());
    }

    #[test]
    fn test_empty_read_is_not_success() {
        let ack = Ack::classify(b"");
        assert!(!ack.is_success());
        assert_eq!(ack, Ack::Other(Bytes::new()));
    }

    #[test]
    fn test_padded_buffer_fails_equality() {
        let mut padded = Vec::from(&b"success"[..]);
        padded.extend_from_slice(&[0u8; 9]);
        assert!(!Ack::classify(&padded).is_success());
    }

    #[test]
    fn test_token_lengths() {
        assert_eq!(SUCCESS_TOKEN.len(), 7);
        assert_eq!(QUIT_TOKEN.len(), 4);
    }
}
