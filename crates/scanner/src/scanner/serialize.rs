//! Reversible, bounded encoding of scanner state for incremental reparses.
//!
//! Wire layout (scalars little-endian):
//!
//! ```text
//! u8   verbatim_suffix_length (0..=255)
//! [verbatim_suffix_length bytes]
//! u16  serialized_tag_count
//! u16  logical_tag_count           (>= serialized_tag_count)
//! per serialized tag:
//!     u8  kind discriminant
//!     if Custom: u8 name_length, [name_length bytes]
//! ```
//!
//! When the buffer cannot hold every open element, trailing tags are dropped
//! from the record but counted in `logical_tag_count`; deserialization
//! restores them as empty placeholders (depth preserved, identity lost).

use crate::tag::{Tag, TagKind};

use super::Scanner;

/// Canonical capacity of the host-owned serialization buffer.
pub const SERIALIZATION_BUFFER_SIZE: usize = 1024;

/// Maximum storable verbatim-suffix length (u8 length prefix).
pub(crate) const MAX_VERBATIM_SUFFIX_LEN: usize = 255;

/// Maximum storable custom-tag name length (u8 length prefix).
const MAX_CUSTOM_NAME_LEN: usize = 255;

/// Largest prefix of `name` no longer than `at` that ends on a UTF-8
/// character boundary.
fn floor_char_boundary(name: &str, mut at: usize) -> usize {
    if at >= name.len() {
        return name.len();
    }
    while !name.is_char_boundary(at) {
        at -= 1;
    }
    at
}

impl Scanner {
    /// Encode the scanner state into `buffer`, returning the bytes written.
    ///
    /// Tag records stop as soon as the next one would not fit; the counts
    /// record both what was written and the logical open-element depth.
    pub fn serialize(&self, buffer: &mut [u8]) -> usize {
        let suffix = self.verbatim.as_bytes();
        let suffix_len = suffix.len().min(MAX_VERBATIM_SUFFIX_LEN);
        debug_assert!(
            buffer.len() >= 1 + suffix_len + 4,
            "serialization buffer too small for the fixed prefix (len={})",
            buffer.len()
        );

        buffer[0] = suffix_len as u8;
        let mut size = 1;
        buffer[size..size + suffix_len].copy_from_slice(&suffix[..suffix_len]);
        size += suffix_len;

        let logical_count = u16::try_from(self.stack.len()).unwrap_or(u16::MAX);
        let serialized_count_at = size;
        size += 2;
        buffer[size..size + 2].copy_from_slice(&logical_count.to_le_bytes());
        size += 2;

        let mut serialized_count: u16 = 0;
        for tag in self.stack.iter().take(logical_count as usize) {
            if tag.kind() == TagKind::Custom {
                let name = tag.name().unwrap_or("");
                let name_len = floor_char_boundary(name, MAX_CUSTOM_NAME_LEN);
                if size + 2 + name_len >= buffer.len() {
                    break;
                }
                buffer[size] = tag.kind() as u8;
                buffer[size + 1] = name_len as u8;
                buffer[size + 2..size + 2 + name_len]
                    .copy_from_slice(&name.as_bytes()[..name_len]);
                size += 2 + name_len;
            } else {
                if size + 1 >= buffer.len() {
                    break;
                }
                buffer[size] = tag.kind() as u8;
                size += 1;
            }
            serialized_count += 1;
        }

        buffer[serialized_count_at..serialized_count_at + 2]
            .copy_from_slice(&serialized_count.to_le_bytes());
        size
    }

    /// Replace the scanner state with the decoded `buffer` contents. An
    /// empty buffer resets to a fresh scanner; truncated input stops cleanly
    /// and leaves a valid (possibly lossy) state.
    pub fn deserialize(&mut self, buffer: &[u8]) {
        self.stack.clear();
        self.verbatim.clear();
        if buffer.is_empty() {
            return;
        }

        let mut size = 0;
        let suffix_len = buffer[size] as usize;
        size += 1;
        if suffix_len > 0 && size + suffix_len <= buffer.len() {
            self.verbatim.set(&buffer[size..size + suffix_len]);
            size += suffix_len;
        }

        if size + 4 > buffer.len() {
            return;
        }
        let serialized_count = u16::from_le_bytes([buffer[size], buffer[size + 1]]) as usize;
        size += 2;
        let logical_count = u16::from_le_bytes([buffer[size], buffer[size + 1]]) as usize;
        size += 2;

        let mut restored = 0;
        while restored < serialized_count && size < buffer.len() {
            let kind_byte = buffer[size];
            size += 1;
            match TagKind::from_u8(kind_byte) {
                Some(TagKind::Custom) => {
                    let Some(&name_len) = buffer.get(size) else {
                        break;
                    };
                    size += 1;
                    let name_len = name_len as usize;
                    if size + name_len > buffer.len() {
                        break;
                    }
                    let name =
                        String::from_utf8_lossy(&buffer[size..size + name_len]).into_owned();
                    size += name_len;
                    self.stack.push(Tag::custom(name));
                }
                Some(kind) => self.stack.push(Tag::html(kind)),
                // Unknown discriminant: keep the depth, drop the identity.
                None => self.stack.push(Tag::custom("")),
            }
            restored += 1;
        }

        // Tags dropped by the bounded encoder come back as placeholders so
        // the open-element depth survives the round trip.
        for _ in restored..logical_count {
            self.stack.push(Tag::custom(""));
        }

        #[cfg(any(test, feature = "debug-stats"))]
        log::trace!(
            target: "scanner",
            "state restored: depth={} (serialized {restored}) suffix_len={}",
            self.stack.len(),
            self.verbatim.as_bytes().len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::floor_char_boundary;

    #[test]
    fn name_truncation_respects_utf8_boundaries() {
        assert_eq!(floor_char_boundary("abc", 10), 3);
        assert_eq!(floor_char_boundary("abc", 2), 2);
        // 'é' is two bytes; a cut inside it backs off to the boundary.
        assert_eq!(floor_char_boundary("aé", 2), 1);
        assert_eq!(floor_char_boundary("aé", 3), 3);
    }
}
