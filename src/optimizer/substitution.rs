use fastrand::Rng;
use std::fmt;

pub const ALPHABET: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Monoalphabetic key: ciphertext letter `key[i]` reads as plaintext letter `i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubstitutionKey {
    key: [u8; 26],
}

impl SubstitutionKey {
    pub fn identity() -> Self {
        Self { key: *ALPHABET }
    }

    /// Accepts any arrangement of the 26 letters (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 26 {
            return None;
        }
        let mut key = [0u8; 26];
        let mut seen = [false; 26];
        for (slot, &b) in key.iter_mut().zip(bytes) {
            let up = b.to_ascii_uppercase();
            if !up.is_ascii_uppercase() || seen[(up - b'A') as usize] {
                return None;
            }
            seen[(up - b'A') as usize] = true;
            *slot = up;
        }
        Some(Self { key })
    }

    pub fn shuffled(rng: &mut Rng) -> Self {
        let mut key = *ALPHABET;
        rng.shuffle(&mut key);
        Self { key }
    }

    /// New key with positions `a` and `b` exchanged.
    pub fn swapped(&self, a: usize, b: usize) -> Self {
        let mut key = self.key;
        key.swap(a, b);
        Self { key }
    }

    pub fn as_bytes(&self) -> &[u8; 26] {
        &self.key
    }

    /// Lookup from ciphertext letter index to plaintext letter index.
    pub fn decipher_table(&self) -> [u8; 26] {
        let mut table = [0u8; 26];
        for (plain, &c) in self.key.iter().enumerate() {
            table[(c - b'A') as usize] = plain as u8;
        }
        table
    }

    /// Deciphers letter indices (`0..26`) into `out`, reusing its buffer.
    pub fn decipher_indices_into(&self, cipher: &[u8], out: &mut Vec<u8>) {
        let table = self.decipher_table();
        out.clear();
        out.extend(cipher.iter().map(|&c| table[c as usize]));
    }

    /// Deciphers the letters of `text`; anything else is dropped.
    pub fn decipher(&self, text: &str) -> String {
        let table = self.decipher_table();
        text.bytes()
            .map(|b| b.to_ascii_uppercase())
            .filter(u8::is_ascii_uppercase)
            .map(|b| (table[(b - b'A') as usize] + b'A') as char)
            .collect()
    }
}

impl fmt::Display for SubstitutionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.key))
    }
}

/// Letter indices of the `A-Z` symbols in `text`.
pub fn letter_indices(text: &str) -> Vec<u8> {
    text.bytes()
        .filter(u8::is_ascii_uppercase)
        .map(|b| b - b'A')
        .collect()
}

pub fn indices_to_text(indices: &[u8]) -> String {
    indices.iter().map(|&i| (i + b'A') as char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_a_no_op() {
        assert_eq!(SubstitutionKey::identity().decipher("HELLO"), "HELLO");
    }

    #[test]
    fn decipher_inverts_the_key() {
        // Plaintext A enciphers to Q, B to W, ...
        let key = SubstitutionKey::parse("QWERTYUIOPASDFGHJKLZXCVBNM").unwrap();
        assert_eq!(key.decipher("QWE"), "ABC");
        assert_eq!(key.decipher("itssg 7"), "HELLO");
    }

    #[test]
    fn swapped_leaves_the_original_alone() {
        let key = SubstitutionKey::identity();
        let child = key.swapped(0, 25);
        assert_eq!(key.to_string(), "ABCDEFGHIJKLMNOPQRSTUVWXYZ");
        assert_eq!(child.to_string(), "ZBCDEFGHIJKLMNOPQRSTUVWXYA");
    }

    #[test]
    fn shuffled_keys_are_permutations() {
        let mut rng = Rng::with_seed(7);
        let key = SubstitutionKey::shuffled(&mut rng);
        assert!(SubstitutionKey::parse(&key.to_string()).is_some());
    }

    #[test]
    fn parse_rejects_repeats() {
        assert!(SubstitutionKey::parse("AACDEFGHIJKLMNOPQRSTUVWXYZ").is_none());
        assert!(SubstitutionKey::parse("ABC").is_none());
    }
}
