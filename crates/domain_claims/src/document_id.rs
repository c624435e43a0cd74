//! Document number generation
//!
//! Every claim document number is minted here. The default generator keeps
//! the established `8 digits + 2 uppercase alphanumerics` shape and draws its
//! randomness from a v4 UUID.

use uuid::Uuid;

use core_kernel::DocumentId;

const SUFFIX_ALPHABET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Source of new claim document numbers
pub trait DocumentIdGenerator: Send + Sync {
    /// Produces a candidate document number
    ///
    /// Uniqueness is not guaranteed; callers must handle collisions.
    fn generate(&self) -> DocumentId;
}

/// Random document numbers with the `^[0-9]{8}[A-Z0-9]{2}$` shape
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomDocumentIdGenerator;

impl RandomDocumentIdGenerator {
    pub fn new() -> Self {
        Self
    }

    fn from_bytes(bytes: [u8; 16]) -> DocumentId {
        let mut head = [0u8; 8];
        head.copy_from_slice(&bytes[..8]);
        let number = u64::from_be_bytes(head) % 100_000_000;

        let suffix: String = bytes[8..10]
            .iter()
            .map(|b| SUFFIX_ALPHABET[(*b as usize) % SUFFIX_ALPHABET.len()] as char)
            .collect();

        DocumentId::new(format!("{:08}{}", number, suffix))
    }
}

impl DocumentIdGenerator for RandomDocumentIdGenerator {
    fn generate(&self) -> DocumentId {
        Self::from_bytes(Uuid::new_v4().into_bytes())
    }
}
