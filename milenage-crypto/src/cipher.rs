//! Block cipher capability used by the Milenage kernel
//!
//! Milenage only ever needs E_K: a single-block, deterministic encryption of
//! 16 bytes under the subscriber key, with no IV and no padding. Any
//! AES-128/ECB primitive satisfies the contract; the bundled implementation
//! is [`crate::aes::Aes128Block`].

use std::sync::Arc;

use crate::error::MilenageResult;

/// Cipher block size in bytes (128 bits)
pub const BLOCK_SIZE: usize = 16;

/// An already-keyed single-block encryption primitive.
///
/// Errors are treated as configuration faults: the kernel propagates them
/// immediately and never retries.
pub trait BlockCipher: Send + Sync {
    /// Encrypt one 16-byte block, returning the ciphertext
    fn encrypt_block(&self, block: &[u8; BLOCK_SIZE]) -> MilenageResult<[u8; BLOCK_SIZE]>;
}

impl<C: BlockCipher + ?Sized> BlockCipher for &C {
    fn encrypt_block(&self, block: &[u8; BLOCK_SIZE]) -> MilenageResult<[u8; BLOCK_SIZE]> {
        (**self).encrypt_block(block)
    }
}

impl<C: BlockCipher + ?Sized> BlockCipher for Box<C> {
    fn encrypt_block(&self, block: &[u8; BLOCK_SIZE]) -> MilenageResult<[u8; BLOCK_SIZE]> {
        (**self).encrypt_block(block)
    }
}

impl<C: BlockCipher + ?Sized> BlockCipher for Arc<C> {
    fn encrypt_block(&self, block: &[u8; BLOCK_SIZE]) -> MilenageResult<[u8; BLOCK_SIZE]> {
        (**self).encrypt_block(block)
    }
}

/// A cipher that always fails
#[cfg(test)]
pub(crate) struct BrokenCipher;

#[cfg(test)]
impl BlockCipher for BrokenCipher {
    fn encrypt_block(&self, _block: &[u8; BLOCK_SIZE]) -> MilenageResult<[u8; BLOCK_SIZE]> {
        Err(crate::error::MilenageError::Cipher("key schedule not initialised".into()))
    }
}
