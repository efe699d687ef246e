//! AES-128 block cipher wrapper
//!
//! Provides the single-block AES-128 encryption (E_K) that Milenage is
//! defined over.

use aes::cipher::{generic_array::GenericArray, BlockEncrypt, KeyInit};
use aes::Aes128;

use crate::cipher::{BlockCipher, BLOCK_SIZE};
use crate::error::{MilenageError, MilenageResult};

/// AES-128 key size in bytes
pub const KEY_SIZE: usize = 16;

/// AES-128 block cipher for single-block operations
#[derive(Clone)]
pub struct Aes128Block {
    cipher: Aes128,
}

impl Aes128Block {
    /// Create a new AES-128 block cipher with the given key
    pub fn new(key: &[u8; KEY_SIZE]) -> Self {
        let cipher = Aes128::new(GenericArray::from_slice(key));
        Self { cipher }
    }

    /// Create a cipher from a key slice of unchecked length
    ///
    /// # Errors
    /// Returns [`MilenageError::Cipher`] if the key is not 16 bytes long.
    pub fn from_slice(key: &[u8]) -> MilenageResult<Self> {
        let cipher = Aes128::new_from_slice(key).map_err(|_| {
            MilenageError::Cipher(format!(
                "AES-128 key must be {KEY_SIZE} bytes, got {}",
                key.len()
            ))
        })?;
        Ok(Self { cipher })
    }

    /// Create a cipher from a hex-encoded key
    ///
    /// # Errors
    /// Returns [`MilenageError::Cipher`] if the string is not 32 hex digits.
    pub fn from_hex(key: &str) -> MilenageResult<Self> {
        let bytes = hex::decode(key)
            .map_err(|e| MilenageError::Cipher(format!("malformed AES-128 key: {e}")))?;
        Self::from_slice(&bytes)
    }

    /// Encrypt a single 16-byte block, returning the result
    pub fn encrypt_block_copy(&self, block: &[u8; BLOCK_SIZE]) -> [u8; BLOCK_SIZE] {
        let mut generic_block = GenericArray::clone_from_slice(block);
        self.cipher.encrypt_block(&mut generic_block);
        let mut result = [0u8; BLOCK_SIZE];
        result.copy_from_slice(&generic_block);
        result
    }
}

impl BlockCipher for Aes128Block {
    fn encrypt_block(&self, block: &[u8; BLOCK_SIZE]) -> MilenageResult<[u8; BLOCK_SIZE]> {
        Ok(self.encrypt_block_copy(block))
    }
}

impl std::fmt::Debug for Aes128Block {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the key schedule
        f.write_str("Aes128Block { .. }")
    }
}
