//! 128-bit block value
//!
//! [`Block`] is the single buffer type Milenage computes with. It is an
//! immutable 16-byte value: XOR, rotation and encryption all return a new
//! block. Bit 0 is the most significant bit of byte 0, matching the bit
//! numbering of 3GPP TS 35.206.

use std::fmt;
use std::ops::BitXor;
use std::str::FromStr;

use crate::cipher::{BlockCipher, BLOCK_SIZE};
use crate::error::{check_len, MilenageError, MilenageResult};

/// Block length in bits
pub const BLOCK_BITS: u32 = (BLOCK_SIZE * 8) as u32;

/// SQN size in bytes (48 bits)
pub const SQN_SIZE: usize = 6;

/// AMF size in bytes (16 bits)
pub const AMF_SIZE: usize = 2;

/// A 128-bit Milenage buffer
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Block([u8; BLOCK_SIZE]);

impl Block {
    /// The all-zero block
    pub const ZERO: Block = Block([0u8; BLOCK_SIZE]);

    /// Create a block from exactly 16 bytes
    pub const fn new(bytes: [u8; BLOCK_SIZE]) -> Self {
        Self(bytes)
    }

    /// Create a block from a slice that must be exactly 16 bytes long
    pub fn from_bytes(bytes: &[u8]) -> MilenageResult<Self> {
        check_len("block", bytes, BLOCK_SIZE)?;
        let mut buf = [0u8; BLOCK_SIZE];
        buf.copy_from_slice(bytes);
        Ok(Self(buf))
    }

    /// Create a block from 32 hex characters (case-insensitive)
    pub fn from_hex(hex_str: &str) -> MilenageResult<Self> {
        if hex_str.len() != BLOCK_SIZE * 2 {
            return Err(MilenageError::InvalidHex(format!(
                "expected {} hex characters, got {}",
                BLOCK_SIZE * 2,
                hex_str.len()
            )));
        }
        let mut buf = [0u8; BLOCK_SIZE];
        hex::decode_to_slice(hex_str, &mut buf)
            .map_err(|e| MilenageError::InvalidHex(e.to_string()))?;
        Ok(Self(buf))
    }

    /// Create a block from a big-endian integer encoding of up to 128 bits
    ///
    /// Shorter input is zero-padded on the left. A 17-byte input is accepted
    /// only when its leading byte is a zero sign byte, which is dropped.
    pub fn from_be_slice(bytes: &[u8]) -> MilenageResult<Self> {
        let bytes = match bytes {
            [0, rest @ ..] if rest.len() == BLOCK_SIZE => rest,
            _ if bytes.len() <= BLOCK_SIZE => bytes,
            _ => {
                return Err(MilenageError::InvalidLength {
                    field: "block",
                    expected: BLOCK_SIZE,
                    actual: bytes.len(),
                })
            }
        };
        let mut buf = [0u8; BLOCK_SIZE];
        buf[BLOCK_SIZE - bytes.len()..].copy_from_slice(bytes);
        Ok(Self(buf))
    }

    /// Build IN1 = SQN || AMF || SQN || AMF
    pub fn in1(sqn: &[u8], amf: &[u8]) -> MilenageResult<Self> {
        check_len("SQN", sqn, SQN_SIZE)?;
        check_len("AMF", amf, AMF_SIZE)?;

        let mut in1 = [0u8; BLOCK_SIZE];
        in1[0..6].copy_from_slice(sqn);
        in1[6..8].copy_from_slice(amf);
        in1[8..14].copy_from_slice(sqn);
        in1[14..16].copy_from_slice(amf);
        Ok(Self(in1))
    }

    /// Bytewise XOR of two blocks
    pub fn xor(&self, other: &Block) -> Block {
        Block::from(self.as_u128() ^ other.as_u128())
    }

    /// Circular left rotation by `bits`
    ///
    /// # Errors
    /// Returns [`MilenageError::NegativeRotation`] if `bits` is negative.
    pub fn rotate_left(&self, bits: i32) -> MilenageResult<Block> {
        if bits < 0 {
            return Err(MilenageError::NegativeRotation(bits));
        }
        let bits = bits as u32 % BLOCK_BITS;
        if bits == 0 {
            return Ok(*self);
        }
        Ok(Block::from(self.as_u128().rotate_left(bits)))
    }

    /// Encrypt this block with a keyed cipher
    pub fn encrypt<C: BlockCipher + ?Sized>(&self, cipher: &C) -> MilenageResult<Block> {
        cipher.encrypt_block(&self.0).map(Block)
    }

    /// Copy out the given `(start, end)` byte ranges
    ///
    /// # Errors
    /// Returns [`MilenageError::SliceOutOfBounds`] if a range has
    /// `start > end` or `end > 16`.
    pub fn slice(&self, ranges: &[(usize, usize)]) -> MilenageResult<Vec<Vec<u8>>> {
        ranges
            .iter()
            .map(|&(start, end)| {
                self.0
                    .get(start..end)
                    .map(<[u8]>::to_vec)
                    .ok_or(MilenageError::SliceOutOfBounds { start, end })
            })
            .collect()
    }

    /// Copy out `N` bytes starting at `offset`, e.g. `take::<8>(8)` for bytes 8..16
    pub(crate) fn take<const N: usize>(&self, offset: usize) -> MilenageResult<[u8; N]> {
        let bytes = self
            .0
            .get(offset..offset + N)
            .ok_or(MilenageError::SliceOutOfBounds { start: offset, end: offset + N })?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    /// Canonical 16-byte representation
    pub const fn to_bytes(&self) -> [u8; BLOCK_SIZE] {
        self.0
    }

    /// Borrow the underlying bytes
    pub const fn as_bytes(&self) -> &[u8; BLOCK_SIZE] {
        &self.0
    }

    /// Uppercase 32-character hex representation
    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.0)
    }

    /// Big-endian integer value
    pub const fn as_u128(&self) -> u128 {
        u128::from_be_bytes(self.0)
    }
}

impl From<[u8; BLOCK_SIZE]> for Block {
    fn from(bytes: [u8; BLOCK_SIZE]) -> Self {
        Self(bytes)
    }
}

impl From<u128> for Block {
    fn from(value: u128) -> Self {
        Self(value.to_be_bytes())
    }
}

impl From<Block> for [u8; BLOCK_SIZE] {
    fn from(block: Block) -> Self {
        block.0
    }
}

impl AsRef<[u8]> for Block {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl BitXor for Block {
    type Output = Block;

    fn bitxor(self, rhs: Block) -> Block {
        self.xor(&rhs)
    }
}

impl BitXor<&Block> for &Block {
    type Output = Block;

    fn bitxor(self, rhs: &Block) -> Block {
        self.xor(rhs)
    }
}

impl FromStr for Block {
    type Err = MilenageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Block::from_hex(s)
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Block({})", self.to_hex())
    }
}
