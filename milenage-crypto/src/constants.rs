//! Milenage rotation (r1..r5) and diversification (c1..c5) constants
//!
//! Operators may choose their own constants; the sample values of
//! 3GPP TS 35.206 section 4.1 are used by default.

use crate::block::Block;
use crate::error::{MilenageError, MilenageResult};

/// Number of constants in each set
pub const CONST_NUM: usize = 5;

/// Largest allowed rotation amount in bits
pub const MAX_ROTATION: u8 = 127;

/// Sample rotation amounts r1..r5
pub const R_SAMPLE: [u8; CONST_NUM] = [64, 0, 32, 64, 96];

/// Sample diversification constants c1..c5 (0, 1, 2, 4, 8 as 128-bit integers)
pub const C_SAMPLE: [u128; CONST_NUM] = [0, 1, 2, 4, 8];

/// Rotation constants r1..r5, each in 0..=127
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationConstants([u8; CONST_NUM]);

impl RotationConstants {
    /// Create rotation constants from custom values
    ///
    /// # Errors
    /// Returns [`MilenageError::RotationOutOfRange`] for the first value
    /// above 127.
    pub fn new(r1: u8, r2: u8, r3: u8, r4: u8, r5: u8) -> MilenageResult<Self> {
        Self::from_array([r1, r2, r3, r4, r5])
    }

    /// Create rotation constants from an array of r1..r5
    pub fn from_array(values: [u8; CONST_NUM]) -> MilenageResult<Self> {
        if let Some(&bad) = values.iter().find(|&&r| r > MAX_ROTATION) {
            return Err(MilenageError::RotationOutOfRange(bad));
        }
        Ok(Self(values))
    }

    /// Sample constants from TS 35.206: {64, 0, 32, 64, 96}
    pub const fn sample() -> Self {
        Self(R_SAMPLE)
    }

    /// Zero-based access: `get(0)` is r1
    pub fn get(&self, index: usize) -> Option<u8> {
        self.0.get(index).copied()
    }

    /// All five values
    pub const fn as_array(&self) -> &[u8; CONST_NUM] {
        &self.0
    }
}

impl Default for RotationConstants {
    fn default() -> Self {
        Self::sample()
    }
}

impl TryFrom<[u8; CONST_NUM]> for RotationConstants {
    type Error = MilenageError;

    fn try_from(values: [u8; CONST_NUM]) -> Result<Self, Self::Error> {
        Self::from_array(values)
    }
}

/// Diversification constants c1..c5
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiversificationConstants([Block; CONST_NUM]);

impl DiversificationConstants {
    /// Create diversification constants from custom blocks
    pub const fn new(c1: Block, c2: Block, c3: Block, c4: Block, c5: Block) -> Self {
        Self([c1, c2, c3, c4, c5])
    }

    /// Create diversification constants from five 32-character hex strings
    pub fn from_hex(c1: &str, c2: &str, c3: &str, c4: &str, c5: &str) -> MilenageResult<Self> {
        Ok(Self::new(
            Block::from_hex(c1)?,
            Block::from_hex(c2)?,
            Block::from_hex(c3)?,
            Block::from_hex(c4)?,
            Block::from_hex(c5)?,
        ))
    }

    /// Sample constants from TS 35.206
    pub fn sample() -> Self {
        Self(C_SAMPLE.map(Block::from))
    }

    /// Zero-based access: `get(0)` is c1
    pub fn get(&self, index: usize) -> Option<Block> {
        self.0.get(index).copied()
    }
}

impl Default for DiversificationConstants {
    fn default() -> Self {
        Self::sample()
    }
}
