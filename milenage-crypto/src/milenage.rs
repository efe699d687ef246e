//! Milenage algorithm implementation (3GPP TS 35.206)
//!
//! Milenage is the 3GPP authentication and key generation algorithm used in
//! UMTS, LTE, and 5G networks. It provides the following functions:
//! - f1: Network authentication (MAC-A)
//! - f1*: Re-synchronization authentication (MAC-S)
//! - f2: User authentication (RES/XRES)
//! - f3: Cipher key derivation (CK)
//! - f4: Integrity key derivation (IK)
//! - f5: Anonymity key derivation (AK)
//! - f5*: Re-synchronization anonymity key (AK for AUTS)
//!
//! All functions share one intermediate value, TEMP = E_K(RAND XOR OPc).
//! The five OUTn blocks are independent of each other once TEMP is known.
//!
//! Reference: 3GPP TS 35.206 V17.0.0

use tracing::{debug, trace};

use crate::aes::{Aes128Block, KEY_SIZE};
use crate::block::Block;
use crate::cipher::BlockCipher;
use crate::constants::{DiversificationConstants, RotationConstants};
use crate::error::{check_len, MilenageResult};
use crate::output::{self, OutputSet, AK_SIZE, CK_SIZE, IK_SIZE};

/// OP/OPc size in bytes (128 bits)
pub const OP_SIZE: usize = 16;

/// RAND size in bytes (128 bits)
pub const RAND_SIZE: usize = 16;

/// The four OUTn stages driven directly by TEMP
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// OUT2 (RES and AK), uses r2/c2
    Out2,
    /// OUT3 (CK), uses r3/c3
    Out3,
    /// OUT4 (IK), uses r4/c4
    Out4,
    /// OUT5 (AK*), uses r5/c5
    Out5,
}

impl Stage {
    /// All TEMP-driven stages in order
    pub const ALL: [Stage; 4] = [Stage::Out2, Stage::Out3, Stage::Out4, Stage::Out5];

    /// Zero-based index into the r/c constant sets
    pub const fn index(self) -> usize {
        match self {
            Stage::Out2 => 1,
            Stage::Out3 => 2,
            Stage::Out4 => 3,
            Stage::Out5 => 4,
        }
    }
}

/// Derive OPc from OP with a cipher keyed by K
///
/// OPc = OP XOR E_K(OP)
pub fn derive_opc<C: BlockCipher + ?Sized>(op: &Block, cipher: &C) -> MilenageResult<Block> {
    Ok(op.encrypt(cipher)?.xor(op))
}

/// Compute OPc from OP and K with AES-128
///
/// # Arguments
/// * `k` - 128-bit subscriber key
/// * `op` - 128-bit operator variant algorithm configuration field
pub fn compute_opc(k: &[u8; KEY_SIZE], op: &[u8; OP_SIZE]) -> [u8; OP_SIZE] {
    let op = Block::new(*op);
    let encrypted = Block::new(Aes128Block::new(k).encrypt_block_copy(op.as_bytes()));
    encrypted.xor(&op).to_bytes()
}

/// Milenage subscriber context
///
/// Holds OPc, the cipher keyed with K and the operator constants. The
/// context never changes after construction and may be shared between
/// threads (wrap it in an `Arc` for [`crate::evaluator::compute_all_parallel`]).
pub struct Milenage<C = Aes128Block> {
    cipher: C,
    opc: Block,
    r: RotationConstants,
    c: DiversificationConstants,
}

impl Milenage<Aes128Block> {
    /// Create a new AES-128 Milenage instance with K and OPc
    ///
    /// # Arguments
    /// * `k` - 128-bit subscriber key
    /// * `opc` - 128-bit OPc (pre-computed from OP)
    pub fn from_key(k: &[u8; KEY_SIZE], opc: &[u8; OP_SIZE]) -> Self {
        Self::new(Aes128Block::new(k), Block::new(*opc))
    }

    /// Create a new AES-128 Milenage instance with K and OP (computes OPc internally)
    pub fn from_key_with_op(k: &[u8; KEY_SIZE], op: &[u8; OP_SIZE]) -> Self {
        Self::from_key(k, &compute_opc(k, op))
    }

    /// Build an AES-128 context from a subscriber configuration
    ///
    /// Derives OPc when the configuration carries OP and applies any
    /// custom constants.
    pub fn from_config(
        config: &milenage_common::SubscriberConfig,
    ) -> Result<Self, milenage_common::Error> {
        let cipher = Aes128Block::new(&config.key);
        let op = Block::new(config.op);
        let opc = if config.needs_opc_derivation() {
            derive_opc(&op, &cipher)?
        } else {
            op
        };

        let r = match config.rotation {
            Some(values) => RotationConstants::from_array(values)?,
            None => RotationConstants::sample(),
        };
        let c = match &config.constants {
            Some([c1, c2, c3, c4, c5]) => DiversificationConstants::from_hex(c1, c2, c3, c4, c5)?,
            None => DiversificationConstants::sample(),
        };

        debug!(
            op_type = ?config.op_type,
            custom_r = config.rotation.is_some(),
            custom_c = config.constants.is_some(),
            "Milenage context loaded from configuration"
        );
        Ok(Self::with_constants(cipher, opc, r, c))
    }
}

impl<C: BlockCipher> Milenage<C> {
    /// Create a context with the sample constants
    pub fn new(cipher: C, opc: Block) -> Self {
        Self::with_constants(
            cipher,
            opc,
            RotationConstants::sample(),
            DiversificationConstants::sample(),
        )
    }

    /// Create a context from OP, deriving OPc with the same cipher
    pub fn with_op(cipher: C, op: &Block) -> MilenageResult<Self> {
        let opc = derive_opc(op, &cipher)?;
        Ok(Self::new(cipher, opc))
    }

    /// Create a context with operator-specific constants
    pub fn with_constants(
        cipher: C,
        opc: Block,
        r: RotationConstants,
        c: DiversificationConstants,
    ) -> Self {
        debug!(
            r = ?r.as_array(),
            sample_c = (c == DiversificationConstants::sample()),
            "Milenage context created"
        );
        Self { cipher, opc, r, c }
    }

    /// The OPc this context computes with
    pub fn opc(&self) -> &Block {
        &self.opc
    }

    /// The rotation constants r1..r5
    pub fn rotation_constants(&self) -> &RotationConstants {
        &self.r
    }

    /// The diversification constants c1..c5
    pub fn diversification_constants(&self) -> &DiversificationConstants {
        &self.c
    }

    /// The keyed cipher
    pub fn cipher(&self) -> &C {
        &self.cipher
    }

    /// Compute TEMP = E_K(RAND XOR OPc)
    pub fn temp(&self, rand: &Block) -> MilenageResult<Block> {
        rand.xor(&self.opc).encrypt(&self.cipher)
    }

    /// Compute OUT1 for f1/f1* (MAC-A/MAC-S)
    ///
    /// OUT1 = E_K(TEMP XOR rot(IN1 XOR OPc, r1) XOR c1) XOR OPc
    pub fn out1(&self, temp: &Block, in1: &Block) -> MilenageResult<Block> {
        let out = in1
            .xor(&self.opc)
            .rotate_left(i32::from(self.r_at(0)))?
            .xor(temp)
            .xor(&self.c_at(0))
            .encrypt(&self.cipher)?
            .xor(&self.opc);
        trace!(stage = "OUT1", "Milenage stage computed");
        Ok(out)
    }

    /// Compute OUT2..OUT5
    ///
    /// OUTn = E_K(rot(TEMP XOR OPc, rn) XOR cn) XOR OPc
    ///
    /// Unlike OUT1, TEMP itself is rotated here.
    pub fn out_x(&self, temp: &Block, stage: Stage) -> MilenageResult<Block> {
        let idx = stage.index();
        let out = temp
            .xor(&self.opc)
            .rotate_left(i32::from(self.r_at(idx)))?
            .xor(&self.c_at(idx))
            .encrypt(&self.cipher)?
            .xor(&self.opc);
        trace!(stage = ?stage, "Milenage stage computed");
        Ok(out)
    }

    /// f1 and f1*: MAC-A and MAC-S
    ///
    /// # Arguments
    /// * `rand` - 128-bit random challenge
    /// * `sqn` - 48-bit sequence number
    /// * `amf` - 16-bit authentication management field
    pub fn f1_f1_star(&self, rand: &[u8], sqn: &[u8], amf: &[u8]) -> MilenageResult<OutputSet> {
        let rand = rand_block(rand)?;
        let in1 = Block::in1(sqn, amf)?;
        let out1 = self.out1(&self.temp(&rand)?, &in1)?;
        output::assemble_f1(&out1)
    }

    /// f2 and f5: RES and AK
    pub fn f2_f5(&self, rand: &[u8]) -> MilenageResult<OutputSet> {
        let out2 = self.out_for(rand, Stage::Out2)?;
        output::assemble_f2_f5(&out2)
    }

    /// f3: CK
    pub fn f3(&self, rand: &[u8]) -> MilenageResult<[u8; CK_SIZE]> {
        Ok(self.out_for(rand, Stage::Out3)?.to_bytes())
    }

    /// f4: IK
    pub fn f4(&self, rand: &[u8]) -> MilenageResult<[u8; IK_SIZE]> {
        Ok(self.out_for(rand, Stage::Out4)?.to_bytes())
    }

    /// f5*: AK for re-synchronisation
    pub fn f5_star(&self, rand: &[u8]) -> MilenageResult<[u8; AK_SIZE]> {
        self.out_for(rand, Stage::Out5)?.take::<AK_SIZE>(0)
    }

    fn out_for(&self, rand: &[u8], stage: Stage) -> MilenageResult<Block> {
        let rand = rand_block(rand)?;
        self.out_x(&self.temp(&rand)?, stage)
    }

    fn r_at(&self, idx: usize) -> u8 {
        self.r.as_array()[idx]
    }

    fn c_at(&self, idx: usize) -> Block {
        self.c.get(idx).unwrap_or(Block::ZERO)
    }
}

impl<C> std::fmt::Debug for Milenage<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Milenage")
            .field("r", &self.r)
            .finish_non_exhaustive()
    }
}

/// Validate a RAND slice and turn it into a block
pub(crate) fn rand_block(rand: &[u8]) -> MilenageResult<Block> {
    check_len("RAND", rand, RAND_SIZE)?;
    Block::from_bytes(rand)
}
