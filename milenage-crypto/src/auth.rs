//! AUTN and AUTS handling (3GPP TS 33.102 section 6.3)
//!
//! - AUTN = (SQN XOR AK) || AMF || MAC-A
//! - AUTS = (SQN_MS XOR AK*) || MAC-S, with MAC-S computed over AMF 0x0000

use milenage_common::HexDump;
use tracing::debug;

use crate::block::{Block, AMF_SIZE, SQN_SIZE};
use crate::cipher::BlockCipher;
use crate::error::{check_len, MilenageError, MilenageResult};
use crate::milenage::{rand_block, Milenage, Stage};
use crate::output::{AK_SIZE, MAC_SIZE};

/// AUTN size in bytes
pub const AUTN_SIZE: usize = SQN_SIZE + AMF_SIZE + MAC_SIZE;

/// AUTS size in bytes
pub const AUTS_SIZE: usize = SQN_SIZE + MAC_SIZE;

/// AMF used for MAC-S during re-synchronisation
pub const RESYNC_AMF: [u8; AMF_SIZE] = [0x00, 0x00];

impl<C: BlockCipher> Milenage<C> {
    /// Build the network authentication token for a challenge
    ///
    /// # Arguments
    /// * `rand` - 128-bit random challenge
    /// * `sqn` - 48-bit sequence number
    /// * `amf` - 16-bit authentication management field
    pub fn generate_autn(&self, rand: &[u8], sqn: &[u8], amf: &[u8]) -> MilenageResult<[u8; AUTN_SIZE]> {
        let rand = rand_block(rand)?;
        let in1 = Block::in1(sqn, amf)?;
        let temp = self.temp(&rand)?;

        let mac_a = self.out1(&temp, &in1)?.take::<MAC_SIZE>(0)?;
        let ak = self.out_x(&temp, Stage::Out2)?.take::<AK_SIZE>(0)?;

        let mut autn = [0u8; AUTN_SIZE];
        autn[..SQN_SIZE].copy_from_slice(&xor_sqn(sqn, &ak));
        autn[SQN_SIZE..SQN_SIZE + AMF_SIZE].copy_from_slice(amf);
        autn[SQN_SIZE + AMF_SIZE..].copy_from_slice(&mac_a);
        Ok(autn)
    }

    /// Check an AUTN received from the network and recover its SQN
    ///
    /// # Errors
    /// Returns [`MilenageError::MacMismatch`] if MAC-A does not match.
    pub fn verify_autn(&self, rand: &[u8], autn: &[u8]) -> MilenageResult<[u8; SQN_SIZE]> {
        check_len("AUTN", autn, AUTN_SIZE)?;
        let rand = rand_block(rand)?;
        let temp = self.temp(&rand)?;

        let ak = self.out_x(&temp, Stage::Out2)?.take::<AK_SIZE>(0)?;
        let sqn = xor_sqn(&autn[..SQN_SIZE], &ak);
        let amf = &autn[SQN_SIZE..SQN_SIZE + AMF_SIZE];

        let in1 = Block::in1(&sqn, amf)?;
        let xmac = self.out1(&temp, &in1)?.take::<MAC_SIZE>(0)?;
        if !mac_eq(&xmac, &autn[SQN_SIZE + AMF_SIZE..]) {
            debug!(autn = %HexDump(autn), "AUTN MAC-A mismatch");
            return Err(MilenageError::MacMismatch);
        }

        debug!(sqn = %HexDump(&sqn), "AUTN verified");
        Ok(sqn)
    }

    /// Build the re-synchronisation token for the subscriber's SQN
    pub fn generate_auts(&self, rand: &[u8], sqn_ms: &[u8]) -> MilenageResult<[u8; AUTS_SIZE]> {
        let rand = rand_block(rand)?;
        let in1 = Block::in1(sqn_ms, &RESYNC_AMF)?;
        let temp = self.temp(&rand)?;

        let ak_star = self.out_x(&temp, Stage::Out5)?.take::<AK_SIZE>(0)?;
        let mac_s = self.out1(&temp, &in1)?.take::<MAC_SIZE>(MAC_SIZE)?;

        let mut auts = [0u8; AUTS_SIZE];
        auts[..SQN_SIZE].copy_from_slice(&xor_sqn(sqn_ms, &ak_star));
        auts[SQN_SIZE..].copy_from_slice(&mac_s);
        Ok(auts)
    }

    /// Check an AUTS received from the subscriber and recover SQN_MS
    ///
    /// # Errors
    /// Returns [`MilenageError::MacMismatch`] if MAC-S does not match.
    pub fn resync_sqn(&self, rand: &[u8], auts: &[u8]) -> MilenageResult<[u8; SQN_SIZE]> {
        check_len("AUTS", auts, AUTS_SIZE)?;
        let rand = rand_block(rand)?;
        let temp = self.temp(&rand)?;

        let ak_star = self.out_x(&temp, Stage::Out5)?.take::<AK_SIZE>(0)?;
        let sqn_ms = xor_sqn(&auts[..SQN_SIZE], &ak_star);

        let in1 = Block::in1(&sqn_ms, &RESYNC_AMF)?;
        let xmac_s = self.out1(&temp, &in1)?.take::<MAC_SIZE>(MAC_SIZE)?;
        if !mac_eq(&xmac_s, &auts[SQN_SIZE..]) {
            debug!(auts = %HexDump(auts), "AUTS MAC-S mismatch");
            return Err(MilenageError::MacMismatch);
        }

        debug!(sqn_ms = %HexDump(&sqn_ms), "AUTS verified");
        Ok(sqn_ms)
    }
}

/// XOR a (length-checked) SQN with an anonymity key
fn xor_sqn(sqn: &[u8], ak: &[u8; AK_SIZE]) -> [u8; SQN_SIZE] {
    let mut out = [0u8; SQN_SIZE];
    for ((o, s), a) in out.iter_mut().zip(sqn).zip(ak) {
        *o = s ^ a;
    }
    out
}

/// Compare MACs without an early exit
fn mac_eq(expected: &[u8], received: &[u8]) -> bool {
    expected.len() == received.len()
        && expected
            .iter()
            .zip(received)
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}
