//! Milenage outputs and result assembly
//!
//! Each OUTn block is cut into the named outputs at the fixed offsets of
//! 3GPP TS 35.206 section 4.1:
//!
//! | Block | Output     | Bytes  |
//! |-------|------------|--------|
//! | OUT1  | MAC-A      | 0..8   |
//! | OUT1  | MAC-S      | 8..16  |
//! | OUT2  | AK         | 0..6   |
//! | OUT2  | RES        | 8..16  |
//! | OUT3  | CK         | 0..16  |
//! | OUT4  | IK         | 0..16  |
//! | OUT5  | AK*        | 0..6   |

use std::collections::BTreeMap;
use std::fmt;

use crate::block::Block;
use crate::error::MilenageResult;

/// MAC size in bytes (64 bits)
pub const MAC_SIZE: usize = 8;

/// RES size in bytes (64 bits)
pub const RES_SIZE: usize = 8;

/// CK size in bytes (128 bits)
pub const CK_SIZE: usize = 16;

/// IK size in bytes (128 bits)
pub const IK_SIZE: usize = 16;

/// AK size in bytes (48 bits)
pub const AK_SIZE: usize = 6;

const MAC_A_RANGE: (usize, usize) = (0, MAC_SIZE);
const MAC_S_RANGE: (usize, usize) = (MAC_SIZE, 16);
const AK_RANGE: (usize, usize) = (0, AK_SIZE);
const RES_RANGE: (usize, usize) = (8, 8 + RES_SIZE);
const FULL_RANGE: (usize, usize) = (0, 16);

/// The seven named Milenage outputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Output {
    /// f1: network authentication code
    MacA,
    /// f1*: resynchronisation authentication code
    MacS,
    /// f2: expected response
    Res,
    /// f3: confidentiality key
    Ck,
    /// f4: integrity key
    Ik,
    /// f5: anonymity key
    Ak,
    /// f5*: resynchronisation anonymity key
    AkResync,
}

impl Output {
    /// All outputs in enumeration order
    pub const ALL: [Output; 7] = [
        Output::MacA,
        Output::MacS,
        Output::Res,
        Output::Ck,
        Output::Ik,
        Output::Ak,
        Output::AkResync,
    ];

    /// Length of this output in bytes
    pub const fn len(self) -> usize {
        match self {
            Output::MacA | Output::MacS => MAC_SIZE,
            Output::Res => RES_SIZE,
            Output::Ck => CK_SIZE,
            Output::Ik => IK_SIZE,
            Output::Ak | Output::AkResync => AK_SIZE,
        }
    }

    /// Name of the Milenage function producing this output
    pub const fn function(self) -> &'static str {
        match self {
            Output::MacA => "f1",
            Output::MacS => "f1*",
            Output::Res => "f2",
            Output::Ck => "f3",
            Output::Ik => "f4",
            Output::Ak => "f5",
            Output::AkResync => "f5*",
        }
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Output::MacA => "MAC-A",
            Output::MacS => "MAC-S",
            Output::Res => "RES",
            Output::Ck => "CK",
            Output::Ik => "IK",
            Output::Ak => "AK",
            Output::AkResync => "AK*",
        };
        f.write_str(name)
    }
}

/// A labelled set of Milenage outputs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputSet {
    values: BTreeMap<Output, Vec<u8>>,
}

impl OutputSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes of one output, if present
    pub fn get(&self, output: Output) -> Option<&[u8]> {
        self.values.get(&output).map(Vec::as_slice)
    }

    /// Returns true if the output is present
    pub fn contains(&self, output: Output) -> bool {
        self.values.contains_key(&output)
    }

    /// Number of outputs present
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no output is present
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns true if all seven outputs are present
    pub fn is_complete(&self) -> bool {
        self.values.len() == Output::ALL.len()
    }

    /// Iterate outputs in enumeration order
    pub fn iter(&self) -> impl Iterator<Item = (Output, &[u8])> {
        self.values.iter().map(|(k, v)| (*k, v.as_slice()))
    }

    fn insert(&mut self, output: Output, bytes: Vec<u8>) {
        debug_assert_eq!(bytes.len(), output.len());
        self.values.insert(output, bytes);
    }

    fn merge(&mut self, other: OutputSet) {
        self.values.extend(other.values);
    }
}

impl IntoIterator for OutputSet {
    type Item = (Output, Vec<u8>);
    type IntoIter = std::collections::btree_map::IntoIter<Output, Vec<u8>>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

/// MAC-A and MAC-S from OUT1
pub fn assemble_f1(out1: &Block) -> MilenageResult<OutputSet> {
    let mut parts = out1.slice(&[MAC_A_RANGE, MAC_S_RANGE])?.into_iter();
    let mut set = OutputSet::new();
    if let (Some(mac_a), Some(mac_s)) = (parts.next(), parts.next()) {
        set.insert(Output::MacA, mac_a);
        set.insert(Output::MacS, mac_s);
    }
    Ok(set)
}

/// AK and RES from OUT2
pub fn assemble_f2_f5(out2: &Block) -> MilenageResult<OutputSet> {
    let mut parts = out2.slice(&[AK_RANGE, RES_RANGE])?.into_iter();
    let mut set = OutputSet::new();
    if let (Some(ak), Some(res)) = (parts.next(), parts.next()) {
        set.insert(Output::Ak, ak);
        set.insert(Output::Res, res);
    }
    Ok(set)
}

/// CK from OUT3
pub fn assemble_f3(out3: &Block) -> MilenageResult<OutputSet> {
    assemble_single(out3, Output::Ck, FULL_RANGE)
}

/// IK from OUT4
pub fn assemble_f4(out4: &Block) -> MilenageResult<OutputSet> {
    assemble_single(out4, Output::Ik, FULL_RANGE)
}

/// AK* from OUT5
pub fn assemble_f5_star(out5: &Block) -> MilenageResult<OutputSet> {
    assemble_single(out5, Output::AkResync, AK_RANGE)
}

fn assemble_single(block: &Block, output: Output, range: (usize, usize)) -> MilenageResult<OutputSet> {
    let mut set = OutputSet::new();
    if let Some(bytes) = block.slice(&[range])?.pop() {
        set.insert(output, bytes);
    }
    Ok(set)
}

/// Assemble all seven outputs from OUT1..OUT5
pub fn assemble_all(outs: &[Block; 5]) -> MilenageResult<OutputSet> {
    let [out1, out2, out3, out4, out5] = outs;
    let mut set = assemble_f1(out1)?;
    set.merge(assemble_f2_f5(out2)?);
    set.merge(assemble_f3(out3)?);
    set.merge(assemble_f4(out4)?);
    set.merge(assemble_f5_star(out5)?);
    Ok(set)
}
