//! Milenage authentication and key generation for 3GPP networks
//!
//! Implements the f1, f1*, f2, f3, f4, f5 and f5* functions of
//! 3GPP TS 35.206 on top of an abstract single-block cipher, plus:
//! - OPc derivation
//! - Operator-specific rotation and diversification constants
//! - Sequential or parallel batch evaluation of all outputs
//! - AUTN/AUTS generation and verification
//!
//! # Example
//!
//! ```
//! use milenage_crypto::{Milenage, Output};
//!
//! let k = hex::decode("465b5ce8b199b49faa5f0a2ee238a6bc").unwrap();
//! let op = hex::decode("cdc202d5123e20f62b6d676ac72cb318").unwrap();
//! let milenage = Milenage::from_key_with_op(
//!     &k.try_into().unwrap(),
//!     &op.try_into().unwrap(),
//! );
//!
//! let rand = hex::decode("23553cbe9637a89d218ae64dae47bf35").unwrap();
//! let outputs = milenage.f2_f5(&rand).unwrap();
//! assert_eq!(outputs.get(Output::Res).unwrap(), hex::decode("a54211d5e3ba50bf").unwrap());
//! ```

pub mod aes;
pub mod auth;
pub mod block;
pub mod cipher;
pub mod constants;
pub mod error;
pub mod evaluator;
pub mod milenage;
pub mod output;

pub use aes::Aes128Block;
pub use auth::{AUTN_SIZE, AUTS_SIZE, RESYNC_AMF};
pub use block::Block;
pub use cipher::{BlockCipher, BLOCK_SIZE};
pub use constants::{DiversificationConstants, RotationConstants};
pub use error::{MilenageError, MilenageResult};
pub use evaluator::{compute_all_parallel, Dispatch, Evaluator};
pub use milenage::{compute_opc, derive_opc, Milenage, Stage};
pub use output::{Output, OutputSet};
