//! Subscriber configuration
//!
//! Describes the long-term parameters of one subscriber: the permanent key K,
//! the operator variant field (either OP or the pre-computed OPc), the default
//! AMF and, optionally, operator-specific Milenage constants.
//!
//! Byte fields are written as hex strings:
//!
//! ```yaml
//! key: 465b5ce8b199b49faa5f0a2ee238a6bc
//! op: cdc202d5123e20f62b6d676ac72cb318
//! op_type: Op
//! amf: b9b9
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Operator key type for authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[derive(Default)]
pub enum OpType {
    /// Operator key (OP) - needs to be converted to OPc
    Op,
    /// Operator key derived (OPc) - used directly
    #[default]
    Opc,
}

/// Per-subscriber Milenage configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriberConfig {
    /// Subscriber key K (128-bit)
    #[serde(with = "hex::serde")]
    pub key: [u8; 16],
    /// Operator key OP or OPc (128-bit)
    #[serde(with = "hex::serde")]
    pub op: [u8; 16],
    /// Type of operator key (OP or OPc)
    #[serde(default)]
    pub op_type: OpType,
    /// Authentication Management Field (16-bit)
    #[serde(with = "hex::serde", default = "default_amf")]
    pub amf: [u8; 2],
    /// Custom rotation constants r1..r5 (sample set when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<[u8; 5]>,
    /// Custom diversification constants c1..c5 as hex (sample set when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constants: Option<[String; 5]>,
}

fn default_amf() -> [u8; 2] {
    [0x80, 0x00]
}

impl Default for SubscriberConfig {
    fn default() -> Self {
        Self {
            key: [0u8; 16],
            op: [0u8; 16],
            op_type: OpType::default(),
            amf: default_amf(),
            rotation: None,
            constants: None,
        }
    }
}

impl SubscriberConfig {
    /// Returns true if the operator key must still be converted to OPc.
    pub fn needs_opc_derivation(&self) -> bool {
        self.op_type == OpType::Op
    }

    /// Parses a subscriber configuration from a YAML string.
    ///
    /// # Example
    /// ```
    /// use milenage_common::config::{OpType, SubscriberConfig};
    ///
    /// let yaml = r#"
    /// key: 465b5ce8b199b49faa5f0a2ee238a6bc
    /// op: cd63cb71954a9f4e48a5994e37a02baf
    /// "#;
    ///
    /// let config = SubscriberConfig::from_yaml(yaml).unwrap();
    /// assert_eq!(config.op_type, OpType::Opc);
    /// assert_eq!(config.amf, [0x80, 0x00]);
    /// ```
    pub fn from_yaml(yaml: &str) -> Result<Self, Error> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Loads a subscriber configuration from a YAML file.
    ///
    /// # Example
    /// ```no_run
    /// use milenage_common::config::SubscriberConfig;
    ///
    /// let config = SubscriberConfig::from_yaml_file("config/subscriber.yaml").unwrap();
    /// ```
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Serializes the configuration to a YAML string.
    pub fn to_yaml(&self) -> Result<String, Error> {
        Ok(serde_yaml::to_string(self)?)
    }
}
