//! PDF encryption for written documents.
//!
//! Implements the standard security handler (ISO 32000-1:2008, Section 7.6)
//! for the two algorithms the writer produces:
//!
//! - RC4 with a 128-bit key (V=2, R=3)
//! - AES-128 in CBC mode (V=4, R=4), the default
//!
//! Strings and streams are encrypted per object at write time. The
//! encryption dictionary itself and the XML metadata stream are never
//! encrypted. A document with a cleartext metadata stream is written as
//! V=4, R=4 with `/EncryptMetadata false`, using the `/V2` (RC4) crypt
//! filter when RC4 was requested, since V=2 cannot express the flag.
//!
//! # References
//!
//! - PDF Spec Section 7.6.2: General Encryption Algorithm
//! - PDF Spec Section 7.6.3: Standard Security Handler

use crate::dictionary::Dictionary;
use crate::object::Object;
use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};

mod aes;
mod algorithms;
mod rc4;
mod write_handler;

pub use write_handler::EncryptionWriteHandler;

/// Encryption algorithm for a written document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EncryptionAlgorithm {
    /// RC4 with a 128-bit key (PDF 1.4, V=2, R=3)
    Rc4_128,
    /// AES with a 128-bit key in CBC mode (PDF 1.6, V=4, R=4)
    #[default]
    Aes128,
}

impl EncryptionAlgorithm {
    /// Key length in bytes.
    pub fn key_length(&self) -> usize {
        16
    }

    /// (V, R) pair written to the encryption dictionary.
    pub fn version_revision(&self) -> (u32, u32) {
        match self {
            EncryptionAlgorithm::Rc4_128 => (2, 3),
            EncryptionAlgorithm::Aes128 => (4, 4),
        }
    }

    /// Check if this is an AES algorithm.
    pub fn is_aes(&self) -> bool {
        matches!(self, EncryptionAlgorithm::Aes128)
    }
}

/// User access permissions (P entry).
///
/// PDF Spec: Table 22 - User access permissions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Permissions {
    /// Allow printing the document.
    pub print: bool,
    /// Allow high-resolution printing.
    pub print_high_quality: bool,
    /// Allow modifying the document contents.
    pub modify: bool,
    /// Allow copying or extracting text and graphics.
    pub copy: bool,
    /// Allow adding annotations and form fields.
    pub annotate: bool,
    /// Allow filling in form fields.
    pub fill_forms: bool,
    /// Allow extracting content for accessibility.
    pub accessibility: bool,
    /// Allow document assembly (insert, rotate, delete pages).
    pub assemble: bool,
}

impl Permissions {
    /// Create with all permissions granted.
    pub fn all() -> Self {
        Self {
            print: true,
            print_high_quality: true,
            modify: true,
            copy: true,
            annotate: true,
            fill_forms: true,
            accessibility: true,
            assemble: true,
        }
    }

    /// View only (accessibility extraction stays allowed).
    pub fn read_only() -> Self {
        Self {
            accessibility: true,
            ..Default::default()
        }
    }

    /// Convert to the signed 32-bit P value.
    ///
    /// Bits 7-8 and 13-32 are reserved and always set.
    pub fn to_bits(&self) -> i32 {
        let mut bits: u32 = 0xFFFF_F0C0;
        let flags = [
            (self.print, 2),
            (self.modify, 3),
            (self.copy, 4),
            (self.annotate, 5),
            (self.fill_forms, 8),
            (self.accessibility, 9),
            (self.assemble, 10),
            (self.print_high_quality, 11),
        ];
        for (enabled, bit) in flags {
            if enabled {
                bits |= 1 << bit;
            }
        }
        bits as i32
    }
}

/// Passwords, algorithm and permissions for an encrypted document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncryptionConfig {
    /// Password required to open the document (can be empty).
    pub user_password: String,
    /// Password for full access. Falls back to the user password when empty.
    pub owner_password: String,
    /// Encryption algorithm to use.
    pub algorithm: EncryptionAlgorithm,
    /// Permission flags when opened with the user password.
    pub permissions: Permissions,
}

impl Default for EncryptionConfig {
    fn default() -> Self {
        Self {
            user_password: String::new(),
            owner_password: String::new(),
            algorithm: EncryptionAlgorithm::default(),
            permissions: Permissions::all(),
        }
    }
}

impl EncryptionConfig {
    /// Create a new encryption config with the given passwords.
    pub fn new(user_password: impl Into<String>, owner_password: impl Into<String>) -> Self {
        Self {
            user_password: user_password.into(),
            owner_password: owner_password.into(),
            ..Default::default()
        }
    }

    /// Set the encryption algorithm.
    pub fn with_algorithm(mut self, algorithm: EncryptionAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Set the permissions.
    pub fn with_permissions(mut self, permissions: Permissions) -> Self {
        self.permissions = permissions;
        self
    }
}

/// Generate a 16-byte document identifier.
///
/// MD5 over a random UUID and the current time.
pub fn generate_file_id() -> [u8; 16] {
    let mut hasher = Md5::new();
    hasher.update(uuid::Uuid::new_v4().as_bytes());
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    hasher.update(now.as_nanos().to_le_bytes());
    let mut id = [0u8; 16];
    id.copy_from_slice(&hasher.finalize());
    id
}

/// Standard security handler state for one document.
///
/// Holds the O, U and P values and the write handler derived from the
/// document key.
#[derive(Debug)]
pub(crate) struct StandardSecurity {
    algorithm: EncryptionAlgorithm,
    version: u32,
    revision: u32,
    encrypt_metadata: bool,
    owner_hash: Vec<u8>,
    user_hash: Vec<u8>,
    permissions: i32,
    handler: EncryptionWriteHandler,
}

impl StandardSecurity {
    /// Derive the security values from a config and the document id.
    ///
    /// `encrypt_metadata` is false when the document carries a metadata
    /// stream that is written in cleartext.
    pub(crate) fn new(config: &EncryptionConfig, file_id: &[u8], encrypt_metadata: bool) -> Self {
        let algorithm = config.algorithm;
        let (version, revision) = if encrypt_metadata {
            algorithm.version_revision()
        } else {
            (4, 4)
        };
        let key_length = algorithm.key_length();
        let permissions = config.permissions.to_bits();

        let owner_hash = algorithms::compute_owner_password_hash(
            config.owner_password.as_bytes(),
            config.user_password.as_bytes(),
            revision,
            key_length,
        );
        let key = algorithms::compute_encryption_key(
            config.user_password.as_bytes(),
            &owner_hash,
            permissions,
            file_id,
            revision,
            key_length,
            encrypt_metadata,
        );
        let user_hash = algorithms::compute_user_password_hash(&key, file_id, revision);

        log::info!("Encryption enabled: {:?} (R{})", algorithm, revision);

        Self {
            algorithm,
            version,
            revision,
            encrypt_metadata,
            owner_hash,
            user_hash,
            permissions,
            handler: EncryptionWriteHandler::from_key(key, algorithm),
        }
    }

    /// Object-level cipher.
    pub(crate) fn handler(&self) -> &EncryptionWriteHandler {
        &self.handler
    }

    /// Build the `/Encrypt` dictionary.
    pub(crate) fn encrypt_dictionary(&self) -> Dictionary {
        let mut dict = Dictionary::new();
        dict.add_name("Filter", "Standard");
        dict.add_integer("V", i64::from(self.version));
        dict.add_integer("R", i64::from(self.revision));
        dict.add_integer("Length", (self.algorithm.key_length() * 8) as i64);

        if self.version >= 4 {
            let method = if self.algorithm.is_aes() { "AESV2" } else { "V2" };
            let mut std_cf = Dictionary::new();
            std_cf.add_name("CFM", method);
            std_cf.add_integer("Length", self.algorithm.key_length() as i64);
            std_cf.add_name("AuthEvent", "DocOpen");
            let mut cf = Dictionary::new();
            cf.add_dictionary("StdCF", std_cf);
            dict.add_dictionary("CF", cf);
            dict.add_name("StmF", "StdCF");
            dict.add_name("StrF", "StdCF");
            if !self.encrypt_metadata {
                dict.add_boolean("EncryptMetadata", false);
            }
        }

        dict.insert("O", Object::HexString(self.owner_hash.clone()));
        dict.insert("U", Object::HexString(self.user_hash.clone()));
        dict.add_integer("P", i64::from(self.permissions));
        dict
    }
}
