//! Standard security handler algorithms for revisions 3 and 4.
//!
//! PDF Spec: Section 7.6.3.3 - Algorithms 2, 3 and 5

use md5::{Digest, Md5};

/// Padding string used in PDF encryption (32 bytes).
///
/// PDF Spec: Algorithm 2, step 1
const PADDING: &[u8; 32] = b"\x28\xBF\x4E\x5E\x4E\x75\x8A\x41\
                              \x64\x00\x4E\x56\xFF\xFA\x01\x08\
                              \x2E\x2E\x00\xB6\xD0\x68\x3E\x80\
                              \x2F\x0C\xA9\xFE\x64\x53\x69\x7A";

/// Pad or truncate a password to exactly 32 bytes.
pub fn pad_password(password: &[u8]) -> [u8; 32] {
    let mut padded = [0u8; 32];
    let len = password.len().min(32);
    padded[..len].copy_from_slice(&password[..len]);
    padded[len..].copy_from_slice(&PADDING[..32 - len]);
    padded
}

/// Hash `seed` once, then 50 more times over the first `key_length` bytes.
fn md5_stretch(seed: &[u8], key_length: usize) -> Vec<u8> {
    let mut hash = Md5::digest(seed).to_vec();
    for _ in 0..50 {
        hash = Md5::digest(&hash[..key_length]).to_vec();
    }
    hash.truncate(key_length);
    hash
}

/// RC4 over `data` 20 times, with the key XOR-ed by the round number.
fn rc4_rounds(key: &[u8], data: &[u8], first_round: u8) -> Vec<u8> {
    let mut result = data.to_vec();
    for round in first_round..20 {
        let round_key: Vec<u8> = key.iter().map(|b| b ^ round).collect();
        result = super::rc4::rc4_crypt(&round_key, &result);
    }
    result
}

/// Compute the document encryption key (Algorithm 2).
///
/// For R4 with cleartext metadata, four `0xFF` bytes are hashed after the
/// file id (step f).
pub fn compute_encryption_key(
    password: &[u8],
    owner_hash: &[u8],
    permissions: i32,
    file_id: &[u8],
    revision: u32,
    key_length: usize,
    encrypt_metadata: bool,
) -> Vec<u8> {
    let key_length = key_length.min(16);
    let mut seed = Vec::with_capacity(32 + owner_hash.len() + 4 + file_id.len());
    seed.extend_from_slice(&pad_password(password));
    seed.extend_from_slice(owner_hash);
    seed.extend_from_slice(&permissions.to_le_bytes());
    seed.extend_from_slice(file_id);
    if revision >= 4 && !encrypt_metadata {
        seed.extend_from_slice(&[0xFF; 4]);
    }

    if revision >= 3 {
        md5_stretch(&seed, key_length)
    } else {
        Md5::digest(&seed)[..key_length].to_vec()
    }
}

/// Compute the O value (Algorithm 3).
///
/// An empty owner password falls back to the user password.
pub fn compute_owner_password_hash(
    owner_password: &[u8],
    user_password: &[u8],
    revision: u32,
    key_length: usize,
) -> Vec<u8> {
    let password = if owner_password.is_empty() {
        user_password
    } else {
        owner_password
    };
    let key_length = key_length.min(16);

    let rc4_key = if revision >= 3 {
        md5_stretch(&pad_password(password), key_length)
    } else {
        Md5::digest(pad_password(password))[..key_length].to_vec()
    };

    let first = super::rc4::rc4_crypt(&rc4_key, &pad_password(user_password));
    if revision >= 3 {
        rc4_rounds(&rc4_key, &first, 1)
    } else {
        first
    }
}

/// Compute the U value (Algorithm 4 for R2, Algorithm 5 for R3/R4).
pub fn compute_user_password_hash(encryption_key: &[u8], file_id: &[u8], revision: u32) -> Vec<u8> {
    if revision < 3 {
        return super::rc4::rc4_crypt(encryption_key, PADDING);
    }

    let mut hasher = Md5::new();
    hasher.update(PADDING);
    hasher.update(file_id);
    let digest = hasher.finalize();

    let mut hash = rc4_rounds(encryption_key, &digest, 0);
    // 16 arbitrary bytes of padding
    hash.extend_from_slice(&[0u8; 16]);
    hash
}
