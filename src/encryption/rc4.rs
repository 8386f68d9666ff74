//! RC4 stream cipher.
//!
//! Used by the RC4-128 algorithm and by the O/U value algorithms of the
//! standard security handler.

/// Encrypt or decrypt data using RC4.
///
/// RC4 is symmetric, so encryption and decryption are the same operation.
pub fn rc4_crypt(key: &[u8], data: &[u8]) -> Vec<u8> {
    if key.is_empty() {
        return data.to_vec();
    }

    // key scheduling
    let mut state: [u8; 256] = std::array::from_fn(|i| i as u8);
    let mut j = 0u8;
    for i in 0..256 {
        j = j.wrapping_add(state[i]).wrapping_add(key[i % key.len()]);
        state.swap(i, j as usize);
    }

    let (mut i, mut j) = (0u8, 0u8);
    data.iter()
        .map(|&byte| {
            i = i.wrapping_add(1);
            j = j.wrapping_add(state[i as usize]);
            state.swap(i as usize, j as usize);
            let k = state[i as usize].wrapping_add(state[j as usize]);
            byte ^ state[k as usize]
        })
        .collect()
}
