use rand::RngCore;

/// Largest blob the chain accepts in one `submit_data` call (2 MiB).
pub const MAX_BLOB_SIZE: usize = 2 * 1024 * 1024;

/// `size` random bytes.
pub fn random_payload(size: usize) -> Vec<u8> {
    let mut payload = vec![0u8; size];
    rand::thread_rng().fill_bytes(&mut payload);
    payload
}

/// Text carried on chain for `payload`: its lower-case hex encoding.
pub fn encode_call_data(payload: &[u8]) -> Vec<u8> {
    hex::encode(payload).into_bytes()
}
