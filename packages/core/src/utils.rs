// ABOUTME: Shared utility functions for Dealdraft
// ABOUTME: Request id generation

/// Generate a unique request ID (8-character alphanumeric)
pub fn generate_request_id() -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
    let mut rng = rand::thread_rng();
    (0..8)
        .map(|_| {
            let idx = rng.gen_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}
