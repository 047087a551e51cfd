//! Lobby id generation.
//!
//! Ids are 12-character strings over Crockford's Base32 alphabet.

use rand::Rng;

const CROCKFORD: &[u8] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ"; // no I, L, O, U
pub const LOBBY_ID_LEN: usize = 12;

/// Random lobby id drawn from the thread-local CSPRNG.
pub fn generate_lobby_id() -> String {
    let mut rng = rand::rng();
    (0..LOBBY_ID_LEN)
        .map(|_| CROCKFORD[rng.random_range(0..CROCKFORD.len())] as char)
        .collect()
}

/// Draw ids until `is_free` accepts one.
pub fn generate_unique_lobby_id(is_free: impl Fn(&str) -> bool) -> String {
    loop {
        let id = generate_lobby_id();
        if is_free(&id) {
            return id;
        }
    }
}
