//! Authenticated encryption of payloads before framing.
//!
//! Two schemes are supported. [`CipherScheme::AesEax`] produces the fixed
//! layout `nonce(16) ‖ tag(16) ‖ ciphertext` with the AES variant selected
//! by key length. [`CipherScheme::Fernet`] produces an opaque
//! self-authenticating token whose length depends on the payload. Both
//! decrypt back to the original payload or fail closed, unauthenticated
//! plaintext is never returned.

use aes::{Aes128, Aes192, Aes256};
use base64::engine::general_purpose::URL_SAFE;
use base64::Engine as _;
use eax::aead::generic_array::typenum::U16;
use eax::aead::generic_array::GenericArray;
use eax::aead::{AeadCore, AeadInPlace, KeyInit};
use eax::Eax;
use fernet::Fernet;
use log::debug;
use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::StegoError;
use crate::result::Result;

/// byte width of the AEAD nonce
pub const NONCE_LEN: usize = 16;
/// byte width of the AEAD tag
pub const TAG_LEN: usize = 16;
/// exact key width the token scheme accepts
pub const TOKEN_KEY_LEN: usize = 32;

/// selects how a payload is authenticated and encrypted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CipherScheme {
    /// AES-EAX with a fresh 16-byte nonce per call, key length in {16, 24, 32}
    #[default]
    AesEax,
    /// Fernet token encoding, version-tagged and self-authenticating, 32-byte key
    Fernet,
}

/// Encrypts `plaintext` under `key` with the given scheme.
///
/// The only side effect is consuming entropy for the nonce; the nonce is
/// never reused for a given key.
pub fn encrypt(plaintext: &[u8], key: &[u8], scheme: CipherScheme) -> Result<Vec<u8>> {
    let blob = match scheme {
        CipherScheme::AesEax => match key.len() {
            16 => seal::<Eax<Aes128>>(key, plaintext),
            24 => seal::<Eax<Aes192>>(key, plaintext),
            32 => seal::<Eax<Aes256>>(key, plaintext),
            n => Err(StegoError::InvalidKeyLength(n)),
        },
        CipherScheme::Fernet => {
            let cipher = token_cipher(key)?;
            Ok(cipher.encrypt(plaintext).into_bytes())
        }
    }?;

    debug!(
        "sealed {} payload bytes into a {} byte blob",
        plaintext.len(),
        blob.len()
    );
    Ok(blob)
}

/// Decrypts a blob produced by [`encrypt`].
///
/// Fails with [`StegoError::AuthenticationFailure`] on a wrong key, a
/// corrupted blob, or truncated input. No retry makes sense for the caller,
/// the same key and blob cannot suddenly verify.
pub fn decrypt(blob: &[u8], key: &[u8], scheme: CipherScheme) -> Result<Vec<u8>> {
    match scheme {
        CipherScheme::AesEax => match key.len() {
            16 => open::<Eax<Aes128>>(key, blob),
            24 => open::<Eax<Aes192>>(key, blob),
            32 => open::<Eax<Aes256>>(key, blob),
            n => Err(StegoError::InvalidKeyLength(n)),
        },
        CipherScheme::Fernet => {
            let cipher = token_cipher(key)?;
            let token =
                std::str::from_utf8(blob).map_err(|_| StegoError::AuthenticationFailure)?;
            cipher
                .decrypt(token)
                .map_err(|_| StegoError::AuthenticationFailure)
        }
    }
}

fn seal<C>(key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>>
where
    C: KeyInit + AeadInPlace + AeadCore<NonceSize = U16, TagSize = U16>,
{
    let cipher = C::new_from_slice(key).map_err(|_| StegoError::InvalidKeyLength(key.len()))?;

    let mut nonce = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce);

    let mut buffer = plaintext.to_vec();
    let tag = cipher
        .encrypt_in_place_detached(GenericArray::from_slice(&nonce), b"", &mut buffer)
        .map_err(|_| StegoError::EncryptionFailure)?;

    let mut blob = Vec::with_capacity(NONCE_LEN + TAG_LEN + buffer.len());
    blob.extend_from_slice(&nonce);
    blob.extend_from_slice(&tag);
    blob.extend_from_slice(&buffer);
    Ok(blob)
}

fn open<C>(key: &[u8], blob: &[u8]) -> Result<Vec<u8>>
where
    C: KeyInit + AeadInPlace + AeadCore<NonceSize = U16, TagSize = U16>,
{
    // fail closed before touching any offsets
    if blob.len() < NONCE_LEN + TAG_LEN {
        return Err(StegoError::AuthenticationFailure);
    }
    let cipher = C::new_from_slice(key).map_err(|_| StegoError::InvalidKeyLength(key.len()))?;

    let (nonce, rest) = blob.split_at(NONCE_LEN);
    let (tag, ciphertext) = rest.split_at(TAG_LEN);

    let mut buffer = ciphertext.to_vec();
    cipher
        .decrypt_in_place_detached(
            GenericArray::from_slice(nonce),
            b"",
            &mut buffer,
            GenericArray::from_slice(tag),
        )
        .map_err(|_| StegoError::AuthenticationFailure)?;
    Ok(buffer)
}

fn token_cipher(key: &[u8]) -> Result<Fernet> {
    if key.len() != TOKEN_KEY_LEN {
        return Err(StegoError::InvalidTokenKey(key.len()));
    }
    Fernet::new(&URL_SAFE.encode(key)).ok_or(StegoError::InvalidTokenKey(key.len()))
}
