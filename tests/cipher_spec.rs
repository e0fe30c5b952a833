use stegolsb::cipher::{decrypt, encrypt, NONCE_LEN, TAG_LEN, TOKEN_KEY_LEN};
use stegolsb::{CipherScheme, StegoError};

const MSG: &[u8] = b"what happens in the LSBs stays in the LSBs";

#[test]
fn aead_blob_has_the_fixed_layout() {
    for len in [16usize, 24, 32] {
        let key = vec![0x42u8; len];
        let blob = encrypt(MSG, &key, CipherScheme::AesEax).unwrap();
        // nonce ‖ tag ‖ ciphertext, ciphertext as long as the plaintext
        assert_eq!(blob.len(), NONCE_LEN + TAG_LEN + MSG.len());
        assert_eq!(decrypt(&blob, &key, CipherScheme::AesEax).unwrap(), MSG);
    }
}

#[test]
fn token_blob_is_version_tagged_and_payload_dependent() {
    let key = [0x24u8; TOKEN_KEY_LEN];
    let short = encrypt(b"a", &key, CipherScheme::Fernet).unwrap();
    let long = encrypt(&[0u8; 256], &key, CipherScheme::Fernet).unwrap();

    // Fernet tokens carry version byte 0x80, 'g' once base64url encoded
    assert_eq!(short[0], b'g');
    assert_eq!(long[0], b'g');
    assert!(long.len() > short.len());
}

#[test]
fn schemes_are_not_interchangeable() {
    let key = [0x42u8; 32];
    let aead_blob = encrypt(MSG, &key, CipherScheme::AesEax).unwrap();
    assert!(matches!(
        decrypt(&aead_blob, &key, CipherScheme::Fernet),
        Err(StegoError::AuthenticationFailure)
    ));

    let token_blob = encrypt(MSG, &key, CipherScheme::Fernet).unwrap();
    assert!(matches!(
        decrypt(&token_blob, &key, CipherScheme::AesEax),
        Err(StegoError::AuthenticationFailure)
    ));
}

#[test]
fn ciphertexts_differ_across_calls_but_decrypt_identically() {
    let key = [0x42u8; 16];
    let a = encrypt(MSG, &key, CipherScheme::AesEax).unwrap();
    let b = encrypt(MSG, &key, CipherScheme::AesEax).unwrap();
    assert_ne!(a, b);
    assert_eq!(decrypt(&a, &key, CipherScheme::AesEax).unwrap(), MSG);
    assert_eq!(decrypt(&b, &key, CipherScheme::AesEax).unwrap(), MSG);
}

#[test]
fn zero_length_payload_is_still_authenticated() {
    let key = [0x42u8; 24];
    let blob = encrypt(b"", &key, CipherScheme::AesEax).unwrap();
    assert_eq!(blob.len(), NONCE_LEN + TAG_LEN);
    assert_eq!(decrypt(&blob, &key, CipherScheme::AesEax).unwrap(), b"");

    let mut tampered = blob.clone();
    tampered[NONCE_LEN] ^= 0x80;
    assert!(matches!(
        decrypt(&tampered, &key, CipherScheme::AesEax),
        Err(StegoError::AuthenticationFailure)
    ));
}
