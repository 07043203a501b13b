use self::data::{
    get_public_key, get_signing_key, ED25519_KEY_BASE64, LARGE_KEY_BASE64, PRIVATE_KEY_BASE64,
    PRIVATE_KEY_PEM, SHORT_BODY, SHORT_BODY_SIGNATURE, SIGNED_BODY, SIGNED_BODY_SIGNATURE,
    SMALL_KEY_BASE64, SMALL_KEY_SHORT_BODY_SIGNATURE,
};
use siggen::crypto::{self, Error, KeyError, SigningKey, VerifyError};


#[test]
fn matches_openssl() {
    let key = get_signing_key();

    assert_eq!(
        crypto::sign(SIGNED_BODY.as_bytes(), &key).unwrap(),
        SIGNED_BODY_SIGNATURE
    );
    assert_eq!(
        crypto::sign(SHORT_BODY.as_bytes(), &key).unwrap(),
        SHORT_BODY_SIGNATURE
    );
}

#[test]
fn deterministic() {
    let key = get_signing_key();

    let first = crypto::sign(SIGNED_BODY.as_bytes(), &key).unwrap();
    let second = crypto::sign(SIGNED_BODY.as_bytes(), &key).unwrap();
    assert_eq!(first, second);
}

#[test]
fn raw_signature_has_modulus_length() {
    let signature = get_signing_key().sign(SIGNED_BODY.as_bytes()).unwrap();
    assert_eq!(signature.len(), 256);
}

#[test]
fn sign_then_verify() {
    let key = get_signing_key();
    let signature = crypto::sign(SIGNED_BODY.as_bytes(), &key).unwrap();

    assert!(crypto::verify(SIGNED_BODY.as_bytes(), &signature, &get_public_key()).is_ok());
    assert!(crypto::verify(SIGNED_BODY.as_bytes(), &signature, &key.public_key()).is_ok());
}

#[test]
fn one_byte_changed() {
    let signature = crypto::sign(SIGNED_BODY.as_bytes(), &get_signing_key()).unwrap();

    let mut tampered = SIGNED_BODY.as_bytes().to_vec();
    // Flip the last digit of the timestamp
    let idx = tampered.len() - 2;
    tampered[idx] = b'1';

    assert!(matches!(
        crypto::verify(&tampered, &signature, &get_public_key()),
        Err(VerifyError::Verification)
    ));
}

#[test]
fn verify_rejects_garbage_encoding() {
    assert!(matches!(
        crypto::verify(SIGNED_BODY.as_bytes(), "not base64!", &get_public_key()),
        Err(VerifyError::Base64(..))
    ));
}

#[test]
fn wrapped_credential() {
    let wrapped = PRIVATE_KEY_BASE64
        .as_bytes()
        .chunks(64)
        .map(|chunk| std::str::from_utf8(chunk).unwrap())
        .collect::<Vec<_>>()
        .join("\n");

    let key = SigningKey::from_base64_pkcs8(&wrapped).unwrap();
    assert_eq!(
        crypto::sign(SHORT_BODY.as_bytes(), &key).unwrap(),
        SHORT_BODY_SIGNATURE
    );
}

#[test]
fn pem_credential() {
    let key = SigningKey::from_pkcs8_pem(PRIVATE_KEY_PEM.trim()).unwrap();
    assert_eq!(
        crypto::sign(SHORT_BODY.as_bytes(), &key).unwrap(),
        SHORT_BODY_SIGNATURE
    );
}

#[test]
fn one_shot() {
    let signature =
        crypto::sign_with_credential(SHORT_BODY.as_bytes(), PRIVATE_KEY_BASE64).unwrap();
    assert_eq!(signature, SHORT_BODY_SIGNATURE);
}

#[test]
fn one_shot_reports_key_errors() {
    assert!(matches!(
        crypto::sign_with_credential(SHORT_BODY.as_bytes(), "pem-private-key"),
        Err(Error::Key(..))
    ));
}

#[test]
fn small_key() {
    let key = SigningKey::from_base64_pkcs8(SMALL_KEY_BASE64).unwrap();

    let signature = crypto::sign(SHORT_BODY.as_bytes(), &key).unwrap();
    assert_eq!(signature, SMALL_KEY_SHORT_BODY_SIGNATURE);
    assert_eq!(key.sign(SHORT_BODY.as_bytes()).unwrap().len(), 128);
    assert!(crypto::verify(SHORT_BODY.as_bytes(), &signature, &key.public_key()).is_ok());
}

#[test]
fn large_key() {
    let key = SigningKey::from_base64_pkcs8(LARGE_KEY_BASE64).unwrap();

    let raw = key.sign(SHORT_BODY.as_bytes()).unwrap();
    assert_eq!(raw.len(), 1024);

    let signature = base64_simd::STANDARD.encode_to_string(raw);
    assert!(crypto::verify(SHORT_BODY.as_bytes(), &signature, &key.public_key()).is_ok());
}

#[test]
fn signature_from_other_key() {
    let key = SigningKey::from_base64_pkcs8(SMALL_KEY_BASE64).unwrap();
    let signature = crypto::sign(SHORT_BODY.as_bytes(), &key).unwrap();

    assert!(matches!(
        crypto::verify(SHORT_BODY.as_bytes(), &signature, &get_public_key()),
        Err(VerifyError::Verification)
    ));
}

#[test]
fn placeholder_credential() {
    // `-` isn't part of the standard alphabet
    assert!(matches!(
        SigningKey::from_base64_pkcs8("pem-private-key"),
        Err(KeyError::Base64(..))
    ));
}

#[test]
fn not_der() {
    let encoded = base64_simd::STANDARD.encode_to_string("definitely not a key");
    assert!(matches!(
        SigningKey::from_base64_pkcs8(&encoded),
        Err(KeyError::Der(..))
    ));
}

#[test]
fn not_rsa() {
    assert!(matches!(
        SigningKey::from_base64_pkcs8(ED25519_KEY_BASE64),
        Err(KeyError::UnknownKeyType)
    ));
}

#[test]
fn public_key_rejects_private_pem() {
    assert!(crypto::parse::public_key(PRIVATE_KEY_PEM).is_err());
}
