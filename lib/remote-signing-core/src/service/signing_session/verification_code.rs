use sha2::{Digest, Sha256};

/// Four digit code the user compares against the one shown on the signing device.
///
/// `hash` is the raw digest handed to the backend, not its base64 form.
pub fn verification_code(hash: &[u8]) -> String {
    let digest: [u8; 32] = Sha256::digest(hash).into();
    let [.., high, low] = digest;
    let code = u16::from_be_bytes([high, low]) % 10_000;

    format!("{code:04}")
}

#[cfg(test)]
mod test {
    use ct_codecs::{Base64, Decoder};
    use rstest::rstest;

    use super::verification_code;

    #[rstest]
    #[case::empty(b"".to_vec(), "7189")]
    #[case::zero_digest(vec![0u8; 32], "0533")]
    #[case::all_ones(vec![0xffu8; 64], "3751")]
    fn test_verification_code(#[case] hash: Vec<u8>, #[case] expected: &str) {
        assert_eq!(verification_code(&hash), expected);
    }

    #[test]
    fn test_verification_code_of_prepared_hash() {
        let hash = Base64::decode_to_vec("Q8wj+lK4e0zB0CtbEUFUFR1q3dsXyf3cBrAn+pniQAg=", None).unwrap();

        assert_eq!(verification_code(&hash), "8476");
    }

    #[test]
    fn test_verification_code_is_deterministic() {
        let hash = [7u8; 48];

        let code = verification_code(&hash);

        assert_eq!(code.len(), 4);
        assert!(code.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(code, verification_code(&hash));
    }
}
