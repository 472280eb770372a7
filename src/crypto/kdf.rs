use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;

/// Fill `out` with PBKDF2-HMAC-SHA256 output.
pub fn pbkdf2_sha256(passphrase: &[u8], salt: &[u8], iterations: u32, out: &mut [u8]) {
    pbkdf2_hmac::<Sha256>(passphrase, salt, iterations, out);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_reference_vector() {
        // PBKDF2-HMAC-SHA256, P = "password", S = "salt", c = 1, dkLen = 32
        let expected = [
            0x12, 0x0f, 0xb6, 0xcf, 0xfc, 0xf8, 0xb3, 0x2c, 0x43, 0xe7, 0x22, 0x52, 0x56, 0xc4,
            0xf8, 0x37, 0xa8, 0x65, 0x48, 0xc9, 0x2c, 0xcc, 0x35, 0x48, 0x08, 0x05, 0x98, 0x7c,
            0xb7, 0x0b, 0xe1, 0x7b,
        ];
        let mut out = [0u8; 32];
        pbkdf2_sha256(b"password", b"salt", 1, &mut out);
        assert_eq!(out, expected);
    }

    #[test]
    fn kdf_is_deterministic() {
        let salt = [42u8; 16];
        let mut k1 = [0u8; 32];
        let mut k2 = [0u8; 32];

        pbkdf2_sha256(b"password", &salt, 10, &mut k1);
        pbkdf2_sha256(b"password", &salt, 10, &mut k2);

        assert_eq!(k1, k2);
    }

    #[test]
    fn kdf_params_affect_output() {
        let mut base = [0u8; 32];
        let mut other_salt = [0u8; 32];
        let mut more_rounds = [0u8; 32];

        pbkdf2_sha256(b"pw", &[7u8; 16], 2, &mut base);
        pbkdf2_sha256(b"pw", &[8u8; 16], 2, &mut other_salt);
        pbkdf2_sha256(b"pw", &[7u8; 16], 3, &mut more_rounds);

        assert_ne!(base, other_salt);
        assert_ne!(base, more_rounds);
    }

    #[test]
    fn shorter_output_is_prefix() {
        let mut long = [0u8; 32];
        let mut short = [0u8; 16];
        pbkdf2_sha256(b"pw", b"salt", 5, &mut long);
        pbkdf2_sha256(b"pw", b"salt", 5, &mut short);
        assert_eq!(long[..16], short);
    }
}
