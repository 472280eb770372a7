use assert_cmd::Command;
use predicates::prelude::*;

const SCENARIO_KDF: &str =
    r#"{"algorithm":"PBKDF2","salt":"AAAAAAAAAAAAAAAAAAAAAA","iterations":10,"keySize":256}"#;
const SCENARIO_CIPHER: &str =
    r#"{"cipherType":"symmetric","algorithm":"AES-CCM","iv":"ERERERERERERERER","additionalData":"","tagSize":64}"#;

fn bin() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("vaultcore"))
}

fn stdout_of(cmd: &mut Command) -> String {
    let out = cmd.output().unwrap();
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    String::from_utf8(out.stdout).unwrap().trim().to_string()
}

fn derive(passphrase: &str) -> String {
    stdout_of(
        bin()
            .env("VAULTCORE_PASSPHRASE", passphrase)
            .arg("derive-key")
            .arg("--params")
            .arg(SCENARIO_KDF),
    )
}

#[test]
fn random_bytes_prints_encoded_bytes() {
    // 16 bytes encode to 22 unpadded characters
    bin()
        .arg("random-bytes")
        .arg("16")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^[A-Za-z0-9_-]{22}\n$").unwrap());
}

#[test]
fn random_bytes_rejects_partial_words() {
    bin()
        .arg("random-bytes")
        .arg("5")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid argument"));
}

#[test]
fn derive_key_is_deterministic() {
    let k1 = derive("correct horse");
    let k2 = derive("correct horse");
    assert_eq!(k1, k2);
    assert_eq!(k1.len(), 43);
    assert_ne!(derive("battery staple"), k1);
}

#[test]
fn derive_key_rejects_zero_iterations() {
    bin()
        .env("VAULTCORE_PASSPHRASE", "pw")
        .arg("derive-key")
        .arg("--params")
        .arg(r#"{"algorithm":"PBKDF2","salt":"AAAAAAAAAAAAAAAAAAAAAA","iterations":0,"keySize":256}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid key derivation parameters"));
}

#[test]
fn encrypt_decrypt_roundtrip() {
    let key = derive("correct horse");

    let ct = stdout_of(
        bin()
            .arg("encrypt")
            .arg("--key")
            .arg(&key)
            .arg("--params")
            .arg(SCENARIO_CIPHER)
            .arg("hello"),
    );

    bin()
        .arg("decrypt")
        .arg("--key")
        .arg(&key)
        .arg("--params")
        .arg(SCENARIO_CIPHER)
        .arg(&ct)
        .assert()
        .success()
        .stdout("hello\n");
}

#[test]
fn decrypt_with_altered_iv_fails() {
    let key = derive("correct horse");
    let ct = stdout_of(
        bin()
            .arg("encrypt")
            .arg("--key")
            .arg(&key)
            .arg("--params")
            .arg(SCENARIO_CIPHER)
            .arg("hello"),
    );

    let altered = SCENARIO_CIPHER.replace("ERERERERERERERER", "EBERERERERERERER");
    bin()
        .arg("decrypt")
        .arg("--key")
        .arg(&key)
        .arg("--params")
        .arg(altered)
        .arg(&ct)
        .assert()
        .failure()
        .stderr(predicate::str::contains("decryption failed"));
}

#[test]
fn encrypt_rejects_unsupported_algorithm() {
    let key = stdout_of(bin().arg("random-key"));
    bin()
        .arg("encrypt")
        .arg("--key")
        .arg(&key)
        .arg("--params")
        .arg(SCENARIO_CIPHER.replace("AES-CCM", "AES-GCM"))
        .arg("hello")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid cipher parameters"));
}

#[test]
fn generated_params_are_usable() {
    let params = stdout_of(bin().arg("iv").arg("--tag-size").arg("128"));
    assert!(params.contains(r#""tagSize":128"#));
    let key = stdout_of(bin().arg("random-key").arg("--bits").arg("128"));

    let ct = stdout_of(
        bin()
            .arg("encrypt")
            .arg("--key")
            .arg(&key)
            .arg("--params")
            .arg(&params)
            .arg("vault record"),
    );
    bin()
        .arg("decrypt")
        .arg("--key")
        .arg(&key)
        .arg("--params")
        .arg(&params)
        .arg(&ct)
        .assert()
        .success()
        .stdout("vault record\n");
}

#[test]
fn salt_prints_kdf_params() {
    bin()
        .arg("salt")
        .arg("--iterations")
        .arg("1000")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""algorithm":"PBKDF2""#))
        .stdout(predicate::str::contains(r#""iterations":1000"#))
        .stdout(predicate::str::contains(r#""keySize":256"#));
}

#[test]
fn keypair_is_not_supported() {
    bin()
        .arg("keypair")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not supported"));
}

#[test]
fn info_reports_provider() {
    bin()
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains("aes-ccm/pbkdf2"))
        .stdout(predicate::str::contains("available: true"));
}
