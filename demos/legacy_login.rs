use argon2::Argon2;
use legacy_auth::memory::{MemoryCredentialStore, MemoryFailureTracker};
use legacy_auth::{
    AuthError, CredentialStore, LegacyAuthConfig, LegacyCredentialVerifier, StaticConfigProvider,
};
use password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};

fn main() {
    // Accounts imported from an old shop still carry md5(salt ‖ password) hashes
    let store = MemoryCredentialStore::new();
    store.insert("42", "946ccf1cf1cfccb6bce540c3b83432f7");

    let verifier = LegacyCredentialVerifier::new(
        StaticConfigProvider::new(LegacyAuthConfig::enabled("pepper")),
        &store,
        MemoryFailureTracker::new(),
    );

    // The primary verifier only understands PHC strings
    let primary = |password: &str| -> Result<bool, AuthError> {
        let stored = store
            .stored_credential("42")
            .map_err(AuthError::CredentialStore)?
            .unwrap();
        let hash = PasswordHash::new(stored.hash()).unwrap();
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &hash)
            .is_ok())
    };

    let accepted = verifier
        .verify("42", "hunter2", || primary("hunter2"))
        .unwrap();
    println!("Legacy login accepted: {accepted}");

    // The verifier never rewrites hashes. Once the password is known to be
    // correct the host can move the account to Argon2.
    let salt = SaltString::generate(rand::thread_rng());
    let upgraded = Argon2::default()
        .hash_password(b"hunter2", &salt)
        .unwrap()
        .to_string();
    store.insert("42", upgraded.clone());
    println!("Upgraded hash: {upgraded}");

    // From now on the stored hash is no longer 32 characters long and every
    // login goes through the primary verifier.
    let accepted = verifier
        .verify("42", "hunter2", || primary("hunter2"))
        .unwrap();
    println!("Primary login accepted: {accepted}");

    let rejected = verifier.verify("42", "wrong", || primary("wrong")).unwrap();
    println!("Primary login with wrong password accepted: {rejected}");
}
