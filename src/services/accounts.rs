//! Account management service: registration, credential checks,
//! password updates and account deletion.

use rand::RngCore;
use sha2::{Digest, Sha512};

use crate::{
    error::{AppError, AppResult},
    models::user::User,
    repository::Repository,
};

#[derive(Clone)]
pub struct AccountsService {
    repository: Repository,
}

/// Hash a password with the given hex salt (SHA-512 over password + salt)
fn hash_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha512::new();
    hasher.update(password.as_bytes());
    hasher.update(salt.as_bytes());
    hex::encode(hasher.finalize())
}

/// Generate a fresh 64-byte random salt, hex encoded
fn generate_salt() -> String {
    let mut bytes = [0u8; 64];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

impl AccountsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create a new account with a freshly salted password hash
    pub async fn create_account(&self, username: &str, password: &str) -> AppResult<User> {
        let salt = generate_salt();
        let hash = hash_password(password, &salt);

        let user = self.repository.users.create(username, &hash, &salt).await?;

        tracing::info!("User successfully added to the database: {}", username);

        Ok(user)
    }

    /// Authenticate by username and password. Unknown usernames and hash
    /// mismatches produce the same error so the response does not leak
    /// which usernames exist.
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<User> {
        let user = self
            .repository
            .users
            .get_by_username(username)
            .await?
            .ok_or_else(|| {
                AppError::InvalidCredentials("Invalid username or password".to_string())
            })?;

        if hash_password(password, &user.salt) != user.password {
            return Err(AppError::InvalidCredentials(
                "Invalid username or password".to_string(),
            ));
        }

        Ok(user)
    }

    /// Change a user's password after verifying the old one. A new salt
    /// is generated alongside the new hash.
    pub async fn update_password(
        &self,
        username: &str,
        old_password: &str,
        new_password: &str,
    ) -> AppResult<()> {
        let user = self.authenticate(username, old_password).await?;

        let salt = generate_salt();
        let hash = hash_password(new_password, &salt);

        self.repository
            .users
            .update_password(user.id, &hash, &salt)
            .await
            .map_err(|_| AppError::Internal("Error updating password".to_string()))?;

        tracing::info!("Password successfully changed for user: {}", username);

        Ok(())
    }

    /// Delete an account after verifying credentials. Library entries,
    /// favorites and reviews cascade away with the user row.
    pub async fn delete_account(&self, username: &str, password: &str) -> AppResult<()> {
        let user = self.authenticate(username, password).await?;

        self.repository.users.delete(user.id).await?;

        tracing::info!("User account deleted: {}", username);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_password_and_salt_hash_identically() {
        let salt = generate_salt();
        assert_eq!(
            hash_password("hunter2", &salt),
            hash_password("hunter2", &salt)
        );
    }

    #[test]
    fn different_salts_produce_different_hashes() {
        let a = generate_salt();
        let b = generate_salt();
        assert_ne!(a, b);
        assert_ne!(hash_password("hunter2", &a), hash_password("hunter2", &b));
    }

    #[test]
    fn hash_is_hex_encoded_sha512() {
        let digest = hash_password("hunter2", "00");
        assert_eq!(digest.len(), 128);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn salt_is_64_random_bytes() {
        assert_eq!(generate_salt().len(), 128);
    }
}
