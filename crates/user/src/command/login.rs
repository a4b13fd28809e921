use argon2::{Argon2, PasswordHash, PasswordVerifier};
use validator::Validate;

use crate::repository::{self, UserRow};

#[derive(Validate)]
pub struct LoginInput {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

impl super::Command {
    /// Verify credentials and return the matching user. Token issuance is the
    /// HTTP layer's business.
    pub async fn login(&self, input: LoginInput) -> plateful_shared::Result<UserRow> {
        input.validate()?;

        let Some(user) =
            repository::find(&self.read_db, repository::FindType::Email(input.email)).await?
        else {
            plateful_shared::invalid!("Invalid email or password.");
        };

        let parsed_hash = PasswordHash::new(&user.password)?;
        let argon2 = Argon2::default();

        if argon2
            .verify_password(input.password.as_bytes(), &parsed_hash)
            .is_err()
        {
            plateful_shared::invalid!("Invalid email or password.");
        }

        Ok(user)
    }
}
