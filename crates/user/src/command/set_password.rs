use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use validator::Validate;

use crate::repository;

#[derive(Validate)]
pub struct SetPasswordInput {
    #[validate(length(min = 8, max = 128))]
    pub new_password: String,
    #[validate(length(min = 1))]
    pub current_password: String,
}

impl super::Command {
    pub async fn set_password(
        &self,
        user_id: &str,
        input: SetPasswordInput,
    ) -> plateful_shared::Result<()> {
        input.validate()?;

        let Some(user) = repository::find(
            &self.read_db,
            repository::FindType::Id(user_id.to_owned()),
        )
        .await?
        else {
            plateful_shared::not_found!("User not found.");
        };

        let parsed_hash = PasswordHash::new(&user.password)?;
        let argon2 = Argon2::default();

        if argon2
            .verify_password(input.current_password.as_bytes(), &parsed_hash)
            .is_err()
        {
            plateful_shared::invalid!("Current password is incorrect.");
        }

        let salt = SaltString::generate(&mut OsRng);
        let password_hash = argon2
            .hash_password(input.new_password.as_bytes(), &salt)?
            .to_string();

        repository::update(
            &self.write_db,
            repository::UpdateInput {
                id: user.id,
                password: Some(password_hash),
                avatar: None,
            },
        )
        .await?;

        Ok(())
    }
}
