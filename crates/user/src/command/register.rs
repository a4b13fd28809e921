use argon2::{
    Argon2, PasswordHasher,
    password_hash::{SaltString, rand_core::OsRng},
};
use std::sync::LazyLock;
use ulid::Ulid;
use validator::Validate;

use crate::repository;

static USERNAME_RE: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"^[\w.@+-]+$").unwrap());

#[derive(Validate)]
pub struct RegisterInput {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 150))]
    pub username: String,
    #[validate(length(min = 1, max = 150))]
    pub first_name: String,
    #[validate(length(min = 1, max = 150))]
    pub last_name: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

impl super::Command {
    pub async fn register(&self, input: RegisterInput) -> plateful_shared::Result<String> {
        input.validate()?;

        if !USERNAME_RE.is_match(&input.username) {
            plateful_shared::invalid!(
                "Username may contain only letters, digits and @/./+/-/_ characters."
            );
        }

        if repository::find(
            &self.read_db,
            repository::FindType::Email(input.email.to_owned()),
        )
        .await?
        .is_some()
        {
            plateful_shared::invalid!("A user with that email already exists.");
        }

        if repository::find(
            &self.read_db,
            repository::FindType::Username(input.username.to_owned()),
        )
        .await?
        .is_some()
        {
            plateful_shared::invalid!("A user with that username already exists.");
        }

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2
            .hash_password(input.password.as_bytes(), &salt)?
            .to_string();

        let id = Ulid::new().to_string();

        repository::create(
            &self.write_db,
            repository::CreateInput {
                id: id.to_owned(),
                email: input.email,
                username: input.username,
                first_name: input.first_name,
                last_name: input.last_name,
                password: password_hash,
            },
        )
        .await?;

        Ok(id)
    }
}
