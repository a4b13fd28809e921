use base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::repository;

impl super::Command {
    /// Store the avatar payload (a URL or a `data:` URL). File storage is out
    /// of scope; the payload is kept as an opaque string.
    pub async fn set_avatar(&self, user_id: &str, avatar: String) -> plateful_shared::Result<()> {
        if avatar.trim().is_empty() {
            plateful_shared::invalid!("The avatar field may not be blank.");
        }

        // A data URL must at least carry decodable base64 content.
        if let Some((_, payload)) = avatar.split_once(";base64,")
            && STANDARD.decode(payload).is_err()
        {
            plateful_shared::invalid!("The avatar payload is not valid base64.");
        }

        repository::update(
            &self.write_db,
            repository::UpdateInput {
                id: user_id.to_owned(),
                password: None,
                avatar: Some(Some(avatar)),
            },
        )
        .await?;

        Ok(())
    }

    pub async fn delete_avatar(&self, user_id: &str) -> plateful_shared::Result<()> {
        let Some(user) = repository::find(
            &self.read_db,
            repository::FindType::Id(user_id.to_owned()),
        )
        .await?
        else {
            plateful_shared::not_found!("User not found.");
        };

        if user.avatar.is_none() {
            plateful_shared::not_found!("Avatar not found.");
        }

        repository::update(
            &self.write_db,
            repository::UpdateInput {
                id: user.id,
                password: None,
                avatar: Some(None),
            },
        )
        .await?;

        Ok(())
    }
}
