use serde::Deserialize;
use strum::{AsRefStr, Display, EnumString};

#[derive(EnumString, Display, AsRefStr, Default, Clone, Copy, Debug, PartialEq, Deserialize)]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}
