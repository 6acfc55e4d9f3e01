//! Data model for the directory subsystem

mod channel;
mod group;
mod state;
mod types;
mod user;

pub use channel::Channel;
pub use group::Group;
pub use state::State;
pub use types::{ChannelId, GroupId, Role};
pub use user::User;
