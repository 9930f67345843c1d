//! Channel addressing

use amora_domain::UserId;

/// The private channel name for a user
///
/// All events for a user are delivered on this one channel, discriminated
/// by event name.
pub fn user_channel(user: UserId) -> String {
    format!("private-user-{}", user)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_name() {
        assert_eq!(user_channel(UserId(42)), "private-user-42");
    }
}
