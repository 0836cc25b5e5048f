pub mod subscribe;

pub use subscribe::{
    find_profile, generate_subscription, SubscribeError, SubscriptionResult, NO_NODES_PLACEHOLDER,
    PROFILE_NOT_FOUND,
};
