//! Message bus publishers for user events

mod factory;
mod in_memory;
mod redis;

pub use factory::{create_user_event_publisher, PublisherType};
pub use in_memory::InMemoryUserEventPublisher;
pub use self::redis::{RedisPublisherConfig, RedisUserEventPublisher};
