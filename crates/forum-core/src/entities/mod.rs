//! Domain entities - core business objects

mod answer;
mod notification;
mod question;
mod user;

pub use answer::Answer;
pub use notification::{
    NewNotification, Notification, NotificationFeed, NotificationKind, DEFAULT_FEED_CAPACITY,
};
pub use question::Question;
pub use user::{User, UserRole};
