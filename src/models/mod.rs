pub mod booking;
pub mod brand;
pub mod calendar;
pub mod conversation;
pub mod intent;

pub use booking::{BookingConfirmation, BookingForm, BookingRequest, EventType, MeetingLocation};
pub use brand::{Brand, FaqCopy};
pub use calendar::{CachedToken, CalendarEvent};
pub use conversation::{ConversationMessage, ConversationState, Session, TurnOutcome};
pub use intent::{Route, ServiceTopic};
