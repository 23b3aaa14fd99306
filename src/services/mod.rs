pub mod ai;
pub mod booking;
pub mod calendar;
pub mod conversation;
pub mod faq;
pub mod responder;
pub mod sessions;
