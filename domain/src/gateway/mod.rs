//! HTTP clients for the third-party services the meeting assistant talks to.

pub mod google_calendar;
pub mod hugging_face;
