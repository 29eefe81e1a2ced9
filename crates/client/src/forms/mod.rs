//! Typed form payloads.
//!
//! Each form keeps the raw inputs in a draft, checks required fields, and
//! only then builds the record sent to the backend.

pub mod doctor;
pub mod editor;
mod fields;
pub mod service;

pub use doctor::{Doctor, DoctorDraft, DoctorPayload, edit_doctor, new_doctor};
pub use editor::{Draft, EntityEditor};
pub use service::{Service, ServiceDraft, ServicePayload, edit_service, new_service};
