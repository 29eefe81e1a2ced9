//! Backend API access.
//!
//! Provides the HTTP client, the storage endpoints used by uploads, and
//! typed collections for the records that own uploaded images.

pub mod client;
pub mod resource;
pub mod uploads;

pub use client::ApiClient;
pub use resource::{EntityId, EntityStore, Resource};
pub use uploads::{DeleteFileRequest, PresignedUrl, PresignedUrlRequest, StorageApi};

use crate::forms::{Doctor, DoctorPayload, Service, ServicePayload};

impl ApiClient {
    /// `/doctors/` collection.
    pub fn doctors(&self) -> Resource<DoctorPayload, Doctor> {
        Resource::new(self.clone(), "/doctors/")
    }

    /// `/services/` collection.
    pub fn services(&self) -> Resource<ServicePayload, Service> {
        Resource::new(self.clone(), "/services/")
    }
}
