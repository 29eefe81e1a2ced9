//! Service catalog records and the service form.

use serde::{Deserialize, Serialize};

use super::editor::{Draft, EntityEditor};
use super::fields::{Required, default_true, optional_amount, optional_count, optional_text};
use crate::api::EntityId;
use crate::error::FormError;
use crate::upload::UploadManager;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServicePayload {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    pub image_url: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceDraft {
    pub name: String,
    pub description: String,
    pub duration_minutes: String,
    pub price: String,
    pub is_active: bool,
}

impl Default for ServiceDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            duration_minutes: String::new(),
            price: String::new(),
            is_active: true,
        }
    }
}

impl ServiceDraft {
    pub fn from_record(service: &Service) -> Self {
        Self {
            name: service.name.clone(),
            description: service.description.clone(),
            duration_minutes: service
                .duration_minutes
                .map(|m| m.to_string())
                .unwrap_or_default(),
            price: service.price.map(|p| p.to_string()).unwrap_or_default(),
            is_active: service.is_active,
        }
    }
}

impl Draft for ServiceDraft {
    type Payload = ServicePayload;

    fn to_payload(&self, image_url: Option<String>) -> Result<ServicePayload, FormError> {
        let mut required = Required::new();
        let name = required.text("name", &self.name);
        let description = required.text("description", &self.description);
        required.finish()?;

        let duration_minutes = optional_count("duration_minutes", &self.duration_minutes)?;
        if duration_minutes == Some(0) {
            return Err(FormError::Invalid {
                field: "duration_minutes",
                reason: "must be at least one minute".to_string(),
            });
        }

        Ok(ServicePayload {
            name,
            description,
            duration_minutes,
            price: optional_amount("price", &self.price)?,
            image_url: image_url.and_then(|url| optional_text(&url)),
            is_active: self.is_active,
        })
    }
}

pub fn new_service(uploads: UploadManager) -> EntityEditor<ServiceDraft> {
    EntityEditor::create(ServiceDraft::default(), uploads)
}

pub fn edit_service(service: &Service, uploads: UploadManager) -> EntityEditor<ServiceDraft> {
    EntityEditor::edit(
        service.id,
        ServiceDraft::from_record(service),
        service.image_url.as_deref(),
        uploads,
    )
}
