//! Doctor records and the doctor form.

use serde::{Deserialize, Serialize};

use super::editor::{Draft, EntityEditor};
use super::fields::{
    Required, default_true, optional_amount, optional_count, optional_email, optional_text,
};
use crate::api::EntityId;
use crate::error::FormError;
use crate::upload::UploadManager;

/// Doctor as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: EntityId,
    pub name: String,
    pub specialization: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub qualification: Option<String>,
    #[serde(default)]
    pub experience_years: Option<u32>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub consultation_fee: Option<f64>,
    #[serde(default)]
    pub profile_image: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Body of `POST /doctors/` and `PUT /doctors/{id}`.
///
/// `profile_image` is always sent so that clearing the image persists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorPayload {
    pub name: String,
    pub specialization: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualification: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience_years: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consultation_fee: Option<f64>,
    pub profile_image: Option<String>,
    pub is_active: bool,
}

/// Doctor form inputs as typed by the user.
#[derive(Debug, Clone, PartialEq)]
pub struct DoctorDraft {
    pub name: String,
    pub specialization: String,
    pub email: String,
    pub phone: String,
    pub qualification: String,
    pub experience_years: String,
    pub bio: String,
    pub consultation_fee: String,
    pub is_active: bool,
}

impl Default for DoctorDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            specialization: String::new(),
            email: String::new(),
            phone: String::new(),
            qualification: String::new(),
            experience_years: String::new(),
            bio: String::new(),
            consultation_fee: String::new(),
            is_active: true,
        }
    }
}

impl DoctorDraft {
    /// Prefill the form from an existing record.
    pub fn from_record(doctor: &Doctor) -> Self {
        Self {
            name: doctor.name.clone(),
            specialization: doctor.specialization.clone(),
            email: doctor.email.clone().unwrap_or_default(),
            phone: doctor.phone.clone().unwrap_or_default(),
            qualification: doctor.qualification.clone().unwrap_or_default(),
            experience_years: doctor
                .experience_years
                .map(|y| y.to_string())
                .unwrap_or_default(),
            bio: doctor.bio.clone().unwrap_or_default(),
            consultation_fee: doctor
                .consultation_fee
                .map(|f| f.to_string())
                .unwrap_or_default(),
            is_active: doctor.is_active,
        }
    }
}

impl Draft for DoctorDraft {
    type Payload = DoctorPayload;

    fn to_payload(&self, image_url: Option<String>) -> Result<DoctorPayload, FormError> {
        let mut required = Required::new();
        let name = required.text("name", &self.name);
        let specialization = required.text("specialization", &self.specialization);
        required.finish()?;

        Ok(DoctorPayload {
            name,
            specialization,
            email: optional_email("email", &self.email)?,
            phone: optional_text(&self.phone),
            qualification: optional_text(&self.qualification),
            experience_years: optional_count("experience_years", &self.experience_years)?,
            bio: optional_text(&self.bio),
            consultation_fee: optional_amount("consultation_fee", &self.consultation_fee)?,
            profile_image: image_url,
            is_active: self.is_active,
        })
    }
}

/// Open the form for a new doctor.
pub fn new_doctor(uploads: UploadManager) -> EntityEditor<DoctorDraft> {
    EntityEditor::create(DoctorDraft::default(), uploads)
}

/// Open the form for an existing doctor.
pub fn edit_doctor(doctor: &Doctor, uploads: UploadManager) -> EntityEditor<DoctorDraft> {
    EntityEditor::edit(
        doctor.id,
        DoctorDraft::from_record(doctor),
        doctor.profile_image.as_deref(),
        uploads,
    )
}
