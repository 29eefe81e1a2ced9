//! Storage namespaces.

use std::fmt;
use std::str::FromStr;

/// Logical storage folder an upload is filed under.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UploadFolder {
    Doctors,
    Services,
    Blog,
    Branches,
    Testimonials,
    Onboarding,
    Custom(String),
}

impl UploadFolder {
    pub fn as_str(&self) -> &str {
        match self {
            UploadFolder::Doctors => "doctors",
            UploadFolder::Services => "services",
            UploadFolder::Blog => "blog",
            UploadFolder::Branches => "branches",
            UploadFolder::Testimonials => "testimonials",
            UploadFolder::Onboarding => "onboarding",
            UploadFolder::Custom(name) => name,
        }
    }
}

impl fmt::Display for UploadFolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UploadFolder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folder = match s {
            "doctors" => UploadFolder::Doctors,
            "services" => UploadFolder::Services,
            "blog" => UploadFolder::Blog,
            "branches" => UploadFolder::Branches,
            "testimonials" => UploadFolder::Testimonials,
            "onboarding" => UploadFolder::Onboarding,
            other => {
                let valid = !other.is_empty()
                    && !other.starts_with('/')
                    && !other.split('/').any(|part| part.is_empty() || part == "..")
                    && other.chars().all(|c| {
                        c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '_' | '/')
                    });
                if !valid {
                    return Err(format!("invalid upload folder: {other:?}"));
                }
                UploadFolder::Custom(other.to_string())
            }
        };
        Ok(folder)
    }
}
