use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// The gateway hands out ids as integers for some tables and UUID strings for others.
fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
    #[default]
    #[serde(other)]
    Unknown,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
            Gender::Unknown => "unknown",
        }
    }

    pub fn parse(value: &str) -> Option<Gender> {
        match value.trim() {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            "other" => Some(Gender::Other),
            "unknown" => Some(Gender::Unknown),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Scientist {
    #[serde(deserialize_with = "lenient_id")]
    pub id: String,
    pub scientist_id: Option<String>,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub institution: String,
    pub specialization: String,
    pub gender: Option<Gender>,
    pub age: Option<u32>,
    #[serde(rename = "profilePicture", alias = "profile_picture")]
    pub profile_picture: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Patient {
    #[serde(deserialize_with = "lenient_id")]
    pub id: String,
    pub patient_iid: String,
    pub first_name: String,
    pub last_name: String,
    pub cpf: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub scientist: Option<String>,
    pub processing_status: Option<String>,
}

impl Patient {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }

    pub fn initials(&self) -> String {
        self.first_name
            .chars()
            .take(1)
            .chain(self.last_name.chars().take(1))
            .collect()
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingStatus {
    New,
    Processing,
    Completed,
    Failed,
    Queued,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Annotation {
    pub onset: f64,
    pub duration: f64,
    pub description: String,
}

impl Annotation {
    /// Event code carried in descriptions of the form `TypeID: 20`.
    pub fn type_id(&self) -> Option<u32> {
        self.description
            .trim()
            .strip_prefix("TypeID:")
            .unwrap_or(self.description.trim())
            .trim()
            .parse()
            .ok()
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SessionMetadata {
    pub channel_names: Vec<String>,
    pub bad_channels: Vec<String>,
    pub annotations: Vec<Annotation>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Session {
    #[serde(deserialize_with = "lenient_id")]
    pub id: String,
    pub session_name: String,
    pub patient_iid: String,
    pub file_name: String,
    pub file_path: String,
    pub file_size: Option<u64>,
    pub duration: Option<f64>,
    pub sample_frequency: Option<f64>,
    pub channels: Option<u32>,
    pub recording_date: Option<String>,
    pub processing_status: ProcessingStatus,
    pub metadata_json: Option<SessionMetadata>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Session {
    pub fn short_id(&self) -> String {
        let head: String = self.id.chars().take(8).collect();
        format!("{head}...")
    }

    pub fn annotations(&self) -> &[Annotation] {
        self.metadata_json
            .as_ref()
            .map(|m| m.annotations.as_slice())
            .unwrap_or(&[])
    }
}

/// An EDF recording the gateway found on disk.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EdfFile {
    #[serde(alias = "file_name")]
    pub name: String,
    #[serde(alias = "file_path")]
    pub path: String,
    pub size: Option<u64>,
    pub exists_on_disk: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_status_and_gender_do_not_fail_decoding() {
        let session: Session = serde_json::from_value(serde_json::json!({
            "id": "0f8c2a1e-aaaa-bbbb-cccc-000000000000",
            "session_name": "baseline",
            "processing_status": "archived"
        }))
        .unwrap();
        assert_eq!(session.processing_status, ProcessingStatus::Unknown);
        assert_eq!(session.short_id(), "0f8c2a1e...");

        let patient: Patient = serde_json::from_value(serde_json::json!({
            "id": "7",
            "first_name": "Maria",
            "last_name": "Souza",
            "gender": "nonbinary",
            "birth_date": "1990-03-02"
        }))
        .unwrap();
        assert_eq!(patient.gender, Some(Gender::Unknown));
        assert_eq!(patient.initials(), "MS");
        assert_eq!(patient.birth_date, NaiveDate::from_ymd_opt(1990, 3, 2));
    }

    #[test]
    fn numeric_ids_decode_as_strings() {
        let scientist: Scientist =
            serde_json::from_value(serde_json::json!({ "id": 42, "email": "a@b.c" })).unwrap();
        assert_eq!(scientist.id, "42");
    }

    #[test]
    fn scientist_picture_is_exposed_in_camel_case() {
        let scientist: Scientist = serde_json::from_value(serde_json::json!({
            "id": "1",
            "email": "ana@utfpr.edu.br",
            "profile_picture": "/media/ana.png"
        }))
        .unwrap();
        let out = serde_json::to_value(&scientist).unwrap();
        assert_eq!(out["profilePicture"], "/media/ana.png");
        assert!(out.get("profile_picture").is_none());
    }

    #[test]
    fn edf_file_accepts_discovery_field_names() {
        let file: EdfFile = serde_json::from_value(serde_json::json!({
            "file_name": "S01.edf",
            "file_path": "/data/edf/S01.edf",
            "exists_on_disk": true
        }))
        .unwrap();
        assert_eq!(file.name, "S01.edf");
        assert_eq!(file.path, "/data/edf/S01.edf");
        assert!(file.exists_on_disk);
    }

    #[test]
    fn annotation_type_id_strips_prefix() {
        let annotation = Annotation {
            onset: 1.5,
            duration: 0.0,
            description: "TypeID: 21".into(),
        };
        assert_eq!(annotation.type_id(), Some(21));

        let bare = Annotation {
            description: "stimulus".into(),
            ..Default::default()
        };
        assert_eq!(bare.type_id(), None);
    }
}
