use serde::{Deserialize, Serialize};

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn is_complete(&self) -> bool {
        !blank(&self.email) && !blank(&self.password)
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegisterScientistRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub institution: String,
    pub specialization: String,
}

impl RegisterScientistRequest {
    /// Submit stays disabled until every field has content.
    pub fn is_complete(&self) -> bool {
        [
            &self.email,
            &self.password,
            &self.first_name,
            &self.last_name,
            &self.institution,
            &self.specialization,
        ]
        .iter()
        .all(|v| !blank(v))
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPatientRequest {
    pub first_name: String,
    pub last_name: String,
    pub cpf: String,
    pub birth_date: String,
    pub password: String,
    pub gender: String,
}

impl RegisterPatientRequest {
    pub fn is_complete(&self) -> bool {
        [
            &self.first_name,
            &self.last_name,
            &self.cpf,
            &self.birth_date,
            &self.password,
            &self.gender,
        ]
        .iter()
        .all(|v| !blank(v))
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    pub patient_id: String,
    pub session_name: String,
    pub edf_file: String,
}

impl CreateSessionRequest {
    pub fn is_complete(&self) -> bool {
        !blank(&self.session_name) && !self.edf_file.is_empty() && !self.patient_id.is_empty()
    }

    /// Checks run before the request leaves the browser. Returns the first
    /// problem found, worded for the form.
    pub fn validate(&self) -> Result<(), String> {
        if blank(&self.session_name) {
            return Err("Nome da sessão é obrigatório".into());
        }
        if self.edf_file.is_empty() {
            return Err("Selecione um arquivo EDF".into());
        }
        if self.patient_id.is_empty() {
            return Err("Selecione um paciente".into());
        }
        Ok(())
    }
}

/// Editable part of the scientist profile.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ProfileUpdate {
    pub first_name: String,
    pub last_name: String,
    pub institution: String,
    pub specialization: String,
    pub gender: String,
    pub age: String,
}

impl ProfileUpdate {
    /// Non-empty fields as multipart text parts, in a stable order.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        [
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("institution", &self.institution),
            ("specialization", &self.specialization),
            ("gender", &self.gender),
            ("age", &self.age),
        ]
        .into_iter()
        .filter(|(_, v)| !blank(v))
        .map(|(k, v)| (k, v.trim().to_string()))
        .collect()
    }
}

pub const MAX_PICTURE_BYTES: usize = 5 * 1024 * 1024;

const PICTURE_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
];

/// Profile picture rules, checked in the browser and again before upload.
pub fn validate_picture(contentType: &str, size: usize) -> Result<(), String> {
    if !PICTURE_TYPES.contains(&contentType) {
        return Err("Por favor, selecione uma imagem válida (JPEG, PNG, GIF, WebP)".into());
    }
    if size > MAX_PICTURE_BYTES {
        return Err("A imagem deve ter no máximo 5MB".into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> RegisterScientistRequest {
        RegisterScientistRequest {
            email: "ana@utfpr.edu.br".into(),
            password: "s3cret".into(),
            first_name: "Ana".into(),
            last_name: "Lima".into(),
            institution: "UTFPR".into(),
            specialization: "Neurociência".into(),
        }
    }

    #[test]
    fn registration_enabled_only_when_every_field_is_filled() {
        assert!(filled().is_complete());

        let cases: [fn(&mut RegisterScientistRequest); 6] = [
            |r| r.email.clear(),
            |r| r.password.clear(),
            |r| r.first_name.clear(),
            |r| r.last_name = "   ".into(),
            |r| r.institution.clear(),
            |r| r.specialization.clear(),
        ];
        for clear in cases {
            let mut req = filled();
            clear(&mut req);
            assert!(!req.is_complete(), "{req:?} should disable submit");
        }
    }

    #[test]
    fn registration_body_is_camel_case() {
        let body = serde_json::to_value(filled()).unwrap();
        assert_eq!(body["firstName"], "Ana");
        assert_eq!(body["lastName"], "Lima");
    }

    #[test]
    fn session_validation_reports_first_missing_field() {
        let mut req = CreateSessionRequest::default();
        assert_eq!(req.validate().unwrap_err(), "Nome da sessão é obrigatório");

        req.session_name = "baseline".into();
        assert_eq!(req.validate().unwrap_err(), "Selecione um arquivo EDF");

        req.edf_file = "/data/S01.edf".into();
        assert_eq!(req.validate().unwrap_err(), "Selecione um paciente");

        req.patient_id = "Maria Souza_x1y2z3".into();
        assert!(req.validate().is_ok());
        assert!(req.is_complete());
    }

    #[test]
    fn profile_update_skips_blank_fields() {
        let update = ProfileUpdate {
            first_name: " Ana ".into(),
            age: "31".into(),
            ..Default::default()
        };
        assert_eq!(
            update.fields(),
            vec![("first_name", "Ana".to_string()), ("age", "31".to_string())]
        );
    }

    #[test]
    fn picture_rules() {
        assert!(validate_picture("image/png", 1024).is_ok());
        assert!(validate_picture("image/webp", MAX_PICTURE_BYTES).is_ok());
        assert!(validate_picture("application/pdf", 10).is_err());
        assert_eq!(
            validate_picture("image/jpeg", MAX_PICTURE_BYTES + 1).unwrap_err(),
            "A imagem deve ter no máximo 5MB"
        );
    }
}
