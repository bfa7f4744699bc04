//! Display helpers shared by the pages. Everything here is pure so it renders
//! the same on the server and in the browser.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use mango_types::{Gender, ProcessingStatus};

/// Event codes of the EmoEEG-MC dataset as they appear in annotations.
pub const EMOTIONS: [(u32, &str); 6] = [
    (19, "Neutro"),
    (20, "Feliz"),
    (21, "Triste"),
    (22, "Medo"),
    (23, "Raiva"),
    (24, "Nojo"),
];

/// Whole years between `birth` and `today`.
pub fn calculate_age(birth: NaiveDate, today: NaiveDate) -> u32 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age.max(0) as u32
}

pub fn age_label(birth: Option<NaiveDate>, today: NaiveDate) -> String {
    match birth {
        Some(birth) => format!("{} anos", calculate_age(birth, today)),
        None => "N/A".into(),
    }
}

/// Formats the digits typed so far as `000.000.000-00`, dropping anything past
/// the eleventh digit.
pub fn format_cpf(input: &str) -> String {
    let digits: Vec<char> = input.chars().filter(|c| c.is_ascii_digit()).take(11).collect();
    let mut out = String::with_capacity(14);
    for (i, d) in digits.iter().enumerate() {
        match i {
            3 | 6 => out.push('.'),
            9 => out.push('-'),
            _ => {}
        }
        out.push(*d);
    }
    out
}

pub fn format_gender(gender: Option<&Gender>) -> &'static str {
    match gender {
        Some(Gender::Male) => "Masculino",
        Some(Gender::Female) => "Feminino",
        Some(Gender::Other) => "Outro",
        Some(Gender::Unknown) | None => "Não informado",
    }
}

pub fn status_label(status: &ProcessingStatus) -> &'static str {
    match status {
        ProcessingStatus::New => "Nova",
        ProcessingStatus::Processing => "Processando",
        ProcessingStatus::Completed => "Concluída",
        ProcessingStatus::Failed => "Falhou",
        ProcessingStatus::Queued => "Na Fila",
        ProcessingStatus::Unknown => "Desconhecido",
    }
}

pub fn status_class(status: &ProcessingStatus) -> &'static str {
    match status {
        ProcessingStatus::New => "status-new",
        ProcessingStatus::Processing => "status-processing",
        ProcessingStatus::Completed => "status-completed",
        ProcessingStatus::Failed => "status-failed",
        ProcessingStatus::Queued | ProcessingStatus::Unknown => "status-other",
    }
}

/// Binary units, two decimals at most: `1536` → `1.5 KB`.
pub fn format_file_size(bytes: Option<u64>) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let bytes = match bytes {
        Some(b) if b > 0 => b as f64,
        _ => return "0 B".into(),
    };

    let mut value = bytes;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", trim_decimals(rounded), UNITS[unit])
}

fn trim_decimals(value: f64) -> String {
    let text = format!("{value:.2}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

pub fn format_duration(seconds: Option<f64>) -> String {
    let total = match seconds {
        Some(s) if s > 0.0 => s as u64,
        _ => return "0s".into(),
    };
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{hours}h {minutes}m {secs}s")
    } else if minutes > 0 {
        format!("{minutes}m {secs}s")
    } else {
        format!("{secs}s")
    }
}

/// Gateway timestamps come as RFC 3339 or naive ISO strings; anything else is
/// shown verbatim.
pub fn format_date(value: Option<&str>) -> String {
    let Some(raw) = value.filter(|v| !v.trim().is_empty()) else {
        return "N/A".into();
    };
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.format("%d/%m/%Y %H:%M:%S").to_string();
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return parsed.format("%d/%m/%Y %H:%M:%S").to_string();
    }
    if let Ok(parsed) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return parsed.format("%d/%m/%Y").to_string();
    }
    raw.to_string()
}

pub fn emotion_for_type_id(typeId: u32) -> Option<&'static str> {
    EMOTIONS
        .iter()
        .find(|(id, _)| *id == typeId)
        .map(|(_, label)| *label)
}

pub fn emotion_class(typeId: u32) -> &'static str {
    match typeId {
        20 => "emotion-happy",
        21 => "emotion-sad",
        22 => "emotion-fear",
        23 => "emotion-anger",
        24 => "emotion-disgust",
        _ => "emotion-neutral",
    }
}

/// Page link carrying a backend message for the success screens.
pub fn with_message(path: &str, message: &str) -> String {
    format!("{path}?message={}", urlencoding::encode(message))
}

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn age_counts_completed_years() {
        assert_eq!(calculate_age(date(2000, 1, 1), date(2024, 6, 15)), 24);
        assert_eq!(calculate_age(date(2000, 6, 16), date(2024, 6, 15)), 23);
        assert_eq!(calculate_age(date(2000, 6, 15), date(2024, 6, 15)), 24);
        assert_eq!(calculate_age(date(2025, 1, 1), date(2024, 6, 15)), 0);
        assert_eq!(age_label(None, date(2024, 6, 15)), "N/A");
    }

    #[test]
    fn cpf_is_masked_progressively() {
        assert_eq!(format_cpf("123"), "123");
        assert_eq!(format_cpf("1234"), "123.4");
        assert_eq!(format_cpf("1234567"), "123.456.7");
        assert_eq!(format_cpf("12345678901"), "123.456.789-01");
        assert_eq!(format_cpf("123.456.789-0199"), "123.456.789-01");
        assert_eq!(format_cpf("abc"), "");
    }

    #[test]
    fn file_sizes_use_binary_units() {
        assert_eq!(format_file_size(None), "0 B");
        assert_eq!(format_file_size(Some(512)), "512 B");
        assert_eq!(format_file_size(Some(1536)), "1.5 KB");
        assert_eq!(format_file_size(Some(10 * 1024 * 1024)), "10 MB");
    }

    #[test]
    fn durations_drop_empty_leading_units() {
        assert_eq!(format_duration(None), "0s");
        assert_eq!(format_duration(Some(42.9)), "42s");
        assert_eq!(format_duration(Some(125.0)), "2m 5s");
        assert_eq!(format_duration(Some(3725.0)), "1h 2m 5s");
    }

    #[test]
    fn dates_render_in_brazilian_order() {
        assert_eq!(format_date(Some("2024-03-05T14:30:00Z")), "05/03/2024 14:30:00");
        assert_eq!(format_date(Some("2024-03-05")), "05/03/2024");
        assert_eq!(format_date(Some("ontem")), "ontem");
        assert_eq!(format_date(None), "N/A");
    }

    #[test]
    fn emotions_map_known_codes_only() {
        assert_eq!(emotion_for_type_id(20), Some("Feliz"));
        assert_eq!(emotion_for_type_id(99), None);
        assert_eq!(emotion_class(99), "emotion-neutral");
    }

    #[test]
    fn success_links_encode_the_message() {
        assert_eq!(
            with_message("/patients/add/success", "Paciente criado com sucesso!"),
            "/patients/add/success?message=Paciente%20criado%20com%20sucesso%21"
        );
        assert_eq!(
            with_message("/sessions/new/success", "ação & reação"),
            "/sessions/new/success?message=a%C3%A7%C3%A3o%20%26%20rea%C3%A7%C3%A3o"
        );
    }

    #[test]
    fn labels_cover_unknown_values() {
        assert_eq!(format_gender(None), "Não informado");
        assert_eq!(format_gender(Some(&Gender::Female)), "Feminino");
        assert_eq!(status_label(&ProcessingStatus::Queued), "Na Fila");
        assert_eq!(status_class(&ProcessingStatus::Completed), "status-completed");
    }
}
