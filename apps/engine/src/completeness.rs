use crate::models::cv::{ContactInfo, EducationItem, ExperienceItem, ParsedCV};

const CONTACT_WEIGHT: f64 = 20.0;
const SUMMARY_WEIGHT: f64 = 15.0;
const EXPERIENCE_WEIGHT: f64 = 30.0;
const EDUCATION_WEIGHT: f64 = 15.0;
const SKILLS_WEIGHT: f64 = 20.0;

/// Scores how complete a parsed CV is, as an integer percentage 0-100.
pub fn completeness_score(cv: &ParsedCV) -> u8 {
    let total = CONTACT_WEIGHT * contact_score(&cv.contact)
        + SUMMARY_WEIGHT * summary_score(&cv.summary)
        + EXPERIENCE_WEIGHT * experience_score(&cv.experience)
        + EDUCATION_WEIGHT * education_score(&cv.education)
        + SKILLS_WEIGHT * skills_score(&cv.skills);
    total.round() as u8
}

fn contact_score(contact: &ContactInfo) -> f64 {
    let core_fields = [
        &contact.full_name,
        &contact.email,
        &contact.phone,
        &contact.location,
    ];
    let filled = core_fields.iter().filter(|f| !f.trim().is_empty()).count();
    filled as f64 / core_fields.len() as f64
}

/// A summary in the 400-600 character band reads best; shorter or longer
/// drafts earn partial credit.
fn summary_score(summary: &str) -> f64 {
    match summary.trim().chars().count() {
        0 => 0.0,
        400..=600 => 1.0,
        200..=399 => 0.7,
        601..=800 => 0.8,
        _ => 0.5,
    }
}

fn experience_score(entries: &[ExperienceItem]) -> f64 {
    if entries.is_empty() {
        return 0.0;
    }
    let complete = entries
        .iter()
        .filter(|e| !e.title.trim().is_empty() && !e.company.trim().is_empty())
        .count();
    match complete {
        0 => 0.3,
        1 => 0.7,
        _ => 1.0,
    }
}

fn education_score(entries: &[EducationItem]) -> f64 {
    if entries.is_empty() {
        return 0.0;
    }
    let has_complete = entries
        .iter()
        .any(|e| !e.institution.trim().is_empty() && !e.degree.trim().is_empty());
    if has_complete {
        1.0
    } else {
        0.3
    }
}

fn skills_score(skills: &[String]) -> f64 {
    match skills.len() {
        0 => 0.0,
        n if n >= 5 => 1.0,
        n if n >= 3 => 0.7,
        _ => 0.4,
    }
}
