//! Target path parsing and resolution.
//!
//! A suggestion target is a dot-separated path such as
//! `experience.0.highlights.2`. Resolution walks the navigation prefix
//! (every segment but the last) from the document root and returns the
//! immediate parent container; the final key is interpreted by the patch
//! policy, not here.
//!
//! The document is a fixed-shape record, so field access goes through a
//! closed accessor table per record kind. Only array indices and the
//! open-ended string lists are dynamic.

use std::fmt;

use super::ApplyError;
use crate::models::cv::{
    CertificationItem, ContactInfo, EducationItem, ExperienceItem, ParsedCV, ProjectItem,
};

/// One path segment. A segment that parses as a non-negative base-10
/// integer is an index; anything else is a field name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Field(String),
    Index(usize),
}

impl Segment {
    fn parse(raw: &str) -> Segment {
        match raw.parse::<usize>() {
            Ok(index) => Segment::Index(index),
            Err(_) => Segment::Field(raw.to_string()),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Field(name) => f.write_str(name),
            Segment::Index(index) => write!(f, "{}", index),
        }
    }
}

/// A validated, non-empty target path split into navigation prefix and
/// final key.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetPath {
    raw: String,
    prefix: Vec<Segment>,
    last: Segment,
}

impl TargetPath {
    pub fn parse(raw: &str) -> Result<TargetPath, ApplyError> {
        if raw.is_empty() {
            return Err(nav_err(raw, "", "empty target path"));
        }
        let mut segments = Vec::new();
        for part in raw.split('.') {
            if part.is_empty() {
                return Err(nav_err(raw, part, "empty path segment"));
            }
            segments.push(Segment::parse(part));
        }
        let Some(last) = segments.pop() else {
            return Err(nav_err(raw, "", "empty target path"));
        };
        Ok(TargetPath {
            raw: raw.to_string(),
            prefix: segments,
            last,
        })
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn prefix(&self) -> &[Segment] {
        &self.prefix
    }

    pub fn last(&self) -> &Segment {
        &self.last
    }
}

impl fmt::Display for TargetPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Record kinds a path can stand on while navigating.
#[derive(Debug)]
pub enum Node<'a> {
    Root(&'a mut ParsedCV),
    Contact(&'a mut ContactInfo),
    Experience(&'a mut ExperienceItem),
    Education(&'a mut EducationItem),
    Certification(&'a mut CertificationItem),
    Project(&'a mut ProjectItem),
}

/// The four section lists whose entries are records addressed by index.
#[derive(Debug)]
pub enum Rows<'a> {
    Experience(&'a mut Vec<ExperienceItem>),
    Education(&'a mut Vec<EducationItem>),
    Certifications(&'a mut Vec<CertificationItem>),
    Projects(&'a mut Vec<ProjectItem>),
}

impl<'a> Rows<'a> {
    pub fn name(&self) -> &'static str {
        match self {
            Rows::Experience(_) => "experience",
            Rows::Education(_) => "education",
            Rows::Certifications(_) => "certifications",
            Rows::Projects(_) => "projects",
        }
    }

    fn len(&self) -> usize {
        match self {
            Rows::Experience(rows) => rows.len(),
            Rows::Education(rows) => rows.len(),
            Rows::Certifications(rows) => rows.len(),
            Rows::Projects(rows) => rows.len(),
        }
    }

    fn entry(self, index: usize) -> Option<Node<'a>> {
        match self {
            Rows::Experience(rows) => rows.get_mut(index).map(Node::Experience),
            Rows::Education(rows) => rows.get_mut(index).map(Node::Education),
            Rows::Certifications(rows) => rows.get_mut(index).map(Node::Certification),
            Rows::Projects(rows) => rows.get_mut(index).map(Node::Project),
        }
    }
}

/// Any container a navigation step can land on.
#[derive(Debug)]
pub enum Cursor<'a> {
    Record(Node<'a>),
    Entries(Rows<'a>),
    Strings(&'a mut Vec<String>),
}

/// What a record field name refers to.
#[derive(Debug)]
pub enum Slot<'a> {
    /// An editable text leaf.
    Text(&'a mut String),
    /// An open-ended list of strings (skills, languages, highlights,
    /// technologies).
    List(&'a mut Vec<String>),
    /// A section list of records.
    Section(Rows<'a>),
    /// A nested record (contact).
    Nested(Node<'a>),
    /// Exists in the document but is never edited through a suggestion
    /// (`id`, `current`, `parsing_success`).
    ReadOnly,
}

impl<'a> Node<'a> {
    /// The closed accessor table: every field name a path may use, per
    /// record kind, keyed by its wire spelling.
    pub fn slot(self, name: &str) -> Option<Slot<'a>> {
        match self {
            Node::Root(cv) => match name {
                "contact" => Some(Slot::Nested(Node::Contact(&mut cv.contact))),
                "summary" => Some(Slot::Text(&mut cv.summary)),
                "experience" => Some(Slot::Section(Rows::Experience(&mut cv.experience))),
                "education" => Some(Slot::Section(Rows::Education(&mut cv.education))),
                "skills" => Some(Slot::List(&mut cv.skills)),
                "certifications" => {
                    Some(Slot::Section(Rows::Certifications(&mut cv.certifications)))
                }
                "projects" => Some(Slot::Section(Rows::Projects(&mut cv.projects))),
                "languages" => Some(Slot::List(&mut cv.languages)),
                "parsing_success" => Some(Slot::ReadOnly),
                _ => None,
            },
            Node::Contact(contact) => match name {
                "fullName" => Some(Slot::Text(&mut contact.full_name)),
                "email" => Some(Slot::Text(&mut contact.email)),
                "phone" => Some(Slot::Text(&mut contact.phone)),
                "location" => Some(Slot::Text(&mut contact.location)),
                "linkedIn" => Some(Slot::Text(&mut contact.linked_in)),
                "website" => Some(Slot::Text(&mut contact.website)),
                _ => None,
            },
            Node::Experience(entry) => match name {
                "company" => Some(Slot::Text(&mut entry.company)),
                "title" => Some(Slot::Text(&mut entry.title)),
                "location" => Some(Slot::Text(&mut entry.location)),
                "startDate" => Some(Slot::Text(&mut entry.start_date)),
                "endDate" => Some(Slot::Text(&mut entry.end_date)),
                "description" => Some(Slot::Text(&mut entry.description)),
                "highlights" => Some(Slot::List(&mut entry.highlights)),
                "id" | "current" => Some(Slot::ReadOnly),
                _ => None,
            },
            Node::Education(entry) => match name {
                "institution" => Some(Slot::Text(&mut entry.institution)),
                "degree" => Some(Slot::Text(&mut entry.degree)),
                "field" => Some(Slot::Text(&mut entry.field)),
                "location" => Some(Slot::Text(&mut entry.location)),
                "startDate" => Some(Slot::Text(&mut entry.start_date)),
                "endDate" => Some(Slot::Text(&mut entry.end_date)),
                "gpa" => Some(Slot::Text(&mut entry.gpa)),
                "highlights" => Some(Slot::List(&mut entry.highlights)),
                "id" => Some(Slot::ReadOnly),
                _ => None,
            },
            Node::Certification(entry) => match name {
                "name" => Some(Slot::Text(&mut entry.name)),
                "issuer" => Some(Slot::Text(&mut entry.issuer)),
                "date" => Some(Slot::Text(&mut entry.date)),
                "expiryDate" => Some(Slot::Text(&mut entry.expiry_date)),
                "credentialId" => Some(Slot::Text(&mut entry.credential_id)),
                "url" => Some(Slot::Text(&mut entry.url)),
                "id" => Some(Slot::ReadOnly),
                _ => None,
            },
            Node::Project(entry) => match name {
                "name" => Some(Slot::Text(&mut entry.name)),
                "description" => Some(Slot::Text(&mut entry.description)),
                "technologies" => Some(Slot::List(&mut entry.technologies)),
                "url" => Some(Slot::Text(&mut entry.url)),
                "startDate" => Some(Slot::Text(&mut entry.start_date)),
                "endDate" => Some(Slot::Text(&mut entry.end_date)),
                "id" => Some(Slot::ReadOnly),
                _ => None,
            },
        }
    }
}

/// Walks the navigation prefix of `path` and returns the parent container
/// the final key applies to. The value at the final key is neither read nor
/// written here.
pub fn resolve<'a>(cv: &'a mut ParsedCV, path: &TargetPath) -> Result<Cursor<'a>, ApplyError> {
    let mut cursor = Cursor::Record(Node::Root(cv));
    for segment in path.prefix() {
        cursor = step(cursor, segment, path.raw())?;
    }
    Ok(cursor)
}

fn step<'a>(cursor: Cursor<'a>, segment: &Segment, path: &str) -> Result<Cursor<'a>, ApplyError> {
    match (cursor, segment) {
        (Cursor::Record(node), Segment::Field(name)) => match node.slot(name) {
            Some(Slot::Nested(inner)) => Ok(Cursor::Record(inner)),
            Some(Slot::Section(rows)) => Ok(Cursor::Entries(rows)),
            Some(Slot::List(items)) => Ok(Cursor::Strings(items)),
            Some(Slot::Text(_)) | Some(Slot::ReadOnly) => Err(nav_err(
                path,
                name,
                "cannot descend into a scalar field",
            )),
            None => Err(nav_err(path, name, "unknown field")),
        },
        (Cursor::Record(_), Segment::Index(index)) => Err(nav_err(
            path,
            &index.to_string(),
            "cannot index into a record",
        )),
        (Cursor::Entries(rows), Segment::Index(index)) => {
            let len = rows.len();
            match rows.entry(*index) {
                Some(node) => Ok(Cursor::Record(node)),
                None => Err(nav_err(
                    path,
                    &index.to_string(),
                    &format!("index out of range (section has {} entries)", len),
                )),
            }
        }
        (Cursor::Entries(rows), Segment::Field(name)) => Err(nav_err(
            path,
            name,
            &format!("expected an index into the {} list", rows.name()),
        )),
        (Cursor::Strings(items), Segment::Index(index)) => {
            if *index < items.len() {
                Err(nav_err(
                    path,
                    &index.to_string(),
                    "cannot descend into a string element",
                ))
            } else {
                Err(nav_err(path, &index.to_string(), "index out of range"))
            }
        }
        (Cursor::Strings(_), Segment::Field(name)) => {
            Err(nav_err(path, name, "expected an index into a string list"))
        }
    }
}

fn nav_err(path: &str, segment: &str, detail: &str) -> ApplyError {
    ApplyError::Navigation {
        path: path.to_string(),
        segment: segment.to_string(),
        detail: detail.to_string(),
    }
}
