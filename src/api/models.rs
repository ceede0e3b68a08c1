//! Wire models for the persons backend
//!
//! These mirror the JSON the backend speaks. `Dni` is the only type with
//! client-side validation; everything else is trusted as the server sent it.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

// ─────────────────────────────────────────────────────────────────────────────
// Identifiers
// ─────────────────────────────────────────────────────────────────────────────

/// Server-assigned person identifier
///
/// The backend may send ids as JSON strings or integers. Both are kept as
/// their string form since the client only ever echoes them back in a URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawId", into = "String")]
pub struct PersonId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Int(i64),
}

impl From<RawId> for PersonId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => PersonId(s),
            RawId::Int(n) => PersonId(n.to_string()),
        }
    }
}

impl From<PersonId> for String {
    fn from(id: PersonId) -> Self {
        id.0
    }
}

impl PersonId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// DNI
// ─────────────────────────────────────────────────────────────────────────────

/// Client-side validation failures. Never sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// DNI empty or not made only of digits
    InvalidDni,
    /// Nombre or apellido empty after trimming
    MissingNames,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDni => write!(f, "Por favor, ingrese un DNI válido (solo números)."),
            Self::MissingNames => write!(f, "Nombre y apellido son obligatorios."),
        }
    }
}

impl std::error::Error for ValidationError {}

fn dni_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]+$").expect("DNI pattern is a valid regex"))
}

/// A validated DNI: trimmed, non-empty, digits only
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Dni(String);

impl Dni {
    /// Validate raw user input
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() || !dni_pattern().is_match(trimmed) {
            return Err(ValidationError::InvalidDni);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Dni {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Dni {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Trabajo
// ─────────────────────────────────────────────────────────────────────────────

/// Job/role tag attached to every person
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trabajo {
    #[default]
    Abc,
    Caja,
    Salud,
}

impl Trabajo {
    #[cfg(test)]
    pub const ALL: [Trabajo; 3] = [Trabajo::Abc, Trabajo::Caja, Trabajo::Salud];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Abc => "abc",
            Self::Caja => "caja",
            Self::Salud => "salud",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Abc => Self::Caja,
            Self::Caja => Self::Salud,
            Self::Salud => Self::Abc,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Abc => Self::Salud,
            Self::Caja => Self::Abc,
            Self::Salud => Self::Caja,
        }
    }
}

impl fmt::Display for Trabajo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Trabajo {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "abc" => Ok(Self::Abc),
            "caja" => Ok(Self::Caja),
            "salud" => Ok(Self::Salud),
            other => Err(format!("unknown trabajo '{}'", other)),
        }
    }
}

/// Directory filter over `Trabajo` ("todos" = no filter)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrabajoFilter {
    #[default]
    Todos,
    Only(Trabajo),
}

impl TrabajoFilter {
    /// Value sent as the `trabajo` query parameter
    pub fn as_query_value(&self) -> &'static str {
        match self {
            Self::Todos => "todos",
            Self::Only(t) => t.as_str(),
        }
    }

    /// Label shown in the filter selector
    pub fn label(&self) -> &'static str {
        match self {
            Self::Todos => "Todos los trabajos",
            Self::Only(t) => t.as_str(),
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Todos => Self::Only(Trabajo::Abc),
            Self::Only(Trabajo::Salud) => Self::Todos,
            Self::Only(t) => Self::Only(t.next()),
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Todos => Self::Only(Trabajo::Salud),
            Self::Only(Trabajo::Abc) => Self::Todos,
            Self::Only(t) => Self::Only(t.prev()),
        }
    }

    /// Whether a person passes this filter
    pub fn matches(&self, trabajo: Trabajo) -> bool {
        match self {
            Self::Todos => true,
            Self::Only(t) => *t == trabajo,
        }
    }
}

impl FromStr for TrabajoFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "todos" {
            Ok(Self::Todos)
        } else {
            s.parse().map(Self::Only)
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Person
// ─────────────────────────────────────────────────────────────────────────────

/// A registered person as returned by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub dni: String,
    pub nombre: String,
    pub apellido: String,
    pub trabajo: Trabajo,
}

impl Person {
    /// Fixed clipboard format: "<trabajo> <dni>"
    pub fn clipboard_text(&self) -> String {
        format!("{} {}", self.trabajo, self.dni)
    }
}

/// Body of `POST /personas`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPerson {
    pub dni: String,
    pub nombre: String,
    pub apellido: String,
    pub trabajo: Trabajo,
}

/// Query parameters of `GET /personas`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonQuery {
    /// Search term, or empty when the user's term is below the minimum length
    pub q: String,
    pub trabajo: TrabajoFilter,
}

impl PersonQuery {
    /// Build a query from raw filter state
    ///
    /// Terms shorter than `min_chars` characters are sent as an empty `q`,
    /// which the backend treats as "no search filter".
    pub fn from_filters(search_term: &str, trabajo: TrabajoFilter, min_chars: usize) -> Self {
        let q = if search_term.chars().count() >= min_chars {
            search_term.to_string()
        } else {
            String::new()
        };
        Self { q, trabajo }
    }

    pub fn params(&self) -> [(&'static str, &str); 2] {
        [("q", self.q.as_str()), ("trabajo", self.trabajo.as_query_value())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dni_accepts_digits_and_trims() {
        let dni = Dni::parse("  12345678 ").unwrap();
        assert_eq!(dni.as_str(), "12345678");
    }

    #[test]
    fn test_dni_rejects_non_numeric_and_empty() {
        for input in ["", "   ", "abc123", "12 34", "12.345", "-1", "１２３", "12a"] {
            assert_eq!(
                Dni::parse(input),
                Err(ValidationError::InvalidDni),
                "input {:?} should be rejected",
                input
            );
        }
    }

    #[test]
    fn test_person_id_accepts_string_or_integer() {
        let from_int: Person = serde_json::from_str(
            r#"{"id": 7, "dni": "1", "nombre": "Ana", "apellido": "Diaz", "trabajo": "caja"}"#,
        )
        .unwrap();
        assert_eq!(from_int.id.as_str(), "7");

        let from_str: Person = serde_json::from_str(
            r#"{"id": "65a1f", "dni": "1", "nombre": "Ana", "apellido": "Diaz", "trabajo": "abc"}"#,
        )
        .unwrap();
        assert_eq!(from_str.id.as_str(), "65a1f");
    }

    #[test]
    fn test_unknown_trabajo_is_rejected() {
        let result: Result<Person, _> = serde_json::from_str(
            r#"{"id": 1, "dni": "1", "nombre": "A", "apellido": "B", "trabajo": "otro"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_clipboard_text_format() {
        let person = Person {
            id: PersonId::new("1"),
            dni: "30111222".to_string(),
            nombre: "Ana".to_string(),
            apellido: "Diaz".to_string(),
            trabajo: Trabajo::Salud,
        };
        assert_eq!(person.clipboard_text(), "salud 30111222");
    }

    #[test]
    fn test_query_omits_short_terms() {
        for term in ["", "a", "ab"] {
            let query = PersonQuery::from_filters(term, TrabajoFilter::Todos, 3);
            assert_eq!(query.q, "", "term {:?} should not be sent", term);
        }
        let query = PersonQuery::from_filters("ana", TrabajoFilter::Only(Trabajo::Caja), 3);
        assert_eq!(query.q, "ana");
        assert_eq!(query.params(), [("q", "ana"), ("trabajo", "caja")]);
    }

    #[test]
    fn test_query_length_counts_characters() {
        // Two characters, four bytes
        let query = PersonQuery::from_filters("ñá", TrabajoFilter::Todos, 3);
        assert_eq!(query.q, "");
        let query = PersonQuery::from_filters("ñáé", TrabajoFilter::Todos, 3);
        assert_eq!(query.q, "ñáé");
    }

    #[test]
    fn test_filter_cycle_visits_every_value() {
        let mut filter = TrabajoFilter::Todos;
        let mut seen = vec![filter];
        for _ in 0..3 {
            filter = filter.next();
            seen.push(filter);
        }
        assert_eq!(filter.next(), TrabajoFilter::Todos);
        assert_eq!(seen.len(), 4);
        assert_eq!(TrabajoFilter::Todos.prev(), TrabajoFilter::Only(Trabajo::Salud));
        assert_eq!("todos".parse::<TrabajoFilter>(), Ok(TrabajoFilter::Todos));
    }
}
