//! Registration form for a DNI confirmed absent

use crate::api::{Dni, NewPerson, Trabajo, ValidationError};
use crate::field::TextField;

/// Which form field has the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Nombre,
    Apellido,
    Trabajo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationForm {
    /// Captured when the lookup returned 404; later edits to the DNI input
    /// do not change it
    dni: Dni,
    pub nombre: TextField,
    pub apellido: TextField,
    pub trabajo: Trabajo,
    /// Last validation or create failure, shown under the form
    pub error: Option<String>,
}

impl RegistrationForm {
    pub fn new(dni: Dni) -> Self {
        Self {
            dni,
            nombre: TextField::new(),
            apellido: TextField::new(),
            trabajo: Trabajo::default(),
            error: None,
        }
    }

    pub fn dni(&self) -> &Dni {
        &self.dni
    }

    pub fn field_mut(&mut self, field: FormField) -> Option<&mut TextField> {
        match field {
            FormField::Nombre => Some(&mut self.nombre),
            FormField::Apellido => Some(&mut self.apellido),
            FormField::Trabajo => None,
        }
    }

    /// Build the create body; names are trimmed and must not be empty
    pub fn to_new_person(&self) -> Result<NewPerson, ValidationError> {
        let nombre = self.nombre.value().trim();
        let apellido = self.apellido.value().trim();
        if nombre.is_empty() || apellido.is_empty() {
            return Err(ValidationError::MissingNames);
        }
        Ok(NewPerson {
            dni: self.dni.as_str().to_string(),
            nombre: nombre.to_string(),
            apellido: apellido.to_string(),
            trabajo: self.trabajo,
        })
    }
}
