// DNI lookup and registration workflow
//
// A single state machine: `LookupWorkflow::update` is the only place the
// phase changes. It never performs I/O; requests leave as `Effect::Run` and
// come back as `LookupMsg::*Completed` carrying the attempt id they were
// issued with. A completion for any attempt other than the one in flight is
// dropped.
//
//   Idle ──Submit──▶ InvalidInput
//     │
//     └──Submit──▶ Querying ──▶ Found | Registering | QueryError
//                                         │
//                      Registering ──SubmitRegistration──▶ Submitting
//                           │                                 │
//                           └──Cancel──▶ Dismissed            ├──ok──▶ Idle (+ Registered)
//                                                             └──err─▶ Registering

mod form;

pub use form::{FormField, RegistrationForm};

use crate::api::{ApiError, Dni, Person};
use crate::commands::{AttemptId, Command, Effect, Notice};
use crate::field::{FieldEdit, TextField};

pub const SEARCHING: &str = "Buscando...";
pub const SERVER_UNREACHABLE: &str = "Error al conectar con el servidor.";
pub const REGISTERED: &str = "¡Persona registrada con éxito!";

fn already_registered(dni: &Dni) -> String {
    format!("El DNI '{}' ya está registrado.", dni)
}

fn not_registered(dni: &Dni) -> String {
    format!("El DNI '{}' no existe. Puede registrarlo.", dni)
}

fn register_failed(err: &ApiError) -> String {
    format!("Error al registrar: {}", err.user_text())
}

/// Where the current lookup attempt stands
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    /// Input failed validation; nothing was sent
    InvalidInput,
    Querying {
        attempt: AttemptId,
        dni: Dni,
    },
    Found(Person),
    /// 404: the form is open for this DNI
    Registering(RegistrationForm),
    Submitting {
        attempt: AttemptId,
        form: RegistrationForm,
    },
    /// Form closed by the user; the lookup message stays
    Dismissed,
    QueryError,
}

/// Inputs to the workflow
#[derive(Debug, Clone)]
pub enum LookupMsg {
    EditDni(FieldEdit),
    /// Validate the DNI input and query the backend
    Submit,
    LookupCompleted {
        attempt: AttemptId,
        result: Result<Option<Person>, ApiError>,
    },
    EditForm(FormField, FieldEdit),
    NextTrabajo,
    PrevTrabajo,
    SubmitRegistration,
    CreateCompleted {
        attempt: AttemptId,
        result: Result<Option<Person>, ApiError>,
    },
    CancelRegistration,
    CopyFound,
}

#[derive(Debug, Default)]
pub struct LookupWorkflow {
    pub dni_input: TextField,
    phase: Phase,
    message: Option<String>,
    last_attempt: AttemptId,
}

impl LookupWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Status line under the DNI input
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn found(&self) -> Option<&Person> {
        match &self.phase {
            Phase::Found(person) => Some(person),
            _ => None,
        }
    }

    /// The open form, whether editable or in flight
    pub fn form(&self) -> Option<&RegistrationForm> {
        match &self.phase {
            Phase::Registering(form) | Phase::Submitting { form, .. } => Some(form),
            _ => None,
        }
    }

    /// Whether the form accepts edits
    pub fn form_editable(&self) -> bool {
        matches!(self.phase, Phase::Registering(_))
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, Phase::Submitting { .. })
    }

    fn next_attempt(&mut self) -> AttemptId {
        self.last_attempt += 1;
        self.last_attempt
    }

    /// The one transition function
    pub fn update(&mut self, msg: LookupMsg) -> Vec<Effect> {
        match msg {
            LookupMsg::EditDni(edit) => {
                self.dni_input.apply(edit);
                Vec::new()
            }
            LookupMsg::Submit => self.submit_lookup(),
            LookupMsg::LookupCompleted { attempt, result } => {
                self.lookup_completed(attempt, result);
                Vec::new()
            }
            LookupMsg::EditForm(field, edit) => {
                if let Phase::Registering(form) = &mut self.phase {
                    if let Some(text) = form.field_mut(field) {
                        text.apply(edit);
                    }
                }
                Vec::new()
            }
            LookupMsg::NextTrabajo => {
                if let Phase::Registering(form) = &mut self.phase {
                    form.trabajo = form.trabajo.next();
                }
                Vec::new()
            }
            LookupMsg::PrevTrabajo => {
                if let Phase::Registering(form) = &mut self.phase {
                    form.trabajo = form.trabajo.prev();
                }
                Vec::new()
            }
            LookupMsg::SubmitRegistration => self.submit_registration(),
            LookupMsg::CreateCompleted { attempt, result } => {
                self.create_completed(attempt, result)
            }
            LookupMsg::CancelRegistration => {
                if matches!(self.phase, Phase::Registering(_)) {
                    tracing::debug!("Registration form dismissed");
                    self.phase = Phase::Dismissed;
                }
                Vec::new()
            }
            LookupMsg::CopyFound => match &self.phase {
                Phase::Found(person) => vec![Effect::Run(Command::CopyToClipboard {
                    text: person.clipboard_text(),
                })],
                _ => Vec::new(),
            },
        }
    }

    fn submit_lookup(&mut self) -> Vec<Effect> {
        // A create in flight must be allowed to finish and emit its refresh
        if self.is_submitting() {
            tracing::debug!("Lookup ignored: registration in flight");
            return Vec::new();
        }

        let dni = match Dni::parse(self.dni_input.value()) {
            Ok(dni) => dni,
            Err(e) => {
                tracing::debug!("Rejected DNI input {:?}", self.dni_input.value());
                self.phase = Phase::InvalidInput;
                self.message = Some(e.to_string());
                return Vec::new();
            }
        };

        let attempt = self.next_attempt();
        tracing::debug!("Lookup attempt {} for DNI {}", attempt, dni);
        self.phase = Phase::Querying {
            attempt,
            dni: dni.clone(),
        };
        self.message = Some(SEARCHING.to_string());
        vec![Effect::Run(Command::LookupDni { attempt, dni })]
    }

    fn lookup_completed(&mut self, attempt: AttemptId, result: Result<Option<Person>, ApiError>) {
        let dni = match &self.phase {
            Phase::Querying {
                attempt: current,
                dni,
            } if *current == attempt => dni.clone(),
            _ => {
                tracing::debug!("Discarding stale lookup completion (attempt {})", attempt);
                return;
            }
        };

        match result {
            Ok(Some(person)) => {
                self.message = Some(already_registered(&dni));
                self.phase = Phase::Found(person);
            }
            Ok(None) => {
                self.message = Some(not_registered(&dni));
                self.phase = Phase::Registering(RegistrationForm::new(dni));
            }
            Err(_) => {
                self.message = Some(SERVER_UNREACHABLE.to_string());
                self.phase = Phase::QueryError;
            }
        }
    }

    fn submit_registration(&mut self) -> Vec<Effect> {
        let Phase::Registering(form) = &mut self.phase else {
            return Vec::new();
        };

        let person = match form.to_new_person() {
            Ok(person) => person,
            Err(e) => {
                let text = e.to_string();
                form.error = Some(text.clone());
                return vec![Effect::Notify(Notice::error(text))];
            }
        };

        let mut form = form.clone();
        form.error = None;
        let attempt = self.next_attempt();
        tracing::debug!("Registration attempt {} for DNI {}", attempt, person.dni);
        self.phase = Phase::Submitting { attempt, form };
        vec![Effect::Run(Command::CreatePerson { attempt, person })]
    }

    fn create_completed(
        &mut self,
        attempt: AttemptId,
        result: Result<Option<Person>, ApiError>,
    ) -> Vec<Effect> {
        match &self.phase {
            Phase::Submitting {
                attempt: current, ..
            } if *current == attempt => {}
            _ => {
                tracing::debug!("Discarding stale create completion (attempt {})", attempt);
                return Vec::new();
            }
        }

        match result {
            Ok(_) => {
                self.phase = Phase::Idle;
                self.message = None;
                self.dni_input.clear();
                vec![Effect::Notify(Notice::success(REGISTERED)), Effect::Registered]
            }
            Err(e) => {
                let text = register_failed(&e);
                if let Phase::Submitting { form, .. } = std::mem::take(&mut self.phase) {
                    let mut form = form;
                    form.error = Some(text.clone());
                    self.phase = Phase::Registering(form);
                }
                vec![Effect::Notify(Notice::error(text))]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{NewPerson, PersonId, Trabajo};
    use crate::commands::NoticeKind;

    fn type_text(workflow: &mut LookupWorkflow, text: &str) {
        for c in text.chars() {
            workflow.update(LookupMsg::EditDni(FieldEdit::Insert(c)));
        }
    }

    fn type_form(workflow: &mut LookupWorkflow, field: FormField, text: &str) {
        for c in text.chars() {
            workflow.update(LookupMsg::EditForm(field, FieldEdit::Insert(c)));
        }
    }

    fn person(dni: &str) -> Person {
        Person {
            id: PersonId::new("7"),
            dni: dni.to_string(),
            nombre: "Juan".to_string(),
            apellido: "Pérez".to_string(),
            trabajo: Trabajo::Caja,
        }
    }

    fn not_found() -> ApiError {
        ApiError::Status {
            status: 404,
            message: None,
        }
    }

    /// Submit a lookup and return its attempt id
    fn start_lookup(workflow: &mut LookupWorkflow, dni: &str) -> AttemptId {
        workflow.dni_input.clear();
        type_text(workflow, dni);
        let effects = workflow.update(LookupMsg::Submit);
        match effects.as_slice() {
            [Effect::Run(Command::LookupDni { attempt, .. })] => *attempt,
            other => panic!("expected one lookup command, got {:?}", other),
        }
    }

    fn open_form(workflow: &mut LookupWorkflow, dni: &str) {
        let attempt = start_lookup(workflow, dni);
        workflow.update(LookupMsg::LookupCompleted {
            attempt,
            result: Ok(None),
        });
    }

    #[test]
    fn test_invalid_input_sends_nothing() {
        for input in ["", "   ", "abc123", "12-34", "1.5"] {
            let mut workflow = LookupWorkflow::new();
            type_text(&mut workflow, input);
            let effects = workflow.update(LookupMsg::Submit);

            assert!(effects.is_empty(), "input {:?} produced {:?}", input, effects);
            assert_eq!(workflow.phase(), &Phase::InvalidInput);
            assert_eq!(
                workflow.message(),
                Some("Por favor, ingrese un DNI válido (solo números).")
            );
        }
    }

    #[test]
    fn test_invalid_input_hides_previous_result() {
        let mut workflow = LookupWorkflow::new();
        let attempt = start_lookup(&mut workflow, "27987654");
        workflow.update(LookupMsg::LookupCompleted {
            attempt,
            result: Ok(Some(person("27987654"))),
        });
        assert!(workflow.found().is_some());

        workflow.dni_input.clear();
        type_text(&mut workflow, "x");
        workflow.update(LookupMsg::Submit);
        assert!(workflow.found().is_none());
        assert!(workflow.form().is_none());
    }

    #[test]
    fn test_valid_input_is_trimmed_and_shows_searching() {
        let mut workflow = LookupWorkflow::new();
        type_text(&mut workflow, "  123 ");
        let effects = workflow.update(LookupMsg::Submit);

        match effects.as_slice() {
            [Effect::Run(Command::LookupDni { dni, .. })] => assert_eq!(dni.as_str(), "123"),
            other => panic!("unexpected effects {:?}", other),
        }
        assert_eq!(workflow.message(), Some("Buscando..."));
    }

    #[test]
    fn test_found_shows_record_without_form() {
        let mut workflow = LookupWorkflow::new();
        let attempt = start_lookup(&mut workflow, "27987654");
        workflow.update(LookupMsg::LookupCompleted {
            attempt,
            result: Ok(Some(person("27987654"))),
        });

        assert_eq!(
            workflow.message(),
            Some("El DNI '27987654' ya está registrado.")
        );
        assert!(workflow.form().is_none());

        let effects = workflow.update(LookupMsg::CopyFound);
        assert_eq!(
            effects,
            vec![Effect::Run(Command::CopyToClipboard {
                text: "caja 27987654".to_string()
            })]
        );
    }

    #[test]
    fn test_not_found_opens_form_with_dni() {
        let mut workflow = LookupWorkflow::new();
        open_form(&mut workflow, "12345678");

        assert_eq!(
            workflow.message(),
            Some("El DNI '12345678' no existe. Puede registrarlo.")
        );
        let form = workflow.form().expect("form shown");
        assert_eq!(form.dni().as_str(), "12345678");
        assert_eq!(form.trabajo, Trabajo::Abc);
        assert!(workflow.found().is_none());
    }

    #[test]
    fn test_transport_error_shows_generic_message() {
        let mut workflow = LookupWorkflow::new();
        let attempt = start_lookup(&mut workflow, "1");
        workflow.update(LookupMsg::LookupCompleted {
            attempt,
            result: Err(ApiError::Status {
                status: 500,
                message: Some("boom".to_string()),
            }),
        });

        assert_eq!(workflow.phase(), &Phase::QueryError);
        assert_eq!(workflow.message(), Some("Error al conectar con el servidor."));
        assert!(workflow.form().is_none());

        // Even a 404 wrapped as an error is a transport failure here
        let attempt = start_lookup(&mut workflow, "2");
        workflow.update(LookupMsg::LookupCompleted {
            attempt,
            result: Err(not_found()),
        });
        assert_eq!(workflow.phase(), &Phase::QueryError);
    }

    #[test]
    fn test_stale_lookup_completion_is_discarded() {
        let mut workflow = LookupWorkflow::new();
        let first = start_lookup(&mut workflow, "111");
        let second = start_lookup(&mut workflow, "222");
        assert_ne!(first, second);

        // The older request answers last
        workflow.update(LookupMsg::LookupCompleted {
            attempt: second,
            result: Ok(None),
        });
        workflow.update(LookupMsg::LookupCompleted {
            attempt: first,
            result: Ok(Some(person("111"))),
        });

        assert!(workflow.found().is_none());
        assert_eq!(workflow.form().unwrap().dni().as_str(), "222");
    }

    #[test]
    fn test_missing_names_block_submission() {
        let mut workflow = LookupWorkflow::new();
        open_form(&mut workflow, "5");
        type_form(&mut workflow, FormField::Nombre, "Ana");
        type_form(&mut workflow, FormField::Apellido, "   ");

        let effects = workflow.update(LookupMsg::SubmitRegistration);
        assert_eq!(
            effects,
            vec![Effect::Notify(Notice::error(
                "Nombre y apellido son obligatorios."
            ))]
        );
        assert!(workflow.form_editable());
        assert_eq!(
            workflow.form().unwrap().error.as_deref(),
            Some("Nombre y apellido son obligatorios.")
        );
    }

    #[test]
    fn test_registration_success_clears_and_refreshes_once() {
        let mut workflow = LookupWorkflow::new();
        open_form(&mut workflow, "12345678");
        type_form(&mut workflow, FormField::Nombre, "Ana");
        type_form(&mut workflow, FormField::Apellido, "Diaz");
        workflow.update(LookupMsg::NextTrabajo);
        workflow.update(LookupMsg::NextTrabajo);

        let effects = workflow.update(LookupMsg::SubmitRegistration);
        let attempt = match effects.as_slice() {
            [Effect::Run(Command::CreatePerson { attempt, person })] => {
                assert_eq!(
                    person,
                    &NewPerson {
                        dni: "12345678".to_string(),
                        nombre: "Ana".to_string(),
                        apellido: "Diaz".to_string(),
                        trabajo: Trabajo::Salud,
                    }
                );
                *attempt
            }
            other => panic!("expected one create command, got {:?}", other),
        };
        assert!(workflow.is_submitting());
        assert!(!workflow.form_editable());

        let effects = workflow.update(LookupMsg::CreateCompleted {
            attempt,
            result: Ok(None),
        });
        assert_eq!(
            effects,
            vec![
                Effect::Notify(Notice::success("¡Persona registrada con éxito!")),
                Effect::Registered,
            ]
        );
        assert_eq!(workflow.phase(), &Phase::Idle);
        assert_eq!(workflow.message(), None);
        assert!(workflow.dni_input.is_empty());

        // A duplicate completion does not refresh twice
        let effects = workflow.update(LookupMsg::CreateCompleted {
            attempt,
            result: Ok(None),
        });
        assert!(effects.is_empty());
    }

    #[test]
    fn test_registration_failure_keeps_form_values() {
        let mut workflow = LookupWorkflow::new();
        open_form(&mut workflow, "555");
        type_form(&mut workflow, FormField::Nombre, "Ana");
        type_form(&mut workflow, FormField::Apellido, "Diaz");

        let effects = workflow.update(LookupMsg::SubmitRegistration);
        let Some(Effect::Run(Command::CreatePerson { attempt, .. })) = effects.first() else {
            panic!("expected create command");
        };

        let effects = workflow.update(LookupMsg::CreateCompleted {
            attempt: *attempt,
            result: Err(ApiError::Status {
                status: 409,
                message: Some("El DNI '555' ya está registrado.".to_string()),
            }),
        });

        let expected = "Error al registrar: El DNI '555' ya está registrado.";
        assert_eq!(effects, vec![Effect::Notify(Notice::error(expected))]);
        let form = workflow.form().unwrap();
        assert!(workflow.form_editable());
        assert_eq!(form.nombre.value(), "Ana");
        assert_eq!(form.apellido.value(), "Diaz");
        assert_eq!(form.error.as_deref(), Some(expected));

        // Falls back to the transport text when the server sent no error body
        let effects = workflow.update(LookupMsg::SubmitRegistration);
        let Some(Effect::Run(Command::CreatePerson { attempt, .. })) = effects.first() else {
            panic!("expected create command");
        };
        let effects = workflow.update(LookupMsg::CreateCompleted {
            attempt: *attempt,
            result: Err(ApiError::Network("connection refused".to_string())),
        });
        match effects.as_slice() {
            [Effect::Notify(notice)] => {
                assert_eq!(notice.kind, NoticeKind::Error);
                assert_eq!(
                    notice.text,
                    "Error al registrar: Network error: connection refused"
                );
            }
            other => panic!("unexpected effects {:?}", other),
        }
    }

    #[test]
    fn test_cancel_keeps_message_and_hides_form() {
        let mut workflow = LookupWorkflow::new();
        open_form(&mut workflow, "9");
        workflow.update(LookupMsg::CancelRegistration);

        assert_eq!(workflow.phase(), &Phase::Dismissed);
        assert!(workflow.form().is_none());
        assert_eq!(
            workflow.message(),
            Some("El DNI '9' no existe. Puede registrarlo.")
        );
    }

    #[test]
    fn test_form_keeps_captured_dni_after_input_edit() {
        let mut workflow = LookupWorkflow::new();
        open_form(&mut workflow, "100");
        type_text(&mut workflow, "999");
        type_form(&mut workflow, FormField::Nombre, "Ana");
        type_form(&mut workflow, FormField::Apellido, "Diaz");

        let effects = workflow.update(LookupMsg::SubmitRegistration);
        match effects.as_slice() {
            [Effect::Run(Command::CreatePerson { person, .. })] => assert_eq!(person.dni, "100"),
            other => panic!("unexpected effects {:?}", other),
        }
    }

    #[test]
    fn test_lookup_refused_while_submitting() {
        let mut workflow = LookupWorkflow::new();
        open_form(&mut workflow, "100");
        type_form(&mut workflow, FormField::Nombre, "Ana");
        type_form(&mut workflow, FormField::Apellido, "Diaz");
        workflow.update(LookupMsg::SubmitRegistration);

        workflow.dni_input.clear();
        type_text(&mut workflow, "200");
        assert!(workflow.update(LookupMsg::Submit).is_empty());
        assert!(workflow.update(LookupMsg::CancelRegistration).is_empty());
        assert!(workflow.is_submitting());
    }
}
