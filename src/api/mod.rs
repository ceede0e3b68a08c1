// Backend API module
//
// Everything the client knows about the persons backend lives here:
// - models: wire types (Person, NewPerson, Trabajo, ...) and DNI validation
// - error: transport error taxonomy
// - client: reqwest-based async client over the REST endpoints

mod client;
mod error;
pub mod models;

pub use client::ApiClient;
pub use error::ApiError;
pub use models::{
    Dni, NewPerson, Person, PersonId, PersonQuery, Trabajo, TrabajoFilter, ValidationError,
};
