use std::path::PathBuf;

use shared::domain::{Field, Step};
use thiserror::Error;

pub const CONFIGURATION_MESSAGE: &str =
    "Veuillez configurer vos clés Supabase réelles avant de soumettre.";
pub const CONNECTION_FALLBACK_MESSAGE: &str =
    "Erreur de connexion au serveur. Vérifiez votre configuration.";

fn field_list(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|f| f.label())
        .collect::<Vec<_>>()
        .join(", ")
}

fn insert_message(detail: &str) -> &str {
    if detail.trim().is_empty() {
        CONNECTION_FALLBACK_MESSAGE
    } else {
        detail
    }
}

/// Refusal to leave the current step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepError {
    #[error("Champs obligatoires manquants ({step}): {}", field_list(.missing))]
    Incomplete { step: Step, missing: Vec<Field> },
    #[error("{field}: {reason}")]
    Invalid { field: Field, reason: String },
    #[error("l'étape « {0} » ne se franchit pas avec « Suivant »")]
    NotAdvanceable(Step),
}

/// File rejected at selection time; never reaches the draft.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("La photo passeport ne doit pas dépasser 5Mo.")]
    PhotoTooLarge { size_bytes: u64, limit_bytes: u64 },
    #[error("impossible de lire le fichier '{}': {reason}", .path.display())]
    Unreadable { path: PathBuf, reason: String },
    #[error("le dossier ne peut plus être modifié (étape: {step}, envoi en cours: {submitting})")]
    Locked { step: Step, submitting: bool },
}

/// Failure of the upload-then-insert sequence. `Display` is the banner text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("{}", CONFIGURATION_MESSAGE)]
    Configuration,
    #[error("Erreur Upload Photo: {0}. Avez-vous créé le bucket 'passport_photos' ?")]
    Upload(String),
    #[error("{}", insert_message(.0))]
    Insert(String),
}

/// Submission refused by the wizard before reaching the coordinator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitRejected {
    #[error("la soumission n'est possible qu'à l'étape des pièces justificatives (étape actuelle: {0})")]
    WrongStep(Step),
    #[error("la photo passeport est obligatoire")]
    MissingPhoto,
    #[error("une soumission est déjà en cours")]
    AlreadySubmitting,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Rejected(#[from] SubmitRejected),
    #[error(transparent)]
    Failed(#[from] SubmissionError),
}
