use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Gender {
    #[default]
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    /// Value stored in the `gender` column.
    pub fn code(self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "Masculin",
            Gender::Female => "Féminin",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.code() == code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MaritalStatus {
    #[default]
    #[serde(rename = "Célibataire")]
    Single,
    #[serde(rename = "Marié(e)")]
    Married,
    #[serde(rename = "Divorcé(e)")]
    Divorced,
    #[serde(rename = "Veuf(ve)")]
    Widowed,
}

impl MaritalStatus {
    pub const ALL: [MaritalStatus; 4] = [
        MaritalStatus::Single,
        MaritalStatus::Married,
        MaritalStatus::Divorced,
        MaritalStatus::Widowed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MaritalStatus::Single => "Célibataire",
            MaritalStatus::Married => "Marié(e)",
            MaritalStatus::Divorced => "Divorcé(e)",
            MaritalStatus::Widowed => "Veuf(ve)",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

impl fmt::Display for MaritalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wizard screens. The first three form a strictly linear sequence;
/// `Confirmation` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    #[default]
    Identity,
    Academic,
    Documents,
    Confirmation,
}

impl Step {
    pub fn next(self) -> Option<Step> {
        match self {
            Step::Identity => Some(Step::Academic),
            Step::Academic => Some(Step::Documents),
            Step::Documents | Step::Confirmation => None,
        }
    }

    pub fn previous(self) -> Option<Step> {
        match self {
            Step::Academic => Some(Step::Identity),
            Step::Documents => Some(Step::Academic),
            Step::Identity | Step::Confirmation => None,
        }
    }

    /// 1-based position shown in the wizard header; `None` for the terminal screen.
    pub fn ordinal(self) -> Option<usize> {
        match self {
            Step::Identity => Some(1),
            Step::Academic => Some(2),
            Step::Documents => Some(3),
            Step::Confirmation => None,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Step::Identity => "Identité",
            Step::Academic => "Orientation Académique",
            Step::Documents => "Pièces Justificatives",
            Step::Confirmation => "Confirmation",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Free-text fields of the registration draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    FirstName,
    LastName,
    BirthDate,
    BirthPlace,
    Phone,
    Email,
    PreviousSchool,
    TargetFaculty,
    TargetDepartment,
}

impl Field {
    pub const IDENTITY: [Field; 6] = [
        Field::FirstName,
        Field::LastName,
        Field::BirthDate,
        Field::BirthPlace,
        Field::Phone,
        Field::Email,
    ];

    pub const ACADEMIC: [Field; 3] = [
        Field::PreviousSchool,
        Field::TargetFaculty,
        Field::TargetDepartment,
    ];

    pub fn step(self) -> Step {
        if Self::IDENTITY.contains(&self) {
            Step::Identity
        } else {
            Step::Academic
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::FirstName => "Prénom",
            Field::LastName => "Nom",
            Field::BirthDate => "Date de naissance",
            Field::BirthPlace => "Lieu de naissance",
            Field::Phone => "Téléphone",
            Field::Email => "Email",
            Field::PreviousSchool => "École de provenance",
            Field::TargetFaculty => "Faculté",
            Field::TargetDepartment => "Département",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
