//! Static faculty → department lookup offered by the academic step.

use std::sync::{Arc, LazyLock};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faculty {
    pub id: String,
    pub name: String,
    pub departments: Vec<String>,
}

impl Faculty {
    pub fn new(id: &str, name: &str, departments: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            departments: departments.iter().map(|d| d.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacultyCatalog {
    faculties: Vec<Faculty>,
}

static BUILTIN: LazyLock<Arc<FacultyCatalog>> = LazyLock::new(|| {
    Arc::new(FacultyCatalog::new(vec![
        Faculty::new(
            "med",
            "Médecine",
            &[
                "Médecine Générale",
                "Chirurgie",
                "Pédiatrie",
                "Gynécologie-Obstétrique",
                "Santé Publique",
            ],
        ),
        Faculty::new(
            "droit",
            "Droit",
            &[
                "Droit Privé et Judiciaire",
                "Droit Public",
                "Droit Économique et Social",
            ],
        ),
        Faculty::new(
            "seg",
            "Sciences Économiques et de Gestion",
            &["Économie", "Gestion Financière", "Comptabilité et Audit"],
        ),
        Faculty::new(
            "theo",
            "Théologie",
            &["Théologie Biblique", "Théologie Pratique", "Missiologie"],
        ),
        Faculty::new(
            "info",
            "Sciences Informatiques",
            &["Génie Logiciel", "Réseaux et Télécommunications"],
        ),
        Faculty::new(
            "agro",
            "Agronomie",
            &["Phytotechnie", "Zootechnie", "Économie Agricole"],
        ),
    ]))
});

impl FacultyCatalog {
    pub fn new(faculties: Vec<Faculty>) -> Self {
        Self { faculties }
    }

    /// Catalog shipped with the application, built on first use.
    pub fn builtin() -> Arc<FacultyCatalog> {
        Arc::clone(&BUILTIN)
    }

    pub fn faculties(&self) -> &[Faculty] {
        &self.faculties
    }

    pub fn faculty(&self, name: &str) -> Option<&Faculty> {
        self.faculties.iter().find(|f| f.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.faculty(name).is_some()
    }

    /// Departments offered by `faculty_name`, in catalog order. Unknown,
    /// empty or absent names yield an empty slice.
    pub fn departments_for(&self, faculty_name: Option<&str>) -> &[String] {
        faculty_name
            .and_then(|name| self.faculty(name))
            .map(|f| f.departments.as_slice())
            .unwrap_or(&[])
    }

    pub fn offers(&self, faculty_name: &str, department: &str) -> bool {
        self.departments_for(Some(faculty_name))
            .iter()
            .any(|d| d == department)
    }
}
