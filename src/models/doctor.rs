use serde::Serialize;

/// A directory entry. Catalog data is static for the process lifetime.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Doctor {
    pub name: &'static str,
    pub department: &'static str,
    pub rating: f32,
}

impl Doctor {
    pub fn is_veterinary(&self) -> bool {
        self.department == "Veterinary"
    }
}
