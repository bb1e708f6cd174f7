//! Doctor directory: the fixed catalog and its projections.

use serde::Serialize;

use crate::models::Doctor;

const CATALOG: &[Doctor] = &[
    Doctor { name: "Dr. Elora Williams", department: "Cardiology", rating: 4.9 },
    Doctor { name: "Dr. Michel Smith", department: "Oncology", rating: 5.0 },
    Doctor { name: "Dr. Rehana Bilkis", department: "Gynecology", rating: 4.8 },
    Doctor { name: "Dr. Ethan Williams", department: "Orthopedics", rating: 4.7 },
    Doctor { name: "Dr. Jacob Lee", department: "Pediatrics", rating: 4.6 },
    Doctor { name: "Dr. Naomi Brown", department: "Dermatology", rating: 4.7 },
    Doctor { name: "Dr. Omar Nasser", department: "General Medicine", rating: 4.5 },
    Doctor { name: "Dr. Ava Patel", department: "Veterinary", rating: 4.8 },
    Doctor { name: "Dr. Lucas Kim", department: "Veterinary", rating: 4.7 },
];

/// Full catalog in display order.
pub fn all() -> &'static [Doctor] {
    CATALOG
}

/// Entries matching `predicate`, catalog order preserved.
pub fn by_capability<P>(predicate: P) -> Vec<&'static Doctor>
where
    P: Fn(&Doctor) -> bool,
{
    CATALOG.iter().filter(|d| predicate(d)).collect()
}

pub fn veterinary() -> Vec<&'static Doctor> {
    by_capability(Doctor::is_veterinary)
}

pub fn find(name: &str) -> Option<&'static Doctor> {
    CATALOG.iter().find(|d| d.name == name)
}

// ═══════════════════════════════════════════
// Projections
// ═══════════════════════════════════════════

/// One card of the doctor grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoctorCard {
    pub name: String,
    pub department: String,
    pub rating: String,
    /// Name handed back when the card's "Book" button is pressed.
    pub book_target: String,
}

pub fn grid(doctors: &[Doctor]) -> Vec<DoctorCard> {
    doctors
        .iter()
        .map(|d| DoctorCard {
            name: d.name.to_string(),
            department: d.department.to_string(),
            rating: format!("{:.1} / 5.0", d.rating),
            book_target: d.name.to_string(),
        })
        .collect()
}

/// Options of the booking form's doctor selector.
pub fn select_options(doctors: &[Doctor]) -> Vec<String> {
    doctors.iter().map(|d| d.name.to_string()).collect()
}

/// Lines of the veterinary specialist list.
pub fn vet_list(vets: &[&Doctor]) -> Vec<String> {
    vets.iter()
        .map(|v| format!("{} — ⭐ {:.1}", v.name, v.rating))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_nine_doctors() {
        assert_eq!(all().len(), 9);
        assert!(all().iter().all(|d| (0.0..=5.0).contains(&d.rating)));
    }

    #[test]
    fn veterinary_filter_keeps_catalog_order() {
        let vets = veterinary();
        let names: Vec<&str> = vets.iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["Dr. Ava Patel", "Dr. Lucas Kim"]);
    }

    #[test]
    fn by_capability_with_custom_predicate() {
        let top = by_capability(|d| d.rating >= 4.8);
        let names: Vec<&str> = top.iter().map(|d| d.name).collect();
        assert_eq!(
            names,
            vec!["Dr. Elora Williams", "Dr. Michel Smith", "Dr. Rehana Bilkis", "Dr. Ava Patel"]
        );
    }

    #[test]
    fn grid_formats_rating_with_one_decimal() {
        let cards = grid(all());
        assert_eq!(cards[1].name, "Dr. Michel Smith");
        assert_eq!(cards[1].rating, "5.0 / 5.0");
        assert_eq!(cards[0].book_target, "Dr. Elora Williams");
    }

    #[test]
    fn select_options_list_every_name() {
        let options = select_options(all());
        assert_eq!(options.len(), 9);
        assert_eq!(options[6], "Dr. Omar Nasser");
    }

    #[test]
    fn vet_list_lines() {
        let lines = vet_list(&veterinary());
        assert_eq!(lines, vec!["Dr. Ava Patel — ⭐ 4.8", "Dr. Lucas Kim — ⭐ 4.7"]);
    }

    #[test]
    fn projections_are_repeatable() {
        assert_eq!(grid(all()), grid(all()));
        assert_eq!(vet_list(&veterinary()), vet_list(&veterinary()));
    }

    #[test]
    fn find_by_exact_name() {
        assert_eq!(find("Dr. Jacob Lee").map(|d| d.department), Some("Pediatrics"));
        assert!(find("dr. jacob lee").is_none());
    }
}
