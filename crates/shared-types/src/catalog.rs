//! Fixed option lists used by registration and attendance forms.

pub const DEPARTMENTS: &[&str] = &[
    "Computer Science",
    "Information Technology",
    "Electronics",
    "Mechanical",
    "Civil",
    "Electrical",
    "Chemical",
];

pub const SUBJECTS: &[&str] = &[
    "Mathematics",
    "Physics",
    "Chemistry",
    "Computer Science",
    "English",
    "Electronics",
];

/// Semesters as `(year value stored on the student, label)`.
pub const SEMESTERS: &[(i64, &str)] = &[
    (1, "Semester 1"),
    (2, "Semester 2"),
    (3, "Semester 3"),
    (4, "Semester 4"),
    (5, "Semester 5"),
    (6, "Semester 6"),
    (7, "Semester 7"),
    (8, "Semester 8"),
];

pub fn semester_label(year: i64) -> Option<&'static str> {
    SEMESTERS
        .iter()
        .find(|(value, _)| *value == year)
        .map(|(_, label)| *label)
}
