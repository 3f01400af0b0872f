//! Column layouts for rendering records as table rows

use crate::models::{Address, Course, Department, Enrollment, Fee, Student};
use crate::tui::ui::truncate_string;

/// Column layout of a record type in the list screens.
///
/// `headers` names the columns and their display widths; `cells` yields the
/// row values in the same order. The renderer prepends a row-number column.
pub trait TableRow {
    fn headers() -> Vec<(&'static str, usize)>;
    fn cells(&self) -> Vec<String>;
}

/// Format one row, truncating each cell to its column width
pub fn format_row<T: TableRow>(row_number: usize, record: &T) -> String {
    let cells = record.cells();
    let mut line = format!("{:>4} ", row_number);
    for ((_, width), cell) in T::headers().iter().zip(cells.iter()) {
        line.push_str("│ ");
        line.push_str(&truncate_string(cell, *width));
        line.push(' ');
    }
    line
}

/// Format the header line matching `format_row`'s column layout
pub fn format_header<T: TableRow>() -> String {
    let mut line = format!("{:>4} ", "#");
    for (label, width) in T::headers() {
        line.push_str("│ ");
        line.push_str(&truncate_string(label, width));
        line.push(' ');
    }
    line
}

fn opt_text(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "-".to_string())
}

impl TableRow for Student {
    fn headers() -> Vec<(&'static str, usize)> {
        vec![
            ("Student No", 10),
            ("Name", 22),
            ("Email", 26),
            ("Department", 18),
            ("Status", 9),
            ("GPA", 5),
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            opt_text(&self.student_number),
            self.full_name(),
            opt_text(&self.email),
            self.department
                .as_ref()
                .map(|d| opt_text(&d.department_name))
                .unwrap_or_else(|| "-".to_string()),
            self.student_status
                .map(|s| s.as_str().to_string())
                .unwrap_or_else(|| "-".to_string()),
            self.gpa
                .map(|g| format!("{:.2}", g))
                .unwrap_or_else(|| "-".to_string()),
        ]
    }
}

impl TableRow for Department {
    fn headers() -> Vec<(&'static str, usize)> {
        vec![
            ("Code", 8),
            ("Name", 26),
            ("Head", 20),
            ("Building", 12),
            ("Email", 24),
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            opt_text(&self.department_code),
            opt_text(&self.department_name),
            opt_text(&self.head_of_department),
            opt_text(&self.building),
            opt_text(&self.email),
        ]
    }
}

impl TableRow for Course {
    fn headers() -> Vec<(&'static str, usize)> {
        vec![
            ("Code", 9),
            ("Name", 26),
            ("Cr", 3),
            ("Department", 18),
            ("Instructor", 18),
            ("Semester", 11),
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            opt_text(&self.course_code),
            opt_text(&self.course_name),
            self.credits
                .map(|c| c.to_string())
                .unwrap_or_else(|| "-".to_string()),
            self.department
                .as_ref()
                .map(|d| opt_text(&d.department_name))
                .unwrap_or_else(|| "-".to_string()),
            opt_text(&self.instructor_name),
            opt_text(&self.semester),
        ]
    }
}

impl TableRow for Address {
    fn headers() -> Vec<(&'static str, usize)> {
        vec![
            ("Type", 7),
            ("Street", 24),
            ("City", 14),
            ("State", 9),
            ("Postal", 7),
            ("Student", 20),
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.address_type
                .map(|t| t.as_str().to_string())
                .unwrap_or_else(|| "-".to_string()),
            opt_text(&self.street_address),
            opt_text(&self.city),
            opt_text(&self.state),
            opt_text(&self.postal_code),
            self.student
                .as_ref()
                .map(|s| s.full_name())
                .unwrap_or_else(|| "-".to_string()),
        ]
    }
}

impl TableRow for Enrollment {
    fn headers() -> Vec<(&'static str, usize)> {
        vec![
            ("Student", 22),
            ("Course", 26),
            ("Date", 10),
            ("Grade", 5),
            ("Att %", 6),
            ("Status", 9),
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.student
                .as_ref()
                .map(|s| s.full_name())
                .unwrap_or_else(|| "-".to_string()),
            self.course
                .as_ref()
                .map(|c| opt_text(&c.course_name))
                .unwrap_or_else(|| "-".to_string()),
            self.enrollment_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string()),
            opt_text(&self.grade),
            self.attendance_percentage
                .map(|p| format!("{:.0}", p))
                .unwrap_or_else(|| "-".to_string()),
            self.status
                .map(|s| s.as_str().to_string())
                .unwrap_or_else(|| "-".to_string()),
        ]
    }
}

impl TableRow for Fee {
    fn headers() -> Vec<(&'static str, usize)> {
        vec![
            ("Student", 20),
            ("Semester", 11),
            ("Type", 7),
            ("Amount", 10),
            ("Paid", 10),
            ("Due", 10),
            ("Status", 8),
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.student
                .as_ref()
                .map(|s| s.full_name())
                .unwrap_or_else(|| "-".to_string()),
            opt_text(&self.semester),
            self.fee_type
                .map(|t| t.as_str().to_string())
                .unwrap_or_else(|| "-".to_string()),
            self.amount
                .map(|a| format!("{:.2}", a))
                .unwrap_or_else(|| "-".to_string()),
            self.paid_amount
                .map(|a| format!("{:.2}", a))
                .unwrap_or_else(|| "-".to_string()),
            self.due_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string()),
            self.payment_status
                .map(|s| s.as_str().to_string())
                .unwrap_or_else(|| "-".to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StudentStatus;

    #[test]
    fn test_header_and_row_share_column_layout() {
        let student = Student {
            student_id: Some(1),
            student_number: Some("S1001".to_string()),
            first_name: Some("Alice".to_string()),
            last_name: Some("Nguyen".to_string()),
            email: Some("alice@example.edu".to_string()),
            student_status: Some(StudentStatus::Active),
            gpa: Some(3.7),
            ..Student::default()
        };

        let header = format_header::<Student>();
        let row = format_row(1, &student);
        assert_eq!(header.matches('│').count(), row.matches('│').count());
        assert!(row.contains("S1001"));
        assert!(row.contains("Alice Nguyen"));
        assert!(row.contains("3.70"));
    }
}
