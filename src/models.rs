use chrono::{NaiveDate, NaiveDateTime};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A record type served by the university records API.
///
/// Implementations provide the URL path segment, the stable identity field,
/// and the text fields considered by the client-side search filter.
pub trait Resource: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// URL path segment, e.g. `students` for `/api/students`
    const NAME: &'static str;
    /// Human-readable singular title
    const TITLE: &'static str;

    /// Stable identity of the record; `None` on not-yet-created payloads
    fn id(&self) -> Option<i64>;

    /// Text fields considered by the search filter, OR-combined.
    /// A record matches when any field, lowercased, contains the
    /// trimmed lowercased search term as a substring.
    fn search_haystack(&self) -> Vec<String>;

    /// One-line rendering for CLI output
    fn summary(&self) -> String;
}

/// The six resource collections exposed by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Students,
    Departments,
    Courses,
    Addresses,
    Enrollments,
    Fees,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 6] = [
        ResourceKind::Students,
        ResourceKind::Departments,
        ResourceKind::Courses,
        ResourceKind::Addresses,
        ResourceKind::Enrollments,
        ResourceKind::Fees,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Students => "students",
            ResourceKind::Departments => "departments",
            ResourceKind::Courses => "courses",
            ResourceKind::Addresses => "addresses",
            ResourceKind::Enrollments => "enrollments",
            ResourceKind::Fees => "fees",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ResourceKind::Students => "Students",
            ResourceKind::Departments => "Departments",
            ResourceKind::Courses => "Courses",
            ResourceKind::Addresses => "Addresses",
            ResourceKind::Enrollments => "Enrollments",
            ResourceKind::Fees => "Fees",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Student {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<Department>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrollment_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_status: Option<StudentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpa: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

impl Student {
    /// Partial object carrying only the id, for nested reference payloads
    pub fn reference(id: i64) -> Self {
        Self {
            student_id: Some(id),
            ..Self::default()
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", text(&self.first_name), text(&self.last_name))
    }
}

impl Resource for Student {
    const NAME: &'static str = "students";
    const TITLE: &'static str = "Student";

    fn id(&self) -> Option<i64> {
        self.student_id
    }

    fn search_haystack(&self) -> Vec<String> {
        vec![
            self.student_number.clone(),
            self.first_name.clone(),
            self.last_name.clone(),
            self.email.clone(),
            self.department
                .as_ref()
                .and_then(|d| d.department_name.clone()),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn summary(&self) -> String {
        format!(
            "{:>5}  {:<10}  {:<24}  {:<28}  {:<20}  {}",
            self.student_id.unwrap_or_default(),
            text(&self.student_number),
            self.full_name(),
            text(&self.email),
            self.department
                .as_ref()
                .map(|d| text(&d.department_name))
                .unwrap_or("-"),
            self.student_status.map(|s| s.as_str()).unwrap_or("-"),
        )
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Department {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head_of_department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub building: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub established_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

impl Department {
    pub fn reference(id: i64) -> Self {
        Self {
            department_id: Some(id),
            ..Self::default()
        }
    }
}

impl Resource for Department {
    const NAME: &'static str = "departments";
    const TITLE: &'static str = "Department";

    fn id(&self) -> Option<i64> {
        self.department_id
    }

    fn search_haystack(&self) -> Vec<String> {
        vec![self.department_name.clone(), self.department_code.clone()]
            .into_iter()
            .flatten()
            .collect()
    }

    fn summary(&self) -> String {
        format!(
            "{:>5}  {:<8}  {:<28}  {:<24}  {}",
            self.department_id.unwrap_or_default(),
            text(&self.department_code),
            text(&self.department_name),
            text(&self.head_of_department),
            text(&self.building),
        )
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Course {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credits: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<Department>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructor_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_students: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semester: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

impl Course {
    pub fn reference(id: i64) -> Self {
        Self {
            course_id: Some(id),
            ..Self::default()
        }
    }
}

impl Resource for Course {
    const NAME: &'static str = "courses";
    const TITLE: &'static str = "Course";

    fn id(&self) -> Option<i64> {
        self.course_id
    }

    fn search_haystack(&self) -> Vec<String> {
        vec![
            self.course_name.clone(),
            self.course_code.clone(),
            self.department
                .as_ref()
                .and_then(|d| d.department_name.clone()),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn summary(&self) -> String {
        format!(
            "{:>5}  {:<10}  {:<32}  {:>3} cr  {:<20}  {}",
            self.course_id.unwrap_or_default(),
            text(&self.course_code),
            text(&self.course_name),
            self.credits.unwrap_or_default(),
            self.department
                .as_ref()
                .map(|d| text(&d.department_name))
                .unwrap_or("-"),
            text(&self.instructor_name),
        )
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student: Option<Student>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_type: Option<AddressType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_primary: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

impl Resource for Address {
    const NAME: &'static str = "addresses";
    const TITLE: &'static str = "Address";

    fn id(&self) -> Option<i64> {
        self.address_id
    }

    fn search_haystack(&self) -> Vec<String> {
        vec![
            self.street_address.clone(),
            self.city.clone(),
            self.state.clone(),
            self.postal_code.clone(),
            self.student.as_ref().and_then(|s| s.first_name.clone()),
            self.student.as_ref().and_then(|s| s.last_name.clone()),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn summary(&self) -> String {
        format!(
            "{:>5}  {:<8}  {:<28}  {:<16}  {:<12}  {}",
            self.address_id.unwrap_or_default(),
            self.address_type.map(|t| t.as_str()).unwrap_or("-"),
            text(&self.street_address),
            text(&self.city),
            text(&self.postal_code),
            self.student
                .as_ref()
                .map(|s| s.full_name())
                .unwrap_or_else(|| "-".to_string()),
        )
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Enrollment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrollment_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student: Option<Student>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course: Option<Course>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrollment_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade_points: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendance_percentage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EnrollmentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

impl Resource for Enrollment {
    const NAME: &'static str = "enrollments";
    const TITLE: &'static str = "Enrollment";

    fn id(&self) -> Option<i64> {
        self.enrollment_id
    }

    fn search_haystack(&self) -> Vec<String> {
        vec![
            self.student.as_ref().and_then(|s| s.first_name.clone()),
            self.student.as_ref().and_then(|s| s.last_name.clone()),
            self.course.as_ref().and_then(|c| c.course_name.clone()),
            self.status.map(|s| s.as_str().to_string()),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn summary(&self) -> String {
        format!(
            "{:>5}  {:<24}  {:<32}  {:<10}  {}",
            self.enrollment_id.unwrap_or_default(),
            self.student
                .as_ref()
                .map(|s| s.full_name())
                .unwrap_or_else(|| "-".to_string()),
            self.course
                .as_ref()
                .map(|c| text(&c.course_name))
                .unwrap_or("-"),
            self.status.map(|s| s.as_str()).unwrap_or("-"),
            text(&self.grade),
        )
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Fee {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student: Option<Student>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semester: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee_type: Option<FeeType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

impl Resource for Fee {
    const NAME: &'static str = "fees";
    const TITLE: &'static str = "Fee";

    fn id(&self) -> Option<i64> {
        self.fee_id
    }

    fn search_haystack(&self) -> Vec<String> {
        vec![
            self.student.as_ref().and_then(|s| s.first_name.clone()),
            self.student.as_ref().and_then(|s| s.last_name.clone()),
            self.semester.clone(),
            self.fee_type.map(|t| t.as_str().to_string()),
            // The amount participates in search as its decimal rendering
            self.amount.map(|a| a.to_string()),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn summary(&self) -> String {
        format!(
            "{:>5}  {:<24}  {:<12}  {:<8}  {:>10.2}  {}",
            self.fee_id.unwrap_or_default(),
            self.student
                .as_ref()
                .map(|s| s.full_name())
                .unwrap_or_else(|| "-".to_string()),
            text(&self.semester),
            self.fee_type.map(|t| t.as_str()).unwrap_or("-"),
            self.amount.unwrap_or_default(),
            self.payment_status.map(|s| s.as_str()).unwrap_or("-"),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StudentStatus {
    Active,
    Inactive,
    Graduated,
    Suspended,
}

impl StudentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StudentStatus::Active => "Active",
            StudentStatus::Inactive => "Inactive",
            StudentStatus::Graduated => "Graduated",
            StudentStatus::Suspended => "Suspended",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AddressType {
    Home,
    Work,
    Mailing,
    Other,
}

impl AddressType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AddressType::Home => "HOME",
            AddressType::Work => "WORK",
            AddressType::Mailing => "MAILING",
            AddressType::Other => "OTHER",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeeType {
    Tuition,
    Lab,
    Library,
    Hostel,
    Other,
}

impl FeeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeeType::Tuition => "TUITION",
            FeeType::Lab => "LAB",
            FeeType::Library => "LIBRARY",
            FeeType::Hostel => "HOSTEL",
            FeeType::Other => "OTHER",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Pending,
    Paid,
    Overdue,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "Pending",
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Overdue => "Overdue",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Cash,
    Card,
    BankTransfer,
    Online,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "CASH",
            PaymentMethod::Card => "CARD",
            PaymentMethod::BankTransfer => "BANK_TRANSFER",
            PaymentMethod::Online => "ONLINE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnrollmentStatus {
    Enrolled,
    Completed,
    Dropped,
}

impl EnrollmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnrollmentStatus::Enrolled => "Enrolled",
            EnrollmentStatus::Completed => "Completed",
            EnrollmentStatus::Dropped => "Dropped",
        }
    }
}

fn text(field: &Option<String>) -> &str {
    field.as_deref().unwrap_or("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_wire_format() {
        let json = r#"{
            "studentId": 7,
            "studentNumber": "S1007",
            "firstName": "Alice",
            "lastName": "Nguyen",
            "email": "alice@example.edu",
            "phone": null,
            "gpa": 3.72,
            "studentStatus": "Active",
            "enrollmentDate": "2023-09-01",
            "department": { "departmentId": 2, "departmentName": "Computer Science" }
        }"#;

        let student: Student = serde_json::from_str(json).unwrap();
        assert_eq!(student.student_id, Some(7));
        assert_eq!(student.full_name(), "Alice Nguyen");
        assert_eq!(student.student_status, Some(StudentStatus::Active));
        assert_eq!(
            student.enrollment_date,
            Some(NaiveDate::from_ymd_opt(2023, 9, 1).unwrap())
        );
        assert_eq!(
            student.department.as_ref().unwrap().department_name.as_deref(),
            Some("Computer Science")
        );
    }

    #[test]
    fn test_reference_serializes_id_only() {
        let json = serde_json::to_string(&Department::reference(3)).unwrap();
        assert_eq!(json, r#"{"departmentId":3}"#);

        let json = serde_json::to_string(&Student::reference(12)).unwrap();
        assert_eq!(json, r#"{"studentId":12}"#);
    }

    #[test]
    fn test_enum_wire_spellings() {
        assert_eq!(
            serde_json::to_string(&PaymentMethod::BankTransfer).unwrap(),
            r#""BANK_TRANSFER""#
        );
        assert_eq!(
            serde_json::to_string(&FeeType::Tuition).unwrap(),
            r#""TUITION""#
        );
        assert_eq!(
            serde_json::to_string(&EnrollmentStatus::Dropped).unwrap(),
            r#""Dropped""#
        );

        let status: PaymentStatus = serde_json::from_str(r#""Overdue""#).unwrap();
        assert_eq!(status, PaymentStatus::Overdue);
        let kind: AddressType = serde_json::from_str(r#""MAILING""#).unwrap();
        assert_eq!(kind, AddressType::Mailing);
    }

    #[test]
    fn test_fee_haystack_includes_amount_string() {
        let fee = Fee {
            fee_id: Some(1),
            student: Some(Student {
                first_name: Some("Bob".to_string()),
                last_name: Some("Lee".to_string()),
                ..Student::default()
            }),
            semester: Some("Fall 2024".to_string()),
            fee_type: Some(FeeType::Lab),
            amount: Some(42.5),
            ..Fee::default()
        };

        let haystack = fee.search_haystack();
        assert!(haystack.contains(&"42.5".to_string()));
        assert!(haystack.contains(&"LAB".to_string()));
        assert!(haystack.contains(&"Bob".to_string()));
    }

    #[test]
    fn test_missing_fields_default_to_none() {
        let course: Course = serde_json::from_str(r#"{"courseId": 9}"#).unwrap();
        assert_eq!(course.course_id, Some(9));
        assert!(course.course_name.is_none());
        assert!(course.department.is_none());
    }
}
