//! Add/edit form screen for all six record types
//!
//! Field sets mirror the API payload shapes: foreign references are picked
//! from dropdowns populated by a fetch of the referenced collection and
//! serialize as partial `{"...Id": n}` objects.

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::api::{ApiClient, ApiError, RecordSource, RestResource};
use crate::models::{
    Address, AddressType, Course, Department, Enrollment, EnrollmentStatus, Fee, FeeType,
    PaymentMethod, PaymentStatus, Resource, ResourceKind, Student, StudentStatus,
};
use crate::tui::components::{Form, FormField, FormFieldType};
use crate::tui::ui::{centered_rect, Styles};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit(i64),
}

/// Outcome of a key event on the editor screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    None,
    Cancel,
    Submit,
}

pub struct EditorScreen {
    pub kind: ResourceKind,
    pub mode: EditorMode,
    pub form: Form,
    students: Vec<(i64, String)>,
    departments: Vec<(i64, String)>,
    courses: Vec<(i64, String)>,
}

impl EditorScreen {
    /// Build the editor for one resource, fetching the reference pickers
    /// and, in edit mode, the record to prefill.
    pub async fn open(
        kind: ResourceKind,
        mode: EditorMode,
        client: ApiClient,
    ) -> Result<Self, ApiError> {
        let students = match kind {
            ResourceKind::Addresses | ResourceKind::Enrollments | ResourceKind::Fees => {
                student_options(&client).await?
            }
            _ => Vec::new(),
        };
        let departments = match kind {
            ResourceKind::Students | ResourceKind::Courses => department_options(&client).await?,
            _ => Vec::new(),
        };
        let courses = match kind {
            ResourceKind::Enrollments => course_options(&client).await?,
            _ => Vec::new(),
        };

        let form = blank_form(kind, &students, &departments, &courses);
        let mut editor = Self {
            kind,
            mode,
            form,
            students,
            departments,
            courses,
        };

        if let EditorMode::Edit(id) = mode {
            editor.prefill(id, &client).await?;
        }

        Ok(editor)
    }

    async fn prefill(&mut self, id: i64, client: &ApiClient) -> Result<(), ApiError> {
        match self.kind {
            ResourceKind::Students => {
                let record = RestResource::<Student>::new(client.clone()).get_one(id).await?;
                self.fill_student(&record);
            }
            ResourceKind::Departments => {
                let record = RestResource::<Department>::new(client.clone())
                    .get_one(id)
                    .await?;
                self.fill_department(&record);
            }
            ResourceKind::Courses => {
                let record = RestResource::<Course>::new(client.clone()).get_one(id).await?;
                self.fill_course(&record);
            }
            ResourceKind::Addresses => {
                let record = RestResource::<Address>::new(client.clone()).get_one(id).await?;
                self.fill_address(&record);
            }
            ResourceKind::Enrollments => {
                let record = RestResource::<Enrollment>::new(client.clone())
                    .get_one(id)
                    .await?;
                self.fill_enrollment(&record);
            }
            ResourceKind::Fees => {
                let record = RestResource::<Fee>::new(client.clone()).get_one(id).await?;
                self.fill_fee(&record);
            }
        }
        Ok(())
    }

    pub fn title(&self) -> String {
        let verb = match self.mode {
            EditorMode::Create => "Add",
            EditorMode::Edit(_) => "Edit",
        };
        let noun = match self.kind {
            ResourceKind::Students => "Student",
            ResourceKind::Departments => "Department",
            ResourceKind::Courses => "Course",
            ResourceKind::Addresses => "Address",
            ResourceKind::Enrollments => "Enrollment",
            ResourceKind::Fees => "Fee",
        };
        format!("{} {}", verb, noun)
    }

    /// Handle key events for the editor
    pub fn handle_key(&mut self, key: KeyEvent) -> EditorAction {
        let dropdown_open = self
            .form
            .current()
            .map(|field| field.show_dropdown)
            .unwrap_or(false);
        let on_dropdown = self
            .form
            .current()
            .map(|field| field.field_type == FormFieldType::Dropdown)
            .unwrap_or(false);

        match key.code {
            KeyCode::Tab => self.form.next_field(),
            KeyCode::BackTab => self.form.previous_field(),
            KeyCode::Up => {
                if dropdown_open {
                    if let Some(field) = self.form.current_mut() {
                        field.dropdown_up();
                    }
                } else {
                    self.form.previous_field();
                }
            }
            KeyCode::Down => {
                if dropdown_open {
                    if let Some(field) = self.form.current_mut() {
                        field.dropdown_down();
                    }
                } else {
                    self.form.next_field();
                }
            }
            KeyCode::Enter => {
                if dropdown_open {
                    if let Some(field) = self.form.current_mut() {
                        field.select_dropdown_value();
                    }
                } else if on_dropdown {
                    if let Some(field) = self.form.current_mut() {
                        field.toggle_dropdown();
                    }
                } else {
                    return EditorAction::Submit;
                }
            }
            KeyCode::Esc => {
                if dropdown_open {
                    if let Some(field) = self.form.current_mut() {
                        field.show_dropdown = false;
                    }
                } else {
                    return EditorAction::Cancel;
                }
            }
            KeyCode::Char(' ') if on_dropdown => {
                if let Some(field) = self.form.current_mut() {
                    field.toggle_dropdown();
                }
            }
            KeyCode::Char(c) => {
                if let Some(field) = self.form.current_mut() {
                    field.insert_char(c);
                }
            }
            KeyCode::Backspace => {
                if let Some(field) = self.form.current_mut() {
                    field.delete_char();
                }
            }
            KeyCode::Delete => {
                if let Some(field) = self.form.current_mut() {
                    field.delete_char_forward();
                }
            }
            KeyCode::Left => {
                if let Some(field) = self.form.current_mut() {
                    field.move_cursor_left();
                }
            }
            KeyCode::Right => {
                if let Some(field) = self.form.current_mut() {
                    field.move_cursor_right();
                }
            }
            _ => {}
        }
        EditorAction::None
    }

    /// Validate, build the typed record, and send it to the API
    pub async fn submit(&mut self, client: &ApiClient) -> Result<String, String> {
        if !self.form.validate_all() {
            return Err("Please fix the highlighted fields".to_string());
        }

        match self.kind {
            ResourceKind::Students => {
                let record = self.build_student()?;
                self.submit_record(client, record).await
            }
            ResourceKind::Departments => {
                let record = self.build_department()?;
                self.submit_record(client, record).await
            }
            ResourceKind::Courses => {
                let record = self.build_course()?;
                self.submit_record(client, record).await
            }
            ResourceKind::Addresses => {
                let record = self.build_address()?;
                self.submit_record(client, record).await
            }
            ResourceKind::Enrollments => {
                let record = self.build_enrollment()?;
                self.submit_record(client, record).await
            }
            ResourceKind::Fees => {
                let record = self.build_fee()?;
                self.submit_record(client, record).await
            }
        }
    }

    async fn submit_record<R: Resource>(
        &self,
        client: &ApiClient,
        record: R,
    ) -> Result<String, String> {
        let source = RestResource::<R>::new(client.clone());
        match self.mode {
            EditorMode::Create => source
                .create(&record)
                .await
                .map(|created| {
                    format!(
                        "{} created (id {})",
                        R::TITLE,
                        created.id().unwrap_or_default()
                    )
                })
                .map_err(|e| format!("Failed to create {}: {}", R::TITLE, e)),
            EditorMode::Edit(id) => source
                .update(id, &record)
                .await
                .map(|_| format!("{} {} updated", R::TITLE, id))
                .map_err(|e| format!("Failed to update {} {}: {}", R::TITLE, id, e)),
        }
    }

    fn build_student(&self) -> Result<Student, String> {
        Ok(Student {
            student_number: required(&self.form, "Student Number")?,
            first_name: required(&self.form, "First Name")?,
            last_name: required(&self.form, "Last Name")?,
            email: required(&self.form, "Email")?,
            phone: optional(&self.form, "Phone"),
            date_of_birth: date_opt(&self.form, "Date of Birth")?,
            gender: optional(&self.form, "Gender"),
            department: self
                .ref_id(&self.departments, "Department")?
                .map(Department::reference),
            enrollment_date: date_opt(&self.form, "Enrollment Date")?,
            student_status: parse_student_status(self.form.value_of("Status")),
            gpa: f64_opt(&self.form, "GPA")?,
            ..Student::default()
        })
    }

    fn build_department(&self) -> Result<Department, String> {
        Ok(Department {
            department_code: required(&self.form, "Department Code")?,
            department_name: required(&self.form, "Department Name")?,
            head_of_department: optional(&self.form, "Head of Department"),
            email: optional(&self.form, "Email"),
            phone: optional(&self.form, "Phone"),
            building: optional(&self.form, "Building"),
            established_year: i32_opt(&self.form, "Established Year")?,
            ..Department::default()
        })
    }

    fn build_course(&self) -> Result<Course, String> {
        Ok(Course {
            course_code: required(&self.form, "Course Code")?,
            course_name: required(&self.form, "Course Name")?,
            course_description: optional(&self.form, "Description"),
            credits: i32_opt(&self.form, "Credits")?,
            department: self
                .ref_id(&self.departments, "Department")?
                .map(Department::reference),
            instructor_name: optional(&self.form, "Instructor"),
            max_students: i32_opt(&self.form, "Max Students")?,
            semester: optional(&self.form, "Semester"),
            is_active: bool_opt(&self.form, "Active"),
            ..Course::default()
        })
    }

    fn build_address(&self) -> Result<Address, String> {
        Ok(Address {
            student: self.ref_id(&self.students, "Student")?.map(Student::reference),
            address_type: parse_address_type(self.form.value_of("Type")),
            street_address: required(&self.form, "Street Address")?,
            city: required(&self.form, "City")?,
            state: optional(&self.form, "State"),
            postal_code: optional(&self.form, "Postal Code"),
            country: optional(&self.form, "Country"),
            is_primary: bool_opt(&self.form, "Primary"),
            ..Address::default()
        })
    }

    fn build_enrollment(&self) -> Result<Enrollment, String> {
        Ok(Enrollment {
            student: self.ref_id(&self.students, "Student")?.map(Student::reference),
            course: self.ref_id(&self.courses, "Course")?.map(Course::reference),
            enrollment_date: date_opt(&self.form, "Enrollment Date")?,
            grade: optional(&self.form, "Grade"),
            grade_points: f64_opt(&self.form, "Grade Points")?,
            attendance_percentage: f64_opt(&self.form, "Attendance %")?,
            status: parse_enrollment_status(self.form.value_of("Status")),
            ..Enrollment::default()
        })
    }

    fn build_fee(&self) -> Result<Fee, String> {
        Ok(Fee {
            student: self.ref_id(&self.students, "Student")?.map(Student::reference),
            semester: required(&self.form, "Semester")?,
            fee_type: parse_fee_type(self.form.value_of("Fee Type")),
            amount: f64_opt(&self.form, "Amount")?,
            paid_amount: f64_opt(&self.form, "Paid Amount")?,
            due_date: date_opt(&self.form, "Due Date")?,
            payment_date: date_opt(&self.form, "Payment Date")?,
            payment_status: parse_payment_status(self.form.value_of("Payment Status")),
            payment_method: parse_payment_method(self.form.value_of("Payment Method")),
            transaction_id: optional(&self.form, "Transaction Id"),
            ..Fee::default()
        })
    }

    /// Resolve a reference dropdown's selected label back to its id
    fn ref_id(&self, options: &[(i64, String)], label: &str) -> Result<Option<i64>, String> {
        let value = self.form.value_of(label);
        if value.is_empty() || value == "-" {
            return Ok(None);
        }
        options
            .iter()
            .find(|(_, option)| option == value)
            .map(|(id, _)| Some(*id))
            .ok_or_else(|| format!("Unknown {}: {}", label, value))
    }

    fn fill_student(&mut self, record: &Student) {
        set_opt(&mut self.form, "Student Number", &record.student_number);
        set_opt(&mut self.form, "First Name", &record.first_name);
        set_opt(&mut self.form, "Last Name", &record.last_name);
        set_opt(&mut self.form, "Email", &record.email);
        set_opt(&mut self.form, "Phone", &record.phone);
        set_date(&mut self.form, "Date of Birth", record.date_of_birth);
        set_opt(&mut self.form, "Gender", &record.gender);
        let department = ref_label(&self.departments, record.department.as_ref().and_then(|d| d.department_id));
        self.form.set_value("Department", &department);
        set_date(&mut self.form, "Enrollment Date", record.enrollment_date);
        if let Some(status) = record.student_status {
            self.form.set_value("Status", status.as_str());
        }
        if let Some(gpa) = record.gpa {
            self.form.set_value("GPA", &gpa.to_string());
        }
    }

    fn fill_department(&mut self, record: &Department) {
        set_opt(&mut self.form, "Department Code", &record.department_code);
        set_opt(&mut self.form, "Department Name", &record.department_name);
        set_opt(&mut self.form, "Head of Department", &record.head_of_department);
        set_opt(&mut self.form, "Email", &record.email);
        set_opt(&mut self.form, "Phone", &record.phone);
        set_opt(&mut self.form, "Building", &record.building);
        if let Some(year) = record.established_year {
            self.form.set_value("Established Year", &year.to_string());
        }
    }

    fn fill_course(&mut self, record: &Course) {
        set_opt(&mut self.form, "Course Code", &record.course_code);
        set_opt(&mut self.form, "Course Name", &record.course_name);
        set_opt(&mut self.form, "Description", &record.course_description);
        if let Some(credits) = record.credits {
            self.form.set_value("Credits", &credits.to_string());
        }
        let department = ref_label(&self.departments, record.department.as_ref().and_then(|d| d.department_id));
        self.form.set_value("Department", &department);
        set_opt(&mut self.form, "Instructor", &record.instructor_name);
        if let Some(max) = record.max_students {
            self.form.set_value("Max Students", &max.to_string());
        }
        set_opt(&mut self.form, "Semester", &record.semester);
        if let Some(active) = record.is_active {
            self.form.set_value("Active", if active { "true" } else { "false" });
        }
    }

    fn fill_address(&mut self, record: &Address) {
        let student = ref_label(&self.students, record.student.as_ref().and_then(|s| s.student_id));
        self.form.set_value("Student", &student);
        if let Some(kind) = record.address_type {
            self.form.set_value("Type", kind.as_str());
        }
        set_opt(&mut self.form, "Street Address", &record.street_address);
        set_opt(&mut self.form, "City", &record.city);
        set_opt(&mut self.form, "State", &record.state);
        set_opt(&mut self.form, "Postal Code", &record.postal_code);
        set_opt(&mut self.form, "Country", &record.country);
        if let Some(primary) = record.is_primary {
            self.form.set_value("Primary", if primary { "true" } else { "false" });
        }
    }

    fn fill_enrollment(&mut self, record: &Enrollment) {
        let student = ref_label(&self.students, record.student.as_ref().and_then(|s| s.student_id));
        self.form.set_value("Student", &student);
        let course = ref_label(&self.courses, record.course.as_ref().and_then(|c| c.course_id));
        self.form.set_value("Course", &course);
        set_date(&mut self.form, "Enrollment Date", record.enrollment_date);
        set_opt(&mut self.form, "Grade", &record.grade);
        if let Some(points) = record.grade_points {
            self.form.set_value("Grade Points", &points.to_string());
        }
        if let Some(attendance) = record.attendance_percentage {
            self.form.set_value("Attendance %", &attendance.to_string());
        }
        if let Some(status) = record.status {
            self.form.set_value("Status", status.as_str());
        }
    }

    fn fill_fee(&mut self, record: &Fee) {
        let student = ref_label(&self.students, record.student.as_ref().and_then(|s| s.student_id));
        self.form.set_value("Student", &student);
        set_opt(&mut self.form, "Semester", &record.semester);
        if let Some(kind) = record.fee_type {
            self.form.set_value("Fee Type", kind.as_str());
        }
        if let Some(amount) = record.amount {
            self.form.set_value("Amount", &amount.to_string());
        }
        if let Some(paid) = record.paid_amount {
            self.form.set_value("Paid Amount", &paid.to_string());
        }
        set_date(&mut self.form, "Due Date", record.due_date);
        set_date(&mut self.form, "Payment Date", record.payment_date);
        if let Some(status) = record.payment_status {
            self.form.set_value("Payment Status", status.as_str());
        }
        if let Some(method) = record.payment_method {
            self.form.set_value("Payment Method", method.as_str());
        }
        set_opt(&mut self.form, "Transaction Id", &record.transaction_id);
    }

    /// Draw the editor screen: fields in two columns, dropdown popup on top
    pub fn draw(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(area);

        let title = Paragraph::new(self.title())
            .style(Styles::title())
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, chunks[0]);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[1]);

        let per_column = (self.form.fields.len() + 1) / 2;
        for (i, field) in self.form.fields.iter().enumerate() {
            let (column, row) = if i < per_column {
                (columns[0], i)
            } else {
                (columns[1], i - per_column)
            };
            let y = column.y + (row as u16) * 3;
            if y + 3 > column.y + column.height {
                continue;
            }
            let field_area = Rect::new(column.x, y, column.width, 3);
            field.render(f, field_area);
        }

        let hint = Paragraph::new(
            "Tab/↑/↓: Fields | Enter: Save (opens/picks on dropdowns) | Space: Open dropdown | ESC: Cancel",
        )
        .style(Styles::info())
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(hint, chunks[2]);

        let dropdown_open = self
            .form
            .current()
            .map(|field| field.show_dropdown)
            .unwrap_or(false);
        if dropdown_open {
            let popup_area = centered_rect(40, 50, area);
            f.render_widget(Clear, popup_area);
            if let Some(field) = self.form.current_mut() {
                field.render_dropdown(f, popup_area);
            }
        }
    }
}

/// Field sets per resource, mirroring the backend payloads
fn blank_form(
    kind: ResourceKind,
    students: &[(i64, String)],
    departments: &[(i64, String)],
    courses: &[(i64, String)],
) -> Form {
    let student_labels = labels(students);
    let department_labels = labels(departments);
    let course_labels = labels(courses);

    let fields = match kind {
        ResourceKind::Students => vec![
            FormField::text("Student Number").required(),
            FormField::text("First Name").required(),
            FormField::text("Last Name").required(),
            FormField::text("Email").required(),
            FormField::text("Phone"),
            FormField::date("Date of Birth"),
            FormField::dropdown(
                "Gender",
                vec![
                    "Male".to_string(),
                    "Female".to_string(),
                    "Other".to_string(),
                    "Prefer_not_to_say".to_string(),
                ],
            ),
            FormField::dropdown("Department", department_labels).required(),
            FormField::date("Enrollment Date"),
            FormField::dropdown(
                "Status",
                vec![
                    "Active".to_string(),
                    "Inactive".to_string(),
                    "Graduated".to_string(),
                    "Suspended".to_string(),
                ],
            )
            .with_value("Active"),
            FormField::number("GPA"),
        ],
        ResourceKind::Departments => vec![
            FormField::text("Department Code").required(),
            FormField::text("Department Name").required(),
            FormField::text("Head of Department"),
            FormField::text("Email"),
            FormField::text("Phone"),
            FormField::text("Building"),
            FormField::number("Established Year"),
        ],
        ResourceKind::Courses => vec![
            FormField::text("Course Code").required(),
            FormField::text("Course Name").required(),
            FormField::text("Description"),
            FormField::number("Credits").required(),
            FormField::dropdown("Department", department_labels).required(),
            FormField::text("Instructor"),
            FormField::number("Max Students"),
            FormField::text("Semester"),
            FormField::dropdown("Active", vec!["true".to_string(), "false".to_string()])
                .with_value("true"),
        ],
        ResourceKind::Addresses => vec![
            FormField::dropdown("Student", student_labels).required(),
            FormField::dropdown(
                "Type",
                vec![
                    "HOME".to_string(),
                    "WORK".to_string(),
                    "MAILING".to_string(),
                    "OTHER".to_string(),
                ],
            )
            .required(),
            FormField::text("Street Address").required(),
            FormField::text("City").required(),
            FormField::text("State"),
            FormField::text("Postal Code"),
            FormField::text("Country").with_value("USA"),
            FormField::dropdown("Primary", vec!["true".to_string(), "false".to_string()])
                .with_value("true"),
        ],
        ResourceKind::Enrollments => vec![
            FormField::dropdown("Student", student_labels).required(),
            FormField::dropdown("Course", course_labels).required(),
            FormField::date("Enrollment Date").required(),
            FormField::text("Grade"),
            FormField::number("Grade Points"),
            FormField::number("Attendance %"),
            FormField::dropdown(
                "Status",
                vec![
                    "Enrolled".to_string(),
                    "Completed".to_string(),
                    "Dropped".to_string(),
                ],
            )
            .with_value("Enrolled"),
        ],
        ResourceKind::Fees => vec![
            FormField::dropdown("Student", student_labels).required(),
            FormField::text("Semester").required(),
            FormField::dropdown(
                "Fee Type",
                vec![
                    "TUITION".to_string(),
                    "LAB".to_string(),
                    "LIBRARY".to_string(),
                    "HOSTEL".to_string(),
                    "OTHER".to_string(),
                ],
            )
            .required(),
            FormField::number("Amount").required(),
            FormField::number("Paid Amount"),
            FormField::date("Due Date").required(),
            FormField::date("Payment Date"),
            FormField::dropdown(
                "Payment Status",
                vec![
                    "Pending".to_string(),
                    "Paid".to_string(),
                    "Overdue".to_string(),
                ],
            )
            .with_value("Pending"),
            FormField::dropdown(
                "Payment Method",
                vec![
                    "-".to_string(),
                    "CASH".to_string(),
                    "CARD".to_string(),
                    "BANK_TRANSFER".to_string(),
                    "ONLINE".to_string(),
                ],
            ),
            FormField::text("Transaction Id"),
        ],
    };

    Form::new(fields)
}

async fn student_options(client: &ApiClient) -> Result<Vec<(i64, String)>, ApiError> {
    let records = RestResource::<Student>::new(client.clone()).list_all().await?;
    Ok(records
        .into_iter()
        .filter_map(|s| {
            s.student_id.map(|id| {
                let number = s.student_number.clone().unwrap_or_default();
                (id, format!("{} ({})", s.full_name(), number))
            })
        })
        .collect())
}

async fn department_options(client: &ApiClient) -> Result<Vec<(i64, String)>, ApiError> {
    let records = RestResource::<Department>::new(client.clone()).list_all().await?;
    Ok(records
        .into_iter()
        .filter_map(|d| {
            d.department_id
                .map(|id| (id, d.department_name.clone().unwrap_or_else(|| format!("#{}", id))))
        })
        .collect())
}

async fn course_options(client: &ApiClient) -> Result<Vec<(i64, String)>, ApiError> {
    let records = RestResource::<Course>::new(client.clone()).list_all().await?;
    Ok(records
        .into_iter()
        .filter_map(|c| {
            c.course_id.map(|id| {
                let code = c.course_code.clone().unwrap_or_default();
                (id, format!("{} ({})", c.course_name.clone().unwrap_or_default(), code))
            })
        })
        .collect())
}

fn labels(options: &[(i64, String)]) -> Vec<String> {
    options.iter().map(|(_, label)| label.clone()).collect()
}

fn ref_label(options: &[(i64, String)], id: Option<i64>) -> String {
    id.and_then(|id| {
        options
            .iter()
            .find(|(option_id, _)| *option_id == id)
            .map(|(_, label)| label.clone())
    })
    .unwrap_or_default()
}

fn set_opt(form: &mut Form, label: &str, value: &Option<String>) {
    if let Some(value) = value {
        form.set_value(label, value);
    }
}

fn set_date(form: &mut Form, label: &str, value: Option<NaiveDate>) {
    if let Some(date) = value {
        form.set_value(label, &date.to_string());
    }
}

fn required(form: &Form, label: &str) -> Result<Option<String>, String> {
    let value = form.value_of(label);
    if value.is_empty() {
        Err(format!("{} is required", label))
    } else {
        Ok(Some(value.to_string()))
    }
}

fn optional(form: &Form, label: &str) -> Option<String> {
    let value = form.value_of(label);
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn date_opt(form: &Form, label: &str) -> Result<Option<NaiveDate>, String> {
    let value = form.value_of(label);
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| format!("{}: expected YYYY-MM-DD", label))
}

fn f64_opt(form: &Form, label: &str) -> Result<Option<f64>, String> {
    let value = form.value_of(label);
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse::<f64>()
        .map(Some)
        .map_err(|_| format!("{}: expected a number", label))
}

fn i32_opt(form: &Form, label: &str) -> Result<Option<i32>, String> {
    let value = form.value_of(label);
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse::<i32>()
        .map(Some)
        .map_err(|_| format!("{}: expected an integer", label))
}

fn bool_opt(form: &Form, label: &str) -> Option<bool> {
    match form.value_of(label) {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

fn parse_student_status(value: &str) -> Option<StudentStatus> {
    match value {
        "Active" => Some(StudentStatus::Active),
        "Inactive" => Some(StudentStatus::Inactive),
        "Graduated" => Some(StudentStatus::Graduated),
        "Suspended" => Some(StudentStatus::Suspended),
        _ => None,
    }
}

fn parse_address_type(value: &str) -> Option<AddressType> {
    match value {
        "HOME" => Some(AddressType::Home),
        "WORK" => Some(AddressType::Work),
        "MAILING" => Some(AddressType::Mailing),
        "OTHER" => Some(AddressType::Other),
        _ => None,
    }
}

fn parse_fee_type(value: &str) -> Option<FeeType> {
    match value {
        "TUITION" => Some(FeeType::Tuition),
        "LAB" => Some(FeeType::Lab),
        "LIBRARY" => Some(FeeType::Library),
        "HOSTEL" => Some(FeeType::Hostel),
        "OTHER" => Some(FeeType::Other),
        _ => None,
    }
}

fn parse_payment_status(value: &str) -> Option<PaymentStatus> {
    match value {
        "Pending" => Some(PaymentStatus::Pending),
        "Paid" => Some(PaymentStatus::Paid),
        "Overdue" => Some(PaymentStatus::Overdue),
        _ => None,
    }
}

fn parse_payment_method(value: &str) -> Option<PaymentMethod> {
    match value {
        "CASH" => Some(PaymentMethod::Cash),
        "CARD" => Some(PaymentMethod::Card),
        "BANK_TRANSFER" => Some(PaymentMethod::BankTransfer),
        "ONLINE" => Some(PaymentMethod::Online),
        _ => None,
    }
}

fn parse_enrollment_status(value: &str) -> Option<EnrollmentStatus> {
    match value {
        "Enrolled" => Some(EnrollmentStatus::Enrolled),
        "Completed" => Some(EnrollmentStatus::Completed),
        "Dropped" => Some(EnrollmentStatus::Dropped),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student_editor() -> EditorScreen {
        let departments = vec![(3, "Computer Science".to_string())];
        let form = blank_form(ResourceKind::Students, &[], &departments, &[]);
        EditorScreen {
            kind: ResourceKind::Students,
            mode: EditorMode::Create,
            form,
            students: Vec::new(),
            departments,
            courses: Vec::new(),
        }
    }

    #[test]
    fn test_build_student_from_form() {
        let mut editor = student_editor();
        editor.form.set_value("Student Number", "S1001");
        editor.form.set_value("First Name", "Alice");
        editor.form.set_value("Last Name", "Nguyen");
        editor.form.set_value("Email", "alice@example.edu");
        editor.form.set_value("Department", "Computer Science");
        editor.form.set_value("Enrollment Date", "2023-09-01");
        editor.form.set_value("GPA", "3.7");

        assert!(editor.form.validate_all());
        let student = editor.build_student().unwrap();

        assert_eq!(student.student_number.as_deref(), Some("S1001"));
        assert_eq!(student.student_status, Some(StudentStatus::Active));
        assert_eq!(
            student.department.as_ref().unwrap().department_id,
            Some(3)
        );
        assert_eq!(student.gpa, Some(3.7));

        // References serialize as partial objects, the way the API expects
        let payload = serde_json::to_value(&student).unwrap();
        assert_eq!(payload["department"], serde_json::json!({"departmentId": 3}));
        assert!(payload.get("studentId").is_none());
    }

    #[test]
    fn test_build_fee_with_optional_method_dash() {
        let students = vec![(12, "Bob Lee (S2001)".to_string())];
        let form = blank_form(ResourceKind::Fees, &students, &[], &[]);
        let mut editor = EditorScreen {
            kind: ResourceKind::Fees,
            mode: EditorMode::Create,
            form,
            students,
            departments: Vec::new(),
            courses: Vec::new(),
        };

        editor.form.set_value("Student", "Bob Lee (S2001)");
        editor.form.set_value("Semester", "Fall 2024");
        editor.form.set_value("Fee Type", "TUITION");
        editor.form.set_value("Amount", "1250.50");
        editor.form.set_value("Due Date", "2024-10-01");

        assert!(editor.form.validate_all());
        let fee = editor.build_fee().unwrap();

        assert_eq!(fee.student.as_ref().unwrap().student_id, Some(12));
        assert_eq!(fee.fee_type, Some(FeeType::Tuition));
        assert_eq!(fee.amount, Some(1250.5));
        assert_eq!(fee.payment_status, Some(PaymentStatus::Pending));
        // No payment method chosen
        assert_eq!(fee.payment_method, None);
    }

    #[test]
    fn test_unknown_reference_label_is_rejected() {
        let mut editor = student_editor();
        editor.form.set_value("Department", "Astrology");
        assert!(editor.ref_id(&editor.departments, "Department").is_err());
    }

    #[test]
    fn test_missing_required_field_fails_validation() {
        let mut editor = student_editor();
        editor.form.set_value("First Name", "Alice");
        assert!(!editor.form.validate_all());
    }
}
