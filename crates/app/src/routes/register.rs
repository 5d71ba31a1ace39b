use crate::auth::{use_api, use_auth};
use crate::routes::Route;
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::LdUserPlus;
use dioxus_free_icons::Icon;
use shared_types::{
    validate_password, CreateStudentRequest, LoginRequest, RegisterRequest, UserRole, ALL_ROLES,
    DEPARTMENTS, PASSWORD_REQUIREMENTS_TEXT, SEMESTERS,
};
use shared_ui::{Alert, Button, Card, SelectField, SelectOption, TextField};
use std::collections::HashMap;

/// Everything the registration form collects.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistrationForm {
    pub full_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub role: UserRole,
    pub roll_number: String,
    pub department: String,
    pub semester: String,
}

impl RegistrationForm {
    /// Field errors keyed by field name; empty when the form can be submitted.
    pub fn validate(&self) -> HashMap<String, String> {
        let mut errors = HashMap::new();
        let mut fail = |field: &str, message: &str| {
            errors.insert(field.to_string(), message.to_string());
        };

        if self.full_name.trim().is_empty() {
            fail("full_name", "Full name is required");
        }
        if self.username.trim().len() < 3 {
            fail("username", "Username must be at least 3 characters");
        }
        let email = self.email.trim();
        if email.is_empty() {
            fail("email", "Email is required");
        } else if !email.contains('@') || email.starts_with('@') || email.ends_with('@') {
            fail("email", "Enter a valid email address");
        }
        if let Err(e) = validate_password(&self.password) {
            fail("password", &e.to_string());
        }
        if self.confirm_password != self.password {
            fail("confirm_password", "Passwords do not match");
        }
        if self.role == UserRole::Student {
            if self.roll_number.trim().is_empty() {
                fail("student_id", "Roll number is required");
            }
            if self.department.is_empty() {
                fail("department", "Select a department");
            }
            if self.semester_value().is_none() {
                fail("year", "Select a semester");
            }
        }
        errors
    }

    fn semester_value(&self) -> Option<i64> {
        self.semester.parse().ok()
    }

    pub fn register_request(&self) -> RegisterRequest {
        let full_name = self.full_name.trim();
        RegisterRequest {
            email: self.email.trim().to_string(),
            username: self.username.trim().to_string(),
            full_name: (!full_name.is_empty()).then(|| full_name.to_string()),
            password: self.password.clone(),
            role: self.role,
        }
    }

    pub fn login_request(&self) -> LoginRequest {
        LoginRequest {
            username: self.username.trim().to_string(),
            password: self.password.clone(),
        }
    }

    /// Student record to create for `user_id`; `None` for staff accounts.
    pub fn student_request(&self, user_id: i64) -> Option<CreateStudentRequest> {
        if self.role != UserRole::Student {
            return None;
        }
        Some(CreateStudentRequest {
            user_id,
            student_id: self.roll_number.trim().to_string(),
            department: Some(self.department.clone()).filter(|d| !d.is_empty()),
            year: self.semester_value(),
            section: None,
            phone: None,
        })
    }
}

/// Account creation. Students also get their student record, then everyone
/// is signed in and sent to their home page.
#[component]
pub fn Register() -> Element {
    let mut auth = use_auth();
    let api = use_api();
    let mut form = use_signal(|| RegistrationForm {
        role: UserRole::Student,
        ..RegistrationForm::default()
    });
    let mut error_msg = use_signal(String::new);
    let mut field_errors = use_signal(HashMap::<String, String>::new);
    let mut loading = use_signal(|| false);

    let handle_register = move |evt: FormEvent| {
        evt.prevent_default();
        let api = api.clone();
        let submitted = form();

        let errors = submitted.validate();
        if !errors.is_empty() {
            field_errors.set(errors);
            return;
        }

        spawn(async move {
            loading.set(true);
            error_msg.set(String::new());
            field_errors.set(HashMap::new());

            let result = async {
                let profile = api.register(&submitted.register_request()).await?;
                tracing::info!(user_id = profile.id, role = %profile.role, "Account created");
                let (user, token) = api.sign_in(&submitted.login_request()).await?;
                if let Some(request) = submitted.student_request(profile.id) {
                    api.clone()
                        .with_token(Some(token.clone()))
                        .create_student(&request)
                        .await?;
                }
                Ok::<_, shared_types::AppError>((user, token))
            }
            .await;

            match result {
                Ok((user, token)) => {
                    let home = user.role.home_page();
                    auth.sign_in(user, token);
                    navigator().replace(Route::from_page(home));
                }
                Err(err) => {
                    if err.field_errors.is_empty() {
                        error_msg.set(err.friendly_message());
                    } else {
                        field_errors.set(err.field_errors);
                    }
                }
            }
            loading.set(false);
        });
    };

    let error_for = move |field: &str| field_errors.read().get(field).cloned();
    let role_options: Vec<SelectOption> = ALL_ROLES
        .iter()
        .map(|r| SelectOption::new(r.as_str(), r.display_name()))
        .collect();
    let department_options: Vec<SelectOption> =
        DEPARTMENTS.iter().map(|d| SelectOption::plain(*d)).collect();
    let semester_options: Vec<SelectOption> = SEMESTERS
        .iter()
        .map(|(value, label)| SelectOption::new(value.to_string(), *label))
        .collect();
    let current = form();

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./login.css") }

        div { class: "auth-page",
            Card { class: "auth-card wide",
                div { class: "auth-header",
                    div { class: "auth-logo",
                        Icon::<LdUserPlus> { icon: LdUserPlus, width: 28, height: 28 }
                    }
                    h1 { class: "auth-title", "Create Account" }
                    p { class: "auth-subtitle", "Register to start tracking attendance" }
                }

                Alert { message: error_msg() }

                form { class: "auth-form", onsubmit: handle_register,
                    TextField {
                        label: "Full Name",
                        placeholder: "Asha Nair",
                        value: current.full_name.clone(),
                        on_input: move |v: String| form.write().full_name = v,
                        error: error_for("full_name"),
                        required: true,
                    }
                    div { class: "auth-form-row",
                        TextField {
                            label: "Username",
                            placeholder: "asha.nair",
                            value: current.username.clone(),
                            on_input: move |v: String| form.write().username = v,
                            error: error_for("username"),
                            required: true,
                        }
                        TextField {
                            label: "Email",
                            input_type: "email",
                            placeholder: "asha@college.edu",
                            value: current.email.clone(),
                            on_input: move |v: String| form.write().email = v,
                            error: error_for("email"),
                            required: true,
                        }
                    }
                    div { class: "auth-form-row",
                        TextField {
                            label: "Password",
                            input_type: "password",
                            value: current.password.clone(),
                            on_input: move |v: String| form.write().password = v,
                            error: error_for("password"),
                            required: true,
                        }
                        TextField {
                            label: "Confirm Password",
                            input_type: "password",
                            value: current.confirm_password.clone(),
                            on_input: move |v: String| form.write().confirm_password = v,
                            error: error_for("confirm_password"),
                            required: true,
                        }
                    }
                    p { class: "auth-hint", "{PASSWORD_REQUIREMENTS_TEXT}" }

                    SelectField {
                        label: "Role",
                        value: current.role.as_str().to_string(),
                        options: role_options,
                        on_change: move |v: String| form.write().role = UserRole::from_str_or_default(&v),
                        error: error_for("role"),
                    }

                    if current.role == UserRole::Student {
                        TextField {
                            label: "Roll Number",
                            placeholder: "CS2024001",
                            value: current.roll_number.clone(),
                            on_input: move |v: String| form.write().roll_number = v,
                            error: error_for("student_id"),
                            required: true,
                        }
                        div { class: "auth-form-row",
                            SelectField {
                                label: "Department",
                                value: current.department.clone(),
                                options: department_options,
                                placeholder: "Select department",
                                on_change: move |v: String| form.write().department = v,
                                error: error_for("department"),
                            }
                            SelectField {
                                label: "Semester",
                                value: current.semester.clone(),
                                options: semester_options,
                                placeholder: "Select semester",
                                on_change: move |v: String| form.write().semester = v,
                                error: error_for("year"),
                            }
                        }
                    }

                    Button {
                        class: "auth-submit",
                        button_type: "submit",
                        loading: loading(),
                        if loading() { "Creating account..." } else { "Create Account" }
                    }
                }

                p { class: "auth-footer",
                    "Already have an account? "
                    Link { to: Route::Login {}, "Sign in" }
                }
            }
        }
    }
}
