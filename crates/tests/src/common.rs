//! In-process stand-in for the attendance REST API.
//!
//! Serves the same paths, bodies and error shapes as the real backend from an
//! in-memory store, on a random local port, so the REST client can be
//! exercised end to end.

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    routing::{get, post},
    Form, Json, Router,
};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{NaiveDate, NaiveDateTime, Utc};
use client::ApiClient;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

pub const ADMIN: (&str, &str) = ("admin", "Admin@123");
pub const TEACHER: (&str, &str) = ("teacher", "Teach@123");
pub const STUDENT: (&str, &str) = ("asha", "Asha@1234");

/// Student primary keys seeded by [`spawn_backend`].
pub const ASHA_STUDENT_ID: i64 = 1;
pub const RAVI_STUDENT_ID: i64 = 2;

#[derive(Debug, Clone)]
struct MockUser {
    id: i64,
    username: String,
    email: String,
    full_name: Option<String>,
    password: String,
    role: String,
}

impl MockUser {
    fn profile(&self) -> Value {
        json!({
            "id": self.id,
            "email": self.email,
            "username": self.username,
            "full_name": self.full_name,
            "role": self.role,
            "is_active": 1,
            "created_at": "2026-01-10T08:00:00",
        })
    }
}

#[derive(Debug, Clone)]
struct MockStudent {
    id: i64,
    user_id: i64,
    student_id: String,
    department: Option<String>,
    year: Option<i64>,
    section: Option<String>,
    phone: Option<String>,
}

impl MockStudent {
    fn json(&self) -> Value {
        json!({
            "id": self.id,
            "user_id": self.user_id,
            "student_id": self.student_id,
            "department": self.department,
            "year": self.year,
            "section": self.section,
            "phone": self.phone,
            "photo_url": null,
            "created_at": "2026-01-10T08:00:00",
        })
    }
}

#[derive(Debug, Clone)]
struct MockRecord {
    id: i64,
    student_id: i64,
    subject: Option<String>,
    status: String,
    class_date: NaiveDateTime,
    marked_by: i64,
}

impl MockRecord {
    fn json(&self) -> Value {
        json!({
            "id": self.id,
            "student_id": self.student_id,
            "subject": self.subject,
            "status": self.status,
            "class_date": self.class_date,
            "marked_by": self.marked_by,
            "marked_at": self.class_date,
            "confidence_score": null,
        })
    }
}

#[derive(Debug, Default)]
struct Store {
    users: Vec<MockUser>,
    students: Vec<MockStudent>,
    records: Vec<MockRecord>,
    next_id: i64,
}

impl Store {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn seeded() -> Self {
        let mut store = Store {
            next_id: 100,
            ..Store::default()
        };
        let user = |id: i64, (username, password): (&str, &str), name: &str, role: &str| MockUser {
            id,
            username: username.to_string(),
            email: format!("{username}@college.edu"),
            full_name: Some(name.to_string()),
            password: password.to_string(),
            role: role.to_string(),
        };
        store.users = vec![
            user(1, ADMIN, "Site Admin", "admin"),
            user(2, TEACHER, "Meera Iyer", "teacher"),
            user(3, STUDENT, "Asha Nair", "student"),
            user(4, ("ravi", "Ravi@1234"), "Ravi Kumar", "student"),
        ];
        store.students = vec![
            MockStudent {
                id: ASHA_STUDENT_ID,
                user_id: 3,
                student_id: "CS2024001".into(),
                department: Some("Computer Science".into()),
                year: Some(3),
                section: Some("A".into()),
                phone: None,
            },
            MockStudent {
                id: RAVI_STUDENT_ID,
                user_id: 4,
                student_id: "EC2024002".into(),
                department: Some("Electronics".into()),
                year: Some(1),
                section: None,
                phone: None,
            },
        ];
        store
    }

    fn student_with_user(&self, student: &MockStudent) -> Value {
        let mut value = student.json();
        if let Some(user) = self.users.iter().find(|u| u.id == student.user_id) {
            value["full_name"] = json!(user.full_name);
            value["email"] = json!(user.email);
            value["username"] = json!(user.username);
        }
        value
    }
}

type Shared = Arc<Mutex<Store>>;
type ApiError = (StatusCode, Json<Value>);
type ApiResult<T> = Result<T, ApiError>;

fn detail(status: StatusCode, message: &str) -> ApiError {
    (status, Json(json!({ "detail": message })))
}

fn lock(state: &Shared) -> ApiResult<std::sync::MutexGuard<'_, Store>> {
    state
        .lock()
        .map_err(|_| detail(StatusCode::INTERNAL_SERVER_ERROR, "store poisoned"))
}

/// A token shaped like the backend's: `header.payload.signature`, payload
/// base64url JSON with `sub`, `role`, `id` and `exp`.
pub fn issue_token(username: &str, role: &str, id: i64, exp: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(
        json!({ "sub": username, "role": role, "id": id, "exp": exp }).to_string(),
    );
    format!("{header}.{payload}.mock-signature")
}

fn authorize(store: &Store, headers: &HeaderMap) -> ApiResult<MockUser> {
    let rejected = || detail(StatusCode::UNAUTHORIZED, "Could not validate credentials");
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(rejected)?;
    let payload = token.split('.').nth(1).ok_or_else(rejected)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload).map_err(|_| rejected())?;
    let claims: Value = serde_json::from_slice(&bytes).map_err(|_| rejected())?;
    if claims["exp"].as_i64().unwrap_or(0) <= Utc::now().timestamp() {
        return Err(rejected());
    }
    let username = claims["sub"].as_str().ok_or_else(rejected)?;
    store
        .users
        .iter()
        .find(|u| u.username == username)
        .cloned()
        .ok_or_else(rejected)
}

// --- Auth ---

#[derive(Deserialize)]
struct LoginForm {
    username: String,
    password: String,
}

async fn login(State(state): State<Shared>, Form(form): Form<LoginForm>) -> ApiResult<Json<Value>> {
    let store = lock(&state)?;
    let user = store
        .users
        .iter()
        .find(|u| u.username == form.username && u.password == form.password)
        .ok_or_else(|| detail(StatusCode::UNAUTHORIZED, "Incorrect username or password"))?;
    let exp = Utc::now().timestamp() + 30 * 60;
    Ok(Json(json!({
        "access_token": issue_token(&user.username, &user.role, user.id, exp),
        "token_type": "bearer",
    })))
}

#[derive(Deserialize)]
struct RegisterBody {
    email: String,
    username: String,
    full_name: Option<String>,
    password: String,
    role: String,
}

async fn register(
    State(state): State<Shared>,
    Json(body): Json<RegisterBody>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    if !body.email.contains('@') {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "detail": [{
                "loc": ["body", "email"],
                "msg": "value is not a valid email address",
                "type": "value_error",
            }]})),
        ));
    }
    let mut store = lock(&state)?;
    if store.users.iter().any(|u| u.username == body.username) {
        return Err(detail(StatusCode::BAD_REQUEST, "Username already registered"));
    }
    if store.users.iter().any(|u| u.email == body.email) {
        return Err(detail(StatusCode::BAD_REQUEST, "Email already registered"));
    }
    let user = MockUser {
        id: store.next_id(),
        username: body.username,
        email: body.email,
        full_name: body.full_name,
        password: body.password,
        role: body.role,
    };
    let profile = user.profile();
    store.users.push(user);
    Ok((StatusCode::CREATED, Json(profile)))
}

async fn me(State(state): State<Shared>, headers: HeaderMap) -> ApiResult<Json<Value>> {
    let store = lock(&state)?;
    Ok(Json(authorize(&store, &headers)?.profile()))
}

// --- Students ---

#[derive(Deserialize)]
struct Page {
    #[serde(default)]
    skip: usize,
    #[serde(default = "default_limit")]
    limit: usize,
}

fn default_limit() -> usize {
    100
}

async fn list_students(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(page): Query<Page>,
) -> ApiResult<Json<Value>> {
    let store = lock(&state)?;
    authorize(&store, &headers)?;
    let students: Vec<Value> = store
        .students
        .iter()
        .skip(page.skip)
        .take(page.limit)
        .map(|s| store.student_with_user(s))
        .collect();
    Ok(Json(Value::Array(students)))
}

#[derive(Deserialize)]
struct StudentBody {
    user_id: i64,
    student_id: String,
    department: Option<String>,
    year: Option<i64>,
    section: Option<String>,
    phone: Option<String>,
}

async fn create_student(
    State(state): State<Shared>,
    Json(body): Json<StudentBody>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let mut store = lock(&state)?;
    if store.students.iter().any(|s| s.student_id == body.student_id) {
        return Err(detail(StatusCode::BAD_REQUEST, "Student ID already registered"));
    }
    let student = MockStudent {
        id: store.next_id(),
        user_id: body.user_id,
        student_id: body.student_id,
        department: body.department,
        year: body.year,
        section: body.section,
        phone: body.phone,
    };
    let created = student.json();
    store.students.push(student);
    Ok((StatusCode::CREATED, Json(created)))
}

async fn get_student(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> ApiResult<Json<Value>> {
    let store = lock(&state)?;
    authorize(&store, &headers)?;
    store
        .students
        .iter()
        .find(|s| s.id == id)
        .map(|s| Json(s.json()))
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "Student not found"))
}

#[derive(Deserialize)]
struct StudentPatch {
    department: Option<String>,
    year: Option<i64>,
    section: Option<String>,
    phone: Option<String>,
}

async fn update_student(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(patch): Json<StudentPatch>,
) -> ApiResult<Json<Value>> {
    let mut store = lock(&state)?;
    authorize(&store, &headers)?;
    let student = store
        .students
        .iter_mut()
        .find(|s| s.id == id)
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "Student not found"))?;
    if patch.department.is_some() {
        student.department = patch.department;
    }
    if patch.year.is_some() {
        student.year = patch.year;
    }
    if patch.section.is_some() {
        student.section = patch.section;
    }
    if patch.phone.is_some() {
        student.phone = patch.phone;
    }
    Ok(Json(student.json()))
}

async fn delete_student(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    let mut store = lock(&state)?;
    authorize(&store, &headers)?;
    let before = store.students.len();
    store.students.retain(|s| s.id != id);
    if store.students.len() == before {
        return Err(detail(StatusCode::NOT_FOUND, "Student not found"));
    }
    store.records.retain(|r| r.student_id != id);
    Ok(StatusCode::NO_CONTENT)
}

// --- Attendance ---

#[derive(Deserialize)]
struct RecordQuery {
    #[serde(default)]
    skip: usize,
    #[serde(default = "default_limit")]
    limit: usize,
    student_id: Option<i64>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
}

async fn list_attendance(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<RecordQuery>,
) -> ApiResult<Json<Value>> {
    let store = lock(&state)?;
    authorize(&store, &headers)?;
    let records: Vec<Value> = store
        .records
        .iter()
        .filter(|r| query.student_id.map_or(true, |id| r.student_id == id))
        .filter(|r| query.start_date.map_or(true, |d| r.class_date.date() >= d))
        .filter(|r| query.end_date.map_or(true, |d| r.class_date.date() <= d))
        .skip(query.skip)
        .take(query.limit)
        .map(MockRecord::json)
        .collect();
    Ok(Json(Value::Array(records)))
}

#[derive(Deserialize)]
struct MarkBody {
    student_id: i64,
    subject: String,
    status: String,
    marked_by: i64,
}

async fn mark_attendance(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<MarkBody>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let mut store = lock(&state)?;
    authorize(&store, &headers)?;
    if !store.students.iter().any(|s| s.id == body.student_id) {
        return Err(detail(StatusCode::NOT_FOUND, "Student not found"));
    }
    let record = MockRecord {
        id: store.next_id(),
        student_id: body.student_id,
        subject: Some(body.subject),
        status: body.status,
        class_date: Utc::now().naive_utc(),
        marked_by: body.marked_by,
    };
    let created = record.json();
    store.records.push(record);
    Ok((StatusCode::CREATED, Json(created)))
}

async fn get_attendance(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> ApiResult<Json<Value>> {
    let store = lock(&state)?;
    authorize(&store, &headers)?;
    store
        .records
        .iter()
        .find(|r| r.id == id)
        .map(|r| Json(r.json()))
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "Attendance record not found"))
}

async fn delete_attendance(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    let mut store = lock(&state)?;
    authorize(&store, &headers)?;
    let before = store.records.len();
    store.records.retain(|r| r.id != id);
    if store.records.len() == before {
        return Err(detail(StatusCode::NOT_FOUND, "Attendance record not found"));
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn student_stats(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> ApiResult<Json<Value>> {
    let store = lock(&state)?;
    authorize(&store, &headers)?;
    let count = |status: &str| {
        store
            .records
            .iter()
            .filter(|r| r.student_id == id && r.status == status)
            .count()
    };
    let (present, absent, late) = (count("present"), count("absent"), count("late"));
    let total = present + absent + late;
    let percentage = if total == 0 {
        0.0
    } else {
        ((present as f64 / total as f64) * 10000.0).round() / 100.0
    };
    Ok(Json(json!({
        "total_classes": total,
        "present": present,
        "absent": absent,
        "late": late,
        "attendance_percentage": percentage,
    })))
}

fn router(state: Shared) -> Router {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/auth/me", get(me))
        .route("/students/", get(list_students).post(create_student))
        .route(
            "/students/{id}",
            get(get_student).put(update_student).delete(delete_student),
        )
        .route("/attendance/", get(list_attendance).post(mark_attendance))
        .route(
            "/attendance/{id}",
            get(get_attendance).delete(delete_attendance),
        )
        .route("/attendance/student/{id}/stats", get(student_stats))
        .with_state(state)
}

/// A running mock backend.
pub struct MockBackend {
    pub base_url: String,
}

impl MockBackend {
    /// Client without a token.
    pub fn client(&self) -> ApiClient {
        ApiClient::new(self.base_url.clone())
    }

    /// Client carrying a fresh token for `credentials`.
    pub async fn client_as(&self, (username, password): (&str, &str)) -> ApiClient {
        let client = self.client();
        let (_, token) = client
            .sign_in(&shared_types::LoginRequest {
                username: username.to_string(),
                password: password.to_string(),
            })
            .await
            .expect("seeded credentials should sign in");
        client.with_token(Some(token))
    }
}

/// Start a seeded backend on a random local port.
pub async fn spawn_backend() -> MockBackend {
    let state: Shared = Arc::new(Mutex::new(Store::seeded()));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock backend");
    let addr = listener.local_addr().expect("Mock backend has no address");
    tokio::spawn(async move {
        axum::serve(listener, router(state))
            .await
            .expect("Mock backend stopped");
    });
    MockBackend {
        base_url: format!("http://{addr}"),
    }
}
