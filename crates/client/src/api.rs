use futures::future::try_join_all;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use shared_types::{
    AppError, AttendanceQuery, AttendanceRecord, AuthUser, CreateStudentRequest, LoginRequest,
    MarkAttendanceRequest, RegisterRequest, Student, StudentStats, StudentWithUser, TokenResponse,
    UpdateStudentRequest, UserProfile,
};

/// Thin client over the attendance REST API.
///
/// Cheap to clone. Every call returns `Result<T, AppError>`; non-success
/// responses are turned into errors with [`AppError::from_api_response`].
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.token.is_some())
            .finish()
    }
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
            token: None,
        }
    }

    /// Same client, sending `Authorization: Bearer <token>` when a token is given.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, format!("{}{}", self.base_url, path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(builder: RequestBuilder) -> Result<Response, AppError> {
        let response = builder.send().await.map_err(|e| {
            tracing::error!(error = %e, "API request could not be sent");
            AppError::network(format!("Request failed: {e}"))
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let error = AppError::from_api_response(status.as_u16(), &body);
        tracing::warn!(status = status.as_u16(), error = %error, "API returned an error");
        Err(error)
    }

    async fn json<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, AppError> {
        Self::send(builder)
            .await?
            .json::<T>()
            .await
            .map_err(|e| AppError::internal(format!("Unexpected response body: {e}")))
    }

    // --- Auth ---

    /// OAuth2 password flow: credentials go as a urlencoded form.
    #[tracing::instrument(skip(self, request), fields(username = %request.username))]
    pub async fn login(&self, request: &LoginRequest) -> Result<TokenResponse, AppError> {
        Self::json(self.request(Method::POST, "/auth/login").form(request)).await
    }

    #[tracing::instrument(skip(self, request), fields(username = %request.username, role = %request.role))]
    pub async fn register(&self, request: &RegisterRequest) -> Result<UserProfile, AppError> {
        Self::json(self.request(Method::POST, "/auth/register").json(request)).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn current_user(&self) -> Result<UserProfile, AppError> {
        Self::json(self.request(Method::GET, "/auth/me")).await
    }

    /// Log in, then load the profile with the fresh token.
    /// Returns the user to keep in the session together with the token.
    pub async fn sign_in(&self, request: &LoginRequest) -> Result<(AuthUser, String), AppError> {
        let token = self.login(request).await?.access_token;
        let profile = self
            .clone()
            .with_token(Some(token.clone()))
            .current_user()
            .await?;
        tracing::info!(user_id = profile.id, role = %profile.role, "Signed in");
        Ok((AuthUser::from(profile), token))
    }

    // --- Students ---

    #[tracing::instrument(skip(self))]
    pub async fn list_students(&self, skip: u32, limit: u32) -> Result<Vec<StudentWithUser>, AppError> {
        Self::json(
            self.request(Method::GET, "/students/")
                .query(&[("skip", skip), ("limit", limit)]),
        )
        .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_student(&self, id: i64) -> Result<Student, AppError> {
        Self::json(self.request(Method::GET, &format!("/students/{id}"))).await
    }

    #[tracing::instrument(skip(self, request), fields(student_id = %request.student_id))]
    pub async fn create_student(&self, request: &CreateStudentRequest) -> Result<Student, AppError> {
        Self::json(self.request(Method::POST, "/students/").json(request)).await
    }

    #[tracing::instrument(skip(self, request))]
    pub async fn update_student(
        &self,
        id: i64,
        request: &UpdateStudentRequest,
    ) -> Result<Student, AppError> {
        Self::json(self.request(Method::PUT, &format!("/students/{id}")).json(request)).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_student(&self, id: i64) -> Result<(), AppError> {
        Self::send(self.request(Method::DELETE, &format!("/students/{id}"))).await?;
        Ok(())
    }

    // --- Attendance ---

    #[tracing::instrument(skip(self))]
    pub async fn list_attendance(&self, query: &AttendanceQuery) -> Result<Vec<AttendanceRecord>, AppError> {
        Self::json(self.request(Method::GET, "/attendance/").query(query)).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_attendance(&self, id: i64) -> Result<AttendanceRecord, AppError> {
        Self::json(self.request(Method::GET, &format!("/attendance/{id}"))).await
    }

    #[tracing::instrument(skip(self, request), fields(student_id = request.student_id, status = %request.status))]
    pub async fn mark_attendance(
        &self,
        request: &MarkAttendanceRequest,
    ) -> Result<AttendanceRecord, AppError> {
        Self::json(self.request(Method::POST, "/attendance/").json(request)).await
    }

    /// Submit one record per request, concurrently. Fails on the first error;
    /// records already accepted by the backend stay recorded.
    #[tracing::instrument(skip(self, requests), fields(count = requests.len()))]
    pub async fn mark_attendance_batch(
        &self,
        requests: &[MarkAttendanceRequest],
    ) -> Result<Vec<AttendanceRecord>, AppError> {
        let records = try_join_all(requests.iter().map(|r| self.mark_attendance(r))).await?;
        tracing::info!(count = records.len(), "Attendance submitted");
        Ok(records)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_attendance(&self, id: i64) -> Result<(), AppError> {
        Self::send(self.request(Method::DELETE, &format!("/attendance/{id}"))).await?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub async fn student_stats(&self, student_id: i64) -> Result<StudentStats, AppError> {
        Self::json(self.request(Method::GET, &format!("/attendance/student/{student_id}/stats"))).await
    }
}
