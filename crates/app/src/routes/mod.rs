pub mod dashboard;
pub mod history;
pub mod login;
pub mod mark_attendance;
pub mod not_found;
pub mod register;
pub mod students;
pub mod view_attendance;

use crate::auth::use_auth;
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdGraduationCap, LdLogOut};
use dioxus_free_icons::Icon;
use shared_types::{guard, Access, AppPage};
use shared_ui::{Badge, BadgeTone, Button, ButtonSize, ButtonVariant};

use dashboard::{AdminDashboard, StudentDashboard, TeacherDashboard};
use history::AttendanceHistory;
use login::Login;
use mark_attendance::MarkAttendance;
use not_found::NotFound;
use register::Register;
use students::StudentDirectory;
use view_attendance::ViewAttendance;

/// Application routes.
#[derive(Clone, Routable, Debug, PartialEq)]
pub enum Route {
    #[layout(AuthGuard)]
    #[route("/login")]
    Login {},
    #[route("/register")]
    Register {},
    #[layout(AppLayout)]
    #[route("/admin/dashboard")]
    AdminDashboard {},
    #[route("/admin/users")]
    StudentDirectory {},
    #[route("/teacher/dashboard")]
    TeacherDashboard {},
    #[route("/teacher/mark-attendance")]
    MarkAttendance {},
    #[route("/teacher/view-attendance")]
    ViewAttendance {},
    #[route("/student/dashboard")]
    StudentDashboard {},
    #[route("/student/history")]
    AttendanceHistory {},
    #[end_layout]
    #[end_layout]
    #[route("/:..route")]
    NotFound { route: Vec<String> },
}

impl Route {
    /// The page this route shows; `None` for the catch-all.
    pub fn page(&self) -> Option<AppPage> {
        match self {
            Route::Login {} => Some(AppPage::Login),
            Route::Register {} => Some(AppPage::Register),
            Route::AdminDashboard {} => Some(AppPage::AdminDashboard),
            Route::StudentDirectory {} => Some(AppPage::StudentDirectory),
            Route::TeacherDashboard {} => Some(AppPage::TeacherDashboard),
            Route::MarkAttendance {} => Some(AppPage::MarkAttendance),
            Route::ViewAttendance {} => Some(AppPage::ViewAttendance),
            Route::StudentDashboard {} => Some(AppPage::StudentDashboard),
            Route::AttendanceHistory {} => Some(AppPage::AttendanceHistory),
            Route::NotFound { .. } => None,
        }
    }

    pub fn from_page(page: AppPage) -> Self {
        match page {
            AppPage::Login => Route::Login {},
            AppPage::Register => Route::Register {},
            AppPage::AdminDashboard => Route::AdminDashboard {},
            AppPage::StudentDirectory => Route::StudentDirectory {},
            AppPage::TeacherDashboard => Route::TeacherDashboard {},
            AppPage::MarkAttendance => Route::MarkAttendance {},
            AppPage::ViewAttendance => Route::ViewAttendance {},
            AppPage::StudentDashboard => Route::StudentDashboard {},
            AppPage::AttendanceHistory => Route::AttendanceHistory {},
        }
    }
}

/// Role guard around every page.
///
/// Signed-out visitors only reach the login and register pages; signed-in
/// users are kept to their role's pages and bounced to their home otherwise.
/// Reads the session signal, so signing out anywhere re-runs the check.
#[component]
fn AuthGuard() -> Element {
    let auth = use_auth();
    let route: Route = use_route();

    let Some(page) = route.page() else {
        return rsx! { Outlet::<Route> {} };
    };

    match guard(auth.role(), page) {
        Access::Allow => rsx! { Outlet::<Route> {} },
        Access::RedirectToLogin => {
            navigator().replace(Route::Login {});
            rsx! {
                div { class: "auth-guard-loading",
                    p { "Redirecting to login..." }
                }
            }
        }
        Access::Redirect(home) => {
            tracing::debug!(from = page.path(), to = home.path(), "Redirecting to role home");
            navigator().replace(Route::from_page(home));
            rsx! {
                div { class: "auth-guard-loading",
                    p { "Redirecting..." }
                }
            }
        }
    }
}

/// Signed-in layout: top navbar with the role's links, then the page.
#[component]
fn AppLayout() -> Element {
    let mut auth = use_auth();

    let Some(user) = auth.user() else {
        return rsx! { Outlet::<Route> {} };
    };
    let initial = user.initial();

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./layout.css") }

        div { class: "app-shell",
            nav { class: "navbar",
                div { class: "navbar-brand",
                    Icon::<LdGraduationCap> { icon: LdGraduationCap, width: 22, height: 22 }
                    span { class: "navbar-brand-name", "Smart Attendance" }
                }

                div { class: "navbar-links",
                    for link in user.role.nav_links().iter() {
                        Link {
                            key: "{link.page.path()}",
                            to: Route::from_page(link.page),
                            class: "navbar-link",
                            active_class: "active",
                            "{link.label}"
                        }
                    }
                }

                div { class: "navbar-user",
                    span { class: "navbar-avatar", "{initial}" }
                    div { class: "navbar-user-info",
                        span { class: "navbar-user-name", "{user.name}" }
                        Badge { tone: BadgeTone::Info, "{user.role.display_name()}" }
                    }
                    Button {
                        variant: ButtonVariant::Ghost,
                        size: ButtonSize::Small,
                        onclick: move |_| {
                            auth.sign_out();
                            navigator().replace(Route::Login {});
                        },
                        Icon::<LdLogOut> { icon: LdLogOut, width: 16, height: 16 }
                        "Logout"
                    }
                }
            }

            main { class: "app-content",
                Outlet::<Route> {}
            }
        }
    }
}
