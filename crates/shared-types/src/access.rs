use crate::models::UserRole;

/// Every page of the application, independent of the router's route type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppPage {
    Login,
    Register,
    AdminDashboard,
    StudentDirectory,
    TeacherDashboard,
    MarkAttendance,
    ViewAttendance,
    StudentDashboard,
    AttendanceHistory,
}

impl AppPage {
    pub fn path(&self) -> &'static str {
        match self {
            AppPage::Login => "/login",
            AppPage::Register => "/register",
            AppPage::AdminDashboard => "/admin/dashboard",
            AppPage::StudentDirectory => "/admin/users",
            AppPage::TeacherDashboard => "/teacher/dashboard",
            AppPage::MarkAttendance => "/teacher/mark-attendance",
            AppPage::ViewAttendance => "/teacher/view-attendance",
            AppPage::StudentDashboard => "/student/dashboard",
            AppPage::AttendanceHistory => "/student/history",
        }
    }

    /// Pages reachable without a session.
    pub fn is_public(&self) -> bool {
        matches!(self, AppPage::Login | AppPage::Register)
    }
}

/// One entry of a role's navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub page: AppPage,
    pub label: &'static str,
}

/// What a role may see: its landing page and its navigation links.
/// A role may visit exactly the pages listed in `links`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleAccess {
    pub role: UserRole,
    pub home: AppPage,
    pub links: &'static [NavLink],
}

const ADMIN_ACCESS: RoleAccess = RoleAccess {
    role: UserRole::Admin,
    home: AppPage::AdminDashboard,
    links: &[
        NavLink {
            page: AppPage::AdminDashboard,
            label: "Dashboard",
        },
        NavLink {
            page: AppPage::StudentDirectory,
            label: "Students",
        },
    ],
};

const TEACHER_ACCESS: RoleAccess = RoleAccess {
    role: UserRole::Teacher,
    home: AppPage::TeacherDashboard,
    links: &[
        NavLink {
            page: AppPage::TeacherDashboard,
            label: "Dashboard",
        },
        NavLink {
            page: AppPage::MarkAttendance,
            label: "Mark Attendance",
        },
        NavLink {
            page: AppPage::ViewAttendance,
            label: "View Attendance",
        },
    ],
};

const STUDENT_ACCESS: RoleAccess = RoleAccess {
    role: UserRole::Student,
    home: AppPage::StudentDashboard,
    links: &[
        NavLink {
            page: AppPage::StudentDashboard,
            label: "Dashboard",
        },
        NavLink {
            page: AppPage::AttendanceHistory,
            label: "History",
        },
    ],
};

pub const ROLE_ACCESS: &[RoleAccess] = &[ADMIN_ACCESS, TEACHER_ACCESS, STUDENT_ACCESS];

impl UserRole {
    pub fn access(&self) -> &'static RoleAccess {
        match self {
            UserRole::Admin => &ADMIN_ACCESS,
            UserRole::Teacher => &TEACHER_ACCESS,
            UserRole::Student => &STUDENT_ACCESS,
        }
    }

    pub fn home_page(&self) -> AppPage {
        self.access().home
    }

    pub fn nav_links(&self) -> &'static [NavLink] {
        self.access().links
    }

    pub fn can_visit(&self, page: AppPage) -> bool {
        self.nav_links().iter().any(|link| link.page == page)
    }
}

/// Outcome of checking a page against the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    RedirectToLogin,
    Redirect(AppPage),
}

/// Decide whether a visitor with `role` (None when signed out) may open `page`.
///
/// Signed-out visitors only get the public pages. Signed-in users are sent to
/// their home page when they open a public page or one their role does not own.
pub fn guard(role: Option<UserRole>, page: AppPage) -> Access {
    match (role, page.is_public()) {
        (None, true) => Access::Allow,
        (None, false) => Access::RedirectToLogin,
        (Some(role), true) => Access::Redirect(role.home_page()),
        (Some(role), false) if role.can_visit(page) => Access::Allow,
        (Some(role), false) => Access::Redirect(role.home_page()),
    }
}
