use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::LdTrash2;
use dioxus_free_icons::Icon;
use shared_types::{semester_label, AppConfig, StudentWithUser, DEPARTMENTS};
use shared_ui::{
    Alert, AlertKind, Button, ButtonSize, ButtonVariant, Card, CardContent, CardHeader, CellValue,
    ColumnDef, PageHeader, Row, SelectField, SelectOption, TabularView,
};

use crate::auth::{use_api, use_auth};
use crate::tables::{student_row, FETCH_LIMIT};

/// Student picked for deletion, awaiting confirmation.
#[derive(Debug, Clone, PartialEq)]
struct PendingDelete {
    id: i64,
    name: String,
}

fn semester_cell(value: &CellValue, _row: &Row) -> Element {
    let text = match value {
        CellValue::Int(year) => semester_label(*year)
            .map(str::to_string)
            .unwrap_or_else(|| format!("Year {year}")),
        _ => "-".to_string(),
    };
    rsx! { "{text}" }
}

fn directory_columns(pending: Signal<Option<PendingDelete>>) -> Vec<ColumnDef> {
    vec![
        ColumnDef::new("name", "Name").sortable(),
        ColumnDef::new("roll_number", "Roll Number").sortable(),
        ColumnDef::new("email", "Email").sortable(),
        ColumnDef::new("department", "Department").sortable(),
        ColumnDef::new("semester", "Semester").sortable().render(semester_cell),
        ColumnDef::new("actions", "Actions").render(move |_value: &CellValue, row: &Row| {
            let CellValue::Int(id) = *row.get("id") else {
                return rsx! {};
            };
            let name = row.get("name").display();
            let mut pending = pending;
            rsx! {
                Button {
                    variant: ButtonVariant::Destructive,
                    size: ButtonSize::Small,
                    onclick: move |_| pending.set(Some(PendingDelete { id, name: name.clone() })),
                    Icon::<LdTrash2> { icon: LdTrash2, width: 14, height: 14 }
                    "Delete"
                }
            }
        }),
    ]
}

/// Department filter for the directory; an empty filter keeps everyone.
pub fn filter_directory(students: &[StudentWithUser], department: &str) -> Vec<Row> {
    students
        .iter()
        .filter(|s| s.matches_filters(Some(department), None))
        .map(student_row)
        .collect()
}

/// Admin view of every student, with deletion.
#[component]
pub fn StudentDirectory() -> Element {
    let mut auth = use_auth();
    let api = use_api();
    let config = use_context::<AppConfig>();
    let mut department = use_signal(String::new);
    let mut pending = use_signal(|| Option::<PendingDelete>::None);
    let mut notice = use_signal(String::new);
    let mut error_msg = use_signal(String::new);
    let mut deleting = use_signal(|| false);

    let list_api = api.clone();
    let mut students = use_resource(move || {
        let api = list_api.clone();
        async move {
            api.list_students(0, FETCH_LIMIT)
                .await
                .map_err(|e| auth.report(&e))
        }
    });

    let confirm_delete = move |_: MouseEvent| {
        let Some(target) = pending() else {
            return;
        };
        let api = api.clone();
        spawn(async move {
            deleting.set(true);
            error_msg.set(String::new());
            match api.delete_student(target.id).await {
                Ok(()) => {
                    tracing::info!(student_id = target.id, "Student deleted");
                    notice.set(format!("{} was removed.", target.name));
                    pending.set(None);
                    students.restart();
                }
                Err(e) => error_msg.set(auth.report(&e)),
            }
            deleting.set(false);
        });
    };

    let department_options: Vec<SelectOption> =
        DEPARTMENTS.iter().map(|d| SelectOption::plain(*d)).collect();

    rsx! {
        PageHeader {
            title: "Manage Students",
            subtitle: "Every registered student and their details",
        }

        Alert {
            kind: AlertKind::Success,
            message: notice(),
            on_dismiss: move |_| notice.set(String::new()),
        }
        Alert { message: error_msg() }

        if let Some(target) = pending() {
            Card { class: "section confirm-panel",
                CardContent {
                    p { "Delete {target.name}? Their attendance records go with them." }
                    div { class: "confirm-actions",
                        Button {
                            variant: ButtonVariant::Destructive,
                            loading: deleting(),
                            onclick: confirm_delete,
                            "Delete"
                        }
                        Button {
                            variant: ButtonVariant::Outline,
                            disabled: deleting(),
                            onclick: move |_| pending.set(None),
                            "Cancel"
                        }
                    }
                }
            }
        }

        Card { class: "section",
            CardHeader {
                title: "Students",
                actions: rsx! {
                    SelectField {
                        value: department(),
                        options: department_options,
                        placeholder: "All departments",
                        on_change: move |v: String| department.set(v),
                    }
                },
            }
            CardContent {
                match &*students.read() {
                    Some(Ok(list)) => rsx! {
                        TabularView {
                            columns: directory_columns(pending),
                            data: filter_directory(list, &department()),
                            items_per_page: config.table.items_per_page,
                            empty_message: "No students found",
                        }
                    },
                    Some(Err(message)) => rsx! {
                        Alert { message: message.clone() }
                    },
                    None => rsx! {
                        p { class: "loading-text", "Loading students..." }
                    },
                }
            }
        }
    }
}
