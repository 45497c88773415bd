use form_builder::commands::builder::{
    builder_add_field, builder_add_option, builder_drop, builder_new, builder_open,
    builder_save, builder_set_title, builder_update_field,
};
use form_builder::commands::dashboard::{dashboard_delete, dashboard_list, submissions_report, submissions_view};
use form_builder::commands::public::{public_answer, public_open, public_reset, public_submit, public_toggle};
use form_builder::api::ClientSettings;
use form_builder::form::{DragEnd, FieldPatch};
use form_builder::session::{Session, User};
use form_builder::store::SqliteBackend;
use form_builder::submission::ResponseValue;

fn session() -> Session {
    Session {
        token: "local".to_string(),
        user: User {
            id: "owner-1".to_string(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
        },
    }
}

#[test]
fn build_share_answer_and_review() {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteBackend::open(&dir.path().join("data").join("forms.sqlite3")).unwrap();
    let settings = ClientSettings::default();
    let session = session();

    let mut state = builder_new();
    builder_set_title(&mut state, "Team lunch".to_string());
    let name = builder_add_field(&mut state, "text").unwrap();
    let food = builder_add_field(&mut state, "checkbox").unwrap();
    builder_update_field(&mut state, &name.id, FieldPatch::label("Your name")).unwrap();
    builder_update_field(&mut state, &name.id, FieldPatch::required(true)).unwrap();
    builder_update_field(&mut state, &food.id, FieldPatch::label("Food")).unwrap();
    assert_eq!(builder_add_option(&mut state, &food.id).unwrap(), "Option 3");
    assert!(builder_drop(&mut state, &DragEnd::new(food.id.as_str(), Some(name.id.as_str()))).unwrap());

    let form_id = builder_save(&store, Some(&session), &mut state).unwrap();
    assert_eq!(state.form_id.as_deref(), Some(form_id.as_str()));

    let reopened = builder_open(&store, Some(&session), &form_id).unwrap();
    let order: Vec<&str> = reopened.editor.fields().iter().map(|f| f.id.as_str()).collect();
    assert_eq!(order, vec![food.id.as_str(), name.id.as_str()]);

    let listed = dashboard_list(&store, &settings, Some(&session)).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].field_count, 2);
    let slug = listed[0].share_url.rsplit('/').next().unwrap().to_string();

    let mut public = public_open(&store, &slug).unwrap();
    assert_eq!(public.fields[0].label, "Food");
    public_toggle(&mut public, &food.id, "Option 1", true);
    let err = public_submit(&store, &mut public).unwrap_err();
    assert_eq!(err, "Please fill in required fields: Your name");

    public_answer(&mut public, &name.id, "Grace".to_string());
    public_submit(&store, &mut public).unwrap();
    assert!(public.submitted);
    assert!(public.draft.value(&name.id).is_none());
    public_reset(&mut public);
    assert!(!public.submitted);

    let view = submissions_view(&store, Some(&session), &form_id).unwrap();
    assert_eq!(view.form_title, "Team lunch");
    assert_eq!(view.submissions.len(), 1);
    assert_eq!(
        view.submissions[0].responses[0].value,
        ResponseValue::Many(vec!["Option 1".to_string()])
    );

    let report = submissions_report(&store, Some(&session), &form_id).unwrap();
    assert!(report.contains("- **Your name**: Grace"));

    dashboard_delete(&store, Some(&session), &form_id).unwrap();
    assert!(dashboard_list(&store, &settings, Some(&session)).unwrap().is_empty());
}

#[test]
fn save_rejects_incomplete_forms() {
    let store = SqliteBackend::open_in_memory().unwrap();
    let session = session();
    let mut state = builder_new();

    builder_set_title(&mut state, "Untitled".to_string());
    assert_eq!(
        builder_save(&store, Some(&session), &mut state).unwrap_err(),
        "Please add at least one field"
    );

    builder_add_field(&mut state, "date").unwrap();
    builder_set_title(&mut state, " ".to_string());
    assert_eq!(
        builder_save(&store, Some(&session), &mut state).unwrap_err(),
        "Please enter a form title"
    );
    assert!(state.form_id.is_none());
}

#[test]
fn second_save_updates_in_place() {
    let store = SqliteBackend::open_in_memory().unwrap();
    let session = session();
    let mut state = builder_new();
    builder_set_title(&mut state, "Poll".to_string());
    builder_add_field(&mut state, "radio").unwrap();
    let first = builder_save(&store, Some(&session), &mut state).unwrap();

    builder_add_field(&mut state, "textarea").unwrap();
    let second = builder_save(&store, Some(&session), &mut state).unwrap();
    assert_eq!(first, second);

    let reopened = builder_open(&store, Some(&session), &first).unwrap();
    assert_eq!(reopened.editor.len(), 2);
}
