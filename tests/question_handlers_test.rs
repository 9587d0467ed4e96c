//! Question management handler tests
//!
//! Drives the handlers directly over the in-memory store.

mod helpers;

use assert_matches::assert_matches;
use helpers::*;
use question_desk::database::QuestionStore;
use question_desk::forms::QuestionForm;
use question_desk::handlers::{self, FlashCategory, ManageMode, Outcome, Page};
use question_desk::models::QuestionType;
use question_desk::QuestionDeskError;

fn rendered_page(outcome: Outcome) -> (Page, Vec<handlers::Flash>) {
    match outcome {
        Outcome::Render(view) => (view.page, view.flashes),
        other => panic!("expected a rendered page, got {:?}", other),
    }
}

#[tokio::test]
async fn test_question_lifecycle() {
    let t = TestApp::new();
    let admin = Some(&t.admin);

    // Create
    let outcome = handlers::new_question(&t.app, admin, Some(valid_form("Rate this club"))).await.unwrap();
    let (page, flashes) = rendered_page(outcome);
    let created = match page {
        Page::NewQuestion { form, errors, created } => {
            assert_eq!(form, QuestionForm::default());
            assert!(errors.is_empty());
            created.expect("question returned")
        }
        other => panic!("unexpected page {:?}", other),
    };
    assert_eq!(flashes.len(), 1);
    assert_eq!(flashes[0].category, FlashCategory::FormSuccess);
    assert_eq!(flashes[0].message, "Question Rate this club successfully created");
    assert_eq!(created.question_type, QuestionType::Rating);
    assert!(created.free_response);

    // List
    let (page, _) = rendered_page(handlers::questions(&t.app, admin).await.unwrap());
    assert_matches!(page, Page::Questions { questions } if questions == vec![created.clone()]);

    // Edit
    let mut edit = QuestionForm::from_question(&created);
    edit.content = "Rate this club from 1 to 5".to_string();
    edit.free_response = String::new();
    let outcome = handlers::change_question_details(&t.app, admin, created.id, Some(edit)).await.unwrap();
    let (page, flashes) = rendered_page(outcome);
    assert_eq!(flashes[0].message, "Question successfully edited");
    assert_matches!(page, Page::ManageQuestion { mode: ManageMode::Edit, ref question, .. } if !question.free_response);

    let stored = t.store.question(created.id).unwrap();
    assert_eq!(stored.content, "Rate this club from 1 to 5");
    assert_eq!(stored.created_at, created.created_at);

    // Delete
    let outcome = handlers::delete_question(&t.app, admin, created.id).await.unwrap();
    match outcome {
        Outcome::Redirect(redirect) => {
            assert_eq!(redirect.location, "/question/questions");
            assert_eq!(redirect.flashes[0].category, FlashCategory::Success);
            assert_eq!(
                redirect.flashes[0].message,
                "Successfully deleted question Rate this club from 1 to 5."
            );
        }
        other => panic!("expected redirect, got {:?}", other),
    }
    assert_eq!(t.store.question_count(), 0);
}

#[tokio::test]
async fn test_new_question_form_is_empty() {
    let t = TestApp::new();
    let (page, flashes) = rendered_page(handlers::new_question(&t.app, Some(&t.admin), None).await.unwrap());
    assert!(flashes.is_empty());
    assert_matches!(page, Page::NewQuestion { created: None, ref errors, .. } if errors.is_empty());
}

#[tokio::test]
async fn test_invalid_form_creates_nothing() {
    let t = TestApp::new();
    let mut form = valid_form("");
    form.question_type = "essay".to_string();
    form.icon_name = "Not Valid".to_string();

    let outcome = handlers::new_question(&t.app, Some(&t.admin), Some(form.clone())).await.unwrap();
    let (page, flashes) = rendered_page(outcome);
    assert!(flashes.is_empty());
    match page {
        Page::NewQuestion { form: shown, errors, created } => {
            assert_eq!(shown, form);
            assert!(created.is_none());
            assert_eq!(errors.get("content").unwrap(), &vec!["This field is required.".to_string()]);
            assert_eq!(errors.get("type").unwrap(), &vec!["Not a valid choice.".to_string()]);
            assert!(errors.get("icon_name").is_some());
            assert!(errors.get("short_name").is_none());
        }
        other => panic!("unexpected page {:?}", other),
    }
    assert_eq!(t.store.question_count(), 0);
}

#[tokio::test]
async fn test_invalid_edit_leaves_question_unchanged() {
    let t = TestApp::new();
    let original = t.store.insert_question(sample_request());

    let mut form = QuestionForm::from_question(&original);
    form.short_name = String::new();
    let outcome = handlers::change_question_details(&t.app, Some(&t.admin), original.id, Some(form))
        .await
        .unwrap();

    let (page, flashes) = rendered_page(outcome);
    assert!(flashes.is_empty());
    assert_matches!(page, Page::ManageQuestion { ref errors, .. } if errors.get("short_name").is_some());
    assert_eq!(t.store.question(original.id).unwrap(), original);
}

#[tokio::test]
async fn test_edit_form_is_prepopulated() {
    let t = TestApp::new();
    let original = t.store.insert_question(sample_request());
    t.store.insert_answer(11, original.id, 3, "Blue");

    let outcome = handlers::change_question_details(&t.app, Some(&t.admin), original.id, None).await.unwrap();
    let (page, _) = rendered_page(outcome);
    match page {
        Page::ManageQuestion { mode, question, answers, form, errors } => {
            assert_eq!(mode, ManageMode::Edit);
            assert_eq!(question, original);
            assert_eq!(answers.len(), 1);
            assert!(errors.is_empty());
            let form = form.unwrap();
            assert_eq!(form.content, "Favorite color?");
            assert_eq!(form.question_type, "single-choice");
            assert_eq!(form.free_response, "False");
        }
        other => panic!("unexpected page {:?}", other),
    }
}

#[tokio::test]
async fn test_resubmitting_unchanged_form_keeps_values() {
    let t = TestApp::new();
    let original = t.store.insert_question(sample_request());

    let form = QuestionForm::from_question(&original);
    handlers::change_question_details(&t.app, Some(&t.admin), original.id, Some(form.clone()))
        .await
        .unwrap();
    handlers::change_question_details(&t.app, Some(&t.admin), original.id, Some(form))
        .await
        .unwrap();

    let stored = t.store.question(original.id).unwrap();
    assert_eq!(stored.to_request(), original.to_request());
}

#[tokio::test]
async fn test_info_and_confirm_pages() {
    let t = TestApp::new();
    let question = t.store.insert_question(sample_request());

    let (page, _) = rendered_page(handlers::question_info(&t.app, Some(&t.admin), question.id).await.unwrap());
    assert_matches!(page, Page::ManageQuestion { mode: ManageMode::Info, form: None, .. });

    let (page, _) = rendered_page(
        handlers::delete_question_request(&t.app, Some(&t.admin), question.id)
            .await
            .unwrap(),
    );
    assert_matches!(page, Page::ManageQuestion { mode: ManageMode::ConfirmDelete, .. });
    assert_eq!(t.store.question_count(), 1);
}

#[tokio::test]
async fn test_delete_question_removes_its_answers() {
    let t = TestApp::new();
    let doomed = t.store.insert_question(sample_request());
    let kept = t.store.insert_question(sample_request());
    t.store.insert_answer(1, doomed.id, 3, "Red");
    t.store.insert_answer(2, doomed.id, 4, "Green");
    t.store.insert_answer(3, kept.id, 3, "Blue");

    handlers::delete_question(&t.app, Some(&t.admin), doomed.id).await.unwrap();

    assert!(t.store.question(doomed.id).is_none());
    assert!(t.store.answer(1).is_none());
    assert!(t.store.answer(2).is_none());
    assert!(t.store.answer(3).is_some());
}

#[tokio::test]
async fn test_missing_question_is_not_found() {
    let t = TestApp::new();
    let admin = Some(&t.admin);

    assert_matches!(
        handlers::question_info(&t.app, admin, 42).await,
        Err(QuestionDeskError::QuestionNotFound { question_id: 42 })
    );
    assert_matches!(
        handlers::change_question_details(&t.app, admin, 42, Some(valid_form("x"))).await,
        Err(QuestionDeskError::QuestionNotFound { .. })
    );
    assert_matches!(
        handlers::delete_question_request(&t.app, admin, 42).await,
        Err(QuestionDeskError::QuestionNotFound { .. })
    );
    assert_matches!(
        handlers::delete_question(&t.app, admin, 42).await,
        Err(QuestionDeskError::QuestionNotFound { .. })
    );
}

#[tokio::test]
async fn test_non_admins_are_refused_before_any_change() {
    let t = TestApp::new();
    let question = t.store.insert_question(sample_request());
    let member = Some(&t.member);

    assert_matches!(
        handlers::new_question(&t.app, member, Some(valid_form("Sneaky"))).await,
        Err(QuestionDeskError::PermissionDenied(_))
    );
    assert_matches!(
        handlers::questions(&t.app, member).await,
        Err(QuestionDeskError::PermissionDenied(_))
    );
    assert_matches!(
        handlers::change_question_details(&t.app, member, question.id, Some(valid_form("Changed"))).await,
        Err(QuestionDeskError::PermissionDenied(_))
    );
    assert_matches!(
        handlers::delete_question(&t.app, None, question.id).await,
        Err(QuestionDeskError::Authentication(_))
    );
    // Refused even when the target does not exist
    assert_matches!(
        handlers::question_info(&t.app, member, 999).await,
        Err(QuestionDeskError::PermissionDenied(_))
    );

    assert_eq!(t.store.question_count(), 1);
    assert_eq!(t.store.question(question.id).unwrap(), question);
}

#[tokio::test]
async fn test_questions_listed_in_id_order() {
    let t = TestApp::new();
    let first = t.app.database.questions.create(sample_request()).await.unwrap();
    let second = t.app.database.questions.create(sample_request()).await.unwrap();

    let (page, _) = rendered_page(handlers::questions(&t.app, Some(&t.admin)).await.unwrap());
    match page {
        Page::Questions { questions } => {
            let ids: Vec<i64> = questions.iter().map(|q| q.id).collect();
            assert_eq!(ids, vec![first.id, second.id]);
        }
        other => panic!("unexpected page {:?}", other),
    }
}
