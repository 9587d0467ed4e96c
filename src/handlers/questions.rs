//! Question management handlers

use tracing::{debug, info};
use crate::forms::{FormErrors, QuestionForm};
use crate::handlers::{Flash, ManageMode, Outcome, Page, View};
use crate::middleware::require_admin;
use crate::models::Question;
use crate::services::AuthContext;
use crate::state::AppContext;
use crate::utils::errors::{QuestionDeskError, Result};
use crate::utils::helpers::truncate_text;
use crate::utils::logging::log_admin_action;

/// Render the manage-question page for a stored question
async fn manage_page(
    app: &AppContext,
    mode: ManageMode,
    question: Question,
    form: Option<QuestionForm>,
    errors: FormErrors,
) -> Result<View> {
    let answers = app.database.answers.list_for_question(question.id).await?;
    Ok(View::new(Page::ManageQuestion {
        mode,
        question,
        answers,
        form,
        errors,
    }))
}

/// GET/POST /new-question - show the form or create a question
pub async fn new_question(
    app: &AppContext,
    caller: Option<&AuthContext>,
    submission: Option<QuestionForm>,
) -> Result<Outcome> {
    let admin = require_admin(caller)?;

    let Some(form) = submission else {
        return Ok(View::new(Page::NewQuestion {
            form: QuestionForm::default(),
            errors: FormErrors::default(),
            created: None,
        })
        .into());
    };

    let request = match form.validate() {
        Ok(request) => request,
        Err(errors) => {
            debug!(user_id = admin.user_id(), "New question form rejected");
            return Ok(View::new(Page::NewQuestion {
                form,
                errors,
                created: None,
            })
            .into());
        }
    };

    let question = app.database.questions.create(request).await?;
    log_admin_action(
        admin.user_id(),
        "create_question",
        Some(&question.id.to_string()),
        Some(&truncate_text(&question.content, 80)),
    );

    let flash = Flash::form_success(format!("Question {} successfully created", question.content));
    Ok(View::new(Page::NewQuestion {
        form: QuestionForm::default(),
        errors: FormErrors::default(),
        created: Some(question),
    })
    .with_flash(flash)
    .into())
}

/// GET /questions - list every question
pub async fn questions(app: &AppContext, caller: Option<&AuthContext>) -> Result<Outcome> {
    require_admin(caller)?;

    let questions = app.database.questions.list().await?;
    Ok(View::new(Page::Questions { questions }).into())
}

/// GET /{id} and /{id}/info - show one question
pub async fn question_info(
    app: &AppContext,
    caller: Option<&AuthContext>,
    question_id: i64,
) -> Result<Outcome> {
    require_admin(caller)?;

    let question = app.database.require_question(question_id).await?;
    Ok(manage_page(app, ManageMode::Info, question, None, FormErrors::default()).await?.into())
}

/// GET/POST /{id}/change-question-details - show or apply the edit form
pub async fn change_question_details(
    app: &AppContext,
    caller: Option<&AuthContext>,
    question_id: i64,
    submission: Option<QuestionForm>,
) -> Result<Outcome> {
    let admin = require_admin(caller)?;

    let question = app.database.require_question(question_id).await?;

    let Some(form) = submission else {
        let form = QuestionForm::from_question(&question);
        return Ok(manage_page(app, ManageMode::Edit, question, Some(form), FormErrors::default()).await?.into());
    };

    let request = match form.validate() {
        Ok(request) => request,
        Err(errors) => {
            debug!(user_id = admin.user_id(), question_id = question_id, "Edit question form rejected");
            return Ok(manage_page(app, ManageMode::Edit, question, Some(form), errors).await?.into());
        }
    };

    let updated = app
        .database
        .questions
        .update(question_id, request)
        .await?
        .ok_or(QuestionDeskError::QuestionNotFound { question_id })?;

    log_admin_action(admin.user_id(), "edit_question", Some(&question_id.to_string()), None);

    let form = QuestionForm::from_question(&updated);
    let view = manage_page(app, ManageMode::Edit, updated, Some(form), FormErrors::default()).await?;
    Ok(view.with_flash(Flash::form_success("Question successfully edited")).into())
}

/// GET /{id}/delete - ask for confirmation before deleting
pub async fn delete_question_request(
    app: &AppContext,
    caller: Option<&AuthContext>,
    question_id: i64,
) -> Result<Outcome> {
    require_admin(caller)?;

    let question = app.database.require_question(question_id).await?;
    Ok(manage_page(app, ManageMode::ConfirmDelete, question, None, FormErrors::default()).await?.into())
}

/// GET /{id}/_delete - delete a question and its answers
pub async fn delete_question(
    app: &AppContext,
    caller: Option<&AuthContext>,
    question_id: i64,
) -> Result<Outcome> {
    let admin = require_admin(caller)?;

    let question = app.database.require_question(question_id).await?;
    if !app.database.questions.delete(question_id).await? {
        return Err(QuestionDeskError::QuestionNotFound { question_id });
    }

    log_admin_action(
        admin.user_id(),
        "delete_question",
        Some(&question_id.to_string()),
        Some(&truncate_text(&question.content, 80)),
    );
    info!(question_id = question_id, "Question deleted");

    Ok(Outcome::redirect(
        app.urls.questions(),
        Flash::success(format!("Successfully deleted question {}.", question.content)),
    ))
}
