//! Answer management handlers

use tracing::debug;
use crate::handlers::{Flash, Outcome};
use crate::middleware::{require_admin, require_login};
use crate::services::{AuthContext, EmailJob, FLAG_TEMPLATE};
use crate::state::AppContext;
use crate::utils::errors::{QuestionDeskError, Result};
use crate::utils::logging::{log_admin_action, log_flag_report};

/// GET /answer/{id}/_delete - delete an answer and return to its club
pub async fn delete_answer(
    app: &AppContext,
    caller: Option<&AuthContext>,
    answer_id: i64,
) -> Result<Outcome> {
    let admin = require_admin(caller)?;

    let answer = app.database.require_answer(answer_id).await?;
    let club_id = answer.club_id;

    if !app.database.answers.delete(answer_id).await? {
        return Err(QuestionDeskError::AnswerNotFound { answer_id });
    }

    log_admin_action(admin.user_id(), "delete_answer", Some(&answer_id.to_string()), None);

    Ok(Outcome::redirect(
        app.urls.club_info(club_id),
        Flash::success("Successfully deleted answer"),
    ))
}

/// GET /answer/{id}/flag - report an answer to every administrator.
///
/// Any signed-in user may report; the administrator role is not required.
pub async fn flag_answer(
    app: &AppContext,
    caller: Option<&AuthContext>,
    answer_id: i64,
) -> Result<Outcome> {
    let reporter = require_login(caller)?;

    let answer = app.database.require_answer(answer_id).await?;
    let link = app.urls.external(&app.urls.delete_answer(answer.id))?;
    let subject = format!("A new answer report was issued by {}", reporter.user.first_name);

    let administrators = app.database.users.find_by_role(app.administrator_role()).await?;
    for administrator in &administrators {
        debug!(recipient = %administrator.email, answer_id = answer_id, "Queueing answer report");
        app.queue.enqueue(EmailJob {
            recipient: administrator.email.clone(),
            subject: subject.clone(),
            template: FLAG_TEMPLATE.to_string(),
            answer: answer.clone(),
            link: link.clone(),
        })?;
    }

    log_flag_report(answer_id, reporter.user_id(), administrators.len());

    Ok(Outcome::redirect(
        app.urls.club_info(answer.club_id),
        Flash::success("Successfully submitted report"),
    ))
}
