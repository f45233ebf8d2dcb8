use tutor_core::AnswerStatus;
use ui::vm::{ChatVm, OptionMarker, QuestionVm};
use ui::{AppContext, Route};

#[must_use]
pub fn render_view(ctx: &AppContext) -> String {
    match ctx.route() {
        Route::Root | Route::Login => render_login(),
        Route::Home => render_home(ctx),
        Route::Exams => {
            let mut out = match ctx.question_vm() {
                Some(vm) => render_question(&vm),
                None => "No questions loaded.".to_owned(),
            };
            let chat = ctx.chat_vm();
            if chat.open {
                out.push_str("\n\n");
                out.push_str(&render_chat(&chat));
            }
            out
        }
    }
}

fn render_login() -> String {
    "== Login ==\nSign in with `login <email>` to start practising.".to_owned()
}

fn render_home(ctx: &AppContext) -> String {
    let session = ctx.session();
    let email = session.user_email().unwrap_or("student");
    let mut out = format!(
        "== Home ==\nWelcome, {email}.\n{} practice questions are loaded. Open them with `go exams`.",
        session.total_mcqs()
    );
    if !ctx.ai_enabled() {
        out.push_str("\nAI tutor is off: set NP_TUTOR_API_KEY to enable explanations and chat.");
    }
    out
}

#[must_use]
pub fn render_question(vm: &QuestionVm) -> String {
    let mut lines = vec![
        format!("== {} ({}) ==", vm.position_label, vm.progress_label),
        format!("[{}]", vm.domain),
        vm.question.clone(),
        String::new(),
    ];
    for option in &vm.options {
        let pointer = if option.selected { '>' } else { ' ' };
        let marker = match option.marker {
            OptionMarker::None => "",
            OptionMarker::Correct => "  (correct)",
            OptionMarker::Incorrect => "  (your answer)",
        };
        lines.push(format!("{pointer} {}{marker}", option.label));
    }
    match vm.status {
        AnswerStatus::Unanswered => {}
        AnswerStatus::Correct => lines.push("\nCorrect!".to_owned()),
        AnswerStatus::Incorrect => lines.push("\nNot quite. Try `explain`.".to_owned()),
    }
    lines.join("\n")
}

#[must_use]
pub fn render_chat(chat: &ChatVm) -> String {
    if chat.is_empty() {
        return "-- Chat --\n(no messages yet; use `ask <text>` or `explain`)".to_owned();
    }
    let mut out = String::from("-- Chat --");
    for line in &chat.lines {
        out.push_str(&format!("\n[{}] {}: {}", line.time_label, line.author, line.text));
    }
    out
}
