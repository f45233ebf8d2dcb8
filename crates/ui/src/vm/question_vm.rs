use tutor_core::{AnswerStatus, SessionState};

/// Feedback shown next to an option once the student has answered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionMarker {
    None,
    Correct,
    Incorrect,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionRowVm {
    pub key: String,
    pub label: String,
    pub selected: bool,
    pub marker: OptionMarker,
}

#[derive(Clone, Debug, PartialEq)]
pub struct QuestionVm {
    pub domain: String,
    pub question: String,
    pub position_label: String,
    pub progress: f64,
    pub progress_label: String,
    pub options: Vec<OptionRowVm>,
    pub status: AnswerStatus,
    pub can_go_back: bool,
    pub can_go_forward: bool,
}

/// Project the current question. `None` when the set is empty.
#[must_use]
pub fn map_question(session: &SessionState) -> Option<QuestionVm> {
    let mcq = session.current_mcq()?;
    let selected = session.selected_answer();
    let answered = selected.is_some();
    let index = session.current_index();
    let total = session.total_mcqs();

    let options = mcq
        .options()
        .iter()
        .map(|opt| {
            let is_selected = selected == Some(opt.key.as_str());
            let marker = if !answered {
                OptionMarker::None
            } else if mcq.is_correct(&opt.key) {
                OptionMarker::Correct
            } else if is_selected {
                OptionMarker::Incorrect
            } else {
                OptionMarker::None
            };
            OptionRowVm {
                key: opt.key.clone(),
                label: format!("{}. {}", opt.key, opt.value),
                selected: is_selected,
                marker,
            }
        })
        .collect();

    let progress = session.progress();

    Some(QuestionVm {
        domain: mcq.domain().to_owned(),
        question: mcq.question().to_owned(),
        position_label: format!("Question {} of {}", index + 1, total),
        progress,
        progress_label: format!("{progress:.0}%"),
        options,
        status: session.answer_status(),
        can_go_back: index > 0,
        can_go_forward: index + 1 < total,
    })
}
