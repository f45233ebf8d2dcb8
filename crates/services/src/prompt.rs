//! Prompt text sent to the completion endpoint.

use tutor_core::model::{AnswerOption, Mcq};

/// Everything needed to ask for an explanation of one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplanationRequest {
    pub question: String,
    pub options: Vec<AnswerOption>,
    pub correct_answer: AnswerOption,
    pub selected_answer: Option<AnswerOption>,
}

impl ExplanationRequest {
    /// Snapshot a question plus the student's pick, if any.
    ///
    /// A `selected` key that matches no option is ignored.
    #[must_use]
    pub fn from_mcq(mcq: &Mcq, selected: Option<&str>) -> Self {
        Self {
            question: mcq.question().to_owned(),
            options: mcq.options().to_vec(),
            correct_answer: mcq.correct_answer().clone(),
            selected_answer: selected.and_then(|key| mcq.option(key)).cloned(),
        }
    }

    /// The student's pick when it differs from the correct answer.
    #[must_use]
    pub fn incorrect_selection(&self) -> Option<&AnswerOption> {
        self.selected_answer
            .as_ref()
            .filter(|selected| selected.key != self.correct_answer.key)
    }
}

#[must_use]
pub fn build_explanation_prompt(request: &ExplanationRequest) -> String {
    let options = request
        .options
        .iter()
        .map(|opt| format!("{}. {}", opt.key, opt.value))
        .collect::<Vec<_>>()
        .join("\n");
    let correct = &request.correct_answer;

    let mut prompt = format!(
        "Question: {}\n\nOptions:\n{options}\n\nCorrect Answer: {}. {}\n\n",
        request.question, correct.key, correct.value
    );

    if let Some(selected) = request.incorrect_selection() {
        prompt.push_str(&format!(
            "The student selected: {}. {}\n\n",
            selected.key, selected.value
        ));
    }

    prompt.push_str(&format!(
        "Please provide a detailed explanation of why {} is the correct answer. Include:\n\
         1. Why the correct answer is right\n\
         2. Why other options are incorrect\n\
         3. Clinical reasoning and pathophysiology\n\
         4. Key concepts for Nurse Practitioners to remember\n\
         \n\
         Format your response in a clear, educational manner suitable for exam preparation.\n",
        correct.key
    ));

    prompt
}

/// System prompt, optionally extended with the question under discussion.
///
/// An empty context counts as none.
#[must_use]
pub fn system_message(system_prompt: &str, context: Option<&str>) -> String {
    match context.filter(|ctx| !ctx.is_empty()) {
        Some(ctx) => format!("{system_prompt}\n\nCurrent context: {ctx}"),
        None => system_prompt.to_owned(),
    }
}

/// Short description of a question for use as chat context.
#[must_use]
pub fn question_context(mcq: &Mcq, selected: Option<&str>) -> String {
    let correct = mcq.correct_answer();
    let mut context = format!(
        "{} question: {} Correct answer: {}. {}.",
        mcq.domain(),
        mcq.question(),
        correct.key,
        correct.value
    );
    if let Some(picked) = selected.and_then(|key| mcq.option(key)) {
        context.push_str(&format!(
            " The student selected: {}. {}.",
            picked.key, picked.value
        ));
    }
    context
}
