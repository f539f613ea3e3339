use async_trait::async_trait;

use super::{
    models::QuizQuestion,
    text::is_blank,
    ReaderError,
};

/// Anything that can turn a passage into comprehension questions.
#[async_trait]
pub trait QuizGenerator: Send + Sync {
    async fn generate_quiz(&self, text: &str) -> Result<Vec<QuizQuestion>, ReaderError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizScore {
    pub score: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Default)]
pub struct QuizSession {
    questions: Vec<QuizQuestion>,
    selections: Vec<Option<String>>,
}

impl QuizSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn validate_source(source: &str) -> Result<&str, ReaderError> {
        if is_blank(source) {
            return Err(ReaderError::EmptyInput("No text available to generate quiz.".to_string()));
        }
        Ok(source)
    }

    pub async fn generate(
        &mut self,
        source: &str,
        generator: &dyn QuizGenerator,
    ) -> Result<usize, ReaderError> {
        let source = Self::validate_source(source)?;
        let questions = generator.generate_quiz(source).await?;
        self.replace_questions(questions);
        Ok(self.questions.len())
    }

    /// Installs a freshly generated quiz; previous answers are always discarded.
    ///
    /// Questions without an answer marker are dropped, since an empty marker prefixes every
    /// answer.
    pub fn replace_questions(&mut self, questions: Vec<QuizQuestion>) {
        let received = questions.len();
        let questions: Vec<QuizQuestion> =
            questions.into_iter().filter(|q| !is_blank(&q.correct_answer)).collect();
        if questions.len() < received {
            tracing::warn!(
                "Dropped {} quiz questions without a correct answer",
                received - questions.len()
            );
        }

        self.selections = vec![None; questions.len()];
        self.questions = questions;
    }

    pub fn clear(&mut self) {
        self.questions.clear();
        self.selections.clear();
    }

    pub fn reset_selections(&mut self) {
        self.selections = vec![None; self.questions.len()];
    }

    /// Records an answer without checking it against the declared options.
    pub fn select_answer(&mut self, index: usize, option: impl Into<String>) -> bool {
        match self.selections.get_mut(index) {
            Some(slot) => {
                *slot = Some(option.into());
                true
            }
            None => false,
        }
    }

    pub fn selection(&self, index: usize) -> Option<&str> {
        self.selections.get(index).and_then(|s| s.as_deref())
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Prefix match against the answer key, which may embed an explanation after the marker.
    pub fn submit(&self) -> QuizScore {
        let score = self
            .questions
            .iter()
            .zip(&self.selections)
            .filter(|(question, selected)| {
                selected
                    .as_deref()
                    .map(|answer| answer.starts_with(question.correct_answer.as_str()))
                    .unwrap_or(false)
            })
            .count();

        QuizScore { score, total: self.questions.len() }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{
        AtomicUsize,
        Ordering,
    };

    use super::*;

    fn question(text: &str, correct: &str) -> QuizQuestion {
        QuizQuestion {
            question: text.to_string(),
            options: vec!["A".to_string(), "B".to_string(), "C".to_string()],
            correct_answer: correct.to_string(),
        }
    }

    struct FixedQuiz {
        calls: AtomicUsize,
        questions: Vec<QuizQuestion>,
    }

    #[async_trait]
    impl QuizGenerator for FixedQuiz {
        async fn generate_quiz(&self, _text: &str) -> Result<Vec<QuizQuestion>, ReaderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.questions.clone())
        }
    }

    #[test]
    fn scoring_uses_prefix_match() {
        let mut session = QuizSession::new();
        session.replace_questions(vec![question("q1", "A"), question("q2", "B")]);
        session.select_answer(0, "A-is-right");
        session.select_answer(1, "C");

        assert_eq!(session.submit(), QuizScore { score: 1, total: 2 });
    }

    #[test]
    fn unanswered_questions_score_zero() {
        let mut session = QuizSession::new();
        session.replace_questions(vec![question("q1", "A"), question("q2", "B")]);
        assert_eq!(session.submit(), QuizScore { score: 0, total: 2 });
    }

    #[test]
    fn selection_outside_quiz_is_ignored() {
        let mut session = QuizSession::new();
        session.replace_questions(vec![question("q1", "A")]);
        assert!(!session.select_answer(3, "A"));
        assert!(session.select_answer(0, "not an option"));
        assert_eq!(session.selection(0), Some("not an option"));
    }

    #[tokio::test]
    async fn regenerating_resets_selections() {
        let generator = FixedQuiz {
            calls: AtomicUsize::new(0),
            questions: vec![question("q1", "A"), question("q2", "B")],
        };
        let mut session = QuizSession::new();
        session.generate("Some passage.", &generator).await.unwrap();
        session.select_answer(0, "A");
        session.select_answer(1, "B");

        session.generate("Some passage.", &generator).await.unwrap();

        assert_eq!(session.selection(0), None);
        assert_eq!(session.selection(1), None);
        assert_eq!(generator.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn blank_source_fails_without_request() {
        let generator = FixedQuiz { calls: AtomicUsize::new(0), questions: Vec::new() };
        let mut session = QuizSession::new();

        let result = session.generate("   ", &generator).await;

        assert!(matches!(result, Err(ReaderError::EmptyInput(_))));
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn questions_without_answer_key_are_dropped() {
        let mut session = QuizSession::new();
        session.replace_questions(vec![question("q1", ""), question("q2", "B"), question("q3", " ")]);

        assert_eq!(session.questions().len(), 1);
        assert_eq!(session.questions()[0].question, "q2");
        session.select_answer(0, "A");
        assert_eq!(session.submit(), QuizScore { score: 0, total: 1 });
    }

    #[test]
    fn reopening_clears_answers_but_keeps_questions() {
        let mut session = QuizSession::new();
        session.replace_questions(vec![question("q1", "A")]);
        session.select_answer(0, "A");
        session.reset_selections();
        assert_eq!(session.questions().len(), 1);
        assert_eq!(session.selection(0), None);
    }
}
