use std::error::Error;
use std::io::{BufRead, Write};
use std::path::Path;

use pattern_core::model::PatternCategory;
use pattern_core::quiz::{Answer, Question, Quiz, QuizRun, QuizScore, QuizStep};

/// Read a JSON array of questions.
pub fn load_quiz(path: &Path) -> Result<Quiz, Box<dyn Error>> {
    let raw = std::fs::read_to_string(path)
        .map_err(|err| format!("cannot read {}: {err}", path.display()))?;
    parse_quiz(&raw)
}

fn parse_quiz(raw: &str) -> Result<Quiz, Box<dyn Error>> {
    let questions: Vec<Question> = serde_json::from_str(raw)?;
    let quiz = Quiz::new(questions).map_err(pattern_core::Error::from)?;
    Ok(quiz)
}

/// Interpret one line of user input for `question`.
///
/// Options may be picked by 1-based number or by text.
fn parse_answer(question: &Question, input: &str) -> Option<Answer> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    match question {
        Question::MultipleChoice { options, .. } => {
            if let Ok(number) = input.parse::<usize>() {
                return number
                    .checked_sub(1)
                    .and_then(|index| options.get(index))
                    .map(|opt| Answer::Option(opt.clone()));
            }
            options
                .iter()
                .find(|opt| opt.trim().eq_ignore_ascii_case(input))
                .map(|opt| Answer::Option(opt.clone()))
        }
        Question::Judgement { .. } => match input.to_ascii_lowercase().as_str() {
            "y" | "yes" | "correct" | "true" => Some(Answer::Verdict(true)),
            "n" | "no" | "incorrect" | "false" => Some(Answer::Verdict(false)),
            _ => None,
        },
        Question::CategoryMatch { .. } => match input.to_ascii_lowercase().as_str() {
            "c" => Some(Answer::Category(PatternCategory::Creational)),
            "b" => Some(Answer::Category(PatternCategory::Behavioral)),
            other => other.parse().ok().map(Answer::Category),
        },
    }
}

fn write_question(run: &QuizRun, out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Question {} of {}", run.position(), run.total())?;
    let question = run.current();
    match question {
        Question::MultipleChoice {
            prompt, options, ..
        } => {
            writeln!(out, "{prompt}")?;
            for (index, option) in options.iter().enumerate() {
                writeln!(out, "  {}) {option}", index + 1)?;
            }
        }
        Question::Judgement { statement, .. } => {
            writeln!(out, "{statement}")?;
            writeln!(out, "  correct? [y/n]")?;
        }
        Question::CategoryMatch {
            prompt, pattern, ..
        } => {
            writeln!(out, "{prompt}")?;
            writeln!(out, "  {pattern}")?;
            writeln!(out, "  [c]reational, structural, [b]ehavioral")?;
        }
    }
    write!(out, "> ")?;
    out.flush()
}

fn expected_answer(question: &Question) -> String {
    match question {
        Question::MultipleChoice { answer, .. } => answer.clone(),
        Question::Judgement { correct: true, .. } => "correct".to_string(),
        Question::Judgement { correct: false, .. } => "incorrect".to_string(),
        Question::CategoryMatch { category, .. } => category.as_str().to_string(),
    }
}

fn write_score(score: QuizScore, out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "Score: {}/{} ({}%), {} skipped",
        score.correct,
        score.total,
        score.percent(),
        score.skipped
    )
}

/// Walk through the quiz once, one answer per input line. `s` skips.
///
/// Running out of input ends the quiz early with the score so far.
pub fn run_quiz(
    quiz: Quiz,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<QuizScore, Box<dyn Error>> {
    let mut run = QuizRun::new(quiz);
    let mut lines = input.lines();

    write_question(&run, out)?;
    loop {
        let Some(line) = lines.next().transpose()? else {
            let score = run.score();
            write_score(score, out)?;
            return Ok(score);
        };

        let step = if line.trim().eq_ignore_ascii_case("s") {
            run.skip()
        } else {
            let Some(answer) = parse_answer(run.current(), &line) else {
                write!(out, "Unrecognised answer, try again or `s` to skip\n> ")?;
                out.flush()?;
                continue;
            };
            run.select(answer);
            if run.check()? {
                writeln!(out, "Correct!")?;
            } else {
                writeln!(out, "Wrong, the answer is {}", expected_answer(run.current()))?;
            }
            run.next()?
        };

        match step {
            QuizStep::Question(_) => write_question(&run, out)?,
            QuizStep::Finished(score) => {
                write_score(score, out)?;
                return Ok(score);
            }
        }
    }
}
