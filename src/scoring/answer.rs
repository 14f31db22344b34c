//! SQuAD-style answer metrics, maximized over the reference answers.

use std::collections::HashMap;

use crate::text::{answer_tokens, normalize_answer};

/// 1.0 when the normalized prediction equals any normalized reference, else 0.0.
pub fn exact_match<I, S>(predicted: &str, references: I) -> f64
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let predicted = normalize_answer(predicted);
    let matched = references
        .into_iter()
        .any(|reference| normalize_answer(reference.as_ref()) == predicted);
    if matched { 1.0 } else { 0.0 }
}

/// Best token-level F1 against any reference.
pub fn f1<I, S>(predicted: &str, references: I) -> f64
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let predicted_tokens = answer_tokens(predicted);
    references
        .into_iter()
        .map(|reference| token_f1(&predicted_tokens, &answer_tokens(reference.as_ref())))
        .fold(0.0, f64::max)
}

fn token_f1(predicted: &[String], reference: &[String]) -> f64 {
    if predicted.is_empty() || reference.is_empty() {
        return if predicted == reference { 1.0 } else { 0.0 };
    }

    let mut reference_counts: HashMap<&str, usize> = HashMap::new();
    for token in reference {
        *reference_counts.entry(token.as_str()).or_default() += 1;
    }

    let mut common = 0usize;
    for token in predicted {
        if let Some(count) = reference_counts.get_mut(token.as_str())
            && *count > 0
        {
            *count -= 1;
            common += 1;
        }
    }

    if common == 0 {
        return 0.0;
    }

    let precision = common as f64 / predicted.len() as f64;
    let recall = common as f64 / reference.len() as f64;
    2.0 * precision * recall / (precision + recall)
}
