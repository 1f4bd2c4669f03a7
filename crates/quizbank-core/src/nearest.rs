//! Nearest-neighbor distractor selection (first generation).
//!
//! Ranks the pool by absolute distance to the correct value and admits the
//! closest answers. Each admitted neighbor may also contribute its nearest
//! multiple of ten as an extra round-number confuser.

use crate::answer::{format_number, nearest_multiple_of_ten, Answer, AnswerPool};

/// A pool answer admitted as a distractor candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct Neighbor {
    /// The pool answer's display text.
    pub text: String,
    pub value: f64,
    /// Absolute distance to the correct value.
    pub distance: f64,
    /// Position in the pool; breaks distance ties.
    pub index: usize,
    /// The neighbor rounded to the nearest ten, when that is a usable distractor.
    pub rounded: Option<String>,
}

/// Select up to `max_candidates` pool answers closest to `correct`.
///
/// Label answers in the pool are skipped. A label `correct` yields nothing.
/// Equal distances keep pool order. A neighbor gets a `rounded` confuser
/// only when both the neighbor and its nearest ten are more than `epsilon`
/// away from the correct value.
pub fn select_nearest(
    correct: &Answer,
    pool: &AnswerPool,
    max_candidates: usize,
    epsilon: f64,
) -> Vec<Neighbor> {
    let Some(target) = correct.value() else {
        return Vec::new();
    };

    let mut ranked: Vec<Neighbor> = pool
        .iter()
        .enumerate()
        .filter_map(|(index, answer)| {
            let value = answer.value()?;
            Some(Neighbor {
                text: answer.text().to_string(),
                value,
                distance: (value - target).abs(),
                index,
                rounded: None,
            })
        })
        .collect();

    ranked.sort_by(|a, b| {
        a.distance
            .total_cmp(&b.distance)
            .then_with(|| a.index.cmp(&b.index))
    });
    ranked.truncate(max_candidates);

    for neighbor in &mut ranked {
        if neighbor.distance > epsilon {
            let rounded = nearest_multiple_of_ten(neighbor.value);
            if (rounded - target).abs() > epsilon {
                neighbor.rounded = Some(format_number(rounded));
            }
        }
    }

    tracing::trace!(
        correct = correct.text(),
        pool = pool.len(),
        admitted = ranked.len(),
        "selected nearest neighbors"
    );

    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(neighbors: &[Neighbor]) -> Vec<&str> {
        neighbors.iter().map(|n| n.text.as_str()).collect()
    }

    #[test]
    fn ranks_by_distance() {
        let pool: AnswerPool = ["28", "32", "50", "10"].into_iter().collect();
        let picked = select_nearest(&Answer::parse("30"), &pool, 4, 0.1);
        assert_eq!(texts(&picked), vec!["28", "32", "10", "50"]);
    }

    #[test]
    fn rounded_confusers_skip_the_correct_ten() {
        let pool: AnswerPool = ["28", "32", "50", "10"].into_iter().collect();
        let picked = select_nearest(&Answer::parse("30"), &pool, 4, 0.1);
        // 28 and 32 both round to 30, which is the correct value
        assert_eq!(picked[0].rounded, None);
        assert_eq!(picked[1].rounded, None);
        assert_eq!(picked[2].rounded.as_deref(), Some("10"));
        assert_eq!(picked[3].rounded.as_deref(), Some("50"));
    }

    #[test]
    fn neighbor_equal_to_correct_gets_no_confuser() {
        let pool: AnswerPool = ["30.0", "47"].into_iter().collect();
        let picked = select_nearest(&Answer::parse("30"), &pool, 4, 0.1);
        assert_eq!(picked[0].text, "30.0");
        assert_eq!(picked[0].rounded, None);
        assert_eq!(picked[1].rounded.as_deref(), Some("50"));
    }

    #[test]
    fn ties_keep_pool_order() {
        let pool: AnswerPool = ["35", "25", "45", "15"].into_iter().collect();
        let picked = select_nearest(&Answer::parse("30"), &pool, 2, 0.1);
        assert_eq!(texts(&picked), vec!["35", "25"]);
    }

    #[test]
    fn skips_labels_and_truncates() {
        let pool: AnswerPool = ["trace amount", "1", "2", "3", "4", "5"]
            .into_iter()
            .collect();
        let picked = select_nearest(&Answer::parse("0"), &pool, 4, 0.1);
        assert_eq!(texts(&picked), vec!["1", "2", "3", "4"]);
        assert_eq!(picked[0].index, 1);
    }

    #[test]
    fn label_correct_or_empty_pool_yields_nothing() {
        let pool: AnswerPool = ["1", "2"].into_iter().collect();
        assert!(select_nearest(&Answer::parse("a pinch"), &pool, 4, 0.1).is_empty());
        assert!(select_nearest(&Answer::parse("3"), &AnswerPool::default(), 4, 0.1).is_empty());
    }
}
