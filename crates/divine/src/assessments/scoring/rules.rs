use std::collections::BTreeMap;

use super::super::domain::{Gift, GiftScore, Question, ResponseSet};

pub(crate) struct Aggregation {
    pub gift_scores: Vec<GiftScore>,
    pub answered_total: u32,
    pub answered: u32,
    pub unanswered: u32,
}

/// Groups answered questions by gift. Unanswered questions contribute to
/// neither the total nor the count, so a partially completed gift is averaged
/// over what was actually answered. Gifts keep the order in which they first
/// appear in `questions`, and gifts with nothing answered are dropped.
pub(crate) fn aggregate_gifts(questions: &[Question], responses: &ResponseSet) -> Aggregation {
    let mut slots: Vec<(Gift, u32, u32)> = Vec::new();
    let mut positions: BTreeMap<Gift, usize> = BTreeMap::new();
    let mut answered_total = 0;
    let mut answered = 0;
    let mut unanswered = 0;

    for question in questions {
        let index = *positions.entry(question.gift).or_insert_with(|| {
            slots.push((question.gift, 0, 0));
            slots.len() - 1
        });

        match responses.get(&question.id) {
            Some(score) => {
                let value = u32::from(score.value());
                slots[index].1 += value;
                slots[index].2 += 1;
                answered_total += value;
                answered += 1;
            }
            None => unanswered += 1,
        }
    }

    let gift_scores = slots
        .into_iter()
        .filter(|(_, _, count)| *count > 0)
        .map(|(gift, total, count)| GiftScore {
            gift,
            total_score: total,
            question_count: count,
            average_score: f64::from(total) / f64::from(count),
        })
        .collect();

    Aggregation {
        gift_scores,
        answered_total,
        answered,
        unanswered,
    }
}

/// Highest per-gift averages first. `sort_by` is stable, so equal averages
/// stay in question-sequence order.
pub(crate) fn rank_top_gifts(gift_scores: &[GiftScore], limit: usize) -> Vec<Gift> {
    let mut ranked: Vec<&GiftScore> = gift_scores.iter().collect();
    ranked.sort_by(|a, b| b.average_score.total_cmp(&a.average_score));
    ranked
        .into_iter()
        .take(limit)
        .map(|score| score.gift)
        .collect()
}

/// Rounds `total / count` to one decimal place, half-up, using integer math
/// so values such as 4.45 do not drift below the midpoint.
pub(crate) fn round_to_tenth(total: u32, count: u32) -> f64 {
    let total = u64::from(total);
    let count = u64::from(count);
    let tenths = (20 * total + count) / (2 * count);
    tenths as f64 / 10.0
}
