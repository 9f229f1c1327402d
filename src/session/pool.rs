use rand::Rng;
use rand::seq::SliceRandom;

use crate::vocab::{Book, Unit, Vocab, VocabRepository};

/// Challenge batches are walked in blocks of this many source words.
pub const BLOCK_SIZE: usize = 10;

/// Chance of splicing one bonus word into the block with this 0-based index.
pub fn extra_probability(block_index: usize) -> f64 {
    match block_index {
        0 => 0.0,
        1 => 0.2,
        2 => 0.5,
        3 => 0.8,
        _ => 1.0,
    }
}

/// Build a fixed-length quiz: one random word from every selected unit that
/// has any, then fill up to `count` from the rest without replacement.
pub fn assemble_quiz<R: Rng>(
    catalog: &VocabRepository,
    selection: &[(Book, Unit)],
    count: usize,
    rng: &mut R,
) -> Vec<Vocab> {
    let pool = catalog.in_selection(selection);
    let mut taken = vec![false; pool.len()];
    let mut quiz = Vec::with_capacity(count);

    for &(book, unit) in selection {
        let in_unit: Vec<usize> = (0..pool.len())
            .filter(|&i| !taken[i] && pool[i].book == book && pool[i].unit == unit)
            .collect();
        if let Some(&i) = in_unit.choose(rng) {
            taken[i] = true;
            quiz.push(pool[i].clone());
        }
    }

    let mut rest: Vec<usize> = (0..pool.len()).filter(|&i| !taken[i]).collect();
    rest.shuffle(rng);
    let fill = count.saturating_sub(quiz.len());
    quiz.extend(rest.into_iter().take(fill).map(|i| pool[i].clone()));

    quiz.shuffle(rng);
    quiz
}

/// Append one shuffled pass over `source` to `queue`, splicing bonus words
/// from `extras` at block boundaries. Returns the number of words appended.
pub fn append_challenge_batch<R: Rng>(
    queue: &mut Vec<Vocab>,
    source: &[Vocab],
    extras: &[Vocab],
    rng: &mut R,
) -> usize {
    let mut shuffled = source.to_vec();
    shuffled.shuffle(rng);

    if extras.is_empty() {
        let added = shuffled.len();
        queue.extend(shuffled);
        return added;
    }

    let mut mixed: Vec<Vocab> = Vec::with_capacity(shuffled.len() + shuffled.len() / BLOCK_SIZE);
    let mut in_block = 0;
    let mut block_index = 0;
    for vocab in shuffled {
        mixed.push(vocab);
        in_block += 1;
        if in_block == BLOCK_SIZE {
            let p = extra_probability(block_index);
            let insert = p >= 1.0 || (p > 0.0 && rng.gen_bool(p));
            if insert {
                if let Some(extra) = extras.choose(rng) {
                    // Only within the block just added, never into earlier ones.
                    let start = mixed.len().saturating_sub(BLOCK_SIZE);
                    let pos = rng.gen_range(start..=mixed.len());
                    mixed.insert(pos, extra.clone());
                }
            }
            in_block = 0;
            block_index += 1;
        }
    }

    let added = mixed.len();
    queue.extend(mixed);
    added
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn words(n: usize, book: Book, unit: Unit) -> Vec<Vocab> {
        (0..n)
            .map(|i| Vocab::new(&format!("w{unit:?}{i}"), &format!("m{i}"), "", book, unit))
            .collect()
    }

    fn extra_words() -> Vec<Vocab> {
        vec![Vocab::new("bonus", "奖励", "", Book::Grade6Down, Unit::Unit1)]
    }

    #[test]
    fn every_selected_unit_gets_a_question() {
        let mut entries = words(20, Book::Grade3Up, Unit::Unit1);
        entries.extend(words(1, Book::Grade3Up, Unit::Unit2));
        entries.extend(words(1, Book::Grade5Up, Unit::Unit4));
        let repo = VocabRepository::from_entries(entries, Vec::new());
        let selection = [
            (Book::Grade3Up, Unit::Unit1),
            (Book::Grade3Up, Unit::Unit2),
            (Book::Grade5Up, Unit::Unit4),
        ];
        for seed in 0..20 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let quiz = assemble_quiz(&repo, &selection, 8, &mut rng);
            assert_eq!(quiz.len(), 8);
            assert!(quiz.iter().any(|v| v.unit == Unit::Unit2));
            assert!(quiz.iter().any(|v| v.book == Book::Grade5Up));
        }
    }

    #[test]
    fn quiz_has_no_duplicates_and_ignores_unselected() {
        let mut entries = words(10, Book::Grade4Up, Unit::Unit1);
        entries.extend(words(10, Book::Grade4Up, Unit::Unit3));
        let repo = VocabRepository::from_entries(entries, Vec::new());
        let mut rng = SmallRng::seed_from_u64(3);
        let quiz = assemble_quiz(&repo, &[(Book::Grade4Up, Unit::Unit1)], 8, &mut rng);
        let mut seen: Vec<&str> = quiz.iter().map(|v| v.word.as_str()).collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 8);
        assert!(quiz.iter().all(|v| v.unit == Unit::Unit1));
    }

    #[test]
    fn short_pool_yields_what_exists() {
        let repo = VocabRepository::from_entries(words(3, Book::Grade3Up, Unit::Unit1), Vec::new());
        let mut rng = SmallRng::seed_from_u64(1);
        let quiz = assemble_quiz(&repo, &[(Book::Grade3Up, Unit::Unit1)], 8, &mut rng);
        assert_eq!(quiz.len(), 3);
    }

    #[test]
    fn first_block_never_gets_bonus() {
        let source = words(10, Book::Grade3Up, Unit::Unit1);
        for seed in 0..50 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let mut queue = Vec::new();
            let added = append_challenge_batch(&mut queue, &source, &extra_words(), &mut rng);
            assert_eq!(added, 10);
            assert!(queue.iter().all(|v| v.word != "bonus"));
        }
    }

    #[test]
    fn fifth_block_always_gets_bonus_inside_it() {
        let source = words(50, Book::Grade3Up, Unit::Unit1);
        for seed in 0..20 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let mut queue = Vec::new();
            append_challenge_batch(&mut queue, &source, &extra_words(), &mut rng);
            // At least the block-4 bonus is present, at most one per block 1..=4.
            let bonuses = queue.iter().filter(|v| v.word == "bonus").count();
            assert!((1..=4).contains(&bonuses));
            let last_bonus = queue.iter().rposition(|v| v.word == "bonus").unwrap();
            assert!(last_bonus >= 40);
        }
    }

    #[test]
    fn batches_grow_queue_by_source_len_plus_bonus() {
        let source = words(25, Book::Grade3Up, Unit::Unit1);
        let mut rng = SmallRng::seed_from_u64(11);
        let mut queue = Vec::new();
        let mut prev = 0;
        for _ in 0..5 {
            append_challenge_batch(&mut queue, &source, &extra_words(), &mut rng);
            let grown = queue.len() - prev;
            assert!(grown == 25 || grown == 26, "grew by {grown}");
            prev = queue.len();
        }
    }

    #[test]
    fn probabilities_follow_schedule() {
        assert_eq!(extra_probability(0), 0.0);
        assert_eq!(extra_probability(1), 0.2);
        assert_eq!(extra_probability(2), 0.5);
        assert_eq!(extra_probability(3), 0.8);
        assert_eq!(extra_probability(4), 1.0);
        assert_eq!(extra_probability(17), 1.0);
    }
}
