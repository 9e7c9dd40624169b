use std::{borrow::Borrow, fmt};

use itertools::Itertools;

use crate::language::Language;

/// Pump counts tried for every decomposition. k = 1 is the word itself.
pub const PUMP_COUNTS: [usize; 4] = [0, 1, 2, 3];

/// A split of a word into x·y·z with y non-empty. `split` holds the
/// character offsets (i, j) so that x = w[..i], y = w[i..j], z = w[j..].
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub struct Decomposition {
    pub x: String,
    pub y: String,
    pub z: String,
    pub split: (usize, usize),
}

impl Decomposition {
    pub fn pump(&self, k: usize) -> String {
        let mut pumped = String::with_capacity(self.x.len() + self.y.len() * k + self.z.len());
        pumped.push_str(&self.x);
        pumped.push_str(&self.y.repeat(k));
        pumped.push_str(&self.z);
        pumped
    }
}

/// All decompositions with 1 <= i < j <= p, i outer and j inner.
/// Words shorter than p have none.
pub fn decompositions(word: &str, p: usize) -> impl Iterator<Item = Decomposition> + '_ {
    let bounds = word
        .char_indices()
        .map(|(b, _)| b)
        .chain(std::iter::once(word.len()))
        .collect_vec();
    let len = bounds.len() - 1;
    let p = if len < p { 0 } else { p };

    (1..=p).tuple_combinations().map(move |(i, j)| Decomposition {
        x: word[..bounds[i]].to_string(),
        y: word[bounds[i]..bounds[j]].to_string(),
        z: word[bounds[j]..].to_string(),
        split: (i, j),
    })
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Observation {
    /// zero-based index of the decomposition within the run
    pub trial: usize,
    pub k: usize,
    pub decomposition: Decomposition,
    pub pumped: String,
    pub member: bool,
}

impl Observation {
    pub fn is_disproof(&self) -> bool {
        self.k != 1 && !self.member
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Verdict {
    TooShort,
    NotRegular,
    NotDisproved,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::TooShort => write!(f, "Word is too short. Must be at least length p."),
            Verdict::NotRegular => write!(f, "The language is NOT regular (irregular)"),
            Verdict::NotDisproved => write!(
                f,
                "Could not disprove regularity using this word and p (this does not prove the language is regular)"
            ),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Report {
    pub observations: Vec<Observation>,
    pub verdict: Verdict,
}

/// One pumping run over fixed inputs. Every accessor starts from scratch,
/// so iterating twice yields the same sequence.
#[derive(Debug, Clone, Copy)]
pub struct Demonstration<'a> {
    word: &'a str,
    p: usize,
    language: Language,
}

pub fn demonstrate(word: &str, p: usize, language: Language) -> Demonstration<'_> {
    Demonstration { word, p, language }
}

impl<'a> Demonstration<'a> {
    pub fn word(&self) -> &'a str {
        self.word
    }

    pub fn p(&self) -> usize {
        self.p
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn is_too_short(&self) -> bool {
        self.word.chars().count() < self.p
    }

    pub fn trials(&self) -> impl Iterator<Item = Decomposition> + 'a {
        decompositions(self.word, self.p)
    }

    pub fn observations(&self) -> impl Iterator<Item = Observation> + 'a {
        let language = self.language;
        self.trials().enumerate().flat_map(move |(trial, decomposition)| {
            log::debug!(
                "trial {}: x={:?} y={:?} z={:?}",
                trial,
                decomposition.x,
                decomposition.y,
                decomposition.z
            );
            PUMP_COUNTS.into_iter().map(move |k| {
                let pumped = decomposition.pump(k);
                let member = language.contains(&pumped);
                let observation = Observation {
                    trial,
                    k,
                    decomposition: decomposition.clone(),
                    pumped,
                    member,
                };
                if observation.is_disproof() {
                    log::debug!("trial {} disproved at k={}: {:?}", trial, k, observation.pumped);
                }
                observation
            })
        })
    }

    // the only place the verdict is decided
    fn fold_verdict<I>(&self, observations: I) -> Verdict
    where
        I: IntoIterator,
        I::Item: Borrow<Observation>,
    {
        let mut seen = 0usize;
        let mut disproved = false;
        for o in observations {
            seen += 1;
            disproved |= o.borrow().is_disproof();
        }
        let verdict = if self.is_too_short() {
            Verdict::TooShort
        } else if disproved {
            Verdict::NotRegular
        } else {
            Verdict::NotDisproved
        };
        log::info!(
            "L{} word={:?} p={}: {} observations, verdict {:?}",
            self.language.id(),
            self.word,
            self.p,
            seen,
            verdict
        );
        verdict
    }

    pub fn verdict(&self) -> Verdict {
        self.fold_verdict(self.observations())
    }

    pub fn report(&self) -> Report {
        let observations = self.observations().collect_vec();
        let verdict = self.fold_verdict(&observations);
        Report {
            observations,
            verdict,
        }
    }
}

#[test]
fn test_decompositions_skip_empty_y() {
    let splits = decompositions("aabb", 2).map(|d| d.split).collect_vec();
    assert_eq!(splits, vec![(1, 2)]);

    let splits = decompositions("abcde", 4).map(|d| d.split).collect_vec();
    assert_eq!(
        splits,
        vec![(1, 2), (1, 3), (1, 4), (2, 3), (2, 4), (3, 4)]
    );
    for d in decompositions("abcde", 4) {
        assert_eq!(d.x.clone() + &d.y + &d.z, "abcde");
        assert!(!d.y.is_empty());
        assert!(d.x.len() + d.y.len() <= 4);
    }
}

#[test]
fn test_decompositions_too_short_or_zero() {
    assert_eq!(decompositions("ab", 3).count(), 0);
    assert_eq!(decompositions("ab", 0).count(), 0);
    assert_eq!(decompositions("ab", 1).count(), 0);
}

#[test]
fn test_pump() {
    let d = Decomposition {
        x: "a".to_string(),
        y: "bc".to_string(),
        z: "d".to_string(),
        split: (1, 3),
    };
    assert_eq!(d.pump(0), "ad");
    assert_eq!(d.pump(1), "abcd");
    assert_eq!(d.pump(3), "abcbcbcd");
}

#[test]
fn test_too_short() {
    let demo = demonstrate("ab", 3, Language::AnBn);
    assert!(demo.is_too_short());
    assert_eq!(demo.observations().count(), 0);
    assert_eq!(demo.verdict(), Verdict::TooShort);
    let report = demo.report();
    assert!(report.observations.is_empty());
    assert_eq!(report.verdict, Verdict::TooShort);
}

#[test]
fn test_aabb_in_an_bn() {
    let report = demonstrate("aabb", 2, Language::AnBn).report();
    let rows = report
        .observations
        .iter()
        .map(|o| (o.trial, o.k, o.pumped.as_str(), o.member))
        .collect_vec();
    assert_eq!(
        rows,
        vec![
            (0, 0, "abb", false),
            (0, 1, "aabb", true),
            (0, 2, "aaabb", false),
            (0, 3, "aaaabb", false),
        ]
    );
    assert_eq!(report.verdict, Verdict::NotRegular);
}

#[test]
fn test_unpumped_word_is_not_a_disproof() {
    let o = Observation {
        trial: 0,
        k: 1,
        decomposition: Decomposition {
            x: "a".to_string(),
            y: "a".to_string(),
            z: "b".to_string(),
            split: (1, 2),
        },
        pumped: "aab".to_string(),
        member: false,
    };
    assert!(!o.is_disproof());
    assert!(Observation { k: 0, ..o.clone() }.is_disproof());
    assert!(!Observation { k: 2, member: true, ..o }.is_disproof());
}

#[test]
fn test_not_disproved_when_all_pumps_stay_in_language() {
    // only b's: every pumped variant keeps an empty a-run
    let demo = demonstrate("bbb", 3, Language::EvenAThenB);
    let report = demo.report();
    assert_eq!(report.observations.len(), 3 * PUMP_COUNTS.len());
    assert!(report.observations.iter().all(|o| o.member));
    assert_eq!(report.verdict, Verdict::NotDisproved);

    assert_eq!(
        demonstrate("ab", 1, Language::AnBn).verdict(),
        Verdict::NotDisproved
    );
}

#[test]
fn test_rerun_is_identical() {
    let demo = demonstrate("aaabbb", 3, Language::AnBmCn);
    let first = demo.observations().collect_vec();
    let second = demo.observations().collect_vec();
    assert_eq!(first, second);
    assert_eq!(demo.report(), demonstrate("aaabbb", 3, Language::AnBmCn).report());
    assert_eq!(demo.verdict(), demo.report().verdict);
}

#[test]
fn test_verdict_agrees_with_report() {
    for lang in Language::ALL {
        for (word, p) in [("aabb", 2), ("ab", 3), ("bbb", 3), ("abcabc", 4)] {
            let demo = demonstrate(word, p, lang);
            let report = demo.report();
            assert_eq!(demo.verdict(), report.verdict, "L{} {word} {p}", lang.id());
            let disproved = report.observations.iter().any(|o| o.is_disproof());
            assert_eq!(report.verdict == Verdict::NotRegular, disproved);
        }
    }
}

#[test]
fn test_verdict_wording_keeps_asymmetry() {
    assert!(Verdict::NotRegular.to_string().contains("NOT regular"));
    assert!(Verdict::NotDisproved
        .to_string()
        .contains("does not prove the language is regular"));
}
