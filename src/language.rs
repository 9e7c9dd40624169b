use std::{fmt, str::FromStr};

use crate::{error::Error, prompt::parse_positive};

/// The five languages over {a, b, c} the demonstrator knows about.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Language {
    /// { a^n b^n | n >= 0 }
    AnBn,
    /// { a^n b^m c^n | n, m >= 0 }
    AnBmCn,
    /// { (ab)^n | n >= 0 }
    AbRepeated,
    /// equal number of a's and b's, in any order
    EqualAb,
    /// { a^m b^n | m, n >= 0 and m is even }
    EvenAThenB,
}

impl Language {
    pub const ALL: [Language; 5] = [
        Language::AnBn,
        Language::AnBmCn,
        Language::AbRepeated,
        Language::EqualAb,
        Language::EvenAThenB,
    ];

    pub fn from_id(id: u32) -> Option<Language> {
        match id {
            1 => Some(Language::AnBn),
            2 => Some(Language::AnBmCn),
            3 => Some(Language::AbRepeated),
            4 => Some(Language::EqualAb),
            5 => Some(Language::EvenAThenB),
            _ => None,
        }
    }

    pub fn id(&self) -> u32 {
        match self {
            Language::AnBn => 1,
            Language::AnBmCn => 2,
            Language::AbRepeated => 3,
            Language::EqualAb => 4,
            Language::EvenAThenB => 5,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Language::AnBn => "L = { a^n b^n | n >= 0 }",
            Language::AnBmCn => "L = { a^n b^m c^n | n, m >= 0 }",
            Language::AbRepeated => "L = { (ab)^n | n >= 0 }",
            Language::EqualAb => "L = { strings with equal number of a's and b's }",
            Language::EvenAThenB => "L = { a^m b^n | m, n >= 0 and m is even }",
        }
    }

    pub fn contains(&self, s: &str) -> bool {
        let s = s.as_bytes();
        let member = match self {
            Language::AnBn => is_an_bn(s),
            Language::AnBmCn => is_an_bm_cn(s),
            Language::AbRepeated => is_ab_repeated(s),
            Language::EqualAb => is_equal_ab(s),
            Language::EvenAThenB => is_even_a_then_b(s),
        };
        log::trace!("L{} contains {:?}: {}", self.id(), String::from_utf8_lossy(s), member);
        member
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_positive(s)
            .and_then(|n| u32::try_from(n).ok())
            .and_then(Language::from_id)
            .ok_or_else(|| Error::UnknownLanguage(s.trim().to_string()))
    }
}

/// Membership keyed by the numeric id shown in the menu. Ids outside 1..=5
/// accept nothing.
pub fn is_member(language_id: u32, s: &str) -> bool {
    Language::from_id(language_id).map_or(false, |l| l.contains(s))
}

// length of the run of `ch` starting at `from`
fn run(s: &[u8], from: usize, ch: u8) -> usize {
    s[from..].iter().take_while(|&&c| c == ch).count()
}

fn is_an_bn(s: &[u8]) -> bool {
    let a = run(s, 0, b'a');
    let b = run(s, a, b'b');
    a + b == s.len() && a == b
}

fn is_an_bm_cn(s: &[u8]) -> bool {
    let a = run(s, 0, b'a');
    let b = run(s, a, b'b');
    let c = run(s, a + b, b'c');
    a + b + c == s.len() && a == c
}

fn is_ab_repeated(s: &[u8]) -> bool {
    s.len() % 2 == 0 && s.chunks(2).all(|pair| pair == b"ab")
}

fn is_equal_ab(s: &[u8]) -> bool {
    let a = s.iter().filter(|&&c| c == b'a').count();
    let b = s.iter().filter(|&&c| c == b'b').count();
    a == b
}

// only the a-run is constrained; the b-run may have any length
fn is_even_a_then_b(s: &[u8]) -> bool {
    let a = run(s, 0, b'a');
    let b = run(s, a, b'b');
    a + b == s.len() && a % 2 == 0
}

#[cfg(test)]
fn rep(ch: char, n: usize) -> String {
    std::iter::repeat(ch).take(n).collect()
}

#[test]
fn test_ids_roundtrip_in_menu_order() {
    for (idx, lang) in Language::ALL.iter().enumerate() {
        assert_eq!(lang.id(), idx as u32 + 1);
        assert_eq!(Language::from_id(lang.id()), Some(*lang));
    }
    assert_eq!(Language::from_id(0), None);
    assert_eq!(Language::from_id(6), None);
}

#[test]
fn test_parse_language() {
    assert_eq!(" 3 ".parse::<Language>().unwrap(), Language::AbRepeated);
    assert!("6".parse::<Language>().is_err());
    assert!("two".parse::<Language>().is_err());
}

#[test]
fn test_an_bn() {
    for n in 0..8 {
        let word = rep('a', n) + &rep('b', n);
        assert!(is_member(1, &word), "{word}");
        let longer = rep('a', n) + &rep('b', n + 1);
        assert!(!is_member(1, &longer), "{longer}");
    }
    assert!(!is_member(1, "ba"));
    assert!(!is_member(1, "abab"));
    assert!(!is_member(1, "aabbc"));
    assert!(!is_member(1, "acb"));
}

#[test]
fn test_an_bm_cn() {
    for n in 0..5 {
        for m in 0..5 {
            let word = rep('a', n) + &rep('b', m) + &rep('c', n);
            assert!(is_member(2, &word), "{word}");
            let more_a = rep('a', n + 1) + &rep('b', m) + &rep('c', n);
            assert!(!is_member(2, &more_a), "{more_a}");
            let more_c = rep('a', n) + &rep('b', m) + &rep('c', n + 1);
            assert!(!is_member(2, &more_c), "{more_c}");
        }
    }
    assert!(!is_member(2, "acbc"));
    assert!(!is_member(2, "abca"));
}

#[test]
fn test_ab_repeated() {
    assert!(is_member(3, ""));
    for n in 0..6 {
        assert!(is_member(3, &"ab".repeat(n)));
    }
    assert!(!is_member(3, "aab"));
    assert!(!is_member(3, "aba"));
    assert!(!is_member(3, "ba"));
    assert!(!is_member(3, "abba"));
}

#[test]
fn test_equal_ab_ignores_other_letters() {
    assert!(is_member(4, ""));
    assert!(is_member(4, "ba"));
    assert!(is_member(4, "cabcc"));
    assert!(is_member(4, "ccc"));
    assert!(!is_member(4, "aab"));
}

#[test]
fn test_equal_ab_random() {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    for _ in 0..500 {
        let len = rng.gen_range(0..12);
        let word: String = (0..len)
            .map(|_| ['a', 'b', 'c'][rng.gen_range(0..3)])
            .collect();
        let a = word.chars().filter(|&c| c == 'a').count();
        let b = word.chars().filter(|&c| c == 'b').count();
        assert_eq!(is_member(4, &word), a == b, "{word}");
    }
}

#[test]
fn test_even_a_then_b() {
    for k in 0..6 {
        assert!(is_member(5, &("aa".to_string() + &rep('b', k))));
        assert!(!is_member(5, &("a".to_string() + &rep('b', k))));
    }
    assert!(is_member(5, ""));
    assert!(!is_member(5, "aaba"));
    assert!(!is_member(5, "aabc"));
}

#[test]
fn test_run_languages_random() {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    for _ in 0..200 {
        let n = rng.gen_range(0..20);
        let m = rng.gen_range(0..20);
        let extra = rng.gen_range(1..4);

        assert!(is_member(1, &(rep('a', n) + &rep('b', n))));
        assert!(!is_member(1, &(rep('a', n) + &rep('b', n + extra))));
        assert!(!is_member(1, &(rep('a', n + extra) + &rep('b', n))));

        assert!(is_member(2, &(rep('a', n) + &rep('b', m) + &rep('c', n))));
        assert!(!is_member(2, &(rep('a', n + extra) + &rep('b', m) + &rep('c', n))));
        assert!(!is_member(2, &(rep('a', n) + &rep('b', m) + &rep('c', n + extra))));

        let a_run = rep('a', n) + &rep('b', m);
        assert_eq!(is_member(5, &a_run), n % 2 == 0, "{a_run}");
    }
}

#[test]
fn test_unknown_id_accepts_nothing() {
    for id in [0, 6, 42, u32::MAX] {
        assert!(!is_member(id, ""));
        assert!(!is_member(id, "ab"));
    }
}
