use std::io::{self, Write};

use crate::pumping::{Demonstration, Verdict};

/// Writes the step-by-step narration of a demonstration.
pub fn render<W: Write>(demo: &Demonstration, out: &mut W) -> io::Result<()> {
    writeln!(out, "\nPumping Lemma Demonstrator")?;
    writeln!(out, "Language: {}", demo.language())?;
    writeln!(out, "Word: {}\nPumping length: {}", demo.word(), demo.p())?;

    let report = demo.report();
    if report.verdict == Verdict::TooShort {
        writeln!(out, "{}", report.verdict)?;
        return Ok(());
    }

    let mut current_trial = None;
    for o in &report.observations {
        if current_trial != Some(o.trial) {
            current_trial = Some(o.trial);
            let d = &o.decomposition;
            writeln!(out, "\nTrying decomposition:")?;
            writeln!(out, "x = \"{}\", y = \"{}\", z = \"{}\"", d.x, d.y, d.z)?;
        }
        let status = if o.member { "In L" } else { "Not in L" };
        writeln!(out, "  i={}: {} {}", o.k, o.pumped, status)?;
    }

    writeln!(out, "\nResult: {}", report.verdict)?;
    Ok(())
}

pub fn render_to_string(demo: &Demonstration) -> String {
    let mut buf = vec![];
    // writing into a Vec cannot fail
    let _ = render(demo, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

#[cfg(test)]
use crate::{language::Language, pumping::demonstrate};

#[test]
fn test_render_aabb() {
    let text = render_to_string(&demonstrate("aabb", 2, Language::AnBn));
    assert!(text.contains("Word: aabb\nPumping length: 2"));
    assert!(text.contains("x = \"a\", y = \"a\", z = \"bb\""));
    assert!(text.contains("  i=0: abb Not in L\n"));
    assert!(text.contains("  i=1: aabb In L\n"));
    assert!(text.ends_with(&format!("Result: {}\n", Verdict::NotRegular)));
    assert_eq!(text.matches("Trying decomposition").count(), 1);
}

#[test]
fn test_render_too_short() {
    let text = render_to_string(&demonstrate("ab", 5, Language::AbRepeated));
    assert!(text.contains(&Verdict::TooShort.to_string()));
    assert!(!text.contains("Trying decomposition"));
    assert!(!text.contains("Result:"));
}

#[test]
fn test_render_matches_verdict() {
    for lang in Language::ALL {
        let demo = demonstrate("aabbcc", 3, lang);
        let text = render_to_string(&demo);
        assert!(text.ends_with(&format!("Result: {}\n", demo.verdict())));
    }
}

#[cfg(test)]
static CAPTURED: std::sync::Mutex<Vec<(log::Level, String)>> = std::sync::Mutex::new(Vec::new());

#[cfg(test)]
struct Capture;

#[cfg(test)]
impl log::Log for Capture {
    fn enabled(&self, _: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        CAPTURED
            .lock()
            .unwrap()
            .push((record.level(), record.args().to_string()));
    }

    fn flush(&self) {}
}

#[cfg(test)]
static CAPTURE: Capture = Capture;

#[test]
fn test_render_logs_verdict() {
    let _ = log::set_logger(&CAPTURE);
    log::set_max_level(log::LevelFilter::Info);

    render_to_string(&demonstrate("aaabbbb", 2, Language::AnBn));
    let captured = CAPTURED.lock().unwrap();
    let verdicts = captured
        .iter()
        .filter(|(level, msg)| *level == log::Level::Info && msg.contains("word=\"aaabbbb\""))
        .collect::<Vec<_>>();
    assert_eq!(verdicts.len(), 1);
    assert!(verdicts[0].1.contains("verdict NotRegular"));
}
