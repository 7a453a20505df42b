use std::path::PathBuf;

use super::*;

fn report(outcomes: Vec<SlideOutcome>) -> BatchReport {
    outcomes
        .into_iter()
        .enumerate()
        .map(|(index, outcome)| SlideReport {
            index,
            label: format!("Slide {index}"),
            output_name: format!("{index:02}.png"),
            outcome,
        })
        .collect()
}

fn built(name: &str) -> SlideOutcome {
    SlideOutcome::Built {
        output: PathBuf::from("/out").join(name),
    }
}

fn missing(name: &str) -> SlideOutcome {
    SlideOutcome::MissingSource {
        source: name.to_string(),
    }
}

#[test]
fn summary_folds_over_outcomes() {
    let r = report(vec![built("a.png"), missing("b.png"), built("c.png")]);
    assert_eq!(r.total(), 3);
    assert_eq!(r.created(), 2);
    assert_eq!(r.missing(), vec!["b.png"]);
    assert_eq!(
        r.outputs(),
        vec![Path::new("/out/a.png"), Path::new("/out/c.png")]
    );
    assert!(!r.is_complete());
    assert_eq!(r.summary(), "Generated 2/3 screenshots.");
}

#[test]
fn failed_slides_are_counted_apart_from_missing() {
    let r = report(vec![
        built("a.png"),
        SlideOutcome::Failed {
            error: "decode screenshot 'b.png'".to_string(),
        },
        missing("c.png"),
    ]);
    assert_eq!(r.created(), 1);
    assert_eq!(r.failed(), 1);
    assert_eq!(r.failures(), vec![("01.png", "decode screenshot 'b.png'")]);
    assert_eq!(r.missing(), vec!["c.png"]);
    assert_eq!(r.summary(), "Generated 1/3 screenshots. 1 failed.");

    let line = r.slides[1].progress_line(3);
    assert!(line.starts_with("[ 2/3] failed"));
    assert!(line.contains("decode screenshot 'b.png'"));
}

#[test]
fn empty_report_is_complete() {
    let r = BatchReport::default();
    assert!(r.is_complete());
    assert_eq!(r.summary(), "Generated 0/0 screenshots.");
}

#[test]
fn progress_lines_name_slide_and_status() {
    let r = report(vec![built("a.png"), missing("b.png")]);
    let ok = r.slides[0].progress_line(10);
    assert!(ok.starts_with("[ 1/10] ok"));
    assert!(ok.ends_with("-> 00.png"));
    let miss = r.slides[1].progress_line(10);
    assert!(miss.starts_with("[ 2/10] missing"));
    assert!(miss.contains("(Missing: b.png)"));
}

#[test]
fn missing_sources_checks_the_source_dir() {
    let dir = std::env::temp_dir().join(format!(
        "storeshots_batch_preflight_{}",
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("dashboard.png"), b"x").unwrap();

    let job = JobConfig::default();
    let missing = missing_sources(&job, &dir);
    assert_eq!(missing.len(), 9);
    assert!(!missing.contains(&"dashboard.png".to_string()));
    assert_eq!(missing[0], "network-map.png");
}
